//! View renderer: navigation state in, styled frame text out.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::plan::Category;
use crate::render::LineStyle;

use super::state::{Navigator, ViewMode};

/// Separator width when the terminal reports zero columns.
const FALLBACK_WIDTH: usize = 80;

/// Footer shown in list mode.
const LIST_HELP: &str = "[Arrows]: Navigate  [Enter]: Details  [Tab]: Next Category  [?]: Help  [q]: Quit";

/// Footer shown in detail mode.
const DETAIL_HELP: &str = "(Press Esc to go back)";

/// Footer shown while the help overlay is open.
const OVERLAY_HELP: &str = "Press ? or Esc to close";

/// Body text of an empty category.
const EMPTY_BUCKET: &str = "  No changes in this category.";

/// Key bindings listed by the help overlay.
const KEY_BINDINGS: [(&str, &str); 9] = [
    ("Tab / Right / l", "Next category"),
    ("Shift+Tab / Left / h", "Previous category"),
    ("Up / k, Down / j", "Move cursor or scroll"),
    ("PageUp / PageDown", "Move one page"),
    ("Home / g, End / G", "Jump to top or bottom"),
    ("Enter", "Show resource details"),
    ("Esc", "Back to the list"),
    ("?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

const MUTED: Color = Color::Rgb(0x62, 0x62, 0x62);
const CURSOR: Color = Color::Indexed(205);
const ACTIVE_TAB_TEXT: Color = Color::Rgb(0xFA, 0xFA, 0xFA);

/// Renders complete frames for the interactive session.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewRenderer;

impl ViewRenderer {
    /// Creates a new view renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Renders one frame.
    ///
    /// The body is padded to the viewport's body height so the footer stays
    /// on the last row.
    #[must_use]
    pub fn frame(&self, nav: &Navigator) -> Text<'static> {
        let width = match usize::from(nav.viewport().width) {
            0 => FALLBACK_WIDTH,
            w => w,
        };
        let body_height = nav.viewport().body_height();

        let mut lines = vec![
            Self::tab_row(nav),
            Line::styled("─".repeat(width), Style::default().fg(MUTED)),
            Line::default(),
        ];

        let mut body = if nav.state().help_visible {
            Self::help_body()
        } else {
            match nav.state().mode {
                ViewMode::List => Self::list_body(nav, body_height),
                ViewMode::Detail => Self::detail_body(nav, body_height),
            }
        };
        body.resize(body_height, Line::default());
        lines.extend(body);

        let footer = match (nav.state().help_visible, nav.state().mode) {
            (true, _) => OVERLAY_HELP,
            (false, ViewMode::List) => LIST_HELP,
            (false, ViewMode::Detail) => DETAIL_HELP,
        };
        lines.push(Line::default());
        lines.push(Line::styled(footer, Style::default().fg(MUTED)));

        Text::from(lines)
    }

    fn tab_row(nav: &Navigator) -> Line<'static> {
        let mut spans = Vec::with_capacity(Category::COUNT * 2);
        for (category, changes) in nav.buckets().iter() {
            let (r, g, b) = category.color();
            let color = Color::Rgb(r, g, b);
            let style = if category == nav.state().category {
                Style::default()
                    .fg(ACTIVE_TAB_TEXT)
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} ", category.tab_title(changes.len())),
                style,
            ));
        }
        Line::from(spans)
    }

    fn list_body(nav: &Navigator, height: usize) -> Vec<Line<'static>> {
        let bucket = nav.current_bucket();
        if bucket.is_empty() {
            return vec![Line::styled(EMPTY_BUCKET, Style::default().fg(MUTED))];
        }

        let state = nav.state();
        bucket
            .iter()
            .enumerate()
            .skip(state.list_offset)
            .take(height)
            .map(|(index, change)| {
                if index == state.cursor {
                    Line::styled(
                        format!("> {}", change.address),
                        Style::default().fg(CURSOR).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Line::raw(format!("  {}", change.address))
                }
            })
            .collect()
    }

    fn detail_body(nav: &Navigator, height: usize) -> Vec<Line<'static>> {
        let Some(block) = nav.detail() else {
            return Vec::new();
        };

        block
            .rows()
            .into_iter()
            .skip(nav.state().scroll)
            .take(height)
            .map(|row| Line::styled(row.text.to_string(), line_style(row.style)))
            .collect()
    }

    fn help_body() -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled(
            "  Key bindings",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        lines.push(Line::default());
        for (keys, action) in KEY_BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<24}"), Style::default().fg(CURSOR)),
                Span::raw(action),
            ]));
        }
        lines
    }
}

/// Maps a diff line style to a terminal style.
fn line_style(style: LineStyle) -> Style {
    match style {
        LineStyle::Heading => Style::default().add_modifier(Modifier::BOLD),
        LineStyle::Plain => Style::default(),
        LineStyle::Tinted(category) => category
            .diff_color()
            .map_or_else(Style::default, |(r, g, b)| {
                Style::default().fg(Color::Rgb(r, g, b))
            }),
    }
}
