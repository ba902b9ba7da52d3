//! Navigation state machine.
//!
//! [`Navigator::handle`] is the only way state changes: one command in, the
//! updated state and a [`Flow`] out. Out-of-range moves are clamped, never
//! reported.

use tracing::debug;

use crate::plan::{Buckets, Category, ResourceChange};
use crate::render::{RenderedBlock, ResourceRenderer};

/// Rows above the body: tab row, separator, blank line.
pub const HEADER_ROWS: u16 = 3;

/// Rows below the body: blank line, help line.
pub const FOOTER_ROWS: u16 = 2;

/// Which pane the body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Resource list of the active category.
    #[default]
    List,
    /// Diff block of the selected resource.
    Detail,
}

/// Navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    /// Active category tab.
    pub category: Category,
    /// Selected row in the active bucket.
    pub cursor: usize,
    /// First visible row of the list.
    pub list_offset: usize,
    /// Current pane.
    pub mode: ViewMode,
    /// First visible row of the detail block.
    pub scroll: usize,
    /// Whether the key-binding overlay is shown.
    pub help_visible: bool,
}

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the number of rows available to the body.
    #[must_use]
    pub const fn body_height(self) -> usize {
        self.height.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as usize
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Switch to the next category.
    NextCategory,
    /// Switch to the previous category.
    PreviousCategory,
    /// Move the cursor or scroll up one row.
    Up,
    /// Move the cursor or scroll down one row.
    Down,
    /// Move up one page.
    PageUp,
    /// Move down one page.
    PageDown,
    /// Jump to the first row.
    Top,
    /// Jump to the last row.
    Bottom,
    /// Open the selected resource.
    Open,
    /// Close the detail view or the help overlay.
    Close,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// The terminal was resized.
    Resize {
        /// New column count.
        width: u16,
        /// New row count.
        height: u16,
    },
    /// End the session.
    Quit,
}

/// Whether the session keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Stop the session.
    Quit,
}

/// Owner of everything the interactive session shows.
#[derive(Debug, Clone)]
pub struct Navigator {
    buckets: Buckets,
    state: NavState,
    detail: Option<RenderedBlock>,
    viewport: Viewport,
    renderer: ResourceRenderer,
}

impl Navigator {
    /// Creates a navigator in the initial state: first category, cursor 0,
    /// list mode.
    #[must_use]
    pub fn new(buckets: Buckets, viewport: Viewport) -> Self {
        Self {
            buckets,
            state: NavState::default(),
            detail: None,
            viewport,
            renderer: ResourceRenderer::new(),
        }
    }

    /// Returns the classified changes.
    #[must_use]
    pub const fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &NavState {
        &self.state
    }

    /// Returns the cached detail block, present only in detail mode.
    #[must_use]
    pub const fn detail(&self) -> Option<&RenderedBlock> {
        self.detail.as_ref()
    }

    /// Returns the current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the changes of the active category.
    #[must_use]
    pub fn current_bucket(&self) -> &[ResourceChange] {
        self.buckets.get(self.state.category)
    }

    /// Applies one command.
    pub fn handle(&mut self, command: NavCommand) -> Flow {
        debug!("Navigation command: {command:?}");

        if self.state.help_visible {
            return self.handle_overlay(command);
        }

        match command {
            NavCommand::Quit => return Flow::Quit,
            NavCommand::Resize { width, height } => self.resize(width, height),
            NavCommand::ToggleHelp => self.state.help_visible = true,
            NavCommand::NextCategory => self.switch_category(self.state.category.next()),
            NavCommand::PreviousCategory => {
                self.switch_category(self.state.category.previous());
            }
            NavCommand::Open => self.open(),
            NavCommand::Close => self.close(),
            NavCommand::Up => self.step(-1),
            NavCommand::Down => self.step(1),
            NavCommand::PageUp => self.step(-self.page_size()),
            NavCommand::PageDown => self.step(self.page_size()),
            NavCommand::Top => self.step(isize::MIN),
            NavCommand::Bottom => self.step(isize::MAX),
        }

        Flow::Continue
    }

    /// Commands honored while the help overlay is shown.
    fn handle_overlay(&mut self, command: NavCommand) -> Flow {
        match command {
            NavCommand::Quit => return Flow::Quit,
            NavCommand::ToggleHelp | NavCommand::Close => self.state.help_visible = false,
            NavCommand::Resize { width, height } => self.resize(width, height),
            _ => {}
        }
        Flow::Continue
    }

    /// Activates `category` and returns to its list, leaving any open detail.
    fn switch_category(&mut self, category: Category) {
        self.detail = None;
        self.state.mode = ViewMode::List;
        self.state.scroll = 0;
        self.state.category = category;
        self.state.cursor = 0;
        self.state.list_offset = 0;
    }

    fn open(&mut self) {
        if self.state.mode != ViewMode::List {
            return;
        }
        let Some(change) = self.current_bucket().get(self.state.cursor) else {
            return;
        };
        let block = self.renderer.render(change);
        debug!("Opening {} ({} rows)", change.address, block.row_count());

        self.detail = Some(block);
        self.state.mode = ViewMode::Detail;
        self.state.scroll = 0;
    }

    fn close(&mut self) {
        if self.state.mode != ViewMode::Detail {
            return;
        }
        self.detail = None;
        self.state.mode = ViewMode::List;
        self.state.scroll = 0;
    }

    /// Moves the cursor (list) or the scroll offset (detail) by `delta`.
    fn step(&mut self, delta: isize) {
        match self.state.mode {
            ViewMode::List => {
                let len = self.current_bucket().len();
                if len == 0 {
                    return;
                }
                self.state.cursor = offset_clamped(self.state.cursor, delta, len - 1);
                self.ensure_cursor_visible();
            }
            ViewMode::Detail => {
                self.state.scroll = offset_clamped(self.state.scroll, delta, self.max_scroll());
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.state.scroll = self.state.scroll.min(self.max_scroll());

        let len = self.current_bucket().len();
        let max_offset = len.saturating_sub(self.viewport.body_height());
        self.state.list_offset = self.state.list_offset.min(max_offset);
        self.ensure_cursor_visible();
    }

    /// Largest scroll offset that still fills the body.
    fn max_scroll(&self) -> usize {
        self.detail.as_ref().map_or(0, |block| {
            block
                .row_count()
                .saturating_sub(self.viewport.body_height())
        })
    }

    fn page_size(&self) -> isize {
        isize::try_from(self.viewport.body_height().max(1)).unwrap_or(isize::MAX)
    }

    fn ensure_cursor_visible(&mut self) {
        let height = self.viewport.body_height();
        if height == 0 {
            return;
        }

        let bottom = self.state.list_offset + height - 1;
        if self.state.cursor < self.state.list_offset {
            self.state.list_offset = self.state.cursor;
        } else if self.state.cursor > bottom {
            self.state.list_offset = self.state.cursor + 1 - height;
        }
    }
}

/// Adds `delta` to `value`, clamped to `0..=max`.
fn offset_clamped(value: usize, delta: isize, max: usize) -> usize {
    value.saturating_add_signed(delta).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AttributeChange, PlanValue, classify};

    fn navigator(creates: usize, height: u16) -> Navigator {
        let changes: Vec<ResourceChange> = (0..creates)
            .map(|i| {
                ResourceChange::new(&format!("t.r{i}"), "t", &format!("r{i}"), &["create"])
                    .with_attribute(
                        "x",
                        AttributeChange::new(None, Some(PlanValue::from("a")), false),
                    )
            })
            .chain(std::iter::once(ResourceChange::new("t.gone", "t", "gone", &["delete"])))
            .collect();
        Navigator::new(classify(&changes), Viewport::new(80, height))
    }

    #[test]
    fn test_initial_state() {
        let nav = navigator(3, 24);
        assert_eq!(nav.state().category, Category::Create);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.state().mode, ViewMode::List);
        assert!(nav.detail().is_none());
    }

    #[test]
    fn test_navigation_scenario() {
        let mut nav = navigator(3, 24);
        nav.handle(NavCommand::Down);
        nav.handle(NavCommand::Down);
        assert_eq!(nav.state().cursor, 2);

        nav.handle(NavCommand::Down);
        assert_eq!(nav.state().cursor, 2);

        nav.handle(NavCommand::Up);
        assert_eq!(nav.state().cursor, 1);

        assert_eq!(nav.handle(NavCommand::Open), Flow::Continue);
        assert_eq!(nav.state().mode, ViewMode::Detail);
        let block = nav.detail().expect("detail should be cached");
        assert_eq!(block.lines[0].text, "# t.r1 will be created");

        nav.handle(NavCommand::Close);
        assert_eq!(nav.state().mode, ViewMode::List);
        assert_eq!(nav.state().cursor, 1);
        assert_eq!(nav.state().category, Category::Create);
        assert!(nav.detail().is_none());
    }

    #[test]
    fn test_category_cycle_resets_cursor() {
        let mut nav = navigator(3, 24);
        nav.handle(NavCommand::Down);
        nav.handle(NavCommand::NextCategory);
        assert_eq!(nav.state().category, Category::Destroy);
        assert_eq!(nav.state().cursor, 0);

        nav.handle(NavCommand::PreviousCategory);
        nav.handle(NavCommand::PreviousCategory);
        assert_eq!(nav.state().category, Category::Other);
    }

    #[test]
    fn test_category_switch_from_detail_returns_to_list() {
        let mut nav = navigator(3, 24);
        nav.handle(NavCommand::Down);
        nav.handle(NavCommand::Open);
        nav.handle(NavCommand::Down);

        nav.handle(NavCommand::NextCategory);
        assert_eq!(nav.state().category, Category::Destroy);
        assert_eq!(nav.state().mode, ViewMode::List);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.state().scroll, 0);
        assert!(nav.detail().is_none());
    }

    #[test]
    fn test_empty_bucket_is_inert() {
        let mut nav = navigator(1, 24);
        nav.handle(NavCommand::NextCategory);
        nav.handle(NavCommand::NextCategory);
        assert_eq!(nav.state().category, Category::Replace);

        nav.handle(NavCommand::Down);
        nav.handle(NavCommand::Open);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.state().mode, ViewMode::List);
        assert!(nav.detail().is_none());
    }

    #[test]
    fn test_quit_from_any_state() {
        let mut nav = navigator(1, 24);
        assert_eq!(nav.handle(NavCommand::Quit), Flow::Quit);
        nav.handle(NavCommand::Open);
        assert_eq!(nav.handle(NavCommand::Quit), Flow::Quit);
        nav.handle(NavCommand::ToggleHelp);
        assert_eq!(nav.handle(NavCommand::Quit), Flow::Quit);
    }

    #[test]
    fn test_detail_scroll_is_clamped() {
        let tall = ResourceChange::new("t.big", "t", "big", &["create"]).with_attribute(
            "list",
            AttributeChange::new(
                None,
                Some(serde_json::from_str::<PlanValue>("[1,2,3,4,5,6,7,8,9,10]").unwrap()),
                false,
            ),
        );
        // 15 rows of content, 10 rows of body.
        let mut nav = Navigator::new(classify(&[tall]), Viewport::new(80, 15));
        nav.handle(NavCommand::Open);
        assert_eq!(nav.detail().unwrap().row_count(), 15);

        nav.handle(NavCommand::Up);
        assert_eq!(nav.state().scroll, 0);

        nav.handle(NavCommand::Bottom);
        assert_eq!(nav.state().scroll, 5);
        nav.handle(NavCommand::Down);
        assert_eq!(nav.state().scroll, 5);

        nav.handle(NavCommand::Resize {
            width: 80,
            height: 19,
        });
        assert_eq!(nav.state().scroll, 1);

        nav.handle(NavCommand::Top);
        assert_eq!(nav.state().scroll, 0);
        nav.handle(NavCommand::PageDown);
        assert_eq!(nav.state().scroll, 1);
    }

    #[test]
    fn test_list_offset_follows_cursor() {
        // Body of 3 rows.
        let mut nav = navigator(10, 8);
        for _ in 0..4 {
            nav.handle(NavCommand::Down);
        }
        assert_eq!(nav.state().cursor, 4);
        assert_eq!(nav.state().list_offset, 2);

        nav.handle(NavCommand::Top);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.state().list_offset, 0);

        nav.handle(NavCommand::Bottom);
        assert_eq!(nav.state().cursor, 9);
        assert_eq!(nav.state().list_offset, 7);
    }

    #[test]
    fn test_resize_pulls_list_window_back() {
        // Body of 3 rows, then 19 rows: all 10 creates fit.
        let mut nav = navigator(10, 8);
        nav.handle(NavCommand::Bottom);
        assert_eq!(nav.state().list_offset, 7);

        nav.handle(NavCommand::Resize {
            width: 80,
            height: 24,
        });
        assert_eq!(nav.state().cursor, 9);
        assert_eq!(nav.state().list_offset, 0);

        // Body of 5 rows: the cursor stays on the last visible row.
        nav.handle(NavCommand::Resize {
            width: 80,
            height: 10,
        });
        assert_eq!(nav.state().list_offset, 5);
        assert_eq!(nav.state().cursor, 9);
    }

    #[test]
    fn test_resize_keeps_cursor_visible_mid_list() {
        let mut nav = navigator(10, 24);
        for _ in 0..6 {
            nav.handle(NavCommand::Down);
        }
        nav.handle(NavCommand::Resize {
            width: 80,
            height: 8,
        });
        let state = nav.state();
        assert!(state.list_offset <= state.cursor);
        assert!(state.cursor < state.list_offset + nav.viewport().body_height());
        assert_eq!(state.list_offset, 4);
    }

    #[test]
    fn test_help_overlay_is_modal() {
        let mut nav = navigator(3, 24);
        nav.handle(NavCommand::ToggleHelp);
        assert!(nav.state().help_visible);

        nav.handle(NavCommand::Down);
        nav.handle(NavCommand::NextCategory);
        assert_eq!(nav.state().cursor, 0);
        assert_eq!(nav.state().category, Category::Create);

        nav.handle(NavCommand::Resize {
            width: 100,
            height: 30,
        });
        assert_eq!(nav.viewport(), Viewport::new(100, 30));

        nav.handle(NavCommand::Close);
        assert!(!nav.state().help_visible);
        assert_eq!(nav.state().mode, ViewMode::List);
    }

    #[test]
    fn test_body_height_saturates() {
        assert_eq!(Viewport::new(80, 24).body_height(), 19);
        assert_eq!(Viewport::new(80, 3).body_height(), 0);
    }
}
