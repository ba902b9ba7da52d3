//! Self-contained HTML document for a classified plan.
//!
//! Every resource block is rendered up front with the same engine the
//! terminal uses; the inline script only toggles visibility.

use std::fmt::Write as _;

use crate::plan::{Buckets, Category, ResourceChange};

use super::diff::LineStyle;
use super::resource::{RenderedBlock, ResourceRenderer};

/// Page title.
const TITLE: &str = "Terraform Plan Analysis";

/// Renderer producing the shareable HTML document.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentRenderer {
    /// Resource block renderer.
    resources: ResourceRenderer,
}

impl DocumentRenderer {
    /// Creates a new document renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resources: ResourceRenderer::new(),
        }
    }

    /// Renders the document.
    ///
    /// The output depends only on the buckets, so the same plan always
    /// produces the same bytes.
    #[must_use]
    pub fn render(&self, buckets: &Buckets) -> String {
        let mut out = String::with_capacity(16 * 1024);

        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"UTF-8\">\n");
        out.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(out, "  <title>{TITLE}</title>");
        out.push_str(&Self::generate_styles());
        out.push_str("</head>\n");
        out.push_str("<body>\n\n");

        out.push_str(&Self::render_tabs(buckets));

        out.push_str("<div class=\"container\">\n");
        out.push_str("<div class=\"sidebar\">\n");
        for (category, changes) in buckets.iter() {
            out.push_str(&Self::render_list(category, changes));
        }
        out.push_str("</div>\n");

        out.push_str("<div class=\"detail-view\">\n");
        out.push_str(
            "<div class=\"empty-state\" id=\"detail-empty\">Select a resource to view details</div>\n",
        );
        for (category, changes) in buckets.iter() {
            for (index, change) in changes.iter().enumerate() {
                let block = self.resources.render(change);
                out.push_str(&Self::render_block(category, index, &block));
            }
        }
        out.push_str("</div>\n");
        out.push_str("</div>\n\n");

        out.push_str(Self::SCRIPT);
        out.push_str("</body>\n");
        out.push_str("</html>\n");

        out
    }

    /// Generates the CSS, with one custom property per category color.
    fn generate_styles() -> String {
        let mut colors = String::new();
        for category in Category::ALL {
            let (r, g, b) = category.color();
            let _ = writeln!(
                colors,
                "        --{}-color: #{r:02X}{g:02X}{b:02X};",
                category.key()
            );
        }

        let mut tints = String::new();
        for category in Category::ALL {
            let key = category.key();
            let _ = writeln!(
                tints,
                "    .tab-{key} {{ color: var(--{key}-color); }}\n    .tab-{key}.active {{ background-color: var(--{key}-color); color: var(--tab-text-active); }}"
            );
            if category.diff_color().is_some() {
                let _ = writeln!(tints, "    .tint-{key} {{ color: var(--{key}-color); }}");
            }
        }

        format!(
            r#"
<style>
    :root {{
        --bg-color: #1a1b26;
        --text-color: #a9b1d6;
        --sidebar-bg: #16161e;
        --border-color: #414868;
        --accent-color: #7aa2f7;
        --tab-text-active: #FAFAFA;
{colors}    }}
    body {{
        margin: 0;
        font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
        background-color: var(--bg-color);
        color: var(--text-color);
        height: 100vh;
        display: flex;
        flex-direction: column;
        overflow: hidden;
    }}
    .header {{
        background-color: var(--sidebar-bg);
        border-bottom: 1px solid var(--border-color);
        padding: 0 10px;
        height: 40px;
        display: flex;
        align-items: flex-end;
        user-select: none;
    }}
    .tab {{
        padding: 8px 16px;
        cursor: pointer;
        font-weight: bold;
        font-size: 14px;
        border-top-left-radius: 4px;
        border-top-right-radius: 4px;
        margin-right: 2px;
    }}
    .container {{ display: flex; flex: 1; overflow: hidden; }}
    .sidebar {{
        width: 350px;
        background-color: var(--sidebar-bg);
        border-right: 1px solid var(--border-color);
        overflow-y: auto;
        flex-shrink: 0;
    }}
    .resource-item {{
        padding: 10px 15px;
        cursor: pointer;
        border-bottom: 1px solid rgba(65, 72, 104, 0.3);
        white-space: nowrap;
        overflow: hidden;
        text-overflow: ellipsis;
        font-size: 14px;
    }}
    .resource-item:hover {{ background-color: rgba(255, 255, 255, 0.05); }}
    .resource-item.selected {{
        background-color: rgba(122, 162, 247, 0.15);
        border-left: 3px solid var(--accent-color);
        padding-left: 12px;
    }}
    .detail-view {{
        flex: 1;
        padding: 20px;
        overflow-y: auto;
        font-family: 'Consolas', 'Monaco', 'Courier New', monospace;
        line-height: 1.5;
        font-size: 14px;
    }}
    .diff-line {{ white-space: pre; }}
    .diff-header {{ font-weight: bold; margin-bottom: 10px; white-space: pre; }}
{tints}    .empty-state {{ padding: 40px; text-align: center; color: var(--border-color); }}
    [hidden] {{ display: none !important; }}
</style>
"#
        )
    }

    /// Renders the tab bar.
    fn render_tabs(buckets: &Buckets) -> String {
        let mut out = String::from("<div class=\"header\">\n");
        for (category, changes) in buckets.iter() {
            let active = if category == Category::Create {
                " active"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  <div class=\"tab tab-{}{active}\" data-category=\"{}\">{}</div>",
                category.key(),
                category.index(),
                html_escape(&category.tab_title(changes.len()))
            );
        }
        out.push_str("</div>\n\n");
        out
    }

    /// Renders the resource list of one category.
    fn render_list(category: Category, changes: &[ResourceChange]) -> String {
        let hidden = if category == Category::Create {
            ""
        } else {
            " hidden"
        };
        let mut out = format!(
            "<div class=\"resource-list\" data-category=\"{}\"{hidden}>\n",
            category.index()
        );

        if changes.is_empty() {
            out.push_str("  <div class=\"empty-state\">No resources</div>\n");
        }
        for (index, change) in changes.iter().enumerate() {
            let address = html_escape(&change.address);
            let _ = writeln!(
                out,
                "  <div class=\"resource-item\" data-target=\"detail-{}-{index}\" title=\"{address}\">{address}</div>",
                category.index()
            );
        }

        out.push_str("</div>\n");
        out
    }

    /// Renders one resource block as hidden diff rows.
    fn render_block(category: Category, index: usize, block: &RenderedBlock) -> String {
        let mut out = format!(
            "<div class=\"resource-detail\" id=\"detail-{}-{index}\" hidden>\n",
            category.index()
        );
        for line in &block.lines {
            let class = match line.style {
                LineStyle::Heading => String::from("diff-header"),
                LineStyle::Plain => String::from("diff-line"),
                LineStyle::Tinted(tint) if tint.diff_color().is_some() => {
                    format!("diff-line tint-{}", tint.key())
                }
                LineStyle::Tinted(_) => String::from("diff-line"),
            };
            let _ = writeln!(out, "  <div class=\"{class}\">{}</div>", html_escape(&line.text));
        }
        out.push_str("</div>\n");
        out
    }

    /// Tab and selection switching.
    const SCRIPT: &'static str = r#"<script>
    const tabs = document.querySelectorAll('.tab');
    const lists = document.querySelectorAll('.resource-list');
    const details = document.querySelectorAll('.resource-detail');
    const empty = document.getElementById('detail-empty');

    function showDetail(id) {
        details.forEach(d => { d.hidden = d.id !== id; });
        empty.hidden = id !== null;
        document.querySelectorAll('.resource-item').forEach(item => {
            item.classList.toggle('selected', item.dataset.target === id);
        });
    }

    function switchTab(category) {
        tabs.forEach(t => t.classList.toggle('active', t.dataset.category === category));
        lists.forEach(l => { l.hidden = l.dataset.category !== category; });
        showDetail(null);
    }

    tabs.forEach(t => t.addEventListener('click', () => switchTab(t.dataset.category)));
    document.querySelectorAll('.resource-item').forEach(item => {
        item.addEventListener('click', () => showDetail(item.dataset.target));
    });
</script>
"#;
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
