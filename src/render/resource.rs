//! Full diff block for one resource.

use crate::plan::{Category, ResourceChange};

use super::diff::{DiffEngine, DiffLine, LineStyle};

/// Indentation of attribute lines inside a resource block.
pub const ATTRIBUTE_INDENT: usize = 6;

/// Attribute left out of every block.
const IGNORED_ATTRIBUTE: &str = "id";

/// A rendered resource block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    /// Category the block is styled with.
    pub category: Category,
    /// Logical lines, top to bottom.
    pub lines: Vec<DiffLine>,
}

/// A physical row of a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRow<'a> {
    /// Row text without a trailing newline.
    pub text: &'a str,
    /// Style of the logical line the row belongs to.
    pub style: LineStyle,
}

impl RenderedBlock {
    /// Returns the physical rows, splitting multi-line values.
    #[must_use]
    pub fn rows(&self) -> Vec<BlockRow<'_>> {
        self.lines
            .iter()
            .flat_map(|line| {
                line.text.split('\n').map(move |text| BlockRow {
                    text,
                    style: line.style,
                })
            })
            .collect()
    }

    /// Returns the number of physical rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.text.split('\n').count())
            .sum()
    }

    /// Returns the block as unstyled text, one line per row.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

/// Renderer for resource blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceRenderer {
    /// Attribute diff engine.
    engine: DiffEngine,
}

impl ResourceRenderer {
    /// Creates a new resource renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            engine: DiffEngine::new(),
        }
    }

    /// Renders a resource change.
    ///
    /// Produces the header, the opening `resource` line, one diff fragment per
    /// attribute in sorted order (`id` excluded) and the closing brace.
    #[must_use]
    pub fn render(&self, change: &ResourceChange) -> RenderedBlock {
        let category = Category::of(change);
        let mut lines = Vec::with_capacity(change.attributes.len() + 3);

        lines.push(DiffLine::new(
            format!(
                "# {}.{} {}",
                change.resource_type,
                change.name,
                Self::header_phrase(category, change.primary_action())
            ),
            LineStyle::Heading,
        ));

        let opening = format!(
            "  {} resource \"{}\" \"{}\" {{",
            category.symbol(),
            change.resource_type,
            change.name
        );
        let opening_style = match category {
            Category::Other => LineStyle::Plain,
            _ => LineStyle::Tinted(category),
        };
        lines.push(DiffLine::new(opening, opening_style));

        for (name, attribute) in &change.attributes {
            if name == IGNORED_ATTRIBUTE {
                continue;
            }
            lines.extend(self.engine.diff_attribute(
                name,
                attribute.before.as_ref(),
                attribute.after.as_ref(),
                attribute.known_after_apply,
                ATTRIBUTE_INDENT,
                category,
            ));
        }

        lines.push(DiffLine::new("    }", LineStyle::Plain));

        RenderedBlock { category, lines }
    }

    /// Returns the wording after the resource name in the header line.
    fn header_phrase(category: Category, action: &str) -> String {
        match category {
            Category::Create => String::from("will be created"),
            Category::Destroy => String::from("will be destroyed"),
            Category::Replace => String::from("must be replaced"),
            Category::Update => String::from("will be updated in-place"),
            Category::Other => format!("will be {action}ed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{AttributeChange, PlanParser, PlanValue};

    fn parse_single(json: &str) -> ResourceChange {
        let doc = PlanParser::new()
            .parse_json(&format!(r#"{{"resource_changes": [{json}]}}"#))
            .unwrap();
        doc.resource_changes.into_iter().next().unwrap()
    }

    fn texts(block: &RenderedBlock) -> Vec<&str> {
        block.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_create_block() {
        let rc = parse_single(
            r#"{"address": "t.n", "type": "t", "name": "n",
                "change": {"actions": ["create"], "before": null, "after": {"x": "a"}}}"#,
        );
        let block = ResourceRenderer::new().render(&rc);

        assert_eq!(
            texts(&block),
            vec![
                "# t.n will be created",
                "  + resource \"t\" \"n\" {",
                "      + x = \"a\"",
                "    }",
            ]
        );
        assert_eq!(block.lines[0].style, LineStyle::Heading);
        assert_eq!(block.lines[1].style, LineStyle::Tinted(Category::Create));
        assert_eq!(block.lines[2].style, LineStyle::Tinted(Category::Create));
    }

    #[test]
    fn test_replace_block() {
        let rc = parse_single(
            r#"{"address": "t.n", "type": "t", "name": "n",
                "change": {"actions": ["delete", "create"], "before": {"x": "a"}, "after": {"x": "b"}}}"#,
        );
        let block = ResourceRenderer::new().render(&rc);

        assert_eq!(block.category, Category::Replace);
        assert_eq!(block.lines[0].text, "# t.n must be replaced");
        assert_eq!(block.lines[1].text, "  -/+ resource \"t\" \"n\" {");
        assert_eq!(block.lines[2].text, "      ~ x = \"a\" -> \"b\"");
        assert_eq!(block.lines[2].style, LineStyle::Tinted(Category::Replace));
    }

    #[test]
    fn test_known_after_apply_attribute() {
        let rc = parse_single(
            r#"{"address": "t.n", "type": "t", "name": "n",
                "change": {"actions": ["create"], "after": {}, "after_unknown": {"x": true}}}"#,
        );
        let block = ResourceRenderer::new().render(&rc);
        assert!(texts(&block).contains(&"      + x = (known after apply)"));
    }

    #[test]
    fn test_id_is_excluded() {
        let rc = ResourceChange::new("t.n", "t", "n", &["update"])
            .with_attribute("id", AttributeChange::new(Some("1".into()), Some("2".into()), false))
            .with_attribute("size", AttributeChange::new(Some("s".into()), Some("m".into()), false));
        let block = ResourceRenderer::new().render(&rc);

        assert_eq!(
            texts(&block),
            vec![
                "# t.n will be updated in-place",
                "  ~ resource \"t\" \"n\" {",
                "      ~ size = \"s\" -> \"m\"",
                "    }",
            ]
        );
    }

    #[test]
    fn test_destroy_and_other_headers() {
        let renderer = ResourceRenderer::new();

        let destroy = renderer.render(&ResourceChange::new("t.n", "t", "n", &["delete"]));
        assert_eq!(destroy.lines[0].text, "# t.n will be destroyed");
        assert_eq!(destroy.lines[1].text, "  - resource \"t\" \"n\" {");

        let read = renderer.render(&ResourceChange::new("t.n", "t", "n", &["read"]));
        assert_eq!(read.lines[0].text, "# t.n will be readed");
        assert_eq!(read.lines[1].text, "   resource \"t\" \"n\" {");
        assert_eq!(read.lines[1].style, LineStyle::Plain);

        let import = renderer.render(&ResourceChange::new("t.n", "t", "n", &["import"]));
        assert_eq!(import.lines[0].text, "# t.n will be imported");
        assert_eq!(import.lines[1].text, "   resource \"t\" \"n\" {");

        let noop = renderer.render(&ResourceChange::new("t.n", "t", "n", &["no-op"]));
        assert_eq!(noop.lines[0].text, "# t.n will be no-oped");
    }

    #[test]
    fn test_empty_actions_do_not_panic() {
        let block = ResourceRenderer::new().render(&ResourceChange::new("t.n", "t", "n", &[]));
        assert_eq!(block.category, Category::Other);
        assert_eq!(block.lines.len(), 3);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let rc = ResourceChange::new("t.n", "t", "n", &["update"]).with_attribute(
            "tags",
            AttributeChange::new(
                Some(serde_json::from_str::<PlanValue>(r#"{"a": "1", "b": "2"}"#).unwrap()),
                Some(serde_json::from_str::<PlanValue>(r#"{"a": "1", "c": "3"}"#).unwrap()),
                false,
            ),
        );
        let renderer = ResourceRenderer::new();
        assert_eq!(renderer.render(&rc), renderer.render(&rc));
        assert_eq!(renderer.render(&rc).to_plain_text(), renderer.render(&rc).to_plain_text());
    }

    #[test]
    fn test_rows_split_multiline_values() {
        let rc = ResourceChange::new("t.n", "t", "n", &["create"]).with_attribute(
            "ports",
            AttributeChange::new(
                None,
                Some(serde_json::from_str::<PlanValue>("[80, 443]").unwrap()),
                false,
            ),
        );
        let block = ResourceRenderer::new().render(&rc);
        let rows = block.rows();

        assert_eq!(block.lines.len(), 4);
        assert_eq!(rows.len(), 7);
        assert_eq!(block.row_count(), 7);
        assert_eq!(rows[2].text, "      + ports = [");
        assert_eq!(rows[3].text, "          80,");
        assert_eq!(rows[5].text, "      ]");
        assert!(
            rows[2..6]
                .iter()
                .all(|r| r.style == LineStyle::Tinted(Category::Create))
        );
    }
}
