//! Canonical text form of attribute values.

use crate::plan::PlanValue;

/// Columns added per nesting level.
pub const INDENT_STEP: usize = 4;

/// Formats a value for display at the given indentation.
///
/// Scalars stay on one line. Non-empty sequences and every mapping span
/// several lines, with children at `indent + INDENT_STEP` and the closing
/// bracket at `indent`. Mapping keys come out sorted.
#[must_use]
pub fn format_value(value: &PlanValue, indent: usize) -> String {
    match value {
        PlanValue::Null => String::from("null"),
        PlanValue::String(s) => quote(s),
        PlanValue::Number(n) => n.clone(),
        PlanValue::Bool(b) => b.to_string(),
        PlanValue::Sequence(items) if items.is_empty() => String::from("[]"),
        PlanValue::Sequence(items) => {
            let padding = " ".repeat(indent + INDENT_STEP);
            let mut out = String::from("[\n");
            for item in items {
                out.push_str(&padding);
                out.push_str(&format_value(item, indent + INDENT_STEP));
                out.push_str(",\n");
            }
            out.push_str(&" ".repeat(indent));
            out.push(']');
            out
        }
        PlanValue::Mapping(map) => {
            let padding = " ".repeat(indent + INDENT_STEP);
            let mut out = String::from("{\n");
            for (key, item) in map {
                out.push_str(&padding);
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(&format_value(item, indent + INDENT_STEP));
                out.push('\n');
            }
            out.push_str(&" ".repeat(indent));
            out.push('}');
            out
        }
    }
}

/// Quotes a string with JSON escaping.
fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn parse(json: &str) -> PlanValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(format_value(&PlanValue::Null, 0), "null");
        assert_eq!(format_value(&PlanValue::from("hello"), 0), "\"hello\"");
        assert_eq!(format_value(&parse("123"), 0), "123");
        assert_eq!(format_value(&parse("0.10"), 0), "0.10");
        assert_eq!(format_value(&parse("1e3"), 0), "1e3");
        assert_eq!(format_value(&parse("1E+9"), 0), "1E+9");
        assert_eq!(format_value(&PlanValue::Bool(false), 8), "false");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            format_value(&PlanValue::from("say \"hi\"\nbye"), 0),
            r#""say \"hi\"\nbye""#
        );
    }

    #[test]
    fn test_scalar_output_parses_back() {
        for json in [r#""a \"quoted\" \\ line\n""#, "42", "-0.000001", "1E+9"] {
            let value = parse(json);
            let formatted = format_value(&value, 0);
            assert_eq!(parse(&formatted), value, "round trip of {json}");
        }
    }

    #[test]
    fn test_sequences() {
        assert_eq!(format_value(&PlanValue::Sequence(vec![]), 4), "[]");
        assert_eq!(
            format_value(&parse(r#"["a", "b"]"#), 0),
            "[\n    \"a\",\n    \"b\",\n]"
        );
        assert_eq!(
            format_value(&parse(r#"["a"]"#), 6),
            "[\n          \"a\",\n      ]"
        );
    }

    #[test]
    fn test_mappings_are_sorted() {
        assert_eq!(
            format_value(&parse(r#"{"b": 1, "a": "x"}"#), 0),
            "{\n    a = \"x\"\n    b = 1\n}"
        );
    }

    #[test]
    fn test_empty_mapping_is_multiline() {
        assert_eq!(format_value(&PlanValue::Mapping(BTreeMap::new()), 2), "{\n  }");
    }

    #[test]
    fn test_nested_indentation() {
        assert_eq!(
            format_value(&parse(r#"{"tags": {"env": "dev"}, "ports": [80]}"#), 0),
            "{\n    ports = [\n        80,\n    ]\n    tags = {\n        env = \"dev\"\n    }\n}"
        );
    }
}
