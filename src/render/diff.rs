//! Attribute-level diff engine.
//!
//! Compares the before and after value of one attribute and produces styled
//! lines. The classification order is fixed: addition, deletion, nested
//! mapping update, scalar update.

use std::collections::{BTreeMap, BTreeSet};

use crate::plan::{Category, PlanValue};

use super::format::{INDENT_STEP, format_value};

/// Placeholder shown for values only known after apply.
pub const KNOWN_AFTER_APPLY: &str = "(known after apply)";

/// How a line is styled on every presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Bold header line.
    Heading,
    /// Unstyled line.
    Plain,
    /// Line tinted with a category color.
    Tinted(Category),
}

/// One logical diff line.
///
/// The text may contain newlines when a multi-line value is embedded; the
/// whole text is styled as a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line text including its indentation.
    pub text: String,
    /// Line style.
    pub style: LineStyle,
}

impl DiffLine {
    /// Creates a line.
    #[must_use]
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Engine producing diff lines for attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Diffs one attribute.
    ///
    /// `null` values count as absent. `style` tints nested-map braces and
    /// modifications; additions are always tinted as [`Category::Create`] and
    /// deletions as [`Category::Destroy`]. Returns no lines when both sides
    /// format identically.
    #[must_use]
    pub fn diff_attribute(
        &self,
        key: &str,
        before: Option<&PlanValue>,
        after: Option<&PlanValue>,
        known_after_apply: bool,
        indent: usize,
        style: Category,
    ) -> Vec<DiffLine> {
        let mut lines = Vec::new();
        Self::diff_into(&mut lines, key, before, after, known_after_apply, indent, style);
        lines
    }

    fn diff_into(
        lines: &mut Vec<DiffLine>,
        key: &str,
        before: Option<&PlanValue>,
        after: Option<&PlanValue>,
        known_after_apply: bool,
        indent: usize,
        style: Category,
    ) {
        let before = before.filter(|v| !v.is_null());
        let after = after.filter(|v| !v.is_null());
        let padding = " ".repeat(indent);

        match (before, after) {
            (None, _) if after.is_some() || known_after_apply => {
                let value = after.map_or_else(
                    || KNOWN_AFTER_APPLY.to_string(),
                    |v| format_value(v, indent),
                );
                lines.push(DiffLine::new(
                    format!("{padding}+ {key} = {value}"),
                    LineStyle::Tinted(Category::Create),
                ));
            }
            (Some(old), None) if !known_after_apply => {
                lines.push(DiffLine::new(
                    format!("{padding}- {key} = {}", format_value(old, indent)),
                    LineStyle::Tinted(Category::Destroy),
                ));
            }
            (Some(PlanValue::Mapping(old)), Some(PlanValue::Mapping(new))) => {
                lines.push(DiffLine::new(
                    format!("{padding}~ {key} = {{"),
                    LineStyle::Tinted(style),
                ));
                Self::diff_mappings(lines, old, new, indent + INDENT_STEP, style);
                lines.push(DiffLine::new(format!("{padding}}}"), LineStyle::Tinted(style)));
            }
            _ => {
                let old = before.map_or_else(|| String::from("null"), |v| format_value(v, indent));
                let new = if known_after_apply {
                    KNOWN_AFTER_APPLY.to_string()
                } else {
                    after.map_or_else(|| String::from("null"), |v| format_value(v, indent))
                };
                if old != new {
                    lines.push(DiffLine::new(
                        format!("{padding}~ {key} = {old} -> {new}"),
                        LineStyle::Tinted(style),
                    ));
                }
            }
        }
    }

    /// Recurses over the sorted union of keys of two mappings.
    fn diff_mappings(
        lines: &mut Vec<DiffLine>,
        old: &BTreeMap<String, PlanValue>,
        new: &BTreeMap<String, PlanValue>,
        indent: usize,
        style: Category,
    ) {
        let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
        for key in keys {
            Self::diff_into(lines, key, old.get(key), new.get(key), false, indent, style);
        }
    }
}
