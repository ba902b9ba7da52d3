//! Rendering module for tfs.
//!
//! Turns resource changes into styled text:
//! - Canonical value formatting
//! - Attribute-level diffs
//! - Full resource blocks shared by the terminal and the document
//! - The self-contained HTML document

mod diff;
mod document;
mod format;
mod resource;

pub use diff::{DiffEngine, DiffLine, KNOWN_AFTER_APPLY, LineStyle};
pub use document::DocumentRenderer;
pub use format::{INDENT_STEP, format_value};
pub use resource::{ATTRIBUTE_INDENT, BlockRow, RenderedBlock, ResourceRenderer};
