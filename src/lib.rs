// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # tfs
//!
//! A Terraform plan analyzer that turns a plan into structured, colored diffs.
//!
//! ## Overview
//!
//! tfs reads the change-set JSON of a plan and lets you:
//!
//! - Browse changes by category in an interactive terminal view
//! - Print a summary table and every resource diff
//! - Generate a self-contained HTML report and share it through S3
//!
//! ## Architecture
//!
//! Both presentation surfaces are fed by the same pipeline:
//!
//! 1. **Load**: `terraform show -json` output (or a JSON file) is parsed into
//!    resource changes with exact attribute values
//! 2. **Classify**: every change lands in one of five categories
//!    (create, destroy, replace, update, other)
//! 3. **Render**: a resource change becomes a block of styled diff lines
//!
//! ## Modules
//!
//! - [`config`]: Settings file, environment overrides and validation
//! - [`plan`]: Change-set retrieval, parsing and classification
//! - [`render`]: Value formatting, attribute diffs and the HTML document
//! - [`tui`]: Interactive terminal view
//! - [`upload`]: Report delivery to S3
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! # .tfs.yaml
//! terraform:
//!   binary: terraform
//!
//! upload:
//!   bucket: plan-reports
//!   prefix: team/infra
//!   expiration_secs: 3600
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod render;
pub mod tui;
pub mod upload;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, Settings};
pub use error::{Result, TfsError};
pub use plan::{Buckets, Category, PlanParser, PlanSource, PlanValue, ResourceChange, classify};
pub use render::{DiffEngine, DocumentRenderer, RenderedBlock, ResourceRenderer};
pub use tui::{NavCommand, Navigator, ViewRenderer};
pub use upload::{ArtifactUploader, S3Uploader, SharedLink};
