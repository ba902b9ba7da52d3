//! Change-set module for tfs.
//!
//! This module handles everything between the planning tool and the
//! renderers:
//! - Retrieving change-set JSON for a plan file
//! - Parsing it into typed resource changes with exact attribute values
//! - Classifying changes into the five display categories

mod change;
mod classify;
mod parser;
mod source;
mod value;

pub use change::{
    ACTION_CREATE, ACTION_DELETE, ACTION_UPDATE, AttributeChange, PlanDocument, RawChange,
    RawPlan, RawResourceChange, ResourceChange,
};
pub use classify::{Buckets, Category, classify};
pub use parser::PlanParser;
pub use source::{DEFAULT_TERRAFORM_BINARY, PlanSource};
pub use value::PlanValue;
