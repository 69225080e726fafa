//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`ContentRecord`] - a summary ("tldr") with its canonical URL and alias set
//! - [`Mention`] - an external cross-reference tracking a set of URLs
//! - [`AliasPatch`] - a narrow field-level update to a record's URL set

pub mod content_record;
pub mod mention;

pub use content_record::{AliasPatch, ContentRecord};
pub use mention::Mention;
