//! Utility functions shared across the worker.
//!
//! - [`url_normalizer`] - URL normalization and sanitization

pub mod url_normalizer;
