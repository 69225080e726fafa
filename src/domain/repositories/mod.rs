//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete implementations
//! live in `crate::infrastructure::persistence`, and mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ContentRepository`] - content record lookup and alias-set updates
//! - [`MentionRepository`] - external cross-reference lookup

pub mod content_repository;
pub mod mention_repository;

pub use content_repository::ContentRepository;
pub use mention_repository::MentionRepository;

#[cfg(test)]
pub use content_repository::MockContentRepository;
#[cfg(test)]
pub use mention_repository::MockMentionRepository;
