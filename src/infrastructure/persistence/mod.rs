//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements.
//!
//! # Repositories
//!
//! - [`PgContentRepository`] - content record lookup and alias-set updates
//! - [`PgMentionRepository`] - external mention lookup

pub mod pg_content_repository;
pub mod pg_mention_repository;

pub use pg_content_repository::PgContentRepository;
pub use pg_mention_repository::PgMentionRepository;
