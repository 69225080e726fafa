//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! the redirect probe, and bus subscriptions. Services consume domain traits
//! and expose outcome types callers can assert on.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - redirect detection and canonical URL resolution
//! - [`services::alias_service::AliasService`] - equivalence-class merging of alias sets

pub mod services;
