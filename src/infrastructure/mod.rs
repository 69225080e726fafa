//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for the message bus, the outbound redirect probe,
//! and data persistence.
//!
//! # Modules
//!
//! - [`bus`] - Message bus transports and the deployment-scoped client
//! - [`fetch`] - Non-following HTTP redirect probe
//! - [`persistence`] - PostgreSQL repository implementations

pub mod bus;
pub mod fetch;
pub mod persistence;
