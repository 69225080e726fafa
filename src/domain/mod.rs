//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`events`] - Bus event payloads and channel names
//! - [`offenders`] - Static table of known redirect services
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure concerns
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod events;
pub mod offenders;
pub mod repositories;
