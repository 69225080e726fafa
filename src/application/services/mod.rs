//! Business logic services for the application layer.

pub mod alias_service;
pub mod redirect_service;

pub use alias_service::{AliasService, MergeOutcome};
pub use redirect_service::{ReconcileOutcome, RedirectService};
