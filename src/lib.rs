//! GrantFlow: grant application management server.
//!
//! The HTTP API lives here; domain models and the project store come from
//! `grantflow-core`.

pub mod api;

// Re-export the core surface so binaries and tests need a single import path.
pub use grantflow_core::{db, models, Database};
