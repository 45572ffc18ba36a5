//! Core library for GrantFlow.
//!
//! This crate provides the domain models and project store for GrantFlow,
//! independent of any transport layer (HTTP, CLI, etc.).
//!
//! # Usage
//!
//! ```no_run
//! use grantflow_core::db::Database;
//! use grantflow_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let projects = db.list_projects()?;
//! # Ok::<(), grantflow_core::db::StoreError>(())
//! ```

pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
