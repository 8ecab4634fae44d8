//! Client-side chart engine for the DCMS platform.
//!
//! Owns the in-memory odontogram/periodontogram for one open patient view
//! and reconciles it against the backend: every mutation is sent as a
//! minimal remote batch, and on success the server-returned state replaces
//! the local view wholesale.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{ChartApi, RestChartApi};
pub use config::Config;
pub use engine::{OdontogramEngine, expand_updates};
pub use error::{ChartError, ChartResult};
