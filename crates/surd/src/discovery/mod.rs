//! Causal order discovery.
//!
//! - [`Surd`]: the orchestrator running one selection step per variable
//! - [`SurdConfig`]: run parameters, built with [`SurdConfig::builder`]
//! - [`GraphResult`]: the discovered order, edges and per-step residuals
//!
//! Each step fans out one regression per still-active variable, waits for all
//! of them, and only then picks a winner. Selection never looks at partial
//! results, so the outcome is the same for any worker count.

mod active;
mod config;
mod dispatch;
mod engine;
mod graph;

pub use active::ActiveSet;
pub use config::{DEFAULT_WORKERS, SurdConfig, SurdConfigBuilder};
pub use engine::Surd;
pub use graph::{Edge, GraphResult};
