//! playshell - multi-file scratch workspace with live diagnostics
//!
//! Modules:
//! - kernel: workspace state (registry, active file, revision), deferred
//!   analysis, two-tier persistence, ports + adapters
//! - app: Shell (effect runner + main-loop tick) and line commands

pub mod app;
pub mod kernel;
