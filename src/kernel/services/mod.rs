//! Services layer (ports + adapters).
//!
//! - `ports`: collaborator contracts the kernel is written against.
//! - `adapters`: in-process and filesystem-backed implementations.

pub mod adapters;
pub mod ports;
