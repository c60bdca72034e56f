//! Logic graph representation and validation.
//!
//! This module provides the [`Graph`] that owns every logic element of a
//! level, resolves their wiring by name, validates it, and answers solve
//! and extract queries over it.

mod graph;
mod types;
mod validate;

pub use graph::Graph;
pub use types::*;
pub use validate::check_acyclic;
