//! # Levelwire
//!
//! Logic-puzzle wiring analysis for game level maps.
//!
//! A level's doors are opened by networks of keys, controls, wires and
//! gates placed in the map editor. This library provides:
//! - Ingestion of Tiled JSON maps into a typed logic graph
//! - Wiring resolution and validation (arity, leaf inputs, cycles)
//! - Solving for an input pattern that opens a chosen set of doors
//! - Export of the logic feeding chosen doors as a Verilog netlist
//!
//! ## Architecture
//!
//! - [`map`] - Tiled map decoding and ingestion records
//! - [`node`] - Logic element kinds and the tag registry
//! - [`circuit`] - The logic graph, build and validation
//! - [`solver`] - Boolean terms and the SAT backend adapter
//! - [`netlist`] - Netlist extraction and rendering
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! levelwire solve level.json --door vault
//! levelwire export level.json vault.v --door vault
//! ```
//!
//! ### Library
//!
//! ```
//! use levelwire::{map::Record, Graph};
//!
//! let mut graph = Graph::new();
//! graph.add(Record::new(1, "lever", "Control"))?;
//! graph.add(Record::new(2, "inv", "Inverter").with_input("lever"))?;
//! graph.add(Record::new(3, "vault", "Door").with_input("inv"))?;
//! graph.build()?;
//!
//! let assignment = graph.solve(["vault"])?;
//! assert_eq!(assignment.get("lever"), Some(false));
//! # Ok::<(), levelwire::CircuitError>(())
//! ```

pub mod circuit;
pub mod error;
pub mod map;
pub mod netlist;
pub mod node;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{Graph, NodeId, Target};
pub use error::{CircuitError, Result};
pub use netlist::Netlist;
pub use node::{Node, NodeKind};
pub use solver::Assignment;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLevel;
