//! Error types for levelwire.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! all error conditions that can occur during map ingestion, graph building,
//! solving, and netlist export.

use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all levelwire operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Ingestion Errors ============
    /// Two circuit records share an ingestion id
    #[error("Duplicate object id {id}")]
    DuplicateId { id: u32 },

    /// Two named circuit records share a name
    #[error("Duplicate object name '{name}'")]
    DuplicateName { name: String },

    // ============ Build Errors ============
    /// A node references an input that is not in the graph
    #[error("Missing input '{input}' (referenced by '{node}')")]
    MissingInput { node: String, input: String },

    /// A node has the wrong number of inputs for its kind
    #[error("{kind} '{node}' has {actual} inputs, expected {expected}")]
    ArityViolation {
        node: String,
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A leaf circuit's input is itself driven by other nodes
    #[error("Rule violation: {kind} '{node}'s input '{input}' has {actual} inputs, expected 0")]
    NestedInputViolation {
        node: String,
        kind: &'static str,
        input: String,
        actual: usize,
    },

    /// The logic wiring loops back on itself
    #[error("Cyclic wiring detected: {path}")]
    CycleDetected { path: String },

    /// `build` was called twice, or a record was added after `build`
    #[error("Graph already finalized")]
    AlreadyFinalized,

    /// `solve` or `extract` was called before `build`
    #[error("Graph has not been built yet")]
    NotFinalized,

    // ============ Query Errors ============
    /// A solve or extract target is not in the graph
    #[error("Unknown target '{name}'")]
    UnknownTarget { name: String },

    /// `mark_as_input` was given a name that is not in the graph
    #[error("Unknown node '{name}'")]
    UnknownNode { name: String },

    /// The constraints admit no satisfying assignment
    #[error("Unsatisfiable")]
    Unsatisfiable,

    /// The satisfiability backend failed internally
    #[error("Solver failure: {message}")]
    SolverFailure { message: String },

    // ============ I/O Errors ============
    /// Error reading a map file
    #[error("Failed to read map file '{path}': {source}")]
    MapRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error decoding map JSON
    #[error("Failed to parse map: {source}")]
    MapParse {
        #[source]
        source: serde_json::Error,
    },

    /// Error writing the exported netlist
    #[error("Failed to write netlist '{path}': {source}")]
    ExportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error reading door names from the terminal
    #[error("Failed to read door names: {source}")]
    Prompt {
        #[source]
        source: std::io::Error,
    },

    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl CircuitError {
    /// Create a missing input error
    pub fn missing_input(node: impl Into<String>, input: impl Into<String>) -> Self {
        Self::MissingInput {
            node: node.into(),
            input: input.into(),
        }
    }

    /// Create an unknown target error
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }

    /// Wrap a backend error
    pub fn solver(message: impl std::fmt::Display) -> Self {
        Self::SolverFailure {
            message: message.to_string(),
        }
    }
}
