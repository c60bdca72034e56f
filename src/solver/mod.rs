//! Satisfiability adapter.
//!
//! Node terms live in a [`Formula`]: named boolean variables for boundary
//! nodes plus clauses defining every composite term. Solving a set of
//! targets asserts their terms on a copy of the definitions and asks the
//! SAT backend (`rustsat` with the pure-Rust BatSat solver) for a model.
//!
//! The backend is a black box here. Each [`Formula::check`] is a single
//! blocking call with no timeout.

mod formula;
mod terms;

pub use formula::{Assignment, Formula, Term};
pub use terms::TermCache;
