//! Boolean term space backed by a SAT instance.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use rustsat::instances::{BasicVarManager, SatInstance};
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Clause, Lit, TernaryVal, Var};
use rustsat_batsat::BasicSolver;
use serde::Serialize;

use crate::error::{CircuitError, Result};

/// Handle to a boolean term in a [`Formula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term(Lit);

/// Named boolean variables plus the definitional clauses of every composed term.
///
/// Composite terms are Tseitin-encoded: an AND gets a fresh auxiliary
/// literal constrained to equal the conjunction, and NOT is literal negation.
/// The definitions hold in every model, so they can be shared by any number
/// of independent [`Formula::check`] calls.
#[derive(Debug, Clone)]
pub struct Formula {
    instance: SatInstance<BasicVarManager>,
    variables: Vec<(String, Lit)>,
    constrained: HashSet<Var>,
}

impl Formula {
    /// Create an empty term space.
    pub fn new() -> Self {
        Self {
            instance: SatInstance::new(),
            variables: Vec::new(),
            constrained: HashSet::new(),
        }
    }

    /// Create a fresh named variable.
    pub fn variable(&mut self, name: &str) -> Term {
        let lit = self.instance.new_lit();
        self.variables.push((name.to_string(), lit));
        Term(lit)
    }

    /// Negation of `term`.
    pub fn not(&self, term: Term) -> Term {
        Term(!term.0)
    }

    /// Conjunction of `a` and `b`.
    pub fn and(&mut self, a: Term, b: Term) -> Term {
        let out = self.instance.new_lit();
        self.add_clause([!out, a.0]);
        self.add_clause([!out, b.0]);
        self.add_clause([!a.0, !b.0, out]);
        Term(out)
    }

    /// Number of named variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Check whether every term in `asserted` can be true at once.
    ///
    /// The assertions are added to a copy of the definitions, so the term
    /// space itself is left untouched.
    pub fn check(&self, asserted: &[Term]) -> Result<Assignment> {
        let mut instance = self.instance.clone();
        let mut constrained = self.constrained.clone();
        for term in asserted {
            instance.add_clause([term.0].into_iter().collect());
            constrained.insert(term.0.var());
        }

        let (cnf, _) = instance.into_cnf();
        let mut solver = BasicSolver::default();
        solver.add_cnf(cnf).map_err(CircuitError::solver)?;

        match solver.solve().map_err(CircuitError::solver)? {
            SolverResult::Sat => {}
            SolverResult::Unsat => return Err(CircuitError::Unsatisfiable),
            other => return Err(CircuitError::solver(format!("solver returned {:?}", other))),
        }

        let mut values = BTreeMap::new();
        for (name, lit) in &self.variables {
            // Variables never mentioned in a clause are unknown to the backend.
            let value = if constrained.contains(&lit.var()) {
                matches!(
                    solver.lit_val(*lit).map_err(CircuitError::solver)?,
                    TernaryVal::True
                )
            } else {
                false
            };
            values.insert(name.clone(), value);
        }

        Ok(Assignment { values })
    }

    fn add_clause<const N: usize>(&mut self, lits: [Lit; N]) {
        for lit in &lits {
            self.constrained.insert(lit.var());
        }
        let clause: Clause = lits.into_iter().collect();
        self.instance.add_clause(clause);
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self::new()
    }
}

/// A satisfying assignment: variable name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    values: BTreeMap<String, bool>,
}

impl Assignment {
    /// Value of the variable `name`, if it exists.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Iterate over variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{} = {}", name, u8::from(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_formula_is_satisfiable() {
        let formula = Formula::new();
        let assignment = formula.check(&[]).unwrap();
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_unconstrained_variable_reported() {
        let mut formula = Formula::new();
        formula.variable("A");
        let assignment = formula.check(&[]).unwrap();
        assert_eq!(assignment.get("A"), Some(false));
    }

    #[test]
    fn test_and_forces_both_inputs() {
        let mut formula = Formula::new();
        let a = formula.variable("A");
        let b = formula.variable("B");
        let both = formula.and(a, b);

        let assignment = formula.check(&[both]).unwrap();
        assert_eq!(assignment.get("A"), Some(true));
        assert_eq!(assignment.get("B"), Some(true));
    }

    #[test]
    fn test_negation() {
        let mut formula = Formula::new();
        let a = formula.variable("A");
        let not_a = formula.not(a);

        let assignment = formula.check(&[not_a]).unwrap();
        assert_eq!(assignment.get("A"), Some(false));
    }

    #[test]
    fn test_contradiction_is_unsatisfiable() {
        let mut formula = Formula::new();
        let a = formula.variable("A");
        let not_a = formula.not(a);

        let err = formula.check(&[a, not_a]).unwrap_err();
        assert!(matches!(err, CircuitError::Unsatisfiable));
    }

    #[test]
    fn test_check_leaves_formula_reusable() {
        let mut formula = Formula::new();
        let a = formula.variable("A");
        let not_a = formula.not(a);

        assert_eq!(formula.check(&[a]).unwrap().get("A"), Some(true));
        assert_eq!(formula.check(&[not_a]).unwrap().get("A"), Some(false));
    }

    #[test]
    fn test_display() {
        let mut formula = Formula::new();
        let b = formula.variable("B");
        formula.variable("A");
        let assignment = formula.check(&[b]).unwrap();
        assert_eq!(assignment.to_string(), "A = 0\nB = 1\n");
    }
}
