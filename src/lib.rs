#![deny(missing_docs)]
//! This crate decides satisfiability of CNF formulas over named Boolean
//! variables and enumerates their models, using either a DPLL engine or an
//! exhaustive backtracking enumerator.

/// The `sat` module implements the literal and clause model, the evaluation
/// primitives, both solving engines, and the loaders that build formulas from
/// DIMACS files and YAML test descriptions.
pub mod sat;

pub use sat::assignment::{Assignment, Solutions};
pub use sat::clause::Clause;
pub use sat::cnf::Formula;
pub use sat::error::{Error, Result};
pub use sat::evaluate::{
    evaluate_formula, is_falsified, is_satisfied, remove_false_literals, verify_solution,
    verify_solution_report,
};
pub use sat::literal::{Literal, negate};
pub use sat::solver::{
    find_all_solutions_backtracking, find_all_solutions_dpll, find_first_solution,
};
