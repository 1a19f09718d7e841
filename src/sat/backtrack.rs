//! Exhaustive backtracking enumeration of all models.
//!
//! Independent of the DPLL engine: no clause simplification and no unit
//! propagation. Variables are fixed one at a time in name order, positive
//! before negative, and a prefix is abandoned only once some clause is
//! definitely falsified. That check does not imply satisfaction, so every
//! complete assignment is evaluated again at the leaf.
//!
//! The pruning is intentionally weak. This engine is the completeness oracle
//! that DPLL enumeration is checked against.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::cnf::Formula;
use crate::sat::evaluate::{evaluate_formula, is_falsified, verify_solution};
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolutionStats, Solver};
use std::sync::Arc;
use tracing::{debug, warn};

/// Backtracking enumerator over a borrowed formula.
#[derive(Debug, Clone)]
pub struct Backtracking<'a> {
    formula: &'a Formula,
    /// Decision order: the formula's variables, deduplicated and sorted.
    order: Vec<Variable>,
    stats: SolutionStats,
}

impl<'a> Solver<'a> for Backtracking<'a> {
    fn new(formula: &'a Formula) -> Self {
        Self {
            formula,
            order: formula.variables(),
            stats: SolutionStats::default(),
        }
    }

    fn solve_all(&mut self) -> Solutions {
        self.stats = SolutionStats::default();
        debug!(variables = self.order.len(), "backtracking over variables");

        let mut candidates = Solutions::new();
        let mut assignment = Assignment::with_capacity(self.order.len());
        self.search(&mut assignment, 0, &mut candidates);

        let solutions: Solutions = candidates
            .into_iter()
            .filter(|candidate| {
                let verified = verify_solution(self.formula, candidate);
                if !verified {
                    warn!(%candidate, "discarding assignment that failed verification");
                }
                verified
            })
            .collect();

        self.stats.solutions = solutions.len();
        debug!(
            solutions = solutions.len(),
            decisions = self.stats.decisions,
            pruned = self.stats.pruned,
            "backtracking search finished"
        );
        solutions
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Backtracking<'_> {
    /// The variable order this enumerator decides in.
    #[must_use]
    pub fn order(&self) -> &[Variable] {
        &self.order
    }

    fn search(&mut self, assignment: &mut Assignment, index: usize, solutions: &mut Solutions) {
        let Some(var) = self.order.get(index).map(Arc::clone) else {
            if evaluate_formula(self.formula, assignment) {
                solutions.push(assignment.clone());
            } else {
                self.stats.conflicts += 1;
            }
            return;
        };

        debug_assert!(!assignment.is_assigned(&Literal::positive(Arc::clone(&var))));
        for polarity in [true, false] {
            assignment.assign(Literal::new(Arc::clone(&var), polarity));
            self.stats.decisions += 1;

            if self.falsifies(assignment) {
                self.stats.pruned += 1;
            } else {
                self.search(assignment, index + 1, solutions);
            }

            assignment.unassign();
        }
    }

    fn falsifies(&self, assignment: &Assignment) -> bool {
        self.formula
            .iter()
            .any(|clause| is_falsified(clause, assignment))
    }
}
