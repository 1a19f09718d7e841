//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) decision engine.
//!
//! Every invocation of the search works on its own copy of the remaining
//! clauses and of the assignment, so sibling branches never observe each
//! other's simplifications. One invocation:
//!
//! 1.  **Simplify:** drop clauses satisfied by the assignment, then delete
//!     literals it makes false from the rest.
//! 2.  **SAT:** no clause left, the assignment is a model.
//! 3.  **UNSAT:** some clause became empty, the branch fails.
//! 4.  **Unit propagation:** every unassigned literal standing alone in a
//!     clause is forced. A literal forced together with its negation fails
//!     the branch. Otherwise the forced literals are appended and the
//!     invocation starts over at step 1 without branching.
//! 5.  **Decision:** branch on the first literal of the first remaining
//!     clause, trying it true and then false.
//!
//! In first-solution mode the search stops at the first model. In
//! all-solutions mode both branches are always explored, and each model is
//! completed over the formula's unassigned variables so that enumeration
//! returns total assignments.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use crate::sat::evaluate::{is_satisfied, remove_false_literals};
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolutionStats, Solver};
use rustc_hash::FxHashSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, trace};

/// How far the search goes once a model is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Stop at the first model.
    FirstSolution,
    /// Explore every branch and collect every model.
    AllSolutions,
}

/// A DPLL solver over a borrowed formula.
#[derive(Debug, Clone)]
pub struct Dpll<'a> {
    formula: &'a Formula,
    /// The formula's variables sorted by name; used to complete models in
    /// all-solutions mode.
    variables: Vec<Variable>,
    stats: SolutionStats,
}

impl<'a> Solver<'a> for Dpll<'a> {
    fn new(formula: &'a Formula) -> Self {
        Self {
            formula,
            variables: formula.variables(),
            stats: SolutionStats::default(),
        }
    }

    /// Enumerates every model, completing each over the don't-care variables
    /// with the positive polarity first.
    fn solve_all(&mut self) -> Solutions {
        self.run(Mode::AllSolutions)
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dpll<'_> {
    /// Searches for a single model, short-circuiting on the first success.
    ///
    /// # Returns
    ///
    /// * `Some(assignment)`: a model, possibly partial.
    /// * `None`: the formula is unsatisfiable.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.run(Mode::FirstSolution).pop()
    }

    /// Runs the search in the given mode from an empty assignment.
    pub fn run(&mut self, mode: Mode) -> Solutions {
        self.stats = SolutionStats::default();

        let mut solutions = Solutions::new();
        let clauses = self.formula.clauses.clone();
        // The break value only short-circuits recursion; the models are in `solutions`.
        let _ = self.search(clauses, Assignment::new(), mode, &mut solutions);

        debug!(
            ?mode,
            solutions = solutions.len(),
            decisions = self.stats.decisions,
            propagations = self.stats.propagations,
            conflicts = self.stats.conflicts,
            "dpll search finished"
        );
        solutions
    }

    fn search(
        &mut self,
        mut clauses: Vec<Clause>,
        mut assignment: Assignment,
        mode: Mode,
        solutions: &mut Solutions,
    ) -> ControlFlow<()> {
        loop {
            clauses = simplify(clauses, &assignment);

            if clauses.is_empty() {
                return self.record(assignment, mode, solutions);
            }

            if clauses.iter().any(Clause::is_empty) {
                self.stats.conflicts += 1;
                return ControlFlow::Continue(());
            }

            let Some(forced) = unit_literals(&clauses, &assignment) else {
                self.stats.conflicts += 1;
                trace!(%assignment, "conflicting unit clauses");
                return ControlFlow::Continue(());
            };

            if forced.is_empty() {
                break;
            }

            debug_assert!(forced.iter().all(|lit| !assignment.is_assigned(lit)));
            self.stats.propagations += forced.len();
            assignment.extend(forced);
        }

        // Non-empty and free of empty clauses, so the first clause has a first literal.
        let lit = clauses[0][0].clone();
        self.stats.decisions += 1;
        trace!(%lit, depth = assignment.len(), "branching");

        let flow = self.search(
            clauses.clone(),
            assignment.with(lit.clone()),
            mode,
            solutions,
        );
        if flow.is_break() {
            return flow;
        }

        self.search(clauses, assignment.with(lit.negated()), mode, solutions)
    }

    fn record(
        &mut self,
        mut assignment: Assignment,
        mode: Mode,
        solutions: &mut Solutions,
    ) -> ControlFlow<()> {
        match mode {
            Mode::FirstSolution => {
                trace!(%assignment, "model found");
                self.stats.solutions += 1;
                solutions.push(assignment);
                ControlFlow::Break(())
            }
            Mode::AllSolutions => {
                let free: Vec<Variable> = self
                    .variables
                    .iter()
                    .filter(|var| !assignment.is_assigned(&Literal::positive(Arc::clone(var))))
                    .cloned()
                    .collect();
                self.complete(&mut assignment, &free, solutions);
                ControlFlow::Continue(())
            }
        }
    }

    /// Pushes every completion of `assignment` over `free`.
    fn complete(
        &mut self,
        assignment: &mut Assignment,
        free: &[Variable],
        solutions: &mut Solutions,
    ) {
        let Some((var, rest)) = free.split_first() else {
            trace!(%assignment, "model found");
            self.stats.solutions += 1;
            solutions.push(assignment.clone());
            return;
        };

        debug_assert!(!assignment.is_assigned(&Literal::positive(Arc::clone(var))));
        for polarity in [true, false] {
            assignment.assign(Literal::new(Arc::clone(var), polarity));
            self.complete(assignment, rest, solutions);
            assignment.unassign();
        }
    }
}

/// Drops satisfied clauses and strips false literals from the rest.
fn simplify(clauses: Vec<Clause>, assignment: &Assignment) -> Vec<Clause> {
    clauses
        .into_iter()
        .filter(|clause| !is_satisfied(clause, assignment))
        .map(|clause| remove_false_literals(&clause, assignment))
        .collect()
}

/// Collects the literals forced by unit clauses, first occurrence first.
///
/// Returns `None` if some literal is forced together with its negation.
fn unit_literals(clauses: &[Clause], assignment: &Assignment) -> Option<Vec<Literal>> {
    let mut seen = FxHashSet::default();
    let mut forced = Vec::new();

    for lit in clauses
        .iter()
        .filter(|clause| clause.is_unit())
        .map(|clause| &clause[0])
        .filter(|lit| !assignment.is_assigned(lit))
    {
        if seen.contains(&lit.negated()) {
            return None;
        }
        if seen.insert(lit.clone()) {
            forced.push(lit.clone());
        }
    }

    Some(forced)
}
