#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The interface shared by the solving engines and the entry points exposed
//! to parsers, runners and comparison tools.
//!
//! Two engines implement [`Solver`]:
//!
//! - [`Dpll`]: unit propagation, clause simplification and branching. Has a
//!   short-circuiting first-solution mode as well as full enumeration.
//! - [`Backtracking`]: fixes variables one at a time in name order and only
//!   prunes definitely falsified prefixes. Enumeration only.
//!
//! Both produce total assignments when enumerating, so their outputs can be
//! compared as sets.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::backtrack::Backtracking;
use crate::sat::cnf::Formula;
use crate::sat::dpll::Dpll;
use crate::sat::literal::Literal;
use clap::ValueEnum;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;

/// Counters collected during a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SolutionStats {
    /// Branch points (DPLL) or literals tried (backtracking).
    pub decisions: usize,
    /// Literals forced by unit propagation. Always zero for backtracking.
    pub propagations: usize,
    /// Failed branches: empty clauses and conflicting units for DPLL,
    /// complete assignments rejected at the leaf for backtracking.
    pub conflicts: usize,
    /// Extensions rejected by the falsification check. Backtracking only.
    pub pruned: usize,
    /// Solutions surfaced to the caller.
    pub solutions: usize,
}

impl AddAssign for SolutionStats {
    fn add_assign(&mut self, rhs: Self) {
        self.decisions += rhs.decisions;
        self.propagations += rhs.propagations;
        self.conflicts += rhs.conflicts;
        self.pruned += rhs.pruned;
        self.solutions += rhs.solutions;
    }
}

/// A search engine over a borrowed formula.
pub trait Solver<'a> {
    /// Prepares a solver for `formula`. No search happens yet.
    fn new(formula: &'a Formula) -> Self;

    /// Enumerates every satisfying total assignment.
    fn solve_all(&mut self) -> Solutions;

    /// Counters from the most recent search.
    fn stats(&self) -> SolutionStats;
}

/// Engine selection for runners and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum SolverType {
    /// Davis-Putnam-Logemann-Loveland with unit propagation.
    #[default]
    Dpll,
    /// Exhaustive backtracking over variables sorted by name.
    Backtracking,
}

impl Display for SolverType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dpll => write!(f, "dpll"),
            Self::Backtracking => write!(f, "backtracking"),
        }
    }
}

impl SolverType {
    /// Runs the selected engine in enumeration mode.
    #[must_use]
    pub fn solve_all(self, formula: &Formula) -> (Solutions, SolutionStats) {
        match self {
            Self::Dpll => run_all(Dpll::new(formula)),
            Self::Backtracking => run_all(Backtracking::new(formula)),
        }
    }
}

fn run_all<'a, S: Solver<'a>>(mut solver: S) -> (Solutions, SolutionStats) {
    let solutions = solver.solve_all();
    (solutions, solver.stats())
}

/// DPLL, stopping at the first model found.
///
/// The returned assignment may be partial: variables the formula does not
/// constrain once the remaining clauses are satisfied are left out. The
/// formula with no clauses yields the empty assignment.
#[must_use]
pub fn find_first_solution(formula: &Formula) -> Option<Assignment> {
    Dpll::new(formula).solve()
}

/// DPLL, exploring both branches at every decision.
#[must_use]
pub fn find_all_solutions_dpll(formula: &Formula) -> Solutions {
    Dpll::new(formula).solve_all()
}

/// The backtracking enumerator. Every returned model has been re-verified.
#[must_use]
pub fn find_all_solutions_backtracking(formula: &Formula) -> Solutions {
    Backtracking::new(formula).solve_all()
}

/// `true` if both lists hold the same models, ignoring the order of the
/// models and of the literals inside each one.
#[must_use]
pub fn solutions_agree(left: &[Assignment], right: &[Assignment]) -> bool {
    fn canonical(solutions: &[Assignment]) -> Vec<Vec<Literal>> {
        solutions
            .iter()
            .map(|assignment| assignment.iter().cloned().sorted().collect_vec())
            .sorted()
            .collect()
    }

    left.len() == right.len() && canonical(left) == canonical(right)
}
