#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formulas in conjunctive normal form.
//!
//! A `Formula` is an ordered list of clauses. Clause order carries no meaning
//! for satisfiability, but it fixes the DPLL tie-break (first literal of the
//! first remaining clause), so it is preserved exactly as given.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::evaluate;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// A conjunction of clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    /// The clauses in the order they were given.
    pub clauses: Vec<Clause>,
}

impl Formula {
    /// Builds a formula from anything that yields clauses.
    pub fn new<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Self {
            clauses: clauses.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterates the clauses in order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` if there are no clauses. The empty formula is satisfied by
    /// every assignment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends a clause.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        self.clauses.push(clause.into());
    }

    /// Every variable occurring in the formula, deduplicated and sorted by
    /// name.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        self.clauses
            .iter()
            .flat_map(Clause::iter)
            .map(|lit| Arc::clone(lit.variable()))
            .sorted()
            .dedup()
            .collect()
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables().len()
    }

    /// Total literal occurrences across all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// `true` if some clause is empty, which makes the formula unsatisfiable.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// `true` if every clause is satisfied by `assignment`.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> bool {
        evaluate::evaluate_formula(self, assignment)
    }

    /// Alias of [`Formula::evaluate`] kept for callers that verify models.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        evaluate::verify_solution(self, assignment)
    }
}

impl Index<usize> for Formula {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl From<Vec<Clause>> for Formula {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

impl From<Vec<Vec<Literal>>> for Formula {
    fn from(clauses: Vec<Vec<Literal>>) -> Self {
        Self::new(clauses)
    }
}

impl FromIterator<Clause> for Formula {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Clause;
    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        write!(f, "{}", self.clauses.iter().join(" ∧ "))
    }
}
