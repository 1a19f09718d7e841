#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Disjunctions of literals.
//!
//! A clause keeps its literals in insertion order. Duplicates are allowed and
//! never deduplicated; the evaluation primitives are correct with them. An
//! empty clause is unconditionally false.

use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// Inline capacity before a clause spills to the heap.
const INLINE_LITERALS: usize = 4;

/// Storage backing a clause.
pub type LiteralStorage = SmallVec<[Literal; INLINE_LITERALS]>;

/// An ordered disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    literals: LiteralStorage,
}

impl Clause {
    /// Builds a clause from any sequence of literals, preserving order.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
        }
    }

    /// The empty clause.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of literals, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` for the empty clause, which no assignment satisfies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause with exactly one literal left.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.len() == 1
    }

    /// The first literal, if any. Used as the DPLL branching literal.
    #[must_use]
    pub fn first(&self) -> Option<&Literal> {
        self.literals.first()
    }

    /// Iterates the literals in order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// The literals as a slice.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Self {
            literals: SmallVec::from_vec(literals),
        }
    }
}

impl From<&[Literal]> for Clause {
    fn from(literals: &[Literal]) -> Self {
        Self::new(literals.iter().cloned())
    }
}

impl<const N: usize> From<[Literal; N]> for Clause {
    fn from(literals: [Literal; N]) -> Self {
        Self::new(literals)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.literals.iter().join(" ∨ "))
    }
}
