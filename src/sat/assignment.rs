//! Partial assignments built up during search.
//!
//! An `Assignment` is the ordered list of literals known to be true, in the
//! order they were decided or forced. A hash index alongside the list makes
//! membership tests constant time. The engines never add both a literal and
//! its negation, but an assignment built by a caller may hold both; the
//! evaluation functions accept it as given.

use crate::sat::literal::Literal;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{self, Display, Formatter};

/// Ordered set of literals known to be true.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    trail: Vec<Literal>,
    index: FxHashSet<Literal>,
}

/// The output of an all-solutions search.
pub type Solutions = Vec<Assignment>;

impl Assignment {
    /// An empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty assignment with room for `capacity` literals.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trail: Vec::with_capacity(capacity),
            index: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Appends `lit` as true.
    ///
    /// Returns `false` and leaves the assignment unchanged if `lit` is already
    /// present. The negation of `lit` is not checked.
    pub fn assign(&mut self, lit: Literal) -> bool {
        if self.index.contains(&lit) {
            return false;
        }
        self.index.insert(lit.clone());
        self.trail.push(lit);
        true
    }

    /// Removes the most recently assigned literal.
    pub fn unassign(&mut self) -> Option<Literal> {
        let lit = self.trail.pop()?;
        self.index.remove(&lit);
        Some(lit)
    }

    /// Returns a copy extended by `lit`, leaving `self` untouched.
    #[must_use]
    pub fn with(&self, lit: Literal) -> Self {
        let mut next = self.clone();
        next.assign(lit);
        next
    }

    /// `true` if `lit` itself is in the assignment.
    #[must_use]
    pub fn contains(&self, lit: &Literal) -> bool {
        self.index.contains(lit)
    }

    /// `true` if `lit` is known true. Alias of [`Assignment::contains`].
    #[must_use]
    pub fn is_true(&self, lit: &Literal) -> bool {
        self.contains(lit)
    }

    /// `true` if the negation of `lit` is in the assignment.
    #[must_use]
    pub fn is_false(&self, lit: &Literal) -> bool {
        self.index.contains(&lit.negated())
    }

    /// `true` if either polarity of `lit`'s variable has been assigned.
    #[must_use]
    pub fn is_assigned(&self, lit: &Literal) -> bool {
        self.is_true(lit) || self.is_false(lit)
    }

    /// The truth value given to `name`, if any.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<bool> {
        if self.contains(&Literal::positive(name)) {
            Some(true)
        } else if self.contains(&Literal::new(name, false)) {
            Some(false)
        } else {
            None
        }
    }

    /// Number of assigned literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    /// `true` if nothing has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    /// Iterates the literals in decision order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.trail.iter()
    }

    /// The literals in decision order.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.trail
    }

    /// The literals as an unordered set, for order-insensitive comparison.
    #[must_use]
    pub fn to_literal_set(&self) -> FxHashSet<Literal> {
        self.index.clone()
    }

    /// Consumes the assignment, returning the literals in decision order.
    #[must_use]
    pub fn into_literals(self) -> Vec<Literal> {
        self.trail
    }
}

/// Equal when the same literals were assigned in the same order.
impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.trail == other.trail
    }
}

impl Eq for Assignment {}

impl FromIterator<Literal> for Assignment {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for lit in iter {
            assignment.assign(lit);
        }
        assignment
    }
}

impl Extend<Literal> for Assignment {
    fn extend<T: IntoIterator<Item = Literal>>(&mut self, iter: T) {
        for lit in iter {
            self.assign(lit);
        }
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.trail.iter()
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.trail.iter().join(", "))
    }
}
