#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Named Boolean variables and their literals.
//!
//! A `Literal` pairs a variable name with a polarity. Literals are plain
//! values: negation builds a new literal and never mutates the original, so
//! clause sets shared between recursive branches stay stable.

use core::ops::Not;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// The name of a Boolean variable.
///
/// Shared so that cloning a literal inside the search is a reference-count
/// bump rather than a string copy.
pub type Variable = Arc<str>;

/// A Boolean variable together with its polarity.
///
/// Equality and hashing are by `(name, polarity)`, so a literal and its
/// negation are always distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    name: Variable,
    polarity: bool,
}

impl Literal {
    /// Creates a literal over `name` with the given polarity.
    pub fn new(name: impl Into<Variable>, polarity: bool) -> Self {
        Self {
            name: name.into(),
            polarity,
        }
    }

    /// Creates a positive literal, the default polarity for a fresh variable.
    pub fn positive(name: impl Into<Variable>) -> Self {
        Self::new(name, true)
    }

    /// The variable this literal ranges over.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared variable handle.
    #[must_use]
    pub const fn variable(&self) -> &Variable {
        &self.name
    }

    /// `true` for a positive occurrence, `false` for a negated one.
    #[must_use]
    pub const fn polarity(&self) -> bool {
        self.polarity
    }

    /// Returns `true` if this is a negated occurrence.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        !self.polarity
    }

    /// Returns the complementary literal.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            polarity: !self.polarity,
        }
    }
}

/// Returns the complement of `lit`. Pure; `lit` is left untouched.
#[must_use]
pub fn negate(lit: &Literal) -> Literal {
    lit.negated()
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            name: self.name,
            polarity: !self.polarity,
        }
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.name)
        } else {
            write!(f, "-{}", self.name)
        }
    }
}

/// Returned when a textual literal has no variable name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid literal `{0}`: missing variable name")]
pub struct ParseLiteralError(pub String);

impl FromStr for Literal {
    type Err = ParseLiteralError;

    /// Parses `A` as a positive and `-A` as a negative literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, polarity) = s
            .strip_prefix('-')
            .map_or((s, true), |rest| (rest.trim_start(), false));

        if name.is_empty() {
            return Err(ParseLiteralError(s.to_string()));
        }

        Ok(Self::new(name, polarity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_literal_neg() {
        let a = Literal::positive("A");
        assert_eq!(a.negated(), Literal::new("A", false));
        assert_eq!(negate(&Literal::new("A", false)), a);
    }

    #[test]
    fn test_negation_is_pure() {
        let a = Literal::positive("A");
        let not_a = negate(&a);
        assert!(a.polarity());
        assert!(not_a.is_negated());
        assert_ne!(a, not_a);
    }

    #[test]
    fn test_double_negation() {
        for lit in [Literal::positive("x1"), Literal::new("x1", false)] {
            assert_eq!(negate(&negate(&lit)), lit);
            assert_eq!(!!lit.clone(), lit);
        }
    }

    #[test]
    fn test_hash_by_name_and_polarity() {
        let mut set = HashSet::new();
        set.insert(Literal::positive("A"));
        set.insert(Literal::positive(String::from("A")));
        set.insert(Literal::new("A", false));
        set.insert(Literal::positive("B"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_display_and_parse() {
        let lit: Literal = "-foo".parse().unwrap();
        assert_eq!(lit, Literal::new("foo", false));
        assert_eq!(lit.to_string(), "-foo");
        assert_eq!("B".parse::<Literal>().unwrap().to_string(), "B");
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!("-".parse::<Literal>().is_err());
        assert!("".parse::<Literal>().is_err());
    }
}
