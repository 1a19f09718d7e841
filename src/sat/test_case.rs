//! YAML test descriptions.
//!
//! ```yaml
//! description: "implication chain"
//! expected: SAT
//! clauses:
//!   - [A, B]
//!   - [-A, C]
//! ```
//!
//! `expected` is one of `SAT`, `UNSAT` or `UNKNOWN` and defaults to
//! `UNKNOWN`, in which case any outcome passes.

use crate::sat::cnf::Formula;
use crate::sat::error::Result;
use crate::sat::registry::VariableRegistry;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Whether a formula has a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// At least one model was found.
    Sat,
    /// No model exists.
    Unsat,
}

impl Outcome {
    /// `Sat` if there is at least one solution.
    #[must_use]
    pub const fn from_solution_count(count: usize) -> Self {
        if count > 0 { Self::Sat } else { Self::Unsat }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "SAT"),
            Self::Unsat => write!(f, "UNSAT"),
        }
    }
}

/// The outcome a test description expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Expected {
    /// The formula should have a model.
    #[serde(rename = "SAT")]
    Sat,
    /// The formula should have no model.
    #[serde(rename = "UNSAT")]
    Unsat,
    /// Any outcome passes.
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sat => write!(f, "SAT"),
            Self::Unsat => write!(f, "UNSAT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A formula written with named literals plus the outcome it should have.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    /// Free-form label printed when the case runs.
    #[serde(default)]
    pub description: String,
    /// Outcome the case should have. Defaults to `UNKNOWN`.
    #[serde(default)]
    pub expected: Expected,
    /// Clauses as lists of literal names, `-` marking negation.
    pub clauses: Vec<Vec<String>>,
}

impl TestCase {
    /// Parses a test description from YAML text.
    ///
    /// # Errors
    ///
    /// `Error::Yaml` if the text is not a valid description.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a test description file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, otherwise as [`TestCase::from_yaml`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Builds the formula, interning names in `registry`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLiteral` for a literal with no name, such as `-`.
    pub fn formula(&self, registry: &mut VariableRegistry) -> Result<Formula> {
        let mut formula = Formula::default();
        for clause in &self.clauses {
            let literals = clause
                .iter()
                .map(|text| registry.parse_literal(text))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            formula.add_clause(literals);
        }
        Ok(formula)
    }

    /// Compares an outcome with the expectation. `None` when nothing is expected.
    #[must_use]
    pub fn check(&self, outcome: Outcome) -> Option<bool> {
        match self.expected {
            Expected::Sat => Some(outcome == Outcome::Sat),
            Expected::Unsat => Some(outcome == Outcome::Unsat),
            Expected::Unknown => None,
        }
    }
}
