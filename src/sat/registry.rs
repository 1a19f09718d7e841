#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Interning of variable names for parsers.
//!
//! A registry is owned by whoever builds the formula and passed in
//! explicitly; there is no process-wide table. Interning means every literal
//! over the same name shares one allocation.

use crate::sat::literal::{Literal, ParseLiteralError, Variable};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Maps variable names to their shared handles.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    variables: FxHashMap<Box<str>, Variable>,
}

impl VariableRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, creating it on first use.
    pub fn variable(&mut self, name: &str) -> Variable {
        if let Some(var) = self.variables.get(name) {
            return Arc::clone(var);
        }
        let var: Variable = Arc::from(name);
        self.variables.insert(name.into(), Arc::clone(&var));
        var
    }

    /// A literal over the interned `name`.
    pub fn literal(&mut self, name: &str, polarity: bool) -> Literal {
        Literal::new(self.variable(name), polarity)
    }

    /// Parses `A` or `-A` into a literal over an interned name.
    ///
    /// # Errors
    ///
    /// Returns `ParseLiteralError` if there is no name after the sign.
    pub fn parse_literal(&mut self, text: &str) -> Result<Literal, ParseLiteralError> {
        let parsed: Literal = text.parse()?;
        Ok(self.literal(parsed.name(), parsed.polarity()))
    }

    /// Maps a DIMACS literal `n` onto variable `x|n|`, negative when `n < 0`.
    pub fn dimacs_literal(&mut self, value: i32) -> Literal {
        let name = format!("x{}", value.unsigned_abs());
        self.literal(&name, value > 0)
    }

    /// Looks up a name without interning it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Number of interned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// `true` if no variable has been interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
