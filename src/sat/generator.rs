#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Seeded random k-CNF formulas for comparisons, benches and tests.

use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use crate::sat::literal::{Literal, Variable};
use std::sync::Arc;

/// Shape of a random formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Variables are named `x1` through `x<variables>`.
    pub variables: usize,
    /// Number of clauses to generate.
    pub clauses: usize,
    /// Literals per clause, clamped to `variables`.
    pub width: usize,
    /// Seed for `fastrand`; equal configs give equal formulas.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variables: 5,
            clauses: 10,
            width: 3,
            seed: 0,
        }
    }
}

/// Generates a formula where each clause draws `width` distinct variables
/// uniformly and negates each with probability one half.
///
/// The same config always produces the same formula.
#[must_use]
pub fn random_formula(config: GeneratorConfig) -> Formula {
    let mut rng = fastrand::Rng::with_seed(config.seed);
    let names: Vec<Variable> = (1..=config.variables)
        .map(|i| Arc::from(format!("x{i}")))
        .collect();
    let width = config.width.min(names.len());

    (0..config.clauses)
        .map(|_| {
            let mut picked: Vec<usize> = Vec::with_capacity(width);
            while picked.len() < width {
                let index = rng.usize(..names.len());
                if !picked.contains(&index) {
                    picked.push(index);
                }
            }
            picked
                .into_iter()
                .map(|index| Literal::new(Arc::clone(&names[index]), rng.bool()))
                .collect::<Clause>()
        })
        .collect()
}
