#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod backtrack;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod evaluate;
pub mod generator;
pub mod literal;
pub mod registry;
pub mod solver;
pub mod test_case;
