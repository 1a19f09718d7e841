#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c'.
//! - A problem line 'p cnf <`num_variables`> <`num_clauses`>'.
//! - Clauses as whitespace-separated integers, positive for a variable and
//!   negative for its negation, each clause terminated by '0'. A clause may
//!   span several lines.
//! - An optional '%' line marking end-of-data (often used in competitions).
//!
//! Integer `n` becomes a literal over the variable named `x|n|`, interned in
//! a caller-supplied [`VariableRegistry`].

use crate::sat::cnf::Formula;
use crate::sat::error::{Error, Result};
use crate::sat::literal::Literal;
use crate::sat::registry::VariableRegistry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// The counts declared by a `p cnf` problem line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Declared number of variables.
    pub variables: usize,
    /// Declared number of clauses.
    pub clauses: usize,
}

/// A parsed DIMACS problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimacs {
    /// The clauses read, with variables named by the registry.
    pub formula: Formula,
    /// The problem line, if the input had one.
    pub header: Option<Header>,
}

/// Parses DIMACS formatted data from a `BufRead` source.
///
/// A bare `0` (an empty clause) is skipped with a warning. A clause still
/// open at end of input is kept. Declared counts that disagree with the
/// clauses actually read are logged, not rejected.
///
/// # Errors
///
/// - `Error::Io` if reading a line fails.
/// - `Error::Parse` on a malformed problem line or a token that is not an
///   integer.
pub fn parse_dimacs<R: BufRead>(reader: R, registry: &mut VariableRegistry) -> Result<Dimacs> {
    let mut formula = Formula::default();
    let mut header = None;
    let mut current: Vec<Literal> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => {}
            Some(token) if token.starts_with('c') => {}
            Some(&"p") => header = Some(parse_header(parts, line_no)?),
            Some(_) => {
                for token in parts {
                    let value: i32 = token.parse().map_err(|e| Error::Parse {
                        line: line_no,
                        message: format!("failed to parse literal '{token}': {e}"),
                    })?;

                    if value != 0 {
                        current.push(registry.dimacs_literal(value));
                    } else if current.is_empty() {
                        warn!(line = line_no, "skipping empty clause");
                    } else {
                        formula.add_clause(std::mem::take(&mut current));
                    }
                }
            }
        }
    }

    if !current.is_empty() {
        formula.add_clause(current);
    }

    if let Some(Header { variables, clauses }) = header {
        let actual_vars = formula.num_vars();
        if variables != actual_vars || clauses != formula.len() {
            warn!(
                declared_variables = variables,
                declared_clauses = clauses,
                actual_variables = actual_vars,
                actual_clauses = formula.len(),
                "problem line does not match contents"
            );
        }
    }

    debug!(clauses = formula.len(), variables = registry.len(), "parsed DIMACS");
    Ok(Dimacs { formula, header })
}

fn parse_header<'a>(mut parts: impl Iterator<Item = &'a str>, line: usize) -> Result<Header> {
    let malformed = |message: &str| Error::Parse {
        line,
        message: message.to_string(),
    };

    let _p = parts.next();
    if parts.next() != Some("cnf") {
        return Err(malformed("expected 'p cnf <variables> <clauses>'"));
    }

    let mut count = || -> Result<usize> {
        parts
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed("problem line counts must be non-negative integers"))
    };

    Ok(Header {
        variables: count()?,
        clauses: count()?,
    })
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// `Error::Io` if the file cannot be opened, otherwise as [`parse_dimacs`].
pub fn parse_file(path: impl AsRef<Path>, registry: &mut VariableRegistry) -> Result<Dimacs> {
    let file = File::open(path.as_ref())?;
    parse_dimacs(BufReader::new(file), registry)
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// As [`parse_dimacs`].
pub fn parse_str(input: &str, registry: &mut VariableRegistry) -> Result<Dimacs> {
    parse_dimacs(input.as_bytes(), registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::clause::Clause;

    fn lits(values: &[(&str, bool)]) -> Clause {
        values.iter().map(|&(n, p)| Literal::new(n, p)).collect()
    }

    #[test]
    fn test_parse_simple() {
        let mut registry = VariableRegistry::new();
        let dimacs = parse_str("c example\np cnf 3 2\n1 -2 0\n2 3 0\n", &mut registry).unwrap();

        assert_eq!(
            dimacs.header,
            Some(Header {
                variables: 3,
                clauses: 2
            })
        );
        assert_eq!(dimacs.formula.len(), 2);
        assert_eq!(dimacs.formula[0], lits(&[("x1", true), ("x2", false)]));
        assert_eq!(dimacs.formula[1], lits(&[("x2", true), ("x3", true)]));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_clause_spanning_lines() {
        let mut registry = VariableRegistry::new();
        let dimacs = parse_str("1 2\n-3 0 4 0\n", &mut registry).unwrap();
        assert_eq!(dimacs.formula.len(), 2);
        assert_eq!(dimacs.formula[0].len(), 3);
        assert_eq!(dimacs.formula[1], lits(&[("x4", true)]));
        assert_eq!(dimacs.header, None);
    }

    #[test]
    fn test_unterminated_final_clause() {
        let mut registry = VariableRegistry::new();
        let dimacs = parse_str("1 0\n-1 2", &mut registry).unwrap();
        assert_eq!(dimacs.formula.len(), 2);
    }

    #[test]
    fn test_empty_clause_skipped() {
        let mut registry = VariableRegistry::new();
        let dimacs = parse_str("1 0\n0\n2 0\n", &mut registry).unwrap();
        assert_eq!(dimacs.formula.len(), 2);
        assert!(!dimacs.formula.has_empty_clause());
    }

    #[test]
    fn test_percent_ends_input() {
        let mut registry = VariableRegistry::new();
        let dimacs = parse_str("1 0\n%\n0\n2 0\n", &mut registry).unwrap();
        assert_eq!(dimacs.formula.len(), 1);
    }

    #[test]
    fn test_bad_literal() {
        let mut registry = VariableRegistry::new();
        let err = parse_str("1 0\n1 x 0\n", &mut registry).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_header() {
        let mut registry = VariableRegistry::new();
        assert!(matches!(
            parse_str("p dnf 1 1\n", &mut registry),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_str("p cnf one 1\n", &mut registry),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let mut registry = VariableRegistry::new();
        assert!(matches!(
            parse_file("/nonexistent/problem.cnf", &mut registry),
            Err(Error::Io(_))
        ));
    }
}
