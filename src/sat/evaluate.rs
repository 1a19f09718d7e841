#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Pure evaluation primitives over a clause and a partial assignment.
//!
//! All functions here are total and side-effect free apart from `tracing`
//! events. The two falsity checks are deliberately different:
//!
//! - [`is_falsified`] answers "is every literal known false?" and is `false`
//!   for the empty clause.
//! - The DPLL engine separately treats an empty clause left over after
//!   [`remove_false_literals`] as a conflict.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Formula;
use tracing::trace;

/// `true` iff at least one literal of `clause` is in `assignment`.
#[must_use]
pub fn is_satisfied(clause: &Clause, assignment: &Assignment) -> bool {
    clause.iter().any(|lit| assignment.is_true(lit))
}

/// `true` iff `clause` is non-empty and every literal's negation is in
/// `assignment`.
#[must_use]
pub fn is_falsified(clause: &Clause, assignment: &Assignment) -> bool {
    !clause.is_empty() && clause.iter().all(|lit| assignment.is_false(lit))
}

/// A copy of `clause` without the literals `assignment` makes false.
#[must_use]
pub fn remove_false_literals(clause: &Clause, assignment: &Assignment) -> Clause {
    clause
        .iter()
        .filter(|lit| !assignment.is_false(lit))
        .cloned()
        .collect()
}

/// `true` iff every clause of `formula` is satisfied.
#[must_use]
pub fn evaluate_formula(formula: &Formula, assignment: &Assignment) -> bool {
    formula.iter().all(|clause| is_satisfied(clause, assignment))
}

/// Satisfaction status of one clause under a candidate assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseStatus {
    /// Zero-based position of the clause in the formula.
    pub index: usize,
    /// Whether some literal of the clause is true.
    pub satisfied: bool,
}

/// Per-clause verification of a candidate model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Verification {
    /// One entry per clause, in formula order.
    pub clauses: Vec<ClauseStatus>,
}

impl Verification {
    /// `true` if every clause was satisfied.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.clauses.iter().all(|status| status.satisfied)
    }

    /// Indices of the clauses left unsatisfied.
    pub fn unsatisfied(&self) -> impl Iterator<Item = usize> + '_ {
        self.clauses
            .iter()
            .filter(|status| !status.satisfied)
            .map(|status| status.index)
    }
}

/// Re-checks every clause of `formula` against `assignment` independently of
/// any search, recording each clause's status.
#[must_use]
pub fn verify_solution_report(formula: &Formula, assignment: &Assignment) -> Verification {
    let clauses = formula
        .iter()
        .enumerate()
        .map(|(index, clause)| {
            let satisfied = is_satisfied(clause, assignment);
            trace!(
                position = index + 1,
                %clause,
                status = if satisfied { "SAT" } else { "UNSAT" },
                "verifying clause"
            );
            ClauseStatus { index, satisfied }
        })
        .collect();

    Verification { clauses }
}

/// `true` if `assignment` satisfies every clause of `formula`.
///
/// The per-clause trace is emitted at `trace` level.
#[must_use]
pub fn verify_solution(formula: &Formula, assignment: &Assignment) -> bool {
    trace!(%assignment, "verifying assignment");
    verify_solution_report(formula, assignment).is_satisfied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Literal;

    fn clause(lits: &[&str]) -> Clause {
        lits.iter().map(|s| s.parse::<Literal>().unwrap()).collect()
    }

    fn assignment(lits: &[&str]) -> Assignment {
        lits.iter().map(|s| s.parse::<Literal>().unwrap()).collect()
    }

    #[test]
    fn test_is_satisfied() {
        let c = clause(&["A", "-B"]);
        assert!(is_satisfied(&c, &assignment(&["-B"])));
        assert!(is_satisfied(&c, &assignment(&["A", "B"])));
        assert!(!is_satisfied(&c, &assignment(&["-A", "B"])));
        assert!(!is_satisfied(&c, &assignment(&[])));
        assert!(!is_satisfied(&Clause::empty(), &assignment(&["A"])));
    }

    #[test]
    fn test_is_falsified() {
        let c = clause(&["A", "-B"]);
        assert!(is_falsified(&c, &assignment(&["-A", "B"])));
        assert!(!is_falsified(&c, &assignment(&["-A"])));
        assert!(!is_falsified(&c, &assignment(&["A", "B"])));
    }

    #[test]
    fn test_empty_clause_is_not_falsified() {
        assert!(!is_falsified(&Clause::empty(), &assignment(&[])));
        assert!(!is_falsified(&Clause::empty(), &assignment(&["A", "-B"])));
    }

    #[test]
    fn test_falsified_with_duplicates() {
        let c = clause(&["A", "A"]);
        assert!(is_falsified(&c, &assignment(&["-A"])));
        assert!(is_satisfied(&c, &assignment(&["A"])));
    }

    #[test]
    fn test_remove_false_literals() {
        let c = clause(&["A", "-B", "C"]);
        assert_eq!(
            remove_false_literals(&c, &assignment(&["B"])),
            clause(&["A", "C"])
        );
        assert_eq!(
            remove_false_literals(&c, &assignment(&["-A", "B", "-C"])),
            Clause::empty()
        );
        assert_eq!(remove_false_literals(&c, &assignment(&[])), c);
    }

    #[test]
    fn test_evaluate_formula() {
        let f = Formula::new([clause(&["A", "B"]), clause(&["-A", "C"])]);
        assert!(evaluate_formula(&f, &assignment(&["A", "C"])));
        assert!(!evaluate_formula(&f, &assignment(&["A"])));
        assert!(evaluate_formula(&Formula::default(), &assignment(&[])));
    }

    #[test]
    fn test_verify_solution_report() {
        let f = Formula::new([clause(&["A"]), clause(&["B"]), clause(&["-A", "B"])]);
        let report = verify_solution_report(&f, &assignment(&["A", "-B"]));
        assert!(!report.is_satisfied());
        assert_eq!(report.unsatisfied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(verify_solution(&f, &assignment(&["A", "B"])));
    }

    #[test]
    fn test_contradictory_candidate_is_evaluated() {
        let both = assignment(&["A", "-A"]);
        assert!(verify_solution(&Formula::new([clause(&["A"])]), &both));
        assert!(verify_solution(&Formula::new([clause(&["-A"])]), &both));

        let f = Formula::new([clause(&["A"]), clause(&["B"])]);
        assert!(!evaluate_formula(&f, &both));
        assert_eq!(
            verify_solution_report(&f, &both).unsatisfied().collect::<Vec<_>>(),
            vec![1]
        );
    }
}
