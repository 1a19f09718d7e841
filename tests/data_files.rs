use sat_enum::sat::dimacs::parse_file;
use sat_enum::sat::registry::VariableRegistry;
use sat_enum::sat::solver::solutions_agree;
use sat_enum::sat::test_case::{Outcome, TestCase};
use sat_enum::{find_all_solutions_backtracking, find_all_solutions_dpll, find_first_solution};
use std::path::PathBuf;

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn test_yaml_expectations_hold() {
    for name in [
        "test_three_clause.yaml",
        "test_contradiction.yaml",
        "test_implication.yaml",
    ] {
        let case = TestCase::load(data(name)).unwrap();
        let mut registry = VariableRegistry::new();
        let formula = case.formula(&mut registry).unwrap();

        let dpll = find_all_solutions_dpll(&formula);
        let outcome = Outcome::from_solution_count(dpll.len());
        assert_eq!(case.check(outcome), Some(true), "{name}");
        assert!(solutions_agree(&dpll, &find_all_solutions_backtracking(&formula)));
    }
}

#[test]
fn test_simple_dimacs() {
    let mut registry = VariableRegistry::new();
    let dimacs = parse_file(data("simple.cnf"), &mut registry).unwrap();
    assert_eq!(dimacs.formula.len(), 3);
    assert_eq!(find_all_solutions_dpll(&dimacs.formula).len(), 2);
}

#[test]
fn test_pigeonhole_is_unsat() {
    let mut registry = VariableRegistry::new();
    let dimacs = parse_file(data("pigeonhole_3_2.cnf"), &mut registry).unwrap();
    assert_eq!(registry.len(), 6);
    assert!(find_first_solution(&dimacs.formula).is_none());
    assert!(find_all_solutions_dpll(&dimacs.formula).is_empty());
    assert!(find_all_solutions_backtracking(&dimacs.formula).is_empty());
}
