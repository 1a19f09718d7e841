use sat_enum::sat::generator::{GeneratorConfig, random_formula};
use sat_enum::sat::solver::solutions_agree;
use sat_enum::{
    Assignment, Clause, Formula, Literal, evaluate_formula, find_all_solutions_backtracking,
    find_all_solutions_dpll, find_first_solution, negate, verify_solution,
};

fn formula(clauses: &[&[&str]]) -> Formula {
    Formula::new(
        clauses
            .iter()
            .map(|c| c.iter().map(|s| s.parse::<Literal>().unwrap()).collect::<Vec<_>>()),
    )
}

/// Counts models by evaluating every row of the truth table.
fn brute_force_count(formula: &Formula) -> usize {
    let vars = formula.variables();
    (0u32..1 << vars.len())
        .filter(|row| {
            let assignment: Assignment = vars
                .iter()
                .enumerate()
                .map(|(i, var)| Literal::new(var.clone(), row & (1 << i) != 0))
                .collect();
            evaluate_formula(formula, &assignment)
        })
        .count()
}

fn small_random_formulas() -> impl Iterator<Item = Formula> {
    (0..60u64).map(|seed| {
        random_formula(GeneratorConfig {
            variables: 1 + (seed % 5) as usize,
            clauses: 1 + (seed % 9) as usize,
            width: 1 + (seed % 3) as usize,
            seed,
        })
    })
}

#[test]
fn test_three_clause_scenario() {
    let f = formula(&[&["A", "B"], &["-A", "C"], &["-B", "-C"]]);
    let dpll = find_all_solutions_dpll(&f);
    let backtracking = find_all_solutions_backtracking(&f);

    assert_eq!(dpll.len(), 2);
    assert_eq!(brute_force_count(&f), 2);
    assert!(solutions_agree(&dpll, &backtracking));

    for solution in &dpll {
        let a = solution.value_of("A").unwrap();
        assert_eq!(solution.value_of("C"), Some(a));
        assert_eq!(solution.value_of("B"), Some(!a));
    }
}

#[test]
fn test_contradiction_scenario() {
    let f = formula(&[&["p"], &["-p"]]);
    assert!(find_first_solution(&f).is_none());
    assert!(find_all_solutions_dpll(&f).is_empty());
    assert!(find_all_solutions_backtracking(&f).is_empty());
}

#[test]
fn test_implication_scenario() {
    let f = formula(&[&["A", "B"], &["A", "C"], &["-B", "D"], &["-C", "D"]]);
    let dpll = find_all_solutions_dpll(&f);
    assert!(dpll.len() > 1);
    assert_eq!(dpll.len(), brute_force_count(&f));
    for solution in &dpll {
        assert!(verify_solution(&f, solution));
        if solution.value_of("B") == Some(true) || solution.value_of("C") == Some(true) {
            assert_eq!(solution.value_of("D"), Some(true));
        }
    }
    assert!(solutions_agree(&dpll, &find_all_solutions_backtracking(&f)));
}

#[test]
fn test_empty_formula_scenario() {
    let f = Formula::default();
    assert_eq!(find_first_solution(&f), Some(Assignment::new()));
    assert_eq!(find_all_solutions_dpll(&f), vec![Assignment::new()]);
    assert_eq!(find_all_solutions_backtracking(&f), vec![Assignment::new()]);
}

#[test]
fn test_empty_clause_anywhere_is_unsat() {
    let base = formula(&[&["A", "B"], &["-A", "C"], &["C"]]);
    for position in 0..=base.len() {
        let mut clauses = base.clauses.clone();
        clauses.insert(position, Clause::empty());
        let f = Formula::from(clauses);
        assert!(find_first_solution(&f).is_none());
        assert!(find_all_solutions_dpll(&f).is_empty());
        assert!(find_all_solutions_backtracking(&f).is_empty());
    }
}

#[test]
fn test_soundness_on_random_formulas() {
    for f in small_random_formulas() {
        if let Some(model) = find_first_solution(&f) {
            assert!(evaluate_formula(&f, &model), "first solution fails {f}");
        }
        for model in find_all_solutions_dpll(&f)
            .iter()
            .chain(find_all_solutions_backtracking(&f).iter())
        {
            assert!(evaluate_formula(&f, model), "{model} fails {f}");
        }
    }
}

#[test]
fn test_agreement_and_completeness_on_random_formulas() {
    for f in small_random_formulas() {
        let dpll = find_all_solutions_dpll(&f);
        let backtracking = find_all_solutions_backtracking(&f);
        let expected = brute_force_count(&f);

        assert_eq!(dpll.len(), expected, "dpll count on {f}");
        assert_eq!(backtracking.len(), expected, "backtracking count on {f}");
        assert!(solutions_agree(&dpll, &backtracking), "engines disagree on {f}");
        assert_eq!(find_first_solution(&f).is_some(), expected > 0);
    }
}

#[test]
fn test_models_are_total_and_consistent() {
    for f in small_random_formulas() {
        let vars = f.variables();
        for model in find_all_solutions_dpll(&f) {
            assert_eq!(model.len(), vars.len());
            for lit in model.iter() {
                assert!(!model.contains(&negate(lit)));
            }
        }
    }
}

#[test]
fn test_determinism() {
    for f in small_random_formulas().take(20) {
        assert_eq!(find_first_solution(&f), find_first_solution(&f));
        assert_eq!(find_all_solutions_dpll(&f), find_all_solutions_dpll(&f));
        assert_eq!(
            find_all_solutions_backtracking(&f),
            find_all_solutions_backtracking(&f)
        );
    }
}

#[test]
fn test_duplicate_literals_do_not_change_models() {
    let plain = formula(&[&["A", "B"], &["-A", "C"]]);
    let doubled = formula(&[&["A", "A", "B"], &["-A", "C", "C"], &["-A", "C"]]);
    assert!(solutions_agree(
        &find_all_solutions_dpll(&plain),
        &find_all_solutions_dpll(&doubled)
    ));
    assert!(solutions_agree(
        &find_all_solutions_backtracking(&plain),
        &find_all_solutions_backtracking(&doubled)
    ));
}

#[test]
fn test_negation_idempotence() {
    for name in ["A", "x1", "long_name"] {
        for polarity in [true, false] {
            let lit = Literal::new(name, polarity);
            assert_eq!(negate(&negate(&lit)), lit);
            assert_ne!(negate(&lit), lit);
        }
    }
}
