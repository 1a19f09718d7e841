//! Loading, solving and reporting for the command-line subcommands.

#![allow(clippy::cast_precision_loss)]

use crate::command_line::cli::CommonOptions;
use anyhow::{Context, bail};
use sat_enum::sat::assignment::{Assignment, Solutions};
use sat_enum::sat::cnf::Formula;
use sat_enum::sat::dimacs;
use sat_enum::sat::dpll::Dpll;
use sat_enum::sat::error::Error;
use sat_enum::sat::evaluate::verify_solution_report;
use sat_enum::sat::registry::VariableRegistry;
use sat_enum::sat::solver::{
    SolutionStats, Solver, SolverType, find_all_solutions_backtracking, find_all_solutions_dpll,
    find_first_solution, solutions_agree,
};
use sat_enum::sat::test_case::{Outcome, TestCase};
use std::path::Path;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{info, warn};
use walkdir::WalkDir;

/// What a single solve produced.
#[derive(Debug)]
pub(crate) struct Report {
    pub solutions: Solutions,
    pub stats: SolutionStats,
    pub elapsed: Duration,
}

impl Report {
    pub(crate) fn outcome(&self) -> Outcome {
        Outcome::from_solution_count(self.solutions.len())
    }
}

/// Loads a formula from a `.cnf`/`.dimacs` or `.yaml`/`.yml` file.
pub(crate) fn load_formula(
    path: &Path,
    registry: &mut VariableRegistry,
) -> anyhow::Result<Formula> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let formula = match extension {
        "cnf" | "dimacs" => dimacs::parse_file(path, registry)?.formula,
        "yaml" | "yml" => TestCase::load(path)?.formula(registry)?,
        _ => return Err(Error::UnknownExtension(path.to_path_buf()).into()),
    };
    Ok(formula)
}

/// Solves `formula` as configured by `common`.
///
/// # Errors
///
/// Fails if verification is on and a reported model does not satisfy the
/// formula.
pub(crate) fn solve(formula: &Formula, common: &CommonOptions) -> anyhow::Result<Report> {
    let time = Instant::now();

    let (solutions, stats) = if common.enumerates() {
        common.solver.solve_all(formula)
    } else {
        let mut solver = Dpll::new(formula);
        let solution = solver.solve();
        (solution.into_iter().collect(), solver.stats())
    };

    let elapsed = time.elapsed();

    if common.verify {
        verify_all(formula, &solutions)?;
    }

    Ok(Report {
        solutions,
        stats,
        elapsed,
    })
}

fn verify_all(formula: &Formula, solutions: &[Assignment]) -> anyhow::Result<()> {
    for (i, solution) in solutions.iter().enumerate() {
        let report = verify_solution_report(formula, solution);
        if !report.is_satisfied() {
            let clauses = report.unsatisfied().map(|c| c + 1).collect::<Vec<_>>();
            bail!("solution {} {solution} leaves clauses {clauses:?} unsatisfied", i + 1);
        }
    }
    info!(count = solutions.len(), "verified solutions");
    Ok(())
}

/// Solves a formula and prints the statistics table and result.
pub(crate) fn solve_and_report(
    formula: &Formula,
    common: &CommonOptions,
    label: Option<&str>,
    parse_time: Duration,
) -> anyhow::Result<Report> {
    if let Some(name) = label {
        println!("Solving: {name}");
    }
    info!(solver = %common.solver, all = common.enumerates(), "starting search");

    let report = solve(formula, common)?;

    if common.stats {
        print_stats(parse_time, formula, common.solver, &report);
    }
    if common.print_solution {
        print_solutions(&report.solutions);
    }

    println!("\n{}", satisfiability(report.outcome()));
    Ok(report)
}

/// Runs a YAML test description. Returns whether it passed.
pub(crate) fn run_test_case(path: &Path, common: &CommonOptions) -> anyhow::Result<bool> {
    let case = TestCase::load(path).with_context(|| format!("loading {}", path.display()))?;
    let mut registry = VariableRegistry::new();
    let formula = case.formula(&mut registry)?;

    println!("Running test: {}", case.description);
    println!("Expected: {}", case.expected);

    let common = CommonOptions {
        all: true,
        ..common.clone()
    };
    let report = solve(&formula, &common)?;
    let outcome = report.outcome();

    println!("Result: {outcome}");
    if report.solutions.is_empty() {
        println!("No solutions found");
    } else {
        println!("Found {} solution(s):", report.solutions.len());
        print_solutions(&report.solutions);
    }

    let passed = case.check(outcome).unwrap_or(true);
    if case.check(outcome).is_some() {
        println!("Status: {}", if passed { "PASS" } else { "FAIL" });
    }
    Ok(passed)
}

/// Runs every problem file below `dir`. Returns `(passed, total)`.
///
/// YAML descriptions are checked against their expectation. DIMACS files
/// carry no expectation and pass when the search completes with every model
/// verified.
pub(crate) fn run_suite(dir: &Path, common: &CommonOptions) -> anyhow::Result<(usize, usize)> {
    let files: Vec<_> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("cnf" | "dimacs" | "yaml" | "yml")
            )
        })
        .collect();

    if files.is_empty() {
        bail!("no .cnf or .yaml files found in {}", dir.display());
    }
    info!(count = files.len(), dir = %dir.display(), "running suite");

    let mut passed = 0;

    for path in &files {
        println!("\n{}", "=".repeat(50));
        println!("Running {}", path.display());
        println!("{}", "=".repeat(50));

        let result = if is_yaml(path) {
            run_test_case(path, common)
        } else {
            let mut registry = VariableRegistry::new();
            load_formula(path, &mut registry).and_then(|formula| {
                let report = solve(&formula, common)?;
                println!("Result: {}", report.outcome());
                println!("Solutions found: {}", report.solutions.len());
                println!("Execution time: {:.6}s", report.elapsed.as_secs_f64());
                Ok(true)
            })
        };

        match result {
            Ok(true) => passed += 1,
            Ok(false) => {}
            Err(e) => warn!(path = %path.display(), "failed: {e:#}"),
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("Results: {passed}/{} tests passed", files.len());
    println!("{}", "=".repeat(50));

    Ok((passed, files.len()))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Times both engines on one formula and checks their enumerations agree.
/// Returns whether they agree.
pub(crate) fn compare(formula: &Formula, print_solution: bool) -> bool {
    println!("Variables: {}", formula.num_vars());
    println!("Clauses: {}", formula.len());

    let (first, first_time) = timed(|| find_first_solution(formula));
    let (dpll, dpll_time) = timed(|| find_all_solutions_dpll(formula));
    let (backtracking, backtracking_time) = timed(|| find_all_solutions_backtracking(formula));

    println!("\n=========================[ Comparison ]==========================");
    stat_line(
        "DPLL first solution",
        format!(
            "{} in {:.6}s",
            if first.is_some() { "SAT" } else { "UNSAT" },
            first_time.as_secs_f64()
        ),
    );
    stat_line(
        "DPLL all solutions",
        format!("{} in {:.6}s", dpll.len(), dpll_time.as_secs_f64()),
    );
    stat_line(
        "Backtracking all solutions",
        format!("{} in {:.6}s", backtracking.len(), backtracking_time.as_secs_f64()),
    );
    if dpll_time.as_secs_f64() > 0.0 {
        stat_line(
            "Backtracking / DPLL time",
            format!(
                "{:.2}x",
                backtracking_time.as_secs_f64() / dpll_time.as_secs_f64()
            ),
        );
    }

    let agree = solutions_agree(&dpll, &backtracking);
    stat_line("Enumerations agree", agree);
    println!("=================================================================");

    if print_solution {
        if let Some(first) = &first {
            println!("DPLL first: {first}");
        }
        println!("DPLL:");
        print_solutions(&dpll);
        println!("Backtracking:");
        print_solutions(&backtracking);
    }

    if !agree {
        warn!("DPLL and backtracking enumerations differ");
    }
    agree
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let time = Instant::now();
    let value = f();
    (value, time.elapsed())
}

const fn satisfiability(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Sat => "SATISFIABLE",
        Outcome::Unsat => "UNSATISFIABLE",
    }
}

fn print_solutions(solutions: &[Assignment]) {
    for (i, solution) in solutions.iter().enumerate() {
        println!("  Solution {}: {solution}", i + 1);
    }
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    let mib = |bytes: usize| bytes as f64 / (1024.0 * 1024.0);
    Some((mib(allocated), mib(resident)))
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>30}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<28} {value:>16} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(parse_time: Duration, formula: &Formula, solver: SolverType, report: &Report) {
    let elapsed = report.elapsed.as_secs_f64();
    let s = &report.stats;

    println!("\n=======================[ Problem Statistics ]=====================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", formula.num_vars());
    stat_line("Clauses", formula.len());
    stat_line("Literals", formula.num_literals());

    println!("========================[ Search Statistics ]=====================");
    stat_line("Solver", solver);
    stat_line_with_rate("Decisions", s.decisions, elapsed);
    stat_line_with_rate("Propagations", s.propagations, elapsed);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed);
    stat_line_with_rate("Pruned", s.pruned, elapsed);
    stat_line("Solutions", s.solutions);
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed:.3}"));
    println!("==================================================================");
}
