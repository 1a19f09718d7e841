//! # sat-enum
//!
//! `sat-enum` is a command-line front end for the CNF solving engines in the
//! `sat_enum` library.
//!
//! ## Usage
//!
//! ```sh
//! sat-enum [-v...] <SUBCOMMAND>
//! ```
//!
//! -   **`file <PATH>`**: solve a DIMACS CNF file.
//! -   **`text --input "<cnf>"`**: solve DIMACS text given inline.
//! -   **`yaml <PATH>`**: run a YAML test description and check its expected result.
//! -   **`suite [DIR]`**: run every `.cnf` and `.yaml` file below a directory.
//! -   **`compare <PATH>`**: time DPLL against backtracking and check that their
//!     enumerations agree.
//! -   **`random`**: generate a random k-CNF formula and solve it.
//! -   **`completions <SHELL>`**: print shell completions.
//!
//! Solving subcommands accept `--solver dpll|backtracking`, `--all` to
//! enumerate every model, `--print-solution`, `--verify <bool>` and
//! `--stats <bool>`.
//!
//! ## Example Invocations
//!
//! ```sh
//! # First model with DPLL
//! sat-enum file problem.cnf
//!
//! # Every model with the backtracking enumerator
//! sat-enum file problem.cnf --solver backtracking --print-solution
//!
//! # Debug logging while comparing engines
//! sat-enum -vv compare tests/implication.yaml
//! ```

mod command_line {
    pub(crate) mod cli;
    pub(crate) mod runner;
}

use crate::command_line::cli::{Cli, Commands};
use crate::command_line::runner;
use clap::{CommandFactory, Parser};
use sat_enum::sat::dimacs;
use sat_enum::sat::generator::{GeneratorConfig, random_formula};
use sat_enum::sat::registry::VariableRegistry;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::File { path, common } => {
            let time = Instant::now();
            let mut registry = VariableRegistry::new();
            let dimacs = dimacs::parse_file(&path, &mut registry)?;
            let parse_time = time.elapsed();

            let label = path.display().to_string();
            runner::solve_and_report(&dimacs.formula, &common, Some(&label), parse_time)?;
        }

        Commands::Text { input, common } => {
            let time = Instant::now();
            // Accept a literal "\n" as typed on a shell command line.
            let input = input.replace("\\n", "\n");
            let mut registry = VariableRegistry::new();
            let dimacs = dimacs::parse_str(&input, &mut registry)?;
            let parse_time = time.elapsed();

            runner::solve_and_report(&dimacs.formula, &common, None, parse_time)?;
        }

        Commands::Yaml { path, common } => {
            if !runner::run_test_case(&path, &common)? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Suite { dir, common } => {
            let (passed, total) = runner::run_suite(&dir, &common)?;
            if passed != total {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Compare {
            path,
            print_solution,
        } => {
            let mut registry = VariableRegistry::new();
            let formula = runner::load_formula(&path, &mut registry)?;
            println!("Comparing engines on {}", path.display());
            if !runner::compare(&formula, print_solution) {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Random {
            vars,
            clauses,
            width,
            seed,
            common,
        } => {
            let formula = random_formula(GeneratorConfig {
                variables: vars,
                clauses,
                width,
                seed,
            });
            let label = format!(
                "random {width}-CNF, {vars} variables, {clauses} clauses, seed {seed}"
            );
            runner::solve_and_report(&formula, &common, Some(&label), Duration::ZERO)?;
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}
