//! Command-line definitions for the `sat-enum` binary.

use clap::{ArgAction, Args, Parser, Subcommand};
use sat_enum::sat::solver::SolverType;
use std::path::PathBuf;

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sat-enum",
    version,
    about = "Decides CNF satisfiability and enumerates models"
)]
pub(crate) struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Specifies the subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as DIMACS text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run a YAML test description and compare against its expected outcome.
    Yaml {
        /// Path to the .yaml test description.
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run every .cnf and .yaml file below a directory.
    Suite {
        /// Directory to scan recursively.
        #[arg(default_value = "data")]
        dir: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Time the DPLL and backtracking engines on one problem and check that
    /// their enumerations agree.
    Compare {
        /// Path to a .cnf or .yaml problem.
        path: PathBuf,

        /// Print every model found by each engine.
        #[arg(short, long, default_value_t = false)]
        print_solution: bool,
    },

    /// Generate a random k-CNF formula and solve it.
    Random {
        /// Number of variables.
        #[arg(long, default_value_t = 8)]
        vars: usize,

        /// Number of clauses.
        #[arg(long, default_value_t = 30)]
        clauses: usize,

        /// Literals per clause.
        #[arg(long, default_value_t = 3)]
        width: usize,

        /// Seed for the generator.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every solving subcommand.
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// The engine to run.
    #[arg(long, value_enum, default_value_t = SolverType::Dpll)]
    pub solver: SolverType,

    /// Enumerate every model instead of stopping at the first. Always on for
    /// the backtracking engine.
    #[arg(short, long, default_value_t = false)]
    pub all: bool,

    /// Re-check every model against the formula before reporting it.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub verify: bool,

    /// Print problem and search statistics.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub stats: bool,

    /// Print the models found.
    #[arg(short, long, default_value_t = false)]
    pub print_solution: bool,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            solver: SolverType::Dpll,
            all: false,
            verify: true,
            stats: true,
            print_solution: false,
        }
    }
}

impl CommonOptions {
    /// Whether the run enumerates instead of stopping at the first model.
    pub(crate) fn enumerates(&self) -> bool {
        self.all || self.solver == SolverType::Backtracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_file_defaults() {
        let cli = Cli::parse_from(["sat-enum", "file", "problem.cnf"]);
        let Commands::File { path, common } = cli.command else {
            panic!("expected file subcommand");
        };
        assert_eq!(path, PathBuf::from("problem.cnf"));
        assert_eq!(common.solver, SolverType::Dpll);
        assert!(common.verify);
        assert!(!common.enumerates());
    }

    #[test]
    fn test_parse_backtracking_enumerates() {
        let cli = Cli::parse_from([
            "sat-enum",
            "-vv",
            "text",
            "--input",
            "1 0",
            "--solver",
            "backtracking",
            "--verify",
            "false",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Text { input, common } = cli.command else {
            panic!("expected text subcommand");
        };
        assert_eq!(input, "1 0");
        assert!(common.enumerates());
        assert!(!common.verify);
    }

    #[test]
    fn test_parse_random() {
        let cli = Cli::parse_from(["sat-enum", "random", "--vars", "4", "--seed", "9", "--all"]);
        let Commands::Random {
            vars,
            clauses,
            seed,
            common,
            ..
        } = cli.command
        else {
            panic!("expected random subcommand");
        };
        assert_eq!((vars, clauses, seed), (4, 30, 9));
        assert!(common.all);
    }
}
