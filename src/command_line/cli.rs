#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;
use sudoku_engine::engine::corpus;
use sudoku_engine::engine::error::SudokuError;
use sudoku_engine::engine::grid::Grid;
use sudoku_engine::engine::selection::{FirstFit, ScoredSelection};
use sudoku_engine::engine::solver::{BacktrackingSolver, SolveStats};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-engine", version, about = "A Sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle corpus file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve every puzzle in a corpus file (one 81-character puzzle per
    /// line, `#` comments allowed).
    File {
        /// Path to the corpus file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle given as 81 characters on the command line.
    Text {
        /// Row-major puzzle text; digits 1-9 are givens, anything else is
        /// an unknown cell.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sdk` corpus file under a directory.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
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

/// Branching strategies the solver can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum SelectionType {
    /// Score cells by their own and their units' candidate counts, branch
    /// on the globally scarcest value.
    #[default]
    Scored,
    /// First cell with the fewest candidates, lowest value first.
    FirstFit,
}

impl Display for SelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scored => write!(f, "scored"),
            Self::FirstFit => write!(f, "first-fit"),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution against the Sudoku rules.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the completed grid when the puzzle is solved.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Specifies the branching strategy used when propagation stalls.
    #[arg(long, default_value_t = SelectionType::Scored)]
    pub(crate) selection: SelectionType,
}

/// Solves one puzzle with the configured strategy, timing the search.
pub(crate) fn run_solver(
    grid: &mut Grid,
    common: &CommonOptions,
) -> (Result<SolveStats, SudokuError>, Duration) {
    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let result = match common.selection {
        SelectionType::Scored => BacktrackingSolver::<ScoredSelection>::default().solve(grid),
        SelectionType::FirstFit => BacktrackingSolver::new(FirstFit).solve(grid),
    };
    let elapsed = time.elapsed();

    if common.debug {
        println!("Result: {result:?}");
        println!("Time: {elapsed:?}");
    }

    (result, elapsed)
}

/// Solves a puzzle and reports verification, stats and the verdict.
///
/// This function is a convenience wrapper around `run_solver`,
/// `verify_solution` and `print_stats`.
pub(crate) fn solve_and_report(
    mut grid: Grid,
    common: &CommonOptions,
    label: Option<&PathBuf>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let givens = grid.givens();
    if common.debug {
        println!("Puzzle:\n{grid}");
        println!("Givens: {givens}");
    }

    let (result, elapsed) = run_solver(&mut grid, common);

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    let solution = result.as_ref().ok().map(|_| &grid);

    if common.verify {
        verify_solution(solution);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            givens,
            result.as_ref().ok().copied().unwrap_or_default(),
            allocated_mib,
            resident_mib,
            common.print_solution,
            solution,
        );
    }
}

/// Solves every corpus file in a directory.
///
/// Walks the directory, parses each `.sdk` file as a corpus and solves
/// every puzzle in it.
///
/// # Errors
///
/// If a corpus file cannot be read or parsed.
pub(crate) fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sdk") {
            eprintln!("Skipping non-corpus file: {}", file_path.display());
            continue;
        }

        solve_file(&file_path, common)?;
    }

    Ok(())
}

/// Solves every puzzle in a single corpus file.
///
/// # Errors
///
/// If the file cannot be read or contains a malformed puzzle.
pub(crate) fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let grids = corpus::parse_file(path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    for grid in grids {
        solve_and_report(grid, common, Some(path), parse_time);
    }

    Ok(())
}

/// Checks a completed grid against the Sudoku rules and prints the result.
///
/// # Panics
///
/// If a claimed solution fails verification.
pub(crate) fn verify_solution(solution: Option<&Grid>) {
    if let Some(grid) = solution {
        let ok = grid.is_valid_solution();
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("NOT SOLVABLE");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    givens: usize,
    s: SolveStats,
    allocated: f64,
    resident: f64,
    print_solution: bool,
    solution: Option<&Grid>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", givens);
    stat_line("Unknown cells", 81 - givens);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Branches", s.branches, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line("Max search depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if let Some(grid) = solution {
        if print_solution {
            println!("Solution:\n{grid}");
        }
        println!("\nSOLVED");
    } else {
        println!("\nNOT SOLVABLE");
    }
}

/// Writes a completion script for `shell` to stdout.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
