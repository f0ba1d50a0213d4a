//! Command-line harness for the Sudoku solver.
//!
//! Parses puzzles from the command line, corpus files or directories of
//! corpus files, solves them with a configurable branching strategy, and
//! reports verification, search statistics and memory usage.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-engine <path_to_corpus>
//! sudoku-engine text --input <81 characters>
//! sudoku-engine file --path <corpus.sdk>
//! sudoku-engine dir --path <directory>
//! sudoku-engine completions <shell>
//! ```
//!
//! Common flags: `--stats`, `--verify`, `--print-solution`, `--debug`,
//! `--selection {scored|first-fit}`.

mod command_line;

use clap::Parser;
use command_line::cli::{Cli, Commands, solve_and_report, solve_dir, solve_file};
use log::LevelFilter;
use sudoku_engine::engine::grid::Grid;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.common.debug);

    // A bare path without a subcommand is treated as a corpus file.
    if let Some(path) = cli.path.clone()
        && cli.command.is_none()
    {
        if let Err(e) = solve_file(&path, &cli.common) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let result = match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),

        Some(Commands::Text { input, common }) => match Grid::from_text(input.trim()) {
            Ok(grid) => {
                solve_and_report(grid, &common, None, std::time::Duration::ZERO);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        },

        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),

        Some(Commands::Completions { shell }) => {
            command_line::cli::print_completions(shell);
            Ok(())
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
