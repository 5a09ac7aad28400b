use clap::Parser;
use grid_search::{load_grid_description, search, SearchConfig, Strategy, StrategyParseError};
use std::path::PathBuf;
use std::process::ExitCode;

// Solves a grid description file with the strategy given on the command line, e.g.
//
//     cargo run --example solve_file -- demos/maps/sample.txt AS
//
// and prints the grid, the combined path through all reachable goals and its moves.

#[derive(Parser)]
#[command(name = "solve_file")]
#[command(about = "Route through every goal of a grid description file")]
struct Args {
    /// Grid description file
    file: PathBuf,

    /// DFS, BFS, GBFS, AS, WAS:<weight> or IDDFS:<max depth>
    #[arg(value_parser = parse_strategy)]
    strategy: Strategy,
}

fn parse_strategy(name: &str) -> Result<Strategy, StrategyParseError> {
    name.parse()
}

fn main() -> ExitCode {
    let args = Args::parse();
    let grid = match load_grid_description(&args.file) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}", grid);

    let result = match search(&grid, &args.strategy, &SearchConfig::default()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "{} {} {}",
        args.file.display(),
        args.strategy,
        result.visited_count
    );
    if result.reached.is_empty() {
        println!("No goal is reachable.");
        return ExitCode::SUCCESS;
    }
    for goal in &result.reached {
        println!("Reached goal {}", goal);
    }
    for goal in &result.unreached {
        println!("Could not reach goal {}", goal);
    }
    let moves: Vec<String> = result.directions.iter().map(|d| d.to_string()).collect();
    println!("[{}]", moves.join(", "));
    if let Some(stats) = result.iddfs_totals() {
        println!(
            "{} iterations, {} expansions in total",
            stats.iterations, stats.total_expansions
        );
    }
    ExitCode::SUCCESS
}
