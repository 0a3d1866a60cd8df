use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use fifteen_solver::engine::{Board, Path};
use fifteen_solver::utils::parse_puzzle;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Steps through a move string on a puzzle.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Puzzle file: `R C` on the first line, then the tiles
    puzzle_file: PathBuf,

    /// Moves to replay, e.g. `LLUR`
    moves: Path,
}

fn print_step(states: &[Board], path: &Path, step: usize) {
    println!("---------------------");
    match step.checked_sub(1).and_then(|i| path.moves().get(i)) {
        Some(mv) => println!("Step {}/{} ({})", step, path.len(), mv),
        None => println!("Step 0/{} (start)", path.len()),
    }
    println!("{}", states[step]);
    if step == path.len() {
        if states[step] == Board::goal(states[step].rows(), states[step].cols()) {
            println!("Goal reached.");
        } else {
            println!("End of path; the goal was not reached.");
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.puzzle_file)
        .with_context(|| format!("failed to read puzzle file {}", args.puzzle_file.display()))?;
    let start = parse_puzzle(&text).context("invalid puzzle")?;
    let states = start.replay(&args.moves).context("path cannot be replayed")?;

    let mut step = 0;
    print_step(&states, &args.moves, step);

    loop {
        print!("Enter for the next move, 'J<n>' to jump to step n, 'Q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let command = input.trim();

        if command.eq_ignore_ascii_case("q") {
            break;
        }

        if command.is_empty() {
            if step < args.moves.len() {
                step += 1;
                print_step(&states, &args.moves, step);
            } else {
                println!("Already at the last step.");
            }
            continue;
        }

        let target = command
            .strip_prefix(['J', 'j'])
            .and_then(|n| n.trim().parse::<usize>().ok());
        match target {
            Some(n) if n <= args.moves.len() => {
                step = n;
                print_step(&states, &args.moves, step);
            }
            Some(_) => println!("Step out of range: use 0 to {}.", args.moves.len()),
            None => println!("Invalid input. Press Enter, or use 'J<n>' or 'Q'."),
        }
    }
    Ok(())
}
