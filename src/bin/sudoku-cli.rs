use clap::{Args, Parser, Subcommand};

use std::error::Error;
use std::fs;
use std::process;
use std::thread;
use std::time::Duration;

use sudoku_engine::Grid;
use sudoku_engine::stepper::{StepController, StepEvent, StepState};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => execute_check(args),
        Command::Solve(args) => execute_solve(args),
        Command::Trace(args) => execute_trace(args)
    }
}

fn load_grid(args: &PuzzleArgs) -> Result<Grid, Box<dyn Error>> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => match &args.puzzle {
            Some(puzzle) => puzzle.clone(),
            None => return Err("provide a puzzle string or --file".into())
        }
    };

    Ok(Grid::parse(&text)?)
}

fn execute_check(args: PuzzleArgs) -> Result<(), Box<dyn Error>> {
    let grid = load_grid(&args)?;
    let mut conflicts: Vec<_> = grid.conflicts().into_iter().collect();
    conflicts.sort();

    println!("{grid}");

    if conflicts.is_empty() {
        println!("No conflicts, {} clues.", grid.count_clues());
    }
    else {
        for (row, column) in &conflicts {
            println!("Conflict at row {row}, column {column}.");
        }

        println!("Total conflicting cells: {}", conflicts.len());
    }

    Ok(())
}

fn execute_solve(args: PuzzleArgs) -> Result<(), Box<dyn Error>> {
    let mut grid = load_grid(&args)?;

    if grid.solve()? {
        println!("{grid}");
    }
    else {
        println!("No solution exists.");
    }

    Ok(())
}

fn execute_trace(args: TraceArgs) -> Result<(), Box<dyn Error>> {
    let grid = load_grid(&args.puzzle)?;
    let mut controller = StepController::new(&grid);
    controller.start()?;

    while controller.state() == StepState::Running {
        match controller.step() {
            StepEvent::Placed { row, col, digit } =>
                println!("place {digit} at row {row}, column {col}"),
            StepEvent::Undone { row, col } =>
                println!("undo at row {row}, column {col}"),
            StepEvent::Solved => {
                println!("solved in {} steps", controller.steps());

                if let Some(solution) = controller.solution() {
                    println!("{solution}");
                }
            },
            StepEvent::Exhausted =>
                println!("no solution exists, exhausted in {} steps",
                    controller.steps()),
            StepEvent::Aborted | StepEvent::Waiting => { }
        }

        if args.delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.delay_ms));
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(name = "sudoku-cli", version,
    about = "Check, solve, and trace 9x9 Sudoku puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {

    /// Print the puzzle and report all conflicting cells
    Check(PuzzleArgs),

    /// Solve the puzzle with the backtracking solver
    Solve(PuzzleArgs),

    /// Print every placement and undo of the search, one line per step
    Trace(TraceArgs)
}

#[derive(Args)]
struct PuzzleArgs {

    /// The puzzle as nine rows of nine digits (0 for empty cells), or as a
    /// single 81-character block
    puzzle: Option<String>,

    /// Read the puzzle from a file instead
    #[arg(long, short)]
    file: Option<String>
}

#[derive(Args)]
struct TraceArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,

    /// Milliseconds to sleep between steps
    #[arg(long, default_value_t = 0)]
    delay_ms: u64
}
