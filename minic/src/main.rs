//! Mini-C CLI

use clap::{Parser, Subcommand};
use minic::ast::Program;
use minic::interp::{Environment, Interpreter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minic", version, about = "Mini-C - tree-walking evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a program tree produced by a front end
    Run {
        /// Serialized program (JSON) to execute
        file: PathBuf,
    },
    /// Load a program tree and resolve its handles without executing
    Check {
        /// Serialized program (JSON) to check
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run { file } => run_file(&file),
        Command::Check { file } => check_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;
    let mut interp = Interpreter::new(&program)?;
    interp.run()?;
    Ok(())
}

fn check_file(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let program = load_program(path)?;
    Environment::initialize(&program)?;
    println!("✓ {} resolves successfully", path.display());
    Ok(())
}

fn load_program(path: &PathBuf) -> minic::Result<Program> {
    let source = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}
