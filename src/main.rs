use clap::{Parser, Subcommand};
use lit::areas::repository::Repository;
use lit::errors::{LitError, Result};
use std::io::Write;
use std::path::Path;

#[derive(Parser)]
#[command(name = "lit", about = "A single-user local version-control tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new repository in the current directory
    Init,
    /// Stage a file for the next commit
    Add { file: String },
    /// Record the staged changes as a new commit
    Commit { message: String },
    /// Unstage a file and stage its removal
    Rm { file: String },
    /// Show the active branch's history
    Log,
    /// Show every commit ever made
    GlobalLog,
    /// Print the ids of commits with the given message
    Find { message: String },
    /// Show branches, staged changes and working-tree drift
    Status,
    /// Create a branch at the current commit
    Branch { name: String },
    /// Delete a branch pointer
    RmBranch { name: String },
    /// Move the active branch to a commit and restore its snapshot
    Reset { commit_id: String },
    /// Merge a branch into the active one
    Merge { branch: String },
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let path = std::env::current_dir()?.into_boxed_path();

    // `checkout -- <file>` needs the literal `--` operand, which clap
    // consumes as its escape token, so checkout is dispatched from the raw
    // arguments.
    let outcome = if args.get(1).map(String::as_str) == Some("checkout") {
        run_checkout(&args[2..], path)
    } else {
        run(Cli::parse().command, path)
    };

    // Failures are one printed line and a zero exit status.
    if let Err(err) = outcome {
        println!("{}", err);
    }
    Ok(())
}

fn stdout() -> Box<dyn Write> {
    Box::new(std::io::stdout())
}

fn run(command: Command, path: Box<Path>) -> Result<()> {
    if let Command::Init = command {
        return Repository::new(path, stdout()).init();
    }

    let mut repository = Repository::open(path, stdout())?;
    match command {
        Command::Init => unreachable!("handled above"),
        Command::Add { file } => repository.add(&file),
        Command::Commit { message } => repository.commit(&message),
        Command::Rm { file } => repository.rm(&file),
        Command::Log => repository.log(),
        Command::GlobalLog => repository.global_log(),
        Command::Find { message } => repository.find(&message),
        Command::Status => repository.status(),
        Command::Branch { name } => repository.branch(&name),
        Command::RmBranch { name } => repository.rm_branch(&name),
        Command::Reset { commit_id } => repository.reset(&commit_id),
        Command::Merge { branch } => repository.merge(&branch),
    }
}

fn run_checkout(operands: &[String], path: Box<Path>) -> Result<()> {
    let mut repository = Repository::open(path, stdout())?;
    match operands {
        [branch] if branch != "--" => repository.checkout_branch(branch),
        [separator, file] if separator == "--" => repository.checkout_file(file),
        [commit_id, separator, file] if separator == "--" => {
            repository.checkout_file_at(commit_id, file)
        }
        _ => Err(LitError::invalid_argument("Incorrect operands.")),
    }
}
