use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "compatibility-gen",
    about = "Keep compatibility-level comments on versioned API types in sync with their tags",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate tags and rewrite compatibility comments in place
    Generate(RunArgs),

    /// Validate tags and fail if any compatibility comment is out of date
    Check(RunArgs),
}

impl Commands {
    pub fn run_args(&self) -> &RunArgs {
        match self {
            Commands::Generate(args) | Commands::Check(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Go import paths to process (directories with --dir)
    #[arg(required = true, value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Treat arguments as package directories instead of running `go list`
    #[arg(long)]
    pub dir: bool,

    /// Working directory for `go list`
    #[arg(long, value_name = "PATH", conflicts_with = "dir")]
    pub go_workdir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
