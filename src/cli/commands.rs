use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xban", about = concat!("[#] xban v", env!("CARGO_PKG_VERSION"), " - kanban boards in plain yaml"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Toggle debug mode
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a board file
    Render(RenderArgs),
    /// Create a new board file and render it
    Create(CreateArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Path to the board file
    pub filepath: PathBuf,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Path of the board file to create
    pub filepath: PathBuf,
}
