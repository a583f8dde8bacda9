use std::fs::File;
use std::path::Path;

use env_logger::Env;

use crate::cli::commands::{Cli, Commands, CreateArgs, RenderArgs};
use crate::cli::output::format_board;
use crate::session::Session;

/// Wire up env_logger. The -d flag raises the default filter to debug;
/// an explicit RUST_LOG still wins.
pub fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default)).init();
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render(args) => cmd_render(args),
        Commands::Create(args) => cmd_create(args),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.filepath.is_file() {
        return Err(format!("file {} does not exist", args.filepath.display()).into());
    }
    render_board(&args.filepath)
}

fn cmd_create(args: CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.filepath.is_file() {
        return Err(format!(
            "file {} already exists, use render to open it",
            args.filepath.display()
        )
        .into());
    }
    if let Some(parent) = args.filepath.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(format!(
            "cannot create {}, directory does not exist",
            args.filepath.display()
        )
        .into());
    }
    File::create(&args.filepath)
        .map_err(|e| format!("cannot create {}: {}", args.filepath.display(), e))?;
    render_board(&args.filepath)
}

/// Open the board in a fresh session, print it, and close the session
/// again. Closing writes the board back in canonical form, which is also
/// what fills in a freshly created empty file.
fn render_board(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    let handle = session
        .open_board(path)
        .map_err(|e| format!("cannot render file {}: {}", path.display(), e))?;
    for line in format_board(&handle.board) {
        println!("{}", line);
    }
    session.close_all();
    Ok(())
}
