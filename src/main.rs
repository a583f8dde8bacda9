use clap::Parser;
use xban::cli::commands::Cli;
use xban::cli::handlers;

fn main() {
    let cli = Cli::parse();
    handlers::init_logging(cli.debug);

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
