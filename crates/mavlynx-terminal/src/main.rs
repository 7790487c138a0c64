//! MavLynx Terminal Main Entry Point
//! Uses bpaf for CLI parsing and delegates execution to the handlers.

use anyhow::Result;
use bpaf::{Args, Parser};

use mavlynx_terminal::cli::{cli_parser, Commands, GlobalArgs};
use mavlynx_terminal::{handlers, logging};

/// Print a friendly usage message when no command is provided
fn print_usage() {
    eprintln!(
        "usage: mavlynx [-v] [-c CONFIG] COMMAND [OPTIONS]

commands:
    shell       Interactive shell over all five tabs
    tour        Walk through every tab and its actions
    search      Search the alumni directory
    housing     List housing matching the given filters
    version     Show version information

run 'mavlynx COMMAND --help' for command-specific options"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    if raw_args.len() == 1 {
        print_usage();
        std::process::exit(0);
    }

    let args: GlobalArgs = match cli_parser().to_options().run_inner(Args::current_args()) {
        Ok(args) => args,
        Err(e) => {
            // Help and version requests exit with code 0
            if e.clone().exit_code() == 0 {
                print!("{e:?}");
                std::process::exit(0);
            }
            print_usage();
            std::process::exit(1);
        }
    };

    logging::init(args.verbose);
    let config = handlers::load_config(args.config.as_deref())?;
    tracing::debug!(?config, "Starting");

    let mut stdout = std::io::stdout();
    match args.command {
        Commands::Shell => handlers::handle_shell(config, &mut stdout).await,
        Commands::Tour => handlers::handle_tour(config, &mut stdout).await,
        Commands::Search { query } => handlers::handle_search(config, &query, &mut stdout).await,
        Commands::Housing(housing) => {
            handlers::handle_housing(config, &housing, &mut stdout).await
        }
        Commands::Version => handlers::handle_version(&mut stdout),
    }
}
