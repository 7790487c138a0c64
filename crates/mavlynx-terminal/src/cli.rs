//! Command-line parsing (bpaf combinators)

use bpaf::{command, construct, long, positional, short, Parser};
use std::path::PathBuf;

use mavlynx_app::RoomType;

/// Filters for the one-shot housing listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousingArgs {
    /// Address substring
    pub location: Option<String>,
    /// Upper rent bound, snapped to the slider step
    pub max_price: Option<u32>,
    /// Room type
    pub room_type: Option<RoomType>,
}

/// Top-level CLI commands
#[derive(Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive line shell
    Shell,
    /// Scripted walkthrough of every tab
    Tour,
    /// One-shot alumni search
    Search {
        /// Search text
        query: String,
    },
    /// One-shot filtered housing list
    Housing(HousingArgs),
    /// Print version information
    Version,
}

fn shell_command() -> impl Parser<Commands> {
    command("shell", bpaf::pure(Commands::Shell).to_options())
        .help("Interactive shell over all five tabs")
}

fn tour_command() -> impl Parser<Commands> {
    command("tour", bpaf::pure(Commands::Tour).to_options())
        .help("Walk through every tab and its actions")
}

fn search_command() -> impl Parser<Commands> {
    let query = positional::<String>("QUERY").help("Name, field of study or industry");
    let parser = construct!(Commands::Search { query });
    command("search", parser.to_options()).help("Search the alumni directory")
}

fn housing_parser() -> impl Parser<HousingArgs> {
    let location = long("location")
        .help("Only listings whose address contains TEXT")
        .argument::<String>("TEXT")
        .optional();
    let max_price = long("max-price")
        .help("Highest monthly rent")
        .argument::<u32>("N")
        .optional();
    let room_type = long("room-type")
        .help("all, studio, 1-bedroom or shared")
        .argument::<RoomType>("TYPE")
        .optional();
    construct!(HousingArgs {
        location,
        max_price,
        room_type,
    })
}

fn housing_command() -> impl Parser<Commands> {
    command(
        "housing",
        housing_parser().map(Commands::Housing).to_options(),
    )
    .help("List housing matching the given filters")
}

fn version_command() -> impl Parser<Commands> {
    command("version", bpaf::pure(Commands::Version).to_options())
        .help("Show version information")
}

fn commands_parser() -> impl Parser<Commands> {
    construct!([
        shell_command(),
        tour_command(),
        search_command(),
        housing_command(),
        version_command(),
    ])
}

/// Global flags plus the selected command
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalArgs {
    /// Debug-level logging
    pub verbose: bool,
    /// TOML configuration file
    pub config: Option<PathBuf>,
    /// What to run
    pub command: Commands,
}

/// Full command-line parser
pub fn cli_parser() -> impl Parser<GlobalArgs> {
    let verbose = short('v')
        .long("verbose")
        .help("Enable verbose logging")
        .switch();
    let config = long("config")
        .short('c')
        .help("Configuration file")
        .argument::<PathBuf>("CONFIG")
        .optional();
    let command = commands_parser();
    construct!(GlobalArgs {
        verbose,
        config,
        command,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpaf::Args;

    fn parse(args: &[&str]) -> GlobalArgs {
        cli_parser()
            .to_options()
            .run_inner(Args::from(args))
            .unwrap()
    }

    #[test]
    fn test_verbose_version() {
        let args = parse(&["--verbose", "version"]);
        assert!(args.verbose);
        assert_eq!(args.command, Commands::Version);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_config_and_shell() {
        let args = parse(&["-c", "mavlynx.toml", "shell"]);
        assert_eq!(args.config, Some(PathBuf::from("mavlynx.toml")));
        assert_eq!(args.command, Commands::Shell);
    }

    #[test]
    fn test_search_query() {
        let args = parse(&["search", "tech"]);
        assert_eq!(
            args.command,
            Commands::Search {
                query: "tech".to_string()
            }
        );
    }

    #[test]
    fn test_housing_filters() {
        let args = parse(&[
            "housing",
            "--location",
            "elm",
            "--max-price",
            "1500",
            "--room-type",
            "1-bedroom",
        ]);
        assert_eq!(
            args.command,
            Commands::Housing(HousingArgs {
                location: Some("elm".to_string()),
                max_price: Some(1500),
                room_type: Some(RoomType::OneBedroom),
            })
        );
    }

    #[test]
    fn test_housing_without_filters() {
        let args = parse(&["housing"]);
        assert_eq!(args.command, Commands::Housing(HousingArgs::default()));
    }

    #[test]
    fn test_bad_room_type_is_rejected() {
        let result = cli_parser()
            .to_options()
            .run_inner(Args::from(&["housing", "--room-type", "castle"]));
        assert!(result.is_err());
    }
}
