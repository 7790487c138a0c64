//! # Command Handlers
//!
//! One handler per CLI subcommand. Handlers build on [`AppCore`] and write
//! rendered text to the given writer.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use mavlynx_app::{AppConfig, AppCore, Tab};

use crate::cli::HousingArgs;
use crate::shell::{Shell, Step, TerminalLinkOpener};

/// Lines the `tour` command feeds to the shell
pub const TOUR: &[&str] = &[
    "toggle 1.1",
    "toggle 1.2",
    "toggle 1.3",
    "link 1.1",
    "save",
    "plan 2",
    "tab networking",
    "query engineering",
    "submit",
    "connect 3",
    "back",
    "know-more 1",
    "back",
    "join 3",
    "tab campus",
    "tap 1",
    "close",
    "sub studyRooms",
    "slot 2",
    "back",
    "tab exploration",
    "location elm",
    "max-price 1480",
    "room-type 1-bedroom",
    "apply-filters",
    "apply 2",
    "back",
    "sub foodRec",
    "tab home",
];

/// Load the configuration file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = AppConfig::from_toml_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

/// App over the configured mock catalog, opening links through `links`
pub fn build_app(config: AppConfig, links: TerminalLinkOpener) -> AppCore {
    let source = Arc::new(config.mock_catalog());
    AppCore::new(config, source, Box::new(links))
}

/// Shell over a fresh app; links it opens are printed with its output
pub fn build_shell(config: AppConfig) -> Shell {
    let links = TerminalLinkOpener::default();
    Shell::with_links(build_app(config, links.clone()), links)
}

/// `shell`: read commands from stdin until EOF or `quit`
pub async fn handle_shell(config: AppConfig, out: &mut impl Write) -> Result<()> {
    let mut shell = build_shell(config);
    write!(out, "{}", shell.start().await)?;
    writeln!(out, "type 'help' for commands")?;
    out.flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(out, "mavlynx> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            break;
        };
        match shell.run_line(&line).await {
            Step::Output(text) => write!(out, "{text}")?,
            Step::Quit => break,
        }
    }
    writeln!(out)?;
    Ok(())
}

/// `tour`: run the scripted walkthrough, echoing each command
pub async fn handle_tour(config: AppConfig, out: &mut impl Write) -> Result<()> {
    let mut shell = build_shell(config);
    write!(out, "{}", shell.start().await)?;
    for line in TOUR {
        writeln!(out, "\nmavlynx> {line}")?;
        if let Step::Output(text) = shell.run_line(line).await {
            write!(out, "{text}")?;
        }
    }
    let activity = shell.app().activity();
    writeln!(out, "\n{} placeholder actions recorded:", activity.len())?;
    for intent in activity {
        writeln!(out, "  - would {intent}")?;
    }
    Ok(())
}

/// `search QUERY`: one-shot alumni search
pub async fn handle_search(config: AppConfig, query: &str, out: &mut impl Write) -> Result<()> {
    let mut app = build_app(config, TerminalLinkOpener::default());
    app.select_tab(Tab::Networking).await;
    let screen = app
        .networking_mut()
        .context("networking screen failed to mount")?;
    if let Some(err) = screen.directory().error() {
        anyhow::bail!(err.user_message());
    }
    screen.set_query(query);
    let results = screen.submit_search();
    if results.is_empty() {
        writeln!(out, "No alumni match \"{query}\"")?;
    }
    for alumnus in results {
        writeln!(
            out,
            "#{} {} - {}, {}",
            alumnus.id, alumnus.name, alumnus.field_of_study, alumnus.industry
        )?;
    }
    Ok(())
}

/// `housing`: one-shot filtered listing
pub async fn handle_housing(
    config: AppConfig,
    args: &HousingArgs,
    out: &mut impl Write,
) -> Result<()> {
    let mut app = build_app(config, TerminalLinkOpener::default());
    app.select_tab(Tab::Exploration).await;
    let screen = app
        .exploration_mut()
        .context("exploration screen failed to mount")?;
    if let Some(err) = screen.housing().error() {
        anyhow::bail!(err.user_message());
    }
    if let Some(location) = &args.location {
        screen.set_location(location.as_str());
    }
    if let Some(max_price) = args.max_price {
        let stored = screen.set_max_price(max_price);
        if stored != max_price {
            writeln!(out, "max price adjusted to ${stored}")?;
        }
    }
    if let Some(room_type) = args.room_type {
        screen.set_room_type(room_type);
    }
    let count = screen.apply_filters();
    writeln!(
        out,
        "{count} listing(s), {}",
        screen.applied_filter().price_range_label()
    )?;
    for listing in screen.visible_housing() {
        writeln!(
            out,
            "#{} {} - ${}/month, {} sq ft, {} ({})",
            listing.id,
            listing.address,
            listing.rent,
            listing.size,
            listing.room_type.label(),
            listing.amenities_line()
        )?;
    }
    Ok(())
}

/// `version`
pub fn handle_version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "mavlynx {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavlynx_app::RoomType;

    fn instant() -> AppConfig {
        AppConfig {
            fetch_latency_ms: 0,
            ..AppConfig::default()
        }
    }

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_search_prints_matches() {
        let mut buf = Vec::new();
        handle_search(instant(), "tech", &mut buf).await.unwrap();
        assert_eq!(
            text(buf),
            "#1 John Doe - Computer Science, Technology\n"
        );
    }

    #[tokio::test]
    async fn test_empty_search() {
        let mut buf = Vec::new();
        handle_search(instant(), "", &mut buf).await.unwrap();
        assert_eq!(text(buf), "No alumni match \"\"\n");
    }

    #[tokio::test]
    async fn test_housing_filters() {
        let mut buf = Vec::new();
        let args = HousingArgs {
            location: None,
            max_price: Some(1250),
            room_type: Some(RoomType::All),
        };
        handle_housing(instant(), &args, &mut buf).await.unwrap();
        let out = text(buf);
        assert!(out.starts_with("max price adjusted to $1300\n2 listing(s), $0 - $1300\n"));
        assert!(out.contains("#1 123 Main St"));
        assert!(out.contains("#3 789 Oak St"));
        assert!(!out.contains("456 Elm St"));
    }

    #[tokio::test]
    async fn test_search_reports_fetch_failure() {
        let config = AppConfig {
            fail_resources: vec![mavlynx_app::Resource::Alumni],
            ..instant()
        };
        let mut buf = Vec::new();
        let err = handle_search(config, "tech", &mut buf).await.unwrap_err();
        assert!(err.to_string().contains("failed to fetch alumni"));
    }

    #[tokio::test]
    async fn test_tour_records_every_placeholder() {
        let mut buf = Vec::new();
        handle_tour(instant(), &mut buf).await.unwrap();
        let out = text(buf);
        assert!(out.contains("5 placeholder actions recorded:"));
        assert!(out.contains("would join club: Art Collective"));
        assert!(out.contains("Your phone plan: Standard Plan"));
        assert!(out.contains(
            "mavlynx> link 1.1\n-> open in your browser: https://studentaid.gov/h/apply-for-aid/fafsa\n"
        ));
        assert!(!out.contains("! ["));
    }

    #[test]
    fn test_missing_config_file_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/mavlynx.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }

    #[test]
    fn test_no_config_file_means_defaults() {
        assert_eq!(load_config(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_version_line() {
        let mut buf = Vec::new();
        handle_version(&mut buf).unwrap();
        assert!(text(buf).starts_with("mavlynx "));
    }
}
