//! # Line Shell
//!
//! One command per line, e.g. `tab campus`, `tap 2`, `toggle 1.3`. After
//! every command the current screen is re-rendered.
//!
//! Holds, checklist items, links and plans are addressed by their 1-based
//! position as shown on screen; departments, rooms, listings, alumni and
//! clubs by their `#id`.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use mavlynx_app::{
    AppCommand, AppCore, AppError, CampusScreen, CampusTab, EssentialsScreen, ExplorationScreen,
    ExplorationTab, LinkOpener, NetworkingScreen, RoomType, Tab,
};

use crate::render;

/// Help text for the `help` command
pub const HELP: &str = "\
navigation:  tab NAME|1-5   1..5   next   prev   back   forward   show   reload
sub-tabs:    sub departments|studyRooms|housing|foodRec
essentials:  toggle H.I   link H.L   save   plan N
networking:  query TEXT   submit   connect ID   know-more ID   join ID
campus:      tap ID   close   slot ID
exploration: location TEXT   max-price N   room-type TYPE   apply-filters   apply ID
other:       help   quit";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Print the command list
    Help,
    /// Leave the shell
    Quit,
    /// Re-render without changing anything
    Show,
    /// Select a tab
    Tab(Tab),
    /// Next tab in bar order
    Next,
    /// Previous tab in bar order
    Prev,
    /// Close the detail view or go back
    Back,
    /// Go forward after going back
    Forward,
    /// Re-fetch the current tab's lists
    Reload,
    /// Switch sub-tab on Campus or Exploration
    SubTab(String),
    /// Tick or untick a checklist item
    Toggle {
        /// Hold index
        hold: usize,
        /// Item index
        item: usize,
    },
    /// Open a hold link
    Link {
        /// Hold index
        hold: usize,
        /// Link index
        link: usize,
    },
    /// Save checklist progress
    Save,
    /// Apply for a phone plan
    Plan(usize),
    /// Type into the alumni search bar
    Query(String),
    /// Submit the alumni search
    Submit,
    /// Connect with an alumnus
    Connect(u32),
    /// Open club details
    KnowMore(u32),
    /// Join a club
    Join(u32),
    /// Tap a department marker
    Tap(u32),
    /// Close the room info overlay
    Close,
    /// Apply for a study room slot
    Slot(u32),
    /// Set the housing location filter
    Location(String),
    /// Move the max-price slider
    MaxPrice(u32),
    /// Pick a room type
    RoomType(RoomType),
    /// Commit the housing filter form
    ApplyFilters,
    /// Apply for a housing listing
    Apply(u32),
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::InvalidInput(message.into())
}

fn number<T: std::str::FromStr>(word: &str, arg: &str) -> Result<T, AppError> {
    arg.parse()
        .map_err(|_| invalid(format!("{word} expects a number, got '{arg}'")))
}

/// 1-based position shown on screen to a 0-based index
fn position(word: &str, arg: &str) -> Result<usize, AppError> {
    match number::<usize>(word, arg)? {
        0 => Err(invalid(format!("{word} positions start at 1"))),
        n => Ok(n - 1),
    }
}

/// `H.I` pair of positions
fn pair(word: &str, arg: &str) -> Result<(usize, usize), AppError> {
    let (a, b) = arg
        .split_once('.')
        .ok_or_else(|| invalid(format!("{word} expects H.I, got '{arg}'")))?;
    Ok((position(word, a)?, position(word, b)?))
}

fn required<'a>(word: &str, rest: &'a str, what: &str) -> Result<&'a str, AppError> {
    if rest.is_empty() {
        Err(invalid(format!("{word} expects {what}")))
    } else {
        Ok(rest)
    }
}

impl ShellCommand {
    /// Parse one line
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let needs_arg = |what: &str| required(word, rest, what);

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "show" | "" => Self::Show,
            "tab" => Self::Tab(needs_arg("a tab name")?.parse()?),
            "next" => Self::Next,
            "prev" => Self::Prev,
            "back" => Self::Back,
            "forward" => Self::Forward,
            "reload" | "retry" => Self::Reload,
            "sub" => Self::SubTab(needs_arg("a sub-tab name")?.to_string()),
            "toggle" => {
                let (hold, item) = pair(word, needs_arg("H.I")?)?;
                Self::Toggle { hold, item }
            }
            "link" => {
                let (hold, link) = pair(word, needs_arg("H.L")?)?;
                Self::Link { hold, link }
            }
            "save" => Self::Save,
            "plan" => Self::Plan(position(word, needs_arg("a plan number")?)?),
            // An empty query is meaningful: it clears the search bar
            "query" => Self::Query(rest.to_string()),
            "submit" => Self::Submit,
            "connect" => Self::Connect(number(word, needs_arg("an alumnus id")?)?),
            "know-more" => Self::KnowMore(number(word, needs_arg("a club id")?)?),
            "join" => Self::Join(number(word, needs_arg("a club id")?)?),
            "tap" => Self::Tap(number(word, needs_arg("a department id")?)?),
            "close" => Self::Close,
            "slot" => Self::Slot(number(word, needs_arg("a room id")?)?),
            "location" => Self::Location(rest.to_string()),
            "max-price" => Self::MaxPrice(number(word, needs_arg("a price")?)?),
            "room-type" => Self::RoomType(needs_arg("a room type")?.parse()?),
            "apply-filters" => Self::ApplyFilters,
            "apply" => Self::Apply(number(word, needs_arg("a listing id")?)?),
            digit if digit.len() == 1 && digit.chars().all(|c| c.is_ascii_digit()) => {
                Self::Tab(digit.parse()?)
            }
            _ => return Err(invalid(format!("unknown command '{word}', try 'help'"))),
        };
        Ok(command)
    }
}

/// What the shell wants the caller to do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this and read the next line
    Output(String),
    /// Stop reading
    Quit,
}

/// Link opener for the terminal: queues URLs for the shell to print
/// alongside the next screen
#[derive(Debug, Clone, Default)]
pub struct TerminalLinkOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl TerminalLinkOpener {
    /// URLs opened since the last call, oldest first
    pub fn take(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|mut opened| std::mem::take(&mut *opened))
            .unwrap_or_default()
    }
}

impl LinkOpener for TerminalLinkOpener {
    fn open(&self, url: &str) {
        tracing::info!(url, "Opening external link");
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
    }
}

/// Shell state: the app it drives and the links it opened
#[derive(Debug)]
pub struct Shell {
    app: AppCore,
    links: TerminalLinkOpener,
}

fn wrong_tab(word: &str, tab: Tab) -> AppError {
    invalid(format!("'{word}' is only available on the {tab} tab"))
}

impl Shell {
    /// Wrap an app; call [`start`](Self::start) before the first line
    pub fn new(app: AppCore) -> Self {
        Self::with_links(app, TerminalLinkOpener::default())
    }

    /// Wrap an app whose links go through `links`; opened URLs are printed
    /// before the screen that follows
    pub fn with_links(app: AppCore, links: TerminalLinkOpener) -> Self {
        Self { app, links }
    }

    /// Mount the initial tab and render it
    pub async fn start(&mut self) -> String {
        self.app.start().await;
        render::app(&self.app)
    }

    /// The driven app
    pub fn app(&self) -> &AppCore {
        &self.app
    }

    /// Parse and run one line
    pub async fn run_line(&mut self, line: &str) -> Step {
        let command = match ShellCommand::parse(line) {
            Ok(command) => command,
            Err(err) => return Step::Output(format!("{}\n", render::error_line(&err))),
        };
        match command {
            ShellCommand::Quit => Step::Quit,
            ShellCommand::Help => Step::Output(format!("{HELP}\n")),
            command => {
                let text = match self.run(command).await {
                    Ok(()) => render::app(&self.app),
                    Err(err) => format!("{}\n", render::error_line(&err)),
                };
                Step::Output(self.opened_links() + &text)
            }
        }
    }

    fn opened_links(&self) -> String {
        let mut out = String::new();
        for url in self.links.take() {
            let _ = writeln!(out, "-> open in your browser: {url}");
        }
        out
    }

    fn require(&self, word: &str, tab: Tab) -> Result<(), AppError> {
        if self.app.current_tab() == tab {
            Ok(())
        } else {
            Err(wrong_tab(word, tab))
        }
    }

    async fn run(&mut self, command: ShellCommand) -> Result<(), AppError> {
        let commands: Vec<AppCommand> = match command {
            ShellCommand::Help | ShellCommand::Quit | ShellCommand::Show => Vec::new(),
            ShellCommand::Tab(tab) => {
                self.app.select_tab(tab).await;
                Vec::new()
            }
            ShellCommand::Next => {
                self.app.next_tab().await;
                Vec::new()
            }
            ShellCommand::Prev => {
                self.app.prev_tab().await;
                Vec::new()
            }
            ShellCommand::Back => {
                self.app.back().await;
                Vec::new()
            }
            ShellCommand::Forward => {
                self.app.forward().await;
                Vec::new()
            }
            ShellCommand::Reload => {
                let outcomes = self.app.reload_current().await;
                tracing::debug!(?outcomes, "Reloaded");
                Vec::new()
            }
            ShellCommand::SubTab(name) => {
                self.set_sub_tab(&name)?;
                Vec::new()
            }
            other => self.screen_action(other)?,
        };
        self.app.execute(commands).await
    }

    fn set_sub_tab(&mut self, name: &str) -> Result<(), AppError> {
        match self.app.current_tab() {
            Tab::Campus => {
                let sub: CampusTab = name.parse()?;
                if let Some(screen) = self.app.campus_mut() {
                    screen.set_active_tab(sub);
                }
                Ok(())
            }
            Tab::Exploration => {
                let sub: ExplorationTab = name.parse()?;
                if let Some(screen) = self.app.exploration_mut() {
                    screen.set_active_tab(sub);
                }
                Ok(())
            }
            _ => Err(AppError::UnknownSubTab(name.to_string())),
        }
    }

    fn not_mounted(tab: Tab) -> AppError {
        AppError::UnknownRoute(format!("{tab} (not loaded)"))
    }

    fn screen_action(&mut self, command: ShellCommand) -> Result<Vec<AppCommand>, AppError> {
        match command {
            // Essentials
            ShellCommand::Toggle { hold, item } => {
                self.require("toggle", Tab::Essentials)?;
                let screen = self
                    .app
                    .essentials_mut()
                    .ok_or_else(|| Self::not_mounted(Tab::Essentials))?;
                screen.toggle(hold, item)?;
                Ok(Vec::new())
            }
            ShellCommand::Link { hold, link } => {
                self.require("link", Tab::Essentials)?;
                self.essentials()?.open_link(hold, link)
            }
            ShellCommand::Save => {
                self.require("save", Tab::Essentials)?;
                Ok(self.essentials()?.save_progress())
            }
            ShellCommand::Plan(index) => {
                self.require("plan", Tab::Essentials)?;
                self.essentials()?.apply_for_plan(index)
            }

            // Networking
            ShellCommand::Query(text) => {
                self.require("query", Tab::Networking)?;
                self.networking_mut()?.set_query(text);
                Ok(Vec::new())
            }
            ShellCommand::Submit => {
                self.require("submit", Tab::Networking)?;
                self.networking_mut()?.submit_search();
                Ok(Vec::new())
            }
            ShellCommand::Connect(id) => {
                self.require("connect", Tab::Networking)?;
                self.networking_mut()?.connect(id)
            }
            ShellCommand::KnowMore(id) => {
                self.require("know-more", Tab::Networking)?;
                self.networking_mut()?.know_more(id)
            }
            ShellCommand::Join(id) => {
                self.require("join", Tab::Networking)?;
                self.networking_mut()?.join_club(id)
            }

            // Campus
            ShellCommand::Tap(id) => {
                self.require("tap", Tab::Campus)?;
                self.campus_mut()?.tap_marker(id)?;
                Ok(Vec::new())
            }
            ShellCommand::Close => {
                self.require("close", Tab::Campus)?;
                self.campus_mut()?.close_modal();
                Ok(Vec::new())
            }
            ShellCommand::Slot(id) => {
                self.require("slot", Tab::Campus)?;
                self.campus_mut()?.apply_for_slot(id)
            }

            // Exploration
            ShellCommand::Location(text) => {
                self.require("location", Tab::Exploration)?;
                self.exploration_mut()?.set_location(text);
                Ok(Vec::new())
            }
            ShellCommand::MaxPrice(value) => {
                self.require("max-price", Tab::Exploration)?;
                self.exploration_mut()?.set_max_price(value);
                Ok(Vec::new())
            }
            ShellCommand::RoomType(room_type) => {
                self.require("room-type", Tab::Exploration)?;
                self.exploration_mut()?.set_room_type(room_type);
                Ok(Vec::new())
            }
            ShellCommand::ApplyFilters => {
                self.require("apply-filters", Tab::Exploration)?;
                let visible = self.exploration_mut()?.apply_filters();
                tracing::debug!(visible, "Housing filters applied");
                Ok(Vec::new())
            }
            ShellCommand::Apply(id) => {
                self.require("apply", Tab::Exploration)?;
                self.exploration_mut()?.apply_for_housing(id)
            }

            ShellCommand::Help
            | ShellCommand::Quit
            | ShellCommand::Show
            | ShellCommand::Tab(_)
            | ShellCommand::Next
            | ShellCommand::Prev
            | ShellCommand::Back
            | ShellCommand::Forward
            | ShellCommand::Reload
            | ShellCommand::SubTab(_) => Ok(Vec::new()),
        }
    }

    fn essentials(&self) -> Result<&EssentialsScreen, AppError> {
        self.app
            .essentials()
            .ok_or_else(|| Self::not_mounted(Tab::Essentials))
    }

    fn networking_mut(&mut self) -> Result<&mut NetworkingScreen, AppError> {
        self.app
            .networking_mut()
            .ok_or_else(|| Self::not_mounted(Tab::Networking))
    }

    fn campus_mut(&mut self) -> Result<&mut CampusScreen, AppError> {
        self.app
            .campus_mut()
            .ok_or_else(|| Self::not_mounted(Tab::Campus))
    }

    fn exploration_mut(&mut self) -> Result<&mut ExplorationScreen, AppError> {
        self.app
            .exploration_mut()
            .ok_or_else(|| Self::not_mounted(Tab::Exploration))
    }
}
