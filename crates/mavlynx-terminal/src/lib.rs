//! # MavLynx Terminal
//!
//! Terminal front-end for the MavLynx orientation app: command-line
//! parsing, logging setup, a line shell over [`mavlynx_app::AppCore`] and a
//! plain-text renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │    mavlynx-terminal     │  ← THIS CRATE
//! │  cli · shell · render   │
//! └───────────┬─────────────┘
//!             │
//!             ↓
//! ┌─────────────────────────┐
//! │       mavlynx-app       │
//! │  AppCore, screens,      │
//! │  CatalogSource          │
//! └─────────────────────────┘
//! ```
//!
//! The two external collaborators are implemented here:
//! [`shell::TerminalLinkOpener`] hands URLs to the shell's output and [`render::TextMap`]
//! draws the campus map as text.

pub mod cli;
pub mod handlers;
pub mod logging;
pub mod render;
pub mod shell;

pub use cli::{cli_parser, Commands, GlobalArgs, HousingArgs};
pub use shell::{Shell, ShellCommand, Step, TerminalLinkOpener};
