//! # MavLynx App - Headless Application Core
//!
//! Portable state management for the MavLynx campus orientation app. Five
//! tabs (Essentials, Networking, Home, Campus, Exploration) each own a
//! screen controller; the controllers load their lists through an async
//! [`CatalogSource`], narrow them with the filter and search engines, and
//! turn user actions into [`AppCommand`]s.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │    mavlynx-terminal      │  line shell, tour, one-shot commands
//! └────────────┬─────────────┘
//!              │ drives
//!              ↓
//! ┌──────────────────────────┐
//! │        AppCore           │  Router + screens + command execution
//! ├──────────────────────────┤
//! │  screens/  filter  search│
//! │  checklist  navigation   │
//! ├──────────────────────────┤
//! │  CatalogSource (async)   │  MockCatalog serves literals
//! └──────────────────────────┘
//! ```
//!
//! ## Constraints
//!
//! This crate performs no terminal or network I/O. URLs go out through
//! [`LinkOpener`], map drawing through [`MapSurface`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mavlynx_app::{AppConfig, AppCore, Tab};
//!
//! # async fn demo() -> Result<(), mavlynx_app::AppError> {
//! let mut app = AppCore::with_mock(AppConfig::default());
//! app.start().await;
//!
//! let commands = app
//!     .essentials()
//!     .ok_or_else(|| mavlynx_app::AppError::UnknownRoute("Essentials".into()))?
//!     .apply_for_plan(0)?;
//! app.execute(commands).await?;
//! assert_eq!(app.current_tab(), Tab::Home);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod checklist;
pub mod config;
pub mod effects;
pub mod errors;
pub mod fetch;
pub mod filter;
pub mod navigation;
pub mod screens;
pub mod search;
pub mod views;

pub use app::{AppCore, TabLoad, TabResponses};
pub use checklist::{Checklist, ChecklistItem};
pub use config::{AppConfig, HousingSettings, MapSettings};
pub use effects::{
    AppCommand, LinkOpener, LoggingLinkOpener, MapMarker, MapRegion, MapSurface, MapView,
    PlaceholderIntent,
};
pub use errors::{AppError, ErrorCategory};
pub use fetch::{
    run_all, CatalogData, CatalogRecord, CatalogSource, FetchResponse, LoadOutcome, LoadStatus,
    Loadable, MockCatalog, PendingFetch, RequestToken, Resource, ScreenLifetime,
};
pub use filter::HousingFilterConfig;
pub use navigation::{DetailView, NavPayload, NavigationRequest, Route, Router, Tab};
pub use screens::{
    CampusScreen, CampusTab, EssentialsScreen, ExplorationScreen, ExplorationTab, HomeScreen,
    LoadingScreen, NetworkingScreen, RoomInfo,
};
pub use search::AlumniSearch;
pub use views::{
    AdministrativeHold, Alumnus, Club, Coordinate, Department, FoodCategory, FoodRecommendation,
    HoldLink, HousingListing, PhonePlan, RoomType, StudyRoom,
};
