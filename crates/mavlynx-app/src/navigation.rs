//! # Tab Router
//!
//! Bottom-bar navigation with browser-like history, plus detail routes that
//! open over the current tab carrying a typed payload.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;
use crate::views::{Alumnus, Club, HousingListing, PhonePlan, StudyRoom};

// =============================================================================
// Tabs and routes
// =============================================================================

/// Bottom-bar destinations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    /// Holds and phone plans
    #[default]
    Essentials,
    /// Alumni connector and clubs
    Networking,
    /// Landing page
    Home,
    /// Department map and study rooms
    Campus,
    /// Housing and food & recreation
    Exploration,
}

impl Tab {
    /// Get the numeric key (1-5) for this tab
    pub fn key_number(&self) -> u8 {
        match self {
            Tab::Essentials => 1,
            Tab::Networking => 2,
            Tab::Home => 3,
            Tab::Campus => 4,
            Tab::Exploration => 5,
        }
    }

    /// Get tab from numeric key (1-5)
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(Tab::Essentials),
            2 => Some(Tab::Networking),
            3 => Some(Tab::Home),
            4 => Some(Tab::Campus),
            5 => Some(Tab::Exploration),
            _ => None,
        }
    }

    /// Get the display name for the tab
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Essentials => "Essentials",
            Tab::Networking => "Networking",
            Tab::Home => "Home",
            Tab::Campus => "Campus",
            Tab::Exploration => "Exploration",
        }
    }

    /// Icon name for the tab bar; unfocused tabs use the outline variant
    pub fn icon(&self, focused: bool) -> String {
        let base = match self {
            Tab::Essentials => "briefcase",
            Tab::Networking => "people",
            Tab::Home => "home",
            Tab::Campus => "school",
            Tab::Exploration => "football",
        };
        if focused {
            base.to_string()
        } else {
            format!("{base}-outline")
        }
    }

    /// Get all tabs in bar order
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Essentials,
            Tab::Networking,
            Tab::Home,
            Tab::Campus,
            Tab::Exploration,
        ]
    }

    /// Get next tab in bar order
    pub fn next(&self) -> Tab {
        match self {
            Tab::Essentials => Tab::Networking,
            Tab::Networking => Tab::Home,
            Tab::Home => Tab::Campus,
            Tab::Campus => Tab::Exploration,
            Tab::Exploration => Tab::Essentials,
        }
    }

    /// Get previous tab in bar order
    pub fn prev(&self) -> Tab {
        match self {
            Tab::Essentials => Tab::Exploration,
            Tab::Networking => Tab::Essentials,
            Tab::Home => Tab::Networking,
            Tab::Campus => Tab::Home,
            Tab::Exploration => Tab::Campus,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(key) = s.parse::<u8>() {
            return Tab::from_key(key).ok_or_else(|| AppError::UnknownRoute(s.to_string()));
        }
        Tab::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::UnknownRoute(s.to_string()))
    }
}

/// Any navigable destination: a tab or a detail route
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// A bottom-bar tab
    Tab(Tab),
    /// Study room reservation confirmation
    ReservationConfirmation,
    /// Housing application form
    HousingApplication,
    /// Alumnus profile page
    AlumnusProfile,
    /// Club details page
    ClubDetails,
}

impl Route {
    /// Route name
    pub fn name(&self) -> &'static str {
        match self {
            Route::Tab(tab) => tab.name(),
            Route::ReservationConfirmation => "ReservationConfirmation",
            Route::HousingApplication => "HousingApplication",
            Route::AlumnusProfile => "AlumnusProfile",
            Route::ClubDetails => "ClubDetails",
        }
    }

    /// Whether this route opens over a tab instead of replacing it
    pub fn is_detail(&self) -> bool {
        !matches!(self, Route::Tab(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(tab) = s.parse::<Tab>() {
            return Ok(Route::Tab(tab));
        }
        [
            Route::ReservationConfirmation,
            Route::HousingApplication,
            Route::AlumnusProfile,
            Route::ClubDetails,
        ]
        .into_iter()
        .find(|r| r.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| AppError::UnknownRoute(s.to_string()))
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Typed data carried by a navigation request.
///
/// Serializes externally tagged, e.g. `{"selectedPlan": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavPayload {
    /// Phone plan picked on the Essentials screen
    SelectedPlan(PhonePlan),
    /// Study room whose slot was requested
    Room(StudyRoom),
    /// Housing listing being applied for
    Housing(HousingListing),
    /// Alumnus to connect with
    Alumnus(Alumnus),
    /// Club to learn more about
    Club(Club),
}

impl NavPayload {
    /// Short name of the payload kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SelectedPlan(_) => "selectedPlan",
            Self::Room(_) => "room",
            Self::Housing(_) => "housing",
            Self::Alumnus(_) => "alumnus",
            Self::Club(_) => "club",
        }
    }

    /// Interpret an untyped JSON payload addressed to `route`
    pub fn from_json(route: Route, value: serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(value).map_err(|e| AppError::invalid_payload(route, e.to_string()))
    }

    /// JSON form of the payload
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// A request to move to `route`, optionally carrying a payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Destination
    pub route: Route,
    /// Data for the destination
    pub payload: Option<NavPayload>,
}

impl NavigationRequest {
    /// Navigation carrying a payload
    pub fn with_payload(route: Route, payload: NavPayload) -> Self {
        Self {
            route,
            payload: Some(payload),
        }
    }
}

/// A detail route open over the current tab
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    /// Which detail page
    pub route: Route,
    /// Tab it was opened from
    pub origin: Tab,
    /// What it shows
    pub payload: Option<NavPayload>,
}

// =============================================================================
// Router
// =============================================================================

/// Tab router state
#[derive(Clone, Debug)]
pub struct Router {
    /// Current active tab
    current: Tab,
    /// Detail route open over the current tab
    detail: Option<DetailView>,
    /// Navigation history (for back functionality)
    history: VecDeque<Tab>,
    /// Forward history (for forward after back)
    forward: VecDeque<Tab>,
    /// Maximum history length
    max_history: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Tab::default())
    }
}

impl Router {
    /// Create a new router starting at the given tab
    pub fn new(initial: Tab) -> Self {
        Self {
            current: initial,
            detail: None,
            history: VecDeque::new(),
            forward: VecDeque::new(),
            max_history: 50,
        }
    }

    /// Get the current tab
    pub fn current(&self) -> Tab {
        self.current
    }

    /// Detail view open over the current tab, if any
    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// Route on top of the stack
    pub fn top(&self) -> Route {
        self.detail
            .as_ref()
            .map_or(Route::Tab(self.current), |d| d.route)
    }

    /// Go to a specific tab, closing any detail view
    pub fn go_to(&mut self, tab: Tab) {
        self.detail = None;
        if tab != self.current {
            self.history.push_back(self.current);
            if self.history.len() > self.max_history {
                self.history.pop_front();
            }
            self.forward.clear();
            self.current = tab;
        }
    }

    /// Open a detail route over the current tab
    pub fn open_detail(&mut self, route: Route, payload: Option<NavPayload>) {
        self.detail = Some(DetailView {
            route,
            origin: self.current,
            payload,
        });
    }

    fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Close the detail view, or go back to the previous tab
    pub fn back(&mut self) {
        if self.close_detail() {
            return;
        }
        if let Some(prev) = self.history.pop_back() {
            self.forward.push_front(self.current);
            self.current = prev;
        }
    }

    /// Go forward (after going back)
    pub fn forward(&mut self) {
        if let Some(next) = self.forward.pop_front() {
            self.detail = None;
            self.history.push_back(self.current);
            self.current = next;
        }
    }
}
