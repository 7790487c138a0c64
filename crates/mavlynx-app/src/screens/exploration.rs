//! Exploration screen: housing search and food & recreation

use std::fmt;
use std::str::FromStr;

use crate::config::HousingSettings;
use crate::effects::{AppCommand, PlaceholderIntent};
use crate::errors::AppError;
use crate::fetch::{FetchResponse, LoadOutcome, Loadable, PendingFetch, Resource, ScreenLifetime};
use crate::filter::HousingFilterConfig;
use crate::navigation::{NavPayload, NavigationRequest, Route};
use crate::views::{FoodRecommendation, HousingListing, RoomType};

use super::{unrequested, LoadingScreen};

/// Exploration sub-tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExplorationTab {
    /// Housing filter and listings
    #[default]
    Housing,
    /// Food & recreation cards
    FoodRec,
}

impl ExplorationTab {
    /// Sub-tab key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::FoodRec => "foodRec",
        }
    }

    /// Sub-tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::FoodRec => "Food & Recreation",
        }
    }
}

impl fmt::Display for ExplorationTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExplorationTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "housing" => Ok(Self::Housing),
            "foodrec" | "food" | "food & recreation" => Ok(Self::FoodRec),
            _ => Err(AppError::UnknownSubTab(s.to_string())),
        }
    }
}

/// Exploration screen state
///
/// Filter edits go to a draft; [`apply_filters`](Self::apply_filters)
/// commits the draft and the visible list is derived from the cached
/// listings and the committed filter.
#[derive(Clone, Debug)]
pub struct ExplorationScreen {
    active: ExplorationTab,
    housing: Loadable<HousingListing>,
    food: Loadable<FoodRecommendation>,
    draft: HousingFilterConfig,
    applied: HousingFilterConfig,
    settings: HousingSettings,
}

impl ExplorationScreen {
    /// Create an unloaded screen
    pub fn new(settings: HousingSettings) -> Self {
        let filter = HousingFilterConfig::with_ceiling(settings.price_ceiling);
        Self {
            active: ExplorationTab::Housing,
            housing: Loadable::new(Resource::Housing),
            food: Loadable::new(Resource::FoodRecommendations),
            draft: filter.clone(),
            applied: filter,
            settings,
        }
    }

    /// Housing list with its status
    pub fn housing(&self) -> &Loadable<HousingListing> {
        &self.housing
    }

    /// Food list with its status
    pub fn food(&self) -> &Loadable<FoodRecommendation> {
        &self.food
    }

    /// Whether the active sub-tab is waiting for data
    pub fn is_loading(&self) -> bool {
        match self.active {
            ExplorationTab::Housing => self.housing.is_loading(),
            ExplorationTab::FoodRec => self.food.is_loading(),
        }
    }

    /// Error of the active sub-tab's last load
    pub fn error(&self) -> Option<&AppError> {
        match self.active {
            ExplorationTab::Housing => self.housing.error(),
            ExplorationTab::FoodRec => self.food.error(),
        }
    }

    /// Active sub-tab
    pub fn active_tab(&self) -> ExplorationTab {
        self.active
    }

    /// Switch sub-tab
    pub fn set_active_tab(&mut self, tab: ExplorationTab) {
        if self.active != tab {
            tracing::debug!(from = %self.active, to = %tab, "Exploration sub-tab changed");
            self.active = tab;
        }
    }

    // =========================================================================
    // Filter form
    // =========================================================================

    /// Filter values as currently typed
    pub fn draft_filter(&self) -> &HousingFilterConfig {
        &self.draft
    }

    /// Filter the visible list is derived from
    pub fn applied_filter(&self) -> &HousingFilterConfig {
        &self.applied
    }

    /// Whether the form differs from the committed filter
    pub fn has_pending_changes(&self) -> bool {
        self.draft != self.applied
    }

    /// Type into the location field
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.draft.location = location.into();
    }

    /// Move the max-price slider; returns the stored value
    pub fn set_max_price(&mut self, value: u32) -> u32 {
        self.draft
            .set_max_price(value, self.settings.price_ceiling, self.settings.price_step)
    }

    /// Pick a room type
    pub fn set_room_type(&mut self, room_type: RoomType) {
        self.draft.room_type = room_type;
    }

    /// Slider bounds and step
    pub fn price_settings(&self) -> &HousingSettings {
        &self.settings
    }

    /// Commit the form; returns how many listings are now visible
    pub fn apply_filters(&mut self) -> usize {
        tracing::debug!(filter = ?self.draft, "Applying housing filters");
        self.applied = self.draft.clone();
        self.visible_housing().len()
    }

    /// Cached listings narrowed by the committed filter
    pub fn visible_housing(&self) -> Vec<&HousingListing> {
        self.applied.apply(self.housing.items())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// "Apply" on a housing card
    pub fn apply_for_housing(&self, listing_id: u32) -> Result<Vec<AppCommand>, AppError> {
        let listing = self
            .visible_housing()
            .into_iter()
            .find(|l| l.id == listing_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("housing listing", listing_id))?;
        Ok(vec![
            AppCommand::Intent(PlaceholderIntent::ApplyForHousing {
                address: listing.address.clone(),
            }),
            AppCommand::Navigate(NavigationRequest::with_payload(
                Route::HousingApplication,
                NavPayload::Housing(listing),
            )),
        ])
    }
}

/// Reloading the housing list keeps the committed filter
impl LoadingScreen for ExplorationScreen {
    fn mount(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        vec![self.housing.request(lifetime), self.food.request(lifetime)]
    }

    fn reload(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        vec![match self.active {
            ExplorationTab::Housing => self.housing.request(lifetime),
            ExplorationTab::FoodRec => self.food.request(lifetime),
        }]
    }

    fn accept(&mut self, response: FetchResponse) -> LoadOutcome {
        match response.resource() {
            Resource::Housing => self.housing.accept(response),
            Resource::FoodRecommendations => self.food.accept(response),
            other => unrequested("exploration", other),
        }
    }
}
