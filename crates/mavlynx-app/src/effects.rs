//! # Effects and External Collaborators
//!
//! Screen handlers never perform side effects themselves. They return
//! [`AppCommand`]s which [`AppCore`](crate::AppCore) executes, so the
//! handlers stay pure and testable.
//!
//! The two collaborators that live outside the app (a browser for links
//! and a map surface for markers) are traits implemented by frontends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::navigation::NavigationRequest;
use crate::views::Coordinate;

// =============================================================================
// Commands
// =============================================================================

/// Action that has no real backend yet; executing it only logs the intent
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaceholderIntent {
    /// Persist checklist progress
    SaveProgress {
        /// Holds with every item ticked
        cleared_holds: usize,
    },
    /// Sign up for a phone plan
    ApplyForPlan {
        /// Plan name
        plan: String,
    },
    /// Reserve a study room slot
    ApplyForSlot {
        /// Room name
        room: String,
    },
    /// Apply for a housing listing
    ApplyForHousing {
        /// Listing address
        address: String,
    },
    /// Join a club
    JoinClub {
        /// Club name
        club: String,
    },
}

impl fmt::Display for PlaceholderIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaveProgress { cleared_holds } => {
                write!(f, "save progress ({cleared_holds} holds cleared)")
            }
            Self::ApplyForPlan { plan } => write!(f, "apply for {plan}"),
            Self::ApplyForSlot { room } => write!(f, "apply for a slot in {room}"),
            Self::ApplyForHousing { address } => write!(f, "apply for housing at {address}"),
            Self::JoinClub { club } => write!(f, "join club: {club}"),
        }
    }
}

/// Command representing a side effect
///
/// Commands are produced by screen handlers and executed by the app core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppCommand {
    /// Move to another destination
    Navigate(NavigationRequest),
    /// Hand a URL to the external link opener
    OpenUrl(String),
    /// Log an action that has no backend
    Intent(PlaceholderIntent),
}

// =============================================================================
// Link opener
// =============================================================================

/// Opens URLs in an external handler. Fire-and-forget.
pub trait LinkOpener: Send + Sync {
    /// Open `url`
    fn open(&self, url: &str);
}

/// Link opener that only records the request in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLinkOpener;

impl LinkOpener for LoggingLinkOpener {
    fn open(&self, url: &str) {
        tracing::info!(url, "Opening external link");
    }
}

// =============================================================================
// Map surface
// =============================================================================

/// Visible area of the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Centre of the viewport
    pub center: Coordinate,
    /// Vertical span in degrees
    pub latitude_delta: f64,
    /// Horizontal span in degrees
    pub longitude_delta: f64,
}

/// A tappable pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Id reported back when the marker is tapped
    pub id: u32,
    /// Pin position
    pub coordinate: Coordinate,
    /// Callout title
    pub title: String,
    /// Callout subtitle
    pub description: String,
}

/// Everything a map surface needs to draw the departments tab
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    /// Initial region
    pub region: MapRegion,
    /// Markers in list order
    pub markers: Vec<MapMarker>,
}

/// Draws a [`MapView`]; marker taps go back through
/// [`CampusScreen::tap_marker`](crate::screens::CampusScreen::tap_marker).
pub trait MapSurface {
    /// Render the map
    fn render(&mut self, view: &MapView);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_descriptions() {
        let intent = PlaceholderIntent::JoinClub {
            club: "Art Collective".to_string(),
        };
        assert_eq!(intent.to_string(), "join club: Art Collective");

        let intent = PlaceholderIntent::SaveProgress { cleared_holds: 1 };
        assert_eq!(intent.to_string(), "save progress (1 holds cleared)");
    }
}
