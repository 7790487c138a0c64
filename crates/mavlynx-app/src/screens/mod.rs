//! # Screen Controllers
//!
//! One controller per destination. Each owns its local view state (active
//! sub-tab, lists, overlays, form values) and turns user actions into state
//! changes or [`AppCommand`](crate::effects::AppCommand)s.

mod campus;
mod essentials;
mod exploration;
mod home;
mod networking;

pub use campus::{CampusScreen, CampusTab, RoomInfo};
pub use essentials::EssentialsScreen;
pub use exploration::{ExplorationScreen, ExplorationTab};
pub use home::HomeScreen;
pub use networking::NetworkingScreen;

use crate::fetch::{FetchResponse, LoadOutcome, PendingFetch, Resource, ScreenLifetime};

/// A screen whose lists come from a [`CatalogSource`](crate::fetch::CatalogSource).
///
/// `mount` and `reload` mark lists as loading and return the requests to
/// run; `accept` routes each answer back to the list that asked for it.
pub trait LoadingScreen {
    /// Start loading every list the screen shows
    fn mount(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch>;

    /// Start re-fetching the lists currently on display
    fn reload(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch>;

    /// Hand a response to the list that requested it
    fn accept(&mut self, response: FetchResponse) -> LoadOutcome;
}

/// Outcome for a response no list on `screen` asked for
fn unrequested(screen: &str, resource: Resource) -> LoadOutcome {
    tracing::warn!(screen, resource = %resource, "Dropping response nobody requested");
    LoadOutcome::Stale
}

#[cfg(test)]
pub(crate) async fn settle(
    screen: &mut dyn LoadingScreen,
    source: &dyn crate::fetch::CatalogSource,
    pending: Vec<PendingFetch>,
) -> Vec<LoadOutcome> {
    crate::fetch::run_all(source, pending)
        .await
        .into_iter()
        .map(|response| screen.accept(response))
        .collect()
}
