//! Networking screen: alumni connector and club exploration

use crate::effects::{AppCommand, PlaceholderIntent};
use crate::errors::AppError;
use crate::fetch::{FetchResponse, LoadOutcome, Loadable, PendingFetch, Resource, ScreenLifetime};
use crate::navigation::{NavPayload, NavigationRequest, Route};
use crate::search::AlumniSearch;
use crate::views::{Alumnus, Club};

use super::{unrequested, LoadingScreen};

/// Networking screen state
#[derive(Clone, Debug)]
pub struct NetworkingScreen {
    directory: Loadable<Alumnus>,
    clubs: Loadable<Club>,
    search: AlumniSearch,
}

impl Default for NetworkingScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkingScreen {
    /// Create an unloaded screen
    pub fn new() -> Self {
        Self {
            directory: Loadable::new(Resource::Alumni),
            clubs: Loadable::new(Resource::Clubs),
            search: AlumniSearch::new(),
        }
    }

    fn rerun_search(&mut self, outcome: &LoadOutcome) {
        if outcome.is_applied() {
            self.search.refresh(self.directory.items());
        }
    }

    /// Alumni directory with its status
    pub fn directory(&self) -> &Loadable<Alumnus> {
        &self.directory
    }

    /// Clubs with their status
    pub fn clubs(&self) -> &Loadable<Club> {
        &self.clubs
    }

    /// Whether a submitted search is waiting for the directory
    pub fn is_searching(&self) -> bool {
        self.search.submitted_query().is_some() && self.directory.is_loading()
    }

    /// Text in the search bar
    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Keystroke in the search bar; nothing is matched yet
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Submit the search bar
    pub fn submit_search(&mut self) -> &[Alumnus] {
        tracing::debug!(query = %self.search.query(), "Alumni search submitted");
        self.search.submit(self.directory.items())
    }

    /// Results of the last submitted search
    pub fn results(&self) -> &[Alumnus] {
        self.search.results()
    }

    /// "Connect" on an alumni card
    pub fn connect(&self, alumnus_id: u32) -> Result<Vec<AppCommand>, AppError> {
        let alumnus = self
            .results()
            .iter()
            .find(|a| a.id == alumnus_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("alumnus", alumnus_id))?;
        Ok(vec![AppCommand::Navigate(NavigationRequest::with_payload(
            Route::AlumnusProfile,
            NavPayload::Alumnus(alumnus),
        ))])
    }

    fn club(&self, club_id: u32) -> Result<Club, AppError> {
        self.clubs
            .items()
            .iter()
            .find(|c| c.id == club_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("club", club_id))
    }

    /// "Know More" on a club card
    pub fn know_more(&self, club_id: u32) -> Result<Vec<AppCommand>, AppError> {
        let club = self.club(club_id)?;
        Ok(vec![AppCommand::Navigate(NavigationRequest::with_payload(
            Route::ClubDetails,
            NavPayload::Club(club),
        ))])
    }

    /// "Join Club" on a club card
    pub fn join_club(&self, club_id: u32) -> Result<Vec<AppCommand>, AppError> {
        let club = self.club(club_id)?;
        Ok(vec![AppCommand::Intent(PlaceholderIntent::JoinClub {
            club: club.name,
        })])
    }
}

/// Both lists are mounted and reloaded together. A search submitted while
/// the directory was loading is re-run once it arrives.
impl LoadingScreen for NetworkingScreen {
    fn mount(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        vec![self.directory.request(lifetime), self.clubs.request(lifetime)]
    }

    fn reload(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        self.mount(lifetime)
    }

    fn accept(&mut self, response: FetchResponse) -> LoadOutcome {
        match response.resource() {
            Resource::Alumni => {
                let outcome = self.directory.accept(response);
                self.rerun_search(&outcome);
                outcome
            }
            Resource::Clubs => self.clubs.accept(response),
            other => unrequested("networking", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockCatalog;
    use crate::screens::settle;

    async fn mounted() -> NetworkingScreen {
        let mut screen = NetworkingScreen::new();
        let pending = screen.mount(&ScreenLifetime::new());
        settle(&mut screen, &MockCatalog::instant(), pending).await;
        screen
    }

    #[tokio::test]
    async fn test_search_runs_on_submit_only() {
        let mut screen = mounted().await;
        screen.set_query("tech");
        assert!(screen.results().is_empty());

        let names: Vec<String> = screen
            .submit_search()
            .iter()
            .map(|a| a.name.clone())
            .collect();
        assert_eq!(names, vec!["John Doe"]);
    }

    #[tokio::test]
    async fn test_empty_submit_yields_nothing() {
        let mut screen = mounted().await;
        assert!(screen.submit_search().is_empty());
    }

    #[tokio::test]
    async fn test_search_before_directory_loads_is_rerun() {
        let mut screen = NetworkingScreen::new();
        let pending = screen.mount(&ScreenLifetime::new());
        screen.set_query("finance");
        screen.submit_search();
        assert!(screen.results().is_empty());
        assert!(screen.is_searching());

        settle(&mut screen, &MockCatalog::instant(), pending).await;
        assert!(!screen.is_searching());
        assert_eq!(screen.results().len(), 1);
        assert_eq!(screen.results()[0].name, "Jane Smith");
    }

    #[tokio::test]
    async fn test_connect_requires_visible_result() -> Result<(), AppError> {
        let mut screen = mounted().await;
        assert!(screen.connect(1).is_err());

        screen.set_query("doe");
        screen.submit_search();
        let commands = screen.connect(1)?;
        assert!(matches!(
            &commands[0],
            AppCommand::Navigate(req) if req.route == Route::AlumnusProfile
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_club_actions() -> Result<(), AppError> {
        let screen = mounted().await;
        assert_eq!(screen.clubs().items().len(), 4);

        let commands = screen.join_club(3)?;
        assert_eq!(
            commands,
            vec![AppCommand::Intent(PlaceholderIntent::JoinClub {
                club: "Art Collective".to_string()
            })]
        );

        let commands = screen.know_more(1)?;
        assert!(matches!(
            &commands[0],
            AppCommand::Navigate(req) if matches!(&req.payload, Some(NavPayload::Club(c)) if c.name == "Tech Innovators")
        ));
        assert!(screen.know_more(9).is_err());
        Ok(())
    }
}
