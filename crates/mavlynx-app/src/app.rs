//! # Application Core
//!
//! [`AppCore`] composes the tab router with the five screen controllers.
//! Screens are mounted the first time their tab is selected and stay
//! mounted until [`AppCore::unmount`] drops them. Each mounted screen owns a
//! [`ScreenLifetime`]; unmounting cancels it so in-flight fetches resolve to
//! [`LoadOutcome::Cancelled`].
//!
//! A tab switch happens in two steps. [`AppCore::open_tab`] selects the tab
//! and stores its screen with every list loading, then hands back a
//! [`TabLoad`]. Running that load borrows only the catalog, so the app can
//! be rendered or unmounted meanwhile; [`AppCore::accept`] applies the
//! answers. [`AppCore::select_tab`] does both in one call.
//!
//! Screen handlers return [`AppCommand`]s; [`AppCore::execute`] runs them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::effects::{AppCommand, LinkOpener, LoggingLinkOpener, PlaceholderIntent};
use crate::errors::AppError;
use crate::fetch::{
    run_all, CatalogSource, FetchResponse, LoadOutcome, PendingFetch, ScreenLifetime,
};
use crate::navigation::{NavPayload, NavigationRequest, Route, Router, Tab};
use crate::screens::{
    CampusScreen, EssentialsScreen, ExplorationScreen, HomeScreen, LoadingScreen,
    NetworkingScreen,
};

/// Requests a tab's screen is waiting on
#[derive(Debug, Clone)]
pub struct TabLoad {
    tab: Tab,
    requests: Vec<PendingFetch>,
}

impl TabLoad {
    /// Tab whose screen issued the requests
    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Whether there is nothing to fetch
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Run every request concurrently against `source`
    pub async fn run(self, source: &dyn CatalogSource) -> TabResponses {
        TabResponses {
            tab: self.tab,
            responses: run_all(source, self.requests).await,
        }
    }
}

/// Answers to a [`TabLoad`], ready for [`AppCore::accept`]
#[derive(Debug, Clone)]
pub struct TabResponses {
    tab: Tab,
    responses: Vec<FetchResponse>,
}

/// Headless application shell
pub struct AppCore {
    config: AppConfig,
    source: Arc<dyn CatalogSource>,
    links: Box<dyn LinkOpener>,
    router: Router,
    lifetimes: HashMap<Tab, ScreenLifetime>,
    essentials: Option<EssentialsScreen>,
    networking: Option<NetworkingScreen>,
    home: Option<HomeScreen>,
    campus: Option<CampusScreen>,
    exploration: Option<ExplorationScreen>,
    activity: Vec<PlaceholderIntent>,
}

impl std::fmt::Debug for AppCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCore")
            .field("current", &self.router.current())
            .field("top", &self.router.top())
            .field("mounted", &self.mounted_tabs())
            .finish_non_exhaustive()
    }
}

impl AppCore {
    /// Create an app over `source`. Nothing is mounted until
    /// [`start`](Self::start) or the first tab selection.
    pub fn new(
        config: AppConfig,
        source: Arc<dyn CatalogSource>,
        links: Box<dyn LinkOpener>,
    ) -> Self {
        let router = Router::new(config.initial_tab);
        Self {
            config,
            source,
            links,
            router,
            lifetimes: HashMap::new(),
            essentials: None,
            networking: None,
            home: None,
            campus: None,
            exploration: None,
            activity: Vec::new(),
        }
    }

    /// App over the mock catalog described by `config`, logging opened links
    pub fn with_mock(config: AppConfig) -> Self {
        let source = Arc::new(config.mock_catalog());
        Self::new(config, source, Box::new(LoggingLinkOpener))
    }

    /// Mount the initial tab
    pub async fn start(&mut self) {
        let tab = self.router.current();
        tracing::info!(tab = %tab, "Starting MavLynx");
        let load = self.mount(tab);
        self.complete(load).await;
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Tab router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Tab currently selected in the bar
    pub fn current_tab(&self) -> Tab {
        self.router.current()
    }

    /// Placeholder intents executed so far, oldest first
    pub fn activity(&self) -> &[PlaceholderIntent] {
        &self.activity
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Whether `tab`'s screen is mounted
    pub fn is_mounted(&self, tab: Tab) -> bool {
        match tab {
            Tab::Essentials => self.essentials.is_some(),
            Tab::Networking => self.networking.is_some(),
            Tab::Home => self.home.is_some(),
            Tab::Campus => self.campus.is_some(),
            Tab::Exploration => self.exploration.is_some(),
        }
    }

    /// Mounted tabs in bar order
    pub fn mounted_tabs(&self) -> Vec<Tab> {
        Tab::all()
            .iter()
            .copied()
            .filter(|t| self.is_mounted(*t))
            .collect()
    }

    /// Lifetime handle of `tab`'s screen, created on first use
    pub fn lifetime(&mut self, tab: Tab) -> ScreenLifetime {
        self.lifetimes.entry(tab).or_default().clone()
    }

    fn loading_screen(&mut self, tab: Tab) -> Option<&mut dyn LoadingScreen> {
        match tab {
            Tab::Networking => self
                .networking
                .as_mut()
                .map(|screen| screen as &mut dyn LoadingScreen),
            Tab::Campus => self
                .campus
                .as_mut()
                .map(|screen| screen as &mut dyn LoadingScreen),
            Tab::Exploration => self
                .exploration
                .as_mut()
                .map(|screen| screen as &mut dyn LoadingScreen),
            Tab::Essentials | Tab::Home => None,
        }
    }

    /// Store `tab`'s screen if it is not mounted yet; its lists stay loading
    /// until the returned requests are answered
    fn mount(&mut self, tab: Tab) -> TabLoad {
        let mut load = TabLoad {
            tab,
            requests: Vec::new(),
        };
        if self.is_mounted(tab) {
            return load;
        }
        let lifetime = self.lifetime(tab);
        tracing::debug!(tab = %tab, "Mounting screen");
        match tab {
            Tab::Essentials => self.essentials = Some(EssentialsScreen::new()),
            Tab::Home => self.home = Some(HomeScreen::new()),
            Tab::Networking => self.networking = Some(NetworkingScreen::new()),
            Tab::Campus => self.campus = Some(CampusScreen::new(self.config.map.region())),
            Tab::Exploration => {
                self.exploration = Some(ExplorationScreen::new(self.config.housing.clone()));
            }
        }
        if let Some(screen) = self.loading_screen(tab) {
            load.requests = screen.mount(&lifetime);
        }
        load
    }

    /// Apply answers to the screen that asked for them.
    ///
    /// Answers for a screen that was unmounted meanwhile are dropped, even
    /// if the tab has been mounted again since.
    pub fn accept(&mut self, answers: TabResponses) -> Vec<LoadOutcome> {
        let TabResponses { tab, responses } = answers;
        responses
            .into_iter()
            .map(|response| {
                if response.is_cancelled() {
                    tracing::debug!(
                        tab = %tab,
                        resource = %response.resource(),
                        "Dropping response for unmounted screen"
                    );
                    return LoadOutcome::Cancelled;
                }
                match self.loading_screen(tab) {
                    Some(screen) => screen.accept(response),
                    None => LoadOutcome::Cancelled,
                }
            })
            .collect()
    }

    /// Run `load` against the catalog and apply the answers
    pub async fn complete(&mut self, load: TabLoad) -> Vec<LoadOutcome> {
        if load.is_empty() {
            return Vec::new();
        }
        let source = Arc::clone(&self.source);
        let answers = load.run(source.as_ref()).await;
        self.accept(answers)
    }

    /// Catalog the screens fetch from
    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    /// Drop `tab`'s screen and cancel its pending fetches.
    ///
    /// The next visit mounts a fresh screen.
    pub fn unmount(&mut self, tab: Tab) {
        if let Some(lifetime) = self.lifetimes.remove(&tab) {
            lifetime.cancel();
        }
        match tab {
            Tab::Essentials => self.essentials = None,
            Tab::Networking => self.networking = None,
            Tab::Home => self.home = None,
            Tab::Campus => self.campus = None,
            Tab::Exploration => self.exploration = None,
        }
        tracing::debug!(tab = %tab, "Screen unmounted");
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Select a tab in the bar without waiting for its lists.
    ///
    /// A newly mounted screen shows its lists as loading until the returned
    /// load is run and its answers are [accepted](Self::accept).
    pub fn open_tab(&mut self, tab: Tab) -> TabLoad {
        let from = self.router.current();
        self.router.go_to(tab);
        if from != tab {
            tracing::debug!(from = %from, to = %tab, "Tab selected");
        }
        self.mount(tab)
    }

    /// Select a tab in the bar and wait for its lists
    pub async fn select_tab(&mut self, tab: Tab) {
        let load = self.open_tab(tab);
        self.complete(load).await;
    }

    /// Close the detail view or go back one tab
    pub async fn back(&mut self) {
        self.router.back();
        let load = self.mount(self.router.current());
        self.complete(load).await;
    }

    /// Go forward after going back
    pub async fn forward(&mut self) {
        self.router.forward();
        let load = self.mount(self.router.current());
        self.complete(load).await;
    }

    /// Next tab in bar order
    pub async fn next_tab(&mut self) {
        self.select_tab(self.router.current().next()).await;
    }

    /// Previous tab in bar order
    pub async fn prev_tab(&mut self) {
        self.select_tab(self.router.current().prev()).await;
    }

    async fn navigate(&mut self, request: NavigationRequest) -> Result<(), AppError> {
        let NavigationRequest { route, payload } = request;
        match route {
            Route::Tab(tab) => {
                self.select_tab(tab).await;
                self.deliver(tab, payload.as_ref())
            }
            detail => {
                tracing::info!(route = %detail, payload = payload.as_ref().map(NavPayload::kind), "Opening detail view");
                self.router.open_detail(detail, payload);
                Ok(())
            }
        }
    }

    fn deliver(&mut self, tab: Tab, payload: Option<&NavPayload>) -> Result<(), AppError> {
        match (tab, &mut self.home) {
            (Tab::Home, Some(home)) => home.receive(payload),
            _ => {
                if let Some(payload) = payload {
                    tracing::debug!(tab = %tab, kind = payload.kind(), "Payload ignored by destination");
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run the commands a screen handler produced, in order.
    ///
    /// Every command runs even if an earlier one fails; the first error is
    /// returned.
    pub async fn execute(&mut self, commands: Vec<AppCommand>) -> Result<(), AppError> {
        let mut first_error = None;
        for command in commands {
            let result = match command {
                AppCommand::Navigate(request) => self.navigate(request).await,
                AppCommand::OpenUrl(url) => {
                    self.links.open(&url);
                    Ok(())
                }
                AppCommand::Intent(intent) => {
                    tracing::info!("Would {intent}");
                    self.activity.push(intent);
                    Ok(())
                }
            };
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Start re-fetching the lists shown on the current tab
    pub fn begin_reload(&mut self) -> TabLoad {
        let tab = self.router.current();
        let lifetime = self.lifetime(tab);
        let requests = self
            .loading_screen(tab)
            .map(|screen| screen.reload(&lifetime))
            .unwrap_or_default();
        TabLoad { tab, requests }
    }

    /// Re-fetch the lists shown on the current tab
    pub async fn reload_current(&mut self) -> Vec<LoadOutcome> {
        let load = self.begin_reload();
        self.complete(load).await
    }

    // =========================================================================
    // Screens
    // =========================================================================

    /// Essentials screen, if mounted
    pub fn essentials(&self) -> Option<&EssentialsScreen> {
        self.essentials.as_ref()
    }

    /// Mutable Essentials screen
    pub fn essentials_mut(&mut self) -> Option<&mut EssentialsScreen> {
        self.essentials.as_mut()
    }

    /// Networking screen, if mounted
    pub fn networking(&self) -> Option<&NetworkingScreen> {
        self.networking.as_ref()
    }

    /// Mutable Networking screen
    pub fn networking_mut(&mut self) -> Option<&mut NetworkingScreen> {
        self.networking.as_mut()
    }

    /// Home screen, if mounted
    pub fn home(&self) -> Option<&HomeScreen> {
        self.home.as_ref()
    }

    /// Campus screen, if mounted
    pub fn campus(&self) -> Option<&CampusScreen> {
        self.campus.as_ref()
    }

    /// Mutable Campus screen
    pub fn campus_mut(&mut self) -> Option<&mut CampusScreen> {
        self.campus.as_mut()
    }

    /// Exploration screen, if mounted
    pub fn exploration(&self) -> Option<&ExplorationScreen> {
        self.exploration.as_ref()
    }

    /// Mutable Exploration screen
    pub fn exploration_mut(&mut self) -> Option<&mut ExplorationScreen> {
        self.exploration.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{MockCatalog, Resource};
    use futures::FutureExt;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default, Clone)]
    struct RecordingOpener(Arc<Mutex<Vec<String>>>);

    impl LinkOpener for RecordingOpener {
        fn open(&self, url: &str) {
            if let Ok(mut opened) = self.0.lock() {
                opened.push(url.to_string());
            }
        }
    }

    fn app() -> AppCore {
        let config = AppConfig {
            fetch_latency_ms: 0,
            ..AppConfig::default()
        };
        AppCore::with_mock(config)
    }

    #[tokio::test]
    async fn test_start_mounts_initial_tab_only() {
        let mut app = app();
        assert!(app.mounted_tabs().is_empty());
        app.start().await;
        assert_eq!(app.current_tab(), Tab::Essentials);
        assert_eq!(app.mounted_tabs(), vec![Tab::Essentials]);
    }

    #[tokio::test]
    async fn test_tab_switch_mounts_and_keeps_state() -> Result<(), AppError> {
        let mut app = app();
        app.start().await;
        app.essentials_mut()
            .ok_or(AppError::UnknownRoute("Essentials".into()))?
            .toggle(0, 0)?;

        app.select_tab(Tab::Campus).await;
        assert_eq!(
            app.campus().map(|c| c.departments().items().len()),
            Some(3)
        );

        app.back().await;
        assert_eq!(app.current_tab(), Tab::Essentials);
        assert_eq!(
            app.essentials().map(|e| e.holds()[0].checklist.done_count()),
            Some(1)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_plan_payload_reaches_home() -> Result<(), AppError> {
        let mut app = app();
        app.start().await;
        let commands = app
            .essentials()
            .ok_or(AppError::UnknownRoute("Essentials".into()))?
            .apply_for_plan(0)?;
        app.execute(commands).await?;

        assert_eq!(app.current_tab(), Tab::Home);
        assert_eq!(
            app.home().and_then(HomeScreen::estimated_monthly_cost),
            Some(30)
        );
        assert_eq!(
            app.activity(),
            &[PlaceholderIntent::ApplyForPlan {
                plan: "Basic Plan".to_string()
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unexpected_home_payload_is_reported() {
        let mut app = app();
        let club = crate::catalog::clubs().remove(0);
        let result = app
            .execute(vec![AppCommand::Navigate(NavigationRequest::with_payload(
                Route::Tab(Tab::Home),
                NavPayload::Club(club),
            ))])
            .await;
        assert!(matches!(result, Err(AppError::NavigationPayloadInvalid { .. })));
        assert_eq!(app.current_tab(), Tab::Home);
        assert_eq!(app.home().and_then(HomeScreen::selected_plan), None);
    }

    #[tokio::test]
    async fn test_detail_route_opens_over_tab() -> Result<(), AppError> {
        let mut app = app();
        app.select_tab(Tab::Campus).await;
        let commands = app
            .campus()
            .ok_or(AppError::UnknownRoute("Campus".into()))?
            .apply_for_slot(1)?;
        app.execute(commands).await?;

        assert_eq!(app.router().top(), Route::ReservationConfirmation);
        assert_eq!(app.router().detail().map(|d| d.origin), Some(Tab::Campus));
        app.back().await;
        assert_eq!(app.router().top(), Route::Tab(Tab::Campus));
        Ok(())
    }

    #[tokio::test]
    async fn test_open_url_uses_link_opener() -> Result<(), AppError> {
        let opener = RecordingOpener::default();
        let mut app = AppCore::new(
            AppConfig::default(),
            Arc::new(MockCatalog::instant()),
            Box::new(opener.clone()),
        );
        app.start().await;
        let commands = app
            .essentials()
            .ok_or(AppError::UnknownRoute("Essentials".into()))?
            .open_link(1, 0)?;
        app.execute(commands).await?;

        let opened = opener.0.lock().map(|o| o.clone()).unwrap_or_default();
        assert_eq!(opened, vec!["https://example.com/degree-audit"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_unmount_cancels_lifetime() {
        let mut app = app();
        app.select_tab(Tab::Exploration).await;
        let lifetime = app.lifetime(Tab::Exploration);
        assert!(!lifetime.is_cancelled());

        app.unmount(Tab::Exploration);
        assert!(lifetime.is_cancelled());
        assert!(!app.is_mounted(Tab::Exploration));

        app.select_tab(Tab::Exploration).await;
        assert!(!app.lifetime(Tab::Exploration).is_cancelled());
        assert_eq!(
            app.exploration().map(|e| e.visible_housing().len()),
            Some(3)
        );
    }

    #[tokio::test]
    async fn test_reload_current_retries_failed_list() {
        let config = AppConfig {
            fetch_latency_ms: 0,
            fail_resources: vec![Resource::Clubs],
            ..AppConfig::default()
        };
        let mut app = AppCore::with_mock(config);
        app.select_tab(Tab::Networking).await;
        assert!(app
            .networking()
            .and_then(|n| n.clubs().error().cloned())
            .is_some());

        let outcomes = app.reload_current().await;
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0], LoadOutcome::Applied);
        assert!(matches!(outcomes[1], LoadOutcome::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_screen_is_loading_while_fetch_is_pending() {
        let mut app = AppCore::with_mock(AppConfig::default());
        let load = app.open_tab(Tab::Campus);
        assert_eq!(load.tab(), Tab::Campus);
        assert!(app.is_mounted(Tab::Campus));
        assert_eq!(app.campus().map(CampusScreen::is_loading), Some(true));

        let source = app.source();
        let (answers, mid_fetch) = tokio::join!(load.run(source.as_ref()), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            app.campus().map(CampusScreen::is_loading)
        });
        assert_eq!(mid_fetch, Some(true));

        assert_eq!(
            app.accept(answers),
            vec![LoadOutcome::Applied, LoadOutcome::Applied]
        );
        assert_eq!(app.campus().map(CampusScreen::is_loading), Some(false));
        assert_eq!(
            app.campus().map(|c| c.departments().items().len()),
            Some(3)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_tab_switch_leaves_screen_loading() {
        let mut app = AppCore::with_mock(AppConfig::default());
        assert!(app.select_tab(Tab::Exploration).now_or_never().is_none());

        assert_eq!(app.current_tab(), Tab::Exploration);
        assert_eq!(app.exploration().map(ExplorationScreen::is_loading), Some(true));

        let outcomes = app.reload_current().await;
        assert_eq!(outcomes, vec![LoadOutcome::Applied]);
        assert_eq!(
            app.exploration().map(|e| e.visible_housing().len()),
            Some(3)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_answers_for_previous_mount_are_dropped() {
        let mut app = AppCore::with_mock(AppConfig::default());
        let stale = app.open_tab(Tab::Campus);
        app.unmount(Tab::Campus);
        let fresh = app.open_tab(Tab::Campus);

        let source = app.source();
        let stale_answers = stale.run(source.as_ref()).await;
        assert_eq!(
            app.accept(stale_answers),
            vec![LoadOutcome::Cancelled, LoadOutcome::Cancelled]
        );
        assert_eq!(app.campus().map(CampusScreen::is_loading), Some(true));

        let outcomes = app.complete(fresh).await;
        assert_eq!(outcomes, vec![LoadOutcome::Applied, LoadOutcome::Applied]);
        assert_eq!(app.campus().map(CampusScreen::is_loading), Some(false));
    }

    #[tokio::test]
    async fn test_tabs_without_lists_need_no_fetch() {
        let mut app = app();
        assert!(app.open_tab(Tab::Home).is_empty());
        assert!(app.begin_reload().is_empty());
        let load = app.open_tab(Tab::Networking);
        assert!(!load.is_empty());
        assert!(app.open_tab(Tab::Networking).is_empty());
    }
}
