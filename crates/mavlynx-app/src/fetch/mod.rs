//! # Domain Fetchers
//!
//! The async seam between screens and wherever their lists come from.
//!
//! ## Design
//!
//! ```text
//! Screen controller                 CatalogSource
//! ┌──────────────────────┐          ┌──────────────────┐
//! │ Loadable<T>          │  begin   │ MockCatalog      │
//! │   latest token ──────┼────────► │ (or an API       │
//! │   status / items ◄───┼──────────┤  client)         │
//! └──────────────────────┘ resolve  └──────────────────┘
//! ```
//!
//! Every request gets a monotonically increasing [`RequestToken`]. A
//! response is applied only if its token is still the latest one; anything
//! older resolves to [`LoadOutcome::Stale`]. A [`ScreenLifetime`] is
//! cancelled on unmount so a response that arrives afterwards is dropped.
//!
//! Requests are plain values. [`Loadable::request`] marks the list as
//! loading and returns a [`PendingFetch`]; running it borrows only the
//! source, so the screen stays readable (and can be unmounted) while the
//! fetch is in flight. [`Loadable::accept`] takes the [`FetchResponse`]
//! back.

mod mock;

pub use mock::MockCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::errors::AppError;
use crate::views::{Alumnus, Club, Department, FoodRecommendation, HousingListing, StudyRoom};

// =============================================================================
// Resources
// =============================================================================

/// Lists a [`CatalogSource`] can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    /// Campus departments
    Departments,
    /// Study rooms
    StudyRooms,
    /// Housing listings
    Housing,
    /// Food and recreation spots
    FoodRecommendations,
    /// Alumni directory
    Alumni,
    /// Student clubs
    Clubs,
}

impl Resource {
    /// Name used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::StudyRooms => "studyRooms",
            Self::Housing => "housing",
            Self::FoodRecommendations => "foodRecommendations",
            Self::Alumni => "alumni",
            Self::Clubs => "clubs",
        }
    }

    /// Every resource
    pub fn all() -> &'static [Resource] {
        &[
            Self::Departments,
            Self::StudyRooms,
            Self::Housing,
            Self::FoodRecommendations,
            Self::Alumni,
            Self::Clubs,
        ]
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown resource: {s}")))
    }
}

/// Data source for every screen list.
///
/// The mock implementation serves literals after a fixed delay; a real
/// implementation would call the campus API.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Campus departments
    async fn departments(&self) -> Result<Vec<Department>, AppError>;

    /// Study rooms
    async fn study_rooms(&self) -> Result<Vec<StudyRoom>, AppError>;

    /// Housing listings
    async fn housing(&self) -> Result<Vec<HousingListing>, AppError>;

    /// Food and recreation recommendations
    async fn food_recommendations(&self) -> Result<Vec<FoodRecommendation>, AppError>;

    /// Alumni directory
    async fn alumni(&self) -> Result<Vec<Alumnus>, AppError>;

    /// Student clubs
    async fn clubs(&self) -> Result<Vec<Club>, AppError>;
}

// =============================================================================
// Request tokens and outcomes
// =============================================================================

/// Identifies one request against a [`Loadable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// What happened to a response when it reached the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list was replaced
    Applied,
    /// The source failed; the previous list is kept
    Failed(AppError),
    /// A newer request was issued meanwhile, or no list asked for the
    /// response; it was discarded
    Stale,
    /// The screen was unmounted before the response arrived
    Cancelled,
}

impl LoadOutcome {
    /// Whether the response changed the list
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Loading status of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Never requested
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request succeeded
    Ready,
    /// The last request failed
    Failed(AppError),
}

/// A list owned by a screen, plus the bookkeeping for loading it
#[derive(Debug, Clone)]
pub struct Loadable<T> {
    resource: Resource,
    items: Vec<T>,
    status: LoadStatus,
    latest: u64,
}

impl<T> Loadable<T> {
    /// Create an empty, idle list
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            items: Vec::new(),
            status: LoadStatus::Idle,
            latest: 0,
        }
    }

    /// Which resource this list holds
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Current items (the last successful response)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Current status
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    /// Error of the last request, if it failed
    pub fn error(&self) -> Option<&AppError> {
        match &self.status {
            LoadStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Start a request; any request still in flight becomes stale
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.status = LoadStatus::Loading;
        RequestToken(self.latest)
    }

    /// Whether `token` is the most recent request
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Apply a response if it belongs to the most recent request
    pub fn resolve(&mut self, token: RequestToken, result: Result<Vec<T>, AppError>) -> LoadOutcome {
        if !self.is_current(token) {
            tracing::debug!(
                resource = %self.resource,
                token = token.0,
                latest = self.latest,
                "Ignoring stale response"
            );
            return LoadOutcome::Stale;
        }
        match result {
            Ok(items) => {
                tracing::debug!(resource = %self.resource, count = items.len(), "List loaded");
                self.items = items;
                self.status = LoadStatus::Ready;
                LoadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(resource = %self.resource, error = %err, "Fetch failed");
                self.status = LoadStatus::Failed(err.clone());
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Drop a request whose screen went away.
    ///
    /// The loading flag is cleared so it never stays stuck.
    pub fn abandon(&mut self, token: RequestToken) -> LoadOutcome {
        if self.is_current(token) {
            self.status = if self.items.is_empty() {
                LoadStatus::Idle
            } else {
                LoadStatus::Ready
            };
        }
        LoadOutcome::Cancelled
    }
}

impl<T: CatalogRecord> Loadable<T> {
    /// Start a request tied to `lifetime`
    pub fn request(&mut self, lifetime: &ScreenLifetime) -> PendingFetch {
        PendingFetch {
            resource: self.resource,
            token: self.begin(),
            lifetime: lifetime.clone(),
        }
    }

    /// Take back the response to a [`request`](Self::request)
    pub fn accept(&mut self, response: FetchResponse) -> LoadOutcome {
        let FetchResponse {
            resource,
            token,
            lifetime,
            result,
        } = response;
        let result = match result {
            Some(result) if !lifetime.is_cancelled() => result,
            _ => return self.abandon(token),
        };
        let items = result.and_then(|data| {
            T::from_data(data)
                .ok_or_else(|| AppError::fetch_failed(resource.as_str(), "response for another list"))
        });
        self.resolve(token, items)
    }
}

// =============================================================================
// Requests in flight
// =============================================================================

/// One list as it came back from a [`CatalogSource`]
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogData {
    /// Campus departments
    Departments(Vec<Department>),
    /// Study rooms
    StudyRooms(Vec<StudyRoom>),
    /// Housing listings
    Housing(Vec<HousingListing>),
    /// Food and recreation spots
    FoodRecommendations(Vec<FoodRecommendation>),
    /// Alumni directory
    Alumni(Vec<Alumnus>),
    /// Student clubs
    Clubs(Vec<Club>),
}

/// Records a [`Loadable`] can request from a [`CatalogSource`]
pub trait CatalogRecord: Sized {
    /// Take this record type's list out of a response
    fn from_data(data: CatalogData) -> Option<Vec<Self>>;
}

macro_rules! catalog_record {
    ($record:ty, $variant:ident) => {
        impl CatalogRecord for $record {
            fn from_data(data: CatalogData) -> Option<Vec<Self>> {
                match data {
                    CatalogData::$variant(items) => Some(items),
                    _ => None,
                }
            }
        }
    };
}

catalog_record!(Department, Departments);
catalog_record!(StudyRoom, StudyRooms);
catalog_record!(HousingListing, Housing);
catalog_record!(FoodRecommendation, FoodRecommendations);
catalog_record!(Alumnus, Alumni);
catalog_record!(Club, Clubs);

/// Ask `source` for one resource
pub async fn fetch_resource(
    source: &dyn CatalogSource,
    resource: Resource,
) -> Result<CatalogData, AppError> {
    Ok(match resource {
        Resource::Departments => CatalogData::Departments(source.departments().await?),
        Resource::StudyRooms => CatalogData::StudyRooms(source.study_rooms().await?),
        Resource::Housing => CatalogData::Housing(source.housing().await?),
        Resource::FoodRecommendations => {
            CatalogData::FoodRecommendations(source.food_recommendations().await?)
        }
        Resource::Alumni => CatalogData::Alumni(source.alumni().await?),
        Resource::Clubs => CatalogData::Clubs(source.clubs().await?),
    })
}

/// A request a list is waiting on
#[derive(Debug, Clone)]
pub struct PendingFetch {
    resource: Resource,
    token: RequestToken,
    lifetime: ScreenLifetime,
}

impl PendingFetch {
    /// Requested resource
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Ask `source`; gives up as soon as the issuing screen is unmounted
    pub async fn run(self, source: &dyn CatalogSource) -> FetchResponse {
        let result = self
            .lifetime
            .guard(fetch_resource(source, self.resource))
            .await;
        FetchResponse {
            resource: self.resource,
            token: self.token,
            lifetime: self.lifetime,
            result,
        }
    }
}

/// Answer to a [`PendingFetch`]
#[derive(Debug, Clone)]
pub struct FetchResponse {
    resource: Resource,
    token: RequestToken,
    lifetime: ScreenLifetime,
    result: Option<Result<CatalogData, AppError>>,
}

impl FetchResponse {
    /// Resource this answers
    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Whether the issuing screen was unmounted before this could be applied
    pub fn is_cancelled(&self) -> bool {
        self.result.is_none() || self.lifetime.is_cancelled()
    }
}

/// Run every request concurrently, answers in request order
pub async fn run_all(source: &dyn CatalogSource, pending: Vec<PendingFetch>) -> Vec<FetchResponse> {
    futures::future::join_all(pending.into_iter().map(|fetch| fetch.run(source))).await
}

// =============================================================================
// Screen lifetime
// =============================================================================

#[derive(Debug, Default)]
struct LifetimeInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cooperative cancellation handle tied to a mounted screen.
///
/// Clones share state; cancelling one cancels all.
#[derive(Debug, Clone, Default)]
pub struct ScreenLifetime {
    inner: Arc<LifetimeInner>,
}

impl ScreenLifetime {
    /// Create a live handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the screen as unmounted and wake every pending fetch
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Non-blocking cancellation check
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves when cancellation is requested
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Await `fut` unless the screen is unmounted first
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockCatalog;

    #[test]
    fn test_latest_request_wins() {
        let mut list: Loadable<u32> = Loadable::new(Resource::Housing);
        let first = list.begin();
        let second = list.begin();
        assert!(list.is_loading());

        assert_eq!(list.resolve(second, Ok(vec![2])), LoadOutcome::Applied);
        assert_eq!(list.resolve(first, Ok(vec![1])), LoadOutcome::Stale);
        assert_eq!(list.items(), &[2]);
        assert!(!list.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut list: Loadable<u32> = Loadable::new(Resource::Housing);
        let first = list.begin();
        let _second = list.begin();
        assert_eq!(list.resolve(first, Ok(vec![1])), LoadOutcome::Stale);
        assert!(list.is_loading());
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut list: Loadable<u32> = Loadable::new(Resource::Clubs);
        let token = list.begin();
        list.resolve(token, Ok(vec![7, 8]));

        let token = list.begin();
        let err = AppError::fetch_failed("clubs", "offline");
        assert_eq!(
            list.resolve(token, Err(err.clone())),
            LoadOutcome::Failed(err.clone())
        );
        assert_eq!(list.items(), &[7, 8]);
        assert_eq!(list.error(), Some(&err));
        assert!(!list.is_loading());
    }

    #[test]
    fn test_abandon_clears_loading() {
        let mut list: Loadable<u32> = Loadable::new(Resource::Alumni);
        let token = list.begin();
        assert_eq!(list.abandon(token), LoadOutcome::Cancelled);
        assert_eq!(list.status(), &LoadStatus::Idle);
    }

    #[test]
    fn test_resource_names_round_trip() {
        for resource in Resource::all() {
            assert_eq!(resource.as_str().parse::<Resource>().ok(), Some(*resource));
        }
        assert!("library".parse::<Resource>().is_err());
    }

    #[tokio::test]
    async fn test_guard_returns_output_when_live() {
        let lifetime = ScreenLifetime::new();
        assert_eq!(lifetime.guard(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_request_after_cancel_is_noop() {
        let lifetime = ScreenLifetime::new();
        lifetime.cancel();
        let mut list: Loadable<Department> = Loadable::new(Resource::Departments);
        let response = list.request(&lifetime).run(&MockCatalog::instant()).await;
        assert!(response.is_cancelled());
        assert_eq!(list.accept(response), LoadOutcome::Cancelled);
        assert!(list.items().is_empty());
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_cancel_while_pending() {
        let lifetime = ScreenLifetime::new();
        let unmount = lifetime.clone();
        let mut list: Loadable<Club> = Loadable::new(Resource::Clubs);
        let pending = list.request(&lifetime);
        assert!(list.is_loading());

        let source = MockCatalog::new(std::time::Duration::from_secs(3600));
        let (response, ()) = tokio::join!(pending.run(&source), async move { unmount.cancel() });
        assert_eq!(list.accept(response), LoadOutcome::Cancelled);
        assert!(!list.is_loading());
    }

    #[tokio::test]
    async fn test_responses_reach_their_lists() {
        let source = MockCatalog::instant();
        let lifetime = ScreenLifetime::new();
        let mut alumni: Loadable<Alumnus> = Loadable::new(Resource::Alumni);
        let mut clubs: Loadable<Club> = Loadable::new(Resource::Clubs);

        let pending = vec![alumni.request(&lifetime), clubs.request(&lifetime)];
        let mut responses = run_all(&source, pending).await.into_iter();
        let (Some(first), Some(second)) = (responses.next(), responses.next()) else {
            panic!("expected two responses");
        };
        assert_eq!(first.resource(), Resource::Alumni);
        assert_eq!(alumni.accept(first), LoadOutcome::Applied);
        assert_eq!(clubs.accept(second), LoadOutcome::Applied);
        assert_eq!(alumni.items().len(), 3);
        assert_eq!(clubs.items().len(), 4);
    }

    #[tokio::test]
    async fn test_mismatched_response_fails_the_list() {
        let lifetime = ScreenLifetime::new();
        let mut clubs: Loadable<Club> = Loadable::new(Resource::Clubs);
        let mut alumni: Loadable<Alumnus> = Loadable::new(Resource::Alumni);
        let _club_request = clubs.request(&lifetime);
        let response = alumni.request(&lifetime).run(&MockCatalog::instant()).await;

        assert!(matches!(clubs.accept(response), LoadOutcome::Failed(_)));
        assert!(clubs.error().is_some());
    }

    #[tokio::test]
    async fn test_source_failure_is_reported() {
        let source = MockCatalog::instant().failing(Resource::Housing);
        let mut housing: Loadable<HousingListing> = Loadable::new(Resource::Housing);
        let response = housing.request(&ScreenLifetime::new()).run(&source).await;
        assert!(!response.is_cancelled());
        assert!(matches!(housing.accept(response), LoadOutcome::Failed(_)));
        assert!(housing.error().is_some_and(AppError::is_recoverable));
    }
}
