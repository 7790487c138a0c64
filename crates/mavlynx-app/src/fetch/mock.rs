//! Literal-backed catalog with simulated latency

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;

use super::{CatalogSource, Resource};
use crate::catalog;
use crate::errors::AppError;
use crate::views::{Alumnus, Club, Department, FoodRecommendation, HousingListing, StudyRoom};

/// Serves the campus catalog after a fixed delay.
///
/// Resources listed as failing return [`AppError::FetchFailed`] instead,
/// which lets frontends and tests exercise the retry path.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    latency: Duration,
    failing: HashSet<Resource>,
}

impl MockCatalog {
    /// Create a catalog answering after `latency`
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failing: HashSet::new(),
        }
    }

    /// Catalog that answers immediately
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Make `resource` fail from now on
    #[must_use]
    pub fn failing(mut self, resource: Resource) -> Self {
        self.failing.insert(resource);
        self
    }

    /// Configured latency
    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn serve<T>(&self, resource: Resource, make: fn() -> Vec<T>) -> Result<Vec<T>, AppError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.contains(&resource) {
            return Err(AppError::fetch_failed(
                resource.as_str(),
                "catalog service unavailable",
            ));
        }
        Ok(make())
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn departments(&self) -> Result<Vec<Department>, AppError> {
        self.serve(Resource::Departments, catalog::departments).await
    }

    async fn study_rooms(&self) -> Result<Vec<StudyRoom>, AppError> {
        self.serve(Resource::StudyRooms, catalog::study_rooms).await
    }

    async fn housing(&self) -> Result<Vec<HousingListing>, AppError> {
        self.serve(Resource::Housing, catalog::housing).await
    }

    async fn food_recommendations(&self) -> Result<Vec<FoodRecommendation>, AppError> {
        self.serve(Resource::FoodRecommendations, catalog::food_recommendations)
            .await
    }

    async fn alumni(&self) -> Result<Vec<Alumnus>, AppError> {
        self.serve(Resource::Alumni, catalog::alumni).await
    }

    async fn clubs(&self) -> Result<Vec<Club>, AppError> {
        self.serve(Resource::Clubs, catalog::clubs).await
    }
}
