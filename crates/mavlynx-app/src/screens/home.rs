//! Home screen: landing page that shows the plan picked on Essentials

use crate::errors::AppError;
use crate::navigation::{NavPayload, Route, Tab};
use crate::views::PhonePlan;

const ROUTE: Route = Route::Tab(Tab::Home);

/// Home screen state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeScreen {
    selected_plan: Option<PhonePlan>,
}

impl HomeScreen {
    /// Screen with no plan selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret a navigation payload.
    ///
    /// `SelectedPlan` records the plan and no payload leaves the screen as
    /// it is. Any other payload resets the screen to its default state and
    /// is reported as [`AppError::NavigationPayloadInvalid`].
    pub fn receive(&mut self, payload: Option<&NavPayload>) -> Result<(), AppError> {
        match payload {
            None => Ok(()),
            Some(NavPayload::SelectedPlan(plan)) => {
                tracing::info!(plan = %plan.name, price = plan.price, "Plan selected");
                self.selected_plan = Some(plan.clone());
                Ok(())
            }
            Some(other) => {
                self.selected_plan = None;
                let err = AppError::invalid_payload(
                    ROUTE,
                    format!("unexpected {} payload", other.kind()),
                );
                tracing::warn!(error = %err, "Discarding navigation payload");
                Err(err)
            }
        }
    }

    /// Interpret an untyped payload, e.g. one received over a deep link
    pub fn receive_json(&mut self, value: serde_json::Value) -> Result<(), AppError> {
        match NavPayload::from_json(ROUTE, value) {
            Ok(payload) => self.receive(Some(&payload)),
            Err(err) => {
                self.selected_plan = None;
                tracing::warn!(error = %err, "Discarding navigation payload");
                Err(err)
            }
        }
    }

    /// Plan chosen on the Essentials tab
    pub fn selected_plan(&self) -> Option<&PhonePlan> {
        self.selected_plan.as_ref()
    }

    /// Monthly cost of the selected plan
    pub fn estimated_monthly_cost(&self) -> Option<u32> {
        self.selected_plan.as_ref().map(|p| p.price)
    }

    /// Greeting line
    pub fn headline(&self) -> String {
        match &self.selected_plan {
            Some(plan) => format!(
                "Your phone plan: {} (${}/month, {}, {})",
                plan.name, plan.price, plan.data_limit, plan.coverage
            ),
            None => "Welcome to MavLynx".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_selected_plan_is_recorded() -> Result<(), AppError> {
        let mut home = HomeScreen::new();
        assert_eq!(home.estimated_monthly_cost(), None);

        let plan = catalog::phone_plans().remove(2);
        home.receive(Some(&NavPayload::SelectedPlan(plan)))?;
        assert_eq!(home.estimated_monthly_cost(), Some(60));
        assert_eq!(
            home.headline(),
            "Your phone plan: Premium Plan ($60/month, Unlimited, Global)"
        );

        home.receive(None)?;
        assert_eq!(home.selected_plan().map(|p| p.price), Some(60));
        Ok(())
    }

    #[test]
    fn test_unexpected_payload_falls_back_to_default() -> Result<(), AppError> {
        let mut home = HomeScreen::new();
        home.receive(Some(&NavPayload::SelectedPlan(
            catalog::phone_plans().remove(0),
        )))?;

        let club = catalog::clubs().remove(0);
        let err = home.receive(Some(&NavPayload::Club(club)));
        assert!(matches!(err, Err(AppError::NavigationPayloadInvalid { .. })));
        assert_eq!(home, HomeScreen::default());
        Ok(())
    }

    #[test]
    fn test_json_payload() -> Result<(), AppError> {
        let mut home = HomeScreen::new();
        home.receive_json(serde_json::json!({
            "selectedPlan": {
                "name": "Standard Plan",
                "price": 45,
                "dataLimit": "5GB",
                "coverage": "Nationwide + Canada"
            }
        }))?;
        assert_eq!(home.estimated_monthly_cost(), Some(45));

        assert!(home
            .receive_json(serde_json::json!({ "plan": "premium" }))
            .is_err());
        assert_eq!(home.selected_plan(), None);
        Ok(())
    }
}
