//! Essentials screen: administrative holds and phone plans

use crate::catalog;
use crate::effects::{AppCommand, PlaceholderIntent};
use crate::errors::AppError;
use crate::navigation::{NavPayload, NavigationRequest, Route, Tab};
use crate::views::{AdministrativeHold, PhonePlan};

// Holds and plans have no ids; errors report their list position.
fn position(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

/// Essentials screen state
///
/// Holds and plans are literal; checklist progress lives only as long as
/// the screen does.
#[derive(Clone, Debug)]
pub struct EssentialsScreen {
    holds: Vec<AdministrativeHold>,
    plans: Vec<PhonePlan>,
}

impl Default for EssentialsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EssentialsScreen {
    /// Screen with every checklist item unticked
    pub fn new() -> Self {
        Self {
            holds: catalog::admin_holds(),
            plans: catalog::phone_plans(),
        }
    }

    /// Holds in display order
    pub fn holds(&self) -> &[AdministrativeHold] {
        &self.holds
    }

    /// Plans in display order
    pub fn plans(&self) -> &[PhonePlan] {
        &self.plans
    }

    /// Number of holds whose checklist is complete
    pub fn cleared_count(&self) -> usize {
        self.holds.iter().filter(|h| h.is_cleared()).count()
    }

    fn hold_mut(&mut self, index: usize) -> Result<&mut AdministrativeHold, AppError> {
        self.holds
            .get_mut(index)
            .ok_or_else(|| AppError::not_found("hold", position(index)))
    }

    /// Tick or untick a checklist item; returns whether the hold is now cleared
    pub fn toggle(&mut self, hold: usize, item: usize) -> Result<bool, AppError> {
        let entry = self.hold_mut(hold)?;
        let done = entry.toggle(item)?;
        let cleared = entry.is_cleared();
        tracing::debug!(hold = %entry.title, item, done, cleared, "Checklist item toggled");
        Ok(cleared)
    }

    /// A link button on a hold card
    pub fn open_link(&self, hold: usize, link: usize) -> Result<Vec<AppCommand>, AppError> {
        let entry = self
            .holds
            .get(hold)
            .ok_or_else(|| AppError::not_found("hold", position(hold)))?;
        let target = entry
            .link(link)
            .ok_or_else(|| AppError::not_found("hold link", position(link)))?;
        Ok(vec![AppCommand::OpenUrl(target.url.clone())])
    }

    /// "Save Progress"
    pub fn save_progress(&self) -> Vec<AppCommand> {
        vec![AppCommand::Intent(PlaceholderIntent::SaveProgress {
            cleared_holds: self.cleared_count(),
        })]
    }

    /// "Apply for This Plan": hands the plan to the Home tab
    pub fn apply_for_plan(&self, index: usize) -> Result<Vec<AppCommand>, AppError> {
        let plan = self
            .plans
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::not_found("phone plan", position(index)))?;
        Ok(vec![
            AppCommand::Intent(PlaceholderIntent::ApplyForPlan {
                plan: plan.name.clone(),
            }),
            AppCommand::Navigate(NavigationRequest::with_payload(
                Route::Tab(Tab::Home),
                NavPayload::SelectedPlan(plan),
            )),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_aid_hold_clears_when_all_ticked() -> Result<(), AppError> {
        let mut screen = EssentialsScreen::new();
        assert_eq!(screen.holds()[0].title, "Financial Aid Hold");
        assert_eq!(screen.holds()[0].checklist.states(), vec![false, false, false]);

        assert!(!screen.toggle(0, 0)?);
        assert!(!screen.toggle(0, 1)?);
        assert!(screen.toggle(0, 2)?);
        assert_eq!(screen.cleared_count(), 1);

        assert!(!screen.toggle(0, 1)?);
        assert_eq!(screen.holds()[0].checklist.states(), vec![true, false, true]);
        assert_eq!(screen.cleared_count(), 0);
        Ok(())
    }

    #[test]
    fn test_holds_are_independent() -> Result<(), AppError> {
        let mut screen = EssentialsScreen::new();
        screen.toggle(1, 0)?;
        assert_eq!(screen.holds()[0].checklist.done_count(), 0);
        assert_eq!(screen.holds()[1].checklist.done_count(), 1);
        Ok(())
    }

    #[test]
    fn test_out_of_range_toggle_is_rejected() {
        let mut screen = EssentialsScreen::new();
        assert_eq!(
            screen.toggle(0, 3),
            Err(AppError::ChecklistIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(screen.toggle(5, 0), Err(AppError::not_found("hold", 5)));
        assert_eq!(screen.holds()[0].checklist.done_count(), 0);
    }

    #[test]
    fn test_open_link() -> Result<(), AppError> {
        let screen = EssentialsScreen::new();
        assert_eq!(
            screen.open_link(0, 0)?,
            vec![AppCommand::OpenUrl(
                "https://studentaid.gov/h/apply-for-aid/fafsa".to_string()
            )]
        );
        assert!(screen.open_link(0, 2).is_err());
        Ok(())
    }

    #[test]
    fn test_apply_for_plan_targets_home() -> Result<(), AppError> {
        let screen = EssentialsScreen::new();
        let commands = screen.apply_for_plan(1)?;
        assert_eq!(
            commands[0],
            AppCommand::Intent(PlaceholderIntent::ApplyForPlan {
                plan: "Standard Plan".to_string()
            })
        );
        match &commands[1] {
            AppCommand::Navigate(req) => {
                assert_eq!(req.route, Route::Tab(Tab::Home));
                assert!(
                    matches!(&req.payload, Some(NavPayload::SelectedPlan(p)) if p.price == 45)
                );
            }
            other => panic!("expected navigation, got {other:?}"),
        }
        assert!(screen.apply_for_plan(3).is_err());
        Ok(())
    }

    #[test]
    fn test_save_progress_reports_cleared_holds() -> Result<(), AppError> {
        let mut screen = EssentialsScreen::new();
        for item in 0..3 {
            screen.toggle(1, item)?;
        }
        assert_eq!(
            screen.save_progress(),
            vec![AppCommand::Intent(PlaceholderIntent::SaveProgress { cleared_holds: 1 })]
        );
        Ok(())
    }
}
