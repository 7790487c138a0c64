//! Campus screen: department map and study rooms

use std::fmt;
use std::str::FromStr;

use crate::effects::{AppCommand, MapMarker, MapRegion, MapView, PlaceholderIntent};
use crate::errors::AppError;
use crate::fetch::{FetchResponse, LoadOutcome, Loadable, PendingFetch, Resource, ScreenLifetime};
use crate::navigation::{NavPayload, NavigationRequest, Route};
use crate::views::{Department, StudyRoom};

use super::{unrequested, LoadingScreen};

/// Campus sub-tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CampusTab {
    /// Map of department offices
    #[default]
    Departments,
    /// Study room cards
    StudyRooms,
}

impl CampusTab {
    /// Sub-tab key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::StudyRooms => "studyRooms",
        }
    }

    /// Sub-tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Departments => "Departments",
            Self::StudyRooms => "Study Rooms",
        }
    }
}

impl fmt::Display for CampusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampusTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Departments, Self::StudyRooms]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::UnknownSubTab(s.to_string()))
    }
}

/// Contents of the room info overlay
#[derive(Clone, Debug, PartialEq)]
pub enum RoomInfo {
    /// A department marker was tapped
    Department(Department),
    /// The overlay is open without a selection
    NoSelection,
}

/// Campus screen state
#[derive(Clone, Debug)]
pub struct CampusScreen {
    active: CampusTab,
    departments: Loadable<Department>,
    study_rooms: Loadable<StudyRoom>,
    selected: Option<Department>,
    modal_visible: bool,
    region: MapRegion,
}

impl CampusScreen {
    /// Create an unloaded screen whose map starts at `region`
    pub fn new(region: MapRegion) -> Self {
        Self {
            active: CampusTab::Departments,
            departments: Loadable::new(Resource::Departments),
            study_rooms: Loadable::new(Resource::StudyRooms),
            selected: None,
            modal_visible: false,
            region,
        }
    }

    /// Departments list with its status
    pub fn departments(&self) -> &Loadable<Department> {
        &self.departments
    }

    /// Study rooms list with its status
    pub fn study_rooms(&self) -> &Loadable<StudyRoom> {
        &self.study_rooms
    }

    /// Whether the active sub-tab is waiting for data
    pub fn is_loading(&self) -> bool {
        match self.active {
            CampusTab::Departments => self.departments.is_loading(),
            CampusTab::StudyRooms => self.study_rooms.is_loading(),
        }
    }

    /// Error of the active sub-tab's last load
    pub fn error(&self) -> Option<&AppError> {
        match self.active {
            CampusTab::Departments => self.departments.error(),
            CampusTab::StudyRooms => self.study_rooms.error(),
        }
    }

    /// Active sub-tab
    pub fn active_tab(&self) -> CampusTab {
        self.active
    }

    /// Switch sub-tab
    pub fn set_active_tab(&mut self, tab: CampusTab) {
        if self.active != tab {
            tracing::debug!(from = %self.active, to = %tab, "Campus sub-tab changed");
            self.active = tab;
        }
    }

    /// Map contents; only present while the departments tab is shown
    pub fn map_view(&self) -> Option<MapView> {
        if self.active != CampusTab::Departments {
            return None;
        }
        let markers = self
            .departments
            .items()
            .iter()
            .map(|d| MapMarker {
                id: d.id,
                coordinate: d.coordinate,
                title: d.name.clone(),
                description: d.building.clone(),
            })
            .collect();
        Some(MapView {
            region: self.region,
            markers,
        })
    }

    /// Study room cards; only present while the study rooms tab is shown
    pub fn study_room_cards(&self) -> Option<&[StudyRoom]> {
        (self.active == CampusTab::StudyRooms).then(|| self.study_rooms.items())
    }

    /// Handle a marker tap: select the department and open the overlay
    pub fn tap_marker(&mut self, department_id: u32) -> Result<(), AppError> {
        let department = self
            .departments
            .items()
            .iter()
            .find(|d| d.id == department_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("department", department_id))?;
        tracing::debug!(department = %department.name, "Marker tapped");
        self.selected = Some(department);
        self.modal_visible = true;
        Ok(())
    }

    /// Currently selected department
    pub fn selected(&self) -> Option<&Department> {
        self.selected.as_ref()
    }

    /// Whether the room info overlay is open
    pub fn is_modal_visible(&self) -> bool {
        self.modal_visible
    }

    /// Hide the room info overlay; the selection is kept
    pub fn close_modal(&mut self) {
        self.modal_visible = false;
    }

    /// Overlay contents, if the overlay is open on the departments tab
    pub fn room_info(&self) -> Option<RoomInfo> {
        if !self.modal_visible || self.active != CampusTab::Departments {
            return None;
        }
        Some(
            self.selected
                .clone()
                .map_or(RoomInfo::NoSelection, RoomInfo::Department),
        )
    }

    /// "Apply for Slot" on a study room card
    pub fn apply_for_slot(&self, room_id: u32) -> Result<Vec<AppCommand>, AppError> {
        let room = self
            .study_rooms
            .items()
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("study room", room_id))?;
        Ok(vec![
            AppCommand::Intent(PlaceholderIntent::ApplyForSlot {
                room: room.name.clone(),
            }),
            AppCommand::Navigate(NavigationRequest::with_payload(
                Route::ReservationConfirmation,
                NavPayload::Room(room),
            )),
        ])
    }
}

impl LoadingScreen for CampusScreen {
    fn mount(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        vec![
            self.departments.request(lifetime),
            self.study_rooms.request(lifetime),
        ]
    }

    fn reload(&mut self, lifetime: &ScreenLifetime) -> Vec<PendingFetch> {
        vec![match self.active {
            CampusTab::Departments => self.departments.request(lifetime),
            CampusTab::StudyRooms => self.study_rooms.request(lifetime),
        }]
    }

    fn accept(&mut self, response: FetchResponse) -> LoadOutcome {
        match response.resource() {
            Resource::Departments => self.departments.accept(response),
            Resource::StudyRooms => self.study_rooms.accept(response),
            other => unrequested("campus", other),
        }
    }
}
