//! # Campus View State

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// An academic department and the room it is found in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Department identifier
    pub id: u32,
    /// Department name
    pub name: String,
    /// Building the department office is in
    pub building: String,
    /// Room number inside the building
    pub room_number: String,
    /// Floor description ("Ground Floor", "3rd Floor", ...)
    pub floor: String,
    /// Map position of the building
    pub coordinate: Coordinate,
    /// Walking directions from the building entrance
    pub directions: String,
}

/// A bookable study room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRoom {
    /// Room identifier
    pub id: u32,
    /// Room name
    pub name: String,
    /// Short description
    pub description: String,
    /// Open time slots, in display order
    pub available_slots: Vec<String>,
    /// Occupancy descriptor ("Single", "Up to 6 people", ...)
    pub occupancy: String,
    /// Where the room is
    pub location: String,
}

impl StudyRoom {
    /// Time slots joined for a single display line
    pub fn slots_line(&self) -> String {
        self.available_slots.join(", ")
    }
}
