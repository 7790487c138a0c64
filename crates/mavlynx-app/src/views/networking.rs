//! # Networking View State

use serde::{Deserialize, Serialize};

/// A graduate listed in the alumni directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumnus {
    /// Alumnus identifier
    pub id: u32,
    /// Full name
    pub name: String,
    /// Field of study
    pub field_of_study: String,
    /// Industry they work in
    pub industry: String,
}

/// A student club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Club identifier
    pub id: u32,
    /// Club name
    pub name: String,
    /// One-line pitch
    pub description: String,
}
