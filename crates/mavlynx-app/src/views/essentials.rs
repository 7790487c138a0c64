//! # Essentials View State
//!
//! Administrative holds and the phone plan comparison.

use serde::{Deserialize, Serialize};

use crate::checklist::Checklist;
use crate::errors::AppError;

/// External resource attached to a hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldLink {
    /// Button label
    pub label: String,
    /// Target URL, opened by the external link opener
    pub url: String,
}

impl HoldLink {
    /// Create a link
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// An administrative requirement gated by a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeHold {
    /// Hold title
    pub title: String,
    /// Guidance shown above the checklist
    pub guidance: String,
    /// Steps to clear the hold
    pub checklist: Checklist,
    /// Helpful links
    pub links: Vec<HoldLink>,
}

impl AdministrativeHold {
    /// Whether every checklist step is done
    pub fn is_cleared(&self) -> bool {
        self.checklist.is_cleared()
    }

    /// Toggle a checklist step; see [`Checklist::toggle`]
    pub fn toggle(&mut self, index: usize) -> Result<bool, AppError> {
        self.checklist.toggle(index)
    }

    /// Look up a link by position
    pub fn link(&self, index: usize) -> Option<&HoldLink> {
        self.links.get(index)
    }
}

/// A carrier plan offered to incoming students
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonePlan {
    /// Plan name
    pub name: String,
    /// Monthly price, in whole currency units
    pub price: u32,
    /// Data allowance ("2GB", "Unlimited", ...)
    pub data_limit: String,
    /// Coverage area
    pub coverage: String,
}
