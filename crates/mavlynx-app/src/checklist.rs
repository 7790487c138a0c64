//! # Checklist Tracker
//!
//! Per-hold checklist where every item owns its own completion flag, so the
//! item text and its state can never drift apart.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Step the student has to complete
    pub text: String,
    /// Whether the student ticked it
    pub done: bool,
}

impl ChecklistItem {
    /// Create an unticked item
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Ordered list of checklist items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Create a checklist with every item unticked
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(ChecklistItem::new).collect(),
        }
    }

    /// Items in declaration order
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the item at `index`, leaving every other item untouched.
    ///
    /// Returns the new state of the item.
    pub fn toggle(&mut self, index: usize) -> Result<bool, AppError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(AppError::ChecklistIndexOutOfRange { index, len })?;
        item.done = !item.done;
        Ok(item.done)
    }

    /// Completion flags in item order
    pub fn states(&self) -> Vec<bool> {
        self.items.iter().map(|i| i.done).collect()
    }

    /// Number of ticked items
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|i| i.done).count()
    }

    /// True iff every item is ticked (vacuously true when empty)
    pub fn is_cleared(&self) -> bool {
        self.items.iter().all(|i| i.done)
    }

    /// Untick everything
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.done = false;
        }
    }
}
