//! # Exploration View State
//!
//! Housing listings and food/recreation recommendations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

// =============================================================================
// Housing
// =============================================================================

/// Kind of unit a housing listing offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    /// No constraint (filter value only)
    #[default]
    #[serde(rename = "all")]
    All,
    /// Studio apartment
    #[serde(rename = "studio")]
    Studio,
    /// One-bedroom apartment
    #[serde(rename = "1-bedroom")]
    OneBedroom,
    /// Shared unit
    #[serde(rename = "shared")]
    Shared,
}

impl RoomType {
    /// Wire name used in payloads and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Studio => "studio",
            Self::OneBedroom => "1-bedroom",
            Self::Shared => "shared",
        }
    }

    /// Display label used by the filter form
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Studio => "Studio",
            Self::OneBedroom => "1-Bedroom",
            Self::Shared => "Shared",
        }
    }

    /// Selectable values, in form order
    pub fn all() -> &'static [RoomType] {
        &[Self::All, Self::Studio, Self::OneBedroom, Self::Shared]
    }

    /// Whether a listing of type `other` satisfies this filter value
    pub fn accepts(&self, other: RoomType) -> bool {
        *self == Self::All || *self == other
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::InvalidInput(format!("unknown room type: {s}")))
    }
}

/// An off-campus housing listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingListing {
    /// Listing identifier
    pub id: u32,
    /// Image reference (URL)
    pub image: String,
    /// Street address
    pub address: String,
    /// Monthly rent, in whole currency units
    pub rent: u32,
    /// Amenity labels
    pub amenities: Vec<String>,
    /// Size in square feet
    pub size: u32,
    /// Kind of unit
    pub room_type: RoomType,
}

impl HousingListing {
    /// Amenities joined for a single display line
    pub fn amenities_line(&self) -> String {
        self.amenities.join(", ")
    }
}

// =============================================================================
// Food & Recreation
// =============================================================================

/// Neutral tag colour for categories without a dedicated colour
pub const DEFAULT_CATEGORY_COLOR: &str = "#9E9E9E";

/// Known recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodCategory {
    /// Restaurants and cafes
    Dining,
    /// Grocery stores
    Grocery,
    /// Entertainment venues
    Entertainment,
    /// Anything else
    Other,
}

impl FoodCategory {
    /// Classify a free-form category label, ignoring case.
    ///
    /// Unrecognized labels map to [`FoodCategory::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "dining" => Self::Dining,
            "grocery" => Self::Grocery,
            "entertainment" => Self::Entertainment,
            _ => Self::Other,
        }
    }

    /// Tag colour for this category
    pub fn color(&self) -> &'static str {
        match self {
            Self::Dining => "#FF9800",
            Self::Grocery => "#4CAF50",
            Self::Entertainment => "#2196F3",
            Self::Other => DEFAULT_CATEGORY_COLOR,
        }
    }
}

/// Tag colour for a free-form category label
pub fn category_color(label: &str) -> &'static str {
    FoodCategory::from_label(label).color()
}

/// A food or recreation spot near campus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendation {
    /// Recommendation identifier
    pub id: u32,
    /// Place name
    pub name: String,
    /// Short description
    pub description: String,
    /// Street address
    pub location: String,
    /// Rating between 0 and 5
    pub rating: f32,
    /// Category label as provided by the source
    pub category: String,
}

impl FoodRecommendation {
    /// Classified category
    pub fn category_kind(&self) -> FoodCategory {
        FoodCategory::from_label(&self.category)
    }

    /// Tag colour for this recommendation
    pub fn category_color(&self) -> &'static str {
        category_color(&self.category)
    }

    /// Five-star row; star `n` (1-based) is filled iff `n <= rating`
    pub fn stars(&self) -> [bool; 5] {
        let mut stars = [false; 5];
        for (i, star) in stars.iter_mut().enumerate() {
            *star = (i + 1) as f32 <= self.rating;
        }
        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(rating: f32, category: &str) -> FoodRecommendation {
        FoodRecommendation {
            id: 1,
            name: "Spot".to_string(),
            description: String::new(),
            location: String::new(),
            rating,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_category_color_ignores_case() {
        assert_eq!(category_color("Grocery"), "#4CAF50");
        assert_eq!(category_color("GROCERY"), "#4CAF50");
        assert_eq!(category_color("grocery"), "#4CAF50");
    }

    #[test]
    fn test_unknown_category_uses_neutral_color() {
        assert_eq!(category_color("unknown"), DEFAULT_CATEGORY_COLOR);
        assert_eq!(category_color(""), DEFAULT_CATEGORY_COLOR);
        assert_eq!(FoodCategory::from_label("unknown"), FoodCategory::Other);
    }

    #[test]
    fn test_stars_follow_rating() {
        assert_eq!(food(4.5, "Dining").stars(), [true, true, true, true, false]);
        assert_eq!(food(4.0, "Dining").stars(), [true, true, true, true, false]);
        assert_eq!(food(0.0, "Dining").stars(), [false; 5]);
        assert_eq!(food(5.0, "Dining").stars(), [true; 5]);
    }

    #[test]
    fn test_room_type_parse() {
        assert_eq!("studio".parse::<RoomType>().ok(), Some(RoomType::Studio));
        assert_eq!("1-Bedroom".parse::<RoomType>().ok(), Some(RoomType::OneBedroom));
        assert_eq!("ALL".parse::<RoomType>().ok(), Some(RoomType::All));
        assert!("penthouse".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_room_type_accepts() {
        assert!(RoomType::All.accepts(RoomType::Shared));
        assert!(RoomType::Studio.accepts(RoomType::Studio));
        assert!(!RoomType::Studio.accepts(RoomType::Shared));
    }

    #[test]
    fn test_room_type_serde_names() {
        let json = serde_json::to_string(&RoomType::OneBedroom).unwrap_or_default();
        assert_eq!(json, "\"1-bedroom\"");
    }
}
