//! # Housing Filter Engine
//!
//! Narrows the cached housing list by location, price and room type.
//! Filtering is client-side and order-preserving.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::views::{HousingListing, RoomType};

/// Upper bound of the max-price slider
pub const DEFAULT_PRICE_CEILING: u32 = 5000;

/// Step of the max-price slider
pub const DEFAULT_PRICE_STEP: u32 = 100;

/// Filter configuration for the housing tab
///
/// `min_price <= max_price` always holds; only `max_price` is adjustable.
/// Deserializing checks the bounds too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FilterFields")]
pub struct HousingFilterConfig {
    /// Case-insensitive address substring; empty means no constraint
    pub location: String,
    /// Lowest accepted rent
    min_price: u32,
    /// Highest accepted rent
    max_price: u32,
    /// Accepted room type
    pub room_type: RoomType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterFields {
    location: String,
    min_price: u32,
    max_price: u32,
    room_type: RoomType,
}

impl TryFrom<FilterFields> for HousingFilterConfig {
    type Error = AppError;

    fn try_from(fields: FilterFields) -> Result<Self, Self::Error> {
        if fields.min_price > fields.max_price {
            return Err(AppError::InvalidInput(format!(
                "minPrice {} is above maxPrice {}",
                fields.min_price, fields.max_price
            )));
        }
        Ok(Self {
            location: fields.location,
            min_price: fields.min_price,
            max_price: fields.max_price,
            room_type: fields.room_type,
        })
    }
}

impl Default for HousingFilterConfig {
    fn default() -> Self {
        Self::with_ceiling(DEFAULT_PRICE_CEILING)
    }
}

impl HousingFilterConfig {
    /// Unconstrained filter whose price range tops out at `ceiling`
    pub fn with_ceiling(ceiling: u32) -> Self {
        Self {
            location: String::new(),
            min_price: 0,
            max_price: ceiling,
            room_type: RoomType::All,
        }
    }

    /// Lowest accepted rent
    pub fn min_price(&self) -> u32 {
        self.min_price
    }

    /// Highest accepted rent
    pub fn max_price(&self) -> u32 {
        self.max_price
    }

    /// Move the max-price slider.
    ///
    /// The value snaps to the nearest multiple of `step` and is clamped to
    /// `[min_price, ceiling]`. Returns the value actually stored.
    pub fn set_max_price(&mut self, value: u32, ceiling: u32, step: u32) -> u32 {
        let snapped = if step == 0 {
            value
        } else {
            let step = u64::from(step);
            let rounded = (u64::from(value) + step / 2) / step * step;
            u32::try_from(rounded).unwrap_or(u32::MAX)
        };
        self.max_price = snapped.clamp(self.min_price, ceiling.max(self.min_price));
        self.max_price
    }

    /// Whether a single listing satisfies every predicate
    pub fn matches(&self, listing: &HousingListing) -> bool {
        let location_ok = self.location.is_empty()
            || listing
                .address
                .to_lowercase()
                .contains(&self.location.to_lowercase());

        location_ok
            && listing.rent >= self.min_price
            && listing.rent <= self.max_price
            && self.room_type.accepts(listing.room_type)
    }

    /// Keep the listings that match, in their original order
    pub fn apply<'a>(&self, listings: &'a [HousingListing]) -> Vec<&'a HousingListing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }

    /// Human-readable price range ("$0 - $5000")
    pub fn price_range_label(&self) -> String {
        format!("${} - ${}", self.min_price, self.max_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use proptest::prelude::*;

    fn listing(id: u32, address: &str, rent: u32, room_type: RoomType) -> HousingListing {
        HousingListing {
            id,
            image: String::new(),
            address: address.to_string(),
            rent,
            amenities: Vec::new(),
            size: 500,
            room_type,
        }
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let listings = catalog::housing();
        let filter = HousingFilterConfig::default();
        assert_eq!(filter.apply(&listings).len(), listings.len());
    }

    #[test]
    fn test_location_is_case_insensitive_substring() {
        let listings = catalog::housing();
        let filter = HousingFilterConfig {
            location: "ELM".to_string(),
            ..HousingFilterConfig::default()
        };
        let addresses: Vec<&str> = filter
            .apply(&listings)
            .iter()
            .map(|l| l.address.as_str())
            .collect();
        assert_eq!(addresses, vec!["456 Elm St"]);
    }

    #[test]
    fn test_max_price_excludes_expensive() {
        let listings = catalog::housing();
        let mut filter = HousingFilterConfig::default();
        filter.set_max_price(1200, DEFAULT_PRICE_CEILING, DEFAULT_PRICE_STEP);
        let ids: Vec<u32> = filter.apply(&listings).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_room_type_is_applied() {
        let listings = vec![
            listing(1, "A St", 900, RoomType::Studio),
            listing(2, "B St", 900, RoomType::Shared),
            listing(3, "C St", 900, RoomType::Studio),
        ];
        let filter = HousingFilterConfig {
            room_type: RoomType::Studio,
            ..HousingFilterConfig::default()
        };
        let ids: Vec<u32> = filter.apply(&listings).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_deserialize_checks_price_bounds() {
        let json = serde_json::json!({
            "location": "elm",
            "minPrice": 0,
            "maxPrice": 1500,
            "roomType": "1-bedroom",
        });
        let filter: HousingFilterConfig = serde_json::from_value(json).unwrap();
        assert_eq!(filter.max_price(), 1500);
        assert_eq!(filter.room_type, RoomType::OneBedroom);
        assert_eq!(serde_json::to_value(&filter).unwrap()["maxPrice"], 1500);

        let inverted = serde_json::json!({
            "location": "",
            "minPrice": 2000,
            "maxPrice": 1000,
            "roomType": "all",
        });
        let err = serde_json::from_value::<HousingFilterConfig>(inverted).unwrap_err();
        assert!(err.to_string().contains("minPrice 2000 is above maxPrice 1000"));
    }

    #[test]
    fn test_set_max_price_snaps_and_clamps() {
        let mut filter = HousingFilterConfig::default();
        assert_eq!(filter.set_max_price(1249, 5000, 100), 1200);
        assert_eq!(filter.set_max_price(1250, 5000, 100), 1300);
        assert_eq!(filter.set_max_price(9000, 5000, 100), 5000);
        assert_eq!(filter.set_max_price(0, 5000, 100), 0);
        assert!(filter.min_price() <= filter.max_price());
        assert_eq!(filter.price_range_label(), "$0 - $0");
    }

    fn arb_room_type() -> impl Strategy<Value = RoomType> {
        prop_oneof![
            Just(RoomType::All),
            Just(RoomType::Studio),
            Just(RoomType::OneBedroom),
            Just(RoomType::Shared),
        ]
    }

    fn arb_listing() -> impl Strategy<Value = HousingListing> {
        (0u32..1000, "[a-zA-Z0-9 ]{0,12}", 0u32..6000, arb_room_type()).prop_map(
            |(id, address, rent, room_type)| listing(id, &address, rent, room_type),
        )
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subsequence(
            listings in proptest::collection::vec(arb_listing(), 0..20),
            location in "[a-zA-Z ]{0,3}",
            max_price in 0u32..6000,
            room_type in arb_room_type(),
        ) {
            let mut filter = HousingFilterConfig {
                location,
                room_type,
                ..HousingFilterConfig::default()
            };
            filter.set_max_price(max_price, DEFAULT_PRICE_CEILING, DEFAULT_PRICE_STEP);
            let result = filter.apply(&listings);

            // Order-preserving subsequence of the input
            let mut cursor = listings.iter();
            for kept in &result {
                prop_assert!(cursor.any(|l| std::ptr::eq(l, *kept)));
            }

            for kept in &result {
                prop_assert!(kept.rent <= filter.max_price());
                prop_assert!(filter.room_type == RoomType::All || kept.room_type == filter.room_type);
                prop_assert!(kept.address.to_lowercase().contains(&filter.location.to_lowercase()));
            }

            // Nothing that matches is dropped
            let expected = listings.iter().filter(|l| filter.matches(l)).count();
            prop_assert_eq!(result.len(), expected);
        }
    }
}
