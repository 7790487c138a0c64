//! # View State Module
//!
//! Domain records shown by the screens. These types are plain values that
//! can be:
//!
//! - Serialized into navigation payloads
//! - Rendered by any frontend
//! - Compared in tests

pub mod campus;
pub mod essentials;
pub mod exploration;
pub mod networking;

pub use campus::{Coordinate, Department, StudyRoom};
pub use essentials::{AdministrativeHold, HoldLink, PhonePlan};
pub use exploration::{FoodCategory, FoodRecommendation, HousingListing, RoomType};
pub use networking::{Alumnus, Club};
