//! # Campus Catalog
//!
//! The literal records the mock data source serves. Everything here is
//! plain data in display order.

use crate::checklist::Checklist;
use crate::views::{
    AdministrativeHold, Alumnus, Club, Coordinate, Department, FoodRecommendation, HoldLink,
    HousingListing, PhonePlan, RoomType, StudyRoom,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// Campus
// =============================================================================

/// Departments shown as map markers
pub fn departments() -> Vec<Department> {
    vec![
        Department {
            id: 1,
            name: "Computer Science".to_string(),
            building: "Nedderman Hall".to_string(),
            room_number: "109".to_string(),
            floor: "Ground Floor".to_string(),
            coordinate: Coordinate::new(32.7299, -97.1138),
            directions: "Take the main entrance, go straight, and the room is on your left."
                .to_string(),
        },
        Department {
            id: 2,
            name: "Physics".to_string(),
            building: "Science Building".to_string(),
            room_number: "301".to_string(),
            floor: "3rd Floor".to_string(),
            coordinate: Coordinate::new(32.7302, -97.1142),
            directions: "Enter from the east side, take the elevator to the 3rd floor, turn right."
                .to_string(),
        },
        Department {
            id: 3,
            name: "Business".to_string(),
            building: "Business Building".to_string(),
            room_number: "205".to_string(),
            floor: "2nd Floor".to_string(),
            coordinate: Coordinate::new(32.7305, -97.1135),
            directions:
                "Use the main stairs, go to the 2nd floor, the room is at the end of the hallway."
                    .to_string(),
        },
    ]
}

/// Bookable study rooms
pub fn study_rooms() -> Vec<StudyRoom> {
    vec![
        StudyRoom {
            id: 1,
            name: "Quiet Study Room 1".to_string(),
            description: "Individual study space".to_string(),
            available_slots: strings(&["9:00 AM - 11:00 AM", "2:00 PM - 4:00 PM"]),
            occupancy: "Single".to_string(),
            location: "Library, 2nd Floor".to_string(),
        },
        StudyRoom {
            id: 2,
            name: "Group Study Room A".to_string(),
            description: "Collaborative workspace".to_string(),
            available_slots: strings(&["10:00 AM - 12:00 PM", "3:00 PM - 5:00 PM"]),
            occupancy: "Up to 6 people".to_string(),
            location: "Student Center, 1st Floor".to_string(),
        },
        StudyRoom {
            id: 3,
            name: "Computer Lab 3".to_string(),
            description: "Room with computers".to_string(),
            available_slots: strings(&["1:00 PM - 3:00 PM", "4:00 PM - 6:00 PM"]),
            occupancy: "Up to 20 people".to_string(),
            location: "Engineering Building, 3rd Floor".to_string(),
        },
    ]
}

// =============================================================================
// Exploration
// =============================================================================

/// Housing listings
pub fn housing() -> Vec<HousingListing> {
    vec![
        HousingListing {
            id: 1,
            image: "https://example.com/image1.jpg".to_string(),
            address: "123 Main St".to_string(),
            rent: 1200,
            amenities: strings(&["Furnished", "Utilities Included"]),
            size: 500,
            room_type: RoomType::Studio,
        },
        HousingListing {
            id: 2,
            image: "https://example.com/image2.jpg".to_string(),
            address: "456 Elm St".to_string(),
            rent: 1500,
            amenities: strings(&["Pool", "Gym"]),
            size: 700,
            room_type: RoomType::OneBedroom,
        },
        HousingListing {
            id: 3,
            image: "https://example.com/image3.jpg".to_string(),
            address: "789 Oak St".to_string(),
            rent: 1000,
            amenities: strings(&["Parking", "Laundry"]),
            size: 450,
            room_type: RoomType::Shared,
        },
    ]
}

/// Food and recreation recommendations
pub fn food_recommendations() -> Vec<FoodRecommendation> {
    vec![
        FoodRecommendation {
            id: 1,
            name: "Tasty Bites".to_string(),
            description: "Delicious local cuisine".to_string(),
            location: "123 Foodie St".to_string(),
            rating: 4.5,
            category: "Dining".to_string(),
        },
        FoodRecommendation {
            id: 2,
            name: "Fresh Mart".to_string(),
            description: "Quality groceries".to_string(),
            location: "456 Market Ave".to_string(),
            rating: 4.0,
            category: "Grocery".to_string(),
        },
        FoodRecommendation {
            id: 3,
            name: "Fun Zone".to_string(),
            description: "Entertainment for all ages".to_string(),
            location: "789 Play Rd".to_string(),
            rating: 4.2,
            category: "Entertainment".to_string(),
        },
    ]
}

// =============================================================================
// Networking
// =============================================================================

/// Alumni directory searched by the alumni connector
pub fn alumni() -> Vec<Alumnus> {
    vec![
        Alumnus {
            id: 1,
            name: "John Doe".to_string(),
            field_of_study: "Computer Science".to_string(),
            industry: "Technology".to_string(),
        },
        Alumnus {
            id: 2,
            name: "Jane Smith".to_string(),
            field_of_study: "Business Administration".to_string(),
            industry: "Finance".to_string(),
        },
        Alumnus {
            id: 3,
            name: "Mike Johnson".to_string(),
            field_of_study: "Mechanical Engineering".to_string(),
            industry: "Automotive".to_string(),
        },
    ]
}

/// Student clubs
pub fn clubs() -> Vec<Club> {
    vec![
        Club {
            id: 1,
            name: "Tech Innovators".to_string(),
            description: "Explore cutting-edge technologies and innovate together.".to_string(),
        },
        Club {
            id: 2,
            name: "Business Leaders".to_string(),
            description: "Develop leadership skills and network with industry professionals."
                .to_string(),
        },
        Club {
            id: 3,
            name: "Art Collective".to_string(),
            description: "Express your creativity through various art forms and collaborations."
                .to_string(),
        },
        Club {
            id: 4,
            name: "Sports Enthusiasts".to_string(),
            description: "Join fellow sports lovers for games, fitness, and team building."
                .to_string(),
        },
    ]
}

// =============================================================================
// Essentials
// =============================================================================

/// Administrative holds with every checklist item unticked
pub fn admin_holds() -> Vec<AdministrativeHold> {
    vec![
        AdministrativeHold {
            title: "Financial Aid Hold".to_string(),
            guidance: "Please complete the following steps to clear your financial aid hold:"
                .to_string(),
            checklist: Checklist::new([
                "Submit FAFSA",
                "Upload required documents",
                "Schedule appointment with financial aid advisor",
            ]),
            links: vec![
                HoldLink::new(
                    "FAFSA Website",
                    "https://studentaid.gov/h/apply-for-aid/fafsa",
                ),
                HoldLink::new("Upload Documents", "https://example.com/upload"),
            ],
        },
        AdministrativeHold {
            title: "Academic Advising Hold".to_string(),
            guidance: "Complete these steps to clear your academic advising hold:".to_string(),
            checklist: Checklist::new([
                "Review degree audit",
                "Create tentative course schedule",
                "Meet with academic advisor",
            ]),
            links: vec![
                HoldLink::new("Degree Audit", "https://example.com/degree-audit"),
                HoldLink::new("Schedule Advisor Meeting", "https://example.com/advising"),
            ],
        },
    ]
}

/// Phone plans offered for comparison
pub fn phone_plans() -> Vec<PhonePlan> {
    vec![
        PhonePlan {
            name: "Basic Plan".to_string(),
            price: 30,
            data_limit: "2GB".to_string(),
            coverage: "Nationwide".to_string(),
        },
        PhonePlan {
            name: "Standard Plan".to_string(),
            price: 45,
            data_limit: "5GB".to_string(),
            coverage: "Nationwide + Canada".to_string(),
        },
        PhonePlan {
            name: "Premium Plan".to_string(),
            price: 60,
            data_limit: "Unlimited".to_string(),
            coverage: "Global".to_string(),
        },
    ]
}
