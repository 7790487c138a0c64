//! # Text Rendering
//!
//! Plain-text views of the app state. Every function returns a `String` so
//! the shell, the tour and tests share one renderer.

use std::fmt::Write as _;

use mavlynx_app::{
    AppCore, AppError, CampusScreen, CampusTab, DetailView, EssentialsScreen, ExplorationScreen,
    ExplorationTab, FoodRecommendation, HomeScreen, HousingListing, LoadStatus, Loadable,
    MapSurface, MapView, NavPayload, NetworkingScreen, RoomInfo, RoomType, Router, Tab,
};

// =============================================================================
// Chrome
// =============================================================================

/// Bottom bar: `[1 Essentials <briefcase>]  2 Networking <people-outline> ...`
pub fn tab_bar(router: &Router) -> String {
    Tab::all()
        .iter()
        .map(|tab| {
            let focused = *tab == router.current();
            let label = format!("{} {} <{}>", tab.key_number(), tab.name(), tab.icon(focused));
            if focused {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole screen: the page on top of the router plus the tab bar
pub fn app(app: &AppCore) -> String {
    let mut out = String::new();
    let page = match app.router().detail() {
        Some(detail) => detail_view(detail),
        None => tab_page(app, app.current_tab()),
    };
    out.push_str(&page);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", "-".repeat(72));
    let _ = writeln!(out, "{}", tab_bar(app.router()));
    out
}

fn tab_page(app: &AppCore, tab: Tab) -> String {
    let page = match tab {
        Tab::Essentials => app.essentials().map(essentials),
        Tab::Networking => app.networking().map(networking),
        Tab::Home => app.home().map(home),
        Tab::Campus => app.campus().map(campus),
        Tab::Exploration => app.exploration().map(exploration),
    };
    page.unwrap_or_else(|| format!("== {} ==\n(not loaded)\n", tab.name()))
}

fn sub_tabs<T: PartialEq + Copy>(tabs: &[(T, &str)], active: T) -> String {
    tabs.iter()
        .map(|(tab, label)| {
            if *tab == active {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Status line for a list: spinner text while loading, error with retry
/// hint after a failure
fn list_status<T>(list: &Loadable<T>) -> Option<String> {
    match list.status() {
        LoadStatus::Loading => Some("Loading...".to_string()),
        LoadStatus::Failed(err) => Some(error_line(err)),
        LoadStatus::Idle | LoadStatus::Ready => None,
    }
}

/// One-line error with its resolution hint
pub fn error_line(err: &AppError) -> String {
    if err.is_recoverable() {
        format!("! {} (type 'reload' to retry)", err.user_message())
    } else {
        format!("! {}", err.user_message())
    }
}

// =============================================================================
// Essentials
// =============================================================================

fn essentials(screen: &EssentialsScreen) -> String {
    let mut out = String::from("== Essentials ==\n");
    for (h, hold) in screen.holds().iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", h + 1, hold.title);
        let _ = writeln!(out, "   {}", hold.guidance);
        for (i, item) in hold.checklist.items().iter().enumerate() {
            let mark = if item.done { 'x' } else { ' ' };
            let _ = writeln!(out, "   [{mark}] {}.{} {}", h + 1, i + 1, item.text);
        }
        for (l, link) in hold.links.iter().enumerate() {
            let _ = writeln!(out, "   link {}.{}: {} ({})", h + 1, l + 1, link.label, link.url);
        }
        if hold.is_cleared() {
            out.push_str("   ✓ Hold Cleared\n");
        }
    }

    out.push_str("\nPhone Plan Comparison\n");
    for (p, plan) in screen.plans().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - ${}/month, {} data, {}",
            p + 1,
            plan.name,
            plan.price,
            plan.data_limit,
            plan.coverage
        );
    }
    out
}

// =============================================================================
// Networking
// =============================================================================

fn networking(screen: &NetworkingScreen) -> String {
    let mut out = String::from("== Networking ==\n\nAlumni Connector\n");
    let _ = writeln!(out, "  search: \"{}\"", screen.query());
    if screen.is_searching() {
        out.push_str("  Searching...\n");
    } else if let Some(err) = screen.directory().error() {
        let _ = writeln!(out, "  {}", error_line(err));
    }
    for alumnus in screen.results() {
        let _ = writeln!(
            out,
            "  #{} {} - {}, {}",
            alumnus.id, alumnus.name, alumnus.field_of_study, alumnus.industry
        );
    }

    out.push_str("\nClub Exploration\n");
    if let Some(status) = list_status(screen.clubs()) {
        let _ = writeln!(out, "  {status}");
    }
    for club in screen.clubs().items() {
        let _ = writeln!(out, "  #{} {}: {}", club.id, club.name, club.description);
    }
    out
}

// =============================================================================
// Home
// =============================================================================

fn home(screen: &HomeScreen) -> String {
    let mut out = String::from("== Home ==\n");
    let _ = writeln!(out, "{}", screen.headline());
    if let Some(cost) = screen.estimated_monthly_cost() {
        let _ = writeln!(out, "Estimated monthly cost: ${cost}");
    }
    out
}

// =============================================================================
// Campus
// =============================================================================

/// Map surface that draws markers as text lines
#[derive(Debug, Default)]
pub struct TextMap {
    lines: Vec<String>,
}

impl TextMap {
    /// Rendered lines, in draw order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl MapSurface for TextMap {
    fn render(&mut self, view: &MapView) {
        let r = &view.region;
        self.lines.push(format!(
            "map centred at ({:.4}, {:.4}), span {:.4} x {:.4}",
            r.center.latitude, r.center.longitude, r.latitude_delta, r.longitude_delta
        ));
        for marker in &view.markers {
            self.lines.push(format!(
                "  pin #{} {} - {} @ ({:.4}, {:.4})",
                marker.id,
                marker.title,
                marker.description,
                marker.coordinate.latitude,
                marker.coordinate.longitude
            ));
        }
    }
}

fn campus(screen: &CampusScreen) -> String {
    let mut out = String::from("== Campus ==\n");
    let _ = writeln!(
        out,
        "{}",
        sub_tabs(
            &[
                (CampusTab::Departments, CampusTab::Departments.label()),
                (CampusTab::StudyRooms, CampusTab::StudyRooms.label()),
            ],
            screen.active_tab()
        )
    );
    if screen.is_loading() {
        out.push_str("Loading...\n");
    } else if let Some(err) = screen.error() {
        let _ = writeln!(out, "{}", error_line(err));
    }

    if let Some(view) = screen.map_view() {
        let mut map = TextMap::default();
        map.render(&view);
        for line in map.lines() {
            let _ = writeln!(out, "{line}");
        }
    }
    match screen.room_info() {
        Some(RoomInfo::Department(dept)) => {
            let _ = writeln!(out, "\n  +-- Room Information --");
            let _ = writeln!(out, "  | {}", dept.name);
            let _ = writeln!(out, "  | Room: {}", dept.room_number);
            let _ = writeln!(out, "  | Building: {}", dept.building);
            let _ = writeln!(out, "  | Floor: {}", dept.floor);
            let _ = writeln!(out, "  | Directions: {}", dept.directions);
            out.push_str("  +-- (close)\n");
        }
        Some(RoomInfo::NoSelection) => out.push_str("\n  No room selected\n"),
        None => {}
    }

    for room in screen.study_room_cards().unwrap_or_default() {
        let _ = writeln!(out, "\n  #{} {}", room.id, room.name);
        let _ = writeln!(out, "  {}", room.description);
        let _ = writeln!(out, "  Available: {}", room.slots_line());
        let _ = writeln!(out, "  Occupancy: {}  Location: {}", room.occupancy, room.location);
    }
    out
}

// =============================================================================
// Exploration
// =============================================================================

fn housing_card(listing: &HousingListing) -> String {
    format!(
        "  #{} {} - ${}/month, {} sq ft, {}\n    {}\n",
        listing.id,
        listing.address,
        listing.rent,
        listing.size,
        listing.room_type.label(),
        listing.amenities_line()
    )
}

/// Five-star row: `★★★★☆`
pub fn stars(food: &FoodRecommendation) -> String {
    food.stars()
        .iter()
        .map(|filled| if *filled { '★' } else { '☆' })
        .collect()
}

fn food_card(food: &FoodRecommendation) -> String {
    format!(
        "  #{} {} {} ({:.1})\n    {}\n    {}  [{} {}]\n",
        food.id,
        food.name,
        stars(food),
        food.rating,
        food.description,
        food.location,
        food.category,
        food.category_color()
    )
}

fn exploration(screen: &ExplorationScreen) -> String {
    let mut out = String::from("== Exploration ==\n");
    let _ = writeln!(
        out,
        "{}",
        sub_tabs(
            &[
                (ExplorationTab::Housing, ExplorationTab::Housing.label()),
                (ExplorationTab::FoodRec, ExplorationTab::FoodRec.label()),
            ],
            screen.active_tab()
        )
    );
    if screen.is_loading() {
        out.push_str("Loading...\n");
    } else if let Some(err) = screen.error() {
        let _ = writeln!(out, "{}", error_line(err));
    }

    match screen.active_tab() {
        ExplorationTab::Housing => {
            let draft = screen.draft_filter();
            let _ = writeln!(out, "  location: \"{}\"", draft.location);
            let _ = writeln!(
                out,
                "  price: {} (max {}, step {})",
                draft.price_range_label(),
                screen.price_settings().price_ceiling,
                screen.price_settings().price_step
            );
            let types = RoomType::all()
                .iter()
                .map(|t| {
                    if *t == draft.room_type {
                        format!("(o) {}", t.label())
                    } else {
                        format!("( ) {}", t.label())
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            let _ = writeln!(out, "  room type: {types}");
            if screen.has_pending_changes() {
                out.push_str("  (filters changed, type 'apply-filters')\n");
            }
            out.push('\n');
            for listing in screen.visible_housing() {
                out.push_str(&housing_card(listing));
            }
        }
        ExplorationTab::FoodRec => {
            for food in screen.food().items() {
                out.push_str(&food_card(food));
            }
        }
    }
    out
}

// =============================================================================
// Detail pages
// =============================================================================

fn detail_view(detail: &DetailView) -> String {
    let mut out = format!("== {} ==\n", detail.route);
    match &detail.payload {
        Some(NavPayload::Room(room)) => {
            let _ = writeln!(out, "Reservation requested for {}", room.name);
            let _ = writeln!(out, "Location: {}", room.location);
            let _ = writeln!(out, "Slots: {}", room.slots_line());
        }
        Some(NavPayload::Housing(listing)) => {
            let _ = writeln!(out, "Application for {}", listing.address);
            out.push_str(&housing_card(listing));
        }
        Some(NavPayload::Alumnus(alumnus)) => {
            let _ = writeln!(out, "{}", alumnus.name);
            let _ = writeln!(out, "Field of study: {}", alumnus.field_of_study);
            let _ = writeln!(out, "Industry: {}", alumnus.industry);
        }
        Some(NavPayload::Club(club)) => {
            let _ = writeln!(out, "{}", club.name);
            let _ = writeln!(out, "{}", club.description);
        }
        Some(NavPayload::SelectedPlan(plan)) => {
            let _ = writeln!(out, "{} - ${}/month", plan.name, plan.price);
        }
        None => {}
    }
    let _ = writeln!(out, "(opened from {}; 'back' to return)", detail.origin);
    out
}
