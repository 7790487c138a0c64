#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::uninlined_format_args
)]
//! # Orientation Flow Tests
//!
//! Drives [`AppCore`] across all five tabs the way a new student would:
//! clear a hold, pick a plan, look up a department, filter housing and
//! find an alumnus.

use std::time::Duration;

use mavlynx_app::{
    AppCommand, AppConfig, AppCore, CampusTab, ExplorationTab, LoadOutcome, NavPayload,
    PlaceholderIntent, Resource, RoomInfo, RoomType, Route, Tab,
};

fn instant_app() -> AppCore {
    AppCore::with_mock(AppConfig {
        fetch_latency_ms: 0,
        ..AppConfig::default()
    })
}

#[tokio::test]
async fn test_full_orientation_walkthrough() {
    let mut app = instant_app();
    app.start().await;
    assert_eq!(app.current_tab(), Tab::Essentials);

    // Essentials: clear the financial aid hold and save
    let essentials = app.essentials_mut().expect("essentials mounted");
    for item in 0..3 {
        essentials.toggle(0, item).unwrap();
    }
    assert!(essentials.holds()[0].is_cleared());
    let save = essentials.save_progress();
    app.execute(save).await.unwrap();

    // Pick a plan; Home receives it
    let commands = app.essentials().unwrap().apply_for_plan(1).unwrap();
    app.execute(commands).await.unwrap();
    assert_eq!(app.current_tab(), Tab::Home);
    assert_eq!(
        app.home().unwrap().selected_plan().map(|p| p.name.as_str()),
        Some("Standard Plan")
    );

    // Campus: tap Physics on the map
    app.select_tab(Tab::Campus).await;
    let campus = app.campus_mut().unwrap();
    campus.tap_marker(2).unwrap();
    match campus.room_info() {
        Some(RoomInfo::Department(dept)) => {
            assert_eq!(dept.name, "Physics");
            assert_eq!(dept.building, "Science Building");
        }
        other => panic!("expected department overlay, got {:?}", other),
    }
    campus.set_active_tab(CampusTab::StudyRooms);
    assert!(campus.map_view().is_none());

    // Exploration: narrow housing to Elm St
    app.select_tab(Tab::Exploration).await;
    let exploration = app.exploration_mut().unwrap();
    exploration.set_location("ELM");
    exploration.set_room_type(RoomType::OneBedroom);
    assert_eq!(exploration.apply_filters(), 1);
    exploration.set_active_tab(ExplorationTab::FoodRec);
    assert_eq!(exploration.food().items().len(), 3);

    // Networking: find the engineer and open the profile
    app.select_tab(Tab::Networking).await;
    let networking = app.networking_mut().unwrap();
    networking.set_query("engineering");
    assert_eq!(networking.submit_search().len(), 1);
    let connect = networking.connect(3).unwrap();
    app.execute(connect).await.unwrap();
    let detail = app.router().detail().unwrap();
    assert_eq!(detail.route, Route::AlumnusProfile);
    assert!(matches!(&detail.payload, Some(NavPayload::Alumnus(a)) if a.name == "Mike Johnson"));

    assert_eq!(
        app.activity(),
        &[
            PlaceholderIntent::SaveProgress { cleared_holds: 1 },
            PlaceholderIntent::ApplyForPlan {
                plan: "Standard Plan".to_string()
            },
        ]
    );
    assert_eq!(
        app.mounted_tabs(),
        vec![
            Tab::Essentials,
            Tab::Networking,
            Tab::Home,
            Tab::Campus,
            Tab::Exploration
        ]
    );
}

#[tokio::test]
async fn test_failed_fetch_keeps_screen_usable() {
    let mut app = AppCore::with_mock(AppConfig {
        fetch_latency_ms: 0,
        fail_resources: vec![Resource::Housing],
        ..AppConfig::default()
    });
    app.select_tab(Tab::Exploration).await;

    let exploration = app.exploration().unwrap();
    assert!(!exploration.is_loading());
    let err = exploration.error().unwrap();
    assert!(err.is_recoverable());
    assert!(exploration.visible_housing().is_empty());
    assert_eq!(exploration.food().items().len(), 3);
}

#[tokio::test]
async fn test_detail_commands_from_every_screen() {
    let mut app = instant_app();
    app.select_tab(Tab::Exploration).await;
    let commands = app.exploration().unwrap().apply_for_housing(1).unwrap();
    assert!(matches!(
        &commands[0],
        AppCommand::Intent(PlaceholderIntent::ApplyForHousing { address }) if address == "123 Main St"
    ));
    app.execute(commands).await.unwrap();
    assert_eq!(app.router().top(), Route::HousingApplication);

    app.select_tab(Tab::Networking).await;
    assert!(app.router().detail().is_none());
    let commands = app.networking().unwrap().know_more(2).unwrap();
    app.execute(commands).await.unwrap();
    assert_eq!(app.router().top(), Route::ClubDetails);

    app.back().await;
    assert_eq!(app.router().top(), Route::Tab(Tab::Networking));
    app.back().await;
    assert_eq!(app.current_tab(), Tab::Exploration);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_during_fetch_discards_slow_response() {
    let mut app = AppCore::with_mock(AppConfig::default());
    let load = app.open_tab(Tab::Networking);
    assert!(app.networking().unwrap().clubs().is_loading());

    let started = tokio::time::Instant::now();
    let source = app.source();
    let (answers, ()) = tokio::join!(load.run(source.as_ref()), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.unmount(Tab::Networking);
    });
    assert!(started.elapsed() < Duration::from_millis(1000));

    assert_eq!(
        app.accept(answers),
        vec![LoadOutcome::Cancelled, LoadOutcome::Cancelled]
    );
    assert!(!app.is_mounted(Tab::Networking));
    assert_eq!(app.current_tab(), Tab::Networking);

    app.select_tab(Tab::Networking).await;
    assert_eq!(app.networking().unwrap().clubs().items().len(), 4);
}
