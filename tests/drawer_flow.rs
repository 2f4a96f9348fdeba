//! Drawer Flow Integration Tests
//!
//! End-to-end tests of the bottom bar and drawer driving a real stack
//! navigator.

use craftlink::{
    DrawerConfig, DrawerEvent, DrawerHandle, DrawerPhase, MountedDrawer, NavigationBridge, Role,
    Route, StackNavigator, UserProfile,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn mount(role: Option<Role>) -> (MountedDrawer, Arc<StackNavigator>) {
    let navigator = Arc::new(StackNavigator::new(Route::Home));
    let drawer = MountedDrawer::mount_with_stack(
        DrawerConfig::default(),
        role,
        UserProfile::new("Ana Ruiz"),
        &navigator,
        &NavigationBridge::new(),
    )
    .unwrap();
    (drawer, navigator)
}

async fn wait_for_phase(handle: &DrawerHandle, phase: DrawerPhase) {
    let mut rx = handle.subscribe();
    rx.wait_for(|s| s.phase == phase).await.unwrap();
}

async fn wait_for_route(navigator: &StackNavigator, path: &str) {
    let mut rx = navigator.subscribe();
    rx.wait_for(|current| current == path).await.unwrap();
}

/// Menu item opens the drawer, a drawer row closes it and navigates
#[tokio::test(start_paused = true)]
async fn test_menu_opens_and_row_navigates() {
    let (drawer, navigator) = mount(Some(Role::Worker));
    let handle = drawer.handle().clone();

    assert!(drawer.press_bar_item("menu"));
    wait_for_phase(&handle, DrawerPhase::Open).await;

    let panel = drawer.drawer_panel();
    assert!(panel.blocks_touches);
    assert_eq!(panel.translate_y, 0.0);
    assert_eq!(panel.display_name, "Ana Ruiz");
    assert_eq!(panel.avatar.initial(), "A");

    let mut events = handle.subscribe_events();
    assert!(drawer.press_drawer_item("earnings"));
    wait_for_route(&navigator, "/earnings").await;

    assert_eq!(events.recv().await.unwrap(), DrawerEvent::Closed);
    assert_eq!(
        events.recv().await.unwrap(),
        DrawerEvent::NavigationRequested {
            route: "/earnings".to_string()
        }
    );
    assert!(!handle.is_open());
    assert_eq!(navigator.current_route(), Route::Earnings);
    assert_eq!(drawer.bottom_bar().active_item(), None);

    drawer.unmount().await;
}

/// Public profile goes through its container screen
#[tokio::test(start_paused = true)]
async fn test_public_profile_two_step_navigation() {
    let (drawer, navigator) = mount(Some(Role::Worker));
    let handle = drawer.handle().clone();

    handle.open();
    wait_for_phase(&handle, DrawerPhase::Open).await;

    let start = Instant::now();
    assert!(drawer.press_drawer_item("public-profile"));
    wait_for_route(&navigator, "/profile").await;
    assert!(!handle.is_open());

    wait_for_route(&navigator, "/profile/public").await;
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(
        navigator.stack(),
        vec![Route::Home, Route::Profile, Route::PublicProfile]
    );

    drawer.unmount().await;
}

/// Navigation from elsewhere force-closes an open drawer
#[tokio::test(start_paused = true)]
async fn test_external_navigation_force_closes() {
    let (drawer, navigator) = mount(Some(Role::Client));
    let handle = drawer.handle().clone();

    handle.open();
    wait_for_phase(&handle, DrawerPhase::Open).await;

    let mut events = handle.subscribe_events();
    // A link on the current screen
    navigator.try_navigate("/messages").unwrap();
    wait_for_phase(&handle, DrawerPhase::Closed).await;

    assert_eq!(
        events.recv().await.unwrap(),
        DrawerEvent::ForceClosed {
            route: "/messages".to_string()
        }
    );
    assert_eq!(navigator.current_route(), Route::Messages);

    drawer.unmount().await;
}

/// Bar items navigate directly and highlight the active entry
#[tokio::test(start_paused = true)]
async fn test_bar_item_navigation_updates_active_item() {
    let (drawer, navigator) = mount(Some(Role::Client));
    assert_eq!(drawer.bottom_bar().active_item(), Some("home"));

    assert!(drawer.press_bar_item("search"));
    wait_for_route(&navigator, "/search").await;
    assert_eq!(drawer.bottom_bar().active_item(), Some("search"));
    assert!(!drawer.handle().is_open());

    assert!(!drawer.press_bar_item("jobs"));

    drawer.unmount().await;
}

/// Alias rows land on the same screen
#[tokio::test(start_paused = true)]
async fn test_contact_alias_opens_help() {
    let (drawer, navigator) = mount(None);

    assert!(drawer.press_drawer_item("contact"));
    wait_for_route(&navigator, "/help").await;
    assert_eq!(navigator.current_route(), Route::Help);

    drawer.unmount().await;
}

/// Role changes swap the menu tables
#[tokio::test(start_paused = true)]
async fn test_role_switch_swaps_entries() {
    let (drawer, navigator) = mount(Some(Role::Client));
    assert!(drawer.entries().bar_item("jobs").is_none());

    drawer.set_role(Some(Role::Worker));
    assert!(drawer.press_bar_item("jobs"));
    wait_for_route(&navigator, "/jobs").await;
    assert_eq!(drawer.bottom_bar().active_item(), Some("jobs"));

    assert!(drawer.set_badge("messages", Some(3)));
    assert_eq!(drawer.bottom_bar().item("messages").unwrap().badge, "3");

    drawer.unmount().await;
}

/// Swipe-to-close through the handle
#[tokio::test(start_paused = true)]
async fn test_swipe_down_closes() {
    let (drawer, navigator) = mount(Some(Role::Worker));
    let handle = drawer.handle().clone();

    handle.open();
    wait_for_phase(&handle, DrawerPhase::Open).await;

    handle.drag_start();
    handle.drag_move(60.0);
    handle.drag_end(60.0, 800.0);
    wait_for_phase(&handle, DrawerPhase::Closed).await;

    assert_eq!(drawer.drawer_panel().translate_y, 520.0);
    assert!(!drawer.drawer_panel().visible);
    assert_eq!(navigator.current_route(), Route::Home);

    drawer.unmount().await;
}

/// Panel height follows the measured screen
#[tokio::test(start_paused = true)]
async fn test_layout_clamps_panel_height() {
    let (drawer, _navigator) = mount(None);
    let handle = drawer.handle().clone();

    drawer.layout(400.0);
    let mut rx = handle.subscribe();
    rx.wait_for(|s| s.panel_height < 520.0).await.unwrap();
    assert_eq!(drawer.drawer_panel().translate_y, handle.snapshot().panel_height);

    drawer.unmount().await;
}
