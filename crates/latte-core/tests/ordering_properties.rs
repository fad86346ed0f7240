//! Integration tests for the latte-core ordering and occupancy rules.
//!
//! These tests go through the public crate-root API only, the same way the
//! layout in `latte-dock` uses it.

use latte_core::{
    available_edges_for_view, free_edges, sort_by_priority, Edge, OccupancyMap, PlacedView,
    Screen, ScreenId, ScreenPool, ScreenTopology, ViewId, ViewSpec,
};

fn two_screens() -> ScreenTopology {
    ScreenTopology::new(vec![Screen::new("eDP-1", true), Screen::new("DP-2", false)])
        .expect("valid topology")
}

fn view(id: u32, connector: &str, edge: Edge, preferred: bool) -> PlacedView {
    let spec = ViewSpec::explicit(id, ScreenId(0), edge).with_preferred_for_shortcuts(preferred);
    PlacedView::bind(&spec, connector)
}

fn ids(sorted: &[&PlacedView]) -> Vec<u32> {
    sorted.iter().map(|v| v.id.0).collect()
}

#[test]
fn test_preferred_view_is_promoted_ahead_of_base_rank() {
    // Arrange: A(screen0, Bottom), B(screen1, Left), C(screen0, Top, preferred)
    let views = vec![
        view(1, "eDP-1", Edge::Bottom, false),
        view(2, "DP-2", Edge::Left, false),
        view(3, "eDP-1", Edge::Top, true),
    ];

    // Act
    let sorted = sort_by_priority(&views, &two_screens());

    // Assert: [C, A, B]
    assert_eq!(ids(&sorted), vec![3, 1, 2]);
}

#[test]
fn test_primary_screen_precedes_any_edge_on_other_screens() {
    let views = vec![
        view(1, "DP-2", Edge::Bottom, false),
        view(2, "eDP-1", Edge::Right, false),
    ];
    assert_eq!(ids(&sort_by_priority(&views, &two_screens())), vec![2, 1]);
}

#[test]
fn test_left_sorts_before_top_on_same_screen() {
    let views = vec![view(1, "DP-2", Edge::Top, false), view(2, "DP-2", Edge::Left, false)];
    assert_eq!(ids(&sort_by_priority(&views, &two_screens())), vec![2, 1]);
}

#[test]
fn test_sorting_a_sorted_list_keeps_its_order() {
    let views = vec![
        view(1, "DP-2", Edge::Right, false),
        view(2, "eDP-1", Edge::Left, false),
        view(3, "DP-2", Edge::Bottom, false),
        view(4, "eDP-1", Edge::Bottom, false),
    ];
    let topology = two_screens();

    let once: Vec<PlacedView> = sort_by_priority(&views, &topology).into_iter().cloned().collect();
    let twice = sort_by_priority(&once, &topology);

    assert_eq!(ids(&twice), vec![4, 2, 3, 1]);
}

#[test]
fn test_swapping_primary_changes_order() {
    let views = vec![view(1, "eDP-1", Edge::Bottom, false), view(2, "DP-2", Edge::Bottom, false)];
    let swapped = two_screens().with_primary("DP-2").expect("DP-2 is connected");
    assert_eq!(ids(&sort_by_priority(&views, &swapped)), vec![2, 1]);
}

#[test]
fn test_occupancy_map_holds_one_view_per_screen_edge() {
    // Arrange
    let mut map = OccupancyMap::new();

    // Act
    let claims: Vec<bool> = [
        ("eDP-1", Edge::Bottom, 1),
        ("eDP-1", Edge::Bottom, 2),
        ("DP-2", Edge::Bottom, 3),
        ("eDP-1", Edge::Left, 4),
    ]
    .into_iter()
    .map(|(connector, edge, id)| map.claim(connector, edge, ViewId(id)))
    .collect();

    // Assert
    assert_eq!(claims, vec![true, false, true, true]);
    assert_eq!(map.occupant("eDP-1", Edge::Bottom), Some(ViewId(1)));
    assert_eq!(map.len(), 3);
}

#[test]
fn test_free_and_available_edges_agree_except_for_excluded_view() {
    let views = vec![view(1, "eDP-1", Edge::Bottom, false), view(2, "eDP-1", Edge::Left, false)];

    assert_eq!(free_edges(&views, "eDP-1"), vec![Edge::Top, Edge::Right]);
    assert_eq!(
        available_edges_for_view(&views, "eDP-1", ViewId(2)),
        vec![Edge::Left, Edge::Top, Edge::Right]
    );
}

#[test]
fn test_screen_pool_survives_unplug_and_replug() {
    // Arrange
    let mut pool = ScreenPool::new();
    let topology = two_screens();
    pool.register_topology(&topology);
    let before = pool.id("DP-2");

    // Act
    let unplugged = topology.without("DP-2");
    pool.register_topology(&unplugged);
    let replugged = unplugged
        .with_screen(Screen::new("DP-2", false))
        .expect("DP-2 was unplugged");
    pool.register_topology(&replugged);

    // Assert
    assert_eq!(pool.id("DP-2"), before);
    assert!(pool.screen_exists(before.expect("DP-2 has an id"), &replugged));
}
