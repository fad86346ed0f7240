//! Priority ordering of placed views.
//!
//! Global shortcuts walk the views in this order and stop at the first view
//! that can handle the request, so the ordering decides which dock answers
//! `Meta+1` when several docks are visible.
//!
//! The rules, applied in order:
//!
//! 1. Views on the primary screen come first.
//! 2. Views on other screens follow in system screen order.  Views whose
//!    screen is no longer connected go last.
//! 3. Views on the same screen are ordered Bottom, Left, Top, Right.
//! 4. Ties keep their input order (the sort is stable).
//!
//! Finally the first view marked preferred-for-shortcuts is moved to the
//! front, ahead of everything else.

use tracing::trace;

use super::screen::ScreenTopology;
use super::view::PlacedView;

/// Sorts `views` by shortcut priority against the current `topology`.
pub fn sort_by_priority<'a, I>(views: I, topology: &ScreenTopology) -> Vec<&'a PlacedView>
where
    I: IntoIterator<Item = &'a PlacedView>,
{
    let mut sorted: Vec<&PlacedView> = views.into_iter().collect();

    sorted.sort_by_key(|view| {
        let not_primary = !topology.is_primary(&view.connector);
        let ordinal = topology.ordinal(&view.connector).unwrap_or(usize::MAX);
        (not_primary, ordinal, view.edge.priority())
    });

    if let Some(index) = sorted.iter().position(|view| view.preferred_for_shortcuts) {
        let preferred = sorted.remove(index);
        sorted.insert(0, preferred);
    }

    trace!(
        order = ?sorted.iter().map(|v| v.id.0).collect::<Vec<_>>(),
        "sorted views by priority"
    );
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::edge::Edge;
    use crate::domain::screen::{Screen, ScreenId};
    use crate::domain::view::ViewSpec;

    fn topology() -> ScreenTopology {
        ScreenTopology::new(vec![
            Screen::new("HDMI-1", false),
            Screen::new("DP-1", true),
            Screen::new("VGA-1", false),
        ])
        .unwrap()
    }

    fn placed(id: u32, connector: &str, edge: Edge) -> PlacedView {
        PlacedView::bind(&ViewSpec::explicit(id, ScreenId(0), edge), connector)
    }

    fn ids(sorted: &[&PlacedView]) -> Vec<u32> {
        sorted.iter().map(|v| v.id.0).collect()
    }

    #[test]
    fn test_primary_screen_views_come_first_regardless_of_ordinal() {
        let views = vec![placed(1, "HDMI-1", Edge::Bottom), placed(2, "DP-1", Edge::Right)];
        assert_eq!(ids(&sort_by_priority(&views, &topology())), vec![2, 1]);
    }

    #[test]
    fn test_non_primary_views_follow_screen_ordinal() {
        let views = vec![placed(1, "VGA-1", Edge::Bottom), placed(2, "HDMI-1", Edge::Right)];
        assert_eq!(ids(&sort_by_priority(&views, &topology())), vec![2, 1]);
    }

    #[test]
    fn test_same_screen_views_follow_edge_priority() {
        // Arrange
        let views = vec![
            placed(1, "DP-1", Edge::Right),
            placed(2, "DP-1", Edge::Top),
            placed(3, "DP-1", Edge::Left),
            placed(4, "DP-1", Edge::Bottom),
        ];

        // Act
        let sorted = sort_by_priority(&views, &topology());

        // Assert
        assert_eq!(ids(&sorted), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_disconnected_screen_views_sort_last() {
        let views = vec![placed(1, "LOST-1", Edge::Bottom), placed(2, "VGA-1", Edge::Right)];
        assert_eq!(ids(&sort_by_priority(&views, &topology())), vec![2, 1]);
    }

    #[test]
    fn test_first_preferred_view_moves_to_front() {
        // Arrange: A and B on primary, C on a secondary screen and preferred.
        let a = placed(1, "DP-1", Edge::Bottom);
        let b = placed(2, "DP-1", Edge::Left);
        let mut c = placed(3, "VGA-1", Edge::Bottom);
        c.preferred_for_shortcuts = true;
        let views = vec![a, b, c];

        // Act
        let sorted = sort_by_priority(&views, &topology());

        // Assert
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn test_only_first_preferred_view_is_promoted() {
        let mut a = placed(1, "VGA-1", Edge::Bottom);
        a.preferred_for_shortcuts = true;
        let mut b = placed(2, "HDMI-1", Edge::Bottom);
        b.preferred_for_shortcuts = true;
        let c = placed(3, "DP-1", Edge::Bottom);
        let views = vec![a, b, c];

        // c (primary), b (ordinal 0), a (ordinal 2); b is the first preferred.
        assert_eq!(ids(&sort_by_priority(&views, &topology())), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let views = vec![
            placed(1, "VGA-1", Edge::Left),
            placed(2, "DP-1", Edge::Top),
            placed(3, "HDMI-1", Edge::Bottom),
        ];
        let once: Vec<PlacedView> = sort_by_priority(&views, &topology()).into_iter().cloned().collect();
        let twice = sort_by_priority(&once, &topology());
        assert_eq!(ids(&twice), once.iter().map(|v| v.id.0).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_sorts_to_empty() {
        let views: Vec<PlacedView> = Vec::new();
        assert!(sort_by_priority(&views, &topology()).is_empty());
    }
}
