//! Screen reconciliation.
//!
//! Runs after every screen change (monitor plugged, unplugged, primary
//! switched) and brings the set of views back in line with the connected
//! screens.
//!
//! # The valid views map
//!
//! First the layout computes which containment *should* have a view and on
//! which `(screen, edge)`, in two passes over the containments:
//!
//! 1. On-primary containments claim their edge on the primary screen, first
//!    come first served.
//! 2. Explicit containments claim their edge on their own screen, if that
//!    screen is connected and the edge is still free.
//!
//! Then views absent from the map are torn down, every survivor is rebound
//! and asked to reconsider its screen, and finally views missing from the
//! registry are created on the edges the map gave them.

use tracing::{debug, info};

use latte_core::{OccupancyMap, PlacementRequest, ViewId, ViewSpec};

use super::{GenericLayout, LayoutEvent};
use crate::application::host::ViewHost;

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<ViewId>,
    pub removed: Vec<ViewId>,
    pub reconsidered: Vec<ViewId>,
}

impl SyncReport {
    /// Nothing was created or removed.
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

impl<H: ViewHost> GenericLayout<H> {
    /// Computes where every dock-capable containment should live.
    ///
    /// `occupied` seeds the map with edges held by other layouts.  Without a
    /// primary screen only the seed is returned.
    pub fn valid_views_map(&self, occupied: Option<&OccupancyMap>) -> OccupancyMap {
        let mut map = occupied.cloned().unwrap_or_default();

        let Some(primary) = self.topology.primary_connector() else {
            return map;
        };

        let docks: Vec<&ViewSpec> = self.containments.iter().filter(|spec| spec.dock_capable).collect();

        for spec in &docks {
            if self.effective_on_primary(spec.id) {
                map.claim(primary, spec.edge, spec.id);
            }
        }

        for spec in &docks {
            if self.effective_on_primary(spec.id) {
                continue;
            }

            let screen = match self.registry.live(spec.id) {
                Some(view) => self.pool.id(&view.connector),
                None => spec.effective_screen(),
            };

            let connector = screen.and_then(|s| self.pool.connector(s));
            if let Some(connector) = connector.filter(|c| self.topology.contains(c)) {
                map.claim(connector, spec.edge, spec.id);
            }
        }

        map
    }

    /// Creates, removes and re-seats views to match the connected screens.
    ///
    /// Does nothing when no primary screen exists.
    pub fn sync_views_to_screens(&mut self, occupied: Option<&OccupancyMap>) -> SyncReport {
        let mut report = SyncReport::default();

        if self.topology.primary().is_none() {
            debug!(layout = %self.name, "no primary screen, skipping view sync");
            return report;
        }

        let map = self.valid_views_map(occupied);
        debug!(layout = %self.name, claimed = map.len(), "valid views map computed");

        let missing: Vec<ViewId> = self
            .containments
            .iter()
            .filter(|spec| self.registry.live(spec.id).is_none() && map.contains_view(spec.id))
            .map(|spec| spec.id)
            .collect();

        let stale: Vec<ViewId> = self
            .registry
            .live_views()
            .filter(|view| !map.contains_view(view.id))
            .map(|view| view.id)
            .collect();

        for id in stale {
            debug!(containment = %id, "sync: removing view without a valid placement");
            self.tear_down(id);
            report.removed.push(id);
        }

        if !report.removed.is_empty() {
            self.events.push(LayoutEvent::ViewsCountChanged);
        }

        // Survivors move off the edges the missing views are about to take.
        let survivors = self.registry.live_ids();
        for id in survivors {
            let Some((connector, _)) = map.placement_of(id) else {
                continue;
            };
            let bound = self.pool.id(connector);

            let Some(entry) = self.registry.get_mut(id) else {
                continue;
            };
            if entry.view.connector != connector {
                debug!(containment = %id, from = %entry.view.connector, to = %connector, "sync: moving view");
                entry.view.connector = connector.to_owned();
            }
            let view = entry.view.clone();

            if let Some(spec) = self.containment_mut(id) {
                spec.screen = bound;
                if bound.is_some() {
                    spec.last_screen = bound;
                }
            }
            self.host.reconsider_screen(&view);
            report.reconsidered.push(id);
        }

        for id in missing {
            match self.add_view(id, PlacementRequest::default()) {
                Ok(id) => report.created.push(id),
                Err(e) => debug!("sync: {e}"),
            }
        }

        info!(
            layout = %self.name,
            created = report.created.len(),
            removed = report.removed.len(),
            reconsidered = report.reconsidered.len(),
            "views synced to screens"
        );
        report
    }

    /// The on-primary flag of a live view, else of its containment.
    fn effective_on_primary(&self, id: ViewId) -> bool {
        match self.registry.live(id) {
            Some(view) => view.on_primary,
            None => self.containment(id).is_some_and(|spec| spec.on_primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::layout::{LayoutTimings, MemoryUsage};
    use crate::infrastructure::host::mock::RecordingHost;
    use latte_core::{Edge, Screen, ScreenId, ScreenTopology};

    fn dual() -> ScreenTopology {
        ScreenTopology::new(vec![Screen::new("DP-1", true), Screen::new("HDMI-1", false)]).unwrap()
    }

    fn layout_with(specs: Vec<ViewSpec>) -> GenericLayout<RecordingHost> {
        let mut layout = GenericLayout::new("Default", MemoryUsage::Single, RecordingHost::new(), LayoutTimings::default());
        layout.set_topology(dual());
        layout.set_block_automatic_view_creation(true);
        for spec in specs {
            layout.add_containment(spec);
        }
        layout.set_block_automatic_view_creation(false);
        layout
    }

    #[test]
    fn test_valid_map_gives_primary_edge_to_first_on_primary_containment() {
        let layout = layout_with(vec![
            ViewSpec::on_primary(1, Edge::Bottom),
            ViewSpec::on_primary(2, Edge::Bottom),
        ]);

        let map = layout.valid_views_map(None);

        assert_eq!(map.occupant("DP-1", Edge::Bottom), Some(ViewId(1)));
        assert!(!map.contains_view(ViewId(2)));
    }

    #[test]
    fn test_valid_map_places_on_primary_before_explicit() {
        // Arrange: explicit containment listed first, same primary edge.
        let layout = layout_with(vec![
            ViewSpec::explicit(1, ScreenId(0), Edge::Bottom),
            ViewSpec::on_primary(2, Edge::Bottom),
        ]);

        // Act
        let map = layout.valid_views_map(None);

        // Assert
        assert_eq!(map.occupant("DP-1", Edge::Bottom), Some(ViewId(2)));
        assert!(!map.contains_view(ViewId(1)));
    }

    #[test]
    fn test_valid_map_skips_disconnected_explicit_screen() {
        let mut layout = layout_with(vec![ViewSpec::explicit(1, ScreenId(1), Edge::Left)]);
        let unplugged = layout.topology().without("HDMI-1");
        layout.set_topology(unplugged);

        assert!(layout.valid_views_map(None).is_empty());
    }

    #[test]
    fn test_valid_map_is_seeded_by_occupied_edges() {
        let layout = layout_with(vec![ViewSpec::on_primary(1, Edge::Bottom)]);
        let mut occupied = OccupancyMap::new();
        occupied.claim("DP-1", Edge::Bottom, ViewId(50));

        let map = layout.valid_views_map(Some(&occupied));

        assert_eq!(map.occupant("DP-1", Edge::Bottom), Some(ViewId(50)));
        assert!(!map.contains_view(ViewId(1)));
    }

    #[test]
    fn test_sync_creates_missing_views() {
        let mut layout = layout_with(vec![
            ViewSpec::on_primary(1, Edge::Bottom),
            ViewSpec::explicit(2, ScreenId(1), Edge::Top),
        ]);

        let report = layout.sync_views_to_screens(None);

        assert_eq!(report.created, vec![ViewId(1), ViewId(2)]);
        assert!(report.reconsidered.is_empty());
        assert_eq!(layout.views_count(), 2);
    }

    #[test]
    fn test_sync_without_primary_is_noop() {
        // Arrange
        let mut layout = layout_with(vec![ViewSpec::on_primary(1, Edge::Bottom)]);
        layout.sync_views_to_screens(None);
        layout.set_topology(ScreenTopology::empty());
        let before: Vec<_> = layout.registry().iter().cloned().collect();

        // Act
        let report = layout.sync_views_to_screens(None);

        // Assert
        assert_eq!(report, SyncReport::default());
        let after: Vec<_> = layout.registry().iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_sync_moves_on_primary_view_when_primary_changes() {
        // Arrange
        let mut layout = layout_with(vec![ViewSpec::on_primary(1, Edge::Bottom)]);
        layout.sync_views_to_screens(None);

        // Act
        let swapped = dual().with_primary("HDMI-1").unwrap();
        let report = layout.update_topology(swapped);

        // Assert
        assert!(report.is_unchanged());
        assert_eq!(layout.registry().live(ViewId(1)).unwrap().connector, "HDMI-1");
        assert_eq!(layout.host().reconsidered.last(), Some(&ViewId(1)));
    }

    #[test]
    fn test_sync_removes_explicit_view_displaced_by_new_primary() {
        // Arrange: on-primary view on DP-1 bottom, explicit view on HDMI-1 bottom.
        let mut layout = layout_with(vec![
            ViewSpec::on_primary(1, Edge::Bottom),
            ViewSpec::explicit(2, ScreenId(1), Edge::Bottom),
        ]);
        layout.sync_views_to_screens(None);

        // Act: HDMI-1 becomes primary.
        let report = layout.update_topology(dual().with_primary("HDMI-1").unwrap());

        // Assert
        assert_eq!(report.removed, vec![ViewId(2)]);
        assert_eq!(layout.registry().occupant("HDMI-1", Edge::Bottom), Some(ViewId(1)));
    }

    #[test]
    fn test_sync_moves_survivor_before_creating_view_on_its_old_edge() {
        // Arrange: HDMI-1 is primary, so view 1 holds HDMI-1 bottom and the
        // explicit containment 2 for that same edge has no view.
        let mut layout = layout_with(vec![
            ViewSpec::on_primary(1, Edge::Bottom),
            ViewSpec::explicit(2, ScreenId(1), Edge::Bottom),
        ]);
        layout.set_topology(dual().with_primary("HDMI-1").unwrap());
        layout.sync_views_to_screens(None);
        assert!(!layout.view_exists(ViewId(2)));

        // Act: DP-1 becomes primary again.
        let report = layout.update_topology(dual());

        // Assert
        assert_eq!(report.reconsidered, vec![ViewId(1)]);
        assert_eq!(report.created, vec![ViewId(2)]);
        assert_eq!(layout.registry().occupant("DP-1", Edge::Bottom), Some(ViewId(1)));
        assert_eq!(layout.registry().occupant("HDMI-1", Edge::Bottom), Some(ViewId(2)));
        assert_eq!(layout.host().created, vec![ViewId(1), ViewId(2)]);
    }
}
