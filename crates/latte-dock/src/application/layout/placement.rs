//! Placement policy: may this containment get a view, and where?
//!
//! # Decision order (for beginners)
//!
//! 1. The containment must exist in this layout, be dock-capable and not
//!    already have a view.
//! 2. Resolve the target screen id: the containment's screen (or its last
//!    screen), replaced by the primary screen for on-primary containments or
//!    by the caller's explicit screen otherwise.
//! 3. If the caller passed an occupied map (edges already taken by other
//!    layouts) and the resolved `(screen, edge)` is in it, reject.
//! 4. An explicit containment needs its screen to be connected, and may not
//!    take an edge of the primary screen that an on-primary containment is
//!    configured for.
//! 5. A live view of this layout already bound to the resolved
//!    `(screen, edge)` blocks the placement, unless step 6 evicts it.
//! 6. An on-primary containment evicts every explicit view sitting on the
//!    primary screen at the same edge.
//! 7. Create the view, register it and announce the new count.
//!
//! Rejections are returned as [`PlacementError`] and logged by callers at
//! `debug`; nothing is written to the layout when a placement is rejected.

use thiserror::Error;
use tracing::{debug, info, warn};

use latte_core::{Edge, PlacedView, PlacementRequest, ScreenId, ViewId};

use super::{GenericLayout, LayoutEvent};
use crate::application::host::ViewHost;
use crate::application::registry::ViewState;

/// Reasons a view was not placed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The containment is not part of this layout.
    #[error("containment {0} is not part of this layout")]
    UnknownContainment(ViewId),

    /// The containment cannot host a dock or panel.
    #[error("containment {0} is not dock-capable")]
    InvalidHostEntity(ViewId),

    /// A view for the containment is already registered.
    #[error("containment {0} already has a view")]
    AlreadyPlaced(ViewId),

    /// The explicit screen of the containment is not connected.
    #[error("screen {screen} of containment {view} is not connected")]
    ScreenNotFound { view: ViewId, screen: ScreenId },

    /// Another layout already claimed the edge.
    #[error("edge {edge} of {connector} is already claimed for containment {view}")]
    EdgeClaimed {
        view: ViewId,
        connector: String,
        edge: Edge,
    },

    /// An on-primary dock is configured for the same edge of the primary screen.
    #[error("primary dock occupies {edge} edge, containment {view} rejected")]
    PrimaryEdgeConflict { view: ViewId, edge: Edge },

    /// A live view of this layout already holds the edge.
    #[error("edge {edge} of {connector} is held by {occupant}, containment {view} rejected")]
    EdgeOccupied {
        view: ViewId,
        occupant: ViewId,
        connector: String,
        edge: Edge,
    },

    /// No screen is connected, so there is no primary screen to place on.
    #[error("no primary screen for containment {0}")]
    NoPrimaryScreen(ViewId),
}

impl<H: ViewHost> GenericLayout<H> {
    /// Creates a view for containment `id` if the placement policy allows it.
    ///
    /// Returns the placed view id on success.
    ///
    /// # Errors
    ///
    /// Every [`PlacementError`] variant is a rejection; the layout is left
    /// unchanged.
    pub fn add_view(&mut self, id: ViewId, request: PlacementRequest<'_>) -> Result<ViewId, PlacementError> {
        let spec = self
            .containment(id)
            .cloned()
            .ok_or(PlacementError::UnknownContainment(id))?;

        if !spec.dock_capable {
            warn!(containment = %id, "containment can not host a view");
            return Err(PlacementError::InvalidHostEntity(id));
        }

        if self.registry.contains(id) {
            return Err(PlacementError::AlreadyPlaced(id));
        }

        let primary_id = self.pool.primary_screen_id(&self.topology);

        let mut screen = spec.screen;
        if screen.is_none() && request.explicit_screen.is_none() {
            screen = spec.last_screen;
        }
        if spec.on_primary {
            screen = primary_id;
        } else if request.explicit_screen.is_some() {
            screen = request.explicit_screen;
        }

        let edge = spec.edge;
        let connector = screen.and_then(|s| self.pool.connector(s)).map(str::to_owned);

        debug!(
            containment = %id,
            screen = ?screen,
            connector = ?connector,
            on_primary = spec.on_primary,
            %edge,
            force_on_primary = request.force_on_primary,
            "adding view"
        );

        if let (Some(occupied), Some(connector)) = (request.occupied, connector.as_deref()) {
            if occupied.is_claimed(connector, edge) {
                return Err(PlacementError::EdgeClaimed {
                    view: id,
                    connector: connector.to_owned(),
                    edge,
                });
            }
        }

        let target = match screen {
            Some(screen) if !spec.on_primary && !request.force_on_primary => {
                let connector = connector
                    .filter(|c| self.topology.contains(c))
                    .ok_or(PlacementError::ScreenNotFound { view: id, screen })?;

                if self.topology.is_primary(&connector) && self.primary_dock_occupies_edge(edge) {
                    return Err(PlacementError::PrimaryEdgeConflict { view: id, edge });
                }
                connector
            }
            _ => self
                .topology
                .primary_connector()
                .map(str::to_owned)
                .ok_or(PlacementError::NoPrimaryScreen(id))?,
        };

        let evicted = match primary_id {
            Some(primary_id) if spec.on_primary => self.explicit_views_at(primary_id, edge),
            _ => Vec::new(),
        };

        if let Some(occupant) = self.registry.occupant(&target, edge).filter(|v| !evicted.contains(v)) {
            return Err(PlacementError::EdgeOccupied {
                view: id,
                occupant,
                connector: target,
                edge,
            });
        }

        for evicted in evicted {
            debug!(containment = %evicted, %edge, "evicting explicit view for an on-primary view");
            self.tear_down(evicted);
        }

        let mut placed = PlacedView::bind(&spec, target.clone());
        if request.force_on_primary {
            placed.on_primary = true;
        }

        let bound = self.pool.id(&target);
        if let Some(spec) = self.containment_mut(id) {
            spec.screen = bound;
            if bound.is_some() {
                spec.last_screen = bound;
            }
            if request.force_on_primary {
                spec.on_primary = true;
            }
        }

        self.host.create_view(&placed);
        self.registry.insert(placed, ViewState::Active);
        self.events.push(LayoutEvent::ViewsCountChanged);

        info!(layout = %self.name, containment = %id, screen = %target, %edge, "view placed");
        Ok(id)
    }

    /// Explicit views sitting on the primary screen at `edge`; an on-primary
    /// view takes their place.
    fn explicit_views_at(&self, primary_id: ScreenId, edge: Edge) -> Vec<ViewId> {
        self.registry
            .live_views()
            .filter(|view| {
                self.containment(view.id).is_some_and(|spec| {
                    !spec.on_primary && spec.effective_screen() == Some(primary_id) && spec.edge == edge
                })
            })
            .map(|view| view.id)
            .collect()
    }
}
