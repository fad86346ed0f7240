//! Destroy-then-recreate of a single view.
//!
//! Some view properties (bypassing the window manager, for one) can only be
//! applied to a fresh window.  Recreation runs in three steps, each driven by
//! the owner's scheduler:
//!
//! ```text
//! recreate_view ──(delay)──► begin_teardown ──(window gone)──► teardown_complete
//!                                                                  │
//!                                              (settle delay) ◄────┘
//!                                                    │
//!                                                    ▼
//!                                             finish_recreate
//! ```
//!
//! Every step checks the recorded phase first, so a step arriving late (the
//! view was destroyed, evicted or unloaded meanwhile) does nothing.

use std::time::Duration;

use tracing::{debug, info};

use latte_core::{PlacementRequest, ViewId};

use super::GenericLayout;
use crate::application::host::ViewHost;
use crate::application::registry::{RecreatePhase, ViewState};

impl<H: ViewHost> GenericLayout<H> {
    /// Requests recreation of the view of `id`.
    ///
    /// Returns the delay after which [`begin_teardown`](Self::begin_teardown)
    /// should run, or `None` if the view is not active or a recreation is
    /// already pending.
    pub fn recreate_view(&mut self, id: ViewId, delayed: bool) -> Option<Duration> {
        match self.registry.state(id) {
            Some(ViewState::Active) => {}
            Some(ViewState::PendingRecreate(_)) => {
                debug!(containment = %id, "recreation already pending");
                return None;
            }
            _ => return None,
        }

        self.registry
            .set_state(id, ViewState::PendingRecreate(RecreatePhase::Scheduled));
        info!(layout = %self.name, containment = %id, delayed, "view recreation scheduled");

        Some(if delayed {
            self.timings.recreate_delay
        } else {
            Duration::ZERO
        })
    }

    /// Destroys the old window of a scheduled recreation.
    ///
    /// Returns `false` if `id` is no longer scheduled.
    pub fn begin_teardown(&mut self, id: ViewId) -> bool {
        if self.registry.state(id) != Some(ViewState::PendingRecreate(RecreatePhase::Scheduled)) {
            return false;
        }

        self.registry
            .set_state(id, ViewState::PendingRecreate(RecreatePhase::Destroying));
        self.host.destroy_view(id);
        true
    }

    /// Records that the old window is gone.
    ///
    /// Returns the settle delay after which
    /// [`finish_recreate`](Self::finish_recreate) should run.
    pub fn teardown_complete(&mut self, id: ViewId) -> Option<Duration> {
        if self.registry.state(id) != Some(ViewState::PendingRecreate(RecreatePhase::Destroying)) {
            return None;
        }

        self.registry
            .set_state(id, ViewState::PendingRecreate(RecreatePhase::Recreating));
        Some(self.timings.recreate_settle)
    }

    /// Places the view again.
    ///
    /// Returns `true` if a new view was created.  The new placement goes
    /// through the normal policy, so it may land elsewhere or be rejected.
    pub fn finish_recreate(&mut self, id: ViewId) -> bool {
        if self.registry.state(id) != Some(ViewState::PendingRecreate(RecreatePhase::Recreating)) {
            return false;
        }

        self.registry.remove(id);
        match self.add_view(id, PlacementRequest::default()) {
            Ok(_) => true,
            Err(e) => {
                debug!("recreated view not placed: {e}");
                false
            }
        }
    }

    /// Runs all recreation steps back to back, ignoring the delays.
    pub fn recreate_now(&mut self, id: ViewId) -> bool {
        self.recreate_view(id, false).is_some()
            && self.begin_teardown(id)
            && self.teardown_complete(id).is_some()
            && self.finish_recreate(id)
    }
}
