//! Window host adapters.
//!
//! The real dock draws its windows through the compositor.  This crate only
//! decides *where* windows go, so the binary uses [`LoggingHost`], which
//! reports every request through `tracing`, and tests use
//! [`mock::RecordingHost`].

use tracing::{debug, info};

use latte_core::{Modifier, PlacedView, ViewId};

use crate::application::host::{BadgeRequest, ShortcutHost, ViewHost};

pub mod mock;

/// Host that logs every window request instead of performing it.
///
/// As a shortcut host it behaves like a view holding a Latte task manager
/// that can show badges and has no launcher applet.
#[derive(Debug, Default)]
pub struct LoggingHost {
    windows: usize,
}

impl LoggingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows currently alive.
    pub fn windows(&self) -> usize {
        self.windows
    }
}

impl ViewHost for LoggingHost {
    fn create_view(&mut self, view: &PlacedView) {
        self.windows += 1;
        info!(
            view = %view.id,
            screen = %view.connector,
            edge = %view.edge,
            on_primary = view.on_primary,
            by_pass_wm = view.by_pass_wm,
            "create window"
        );
    }

    fn destroy_view(&mut self, id: ViewId) {
        self.windows = self.windows.saturating_sub(1);
        info!(view = %id, "destroy window");
    }

    fn reconsider_screen(&mut self, view: &PlacedView) {
        debug!(view = %view.id, screen = %view.connector, "reconsider screen");
    }
}

impl ShortcutHost for LoggingHost {
    fn tasks_present(&self, _view: ViewId) -> bool {
        false
    }

    fn latte_tasks_present(&self, _view: ViewId) -> bool {
        true
    }

    fn can_show_badges(&self, _view: ViewId) -> bool {
        true
    }

    fn launcher_applet(&self, _view: ViewId) -> Option<u32> {
        None
    }

    fn has_plasma_shortcuts(&self, _view: ViewId) -> bool {
        false
    }

    fn is_hidden(&self, _view: ViewId) -> bool {
        false
    }

    fn modifiers_held(&self) -> bool {
        false
    }

    fn activate_task_manager_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool {
        info!(%view, entry, ?modifier, "activate task manager entry");
        true
    }

    fn activate_latte_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool {
        info!(%view, entry, ?modifier, "activate latte entry");
        true
    }

    fn show_badges(&mut self, view: ViewId, request: BadgeRequest) -> bool {
        info!(%view, latte = request.latte_shortcuts, meta = request.meta, launcher = ?request.launcher, "show badges");
        true
    }

    fn hide_badges(&mut self, view: ViewId) {
        info!(%view, "hide badges");
    }

    fn set_block_hiding(&mut self, view: ViewId, block: bool) {
        debug!(%view, block, "block hiding");
    }

    fn toggle_applet_expanded(&mut self, view: ViewId, applet: u32) {
        info!(%view, applet, "toggle applet");
    }

    fn show_settings_window(&mut self, view: ViewId) {
        info!(%view, "show settings window");
    }

    fn show_global_settings(&mut self) {
        info!("show global settings");
    }

    fn update_task_badge(&mut self, view: ViewId, identifier: &str, value: &str) -> bool {
        debug!(%view, identifier, value, "update task badge");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latte_core::{Edge, ViewSpec};

    #[test]
    fn test_logging_host_counts_windows() {
        let mut host = LoggingHost::new();
        let view = PlacedView::bind(&ViewSpec::on_primary(1, Edge::Bottom), "DP-1");

        host.create_view(&view);
        host.create_view(&view);
        host.destroy_view(ViewId(1));

        assert_eq!(host.windows(), 1);
    }

    #[test]
    fn test_logging_host_accepts_latte_entries() {
        let mut host = LoggingHost::new();
        assert!(host.latte_tasks_present(ViewId(1)));
        assert!(host.activate_latte_entry(ViewId(1), 1, Modifier::Meta));
        assert_eq!(host.launcher_applet(ViewId(1)), None);
    }
}
