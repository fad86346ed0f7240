//! Window system collaborators.
//!
//! The layout and the shortcut coordinator never touch a real window.  They
//! call these traits instead; the binary plugs in a logging adapter and the
//! tests plug in a recording double or a `mockall` mock.

use latte_core::{Modifier, PlacedView, ViewId};

/// Creates and destroys dock windows.
#[cfg_attr(test, mockall::automock)]
pub trait ViewHost {
    /// Creates and shows the window for a newly placed view.
    fn create_view(&mut self, view: &PlacedView);

    /// Destroys the window of `id`.
    fn destroy_view(&mut self, id: ViewId);

    /// Asks a surviving view to move to the screen it is now bound to.
    ///
    /// Called after every reconciliation, also when the connector did not
    /// change, since a reconnected monitor is a new screen object for the
    /// window system.
    fn reconsider_screen(&mut self, view: &PlacedView);
}

/// What a view should display while shortcut badges are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRequest {
    /// Show the task numbers of a Latte task manager.
    pub latte_shortcuts: bool,
    /// Show the Meta badge on the application launcher.
    pub meta: bool,
    /// Launcher applet that receives the Meta badge.
    pub launcher: Option<u32>,
}

impl BadgeRequest {
    /// Request that clears every badge.
    pub const HIDDEN: BadgeRequest = BadgeRequest {
        latte_shortcuts: false,
        meta: false,
        launcher: None,
    };
}

/// Per-view capabilities used by global shortcuts.
///
/// Every query is answered by looking at the applets inside the view's
/// containment; the shortcut coordinator only decides which view to ask.
#[cfg_attr(test, mockall::automock)]
pub trait ShortcutHost {
    /// The view contains a Plasma task manager.
    fn tasks_present(&self, view: ViewId) -> bool;

    /// The view contains a Latte task manager.
    fn latte_tasks_present(&self, view: ViewId) -> bool;

    /// The view can display shortcut badges.
    fn can_show_badges(&self, view: ViewId) -> bool;

    /// Id of the application launcher applet in the view, if any.
    fn launcher_applet(&self, view: ViewId) -> Option<u32>;

    /// The view contains applets with their own Plasma shortcuts.
    fn has_plasma_shortcuts(&self, view: ViewId) -> bool;

    /// The view is currently slid out of sight.
    fn is_hidden(&self, view: ViewId) -> bool;

    /// Whether the modifiers of the shortcut that last opened the views are
    /// still pressed.  Always `false` where key state cannot be polled.
    fn modifiers_held(&self) -> bool;

    /// Activates entry `entry` of the Plasma task manager in `view`.
    fn activate_task_manager_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool;

    /// Activates entry `entry` of the Latte containment in `view`.
    fn activate_latte_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool;

    /// Shows badges in `view`.  Returns `false` if the view refused.
    fn show_badges(&mut self, view: ViewId, request: BadgeRequest) -> bool;

    fn hide_badges(&mut self, view: ViewId);

    /// Keeps `view` revealed while `block` is set.
    fn set_block_hiding(&mut self, view: ViewId, block: bool);

    fn toggle_applet_expanded(&mut self, view: ViewId, applet: u32);

    fn show_settings_window(&mut self, view: ViewId);

    fn show_global_settings(&mut self);

    /// Updates the badge of the task `identifier` in the Latte task manager of
    /// `view`.  Returns `true` if the view had such a task.
    fn update_task_badge(&mut self, view: ViewId, identifier: &str, value: &str) -> bool;
}
