//! Window state record.
//!
//! Visibility modes such as "dodge maximized" need to know what the other
//! windows on screen are doing.  The host's window tracker fills in a
//! [`WindowInfo`] for every window it sees and the view logic only reads it.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::ghost::Rect;

/// Native window identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Snapshot of a window's state.
///
/// Two records are equal when they describe the same window, whatever the
/// state flags say; ordering is by window id as well.
#[derive(Debug, Clone, Default)]
pub struct WindowInfo {
    pub id: WindowId,
    pub geometry: Rect,
    pub is_valid: bool,
    pub is_active: bool,
    pub is_minimized: bool,
    pub is_max_vert: bool,
    pub is_max_horiz: bool,
    pub is_fullscreen: bool,
    pub is_shaded: bool,
    pub is_plasma_desktop: bool,
    pub is_keep_above: bool,
    pub has_skip_taskbar: bool,
    pub is_on_all_desktops: bool,
    pub is_on_all_activities: bool,
    pub app_name: String,
    pub display: String,
    pub desktops: BTreeSet<String>,
    pub activities: BTreeSet<String>,
}

impl WindowInfo {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            is_valid: true,
            ..Self::default()
        }
    }

    /// Maximized in either direction.
    pub fn is_maximized(&self) -> bool {
        self.is_max_vert || self.is_max_horiz
    }

    pub fn is_on_desktop(&self, desktop: &str) -> bool {
        self.is_on_all_desktops || self.desktops.contains(desktop)
    }

    pub fn is_on_activity(&self, activity: &str) -> bool {
        self.is_on_all_activities || self.activities.contains(activity)
    }
}

impl PartialEq for WindowInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WindowInfo {}

impl PartialOrd for WindowInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WindowInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_maximized_in_either_direction() {
        let mut info = WindowInfo::new(WindowId(1));
        assert!(!info.is_maximized());
        info.is_max_horiz = true;
        assert!(info.is_maximized());
        info.is_max_horiz = false;
        info.is_max_vert = true;
        assert!(info.is_maximized());
    }

    #[test]
    fn test_is_on_desktop_checks_list_or_all() {
        let mut info = WindowInfo::new(WindowId(1));
        info.desktops.insert("2".into());
        assert!(info.is_on_desktop("2"));
        assert!(!info.is_on_desktop("3"));

        info.is_on_all_desktops = true;
        assert!(info.is_on_desktop("3"));
    }

    #[test]
    fn test_is_on_activity_checks_list_or_all() {
        let mut info = WindowInfo::new(WindowId(1));
        info.activities.insert("work".into());
        assert!(info.is_on_activity("work"));
        assert!(!info.is_on_activity("home"));

        info.is_on_all_activities = true;
        assert!(info.is_on_activity("home"));
    }

    #[test]
    fn test_equality_and_ordering_use_only_the_id() {
        // Arrange
        let mut a = WindowInfo::new(WindowId(5));
        a.is_active = true;
        let b = WindowInfo::new(WindowId(5));
        let c = WindowInfo::new(WindowId(9));

        // Assert
        assert_eq!(a, b);
        assert!(a < c);
        assert!(c > b);
    }
}
