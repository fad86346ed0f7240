//! Connected screens and the stable screen id pool.
//!
//! Two different notions of "screen" live here:
//!
//! - [`ScreenTopology`] is a snapshot of the screens that are connected *right
//!   now*, in the order the system lists them, with exactly one primary.
//!   It is rebuilt by the host every time a monitor is plugged, unplugged or
//!   changes resolution.
//!
//! - [`ScreenPool`] remembers every connector name it has ever seen and hands
//!   out a numeric [`ScreenId`] for it.  Ids are never reused, so a containment
//!   that stored "screen 2" still means the same connector after that monitor
//!   has been unplugged and plugged back in.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Pool-assigned identifier of a screen connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u32);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when building a [`ScreenTopology`].
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    /// Two connected screens report the same connector name.
    #[error("duplicate screen connector: {0}")]
    DuplicateConnector(String),

    /// More than one screen claims to be primary.
    #[error("more than one primary screen: {0} and {1}")]
    MultiplePrimaries(String, String),

    /// The named connector is not part of the topology.
    #[error("screen not connected: {0}")]
    NotConnected(String),
}

/// A connected screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Stable connector name, e.g. `"DP-1"` or `"HDMI-A-1"`.
    pub connector: String,
    /// Whether the system designates this screen as primary.
    pub is_primary: bool,
}

impl Screen {
    pub fn new(connector: impl Into<String>, is_primary: bool) -> Self {
        Self {
            connector: connector.into(),
            is_primary,
        }
    }
}

/// Ordered snapshot of the currently connected screens.
///
/// The position of a screen in the list is its *ordinal*; lower ordinals have
/// higher priority when views on different non-primary screens are compared.
/// A non-empty topology always has exactly one primary screen: when the host
/// flags none, the first screen is promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenTopology {
    screens: Vec<Screen>,
}

impl ScreenTopology {
    /// Builds a topology from the host's ordered screen list.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateConnector`] when a connector appears
    /// twice and [`TopologyError::MultiplePrimaries`] when more than one screen
    /// is flagged primary.
    pub fn new(mut screens: Vec<Screen>) -> Result<Self, TopologyError> {
        let mut primary: Option<&str> = None;
        for (index, screen) in screens.iter().enumerate() {
            if screens[..index]
                .iter()
                .any(|earlier| earlier.connector == screen.connector)
            {
                return Err(TopologyError::DuplicateConnector(screen.connector.clone()));
            }
            if screen.is_primary {
                if let Some(first) = primary {
                    return Err(TopologyError::MultiplePrimaries(
                        first.to_string(),
                        screen.connector.clone(),
                    ));
                }
                primary = Some(&screen.connector);
            }
        }

        if primary.is_none() {
            if let Some(first) = screens.first_mut() {
                first.is_primary = true;
            }
        }

        Ok(Self { screens })
    }

    /// A topology with no connected screens.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// The primary screen, or `None` when nothing is connected.
    pub fn primary(&self) -> Option<&Screen> {
        self.screens.iter().find(|s| s.is_primary)
    }

    pub fn primary_connector(&self) -> Option<&str> {
        self.primary().map(|s| s.connector.as_str())
    }

    /// Returns `true` if `connector` is the current primary screen.
    pub fn is_primary(&self, connector: &str) -> bool {
        self.primary_connector() == Some(connector)
    }

    /// Returns `true` if a screen with this connector is connected.
    pub fn contains(&self, connector: &str) -> bool {
        self.ordinal(connector).is_some()
    }

    /// Position of `connector` in the system screen list.
    pub fn ordinal(&self, connector: &str) -> Option<usize> {
        self.screens.iter().position(|s| s.connector == connector)
    }

    /// Returns a copy of this topology with `connector` unplugged.
    ///
    /// When the primary screen is removed the first remaining screen becomes
    /// primary, as the windowing system does.
    pub fn without(&self, connector: &str) -> ScreenTopology {
        let screens: Vec<Screen> = self
            .screens
            .iter()
            .filter(|s| s.connector != connector)
            .cloned()
            .collect();
        // Removing a screen can never introduce duplicates or a second primary.
        Self::new(screens).unwrap_or_default()
    }

    /// Returns a copy of this topology with `screen` plugged in at the end of
    /// the system list.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateConnector`] if the connector is
    /// already connected, or [`TopologyError::MultiplePrimaries`] if `screen`
    /// is primary while another primary exists.
    pub fn with_screen(&self, screen: Screen) -> Result<ScreenTopology, TopologyError> {
        let mut screens = self.screens.clone();
        screens.push(screen);
        Self::new(screens)
    }

    /// Returns a copy of this topology where `connector` is the primary screen.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotConnected`] if `connector` is not connected.
    pub fn with_primary(&self, connector: &str) -> Result<ScreenTopology, TopologyError> {
        if !self.contains(connector) {
            return Err(TopologyError::NotConnected(connector.to_string()));
        }
        let screens = self
            .screens
            .iter()
            .map(|s| Screen::new(s.connector.clone(), s.connector == connector))
            .collect();
        Ok(Self { screens })
    }
}

/// Stable mapping between [`ScreenId`]s and connector names.
///
/// Ids are handed out in the order connectors are first seen and are never
/// reused or forgotten, even after the screen is disconnected.
#[derive(Debug, Clone, Default)]
pub struct ScreenPool {
    connectors: BTreeMap<ScreenId, String>,
    next_id: u32,
}

impl ScreenPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `connector`, assigning a fresh one on first sight.
    pub fn insert_connector(&mut self, connector: &str) -> ScreenId {
        if let Some(id) = self.id(connector) {
            return id;
        }
        let id = ScreenId(self.next_id);
        self.next_id += 1;
        self.connectors.insert(id, connector.to_string());
        id
    }

    /// Assigns ids to every screen in `topology` that the pool has not seen yet.
    pub fn register_topology(&mut self, topology: &ScreenTopology) {
        for screen in topology.screens() {
            self.insert_connector(&screen.connector);
        }
    }

    /// Id previously assigned to `connector`.
    pub fn id(&self, connector: &str) -> Option<ScreenId> {
        self.connectors
            .iter()
            .find(|(_, name)| name.as_str() == connector)
            .map(|(id, _)| *id)
    }

    /// Connector name for `id`.
    pub fn connector(&self, id: ScreenId) -> Option<&str> {
        self.connectors.get(&id).map(String::as_str)
    }

    pub fn has_id(&self, id: ScreenId) -> bool {
        self.connectors.contains_key(&id)
    }

    /// Id of the current primary screen.
    pub fn primary_screen_id(&self, topology: &ScreenTopology) -> Option<ScreenId> {
        topology.primary_connector().and_then(|c| self.id(c))
    }

    /// Returns `true` if `id` names a connector that is currently connected.
    pub fn screen_exists(&self, id: ScreenId, topology: &ScreenTopology) -> bool {
        self.connector(id).is_some_and(|c| topology.contains(c))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn dual() -> ScreenTopology {
        ScreenTopology::new(vec![Screen::new("DP-1", true), Screen::new("HDMI-1", false)])
            .expect("valid topology")
    }

    // ── ScreenTopology ────────────────────────────────────────────────────────

    #[test]
    fn test_topology_new_rejects_duplicate_connectors() {
        let result = ScreenTopology::new(vec![Screen::new("DP-1", true), Screen::new("DP-1", false)]);
        assert_eq!(result, Err(TopologyError::DuplicateConnector("DP-1".into())));
    }

    #[test]
    fn test_topology_new_rejects_two_primaries() {
        let result = ScreenTopology::new(vec![Screen::new("DP-1", true), Screen::new("DP-2", true)]);
        assert_eq!(
            result,
            Err(TopologyError::MultiplePrimaries("DP-1".into(), "DP-2".into()))
        );
    }

    #[test]
    fn test_topology_new_promotes_first_screen_when_none_is_primary() {
        let topology =
            ScreenTopology::new(vec![Screen::new("DP-1", false), Screen::new("DP-2", false)]).unwrap();
        assert_eq!(topology.primary_connector(), Some("DP-1"));
    }

    #[test]
    fn test_empty_topology_has_no_primary() {
        assert!(ScreenTopology::empty().primary().is_none());
    }

    #[test]
    fn test_topology_ordinal_follows_system_order() {
        let topology = dual();
        assert_eq!(topology.ordinal("DP-1"), Some(0));
        assert_eq!(topology.ordinal("HDMI-1"), Some(1));
        assert_eq!(topology.ordinal("VGA-1"), None);
    }

    #[test]
    fn test_topology_without_primary_promotes_next_screen() {
        let topology = dual().without("DP-1");
        assert_eq!(topology.primary_connector(), Some("HDMI-1"));
        assert_eq!(topology.screens().len(), 1);
    }

    #[test]
    fn test_topology_with_screen_appends_at_the_end() {
        let topology = dual().with_screen(Screen::new("VGA-1", false)).unwrap();
        assert_eq!(topology.ordinal("VGA-1"), Some(2));
    }

    #[test]
    fn test_topology_with_primary_moves_primary_flag() {
        let topology = dual().with_primary("HDMI-1").unwrap();
        assert!(topology.is_primary("HDMI-1"));
        assert!(!topology.is_primary("DP-1"));
    }

    #[test]
    fn test_topology_with_primary_rejects_unknown_connector() {
        assert_eq!(
            dual().with_primary("VGA-1"),
            Err(TopologyError::NotConnected("VGA-1".into()))
        );
    }

    // ── ScreenPool ────────────────────────────────────────────────────────────

    #[test]
    fn test_pool_assigns_ids_in_first_seen_order() {
        let mut pool = ScreenPool::new();
        pool.register_topology(&dual());
        assert_eq!(pool.id("DP-1"), Some(ScreenId(0)));
        assert_eq!(pool.id("HDMI-1"), Some(ScreenId(1)));
    }

    #[test]
    fn test_pool_keeps_ids_after_disconnect() {
        let mut pool = ScreenPool::new();
        pool.register_topology(&dual());
        let unplugged = dual().without("HDMI-1");
        pool.register_topology(&unplugged);

        assert_eq!(pool.connector(ScreenId(1)), Some("HDMI-1"));
        assert!(!pool.screen_exists(ScreenId(1), &unplugged));
        assert!(pool.screen_exists(ScreenId(0), &unplugged));
    }

    #[test]
    fn test_pool_insert_connector_is_idempotent() {
        let mut pool = ScreenPool::new();
        let first = pool.insert_connector("DP-1");
        let second = pool.insert_connector("DP-1");
        assert_eq!(first, second);
    }

    #[test]
    fn test_pool_primary_screen_id_tracks_topology() {
        let mut pool = ScreenPool::new();
        pool.register_topology(&dual());
        let swapped = dual().with_primary("HDMI-1").unwrap();
        assert_eq!(pool.primary_screen_id(&swapped), Some(ScreenId(1)));
    }
}
