//! Screen edges a view can be anchored to.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge priority used to break ties between views on the same screen.
///
/// Lower index wins: a bottom dock outranks a left panel, which outranks a
/// top panel, which outranks a right panel.
pub const EDGE_PRIORITY: [Edge; 4] = [Edge::Bottom, Edge::Left, Edge::Top, Edge::Right];

/// The four edges of a screen.
///
/// Declaration order carries no meaning.  Ordering between edges is defined
/// by [`EDGE_PRIORITY`] so that maps keyed by `Edge` iterate from the
/// highest-priority edge to the lowest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Orientation of a view, derived from the edge it is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    Horizontal,
    Vertical,
}

impl Edge {
    /// Position of this edge in [`EDGE_PRIORITY`] (0 = highest priority).
    pub fn priority(self) -> usize {
        match self {
            Edge::Bottom => 0,
            Edge::Left => 1,
            Edge::Top => 2,
            Edge::Right => 3,
        }
    }

    /// Top and bottom views are horizontal, left and right views vertical.
    pub fn form_factor(self) -> FormFactor {
        match self {
            Edge::Top | Edge::Bottom => FormFactor::Horizontal,
            Edge::Left | Edge::Right => FormFactor::Vertical,
        }
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown edge name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown edge `{0}`, expected top, bottom, left or right")]
pub struct ParseEdgeError(pub String);

impl FromStr for Edge {
    type Err = ParseEdgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Edge::Top),
            "bottom" => Ok(Edge::Bottom),
            "left" => Ok(Edge::Left),
            "right" => Ok(Edge::Right),
            _ => Err(ParseEdgeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_priority_matches_priority_table() {
        for (index, edge) in EDGE_PRIORITY.iter().enumerate() {
            assert_eq!(edge.priority(), index);
        }
    }

    #[test]
    fn test_edge_ordering_follows_priority_not_declaration() {
        let mut edges = vec![Edge::Right, Edge::Top, Edge::Left, Edge::Bottom];
        edges.sort();
        assert_eq!(edges, EDGE_PRIORITY.to_vec());
    }

    #[test]
    fn test_edge_form_factor() {
        assert_eq!(Edge::Bottom.form_factor(), FormFactor::Horizontal);
        assert_eq!(Edge::Top.form_factor(), FormFactor::Horizontal);
        assert_eq!(Edge::Left.form_factor(), FormFactor::Vertical);
        assert_eq!(Edge::Right.form_factor(), FormFactor::Vertical);
    }

    #[test]
    fn test_edge_default_is_bottom() {
        assert_eq!(Edge::default(), Edge::Bottom);
    }

    #[test]
    fn test_edge_display_is_lowercase_name() {
        assert_eq!(Edge::Left.to_string(), "left");
    }

    #[test]
    fn test_edge_parses_case_insensitively() {
        assert_eq!("Bottom".parse::<Edge>(), Ok(Edge::Bottom));
        assert_eq!("right".parse::<Edge>(), Ok(Edge::Right));
        assert_eq!("middle".parse::<Edge>(), Err(ParseEdgeError("middle".into())));
    }
}
