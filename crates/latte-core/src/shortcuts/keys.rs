//! Key table for global shortcuts.
//!
//! Task entries 1..=9 use `Meta+<digit>`.  Entries 10..=19 continue on the
//! row below the digits: `Meta+0`, then `Z X C V B N M , .`.  Holding Ctrl as
//! well asks for a new instance of the entry instead of activating it.

use std::fmt;

/// Highest entry number that has a shortcut.
pub const MAX_ENTRY: u8 = 19;

/// Modifier that triggered an entry shortcut.
///
/// `Meta` activates the entry, `Ctrl` (pressed together with Meta) starts a
/// new instance of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Meta,
    Ctrl,
}

/// Non-modifier key of a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutKey {
    Digit(u8),
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    /// The backtick key left of `1`.
    QuoteLeft,
    A,
    W,
}

const KEYS_ABOVE_TEN: [ShortcutKey; 10] = [
    ShortcutKey::Digit(0),
    ShortcutKey::Z,
    ShortcutKey::X,
    ShortcutKey::C,
    ShortcutKey::V,
    ShortcutKey::B,
    ShortcutKey::N,
    ShortcutKey::M,
    ShortcutKey::Comma,
    ShortcutKey::Period,
];

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutKey::Digit(d) => write!(f, "{d}"),
            ShortcutKey::Z => f.write_str("Z"),
            ShortcutKey::X => f.write_str("X"),
            ShortcutKey::C => f.write_str("C"),
            ShortcutKey::V => f.write_str("V"),
            ShortcutKey::B => f.write_str("B"),
            ShortcutKey::N => f.write_str("N"),
            ShortcutKey::M => f.write_str("M"),
            ShortcutKey::Comma => f.write_str(","),
            ShortcutKey::Period => f.write_str("."),
            ShortcutKey::QuoteLeft => f.write_str("`"),
            ShortcutKey::A => f.write_str("A"),
            ShortcutKey::W => f.write_str("W"),
        }
    }
}

/// Key used for task entry `entry`, or `None` outside 1..=19.
pub fn entry_key(entry: u8) -> Option<ShortcutKey> {
    match entry {
        1..=9 => Some(ShortcutKey::Digit(entry)),
        10..=MAX_ENTRY => Some(KEYS_ABOVE_TEN[usize::from(entry - 10)]),
        _ => None,
    }
}

/// One registered task entry shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryShortcut {
    pub entry: u8,
    pub key: ShortcutKey,
    pub modifier: Modifier,
}

impl EntryShortcut {
    /// Shortcut for `entry` triggered with `modifier`.
    pub fn new(entry: u8, modifier: Modifier) -> Option<Self> {
        entry_key(entry).map(|key| Self { entry, key, modifier })
    }

    /// Stable action name registered with the global shortcut service.
    pub fn action_name(&self) -> String {
        match self.modifier {
            Modifier::Meta => format!("activate entry {}", self.entry),
            Modifier::Ctrl => format!("new instance for entry {}", self.entry),
        }
    }
}

impl fmt::Display for EntryShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Modifier::Meta => write!(f, "Meta+{}", self.key),
            Modifier::Ctrl => write!(f, "Meta+Ctrl+{}", self.key),
        }
    }
}

/// Every entry shortcut: activations for 1..=19 followed by new-instance
/// variants for 1..=19.
pub fn entry_shortcuts() -> Vec<EntryShortcut> {
    [Modifier::Meta, Modifier::Ctrl]
        .into_iter()
        .flat_map(|modifier| (1..=MAX_ENTRY).filter_map(move |entry| EntryShortcut::new(entry, modifier)))
        .collect()
}

/// Shell actions with a fixed `Meta+<key>` shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAction {
    /// Reveal views and their shortcut badges.
    ShowViews,
    /// Cycle through the views' settings windows.
    CycleSettings,
    /// Open the global settings dialog.
    GlobalSettings,
}

impl FixedAction {
    pub const ALL: [FixedAction; 3] = [
        FixedAction::ShowViews,
        FixedAction::CycleSettings,
        FixedAction::GlobalSettings,
    ];

    pub fn key(self) -> ShortcutKey {
        match self {
            FixedAction::ShowViews => ShortcutKey::QuoteLeft,
            FixedAction::CycleSettings => ShortcutKey::A,
            FixedAction::GlobalSettings => ShortcutKey::W,
        }
    }

    pub fn action_name(self) -> &'static str {
        match self {
            FixedAction::ShowViews => "show latte view",
            FixedAction::CycleSettings => "show view settings",
            FixedAction::GlobalSettings => "show latte global settings",
        }
    }
}

impl fmt::Display for FixedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Meta+{}", self.key())
    }
}
