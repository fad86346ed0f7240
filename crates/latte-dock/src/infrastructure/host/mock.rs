//! Recording host for tests.
//!
//! [`RecordingHost`] records every window request and answers capability
//! queries from plain sets that tests fill in.  Integration tests use it
//! where a `mockall` mock would need too many expectations.

use std::collections::{BTreeMap, BTreeSet};

use latte_core::{Modifier, PlacedView, ViewId};

use crate::application::host::{BadgeRequest, ShortcutHost, ViewHost};

/// Which task manager accepted an entry activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskManager {
    Plasma,
    Latte,
}

/// One accepted entry activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub view: ViewId,
    pub entry: u8,
    pub modifier: Modifier,
    pub target: TaskManager,
}

/// A host that records calls and answers queries from its fields.
#[derive(Debug, Default)]
pub struct RecordingHost {
    // ── Window requests ───────────────────────────────────────────────────────
    pub created: Vec<ViewId>,
    pub destroyed: Vec<ViewId>,
    pub reconsidered: Vec<ViewId>,

    // ── Capabilities ──────────────────────────────────────────────────────────
    /// Views holding a Plasma task manager.
    pub plasma_tasks: BTreeSet<ViewId>,
    /// Views holding a Latte task manager.
    pub latte_tasks: BTreeSet<ViewId>,
    pub badge_capable: BTreeSet<ViewId>,
    /// Launcher applet id per view.
    pub launchers: BTreeMap<ViewId, u32>,
    pub plasma_shortcuts: BTreeSet<ViewId>,
    pub hidden: BTreeSet<ViewId>,
    pub modifiers_held: bool,
    /// Task identifiers known to each view's Latte task manager.
    pub task_ids: BTreeMap<ViewId, BTreeSet<String>>,

    // ── Shortcut requests ─────────────────────────────────────────────────────
    pub activations: Vec<Activation>,
    pub badges_shown: Vec<(ViewId, BadgeRequest)>,
    pub badges_hidden: Vec<ViewId>,
    /// Current block-hiding flag per view.
    pub block_hiding: BTreeMap<ViewId, bool>,
    pub toggled: Vec<(ViewId, u32)>,
    pub settings_opened: Vec<ViewId>,
    pub global_settings_opened: usize,
    pub badge_updates: Vec<(ViewId, String, String)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `view` is currently kept revealed.
    pub fn is_blocked(&self, view: ViewId) -> bool {
        self.block_hiding.get(&view).copied().unwrap_or(false)
    }

    /// Views with at least one live window: created and not destroyed since.
    pub fn live_windows(&self) -> BTreeMap<ViewId, usize> {
        let mut live: BTreeMap<ViewId, usize> = BTreeMap::new();
        for id in &self.created {
            *live.entry(*id).or_default() += 1;
        }
        for id in &self.destroyed {
            if let Some(count) = live.get_mut(id) {
                *count -= 1;
                if *count == 0 {
                    live.remove(id);
                }
            }
        }
        live
    }
}

impl ViewHost for RecordingHost {
    fn create_view(&mut self, view: &PlacedView) {
        self.created.push(view.id);
    }

    fn destroy_view(&mut self, id: ViewId) {
        self.destroyed.push(id);
    }

    fn reconsider_screen(&mut self, view: &PlacedView) {
        self.reconsidered.push(view.id);
    }
}

impl ShortcutHost for RecordingHost {
    fn tasks_present(&self, view: ViewId) -> bool {
        self.plasma_tasks.contains(&view)
    }

    fn latte_tasks_present(&self, view: ViewId) -> bool {
        self.latte_tasks.contains(&view)
    }

    fn can_show_badges(&self, view: ViewId) -> bool {
        self.badge_capable.contains(&view)
    }

    fn launcher_applet(&self, view: ViewId) -> Option<u32> {
        self.launchers.get(&view).copied()
    }

    fn has_plasma_shortcuts(&self, view: ViewId) -> bool {
        self.plasma_shortcuts.contains(&view)
    }

    fn is_hidden(&self, view: ViewId) -> bool {
        self.hidden.contains(&view)
    }

    fn modifiers_held(&self) -> bool {
        self.modifiers_held
    }

    fn activate_task_manager_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool {
        if !self.plasma_tasks.contains(&view) {
            return false;
        }
        self.activations.push(Activation {
            view,
            entry,
            modifier,
            target: TaskManager::Plasma,
        });
        true
    }

    fn activate_latte_entry(&mut self, view: ViewId, entry: u8, modifier: Modifier) -> bool {
        if !self.latte_tasks.contains(&view) {
            return false;
        }
        self.activations.push(Activation {
            view,
            entry,
            modifier,
            target: TaskManager::Latte,
        });
        true
    }

    fn show_badges(&mut self, view: ViewId, request: BadgeRequest) -> bool {
        let accepts = self.badge_capable.contains(&view)
            || self.plasma_shortcuts.contains(&view)
            || self.launchers.contains_key(&view);
        if accepts {
            self.badges_shown.push((view, request));
        }
        accepts
    }

    fn hide_badges(&mut self, view: ViewId) {
        self.badges_hidden.push(view);
    }

    fn set_block_hiding(&mut self, view: ViewId, block: bool) {
        self.block_hiding.insert(view, block);
    }

    fn toggle_applet_expanded(&mut self, view: ViewId, applet: u32) {
        self.toggled.push((view, applet));
    }

    fn show_settings_window(&mut self, view: ViewId) {
        self.settings_opened.push(view);
    }

    fn show_global_settings(&mut self) {
        self.global_settings_opened += 1;
    }

    fn update_task_badge(&mut self, view: ViewId, identifier: &str, value: &str) -> bool {
        let known = self
            .task_ids
            .get(&view)
            .is_some_and(|ids| ids.contains(identifier));
        if known {
            self.badge_updates.push((view, identifier.to_owned(), value.to_owned()));
        }
        known
    }
}
