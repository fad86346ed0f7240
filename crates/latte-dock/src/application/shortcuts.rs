//! Global shortcuts.
//!
//! [`GlobalShortcuts`] turns shortcut presses into calls on the views of the
//! current layout.  Every operation receives the layout's views already in
//! priority order (see [`GenericLayout::sorted_views`]), so "the first view
//! that can do X" always means the highest-priority one.
//!
//! # The hide timer (for beginners)
//!
//! Activating an entry or showing badges keeps the affected views revealed
//! ("block hiding") until the hide timer fires.  The coordinator does not own
//! a clock.  Operations return a [`HideTimer`] instruction and the owner
//! schedules [`GlobalShortcuts::hide_views_timeout`] with the generation it
//! was given.  Starting or stopping the timer bumps the generation, so a
//! timeout from an earlier start is ignored.
//!
//! When the timer fires while the shortcut's modifiers are still held, it is
//! simply started again.
//!
//! [`GenericLayout::sorted_views`]: crate::application::layout::GenericLayout::sorted_views

use std::time::Duration;

use tracing::{debug, info};

use latte_core::{entry_shortcuts, EntryShortcut, FixedAction, Modifier, PlacedView, ViewId};

use super::host::{BadgeRequest, ShortcutHost};

/// The shortcut that last revealed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Entry(EntryShortcut),
    ShowViews,
    /// Meta pressed and held on its own.
    SingleMeta,
}

/// What the owner must do with the hide timer after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideTimer {
    Unchanged,
    /// Schedule `hide_views_timeout(generation)` after `after`.
    Start { generation: u64, after: Duration },
    /// Drop any scheduled timeout.
    Stop,
}

/// Coordinates global shortcuts over the views of one layout.
pub struct GlobalShortcuts<S: ShortcutHost> {
    host: S,
    /// Meta alone opens the application launcher of a Latte view.
    meta_forwarded: bool,
    hide_interval: Duration,
    hide_views: Vec<ViewId>,
    badge_views: Vec<ViewId>,
    meta_showed_views: bool,
    last_invoked: Option<Trigger>,
    timer_active: bool,
    generation: u64,
}

impl<S: ShortcutHost> GlobalShortcuts<S> {
    pub fn new(host: S, meta_forwarded: bool, hide_interval: Duration) -> Self {
        Self {
            host,
            meta_forwarded,
            hide_interval,
            hide_views: Vec::new(),
            badge_views: Vec::new(),
            meta_showed_views: false,
            last_invoked: None,
            timer_active: false,
            generation: 0,
        }
    }

    pub fn host(&self) -> &S {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut S {
        &mut self.host
    }

    /// Views kept revealed until the hide timer fires.
    pub fn hide_views(&self) -> &[ViewId] {
        &self.hide_views
    }

    pub fn last_invoked(&self) -> Option<Trigger> {
        self.last_invoked
    }

    pub fn timer_active(&self) -> bool {
        self.timer_active
    }

    /// Action name and key sequence of every shortcut this coordinator
    /// answers to.
    pub fn registered_shortcuts() -> Vec<(String, String)> {
        let entries = entry_shortcuts()
            .into_iter()
            .map(|shortcut| (shortcut.action_name(), shortcut.to_string()));
        let fixed = FixedAction::ALL
            .into_iter()
            .map(|action| (action.action_name().to_owned(), action.to_string()));
        entries.chain(fixed).collect()
    }

    // ── Activate entry ────────────────────────────────────────────────────────

    /// Activates entry `entry` of the first view that accepts it.
    ///
    /// When a view is marked preferred for shortcuts, only preferred views
    /// are tried.
    pub fn activate_entry(&mut self, entry: u8, modifier: Modifier, views: &[&PlacedView]) -> HideTimer {
        self.last_invoked = EntryShortcut::new(entry, modifier).map(Trigger::Entry);
        let touched = preference_touched(views);

        for view in views {
            if touched && !view.preferred_for_shortcuts {
                continue;
            }

            let id = view.id;
            let plasma = !self.host.latte_tasks_present(id)
                && self.host.tasks_present(id)
                && self.host.activate_task_manager_entry(id, entry.saturating_sub(1), modifier);

            if plasma || self.host.activate_latte_entry(id, entry, modifier) {
                debug!(view = %id, entry, ?modifier, "entry activated");
                self.push_hide_view(id);
                self.host.set_block_hiding(id, true);
                return self.start_timer();
            }
        }

        debug!(entry, "no view accepted the entry");
        HideTimer::Unchanged
    }

    // ── Badges ────────────────────────────────────────────────────────────────

    /// Shows shortcut badges on the views (Meta+`).
    pub fn show_views(&mut self, views: &[&PlacedView]) -> HideTimer {
        self.last_invoked = Some(Trigger::ShowViews);
        self.reveal_badges(views)
    }

    /// Meta was pressed and held: show badges and remember that Meta did it.
    pub fn meta_pressed(&mut self, views: &[&PlacedView]) -> HideTimer {
        self.meta_showed_views = true;
        self.last_invoked = Some(Trigger::SingleMeta);
        self.reveal_badges(views)
    }

    fn reveal_badges(&mut self, views: &[&PlacedView]) -> HideTimer {
        let touched = preference_touched(views);

        let with_tasks = views
            .iter()
            .find(|view| (!touched || view.preferred_for_shortcuts) && self.can_show_task_badges(view.id))
            .map(|view| view.id);

        let tasks_launcher = with_tasks.and_then(|id| self.host.launcher_applet(id));
        let with_meta = if tasks_launcher.is_none() && self.meta_forwarded {
            views
                .iter()
                .map(|view| view.id)
                .find(|&id| self.host.launcher_applet(id).is_some())
        } else {
            None
        };

        let timer_was_active = self.timer_active;
        if !timer_was_active {
            self.hide_views.clear();
            if with_tasks.is_some() || with_meta.is_some() {
                self.badge_views.clear();
            }
        }

        let mut found = false;

        if let Some(id) = with_tasks {
            let request = BadgeRequest {
                latte_shortcuts: true,
                meta: true,
                launcher: self.forwarded_launcher(id),
            };
            found |= self.show_badges_on(id, request, timer_was_active);
        }

        if let Some(id) = with_meta.filter(|&id| Some(id) != with_tasks) {
            let request = BadgeRequest {
                latte_shortcuts: false,
                meta: true,
                launcher: self.forwarded_launcher(id),
            };
            found |= self.show_badges_on(id, request, timer_was_active);
        }

        let plasma_views: Vec<ViewId> = views
            .iter()
            .map(|view| view.id)
            .filter(|&id| self.host.has_plasma_shortcuts(id))
            .collect();

        if !plasma_views.is_empty() {
            found = true;
            if !timer_was_active {
                for id in plasma_views {
                    if Some(id) == with_tasks || Some(id) == with_meta {
                        continue;
                    }
                    self.show_badges_on(id, BadgeRequest::HIDDEN, false);
                }
            }
        }

        if found {
            if timer_was_active {
                HideTimer::Unchanged
            } else {
                self.start_timer()
            }
        } else {
            debug!("no view can show shortcut badges");
            self.timer_active = false;
            self.generation += 1;
            self.hide_now(views);
            HideTimer::Stop
        }
    }

    /// Shows badges on `id` and records it.  Returns whether the view showed them.
    fn show_badges_on(&mut self, id: ViewId, request: BadgeRequest, timer_was_active: bool) -> bool {
        if !self.host.show_badges(id, request) {
            return false;
        }
        if !self.badge_views.contains(&id) {
            self.badge_views.push(id);
        }
        if !timer_was_active {
            self.push_hide_view(id);
            self.host.set_block_hiding(id, true);
        }
        true
    }

    fn can_show_task_badges(&self, id: ViewId) -> bool {
        let plasma_only = !self.host.latte_tasks_present(id) && self.host.tasks_present(id);
        !plasma_only && self.host.can_show_badges(id)
    }

    fn forwarded_launcher(&self, id: ViewId) -> Option<u32> {
        if self.meta_forwarded {
            self.host.launcher_applet(id)
        } else {
            None
        }
    }

    /// Forwards a task badge update to every view.
    ///
    /// Returns the views that had a matching task.
    pub fn update_badge(&mut self, identifier: &str, value: &str, views: &[&PlacedView]) -> Vec<ViewId> {
        views
            .iter()
            .map(|view| view.id)
            .filter(|&id| self.host.update_task_badge(id, identifier, value))
            .collect()
    }

    // ── Settings and launcher ─────────────────────────────────────────────────

    /// Opens the settings window of the view after `last_config`, wrapping
    /// around, or of the first view.
    ///
    /// Returns the view whose settings were opened.
    pub fn show_settings(&mut self, views: &[&PlacedView], last_config: Option<ViewId>) -> Option<ViewId> {
        let current = last_config.and_then(|id| views.iter().position(|view| view.id == id));

        let next = match current {
            Some(index) if views.len() > 1 => views.get((index + 1) % views.len()),
            _ => views.first(),
        }?;

        info!(view = %next.id, "opening view settings");
        self.host.show_settings_window(next.id);
        Some(next.id)
    }

    pub fn show_global_settings(&mut self) {
        self.host.show_global_settings();
    }

    /// Toggles the launcher menu of the first view that has one.
    ///
    /// Ignored while Meta-held badges are on screen.
    pub fn activate_launcher_menu(&mut self, views: &[&PlacedView]) -> HideTimer {
        if self.meta_showed_views {
            return HideTimer::Unchanged;
        }

        for view in views {
            let Some(applet) = self.host.launcher_applet(view.id) else {
                continue;
            };

            if self.host.is_hidden(view.id) {
                self.push_hide_view(view.id);
                self.last_invoked = Some(Trigger::SingleMeta);
                self.host.set_block_hiding(view.id, true);
                self.host.toggle_applet_expanded(view.id, applet);
                return self.start_timer();
            }

            self.host.toggle_applet_expanded(view.id, applet);
            return HideTimer::Unchanged;
        }

        HideTimer::Unchanged
    }

    // ── Hide timer ────────────────────────────────────────────────────────────

    /// The hide timer started with `generation` fired.
    ///
    /// `views` are the views that currently exist.
    pub fn hide_views_timeout(&mut self, generation: u64, views: &[&PlacedView]) -> HideTimer {
        if generation != self.generation || !self.timer_active {
            debug!(generation, current = self.generation, "ignoring stale hide timeout");
            return HideTimer::Unchanged;
        }
        self.timer_active = false;

        if self.last_invoked.is_none() || self.hide_views.is_empty() {
            return HideTimer::Unchanged;
        }

        if self.host.modifiers_held() {
            return self.start_timer();
        }

        self.hide_now(views);
        HideTimer::Unchanged
    }

    /// Unblocks hiding, clears badges and forgets the revealed views.
    fn hide_now(&mut self, views: &[&PlacedView]) {
        if self.last_invoked.is_none() || self.hide_views.is_empty() {
            return;
        }
        self.last_invoked = None;

        let all_exist = self
            .hide_views
            .iter()
            .all(|id| views.iter().any(|view| view.id == *id));

        if all_exist {
            for &id in &self.hide_views {
                self.host.set_block_hiding(id, false);
            }
            for &id in &self.badge_views {
                self.host.hide_badges(id);
            }
        } else {
            debug!("revealed views changed meanwhile, not restoring them");
        }

        self.hide_views.clear();
        self.badge_views.clear();
        self.meta_showed_views = false;
    }

    fn push_hide_view(&mut self, id: ViewId) {
        if !self.hide_views.contains(&id) {
            self.hide_views.push(id);
        }
    }

    fn start_timer(&mut self) -> HideTimer {
        self.timer_active = true;
        self.generation += 1;
        HideTimer::Start {
            generation: self.generation,
            after: self.hide_interval,
        }
    }
}

fn preference_touched(views: &[&PlacedView]) -> bool {
    views.iter().any(|view| view.preferred_for_shortcuts)
}
