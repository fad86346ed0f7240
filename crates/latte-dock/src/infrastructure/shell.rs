//! The control loop state: one layout, its shortcuts and the timer queue.
//!
//! ```text
//! Shell
//!  ├─ GenericLayout   -- views, placement, reconciliation, recreation
//!  ├─ GlobalShortcuts -- entry activation, badges, settings cycling
//!  └─ DeferredQueue   -- delays returned by the two above
//! ```
//!
//! Every public method performs one operation and schedules whatever
//! follow-up step it produced.  [`Shell::dispatch`] runs a follow-up step when
//! the queue delivers it.

use tracing::debug;

use latte_core::{Modifier, ScreenTopology, ViewId};

use super::scheduler::{Deferred, DeferredQueue};
use crate::application::host::{ShortcutHost, ViewHost};
use crate::application::layout::{GenericLayout, SyncReport};
use crate::application::shortcuts::{GlobalShortcuts, HideTimer};

pub struct Shell<H: ViewHost, S: ShortcutHost> {
    pub layout: GenericLayout<H>,
    pub shortcuts: GlobalShortcuts<S>,
    queue: DeferredQueue,
}

impl<H: ViewHost, S: ShortcutHost> Shell<H, S> {
    pub fn new(layout: GenericLayout<H>, shortcuts: GlobalShortcuts<S>) -> Self {
        Self {
            layout,
            shortcuts,
            queue: DeferredQueue::new(),
        }
    }

    pub fn queue(&self) -> &DeferredQueue {
        &self.queue
    }

    // ── Layout operations ─────────────────────────────────────────────────────

    pub fn update_topology(&mut self, topology: ScreenTopology) -> SyncReport {
        self.layout.update_topology(topology)
    }

    /// Starts recreating `id`; the remaining steps run from the queue.
    pub fn recreate_view(&mut self, id: ViewId, delayed: bool) -> bool {
        match self.layout.recreate_view(id, delayed) {
            Some(delay) => {
                self.queue.schedule(delay, Deferred::BeginTeardown(id));
                true
            }
            None => false,
        }
    }

    /// Recreates `id` at once, skipping both delays.
    pub fn recreate_now(&mut self, id: ViewId) -> bool {
        self.layout.recreate_now(id)
    }

    // ── Shortcut operations ───────────────────────────────────────────────────

    pub fn activate_entry(&mut self, entry: u8, modifier: Modifier) {
        let timer = {
            let views = self.layout.sorted_views();
            self.shortcuts.activate_entry(entry, modifier, &views)
        };
        self.apply(timer);
    }

    pub fn show_views(&mut self) {
        let timer = {
            let views = self.layout.sorted_views();
            self.shortcuts.show_views(&views)
        };
        self.apply(timer);
    }

    pub fn meta_pressed(&mut self) {
        let timer = {
            let views = self.layout.sorted_views();
            self.shortcuts.meta_pressed(&views)
        };
        self.apply(timer);
    }

    pub fn activate_launcher_menu(&mut self) {
        let timer = {
            let views = self.layout.sorted_views();
            self.shortcuts.activate_launcher_menu(&views)
        };
        self.apply(timer);
    }

    /// Opens the next settings window and remembers it.
    pub fn show_settings(&mut self) -> Option<ViewId> {
        let last = self.layout.last_config_view();
        let opened = {
            let views = self.layout.sorted_views();
            self.shortcuts.show_settings(&views, last)
        };
        if opened.is_some() {
            self.layout.set_last_config_view(opened);
        }
        opened
    }

    pub fn show_global_settings(&mut self) {
        self.shortcuts.show_global_settings();
    }

    pub fn update_badge(&mut self, identifier: &str, value: &str) -> Vec<ViewId> {
        let views = self.layout.sorted_views();
        self.shortcuts.update_badge(identifier, value, &views)
    }

    // ── Deferred steps ────────────────────────────────────────────────────────

    /// Runs a deferred step delivered by the queue.
    pub fn dispatch(&mut self, task: Deferred) {
        debug!(?task, "running deferred task");
        match task {
            Deferred::BeginTeardown(id) => {
                // Hosts destroy windows synchronously, so the teardown is
                // complete as soon as it began.
                if self.layout.begin_teardown(id) {
                    if let Some(settle) = self.layout.teardown_complete(id) {
                        self.queue.schedule(settle, Deferred::FinishRecreate(id));
                    }
                }
            }
            Deferred::FinishRecreate(id) => {
                self.layout.finish_recreate(id);
            }
            Deferred::HideViewsTimeout(generation) => {
                let timer = {
                    let views = self.layout.sorted_views();
                    self.shortcuts.hide_views_timeout(generation, &views)
                };
                self.apply(timer);
            }
        }
    }

    /// Waits for the next deferred step and runs it.
    ///
    /// Returns `false` when the queue has nothing scheduled.
    pub async fn step(&mut self) -> bool {
        if self.queue.is_idle() {
            return false;
        }
        match self.queue.recv().await {
            Some(task) => {
                self.dispatch(task);
                true
            }
            None => false,
        }
    }

    /// Runs deferred steps until nothing is scheduled.
    pub async fn run_until_idle(&mut self) {
        while self.step().await {}
    }

    fn apply(&mut self, timer: HideTimer) {
        match timer {
            HideTimer::Start { generation, after } => {
                self.queue.schedule(after, Deferred::HideViewsTimeout(generation));
            }
            // Stale timeouts are ignored by generation.
            HideTimer::Stop | HideTimer::Unchanged => {}
        }
    }
}
