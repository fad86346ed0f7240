//! Integration tests for global shortcuts.
//!
//! A `Shell` with recording hosts runs the shortcut coordinator against a
//! real layout; tokio's paused clock drives the hide-views timer.

use std::time::Duration;

use latte_core::{Edge, Modifier, Screen, ScreenTopology, ViewId, ViewSpec};
use latte_dock::application::host::BadgeRequest;
use latte_dock::application::layout::{GenericLayout, LayoutTimings, MemoryUsage};
use latte_dock::application::shortcuts::GlobalShortcuts;
use latte_dock::infrastructure::host::mock::{RecordingHost, TaskManager};
use latte_dock::infrastructure::shell::Shell;

const HIDE_INTERVAL: Duration = Duration::from_millis(300);

/// View 1 at DP-1 bottom and view 2 at DP-1 left, sorted `[1, 2]`.
fn shell(shortcut_host: RecordingHost) -> Shell<RecordingHost, RecordingHost> {
    let mut layout = GenericLayout::new("Default", MemoryUsage::Single, RecordingHost::new(), LayoutTimings::default());
    layout.set_topology(ScreenTopology::new(vec![Screen::new("DP-1", true)]).expect("valid topology"));
    layout.add_containment(ViewSpec::on_primary(1, Edge::Bottom));
    layout.add_containment(ViewSpec::on_primary(2, Edge::Left));

    Shell::new(layout, GlobalShortcuts::new(shortcut_host, true, HIDE_INTERVAL))
}

fn host(shell: &Shell<RecordingHost, RecordingHost>) -> &RecordingHost {
    shell.shortcuts.host()
}

// ── Entry activation ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_entry_activation_reveals_view_until_timer_fires() {
    // Arrange
    let mut recording = RecordingHost::new();
    recording.latte_tasks.insert(ViewId(2));
    let mut shell = shell(recording);

    // Act
    shell.activate_entry(3, Modifier::Meta);

    // Assert: view 1 has no task manager, so view 2 takes the entry.
    assert_eq!(host(&shell).activations.len(), 1);
    assert_eq!(host(&shell).activations[0].view, ViewId(2));
    assert_eq!(host(&shell).activations[0].target, TaskManager::Latte);
    assert!(host(&shell).is_blocked(ViewId(2)));

    // Act
    shell.run_until_idle().await;

    // Assert
    assert!(!host(&shell).is_blocked(ViewId(2)));
    assert!(shell.shortcuts.hide_views().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_held_modifiers_keep_views_revealed() {
    // Arrange
    let mut recording = RecordingHost::new();
    recording.latte_tasks.insert(ViewId(1));
    recording.modifiers_held = true;
    let mut shell = shell(recording);
    shell.activate_entry(1, Modifier::Ctrl);

    // Act: the first timeout finds Meta+Ctrl still held.
    assert!(shell.step().await);

    // Assert
    assert!(host(&shell).is_blocked(ViewId(1)));
    assert_eq!(shell.queue().pending(), 1);

    // Act: keys released.
    shell.shortcuts.host_mut().modifiers_held = false;
    assert!(shell.step().await);

    // Assert
    assert!(!host(&shell).is_blocked(ViewId(1)));
    assert!(shell.queue().is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_plasma_task_manager_receives_zero_based_entry() {
    let mut recording = RecordingHost::new();
    recording.plasma_tasks.insert(ViewId(1));
    let mut shell = shell(recording);

    shell.activate_entry(10, Modifier::Meta);

    let activation = host(&shell).activations[0];
    assert_eq!(activation.target, TaskManager::Plasma);
    assert_eq!(activation.entry, 9);
}

// ── Badges ────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_show_views_badges_task_view_and_launcher_view() {
    // Arrange
    let mut recording = RecordingHost::new();
    recording.latte_tasks.insert(ViewId(1));
    recording.badge_capable.insert(ViewId(1));
    recording.launchers.insert(ViewId(2), 7);
    let mut shell = shell(recording);

    // Act
    shell.show_views();

    // Assert
    assert_eq!(
        host(&shell).badges_shown,
        vec![
            (
                ViewId(1),
                BadgeRequest {
                    latte_shortcuts: true,
                    meta: true,
                    launcher: None
                }
            ),
            (
                ViewId(2),
                BadgeRequest {
                    latte_shortcuts: false,
                    meta: true,
                    launcher: Some(7)
                }
            ),
        ]
    );
    assert!(host(&shell).is_blocked(ViewId(1)));
    assert!(host(&shell).is_blocked(ViewId(2)));

    // Act
    shell.run_until_idle().await;

    // Assert
    assert_eq!(host(&shell).badges_hidden, vec![ViewId(1), ViewId(2)]);
    assert!(!host(&shell).is_blocked(ViewId(1)));
}

#[tokio::test(start_paused = true)]
async fn test_show_views_with_nothing_to_show_schedules_nothing() {
    let mut shell = shell(RecordingHost::new());

    shell.show_views();

    assert!(host(&shell).badges_shown.is_empty());
    assert!(shell.queue().is_idle());
    assert!(!shell.shortcuts.timer_active());
}

#[tokio::test(start_paused = true)]
async fn test_views_with_plasma_shortcuts_are_revealed_without_badges() {
    let mut recording = RecordingHost::new();
    recording.latte_tasks.insert(ViewId(1));
    recording.badge_capable.insert(ViewId(1));
    recording.plasma_shortcuts.insert(ViewId(2));
    let mut shell = shell(recording);

    shell.show_views();

    assert_eq!(host(&shell).badges_shown[1], (ViewId(2), BadgeRequest::HIDDEN));
    assert!(host(&shell).is_blocked(ViewId(2)));
}

#[test]
fn test_badge_update_reaches_views_with_matching_task() {
    let mut recording = RecordingHost::new();
    recording
        .task_ids
        .entry(ViewId(2))
        .or_default()
        .insert("org.kde.dolphin".to_owned());
    let mut shell = shell(recording);

    let updated = shell.update_badge("org.kde.dolphin", "4");

    assert_eq!(updated, vec![ViewId(2)]);
}

// ── Settings and launcher ─────────────────────────────────────────────────────

#[test]
fn test_show_settings_cycles_and_records_last_config_view() {
    let mut shell = shell(RecordingHost::new());

    assert_eq!(shell.show_settings(), Some(ViewId(1)));
    assert_eq!(shell.show_settings(), Some(ViewId(2)));
    assert_eq!(shell.show_settings(), Some(ViewId(1)));

    assert_eq!(host(&shell).settings_opened, vec![ViewId(1), ViewId(2), ViewId(1)]);
    assert_eq!(shell.layout.last_config_view(), Some(ViewId(1)));
}

#[test]
fn test_global_settings_are_forwarded() {
    let mut shell = shell(RecordingHost::new());
    shell.show_global_settings();
    assert_eq!(host(&shell).global_settings_opened, 1);
}

#[tokio::test(start_paused = true)]
async fn test_launcher_menu_reveals_hidden_view() {
    // Arrange
    let mut recording = RecordingHost::new();
    recording.launchers.insert(ViewId(2), 11);
    recording.hidden.insert(ViewId(2));
    let mut shell = shell(recording);

    // Act
    shell.activate_launcher_menu();

    // Assert
    assert_eq!(host(&shell).toggled, vec![(ViewId(2), 11)]);
    assert!(host(&shell).is_blocked(ViewId(2)));

    shell.run_until_idle().await;
    assert!(!host(&shell).is_blocked(ViewId(2)));
}

#[tokio::test(start_paused = true)]
async fn test_launcher_menu_is_ignored_while_meta_badges_are_shown() {
    let mut recording = RecordingHost::new();
    recording.latte_tasks.insert(ViewId(1));
    recording.badge_capable.insert(ViewId(1));
    recording.launchers.insert(ViewId(1), 3);
    let mut shell = shell(recording);

    shell.meta_pressed();
    shell.activate_launcher_menu();

    assert!(host(&shell).toggled.is_empty());

    // Once the badges are gone the launcher works again.
    shell.run_until_idle().await;
    shell.activate_launcher_menu();
    assert_eq!(host(&shell).toggled, vec![(ViewId(1), 3)]);
}
