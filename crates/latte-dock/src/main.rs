//! latte-dock command-line entry point.
//!
//! Loads the layout configuration, places every containment on the
//! configured screens and reports the result.  Windows are not drawn; the
//! [`LoggingHost`] logs each request instead, which makes the binary a
//! handy way to check how a layout reacts to screen changes.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load AppConfig          -- --config, $LATTE_DOCK_CONFIG or platform dir
//!  └─ build GenericLayout     -- topology + containments, creation blocked
//!  └─ sync_views_to_screens   -- first placement
//!  └─ subcommand
//!       ├─ plan       print placements in shortcut order
//!       ├─ simulate   replay screen changes / shortcuts, drain timers,
//!       │             optionally save the new screen assignments
//!       ├─ shortcuts  list global shortcuts
//!       └─ ghost      print ghost edge geometry
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use latte_core::{Edge, GhostWindow, Modifier, Rect, ViewId};
use latte_dock::application::host::ViewHost;
use latte_dock::application::layout::GenericLayout;
use latte_dock::application::shortcuts::GlobalShortcuts;
use latte_dock::infrastructure::host::LoggingHost;
use latte_dock::infrastructure::shell::Shell;
use latte_dock::infrastructure::storage::config::{self, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Latte dock view placement.
#[derive(Debug, Parser)]
#[command(
    name = "latte-dock",
    about = "Places dock views on screens and replays screen changes",
    version
)]
struct Cli {
    /// Configuration file.  Defaults to the platform config directory.
    #[arg(long, env = "LATTE_DOCK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print where every view was placed, in shortcut priority order.
    Plan,

    /// Apply screen changes and shortcuts, then print the resulting placement.
    Simulate {
        /// Unplug a screen (repeatable).
        #[arg(long = "disconnect", value_name = "CONNECTOR")]
        disconnect: Vec<String>,

        /// Make this screen primary.
        #[arg(long, value_name = "CONNECTOR")]
        primary: Option<String>,

        /// Recreate the view of this containment (repeatable).
        #[arg(long = "recreate", value_name = "ID")]
        recreate: Vec<u32>,

        /// Recreate without waiting for the configured delays.
        #[arg(long, requires = "recreate")]
        now: bool,

        /// Activate task entry N (1..19).
        #[arg(long, value_name = "N")]
        entry: Option<u8>,

        /// Show shortcut badges.
        #[arg(long)]
        show_views: bool,

        /// Write the resulting screen assignments back to the config file.
        #[arg(long)]
        save: bool,
    },

    /// List the registered global shortcuts.
    Shortcuts,

    /// Print the ghost window geometry for a view.
    Ghost {
        #[arg(long, default_value = "bottom")]
        edge: Edge,

        /// View geometry as `x,y,width,height`.
        #[arg(long, value_parser = parse_rect)]
        view: Rect,

        /// Screen geometry as `x,y,width,height`.
        #[arg(long, value_parser = parse_rect, default_value = "0,0,1920,1080")]
        screen: Rect,

        /// Compute the strip for a session without compositing.
        #[arg(long)]
        no_compositing: bool,
    },
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid rectangle `{s}`: {e}"))?;

    match parts.as_slice() {
        [x, y, width, height] => Ok(Rect::new(*x, *y, *width, *height)),
        _ => Err(format!("expected x,y,width,height, got `{s}`")),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => config::load_config().context("loading config")?,
    };

    // `RUST_LOG` overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.shell.log_level)),
        )
        .init();

    match cli.command {
        Command::Plan => {
            let mut layout = build_layout(&config, LoggingHost::new())?;
            layout.sync_views_to_screens(None);
            print_plan(&layout);
        }
        Command::Simulate {
            disconnect,
            primary,
            recreate,
            now,
            entry,
            show_views,
            save,
        } => {
            let mut layout = build_layout(&config, LoggingHost::new())?;
            layout.sync_views_to_screens(None);

            let shortcuts = GlobalShortcuts::new(
                LoggingHost::new(),
                config.shell.meta_forwarded_to_latte,
                config.timings.hide_views_interval(config.shell.session),
            );
            let mut shell = Shell::new(layout, shortcuts);
            let steps = Steps {
                disconnect,
                primary,
                recreate,
                now,
                entry,
                show_views,
            };
            simulate(&mut shell, steps).await?;
            print_plan(&shell.layout);

            if save {
                config.store_view_specs(shell.layout.containments(), shell.layout.pool());
                match &cli.config {
                    Some(path) => config::save_config_to(&config, path)
                        .with_context(|| format!("saving config to {}", path.display()))?,
                    None => config::save_config(&config).context("saving config")?,
                }
                info!("screen assignments saved");
            }
        }
        Command::Shortcuts => {
            for (action, keys) in GlobalShortcuts::<LoggingHost>::registered_shortcuts() {
                println!("{keys:<16} {action}");
            }
        }
        Command::Ghost {
            edge,
            view,
            screen,
            no_compositing,
        } => {
            let mut ghost = GhostWindow::new(edge, !no_compositing, config.timings.ghost_mouse_debounce());
            if let Some(rect) = ghost.update_geometry(view, screen) {
                println!(
                    "ghost at {edge}: x={} y={} width={} height={}",
                    rect.x, rect.y, rect.width, rect.height
                );
            }
        }
    }

    Ok(())
}

/// Builds the configured layout with view creation blocked, so the first
/// sync places every containment in one pass.
fn build_layout<H: ViewHost>(config: &AppConfig, host: H) -> anyhow::Result<GenericLayout<H>> {
    let topology = config.to_topology().context("reading [[screens]]")?;

    let mut layout = GenericLayout::new(
        config.shell.layout_name.clone(),
        config.shell.memory_usage,
        host,
        config.timings.layout_timings(),
    );
    layout.set_topology(topology);

    let specs = config.to_view_specs(layout.pool_mut());
    layout.set_block_automatic_view_creation(true);
    for spec in specs {
        let id = spec.id;
        if !layout.add_containment(spec) {
            info!(containment = %id, "containment belongs to another layout");
        }
    }
    layout.set_block_automatic_view_creation(false);

    Ok(layout)
}

/// What `simulate` replays, in order.
struct Steps {
    disconnect: Vec<String>,
    primary: Option<String>,
    recreate: Vec<u32>,
    now: bool,
    entry: Option<u8>,
    show_views: bool,
}

async fn simulate(shell: &mut Shell<LoggingHost, LoggingHost>, steps: Steps) -> anyhow::Result<()> {
    let Steps {
        disconnect,
        primary,
        recreate,
        now,
        entry,
        show_views,
    } = steps;

    let mut topology = shell.layout.topology().clone();
    for connector in &disconnect {
        topology = topology.without(connector);
    }
    if let Some(connector) = &primary {
        topology = topology
            .with_primary(connector)
            .with_context(|| format!("making {connector} primary"))?;
    }
    if !disconnect.is_empty() || primary.is_some() {
        let report = shell.update_topology(topology);
        info!(
            created = report.created.len(),
            removed = report.removed.len(),
            "screens changed"
        );
    }

    for id in recreate {
        let started = if now {
            shell.recreate_now(ViewId(id))
        } else {
            shell.recreate_view(ViewId(id), true)
        };
        if !started {
            info!(containment = id, "view can not be recreated now");
        }
    }

    if let Some(entry) = entry {
        shell.activate_entry(entry, Modifier::Meta);
    }
    if show_views {
        shell.show_views();
    }

    tokio::select! {
        _ = shell.run_until_idle() => {}
        _ = tokio::signal::ctrl_c() => info!("interrupted, skipping pending timers"),
    }
    Ok(())
}

fn print_plan<H: ViewHost>(layout: &GenericLayout<H>) {
    println!("layout {} ({} views)", layout.name(), layout.views_count());

    for (rank, view) in layout.sorted_views().into_iter().enumerate() {
        let mut flags = Vec::new();
        if view.on_primary {
            flags.push("on-primary");
        }
        if view.preferred_for_shortcuts {
            flags.push("preferred");
        }
        if view.by_pass_wm {
            flags.push("bypass-wm");
        }
        println!(
            "{:>2}. {} on {} at {} [{}]",
            rank + 1,
            view.id,
            view.connector,
            view.edge,
            flags.join(", ")
        );
    }

    let waiting = layout.registry().waiting_ids();
    for id in &waiting {
        println!("    {id} waiting");
    }
    for spec in layout.containments() {
        if !layout.view_exists(spec.id) && !waiting.contains(&spec.id) {
            println!("    {} not placed", spec.id);
        }
    }
}
