//! A terminal rendition of a property brochure whose hero section is a
//! scroll-driven animation.
//!
//! Run the binary to open the home page.  Scrolling over the hero scrubs the
//! animation; once it finishes, scrolling moves on through the page.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    asset_runtime::{self, AssetUpdate},
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState, FrameSource},
};
use crate::core::locale::Location;
use crate::ui::{
    header::HeaderView, layout::AppLayout, page::PageView, popup, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven hero animation brochure")]
struct Cli {
    /// Directory of numbered frame images.  Without it the line-art
    /// timeline plays instead.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Location to open, e.g. `/zh/projects`.
    #[arg(long, default_value = "/en")]
    path: String,

    /// Replay the animation when scrolling back into a finished hero.
    #[arg(long)]
    replay_on_reentry: bool,

    /// Fixed progress per scrolled row, overriding the viewport-derived span.
    #[arg(long)]
    sensitivity: Option<f64>,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    if let Some(s) = cli.sensitivity {
        if !(s.is_finite() && s > 0.0) {
            anyhow::bail!("--sensitivity must be a positive number, got {s}");
        }
    }

    let mut user_config = config::AppConfig::load();
    if cli.replay_on_reentry {
        user_config.snap_on_reentry = false;
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut screen = Rect::new(0, 0, size.width, size.height);
    let page_area = AppLayout::from_area(screen).page_area;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let (asset_tx, mut asset_rx) = tokio::sync::mpsc::unbounded_channel::<AssetUpdate>();

    let frames = match &cli.frames {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "loading hero frames");
            asset_runtime::spawn_frame_load(asset_tx.clone(), dir.clone(), user_config.frame_size);
            FrameSource::Loading(dir.clone())
        }
        None => FrameSource::Timeline,
    };

    let mut state = AppState::new(
        user_config,
        Location::parse(&cli.path),
        frames,
        page_area.width,
        page_area.height,
    );
    if cli.sensitivity.is_some() {
        state.sensitivity_override = cli.sensitivity;
        state.mount_hero();
    }
    state.config_path = Some(config::config_path());
    let mut tick: u64 = 0;

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            let now = Instant::now();

            frame.render_widget(
                PageView {
                    state: &state,
                    now,
                    tick,
                },
                layout.page_area,
            );

            if state.header.is_visible() && !state.signals.hero_active() {
                frame.render_widget(
                    HeaderView {
                        location: &state.location,
                        logo_visible: state.signals.logo_visible(),
                    },
                    layout.header_area,
                );
            }

            let hint = state
                .frames_note()
                .unwrap_or_else(|| state.config.status_bar_hint());
            let left = match state.active_view {
                ActiveView::Page => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::SettingsMenu => "",
            };
            let right = state
                .animator
                .as_ref()
                .map(|a| {
                    let lock = if a.state().locked { "⇵ " } else { "" };
                    format!(
                        "{lock}{} · {} {:>3.0}% ",
                        a.gate(),
                        a.phase(),
                        a.progress().get() * 100.0
                    )
                })
                .unwrap_or_default();
            let status = Paragraph::new(Line::from(vec![
                Span::raw(format!(" {left}")),
                Span::raw(format!(
                    "{:>width$}",
                    right,
                    width = (layout.status_area.width as usize).saturating_sub(left.chars().count() + 1)
                )),
            ]))
            .style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            if state.active_view == ActiveView::SettingsMenu {
                frame.render_widget(
                    popup::SettingsPopup {
                        state: &state,
                        selected: state.settings_selected,
                    },
                    frame.area(),
                );
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, screen),
                    AppEvent::Resize(w, h) => {
                        screen = Rect::new(0, 0, w, h);
                        let page_area = AppLayout::from_area(screen).page_area;
                        tracing::debug!(w, h, "resize");
                        state.resize(page_area.width, page_area.height);
                    }
                    AppEvent::Tick => {
                        tick = tick.wrapping_add(1);
                        state.trigger_visible_counters(Instant::now());
                    }
                }
            }

            Some(update) = asset_rx.recv() => {
                match update {
                    AssetUpdate::FramesLoaded { dir, result } => match result {
                        Ok(set) => {
                            tracing::info!(dir = %dir.display(), frames = set.len(), "hero frames ready");
                            state.frames_loaded(set);
                        }
                        Err(e) => state.frames_failed(format!("{}: {e}", dir.display())),
                    },
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
