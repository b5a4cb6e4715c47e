//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::watch;

use crate::config::AppConfig;
use crate::core::{
    animator::{Animator, AnimatorConfig},
    assets::FrameSet,
    carousel::Carousel,
    content::{self, Stat},
    gate::{Direction, ReentryPolicy},
    locale::{Location, Route},
    page::{HeaderVisibility, Page, SectionKind},
    progress::ScrollSpan,
};

/// Rows scrolled down before the header starts hiding.
const HEADER_HIDE_ROWS: u32 = 3;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
}

/// Where the hero frames come from and how loading went.
#[derive(Debug, Clone, Default)]
pub enum FrameSource {
    /// No frame directory: draw the vector timeline.
    #[default]
    Timeline,
    Loading(PathBuf),
    Loaded(FrameSet),
    Failed(String),
}

/// Receivers for the hero's observable flags.  Both read `false` while no
/// hero is mounted.
pub struct HeroSignals {
    pub logo_visible: watch::Receiver<bool>,
    pub hero_active: watch::Receiver<bool>,
}

impl Default for HeroSignals {
    fn default() -> Self {
        Self {
            logo_visible: watch::channel(false).1,
            hero_active: watch::channel(false).1,
        }
    }
}

impl HeroSignals {
    pub fn logo_visible(&self) -> bool {
        *self.logo_visible.borrow()
    }

    pub fn hero_active(&self) -> bool {
        *self.hero_active.borrow()
    }
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// Where settings changes are saved; `None` keeps them for this session.
    pub config_path: Option<PathBuf>,
    pub location: Location,
    pub page: Page,
    /// Present while the current route shows the hero.
    pub animator: Option<Animator>,
    pub signals: HeroSignals,
    pub frames: FrameSource,
    /// Fixed progress-per-row from the command line; overrides the
    /// viewport-derived value.
    pub sensitivity_override: Option<f64>,
    pub carousel: Carousel,
    pub stats: Vec<Stat>,
    pub header: HeaderVisibility,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
}

impl AppState {
    pub fn new(config: AppConfig, location: Location, frames: FrameSource, width: u16, height: u16) -> Self {
        let page = Page::new(location.route, width, height);
        let mut state = Self {
            config,
            config_path: None,
            location,
            page,
            animator: None,
            signals: HeroSignals::default(),
            frames,
            sensitivity_override: None,
            carousel: Carousel::new(content::PROJECTS.len()),
            stats: content::journey_stats(),
            header: HeaderVisibility::new(HEADER_HIDE_ROWS),
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
        };
        state.mount_hero();
        state
    }

    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            anchor_tolerance: self.config.anchor_tolerance as f64,
            reentry: if self.config.snap_on_reentry {
                ReentryPolicy::SnapToComplete
            } else {
                ReentryPolicy::Replay
            },
            reveal_threshold: self.config.reveal_threshold,
            phases: self.config.phases.clone(),
            ..AnimatorConfig::default()
        }
    }

    /// Create (or drop) the animator to match the current page.  A fresh
    /// animator starts from progress 0.
    pub fn mount_hero(&mut self) {
        // Dropping the old one resets both signals.
        self.animator = None;
        if !self.page.has(SectionKind::Hero) {
            self.signals = HeroSignals::default();
            return;
        }

        let config = self.animator_config();
        let mut animator = match &self.frames {
            FrameSource::Timeline => Animator::timeline(config),
            FrameSource::Loading(_) => Animator::frame_sequence(config),
            FrameSource::Loaded(set) => {
                let mut a = Animator::frame_sequence(config);
                a.mark_ready(set.len());
                a
            }
            FrameSource::Failed(_) => Animator::frame_sequence_failed(config),
        };
        let (w, h) = self.page.viewport();
        animator.resize(ScrollSpan::terminal(w, h));
        if let Some(s) = self.sensitivity_override {
            animator.set_sensitivity(s);
        }
        self.signals = HeroSignals {
            logo_visible: animator.subscribe_logo_visible(),
            hero_active: animator.subscribe_hero_active(),
        };
        self.animator = Some(animator);
        self.observe_hero(None);
    }

    /// Feed the hero's current geometry to the animator.
    pub fn observe_hero(&mut self, moving: Option<Direction>) {
        let Some(geometry) = self.page.region_geometry(SectionKind::Hero) else {
            return;
        };
        if let Some(animator) = self.animator.as_mut() {
            animator.observe(geometry, moving);
        }
    }

    pub fn navigate(&mut self, location: Location) {
        let (w, h) = self.page.viewport();
        tracing::info!(path = %location.to_path(), "navigate");
        let route_changed = location.route != self.location.route;
        self.location = location;
        if route_changed {
            self.page = Page::new(self.location.route, w, h);
            self.header = HeaderVisibility::new(HEADER_HIDE_ROWS);
            self.stats = content::journey_stats();
            self.mount_hero();
        }
    }

    pub fn go_to_route(&mut self, route: Route) {
        let next = self.location.with_route(route);
        self.navigate(next);
    }

    /// Scroll the page itself, then let the hero gate react.
    pub fn scroll_page(&mut self, rows: i32) {
        let moved = self.page.scroll_by(rows);
        self.header.on_scroll(self.page.offset());
        if moved.is_some() {
            self.observe_hero(moved);
        }
        self.trigger_visible_counters(Instant::now());
    }

    /// Counters start once half of the journey section is on screen.
    pub fn trigger_visible_counters(&mut self, now: Instant) {
        if self.page.visible_fraction(SectionKind::Journey) >= 0.5 {
            for stat in &mut self.stats {
                stat.counter.trigger(now);
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.page.resize(width, height);
        if let Some(animator) = self.animator.as_mut() {
            animator.resize(ScrollSpan::terminal(width, height));
            if let Some(s) = self.sensitivity_override {
                animator.set_sensitivity(s);
            }
        }
        self.observe_hero(None);
    }

    /// Frame loading finished.
    pub fn frames_loaded(&mut self, frames: FrameSet) {
        let count = frames.len();
        self.frames = FrameSource::Loaded(frames);
        if let Some(animator) = self.animator.as_mut() {
            animator.mark_ready(count);
        }
        self.status_message = Some(format!("{count} hero frames loaded"));
    }

    /// Frame loading failed.  Reported once here; later hero mounts start
    /// out failed without repeating it.
    pub fn frames_failed(&mut self, reason: String) {
        match self.animator.as_mut() {
            Some(animator) => animator.mark_failed(&reason),
            None => tracing::error!(%reason, "hero animation disabled"),
        }
        self.status_message = Some(format!("Hero frames unavailable: {reason}"));
        self.frames = FrameSource::Failed(reason);
    }

    pub fn set_snap_on_reentry(&mut self, snap: bool) {
        self.config.snap_on_reentry = snap;
        let policy = self.animator_config().reentry;
        if let Some(animator) = self.animator.as_mut() {
            animator.set_reentry_policy(policy);
        }
    }

    pub fn is_loading_frames(&self) -> bool {
        matches!(self.frames, FrameSource::Loading(_))
    }

    /// Standing note about the frame directory for the status bar.
    pub fn frames_note(&self) -> Option<String> {
        match &self.frames {
            FrameSource::Loading(dir) => Some(format!("loading frames from {}", dir.display())),
            FrameSource::Failed(reason) => Some(format!("frames unavailable: {reason}")),
            FrameSource::Timeline | FrameSource::Loaded(_) => None,
        }
    }
}
