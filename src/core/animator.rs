//! Scroll-bound animator — owns the animation state and ties together the
//! mapper, the phase/frame selector, and the capture gate.
//!
//! The animator never draws.  Callers feed it region geometry and scroll
//! deltas, and hand a [`Renderer`] to [`Animator::render`] once per frame.
//! Two observable values are published through `tokio::sync::watch`:
//! whether the docked logo should be visible and whether the hero is in its
//! logo-reveal stretch.  Both reset to `false` when the animator is dropped.

use thiserror::Error;
use tokio::sync::watch;

use super::gate::{self, Direction, GateContext, GateState, ReentryPolicy, RegionGeometry};
use super::phase::{self, Phase, PhaseTable};
use super::progress::{self, Progress, ScrollSpan};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimatorError {
    #[error("animation assets are still loading")]
    NotReady,
    #[error("animation assets failed to load")]
    AssetsFailed,
}

/// Mutable state of one mounted animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    pub progress: Progress,
    /// The view currently intercepts scroll input.
    pub locked: bool,
    /// Set once progress first reaches 1; never cleared.
    pub completed_once: bool,
}

/// Whether the frames backing the animation are usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NotReady,
    Ready,
    Failed,
}

/// Which visual the animator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Phase-labelled vector timeline; needs no assets.
    Timeline,
    /// Pre-loaded image sequence of `frame_count` frames.
    FrameSequence { frame_count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Progress per unit of raw delta.
    pub sensitivity: f64,
    /// How far from the viewport top still counts as anchored.
    pub anchor_tolerance: f64,
    pub reentry: ReentryPolicy,
    /// Progress beyond which the secondary overlay is revealed.
    pub reveal_threshold: f64,
    pub phases: PhaseTable,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.001,
            anchor_tolerance: 1.0,
            reentry: ReentryPolicy::default(),
            reveal_threshold: 0.92,
            phases: PhaseTable::hero(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub progress: Progress,
    pub phase: Phase,
    /// Position within the current phase, `0..=1`.
    pub phase_progress: f64,
    /// Frame to show for the frame-sequence variant.
    pub frame: Option<usize>,
    pub reveal_overlay: bool,
}

/// Drawing collaborator.
pub trait Renderer {
    fn set_visual_state(&mut self, state: &VisualState);
    fn reveal_overlay(&mut self, reveal: bool);
}

/// What happened to one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// Consumed by the animation; the page must not scroll.
    Captured,
    /// Not ours; scroll the page.
    PassThrough,
}

pub struct Animator {
    state: AnimationState,
    gate: GateState,
    variant: Variant,
    readiness: Readiness,
    config: AnimatorConfig,
    /// Last geometry seen through [`Animator::observe`].
    geometry: Option<RegionGeometry>,
    logo_visible: watch::Sender<bool>,
    hero_active: watch::Sender<bool>,
}

impl Animator {
    fn with_variant(config: AnimatorConfig, variant: Variant, readiness: Readiness) -> Self {
        let (logo_visible, _) = watch::channel(false);
        let (hero_active, _) = watch::channel(false);
        Self {
            state: AnimationState::default(),
            gate: GateState::Passive,
            variant,
            readiness,
            config,
            geometry: None,
            logo_visible,
            hero_active,
        }
    }

    /// Vector timeline; ready immediately.
    pub fn timeline(config: AnimatorConfig) -> Self {
        Self::with_variant(config, Variant::Timeline, Readiness::Ready)
    }

    /// Frame sequence; refuses to capture until [`Animator::mark_ready`].
    pub fn frame_sequence(config: AnimatorConfig) -> Self {
        Self::with_variant(
            config,
            Variant::FrameSequence { frame_count: 0 },
            Readiness::NotReady,
        )
    }

    /// Frame sequence whose assets are already known to be broken.  Unlike
    /// [`Animator::mark_failed`] this reports nothing.
    pub fn frame_sequence_failed(config: AnimatorConfig) -> Self {
        Self::with_variant(
            config,
            Variant::FrameSequence { frame_count: 0 },
            Readiness::Failed,
        )
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.state.progress
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn phase(&self) -> Phase {
        self.config.phases.select(self.state.progress)
    }

    pub fn subscribe_logo_visible(&self) -> watch::Receiver<bool> {
        self.logo_visible.subscribe()
    }

    pub fn subscribe_hero_active(&self) -> watch::Receiver<bool> {
        self.hero_active.subscribe()
    }

    // ── readiness ───────────────────────────────────────────────

    /// Succeeds only once assets are in place.
    pub fn try_start(&self) -> Result<(), AnimatorError> {
        match self.readiness {
            Readiness::Ready => Ok(()),
            Readiness::NotReady => Err(AnimatorError::NotReady),
            Readiness::Failed => Err(AnimatorError::AssetsFailed),
        }
    }

    pub fn mark_ready(&mut self, frame_count: usize) {
        if self.readiness == Readiness::Failed {
            return;
        }
        if let Variant::FrameSequence { .. } = self.variant {
            self.variant = Variant::FrameSequence { frame_count };
        }
        self.readiness = Readiness::Ready;
        tracing::info!(frame_count, "hero animation ready");
        if let Some(geometry) = self.geometry {
            self.observe(geometry, None);
        }
    }

    /// Terminal: the animation stays on its first frame for the rest of the
    /// session.
    pub fn mark_failed(&mut self, reason: &dyn std::fmt::Display) {
        if self.readiness == Readiness::Failed {
            return;
        }
        tracing::error!(%reason, "hero animation disabled");
        self.readiness = Readiness::Failed;
        self.set_gate(GateState::Passive);
    }

    // ── configuration ──────────────────────────────────────────

    /// Recompute viewport-relative sensitivity; progress is untouched.
    pub fn resize(&mut self, span: ScrollSpan) {
        self.config.sensitivity = span.sensitivity();
        tracing::debug!(sensitivity = self.config.sensitivity, "hero span resized");
    }

    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        if sensitivity.is_finite() && sensitivity > 0.0 {
            self.config.sensitivity = sensitivity;
        }
    }

    pub fn set_reentry_policy(&mut self, policy: ReentryPolicy) {
        self.config.reentry = policy;
    }

    pub fn set_anchor_tolerance(&mut self, tolerance: f64) {
        if tolerance.is_finite() && tolerance >= 0.0 {
            self.config.anchor_tolerance = tolerance;
        }
    }

    /// Moving the threshold can flip the logo signal immediately.
    pub fn set_reveal_threshold(&mut self, threshold: f64) {
        if threshold.is_finite() {
            self.config.reveal_threshold = threshold.clamp(0.0, 1.0);
            self.publish();
        }
    }

    // ── events ──────────────────────────────────────────────────

    fn context(&self) -> GateContext {
        GateContext {
            completed_once: self.state.completed_once,
            policy: self.config.reentry,
            tolerance: self.config.anchor_tolerance,
            ready: self.try_start().is_ok(),
        }
    }

    fn set_gate(&mut self, next: GateState) {
        if next != self.gate {
            tracing::debug!(from = %self.gate, to = %next, progress = self.state.progress.get(), "gate");
            self.gate = next;
        }
        self.state.locked = next.is_capturing();
    }

    fn set_progress(&mut self, progress: Progress) {
        self.state.progress = progress;
        if progress.is_end() {
            self.state.completed_once = true;
        }
        self.publish();
    }

    fn publish(&self) {
        let p = self.state.progress;
        let logo = phase::reveal_overlay(p, self.config.reveal_threshold);
        let active = self.config.phases.select(p) == Phase::LogoReveal;
        self.logo_visible.send_if_modified(|v| std::mem::replace(v, logo) != logo);
        self.hero_active.send_if_modified(|v| std::mem::replace(v, active) != active);
    }

    /// The region moved relative to the viewport.
    pub fn observe(&mut self, geometry: RegionGeometry, moving: Option<Direction>) -> GateState {
        self.geometry = Some(geometry);
        let decision = gate::on_region_moved(self.gate, &geometry, moving, &self.context());
        if decision.snap_to_end {
            self.set_progress(Progress::END);
        }
        self.set_gate(decision.next);
        self.gate
    }

    /// Whether input in `direction` would currently drive the animation.
    pub fn would_capture(&self, direction: Direction) -> bool {
        self.geometry.is_some_and(|geometry| {
            gate::should_capture(self.gate, &geometry, direction, &self.context())
        })
    }

    /// One scroll input of `raw_delta` (positive = forward).
    pub fn handle_input(&mut self, raw_delta: f64) -> InputDisposition {
        if self.try_start().is_err() {
            return InputDisposition::PassThrough;
        }
        let Some(direction) = Direction::of(raw_delta) else {
            return if self.gate.is_capturing() {
                InputDisposition::Captured
            } else {
                InputDisposition::PassThrough
            };
        };
        let Some(geometry) = self.geometry else {
            return InputDisposition::PassThrough;
        };

        let decision = gate::on_input(self.gate, &geometry, direction, &self.context());
        if decision.snap_to_end {
            self.set_progress(Progress::END);
        }
        self.set_gate(decision.next);
        if !decision.capture {
            return InputDisposition::PassThrough;
        }

        let outcome = progress::apply_delta(self.state.progress, raw_delta, self.config.sensitivity);
        self.set_progress(outcome.progress);

        let released = match direction {
            Direction::Forward if outcome.progress.is_end() => Some(GateState::ReleasedForward),
            Direction::Backward if outcome.progress.is_start() => Some(GateState::ReleasedBackward),
            _ => None,
        };
        if let Some(next) = released {
            self.set_gate(next);
            if outcome.exhausted() {
                return InputDisposition::PassThrough;
            }
        }
        InputDisposition::Captured
    }

    // ── rendering ───────────────────────────────────────────────

    pub fn visual_state(&self) -> VisualState {
        let progress = self.state.progress;
        let range = self.config.phases.range_for(progress);
        let frame = match self.variant {
            Variant::Timeline => None,
            Variant::FrameSequence { .. } if self.readiness != Readiness::Ready => Some(0),
            Variant::FrameSequence { frame_count } => Some(phase::frame_index(progress, frame_count)),
        };
        VisualState {
            progress,
            phase: range.phase,
            phase_progress: range.local(progress),
            frame,
            reveal_overlay: phase::reveal_overlay(progress, self.config.reveal_threshold),
        }
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let visual = self.visual_state();
        renderer.set_visual_state(&visual);
        renderer.reveal_overlay(visual.reveal_overlay);
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.logo_visible.send_replace(false);
        self.hero_active.send_replace(false);
    }
}
