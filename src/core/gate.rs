//! Input capture gate — decides who owns scrolling right now.
//!
//! The gate is a small state machine over the hero region's position in the
//! viewport and the animation's progress.  Every decision here is a pure
//! function of its inputs so it can be exercised without a terminal.

use std::fmt;

/// Whether the animation currently owns scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Region not anchored; the page scrolls normally.
    #[default]
    Passive,
    /// Region anchored and animating; scroll input drives progress.
    Active,
    /// Animation ran to the end; page scroll resumes downward.
    ReleasedForward,
    /// Animation rewound to the start; page scroll resumes upward.
    ReleasedBackward,
}

impl GateState {
    pub fn is_capturing(self) -> bool {
        self == GateState::Active
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GateState::Passive => "passive",
            GateState::Active => "active",
            GateState::ReleasedForward => "released-forward",
            GateState::ReleasedBackward => "released-backward",
        })
    }
}

/// Scroll direction.  Forward = content moves up (wheel down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Direction of a raw delta; `None` for zero or non-finite values.
    pub fn of(delta: f64) -> Option<Self> {
        if !delta.is_finite() || delta == 0.0 {
            None
        } else if delta > 0.0 {
            Some(Direction::Forward)
        } else {
            Some(Direction::Backward)
        }
    }
}

/// What happens when a completed animation's region is scrolled back into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReentryPolicy {
    /// Jump straight to the final state; never replay.
    #[default]
    SnapToComplete,
    /// Capture again and scrub through the frames.
    Replay,
}

/// Region position relative to the viewport, in one unit (rows, pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionGeometry {
    /// Region top edge minus viewport top edge.
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl RegionGeometry {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top edge pinned to the viewport top (within `tolerance`) and at least
    /// half the viewport still covered by the region.
    pub fn in_anchor_band(&self, tolerance: f64) -> bool {
        self.top.abs() <= tolerance && self.bottom() >= self.viewport_height / 2.0
    }

    /// Any part of the region is on screen.
    pub fn is_near_viewport(&self) -> bool {
        self.top < self.viewport_height && self.bottom() > 0.0
    }
}

/// Everything besides geometry that feeds a gate decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateContext {
    pub completed_once: bool,
    pub policy: ReentryPolicy,
    pub tolerance: f64,
    /// Assets are loaded and the animation may start.
    pub ready: bool,
}

/// Outcome of a gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub next: GateState,
    /// Input should be consumed by the animation.
    pub capture: bool,
    /// Progress must jump to 1 without replaying.
    pub snap_to_end: bool,
}

impl GateDecision {
    fn stay(state: GateState) -> Self {
        Self {
            next: state,
            capture: state.is_capturing(),
            snap_to_end: false,
        }
    }

    fn snap() -> Self {
        Self {
            next: GateState::ReleasedForward,
            capture: false,
            snap_to_end: true,
        }
    }

    fn activate() -> Self {
        Self {
            next: GateState::Active,
            capture: true,
            snap_to_end: false,
        }
    }
}

fn snaps_on_reentry(ctx: &GateContext) -> bool {
    ctx.completed_once && ctx.policy == ReentryPolicy::SnapToComplete
}

/// Re-evaluate the gate after the region moved (page scroll, resize).
///
/// `moving` is the page scroll direction that produced the new geometry,
/// if any.
pub fn on_region_moved(
    state: GateState,
    geometry: &RegionGeometry,
    moving: Option<Direction>,
    ctx: &GateContext,
) -> GateDecision {
    if !geometry.is_near_viewport() {
        return GateDecision::stay(GateState::Passive);
    }
    if !geometry.in_anchor_band(ctx.tolerance) {
        return GateDecision::stay(state);
    }

    match state {
        GateState::Passive if !ctx.ready => GateDecision::stay(GateState::Passive),
        GateState::Passive if snaps_on_reentry(ctx) => GateDecision::snap(),
        GateState::Passive => GateDecision::activate(),
        GateState::ReleasedForward | GateState::ReleasedBackward
            if moving == Some(Direction::Backward) && snaps_on_reentry(ctx) =>
        {
            GateDecision::snap()
        }
        other => GateDecision::stay(other),
    }
}

/// Decide what a single input event in `direction` does.
pub fn on_input(
    state: GateState,
    geometry: &RegionGeometry,
    direction: Direction,
    ctx: &GateContext,
) -> GateDecision {
    let anchored = geometry.in_anchor_band(ctx.tolerance);
    match state {
        GateState::Active => GateDecision::activate(),
        GateState::Passive => {
            if anchored {
                on_region_moved(state, geometry, Some(direction), ctx)
            } else {
                GateDecision::stay(GateState::Passive)
            }
        }
        GateState::ReleasedForward => match direction {
            Direction::Backward if anchored && snaps_on_reentry(ctx) => GateDecision::snap(),
            Direction::Backward if anchored && ctx.ready => GateDecision::activate(),
            _ => GateDecision::stay(state),
        },
        GateState::ReleasedBackward => match direction {
            Direction::Forward if anchored && ctx.ready => GateDecision::activate(),
            Direction::Backward if anchored && snaps_on_reentry(ctx) => GateDecision::snap(),
            _ => GateDecision::stay(state),
        },
    }
}

/// Whether input in `direction` would be consumed by the animation.
pub fn should_capture(
    state: GateState,
    geometry: &RegionGeometry,
    direction: Direction,
    ctx: &GateContext,
) -> bool {
    on_input(state, geometry, direction, ctx).capture
}
