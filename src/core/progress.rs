//! Progress clamp & mapper — turns raw scroll deltas into a bounded progress.
//!
//! A raw delta is whatever the input source reports (wheel rows, touch
//! pixels).  It is scaled by a sensitivity and added to the current progress,
//! then clamped to `[0, 1]`.  Non-finite input never moves progress.

/// Normalised animation position, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Clamp `value` into range.  NaN maps to the start.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_start(self) -> bool {
        self.0 <= 0.0
    }

    pub fn is_end(self) -> bool {
        self.0 >= 1.0
    }
}

/// What a single delta did to progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaEffect {
    /// Progress changed (possibly landing exactly on a bound).
    Moved,
    /// Zero or non-finite delta.
    Unchanged,
    /// Backward delta while already at 0 — nothing left to rewind.
    AtStart,
    /// Forward delta while already at 1.
    AtEnd,
}

/// Result of [`apply_delta`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaOutcome {
    pub progress: Progress,
    pub effect: DeltaEffect,
}

impl DeltaOutcome {
    /// `true` when the caller should stop capturing input in this direction.
    pub fn exhausted(&self) -> bool {
        matches!(self.effect, DeltaEffect::AtStart | DeltaEffect::AtEnd)
    }
}

/// `clamp(current + raw_delta * sensitivity, 0, 1)`.
pub fn apply_delta(current: Progress, raw_delta: f64, sensitivity: f64) -> DeltaOutcome {
    let unchanged = DeltaOutcome {
        progress: current,
        effect: DeltaEffect::Unchanged,
    };
    if !raw_delta.is_finite() || !sensitivity.is_finite() {
        return unchanged;
    }
    let step = raw_delta * sensitivity;
    if step == 0.0 || !step.is_finite() {
        return unchanged;
    }

    if step < 0.0 && current.is_start() {
        return DeltaOutcome {
            progress: current,
            effect: DeltaEffect::AtStart,
        };
    }
    if step > 0.0 && current.is_end() {
        return DeltaOutcome {
            progress: current,
            effect: DeltaEffect::AtEnd,
        };
    }

    DeltaOutcome {
        progress: Progress::new(current.get() + step),
        effect: DeltaEffect::Moved,
    }
}

// ───────────────────────────────────────── scroll span ───────

/// Viewport-relative scroll distance that maps onto the whole animation.
///
/// Narrow viewports get a longer span so the animation is not rushed by
/// coarse touch scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpan {
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Widths below this use the narrow multiplier.
    pub breakpoint: f64,
    pub wide_multiplier: f64,
    pub narrow_multiplier: f64,
}

impl ScrollSpan {
    /// Terminal defaults: 80-column breakpoint, ×3 wide, ×5 narrow.
    pub fn terminal(columns: u16, rows: u16) -> Self {
        Self {
            viewport_width: columns as f64,
            viewport_height: rows as f64,
            breakpoint: 80.0,
            wide_multiplier: 3.0,
            narrow_multiplier: 5.0,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport_width < self.breakpoint
    }

    /// Total raw delta needed to go from 0 to 1.
    pub fn distance(&self) -> f64 {
        let multiplier = if self.is_narrow() {
            self.narrow_multiplier
        } else {
            self.wide_multiplier
        };
        (self.viewport_height * multiplier).max(1.0)
    }

    pub fn sensitivity(&self) -> f64 {
        1.0 / self.distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_escapes_bounds() {
        let starts = [0.0, 0.1, 0.5, 0.99, 1.0];
        let deltas = [-1e9, -250.0, -1.0, -0.001, 0.0, 0.001, 3.0, 400.0, 1e12];
        for &p in &starts {
            for &d in &deltas {
                let out = apply_delta(Progress::new(p), d, 0.001);
                let v = out.progress.get();
                assert!((0.0..=1.0).contains(&v), "p={p} d={d} -> {v}");
            }
        }
    }

    #[test]
    fn zero_delta_is_idempotent() {
        let p = Progress::new(0.37);
        let once = apply_delta(p, 0.0, 0.001);
        let twice = apply_delta(once.progress, 0.0, 0.001);
        assert_eq!(once.progress, p);
        assert_eq!(twice.progress, p);
        assert_eq!(twice.effect, DeltaEffect::Unchanged);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let p = Progress::new(0.5);
        for d in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let out = apply_delta(p, d, 0.001);
            assert_eq!(out.progress, p);
            assert_eq!(out.effect, DeltaEffect::Unchanged);
        }
        assert_eq!(apply_delta(p, 10.0, f64::NAN).progress, p);
    }

    #[test]
    fn repeated_forward_moves_monotonically_without_overshoot() {
        let mut p = Progress::START;
        let mut last = p.get();
        for _ in 0..50 {
            p = apply_delta(p, 37.0, 0.001).progress;
            assert!(p.get() >= last);
            last = p.get();
        }
        assert_eq!(p, Progress::END);

        for _ in 0..50 {
            p = apply_delta(p, -37.0, 0.001).progress;
            assert!(p.get() <= last);
            last = p.get();
        }
        assert_eq!(p, Progress::START);
    }

    #[test]
    fn reports_exhaustion_at_bounds() {
        let back = apply_delta(Progress::START, -5.0, 0.01);
        assert_eq!(back.effect, DeltaEffect::AtStart);
        assert!(back.exhausted());

        let fwd = apply_delta(Progress::END, 5.0, 0.01);
        assert_eq!(fwd.effect, DeltaEffect::AtEnd);
        assert_eq!(fwd.progress, Progress::END);
    }

    #[test]
    fn full_forward_delta_lands_on_end() {
        let out = apply_delta(Progress::START, 1000.0, 0.001);
        assert_eq!(out.progress, Progress::END);
        assert_eq!(out.effect, DeltaEffect::Moved);
    }

    #[test]
    fn nan_progress_clamps_to_start() {
        assert_eq!(Progress::new(f64::NAN), Progress::START);
        assert_eq!(Progress::new(7.0), Progress::END);
        assert_eq!(Progress::new(-2.0), Progress::START);
    }

    #[test]
    fn span_uses_narrow_multiplier_below_breakpoint() {
        let wide = ScrollSpan::terminal(120, 40);
        assert_eq!(wide.distance(), 120.0);
        let narrow = ScrollSpan::terminal(60, 40);
        assert_eq!(narrow.distance(), 200.0);
        assert!((narrow.sensitivity() - 0.005).abs() < 1e-12);
    }
}
