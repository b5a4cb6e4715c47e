//! Phase / frame selection — deterministic lookups from progress.
//!
//! The timeline variant buckets progress into named phases through an
//! ordered [`PhaseTable`]; the frame-sequence variant maps progress onto an
//! index into a pre-loaded image sequence.

use std::fmt;

use thiserror::Error;

use super::progress::Progress;

/// Named stages of the hero illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Initial,
    InitialLine,
    Drawing,
    ZoomOut,
    Connecting,
    ZoomInEnd,
    Drawing2,
    ZoomOutBoth,
    LogoReveal,
    LogoDocked,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Initial => "initial",
            Phase::InitialLine => "initial-line",
            Phase::Drawing => "drawing",
            Phase::ZoomOut => "zoom-out",
            Phase::Connecting => "connecting",
            Phase::ZoomInEnd => "zoom-in-end",
            Phase::Drawing2 => "drawing-2",
            Phase::ZoomOutBoth => "zoom-out-both",
            Phase::LogoReveal => "logo-reveal",
            Phase::LogoDocked => "logo-docked",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a [`PhaseTable`]: `[lower, upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseRange {
    pub lower: f64,
    pub upper: f64,
    pub phase: Phase,
}

impl PhaseRange {
    pub const fn new(lower: f64, upper: f64, phase: Phase) -> Self {
        Self { lower, upper, phase }
    }

    /// Where inside this range `progress` sits, `0..=1`.
    pub fn local(&self, progress: Progress) -> f64 {
        let span = self.upper - self.lower;
        ((progress.get() - self.lower) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PhaseTableError {
    #[error("phase table is empty")]
    Empty,
    #[error("phase table must start at 0 (starts at {0})")]
    BadStart(f64),
    #[error("phase table must end at 1 (ends at {0})")]
    BadEnd(f64),
    #[error("range {index} is empty or inverted ({lower}..{upper})")]
    EmptyRange { index: usize, lower: f64, upper: f64 },
    #[error("gap or overlap between range {index} and the one before it")]
    Discontinuous { index: usize },
    #[error("expected {expected} phase boundaries, found {found}")]
    BoundCount { expected: usize, found: usize },
}

/// The hero timeline, measured in progress units.
pub const HERO_TIMELINE: &[PhaseRange] = &[
    PhaseRange::new(0.00, 0.05, Phase::Initial),
    PhaseRange::new(0.05, 0.10, Phase::InitialLine),
    PhaseRange::new(0.10, 0.30, Phase::Drawing),
    PhaseRange::new(0.30, 0.40, Phase::ZoomOut),
    PhaseRange::new(0.40, 0.47, Phase::Connecting),
    PhaseRange::new(0.47, 0.50, Phase::ZoomInEnd),
    PhaseRange::new(0.50, 0.72, Phase::Drawing2),
    PhaseRange::new(0.72, 0.85, Phase::ZoomOutBoth),
    PhaseRange::new(0.85, 0.92, Phase::LogoReveal),
    PhaseRange::new(0.92, 1.00, Phase::LogoDocked),
];

/// Ordered, gap-free partition of `[0, 1]` into phases.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    ranges: Vec<PhaseRange>,
}

impl PhaseTable {
    pub fn new(ranges: Vec<PhaseRange>) -> Result<Self, PhaseTableError> {
        let first = ranges.first().ok_or(PhaseTableError::Empty)?;
        if first.lower != 0.0 {
            return Err(PhaseTableError::BadStart(first.lower));
        }
        for (index, r) in ranges.iter().enumerate() {
            if !(r.lower < r.upper) {
                return Err(PhaseTableError::EmptyRange {
                    index,
                    lower: r.lower,
                    upper: r.upper,
                });
            }
            if index > 0 && ranges[index - 1].upper != r.lower {
                return Err(PhaseTableError::Discontinuous { index });
            }
        }
        let last = ranges[ranges.len() - 1].upper;
        if last != 1.0 {
            return Err(PhaseTableError::BadEnd(last));
        }
        Ok(Self { ranges })
    }

    pub fn hero() -> Self {
        Self {
            ranges: HERO_TIMELINE.to_vec(),
        }
    }

    /// The hero phases in their usual order, split at the given interior
    /// boundaries (one fewer than the number of phases).
    pub fn from_bounds(bounds: &[f64]) -> Result<Self, PhaseTableError> {
        let expected = HERO_TIMELINE.len() - 1;
        if bounds.len() != expected {
            return Err(PhaseTableError::BoundCount {
                expected,
                found: bounds.len(),
            });
        }
        let edges: Vec<f64> = std::iter::once(0.0)
            .chain(bounds.iter().copied())
            .chain(std::iter::once(1.0))
            .collect();
        let ranges = HERO_TIMELINE
            .iter()
            .zip(edges.windows(2))
            .map(|(r, w)| PhaseRange::new(w[0], w[1], r.phase))
            .collect();
        Self::new(ranges)
    }

    /// Interior boundaries; the inverse of [`PhaseTable::from_bounds`].
    pub fn bounds(&self) -> Vec<f64> {
        self.ranges().iter().skip(1).map(|r| r.lower).collect()
    }

    pub fn ranges(&self) -> &[PhaseRange] {
        &self.ranges
    }

    /// The range containing `progress`.  The final range is closed at 1.
    pub fn range_for(&self, progress: Progress) -> &PhaseRange {
        let p = progress.get();
        self.ranges
            .iter()
            .find(|r| p >= r.lower && p < r.upper)
            .unwrap_or(&self.ranges[self.ranges.len() - 1])
    }

    pub fn select(&self, progress: Progress) -> Phase {
        self.range_for(progress).phase
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::hero()
    }
}

/// `floor(progress * (frame_count - 1))`, clamped to a valid index.
pub fn frame_index(progress: Progress, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    let last = frame_count - 1;
    let idx = (progress.get() * last as f64).floor();
    (idx.max(0.0) as usize).min(last)
}

/// Whether the secondary overlay (the docked logo) should be shown.
pub fn reveal_overlay(progress: Progress, threshold: f64) -> bool {
    progress.get() > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_table_is_valid() {
        assert_eq!(PhaseTable::new(HERO_TIMELINE.to_vec()), Ok(PhaseTable::hero()));
    }

    #[test]
    fn every_progress_has_exactly_one_phase() {
        let table = PhaseTable::hero();
        for i in 0..=10_000 {
            let p = i as f64 / 10_000.0;
            let matching = table
                .ranges()
                .iter()
                .enumerate()
                .filter(|(idx, r)| {
                    let last = *idx == table.ranges().len() - 1;
                    p >= r.lower && (p < r.upper || (last && p <= r.upper))
                })
                .count();
            assert_eq!(matching, 1, "progress {p}");
            let _ = table.select(Progress::new(p));
        }
    }

    #[test]
    fn bounds_are_half_open() {
        let table = PhaseTable::hero();
        for r in table.ranges() {
            assert_eq!(table.select(Progress::new(r.lower)), r.phase);
        }
        assert_eq!(table.select(Progress::new(0.0499)), Phase::Initial);
        assert_eq!(table.select(Progress::new(0.05)), Phase::InitialLine);
        assert_eq!(table.select(Progress::END), Phase::LogoDocked);
    }

    #[test]
    fn rejects_malformed_tables() {
        use Phase::*;
        assert_eq!(PhaseTable::new(vec![]), Err(PhaseTableError::Empty));
        assert_eq!(
            PhaseTable::new(vec![PhaseRange::new(0.1, 1.0, Initial)]),
            Err(PhaseTableError::BadStart(0.1))
        );
        assert_eq!(
            PhaseTable::new(vec![PhaseRange::new(0.0, 0.9, Initial)]),
            Err(PhaseTableError::BadEnd(0.9))
        );
        assert_eq!(
            PhaseTable::new(vec![
                PhaseRange::new(0.0, 0.4, Initial),
                PhaseRange::new(0.5, 1.0, Drawing),
            ]),
            Err(PhaseTableError::Discontinuous { index: 1 })
        );
        assert!(matches!(
            PhaseTable::new(vec![
                PhaseRange::new(0.0, 0.5, Initial),
                PhaseRange::new(0.5, 0.5, Drawing),
                PhaseRange::new(0.5, 1.0, LogoDocked),
            ]),
            Err(PhaseTableError::EmptyRange { index: 1, .. })
        ));
    }

    #[test]
    fn custom_boundaries_keep_phase_order() {
        let hero = PhaseTable::hero();
        assert_eq!(PhaseTable::from_bounds(&hero.bounds()), Ok(hero));

        let bounds = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let table = PhaseTable::from_bounds(&bounds).unwrap();
        assert_eq!(table.select(Progress::new(0.85)), Phase::LogoReveal);
        assert_eq!(table.select(Progress::new(0.95)), Phase::LogoDocked);

        assert_eq!(
            PhaseTable::from_bounds(&bounds[..3]),
            Err(PhaseTableError::BoundCount { expected: 9, found: 3 })
        );
        let mut unordered = bounds;
        unordered.swap(2, 3);
        assert!(matches!(
            PhaseTable::from_bounds(&unordered),
            Err(PhaseTableError::EmptyRange { index: 3, .. })
        ));
    }

    #[test]
    fn frame_index_matches_floor_mapping() {
        assert_eq!(frame_index(Progress::new(0.5), 348), 173);
        assert_eq!(frame_index(Progress::START, 348), 0);
        assert_eq!(frame_index(Progress::END, 348), 347);
        assert_eq!(frame_index(Progress::new(0.999), 1), 0);
        assert_eq!(frame_index(Progress::new(0.7), 0), 0);
    }

    #[test]
    fn overlay_reveals_strictly_past_threshold() {
        assert!(!reveal_overlay(Progress::new(0.92), 0.92));
        assert!(reveal_overlay(Progress::new(0.93), 0.92));
        assert!(reveal_overlay(Progress::new(0.81), 0.8));
    }

    #[test]
    fn local_position_within_range() {
        let r = PhaseRange::new(0.1, 0.3, Phase::Drawing);
        assert!((r.local(Progress::new(0.2)) - 0.5).abs() < 1e-9);
        assert_eq!(r.local(Progress::new(0.9)), 1.0);
    }
}
