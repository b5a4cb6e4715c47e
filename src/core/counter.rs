//! Count-up statistics that start the first time they scroll into view.

use std::time::{Duration, Instant};

pub const COUNT_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    EaseOutQuart,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Counter {
    pub end: u32,
    pub suffix: &'static str,
    easing: Easing,
    duration: Duration,
    started: Option<Instant>,
}

impl Counter {
    pub fn new(end: u32, suffix: &'static str) -> Self {
        Self {
            end,
            suffix,
            easing: Easing::default(),
            duration: COUNT_DURATION,
            started: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Start counting.  Only the first call has any effect.
    pub fn trigger(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn value_at(&self, now: Instant) -> u32 {
        let Some(started) = self.started else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration {
            return self.end;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.easing.apply(t) * self.end as f64).floor() as u32
    }

    pub fn display_at(&self, now: Instant) -> String {
        format!("{}{}", self.value_at(now), self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_until_triggered() {
        let c = Counter::new(25, "+");
        assert_eq!(c.value_at(Instant::now()), 0);
        assert!(c.started.is_none());
    }

    #[test]
    fn reaches_exactly_end() {
        let mut c = Counter::new(347, "");
        let t0 = Instant::now();
        c.trigger(t0);
        assert_eq!(c.value_at(t0), 0);
        assert_eq!(c.value_at(t0 + COUNT_DURATION), 347);
        assert_eq!(c.value_at(t0 + Duration::from_secs(10)), 347);
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        let t0 = Instant::now();
        let mut eased = Counter::new(1000, "");
        let mut linear = Counter::new(1000, "").with_easing(Easing::Linear);
        eased.trigger(t0);
        linear.trigger(t0);
        let half = t0 + COUNT_DURATION / 2;
        assert_eq!(linear.value_at(half), 500);
        assert_eq!(eased.value_at(half), 937);
    }

    #[test]
    fn monotonic_and_trigger_once() {
        let mut c = Counter::new(50, "%");
        let t0 = Instant::now();
        c.trigger(t0);
        c.trigger(t0 + Duration::from_millis(900));
        let mut last = 0;
        for ms in (0..=2000).step_by(50) {
            let v = c.value_at(t0 + Duration::from_millis(ms));
            assert!(v >= last);
            last = v;
        }
        assert_eq!(c.display_at(t0 + COUNT_DURATION), "50%");
    }
}
