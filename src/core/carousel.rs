//! 3D project carousel — slot window and position→transform table.
//!
//! Seven slots are shown around the centred project.  Slots past either end
//! of the list are placeholders.  Navigation is refused while a slide
//! transition is still running.

use std::time::{Duration, Instant};

/// Number of slots rendered around the current project.
pub const VISIBLE_SLOTS: usize = 7;

/// How long one slide transition blocks further navigation.
pub const SLIDE_DURATION: Duration = Duration::from_millis(700);

/// Transform applied to a card at a given offset from the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub scale: f64,
    pub z_index: u8,
    /// Horizontal shift in layout units.
    pub translate_x: f64,
    /// Degrees around the vertical axis.
    pub rotate_y: f64,
    pub opacity: f64,
}

/// Style for a card `position` slots from the centre (negative = left).
pub fn card_style(position: i32) -> CardStyle {
    let p = position as f64;
    match position.unsigned_abs() {
        0 => CardStyle {
            scale: 1.0,
            z_index: 70,
            translate_x: 0.0,
            rotate_y: 0.0,
            opacity: 1.0,
        },
        1 => CardStyle {
            scale: 0.85,
            z_index: 60,
            translate_x: p * 190.0,
            rotate_y: p * -20.0,
            opacity: 1.0,
        },
        2 => CardStyle {
            scale: 0.75,
            z_index: 50,
            translate_x: p * 170.0,
            rotate_y: 0.0,
            opacity: 1.0,
        },
        3 => CardStyle {
            scale: 0.65,
            z_index: 40,
            translate_x: p * 160.0,
            rotate_y: 0.0,
            opacity: 1.0,
        },
        _ => CardStyle {
            scale: 0.0,
            z_index: 0,
            translate_x: p * 160.0,
            rotate_y: 0.0,
            opacity: 0.0,
        },
    }
}

/// One slot of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    /// Offset from the centre, `-3..=3`.
    pub position: i32,
    /// Project index, `None` for a placeholder past the list ends.
    pub index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    current: usize,
    animating_until: Option<Instant>,
}

impl Carousel {
    /// Starts on the middle project.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: len / 2,
            animating_until: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animating_until.is_some_and(|until| now < until)
    }

    pub fn can_next(&self, now: Instant) -> bool {
        !self.is_animating(now) && self.current + 1 < self.len
    }

    pub fn can_prev(&self, now: Instant) -> bool {
        !self.is_animating(now) && self.current > 0
    }

    /// Advance one project.  Returns `false` when refused.
    pub fn next(&mut self, now: Instant) -> bool {
        if !self.can_next(now) {
            return false;
        }
        self.current += 1;
        self.animating_until = Some(now + SLIDE_DURATION);
        true
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        if !self.can_prev(now) {
            return false;
        }
        self.current -= 1;
        self.animating_until = Some(now + SLIDE_DURATION);
        true
    }

    /// Fraction of the running slide that has elapsed, `1.0` when idle.
    pub fn slide_progress(&self, now: Instant) -> f64 {
        match self.animating_until {
            Some(until) if now < until => {
                let left = until.duration_since(now).as_secs_f64();
                1.0 - left / SLIDE_DURATION.as_secs_f64()
            }
            _ => 1.0,
        }
    }

    /// The seven slots around `current`, left to right.
    pub fn visible_slots(&self) -> [CardSlot; VISIBLE_SLOTS] {
        let half = (VISIBLE_SLOTS / 2) as i32;
        std::array::from_fn(|i| {
            let position = i as i32 - half;
            let idx = self.current as i64 + position as i64;
            let index = (idx >= 0 && (idx as usize) < self.len).then_some(idx as usize);
            CardSlot { position, index }
        })
    }
}
