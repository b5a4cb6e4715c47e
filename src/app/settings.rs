//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;
use crate::core::assets::FrameSize;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Apply the item's primary action (flip or advance).
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }

    pub fn value(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => (if get(state) { "ON" } else { "OFF" }).to_string(),
            Self::Cycle { value, .. } => value(state),
        }
    }
}

fn persist(state: &mut AppState) {
    let Some(path) = state.config_path.as_deref() else {
        return;
    };
    if let Err(e) = state.config.save_to(path) {
        tracing::warn!(error = %e, "could not save config");
    }
}

fn next_in<T: Copy + PartialEq>(values: &[T], current: T, fallback: usize) -> T {
    let idx = values.iter().position(|v| *v == current).unwrap_or(fallback);
    values[(idx + 1) % values.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Snap On Re-entry",
        get: |s| s.config.snap_on_reentry,
        set: |s, v| {
            s.set_snap_on_reentry(v);
            persist(s);
            s.status_message = Some(if v {
                "Re-entry jumps to the finished animation".into()
            } else {
                "Re-entry replays the animation".into()
            });
        },
    },
    SettingsItem::Cycle {
        label: "Wheel Step",
        value: |s| format!("{} rows", s.config.wheel_rows),
        cycle: |s| {
            s.config.wheel_rows = next_in(&[1, 2, 3, 5, 8], s.config.wheel_rows, 2);
            persist(s);
            s.status_message = Some(format!("Wheel step: {} rows", s.config.wheel_rows));
        },
    },
    SettingsItem::Cycle {
        label: "Anchor Tolerance",
        value: |s| format!("{} rows", s.config.anchor_tolerance),
        cycle: |s| {
            s.config.anchor_tolerance = next_in(&[0, 1, 2, 4], s.config.anchor_tolerance, 1);
            persist(s);
            let tolerance = s.config.anchor_tolerance as f64;
            if let Some(a) = s.animator.as_mut() {
                a.set_anchor_tolerance(tolerance);
            }
        },
    },
    SettingsItem::Cycle {
        label: "Logo Reveal At",
        value: |s| format!("{:.0}%", s.config.reveal_threshold * 100.0),
        cycle: |s| {
            const THRESHOLDS: &[f64] = &[0.85, 0.9, 0.92, 0.95];
            let idx = THRESHOLDS
                .iter()
                .position(|t| (t - s.config.reveal_threshold).abs() < 1e-9)
                .unwrap_or(1);
            s.config.reveal_threshold = THRESHOLDS[(idx + 1) % THRESHOLDS.len()];
            persist(s);
            let threshold = s.config.reveal_threshold;
            if let Some(a) = s.animator.as_mut() {
                a.set_reveal_threshold(threshold);
            }
        },
    },
    SettingsItem::Cycle {
        label: "Frame Size",
        value: |s| format!("{}x{}", s.config.frame_size.width, s.config.frame_size.height),
        cycle: |s| {
            const SIZES: &[(u32, u32)] = &[(96, 54), (160, 90), (256, 144)];
            let current = (s.config.frame_size.width, s.config.frame_size.height);
            let (width, height) = next_in(SIZES, current, 1);
            s.config.frame_size = FrameSize { width, height };
            persist(s);
            s.status_message = Some("Frame size applies on next launch".into());
        },
    },
    SettingsItem::Cycle {
        label: "Language",
        value: |s| s.location.locale.code().to_string(),
        cycle: |s| {
            let next = s.location.toggle_language();
            s.navigate(next);
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::FrameSource;
    use crate::config::AppConfig;
    use crate::core::assets::test_support::scratch_dir;
    use crate::core::gate::{Direction, GateState, RegionGeometry};
    use crate::core::locale::Location;

    fn home_saving_to(name: &str) -> AppState {
        let mut state = AppState::new(
            AppConfig::default(),
            Location::parse("/en"),
            FrameSource::Timeline,
            100,
            30,
        );
        state.config_path = Some(scratch_dir(name).join("config.toml"));
        state
    }

    fn item(label: &str) -> &'static SettingsItem {
        SETTINGS_ITEMS
            .iter()
            .find(|i| i.label() == label)
            .unwrap()
    }

    fn hero_at(top: f64) -> RegionGeometry {
        RegionGeometry {
            top,
            height: 30.0,
            viewport_height: 30.0,
        }
    }

    #[test]
    fn snap_toggle_switches_reentry_and_saves() {
        let mut state = home_saving_to("settings-snap");
        state.animator.as_mut().unwrap().handle_input(10_000.0);
        assert!(!state.animator.as_ref().unwrap().would_capture(Direction::Backward));

        item("Snap On Re-entry").activate(&mut state);
        assert!(!state.config.snap_on_reentry);
        assert_eq!(item("Snap On Re-entry").value(&state), "OFF");
        // Replay: scrolling back now rewinds the finished animation.
        assert!(state.animator.as_ref().unwrap().would_capture(Direction::Backward));

        let saved = AppConfig::load_from(state.config_path.as_deref().unwrap());
        assert!(!saved.snap_on_reentry);
    }

    #[test]
    fn tolerance_cycle_reaches_animator() {
        let mut state = home_saving_to("settings-tolerance");
        let tolerance = item("Anchor Tolerance");
        tolerance.activate(&mut state);
        assert_eq!(state.config.anchor_tolerance, 2);
        tolerance.activate(&mut state);
        tolerance.activate(&mut state);
        assert_eq!(state.config.anchor_tolerance, 0);

        let a = state.animator.as_mut().unwrap();
        assert_eq!(a.observe(hero_at(-60.0), Some(Direction::Forward)), GateState::Passive);
        // One row off the top no longer counts as anchored.
        assert_eq!(a.observe(hero_at(-1.0), Some(Direction::Backward)), GateState::Passive);
        assert_eq!(a.observe(hero_at(0.0), Some(Direction::Backward)), GateState::Active);
    }

    #[test]
    fn threshold_cycle_moves_logo_signal() {
        let mut state = home_saving_to("settings-threshold");
        state.animator.as_mut().unwrap().handle_input(81.0);
        assert!(!state.signals.logo_visible());

        let reveal = item("Logo Reveal At");
        reveal.activate(&mut state);
        assert_eq!(state.config.reveal_threshold, 0.95);
        reveal.activate(&mut state);
        assert_eq!(reveal.value(&state), "85%");
        assert!(state.signals.logo_visible());

        let saved = AppConfig::load_from(state.config_path.as_deref().unwrap());
        assert_eq!(saved.reveal_threshold, 0.85);
    }

    #[test]
    fn unsaved_session_writes_nothing() {
        let mut state = home_saving_to("settings-unsaved");
        let path = state.config_path.take().unwrap();
        item("Wheel Step").activate(&mut state);
        assert_eq!(state.config.wheel_rows, 5);
        assert!(!path.exists());
    }
}
