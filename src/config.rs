//! User configuration — keybindings, animation tuning, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/hero-scroll/config.toml` (default `~/.config/hero-scroll/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::assets::FrameSize;
use crate::core::phase::PhaseTable;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    NextProject,
    PrevProject,
    ToggleLanguage,
    NextRoute,
    OpenSettings,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::NextProject,
        Action::PrevProject,
        Action::ToggleLanguage,
        Action::NextRoute,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::NextProject => "next_project",
            Action::PrevProject => "prev_project",
            Action::ToggleLanguage => "toggle_language",
            Action::NextRoute => "next_route",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and hero animation tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Rows of raw delta per mouse-wheel notch.
    pub wheel_rows: u16,
    /// Rows from the viewport top that still count as anchored.
    pub anchor_tolerance: u16,
    /// Progress past which the docked logo appears.
    pub reveal_threshold: f64,
    /// Jump to the final frame instead of replaying after completion.
    pub snap_on_reentry: bool,
    /// Box every loaded frame is fitted into.
    pub frame_size: FrameSize,
    /// Progress boundaries between the hero phases.
    pub phases: PhaseTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            wheel_rows: 3,
            anchor_tolerance: 1,
            reveal_threshold: 0.92,
            snap_on_reentry: true,
            frame_size: FrameSize::default(),
            phases: PhaseTable::hero(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollDown, vec![KeyBind::new(KeyCode::Down, n), KeyBind::new(KeyCode::Char('j'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(KeyCode::Up, n), KeyBind::new(KeyCode::Char('k'), n)]);
        m.insert(PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(KeyCode::Char(' '), n)]);
        m.insert(PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(NextProject, vec![KeyBind::new(KeyCode::Right, n), KeyBind::new(KeyCode::Char('l'), n)]);
        m.insert(PrevProject, vec![KeyBind::new(KeyCode::Left, n), KeyBind::new(KeyCode::Char('h'), n)]);
        m.insert(ToggleLanguage, vec![KeyBind::new(KeyCode::Char('L'), KeyModifiers::SHIFT)]);
        m.insert(NextRoute, vec![KeyBind::new(KeyCode::Tab, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(KeyCode::Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(KeyCode::Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "wheel/{}: scroll | {}: projects | {}: language | {}: page | {}: settings",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextProject),
            self.short_binding(Action::ToggleLanguage),
            self.short_binding(Action::NextRoute),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                }
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Animation settings.
            match key {
                "wheel_rows" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.wheel_rows = v.clamp(1, 20);
                    }
                    continue;
                }
                "anchor_tolerance" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.anchor_tolerance = v.min(10);
                    }
                    continue;
                }
                "reveal_threshold" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.reveal_threshold = v.clamp(0.0, 1.0);
                        }
                    }
                    continue;
                }
                "snap_on_reentry" => {
                    config.snap_on_reentry = value == "true";
                    continue;
                }
                "frame_width" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.frame_size.width = v.clamp(8, 1024);
                    }
                    continue;
                }
                "phase_bounds" => {
                    let bounds: Result<Vec<f64>, _> =
                        value.split(',').map(|v| v.trim().parse::<f64>()).collect();
                    match bounds.map_err(|e| e.to_string()).and_then(|b| {
                        PhaseTable::from_bounds(&b).map_err(|e| e.to_string())
                    }) {
                        Ok(table) => config.phases = table,
                        Err(error) => {
                            tracing::warn!(%error, "ignoring phase_bounds");
                        }
                    }
                    continue;
                }
                "frame_height" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.frame_size.height = v.clamp(8, 1024);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# hero-scroll configuration".to_string(),
            String::new(),
            "# Hero animation".to_string(),
            format!("wheel_rows = {}", self.wheel_rows),
            format!("anchor_tolerance = {}", self.anchor_tolerance),
            format!("reveal_threshold = {}", self.reveal_threshold),
            format!("snap_on_reentry = {}", self.snap_on_reentry),
            format!("frame_width = {}", self.frame_size.width),
            format!("frame_height = {}", self.frame_size.height),
            "# Nine phase boundaries between 0 and 1, in order".to_string(),
            format!(
                "phase_bounds = {}",
                self.phases
                    .bounds()
                    .iter()
                    .map(f64::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/hero-scroll/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("hero-scroll").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn defaults_match_keys() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Down, KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('L'), KeyModifiers::SHIFT)),
            Some(Action::ToggleLanguage)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn page_keys_bind_to_page_actions() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Action::PageDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::PageDown)
        );
        assert_eq!(
            config.match_key(key(KeyCode::PageUp, KeyModifiers::NONE)),
            Some(Action::PageUp)
        );
    }

    #[test]
    fn parses_settings_and_bindings() {
        let config = AppConfig::parse_config(
            "# comment\n\
             wheel_rows = 5\n\
             reveal_threshold = 1.7\n\
             snap_on_reentry = false\n\
             frame_width = 2\n\
             quit = Ctrl+x, Esc\n\
             bogus = 3\n",
        );
        assert_eq!(config.wheel_rows, 5);
        assert_eq!(config.reveal_threshold, 1.0);
        assert!(!config.snap_on_reentry);
        assert_eq!(config.frame_size.width, 8);
        assert_eq!(
            config.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),
            ]
        );
    }

    #[test]
    fn phase_bounds_replace_the_hero_table() {
        let config = AppConfig::parse_config(
            "phase_bounds = 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9\n",
        );
        assert_eq!(config.phases.bounds(), [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);

        for bad in [
            "phase_bounds = 0.1, 0.2",
            "phase_bounds = 0.5, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9",
            "phase_bounds = x",
        ] {
            assert_eq!(AppConfig::parse_config(bad).phases, PhaseTable::hero(), "{bad}");
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("hero-scroll-config-{}", std::process::id()))
            .join("config.toml");
        let mut config = AppConfig::default();
        config.wheel_rows = 7;
        config.snap_on_reentry = false;
        config.phases = PhaseTable::from_bounds(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]).unwrap();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let loaded = AppConfig::load_from(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(loaded, AppConfig::default());
    }
}
