//! Input handling — maps key/mouse events to state mutations.
//!
//! Every scroll request is offered to the hero animator first.  Only input
//! the animator passes through moves the page.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::time::Instant;

use crate::config::Action;
use crate::core::animator::InputDisposition;
use crate::ui::header;
use crate::ui::layout::AppLayout;

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollDown => scroll(state, state.config.wheel_rows as i32),
        Action::ScrollUp => scroll(state, -(state.config.wheel_rows as i32)),
        Action::PageDown => scroll(state, page_step(state)),
        Action::PageUp => scroll(state, -page_step(state)),
        Action::NextProject => {
            state.carousel.next(Instant::now());
        }
        Action::PrevProject => {
            state.carousel.prev(Instant::now());
        }
        Action::ToggleLanguage => toggle_language(state),
        Action::NextRoute => {
            let next = state.location.route.next();
            state.go_to_route(next);
            state.status_message = Some(state.location.to_path());
        }
    }
}

fn page_step(state: &AppState) -> i32 {
    let (_, rows) = state.page.viewport();
    rows.saturating_sub(2).max(1) as i32
}

/// Offer `rows` of scroll to the hero, then to the page.
pub fn scroll(state: &mut AppState, rows: i32) {
    if rows == 0 {
        return;
    }
    if let Some(animator) = state.animator.as_mut() {
        if animator.handle_input(rows as f64) == InputDisposition::Captured {
            return;
        }
    }
    state.scroll_page(rows);
}

fn toggle_language(state: &mut AppState) {
    let next = state.location.toggle_language();
    state.navigate(next);
    state.status_message = Some(state.location.to_path());
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, area: ratatui::layout::Rect) {
    if state.active_view != ActiveView::Page {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => scroll(state, state.config.wheel_rows as i32),
        MouseEventKind::ScrollUp => scroll(state, -(state.config.wheel_rows as i32)),
        MouseEventKind::Down(MouseButton::Left) => {
            if !state.header.is_visible() {
                return;
            }
            let layout = AppLayout::from_area(area);
            let switch = header::switch_area(layout.header_area, state.location.locale);
            if point_in_rect(switch, mouse.column, mouse.row) {
                toggle_language(state);
            }
        }
        _ => {}
    }
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::FrameSource;
    use crate::config::AppConfig;
    use crate::core::gate::GateState;
    use crate::core::locale::{Locale, Location, Route};
    use crate::core::progress::Progress;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn home() -> AppState {
        AppState::new(
            AppConfig::default(),
            Location::parse("/en"),
            FrameSource::Timeline,
            100,
            30,
        )
    }

    #[test]
    fn hero_consumes_scroll_until_complete() {
        let mut state = home();
        let area = Rect::new(0, 0, 100, 30);

        handle_mouse(&mut state, wheel(MouseEventKind::ScrollDown), area);
        assert_eq!(state.page.offset(), 0);
        assert!(state.animator.as_ref().unwrap().progress().get() > 0.0);

        // 90 rows of span at 3 rows per notch.
        for _ in 0..40 {
            if state.animator.as_ref().unwrap().gate() == GateState::ReleasedForward {
                break;
            }
            handle_mouse(&mut state, wheel(MouseEventKind::ScrollDown), area);
        }
        let animator = state.animator.as_ref().unwrap();
        assert_eq!(animator.progress(), Progress::END);
        assert_eq!(animator.gate(), GateState::ReleasedForward);
        assert_eq!(state.page.offset(), 0);

        handle_mouse(&mut state, wheel(MouseEventKind::ScrollDown), area);
        assert_eq!(state.page.offset(), 3);
        assert!(state.signals.logo_visible());
    }

    #[test]
    fn scrolling_back_to_completed_hero_snaps() {
        let mut state = home();
        scroll(&mut state, 10_000);
        scroll(&mut state, 20);
        assert_eq!(state.page.offset(), 20);

        // Rewind the page back over the hero.
        for _ in 0..10 {
            handle_key(&mut state, key(KeyCode::Up));
        }
        assert_eq!(state.page.offset(), 0);
        let animator = state.animator.as_ref().unwrap();
        assert_eq!(animator.progress(), Progress::END);
        assert_eq!(animator.gate(), GateState::ReleasedForward);
    }

    #[test]
    fn wheel_up_at_start_scrolls_nothing() {
        let mut state = home();
        handle_mouse(&mut state, wheel(MouseEventKind::ScrollUp), Rect::new(0, 0, 100, 30));
        assert_eq!(state.page.offset(), 0);
        assert_eq!(state.animator.as_ref().unwrap().progress(), Progress::START);
    }

    #[test]
    fn pages_without_hero_scroll_directly() {
        let mut state = home();
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.location.route, Route::About);
        assert!(state.animator.is_none());
        assert_eq!(state.status_message.as_deref(), Some("/en/about"));
    }

    #[test]
    fn carousel_keys_respect_slide_lock() {
        let mut state = home();
        let start = state.carousel.current();
        handle_key(&mut state, key(KeyCode::Right));
        handle_key(&mut state, key(KeyCode::Right));
        assert_eq!(state.carousel.current(), start + 1);
    }

    #[test]
    fn language_key_rewrites_path() {
        let mut state = home();
        handle_key(
            &mut state,
            KeyEvent {
                code: KeyCode::Char('L'),
                modifiers: KeyModifiers::SHIFT,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
        assert_eq!(state.location.locale, Locale::Zh);
        assert_eq!(state.status_message.as_deref(), Some("/zh"));
    }

    #[test]
    fn settings_menu_navigation() {
        let mut state = home();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::SettingsMenu);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.settings_selected, 1);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Page);
    }
}
