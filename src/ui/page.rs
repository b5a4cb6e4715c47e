//! Page compositor — draws every section that intersects the viewport.
//!
//! Each section renders into its own scratch buffer at full height and the
//! visible rows are copied across, so partially scrolled sections clip
//! cleanly at the viewport edges.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

use crate::app::state::{AppState, FrameSource};
use crate::core::gate::Direction;
use crate::core::locale::tr;
use crate::core::page::SectionKind;

use super::carousel::CarouselView;
use super::hero::HeroView;
use super::sections::{FooterView, JourneyView, TextView};
use super::spinner::LoadingIndicator;

pub struct PageView<'a> {
    pub state: &'a AppState,
    pub now: Instant,
    /// Drives the loading spinner.
    pub tick: u64,
}

impl PageView<'_> {
    fn render_section(&self, kind: SectionKind, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let locale = state.location.locale;
        match kind {
            SectionKind::Hero => {
                let frames = match &state.frames {
                    FrameSource::Loaded(set) => Some(set),
                    _ => None,
                };
                if let Some(animator) = &state.animator {
                    let mut view = HeroView::new(frames, locale)
                        .with_hint(animator.would_capture(Direction::Forward));
                    animator.render(&mut view);
                    view.render(area, buf);
                }
                LoadingIndicator {
                    visible: state.is_loading_frames(),
                    tick: self.tick,
                    label: tr(locale, "hero.loading"),
                }
                .render(area, buf);
            }
            SectionKind::Projects => CarouselView {
                carousel: &state.carousel,
                locale,
                now: self.now,
            }
            .render(area, buf),
            SectionKind::Journey => JourneyView {
                stats: &state.stats,
                locale,
                now: self.now,
            }
            .render(area, buf),
            SectionKind::News => TextView {
                title_key: "news.title",
                body_key: "news.body",
                locale,
            }
            .render(area, buf),
            SectionKind::Text(body_key) => TextView {
                title_key: state.location.route.title_key(),
                body_key,
                locale,
            }
            .render(area, buf),
            SectionKind::Footer => FooterView {
                location: &state.location,
            }
            .render(area, buf),
        }
    }
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page = &self.state.page;
        let offset = page.offset() as i64;
        let mut top = 0i64;
        for section in page.sections() {
            let height = section.height as i64;
            let screen_top = top - offset;
            top += height;
            if screen_top + height <= 0 || screen_top >= area.height as i64 {
                continue;
            }
            let full = Rect::new(0, 0, area.width, section.height);
            let mut scratch = Buffer::empty(full);
            self.render_section(section.kind, full, &mut scratch);
            blit(&scratch, screen_top, area, buf);
        }
    }
}

/// Copy `src` into `area` with its first row at `screen_top` (may be negative).
fn blit(src: &Buffer, screen_top: i64, area: Rect, dst: &mut Buffer) {
    for sy in 0..src.area.height {
        let y = screen_top + sy as i64;
        if y < 0 || y >= area.height as i64 {
            continue;
        }
        for x in 0..src.area.width.min(area.width) {
            let from = src.cell(Position::new(x, sy));
            let to = dst.cell_mut(Position::new(area.x + x, area.y + y as u16));
            if let (Some(from), Some(to)) = (from, to) {
                *to = from.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handler;
    use crate::config::AppConfig;
    use crate::core::locale::Location;

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn render(state: &AppState) -> Buffer {
        let (w, h) = state.page.viewport();
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        PageView { state, now: Instant::now(), tick: 0 }.render(area, &mut buf);
        buf
    }

    #[test]
    fn hero_fills_viewport_at_start() {
        let state = AppState::new(
            AppConfig::default(),
            Location::parse("/en"),
            FrameSource::Timeline,
            100,
            30,
        );
        let buf = render(&state);
        assert!(text(&buf).contains("SCROLL TO BEGIN"));
        assert!(!text(&buf).contains("FEATURED PROJECTS"));
    }

    #[test]
    fn sections_scroll_in_after_hero_completes() {
        let mut state = AppState::new(
            AppConfig::default(),
            Location::parse("/en"),
            FrameSource::Timeline,
            100,
            30,
        );
        handler::scroll(&mut state, 10_000);
        handler::scroll(&mut state, 20);
        let buf = render(&state);
        // Projects starts on row 30 of the page, row 10 of the screen.
        let row10: String = (0..100).map(|x| buf[(x, 10)].symbol().to_string()).collect();
        assert!(row10.contains("FEATURED PROJECTS"));
    }

    #[test]
    fn loading_indicator_over_hero() {
        let state = AppState::new(
            AppConfig::default(),
            Location::parse("/en"),
            FrameSource::Loading("frames".into()),
            100,
            30,
        );
        let text = text(&render(&state));
        assert!(text.contains("loading frames"));
        // Nothing to scrub yet, so no prompt to scroll.
        assert!(!text.contains("SCROLL TO BEGIN"));
    }
}
