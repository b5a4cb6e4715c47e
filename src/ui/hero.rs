//! Hero section widget.
//!
//! [`HeroView`] is the terminal-side [`Renderer`]: the animator hands it a
//! [`VisualState`] and the overlay flag, and the widget turns them into
//! either the line-art sketch or the current photographic frame drawn with
//! half-blocks.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Widget,
    },
};

use crate::core::animator::{Renderer, VisualState};
use crate::core::assets::FrameSet;
use crate::core::locale::{tr, Locale};
use crate::core::phase::Phase;

use super::sketch::{self, SKYLINE_B};
use super::theme::Theme;

pub const LOGO: &str = " YIGO ";
const LOGO_WIDE: &str = " Y  I  G  O ";

pub struct HeroView<'a> {
    frames: Option<&'a FrameSet>,
    locale: Locale,
    visual: Option<VisualState>,
    overlay: bool,
    hint: bool,
}

impl<'a> HeroView<'a> {
    pub fn new(frames: Option<&'a FrameSet>, locale: Locale) -> Self {
        Self {
            frames,
            locale,
            visual: None,
            overlay: false,
            hint: false,
        }
    }

    /// Show the "scroll to begin" prompt while the animation is at its start.
    pub fn with_hint(mut self, hint: bool) -> Self {
        self.hint = hint;
        self
    }
}

impl Renderer for HeroView<'_> {
    fn set_visual_state(&mut self, state: &VisualState) {
        self.visual = Some(*state);
    }

    fn reveal_overlay(&mut self, reveal: bool) {
        self.overlay = reveal;
    }
}

impl Widget for HeroView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let Some(visual) = self.visual else {
            return;
        };

        let frame = visual
            .frame
            .and_then(|i| self.frames.and_then(|set| set.get(i)));
        match frame {
            Some(img) => render_image_halfblocks(img, area, buf),
            None => render_sketch(&visual, area, buf),
        }

        if visual.phase == Phase::LogoReveal {
            render_arriving_logo(visual.phase_progress, area, buf);
        }
        if self.overlay {
            let line = Line::from(Span::styled(LOGO, Theme::logo_style()));
            centre_line(&line, area, area.y, buf);
        }
        if self.hint && visual.progress.is_start() {
            let hint = Line::from(Span::styled(
                format!("{}  ↓", tr(self.locale, "hero.scroll_hint")),
                Theme::hint_style(),
            ));
            centre_line(&hint, area, area.y + area.height.saturating_sub(2), buf);
        }
    }
}

fn render_sketch(visual: &VisualState, area: Rect, buf: &mut Buffer) {
    let scene = sketch::scene(visual.phase, visual.phase_progress);
    let camera = scene.camera;
    Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(camera.x_bounds())
        .y_bounds(camera.y_bounds())
        .paint(|ctx| {
            for stroke in &scene.strokes {
                let color = if stroke.points == SKYLINE_B {
                    Theme::accent_sketch_color()
                } else {
                    Theme::sketch_color()
                };
                for ((x1, y1), (x2, y2)) in sketch::visible_segments(stroke.points, stroke.drawn) {
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
                }
            }
        })
        .render(area, buf);
}

/// The logo travels from the centre of the hero up to its docked row,
/// tightening its letter spacing on the way.
fn render_arriving_logo(t: f64, area: Rect, buf: &mut Buffer) {
    let t = t.clamp(0.0, 1.0);
    let mid = area.y + area.height / 2;
    let y = mid - ((mid - area.y) as f64 * t).round() as u16;
    let text = if t < 0.5 { LOGO_WIDE } else { LOGO };
    let line = Line::from(Span::styled(text, Theme::logo_style()));
    centre_line(&line, area, y, buf);
}

fn centre_line(line: &Line, area: Rect, y: u16, buf: &mut Buffer) {
    let width = (line.width() as u16).min(area.width);
    let x = area.x + (area.width - width) / 2;
    buf.set_line(x, y, line, width);
}

// ─── frame (halfblock renderer) ─────────────────────────────────

/// Render an `RgbaImage` using Unicode `▀` half-blocks (2 pixels per cell).
///
/// Aspect ratio is preserved: the image is fitted inside `area` and centred.
/// Terminal cells are ~2× taller than wide, so each cell represents 1 pixel
/// wide × 2 pixels tall; the fit calculation accounts for this.
pub fn render_image_halfblocks(frame: &image::RgbaImage, area: Rect, buf: &mut Buffer) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || frame.width() == 0 || frame.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;

    let src_w = frame.width() as f64;
    let src_h = frame.height() as f64;

    // Frames are pre-fitted small, so scaling up is allowed here.
    let scale = (max_px_w / src_w).min(max_px_h / src_h);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(frame, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    let col_offset = (area.width.saturating_sub(iw as u16)) / 2;
    let row_offset = (area.height.saturating_sub(ih.div_ceil(2) as u16)) / 2;

    for row in 0..area.height - row_offset {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(area.width as u32) {
            let t = rgba.get_pixel(col, yt);
            let fg = Color::Rgb(t[0], t[1], t[2]);
            let bg = if yb < ih {
                let b = rgba.get_pixel(col, yb);
                Color::Rgb(b[0], b[1], b[2])
            } else {
                Color::Reset
            };
            let pos = Position::new(area.x + col_offset + col as u16, area.y + row_offset + row);
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animator::{Animator, AnimatorConfig};
    use crate::core::gate::RegionGeometry;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn anchored() -> RegionGeometry {
        RegionGeometry {
            top: 0.0,
            height: 20.0,
            viewport_height: 20.0,
        }
    }

    #[test]
    fn start_shows_scroll_hint() {
        let animator = Animator::timeline(AnimatorConfig::default());
        let mut view = HeroView::new(None, Locale::En).with_hint(true);
        animator.render(&mut view);

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("SCROLL TO BEGIN"));
    }

    #[test]
    fn no_hint_unless_requested() {
        let animator = Animator::timeline(AnimatorConfig::default());
        let mut view = HeroView::new(None, Locale::En);
        animator.render(&mut view);

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        assert!(!buffer_text(&buf).contains("SCROLL"));
    }

    #[test]
    fn docked_overlay_draws_logo_on_top_row() {
        let mut animator = Animator::timeline(AnimatorConfig::default());
        animator.observe(anchored(), None);
        animator.handle_input(990.0);
        let mut view = HeroView::new(None, Locale::En);
        animator.render(&mut view);
        assert!(view.overlay);

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        let top: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("YIGO"));
        assert!(!buffer_text(&buf).contains("SCROLL"));
    }

    #[test]
    fn frames_draw_with_halfblocks() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]));
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        render_image_halfblocks(&img, area, &mut buf);
        // 4x4 fits as 4 columns x 2 rows, centred horizontally.
        let cell = &buf[(3, 1)];
        assert_eq!(cell.symbol(), "▀");
        assert!(matches!(cell.fg, Color::Rgb(r, _, _) if r > 150));
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(7, 1)].symbol(), " ");
    }
}
