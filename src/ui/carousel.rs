//! Featured-projects carousel widget.
//!
//! Cards are laid out from the slot styles in [`crate::core::carousel`]:
//! scale sets the card size, the horizontal offset sets its position and
//! cards are painted back to front by depth so nearer cards overlap.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::carousel::{card_style, Carousel};
use crate::core::content::PROJECTS;
use crate::core::locale::{tr, Locale};

use super::theme::Theme;

/// Offset, in style units, of the first neighbour from the centre.
const NEIGHBOUR_SHIFT: f64 = 190.0;

pub struct CarouselView<'a> {
    pub carousel: &'a Carousel,
    pub locale: Locale,
    pub now: Instant,
}

/// Screen rectangle of one card, or `None` when hidden.
fn card_rect(area: Rect, position: i32) -> Option<(Rect, u8)> {
    let style = card_style(position);
    if style.opacity <= 0.0 || style.scale <= 0.0 {
        return None;
    }
    let base_w = (area.width as f64 * 0.3).clamp(12.0, 40.0);
    let w = (base_w * style.scale).round() as u16;
    let h = ((area.height as f64) * style.scale).round() as u16;
    let centre = area.x as f64
        + area.width as f64 / 2.0
        + style.translate_x / NEIGHBOUR_SHIFT * base_w * 0.7;
    let left = (centre - w as f64 / 2.0).round();
    let top = area.y + (area.height.saturating_sub(h)) / 2;

    // Clip to the area horizontally.
    let x0 = left.max(area.x as f64) as u16;
    let x1 = (left + w as f64).min((area.x + area.width) as f64) as u16;
    if x1 <= x0 || h == 0 {
        return None;
    }
    Some((Rect::new(x0, top, x1 - x0, h), style.z_index))
}

impl Widget for CarouselView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 {
            return;
        }
        let title = Line::from(Span::styled(
            tr(self.locale, "projects.title"),
            Theme::heading_style(),
        ))
        .centered();
        title.render(Rect::new(area.x, area.y, area.width, 1), buf);

        let stage = Rect::new(area.x, area.y + 2, area.width, area.height - 3);
        let mut cards: Vec<_> = self
            .carousel
            .visible_slots()
            .into_iter()
            .filter_map(|slot| {
                let index = slot.index?;
                let (rect, depth) = card_rect(stage, slot.position)?;
                Some((rect, depth, index))
            })
            .collect();
        cards.sort_by_key(|(_, depth, _)| *depth);

        let settle = self.carousel.slide_progress(self.now);
        for (rect, depth, index) in cards {
            let centre = index == self.carousel.current();
            let style = if centre && settle < 1.0 {
                Theme::card_style(60)
            } else {
                Theme::card_style(depth)
            };
            Clear.render(rect, buf);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(if centre { BorderType::Double } else { BorderType::Rounded })
                .border_style(style);
            let inner = block.inner(rect);
            block.render(rect, buf);

            let lines = vec![
                Line::from(Span::styled(
                    format!("{:02}/{:02}", index + 1, self.carousel.len()),
                    Theme::muted_style(),
                )),
                Line::raw(""),
                Line::from(Span::styled(PROJECTS[index], style)),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .style(Style::default())
                .render(inner, buf);
        }

        let hint = Line::from(Span::styled("←  →", Theme::muted_style())).centered();
        hint.render(Rect::new(area.x, area.y + area.height - 1, area.width, 1), buf);
    }
}
