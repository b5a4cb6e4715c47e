//! Static page sections: journey counters, news, text blocks and footer.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::core::content::Stat;
use crate::core::locale::{tr, Locale, Location};

use super::theme::Theme;

fn heading(text: &str, area: Rect, buf: &mut Buffer) {
    Line::from(Span::styled(text.to_string(), Theme::heading_style()))
        .centered()
        .render(Rect::new(area.x, area.y, area.width, area.height.min(1)), buf);
}

/// Four count-up figures in a row.
pub struct JourneyView<'a> {
    pub stats: &'a [Stat],
    pub locale: Locale,
    pub now: Instant,
}

impl Widget for JourneyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 || self.stats.is_empty() {
            return;
        }
        heading(tr(self.locale, "journey.title"), area, buf);

        let row = Rect::new(area.x, area.y + 3, area.width, area.height - 3);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, self.stats.len() as u32); self.stats.len()])
            .split(row);

        for (stat, col) in self.stats.iter().zip(columns.iter()) {
            let lines = vec![
                Line::from(Span::styled(
                    stat.counter.display_at(self.now),
                    Theme::stat_value_style(),
                ))
                .centered(),
                Line::from(Span::styled(tr(self.locale, stat.label_key), Theme::muted_style()))
                    .centered(),
            ];
            Paragraph::new(lines).render(*col, buf);
        }
    }
}

/// A heading plus a paragraph, both looked up by translation key.
pub struct TextView {
    pub title_key: &'static str,
    pub body_key: &'static str,
    pub locale: Locale,
}

impl Widget for TextView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        heading(tr(self.locale, self.title_key), area, buf);
        if area.height < 3 {
            return;
        }
        let body = Rect::new(area.x + 2, area.y + 2, area.width.saturating_sub(4), area.height - 2);
        Paragraph::new(Line::from(Span::styled(
            tr(self.locale, self.body_key),
            Theme::body_style(),
        )))
        .centered()
        .wrap(Wrap { trim: true })
        .render(body, buf);
    }
}

pub struct FooterView<'a> {
    pub location: &'a Location,
}

impl Widget for FooterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("© YIGO Group. ", Theme::muted_style()),
                Span::styled(tr(self.location.locale, "footer.rights"), Theme::muted_style()),
                Span::styled(format!("  {}", self.location.to_path()), Theme::muted_style()),
            ])
            .centered(),
        ];
        Paragraph::new(lines).render(area, buf);
    }
}
