//! Floating header row: page title on the left, the docked logo in the
//! middle once the hero has revealed it, and the call / language buttons on
//! the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::locale::{tr, Locale, Location};

use super::hero::LOGO;
use super::theme::Theme;

fn switch_label(locale: Locale) -> String {
    format!(" {} ", locale.switch_label())
}

/// Where the language switch sits inside `header`.
pub fn switch_area(header: Rect, locale: Locale) -> Rect {
    let width = (Span::raw(switch_label(locale)).width() as u16).min(header.width);
    Rect::new(header.x + header.width - width, header.y, width, header.height.min(1))
}

pub struct HeaderView<'a> {
    pub location: &'a Location,
    pub logo_visible: bool,
}

impl Widget for HeaderView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let locale = self.location.locale;
        buf.set_style(area, Theme::header_style());

        let title = Line::from(Span::styled(
            format!(" {}", tr(locale, self.location.route.title_key())),
            Theme::header_style(),
        ));
        buf.set_line(area.x, area.y, &title, area.width);

        let switch = switch_area(area, locale);
        let call = Line::from(Span::styled(
            format!("{}  ", tr(locale, "header.request_call")),
            Theme::header_style(),
        ));
        let call_width = call.width() as u16;
        if area.width > call_width + switch.width + title.width() as u16 {
            buf.set_line(switch.x - call_width, area.y, &call, call_width);
        }
        buf.set_line(
            switch.x,
            switch.y,
            &Line::from(Span::styled(switch_label(locale), Theme::switch_style())),
            switch.width,
        );

        if self.logo_visible {
            let logo = Line::from(Span::styled(LOGO, Theme::logo_style()));
            let w = logo.width() as u16;
            if area.width > w {
                buf.set_line(area.x + (area.width - w) / 2, area.y, &logo, w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn switch_names_other_language() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        let loc = Location::parse("/en");
        HeaderView { location: &loc, logo_visible: false }.render(area, &mut buf);
        let text = row(&buf, 80);
        assert!(text.contains("中"));
        assert!(text.contains("REQUEST A CALL"));
        assert!(!text.contains("YIGO"));

        // " 中文 " is six columns wide.
        assert_eq!(switch_area(area, Locale::En), Rect::new(74, 0, 6, 1));
        assert_eq!(switch_area(area, Locale::Zh), Rect::new(76, 0, 4, 1));
    }

    #[test]
    fn logo_follows_signal() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        let loc = Location::parse("/zh");
        HeaderView { location: &loc, logo_visible: true }.render(area, &mut buf);
        assert!(row(&buf, 80).contains("YIGO"));
    }
}
