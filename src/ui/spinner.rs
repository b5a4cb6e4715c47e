//! Loading indicator — a small spinner + label rendered in the bottom-right
//! corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown over the hero while its frames decode.
pub struct LoadingIndicator<'a> {
    /// Whether to show the indicator at all.
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
    pub label: &'a str,
}

impl Widget for LoadingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let line = Line::from(Span::styled(
            format!(" {frame} {} ", self.label),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        let label_width = line.width() as u16;
        if area.width < label_width + 2 {
            return;
        }
        let x = area.x + area.width.saturating_sub(label_width + 1);
        let y = area.y + area.height - 1;
        buf.set_line(x, y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_in_bottom_right_corner() {
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        LoadingIndicator {
            visible: true,
            tick: 1,
            label: "loading",
        }
        .render(area, &mut buf);
        // " ⠙ loading " is 11 columns wide, one column from the edge.
        assert_eq!(buf[(19, 3)].symbol(), "⠙");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn hidden_draws_nothing() {
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        LoadingIndicator {
            visible: false,
            tick: 0,
            label: "loading",
        }
        .render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
