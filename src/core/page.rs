//! Page scroll model — stacked sections, a scroll offset, and the header's
//! hide-on-scroll behaviour.
//!
//! All units are terminal rows.  The hero section is always exactly one
//! viewport tall so it can pin to the top while its animation runs.

use super::gate::{Direction, RegionGeometry};
use super::locale::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Projects,
    Journey,
    News,
    /// A plain text block keyed by a translation key.
    Text(&'static str),
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub height: u16,
}

/// Heights of the fixed-size sections.
const PROJECTS_ROWS: u16 = 16;
const JOURNEY_ROWS: u16 = 9;
const NEWS_ROWS: u16 = 7;
const TEXT_ROWS: u16 = 7;
const FOOTER_ROWS: u16 = 3;

fn section(kind: SectionKind, viewport_rows: u16) -> Section {
    let height = match kind {
        SectionKind::Hero => viewport_rows.max(1),
        SectionKind::Projects => PROJECTS_ROWS,
        SectionKind::Journey => JOURNEY_ROWS,
        SectionKind::News => NEWS_ROWS,
        SectionKind::Text(_) => TEXT_ROWS,
        SectionKind::Footer => FOOTER_ROWS,
    };
    Section { kind, height }
}

/// Which sections make up each route, top to bottom.
pub fn sections_for(route: Route) -> Vec<SectionKind> {
    use SectionKind::*;
    match route {
        Route::Home => vec![Hero, Projects, Journey, News, Footer],
        Route::About => vec![Text("about.body"), Journey, Footer],
        Route::Projects => vec![Projects, Footer],
        Route::News => vec![News, Footer],
        Route::Careers => vec![Text("careers.body"), Footer],
        Route::Contact => vec![Text("contact.body"), Footer],
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    sections: Vec<Section>,
    offset: u32,
    viewport_width: u16,
    viewport_height: u16,
}

impl Page {
    pub fn new(route: Route, viewport_width: u16, viewport_height: u16) -> Self {
        let sections = sections_for(route)
            .into_iter()
            .map(|k| section(k, viewport_height))
            .collect();
        Self {
            sections,
            offset: 0,
            viewport_width,
            viewport_height,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn total_height(&self) -> u32 {
        self.sections.iter().map(|s| s.height as u32).sum()
    }

    pub fn max_offset(&self) -> u32 {
        self.total_height()
            .saturating_sub(self.viewport_height as u32)
    }

    pub fn has(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }

    /// Page-space row where `kind` starts.
    pub fn section_top(&self, kind: SectionKind) -> Option<u32> {
        let mut top = 0u32;
        for s in &self.sections {
            if s.kind == kind {
                return Some(top);
            }
            top += s.height as u32;
        }
        None
    }

    fn section_height(&self, kind: SectionKind) -> Option<u16> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.height)
    }

    /// Position of `kind` relative to the viewport top.
    pub fn region_geometry(&self, kind: SectionKind) -> Option<RegionGeometry> {
        let top = self.section_top(kind)?;
        let height = self.section_height(kind)?;
        Some(RegionGeometry {
            top: top as f64 - self.offset as f64,
            height: height as f64,
            viewport_height: self.viewport_height as f64,
        })
    }

    /// Share of the section's rows that are on screen, `0..=1`.
    pub fn visible_fraction(&self, kind: SectionKind) -> f64 {
        let Some(g) = self.region_geometry(kind) else {
            return 0.0;
        };
        if g.height <= 0.0 {
            return 0.0;
        }
        let visible = g.bottom().min(g.viewport_height) - g.top.max(0.0);
        (visible.max(0.0) / g.height).clamp(0.0, 1.0)
    }

    /// Scroll by `rows` (positive = down).  Returns the direction actually
    /// moved, `None` when already at the corresponding end.
    pub fn scroll_by(&mut self, rows: i32) -> Option<Direction> {
        let before = self.offset;
        let target = (self.offset as i64 + rows as i64).clamp(0, self.max_offset() as i64);
        self.offset = target as u32;
        match self.offset.cmp(&before) {
            std::cmp::Ordering::Greater => Some(Direction::Forward),
            std::cmp::Ordering::Less => Some(Direction::Backward),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// New viewport: the hero follows the viewport height, the offset is
    /// clamped to the new extent.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        for s in &mut self.sections {
            if s.kind == SectionKind::Hero {
                s.height = height.max(1);
            }
        }
        self.offset = self.offset.min(self.max_offset());
    }
}

// ───────────────────────────────────────── header ────────────

/// Hides the header while scrolling down past a threshold, shows it again
/// on any upward scroll.
#[derive(Debug, Clone)]
pub struct HeaderVisibility {
    visible: bool,
    last_offset: u32,
    threshold: u32,
}

impl HeaderVisibility {
    pub fn new(threshold: u32) -> Self {
        Self {
            visible: true,
            last_offset: 0,
            threshold,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_scroll(&mut self, offset: u32) {
        self.visible = !(offset > self.last_offset && offset > self.threshold);
        self.last_offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_geometry_and_extent() {
        let page = Page::new(Route::Home, 100, 30);
        assert_eq!(page.section_top(SectionKind::Hero), Some(0));
        assert_eq!(page.section_top(SectionKind::Projects), Some(30));
        assert_eq!(page.total_height(), 30 + 16 + 9 + 7 + 3);
        assert_eq!(page.max_offset(), 35);

        let hero = page.region_geometry(SectionKind::Hero).unwrap();
        assert_eq!(hero.top, 0.0);
        assert!(hero.in_anchor_band(1.0));
    }

    #[test]
    fn scrolling_clamps_and_reports_direction() {
        let mut page = Page::new(Route::Home, 100, 30);
        assert_eq!(page.scroll_by(-3), None);
        assert_eq!(page.scroll_by(10), Some(super::Direction::Forward));
        assert_eq!(page.offset(), 10);
        assert_eq!(page.scroll_by(1000), Some(super::Direction::Forward));
        assert_eq!(page.offset(), page.max_offset());
        assert_eq!(page.scroll_by(1), None);
        assert_eq!(page.scroll_by(-5), Some(super::Direction::Backward));

        let hero = page.region_geometry(SectionKind::Hero).unwrap();
        assert_eq!(hero.top, -(page.offset() as f64));
    }

    #[test]
    fn visible_fraction_tracks_offset() {
        let mut page = Page::new(Route::Home, 100, 30);
        assert_eq!(page.visible_fraction(SectionKind::Journey), 0.0);
        page.scroll_by(35);
        // Journey spans rows 46..55, viewport now 35..65.
        assert_eq!(page.visible_fraction(SectionKind::Journey), 1.0);
        assert_eq!(page.visible_fraction(SectionKind::Hero), 0.0);
    }

    #[test]
    fn resize_keeps_hero_one_viewport_tall() {
        let mut page = Page::new(Route::Home, 100, 30);
        page.scroll_by(1000);
        page.resize(100, 50);
        assert_eq!(page.region_geometry(SectionKind::Hero).unwrap().height, 50.0);
        assert!(page.offset() <= page.max_offset());
    }

    #[test]
    fn routes_without_hero() {
        let page = Page::new(Route::Projects, 100, 30);
        assert!(!page.has(SectionKind::Hero));
        assert!(page.region_geometry(SectionKind::Hero).is_none());
    }

    #[test]
    fn header_hides_on_scroll_down_past_threshold() {
        let mut header = HeaderVisibility::new(3);
        header.on_scroll(2);
        assert!(header.is_visible());
        header.on_scroll(6);
        assert!(!header.is_visible());
        header.on_scroll(8);
        assert!(!header.is_visible());
        header.on_scroll(7);
        assert!(header.is_visible());
    }
}
