//! Static brochure content.

use super::counter::{Counter, Easing};

pub const PROJECTS: &[&str] = &[
    "Beihu Splendor Residence",
    "Donghu International Hotel",
    "Mansion Court Hotel Apartment",
    "Moher Cloud Cape Villas",
    "YIGO26 International City – Dubai",
    "Zhongzhou One Residence",
    "Jiangxi International Business Center",
    "Minle Culture & Creative Park",
];

/// A journey statistic: translation key of its label plus its counter.
pub struct Stat {
    pub label_key: &'static str,
    pub counter: Counter,
}

pub fn journey_stats() -> Vec<Stat> {
    let stat = |label_key, end, suffix| Stat {
        label_key,
        counter: Counter::new(end, suffix).with_easing(Easing::Linear),
    };
    vec![
        stat("journey.years", 23, ""),
        stat("journey.destinations", 5, ""),
        stat("journey.masterpieces", 100, "+"),
        stat("journey.portfolio", 3, "bn"),
    ]
}
