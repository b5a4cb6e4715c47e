//! Locale-prefixed routing and translation lookup.
//!
//! Paths look like `/en/projects?ref=x`.  The first segment selects the
//! locale when it is a known two-letter code; the rest selects the route.
//! Lookups missing from a locale fall back to English.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }

    /// Label of the switcher button: names the *other* language.
    pub fn switch_label(self) -> &'static str {
        match self {
            Locale::En => "中文",
            Locale::Zh => "EN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    About,
    Projects,
    News,
    Careers,
    Contact,
}

impl Route {
    pub const ALL: &[Route] = &[
        Route::Home,
        Route::About,
        Route::Projects,
        Route::News,
        Route::Careers,
        Route::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Route::Home => "",
            Route::About => "about",
            Route::Projects => "projects",
            Route::News => "news",
            Route::Careers => "careers",
            Route::Contact => "contact",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Route::ALL.iter().copied().find(|r| r.slug() == slug)
    }

    pub fn title_key(self) -> &'static str {
        match self {
            Route::Home => "nav.home",
            Route::About => "nav.about",
            Route::Projects => "nav.projects",
            Route::News => "nav.news",
            Route::Careers => "nav.careers",
            Route::Contact => "nav.contact",
        }
    }

    pub fn next(self) -> Self {
        let idx = Route::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Route::ALL[(idx + 1) % Route::ALL.len()]
    }
}

/// A parsed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub locale: Locale,
    pub route: Route,
    /// Path segments after the locale (route slug and anything deeper).
    pub segments: Vec<String>,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Parse `path`.  Unknown or missing locale codes fall back to English
    /// and are kept as ordinary segments; unknown routes map to home.
    pub fn parse(path: &str) -> Self {
        let (path, search) = match path.find('?') {
            Some(i) => (&path[..i], path[i..].to_string()),
            None => (path, String::new()),
        };
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let locale = match segments.first().and_then(|s| Locale::from_code(s)) {
            Some(locale) => {
                segments.remove(0);
                locale
            }
            None => Locale::default(),
        };
        let route = segments
            .first()
            .and_then(|s| Route::from_slug(s))
            .unwrap_or_default();

        Self {
            locale,
            route,
            segments,
            search,
        }
    }

    pub fn to_path(&self) -> String {
        let mut path = format!("/{}", self.locale.code());
        if !self.segments.is_empty() {
            path.push('/');
            path.push_str(&self.segments.join("/"));
        }
        path.push_str(&self.search);
        path
    }

    /// Same place in the other language.
    pub fn toggle_language(&self) -> Self {
        Self {
            locale: self.locale.toggled(),
            ..self.clone()
        }
    }

    pub fn with_route(&self, route: Route) -> Self {
        let segments = if route == Route::Home {
            Vec::new()
        } else {
            vec![route.slug().to_string()]
        };
        Self {
            locale: self.locale,
            route,
            segments,
            search: self.search.clone(),
        }
    }
}

// ───────────────────────────────────────── translations ──────

const EN: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.about", "About"),
    ("nav.projects", "Projects"),
    ("nav.news", "News & Media"),
    ("nav.careers", "Careers"),
    ("nav.contact", "Contact"),
    ("header.request_call", "REQUEST A CALL"),
    ("hero.scroll_hint", "SCROLL TO BEGIN"),
    ("hero.loading", "loading frames"),
    ("projects.title", "FEATURED PROJECTS"),
    ("journey.title", "OUR JOURNEY"),
    ("journey.years", "Years in Business"),
    ("journey.destinations", "Destinations"),
    ("journey.masterpieces", "Masterpieces"),
    ("journey.portfolio", "Portfolio"),
    ("news.title", "NEWS & MEDIA"),
    ("news.body", "Milestones, openings and press from across our developments."),
    ("about.body", "Crafting landmark residences and destinations since 2002."),
    ("careers.body", "Join a team shaping skylines from Hong Kong to Dubai."),
    ("contact.body", "Reach our sales team for viewings and enquiries."),
    ("footer.rights", "All rights reserved."),
];

const ZH: &[(&str, &str)] = &[
    ("nav.home", "首页"),
    ("nav.about", "关于我们"),
    ("nav.projects", "项目"),
    ("nav.news", "新闻与媒体"),
    ("nav.careers", "招贤纳士"),
    ("nav.contact", "联系我们"),
    ("header.request_call", "预约来电"),
    ("hero.scroll_hint", "向下滚动开始"),
    ("projects.title", "精选项目"),
    ("journey.title", "我们的历程"),
    ("journey.years", "经营年数"),
    ("journey.destinations", "目的地"),
    ("journey.masterpieces", "匠心之作"),
    ("journey.portfolio", "资产组合"),
    ("news.title", "新闻与媒体"),
    ("about.body", "自2002年起，打造地标住宅与目的地。"),
    ("footer.rights", "版权所有。"),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Zh => ZH,
    }
}

/// Translate `key`, falling back to English, then to the key itself.
pub fn tr(locale: Locale, key: &'static str) -> &'static str {
    let lookup = |t: &'static [(&'static str, &'static str)]| {
        t.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    };
    lookup(table(locale))
        .or_else(|| lookup(EN))
        .unwrap_or(key)
}
