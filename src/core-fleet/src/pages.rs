//! Catalogue of the site's core public pages.

use crate::sitemap::{ChangeFreq, UrlEntry, absolute_url};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitePage {
    /// Short name, also the file stem of the page's own sitemap (`about` -> `/about.xml`).
    /// Empty for the home page.
    pub name: &'static str,
    pub path: &'static str,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitePage {
    pub fn is_home(&self) -> bool {
        self.name.is_empty()
    }

    pub fn url_entry(&self, site_url: &str) -> UrlEntry {
        UrlEntry::new(absolute_url(site_url, self.path), self.changefreq, self.priority)
    }
}

pub const CORE_PAGES: &[SitePage] = &[
    SitePage {
        name: "",
        path: "/",
        changefreq: ChangeFreq::Daily,
        priority: 1.0,
    },
    SitePage {
        name: "about",
        path: "/about",
        changefreq: ChangeFreq::Monthly,
        priority: 0.8,
    },
    SitePage {
        name: "fleet",
        path: "/fleet",
        changefreq: ChangeFreq::Weekly,
        priority: 0.9,
    },
    SitePage {
        name: "services",
        path: "/services",
        changefreq: ChangeFreq::Monthly,
        priority: 0.8,
    },
    SitePage {
        name: "blog",
        path: "/blog",
        changefreq: ChangeFreq::Weekly,
        priority: 0.7,
    },
    SitePage {
        name: "contact",
        path: "/contact",
        changefreq: ChangeFreq::Monthly,
        priority: 0.7,
    },
];

/// Looks up a non-home page by name.
pub fn find_page(name: &str) -> Option<&'static SitePage> {
    CORE_PAGES.iter().find(|p| !p.is_home() && p.name == name)
}
