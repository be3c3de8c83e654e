//! Sitemap documents per the sitemaps.org 0.9 protocol.
//!
//! The schema is small and fixed, so documents are plain formatted strings.
//! Every value is XML-escaped; generation cannot fail.

use std::fmt;

use chrono::{NaiveDate, Utc};
use quick_xml::escape::escape;

use crate::pages::SitePage;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Child sitemaps listed by the sitemap index, in order.
pub const CHILD_SITEMAPS: [&str; 3] = ["sitemap_core_pages.xml", "sitemap_products.xml", "sitemap_posts.xml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` of a urlset.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub changefreq: ChangeFreq,
    /// Between 0.0 and 1.0, written with one decimal.
    pub priority: f32,
}

impl UrlEntry {
    pub fn new(loc: String, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            loc,
            changefreq,
            priority: priority.clamp(0.0, 1.0),
        }
    }
}

/// Joins the site origin and an absolute path (`/about`).
pub fn absolute_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url.trim_end_matches('/'), path)
}

/// `YYYY-MM-DD`, the form used for `<lastmod>`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// The sitemap index pointing at the core pages, products and posts sitemaps.
pub fn sitemap_index(site_url: &str, date: NaiveDate) -> String {
    let lastmod = format_date(date);
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    for child in CHILD_SITEMAPS {
        let loc = absolute_url(site_url, &format!("/{}", child));
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(loc.as_str())));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

/// A urlset with one `<url>` per entry, all stamped with the same `<lastmod>`.
/// An empty slice still yields a well-formed document.
pub fn urlset(entries: &[UrlEntry], date: NaiveDate) -> String {
    let lastmod = format_date(date);
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(entry.loc.as_str())));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Single-URL sitemap describing one page of the site.
pub fn page_sitemap(site_url: &str, page: &SitePage, date: NaiveDate) -> String {
    urlset(&[page.url_entry(site_url)], date)
}

/// One `<url>` per page of the core catalogue.
pub fn core_pages_sitemap(site_url: &str, pages: &[SitePage], date: NaiveDate) -> String {
    let entries: Vec<UrlEntry> = pages.iter().map(|p| p.url_entry(site_url)).collect();
    urlset(&entries, date)
}
