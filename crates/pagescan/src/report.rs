//! Full page inspection report
//!
//! `inspect` walks a parsed document once and pulls out everything the
//! service reports for a fetched page: title, meta tags, links, script and
//! stylesheet references, inline JS/CSS bodies, images, plus the derived
//! structure fingerprint and ranked template suggestions.
//!
//! URLs are reported exactly as they appear in the markup; resolving them
//! against the page origin (and fetching external stylesheets) is left to
//! the caller.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::analyze::{analyze, PageStructure};
use crate::templates::{suggest, TemplateSuggestion};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());
static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static SCRIPTS: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());
static STYLESHEETS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"link[rel="stylesheet"]"#).unwrap());
static STYLES: Lazy<Selector> = Lazy::new(|| Selector::parse("style").unwrap());
static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// A `<meta>` tag's name/content pair. Either side may be absent.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetaTag {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// An `<a>` element's target and visible text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageLink {
    pub href: Option<String>,
    pub text: String,
}

/// Everything extracted from a fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub title: String,
    pub meta: Vec<MetaTag>,
    pub links: Vec<PageLink>,
    /// External script sources (`<script src=...>`).
    pub scripts: Vec<String>,
    /// External stylesheet references (`<link rel="stylesheet" href=...>`).
    pub styles: Vec<String>,
    pub images: Vec<String>,
    /// The raw page source as fetched.
    pub html: String,
    /// Concatenated inline `<script>` bodies.
    pub js: String,
    /// Concatenated inline `<style>` bodies.
    pub css: String,
    pub structure: PageStructure,
    pub suggested_templates: Vec<TemplateSuggestion>,
}

/// Parse a page and extract the full report.
pub fn inspect(html: &str) -> PageReport {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title".to_string());

    let meta = doc
        .select(&META)
        .map(|el| MetaTag {
            name: el.value().attr("name").map(str::to_string),
            content: el.value().attr("content").map(str::to_string),
        })
        .collect();

    let links = doc
        .select(&ANCHORS)
        .map(|el| PageLink {
            href: el.value().attr("href").map(str::to_string),
            text: el.text().collect::<String>(),
        })
        .collect();

    let scripts = doc
        .select(&SCRIPTS)
        .filter_map(|el| el.value().attr("src").map(str::to_string))
        .collect();

    let js = doc
        .select(&SCRIPTS)
        .filter(|el| el.value().attr("src").is_none())
        .map(|el| el.text().collect::<String>())
        .filter(|body| !body.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let styles = doc
        .select(&STYLESHEETS)
        .filter_map(|el| el.value().attr("href").map(str::to_string))
        .collect();

    let css = doc
        .select(&STYLES)
        .map(|el| el.text().collect::<String>())
        .filter(|body| !body.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let images = doc
        .select(&IMAGES)
        .filter_map(|el| el.value().attr("src").map(str::to_string))
        .collect();

    let structure = analyze(&doc);
    let suggested_templates = suggest(&structure);

    PageReport {
        title,
        meta,
        links,
        scripts,
        styles,
        images,
        html: html.to_string(),
        js,
        css,
        structure,
        suggested_templates,
    }
}
