//! Structural fingerprint of a parsed page
//!
//! The analyzer answers a handful of yes/no questions about a document
//! (is there a hero section? a gallery? forms? tables? card layouts?) and
//! classifies its overall style from the CSS class names in use. The
//! checks are deliberately plain substring tests over `class` attributes —
//! no pattern engine involved.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

static SECTIONS: Lazy<Selector> = Lazy::new(|| Selector::parse("section").unwrap());
static DIVS: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static FORMS: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static TABLES: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ANY: Lazy<Selector> = Lazy::new(|| Selector::parse("*").unwrap());

/// Coarse style classification derived from class-name heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleClass {
    #[default]
    Modern,
    Professional,
    Creative,
}

/// Structural fingerprint of a page, derived once per fetched document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageStructure {
    pub has_hero: bool,
    pub has_gallery: bool,
    pub has_forms: bool,
    pub has_tables: bool,
    pub has_cards: bool,
    pub style: StyleClass,
}

/// Case-sensitive substring test over an element's `class` attribute.
/// Elements without a `class` attribute never match.
fn class_contains(element: ElementRef<'_>, needles: &[&str]) -> bool {
    match element.value().attr("class") {
        Some(class) => needles.iter().any(|needle| class.contains(needle)),
        None => false,
    }
}

fn any_class_contains(doc: &Html, selector: &Selector, needles: &[&str]) -> bool {
    doc.select(selector).any(|el| class_contains(el, needles))
}

/// Derive the structural fingerprint of a parsed document.
///
/// Style precedence: `professional` (bootstrap/material class names) is
/// checked before `creative` (creative/artistic); the first match wins and
/// the default is `modern`.
pub fn analyze(doc: &Html) -> PageStructure {
    let style = if any_class_contains(doc, &ANY, &["bootstrap", "material"]) {
        StyleClass::Professional
    } else if any_class_contains(doc, &ANY, &["creative", "artistic"]) {
        StyleClass::Creative
    } else {
        StyleClass::Modern
    };

    PageStructure {
        has_hero: any_class_contains(doc, &SECTIONS, &["hero", "banner"]),
        has_gallery: any_class_contains(doc, &DIVS, &["gallery", "portfolio"]),
        has_forms: doc.select(&FORMS).next().is_some(),
        has_tables: doc.select(&TABLES).next().is_some(),
        has_cards: any_class_contains(doc, &DIVS, &["card"]),
        style,
    }
}
