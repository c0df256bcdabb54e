//! Design template catalog and relevance scoring
//!
//! The catalog is process-wide constant configuration: three predefined
//! design archetypes scored against a page fingerprint. Scoring is a
//! weighted feature overlap — component matches weigh 2, a style match
//! weighs 1 — and templates that score zero are dropped from the result.

use serde::{Deserialize, Serialize};

use crate::analyze::{PageStructure, StyleClass};

/// A component a design template declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Hero,
    Features,
    Testimonials,
    Sidebar,
    Charts,
    Tables,
    Gallery,
    About,
    Contact,
}

/// Static catalog entry. Never mutated at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct DesignTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub components: &'static [Component],
    pub style: StyleClass,
    pub preview_url: &'static str,
}

/// A catalog entry plus its computed relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSuggestion {
    #[serde(flatten)]
    pub template: DesignTemplate,
    pub score: u32,
}

/// The built-in design templates, in catalog order.
pub const CATALOG: &[DesignTemplate] = &[
    DesignTemplate {
        id: "landing",
        name: "Modern Landing Page",
        description: "Clean and modern landing page with hero section",
        components: &[Component::Hero, Component::Features, Component::Testimonials],
        style: StyleClass::Modern,
        preview_url: "https://images.unsplash.com/photo-1551434678-e076c223a692?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
    },
    DesignTemplate {
        id: "dashboard",
        name: "Admin Dashboard",
        description: "Professional admin interface with data visualization",
        components: &[Component::Sidebar, Component::Charts, Component::Tables],
        style: StyleClass::Professional,
        preview_url: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
    },
    DesignTemplate {
        id: "portfolio",
        name: "Creative Portfolio",
        description: "Artistic portfolio layout with gallery",
        components: &[Component::Gallery, Component::About, Component::Contact],
        style: StyleClass::Creative,
        preview_url: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&q=80",
    },
];

/// Score the built-in catalog against a page fingerprint.
pub fn suggest(structure: &PageStructure) -> Vec<TemplateSuggestion> {
    score_catalog(structure, CATALOG)
}

/// Score an arbitrary catalog against a page fingerprint and return
/// matching templates ranked by descending score. The sort is stable, so
/// entries with equal scores keep their catalog order.
pub fn score_catalog(
    structure: &PageStructure,
    catalog: &[DesignTemplate],
) -> Vec<TemplateSuggestion> {
    let mut suggestions: Vec<TemplateSuggestion> = Vec::new();

    for template in catalog {
        let mut score = 0u32;

        if structure.has_hero && template.components.contains(&Component::Hero) {
            score += 2;
        }
        if structure.has_gallery && template.components.contains(&Component::Gallery) {
            score += 2;
        }
        if structure.has_tables && template.components.contains(&Component::Tables) {
            score += 2;
        }
        if structure.style == template.style {
            score += 1;
        }

        if score > 0 {
            suggestions.push(TemplateSuggestion {
                template: template.clone(),
                score,
            });
        }
    }

    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let ids: Vec<&str> = CATALOG.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["landing", "dashboard", "portfolio"]);
    }

    #[test]
    fn test_hero_page_ranks_landing_first() {
        let structure = PageStructure {
            has_hero: true,
            ..Default::default()
        };
        let suggestions = suggest(&structure);
        assert_eq!(suggestions[0].template.id, "landing");
        // 2 for the hero component, 1 for the modern style match
        assert_eq!(suggestions[0].score, 3);
    }

    #[test]
    fn test_zero_scores_are_excluded() {
        let structure = PageStructure {
            style: StyleClass::Creative,
            ..Default::default()
        };
        let suggestions = suggest(&structure);
        // Only the portfolio template matches (style only)
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].template.id, "portfolio");
        assert_eq!(suggestions[0].score, 1);
        assert!(suggestions.iter().all(|s| s.score >= 1));
    }

    #[test]
    fn test_ranking_is_descending() {
        let structure = PageStructure {
            has_hero: true,
            has_tables: true,
            style: StyleClass::Professional,
            ..Default::default()
        };
        let suggestions = suggest(&structure);
        // dashboard: 2 (tables) + 1 (style) = 3; landing: 2 (hero)
        assert_eq!(suggestions[0].template.id, "dashboard");
        assert_eq!(suggestions[0].score, 3);
        assert_eq!(suggestions[1].template.id, "landing");
        assert_eq!(suggestions[1].score, 2);
        let scores: Vec<u32> = suggestions.iter().map(|s| s.score).collect();
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[test]
    fn test_equal_scores_keep_catalog_order() {
        // Modern hero page with a gallery: landing 2+1=3, portfolio 2
        let structure = PageStructure {
            has_hero: true,
            has_gallery: true,
            ..Default::default()
        };
        let suggestions = suggest(&structure);
        assert_eq!(suggestions[0].template.id, "landing");
        assert_eq!(suggestions[1].template.id, "portfolio");
    }

    #[test]
    fn test_suggestion_serializes_flat() {
        let structure = PageStructure {
            has_hero: true,
            ..Default::default()
        };
        let suggestions = suggest(&structure);
        let json = serde_json::to_value(&suggestions[0]).unwrap();
        assert_eq!(json["id"], "landing");
        assert_eq!(json["score"], 3);
        assert_eq!(json["style"], "modern");
    }
}
