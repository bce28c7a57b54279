// ABOUTME: Pure projection from an analysis report to display structs.
// ABOUTME: Encodes the omit-if-absent rules so templates stay dumb.

use crate::report::{
    priority_badge, severity_badge, AnalysisReport, CopyPack, ListingSnapshot, Scores,
};

/// Everything the copywriter result panel needs, precomputed. Sections whose
/// source key was absent or empty are `None`/empty here and omitted by the
/// template.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub listing: Option<ListingView>,
    pub scores: Vec<ScoreCell>,
    pub summary: Option<String>,
    pub issues: Vec<IssueView>,
    pub copy_pack: Option<CopyPackView>,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ListingView {
    pub info_rows: Vec<InfoRow>,
    pub title: Option<String>,
    pub images: Vec<String>,
    pub image_count: usize,
    pub bullets: Vec<String>,
    pub description: Option<String>,
    pub a_plus: Option<APlusView>,
    pub category_path: Option<String>,
    pub bsr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct APlusView {
    pub text: Option<String>,
    pub images: Vec<APlusImage>,
    pub module_count: usize,
}

#[derive(Debug, Clone)]
pub struct APlusImage {
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScoreCell {
    pub label: &'static str,
    pub value: String,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct IssueView {
    pub severity: String,
    pub badge: &'static str,
    pub impact: Option<String>,
    pub description: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TitleVariantView {
    pub label: &'static str,
    pub accent: &'static str,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TermBucket {
    pub label: &'static str,
    pub accent: &'static str,
    pub terms: String,
}

#[derive(Debug, Clone)]
pub struct APlusModuleView {
    pub module_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageScriptView {
    pub heading: String,
    pub visual_elements: Option<String>,
    pub text_overlay: Option<String>,
    pub must_include: Option<String>,
    pub copy_text: String,
}

#[derive(Debug, Clone)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct ComplianceView {
    pub risk: Option<String>,
    pub safe_wording: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CopyPackView {
    pub title_variants: Vec<TitleVariantView>,
    pub bullets: Vec<String>,
    pub bullets_joined: String,
    pub description: Option<String>,
    pub search_terms: Vec<TermBucket>,
    pub a_plus: Vec<APlusModuleView>,
    pub image_scripts: Vec<ImageScriptView>,
    pub faq: Vec<FaqView>,
    pub faq_joined: String,
    pub compliance: Vec<ComplianceView>,
}

#[derive(Debug, Clone)]
pub struct ActionView {
    pub number: usize,
    pub priority: Option<String>,
    pub badge: &'static str,
    pub action: Option<String>,
    pub impact: Option<String>,
}

impl ReportView {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            listing: report.listing.as_ref().and_then(listing_view),
            scores: report.scores.as_ref().map(score_cells).unwrap_or_default(),
            summary: non_empty(report.summary.clone()),
            issues: report
                .issues
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|issue| IssueView {
                    severity: issue.severity.clone().unwrap_or_else(|| "unknown".to_string()),
                    badge: severity_badge(issue.severity.as_deref()),
                    impact: issue
                        .impact
                        .as_deref()
                        .filter(|tags| !tags.is_empty())
                        .map(|tags| tags.join(", ")),
                    description: non_empty(issue.description.clone()),
                    recommendation: non_empty(issue.recommendation.clone()),
                })
                .collect(),
            copy_pack: report.copy_pack.as_ref().and_then(copy_pack_view),
            actions: report
                .action_plan
                .as_deref()
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(idx, action)| ActionView {
                    number: idx + 1,
                    priority: non_empty(action.priority.clone()),
                    badge: priority_badge(action.priority.as_deref()),
                    action: non_empty(action.action.clone()),
                    impact: non_empty(action.impact.clone()),
                })
                .collect(),
        }
    }
}

/// Format a score for display. Whole numbers drop the fraction, so 72.0
/// renders "72" and a literal 0 renders "0".
fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn score_cells(scores: &Scores) -> Vec<ScoreCell> {
    let fields = [
        ("Overall", scores.overall_score, "text-blue-600"),
        ("CTR", scores.ctr_score, "text-green-600"),
        ("CVR", scores.cvr_score, "text-purple-600"),
        ("SEO", scores.seo_score, "text-orange-600"),
        ("Compliance", scores.compliance_score, "text-red-600"),
    ];
    fields
        .into_iter()
        .filter_map(|(label, value, color)| {
            value.map(|v| ScoreCell {
                label,
                value: format_score(v),
                color,
            })
        })
        .collect()
}

fn listing_view(listing: &ListingSnapshot) -> Option<ListingView> {
    let mut info_rows = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = non_empty(value) {
            info_rows.push(InfoRow { label, value });
        }
    };

    push("ASIN", listing.asin.clone());
    push("Brand", listing.brand.clone());
    push("Manufacturer", listing.manufacturer.clone());
    push("Model", listing.model.clone());
    push("Price", listing.price.clone());
    push(
        "Rating",
        listing.rating.map(|rating| match listing.review_count {
            Some(count) => format!("{rating} \u{2605} ({count} reviews)"),
            None => format!("{rating} \u{2605}"),
        }),
    );
    push("Color", listing.color.clone());
    push("Style", listing.style.clone());
    push("Material", listing.material.clone());
    push(
        "Package quantity",
        listing.package_quantity.map(|qty| qty.to_string()),
    );

    let images = listing.images.clone().unwrap_or_default();
    let image_count = listing
        .images_count
        .map(|count| count as usize)
        .unwrap_or(images.len());

    let a_plus = if listing.has_a_plus == Some(true) {
        let alt_texts = listing.a_plus_alt_texts.clone().unwrap_or_default();
        let images: Vec<APlusImage> = listing
            .a_plus_images
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(idx, url)| APlusImage {
                url: url.clone(),
                alt: alt_texts.get(idx).cloned(),
            })
            .collect();
        Some(APlusView {
            text: non_empty(listing.a_plus_text.clone()),
            images,
            module_count: listing
                .a_plus_blocks
                .as_deref()
                .map(|blocks| blocks.len())
                .unwrap_or(0),
        })
    } else {
        None
    };

    let view = ListingView {
        info_rows,
        title: non_empty(listing.title.clone()),
        images,
        image_count,
        bullets: listing.bullets.clone().unwrap_or_default(),
        description: non_empty(listing.description.clone()),
        a_plus,
        category_path: non_empty(listing.category_path.clone()),
        bsr: listing.bsr.map(|rank| match &listing.bsr_category {
            Some(category) => format!("#{rank} in {category}"),
            None => format!("#{rank}"),
        }),
    };

    let empty = view.info_rows.is_empty()
        && view.title.is_none()
        && view.images.is_empty()
        && view.bullets.is_empty()
        && view.description.is_none()
        && view.a_plus.is_none()
        && view.category_path.is_none()
        && view.bsr.is_none();
    if empty {
        None
    } else {
        Some(view)
    }
}

fn copy_pack_view(pack: &CopyPack) -> Option<CopyPackView> {
    let mut title_variants = Vec::new();
    if let Some(variants) = &pack.title_variants {
        let tones = [
            ("Conservative", "border-blue-400 text-blue-600", &variants.conservative),
            ("Balanced", "border-green-400 text-green-600", &variants.balanced),
            ("Aggressive", "border-orange-400 text-orange-600", &variants.aggressive),
        ];
        for (label, accent, text) in tones {
            if let Some(text) = non_empty(text.clone()) {
                title_variants.push(TitleVariantView { label, accent, text });
            }
        }
    }

    let bullets = pack.bullets.clone().unwrap_or_default();
    let bullets_joined = bullets.join("\n");

    let mut search_terms = Vec::new();
    if let Some(terms) = &pack.search_terms {
        let buckets = [
            ("Core", "text-blue-600", &terms.core),
            ("Long-tail", "text-green-600", &terms.long_tail),
            ("Misspellings", "text-purple-600", &terms.misspell),
            ("Negatives", "text-red-600", &terms.negatives),
        ];
        for (label, accent, terms) in buckets {
            if let Some(terms) = terms.as_deref().filter(|t| !t.is_empty()) {
                search_terms.push(TermBucket {
                    label,
                    accent,
                    terms: terms.join(", "),
                });
            }
        }
    }

    let a_plus: Vec<APlusModuleView> = pack
        .a_plus
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|module| APlusModuleView {
            module_type: non_empty(module.module_type.clone()),
            title: non_empty(module.title.clone()),
            content: non_empty(module.content.clone()),
            notes: non_empty(module.notes.clone()),
        })
        .collect();

    let image_scripts: Vec<ImageScriptView> = pack
        .image_script
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, script)| {
            let number = script.image_number.unwrap_or(idx as u64 + 1);
            let theme = script.theme.clone().unwrap_or_default();
            let heading = if theme.is_empty() {
                format!("Image {number}")
            } else {
                format!("Image {number}: {theme}")
            };
            let must_include = script
                .must_include
                .as_deref()
                .filter(|items| !items.is_empty())
                .map(|items| items.join(", "));
            let copy_text = format!(
                "Image {number}\nTheme: {theme}\nVisual: {}\nOverlay: {}\nMust include: {}",
                script.visual_elements.as_deref().unwrap_or(""),
                script.text_overlay.as_deref().unwrap_or(""),
                must_include.as_deref().unwrap_or(""),
            );
            ImageScriptView {
                heading,
                visual_elements: non_empty(script.visual_elements.clone()),
                text_overlay: non_empty(script.text_overlay.clone()),
                must_include,
                copy_text,
            }
        })
        .collect();

    let faq: Vec<FaqView> = pack
        .faq
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|entry| entry.question.is_some() || entry.answer.is_some())
        .map(|entry| FaqView {
            question: entry.question.clone().unwrap_or_default(),
            answer: entry.answer.clone().unwrap_or_default(),
        })
        .collect();
    let faq_joined = faq
        .iter()
        .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    let compliance: Vec<ComplianceView> = pack
        .compliance_notes
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|note| note.risk.is_some() || note.safe_wording.is_some())
        .map(|note| ComplianceView {
            risk: non_empty(note.risk.clone()),
            safe_wording: non_empty(note.safe_wording.clone()),
        })
        .collect();

    let view = CopyPackView {
        title_variants,
        bullets,
        bullets_joined,
        description: non_empty(pack.description.clone()),
        search_terms,
        a_plus,
        image_scripts,
        faq,
        faq_joined,
        compliance,
    };

    let empty = view.title_variants.is_empty()
        && view.bullets.is_empty()
        && view.description.is_none()
        && view.search_terms.is_empty()
        && view.a_plus.is_empty()
        && view.image_scripts.is_empty()
        && view.faq.is_empty()
        && view.compliance.is_empty();
    if empty {
        None
    } else {
        Some(view)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::normalize;
    use serde_json::json;

    fn view_of(value: serde_json::Value) -> ReportView {
        ReportView::from_report(&normalize(&value).unwrap())
    }

    #[test]
    fn test_zero_score_renders_as_zero() {
        let view = view_of(json!({"scores": {"overall_score": 0}}));
        assert_eq!(view.scores.len(), 1);
        assert_eq!(view.scores[0].label, "Overall");
        assert_eq!(view.scores[0].value, "0");
    }

    #[test]
    fn test_whole_scores_drop_fraction() {
        let view = view_of(json!({"scores": {"overall_score": 72.0, "seo_score": 61.5}}));
        let values: Vec<&str> = view.scores.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["72", "61.5"]);
    }

    #[test]
    fn test_absent_scores_section_is_empty() {
        let view = view_of(json!({"summary": "ok"}));
        assert!(view.scores.is_empty());
    }

    #[test]
    fn test_empty_issues_list_is_omitted() {
        let view = view_of(json!({"issues": []}));
        assert!(view.issues.is_empty());
    }

    #[test]
    fn test_unknown_severity_gets_neutral_badge() {
        let view = view_of(json!({"issues": [{"severity": "critical", "description": "x"}]}));
        assert_eq!(view.issues.len(), 1);
        assert_eq!(view.issues[0].severity, "critical");
        assert_eq!(view.issues[0].badge, "bg-gray-100 text-gray-800");
    }

    #[test]
    fn test_missing_severity_labelled_unknown() {
        let view = view_of(json!({"issues": [{"description": "x"}]}));
        assert_eq!(view.issues[0].severity, "unknown");
        assert_eq!(view.issues[0].badge, "bg-gray-100 text-gray-800");
    }

    #[test]
    fn test_empty_listing_is_omitted() {
        let view = view_of(json!({"listing": {}}));
        assert!(view.listing.is_none());
    }

    #[test]
    fn test_listing_rows_and_bsr() {
        let view = view_of(json!({"listing": {
            "asin": "B08N5WRWNW",
            "brand": "Acme",
            "rating": 4.5,
            "review_count": 321,
            "bsr": 1200,
            "bsr_category": "Air Purifiers"
        }}));
        let listing = view.listing.unwrap();
        assert!(listing
            .info_rows
            .iter()
            .any(|row| row.label == "Rating" && row.value == "4.5 \u{2605} (321 reviews)"));
        assert_eq!(listing.bsr.as_deref(), Some("#1200 in Air Purifiers"));
    }

    #[test]
    fn test_a_plus_only_when_flagged() {
        let view = view_of(json!({"listing": {
            "title": "t",
            "a_plus_text": "modules",
            "a_plus_images": ["u"]
        }}));
        assert!(view.listing.unwrap().a_plus.is_none());

        let view = view_of(json!({"listing": {
            "has_a_plus": true,
            "a_plus_images": ["u1", "u2"],
            "a_plus_alt_texts": ["first"]
        }}));
        let a_plus = view.listing.unwrap().a_plus.unwrap();
        assert_eq!(a_plus.images.len(), 2);
        assert_eq!(a_plus.images[0].alt.as_deref(), Some("first"));
        assert!(a_plus.images[1].alt.is_none());
    }

    #[test]
    fn test_empty_copy_pack_is_omitted() {
        let view = view_of(json!({"copy_pack": {}}));
        assert!(view.copy_pack.is_none());

        let view = view_of(json!({"copy_pack": {"bullets": [], "faq": []}}));
        assert!(view.copy_pack.is_none());
    }

    #[test]
    fn test_copy_pack_buckets_and_joins() {
        let view = view_of(json!({"copy_pack": {
            "title_variants": {"balanced": "A balanced title"},
            "bullets": ["one", "two"],
            "search_terms": {"core": ["a", "b"], "negatives": []}
        }}));
        let pack = view.copy_pack.unwrap();
        assert_eq!(pack.title_variants.len(), 1);
        assert_eq!(pack.title_variants[0].label, "Balanced");
        assert_eq!(pack.bullets_joined, "one\ntwo");
        // Empty negatives bucket is dropped, not rendered as an empty row.
        assert_eq!(pack.search_terms.len(), 1);
        assert_eq!(pack.search_terms[0].terms, "a, b");
    }

    #[test]
    fn test_image_script_numbering_falls_back_to_position() {
        let view = view_of(json!({"copy_pack": {"image_script": [
            {"theme": "hero"},
            {"image_number": 7, "visual_elements": "product on desk"}
        ]}}));
        let scripts = view.copy_pack.unwrap().image_scripts;
        assert_eq!(scripts[0].heading, "Image 1: hero");
        assert_eq!(scripts[1].heading, "Image 7");
        assert!(scripts[1].copy_text.contains("product on desk"));
    }

    #[test]
    fn test_action_plan_numbering_and_badges() {
        let view = view_of(json!({"action_plan": [
            {"priority": "low", "action": "fix title"},
            {"action": "add images"}
        ]}));
        assert_eq!(view.actions.len(), 2);
        assert_eq!(view.actions[0].number, 1);
        assert_eq!(view.actions[0].badge, "bg-green-100 text-green-800");
        assert!(view.actions[1].priority.is_none());
        assert_eq!(view.actions[1].badge, "bg-gray-100 text-gray-800");
    }
}
