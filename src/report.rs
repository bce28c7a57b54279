// ABOUTME: Data model for workflow analysis reports and the response normalizer.
// ABOUTME: Unwraps the engine's wrapper conventions into one canonical report value.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Best-effort report returned by the workflow engine. Every field is
/// optional; unknown fields are ignored. Absence means "omit the section".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisReport {
    pub asin: Option<String>,
    pub marketplace: Option<String>,
    pub fetched_at: Option<String>,
    pub listing: Option<ListingSnapshot>,
    pub scores: Option<Scores>,
    pub summary: Option<String>,
    pub issues: Option<Vec<Issue>>,
    pub copy_pack: Option<CopyPack>,
    pub action_plan: Option<Vec<Action>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingSnapshot {
    pub asin: Option<String>,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub bullets: Option<Vec<String>>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub images_count: Option<u64>,
    pub has_a_plus: Option<bool>,
    pub a_plus_text: Option<String>,
    pub a_plus_blocks: Option<Vec<APlusBlock>>,
    pub a_plus_images: Option<Vec<String>>,
    pub a_plus_alt_texts: Option<Vec<String>>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub material: Option<String>,
    pub number_of_items: Option<u64>,
    pub package_quantity: Option<u64>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub category_path: Option<String>,
    pub bsr: Option<u64>,
    pub bsr_category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct APlusBlock {
    pub group_index: Option<u64>,
    pub module_index: Option<u64>,
    pub from_manufacturer: Option<bool>,
    pub module_type: Option<String>,
    pub images: Option<Vec<String>>,
    pub image_alt_texts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scores {
    pub overall_score: Option<f64>,
    pub ctr_score: Option<f64>,
    pub cvr_score: Option<f64>,
    pub seo_score: Option<f64>,
    pub compliance_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Issue {
    pub severity: Option<String>,
    pub impact: Option<Vec<String>>,
    pub description: Option<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CopyPack {
    pub title_variants: Option<TitleVariants>,
    pub bullets: Option<Vec<String>>,
    pub description: Option<String>,
    pub search_terms: Option<SearchTerms>,
    pub a_plus: Option<Vec<APlusModule>>,
    pub image_script: Option<Vec<ImageScript>>,
    pub faq: Option<Vec<Faq>>,
    pub compliance_notes: Option<Vec<ComplianceNote>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TitleVariants {
    pub conservative: Option<String>,
    pub balanced: Option<String>,
    pub aggressive: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchTerms {
    pub core: Option<Vec<String>>,
    pub long_tail: Option<Vec<String>>,
    pub misspell: Option<Vec<String>>,
    pub negatives: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct APlusModule {
    pub module_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageScript {
    pub image_number: Option<u64>,
    pub theme: Option<String>,
    pub visual_elements: Option<String>,
    pub text_overlay: Option<String>,
    pub must_include: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Faq {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ComplianceNote {
    pub risk: Option<String>,
    pub safe_wording: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Action {
    pub priority: Option<String>,
    pub action: Option<String>,
    pub impact: Option<String>,
}

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("workflow response was an empty array")]
    EmptyArray,
    #[error("workflow response is not a JSON object (got {0})")]
    NotAnObject(&'static str),
    #[error("workflow response did not match the report shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Unwrap the engine's wrapper conventions to the inner result value.
/// Ordered checks, first match wins:
/// 1. array -> first element, unwrapping a `json` key if present
/// 2. object with a `json` key -> that key's value
/// 3. anything else -> the payload itself
fn unwrap_candidate(raw: &Value) -> Result<&Value, NormalizeError> {
    let candidate = match raw {
        Value::Array(items) => items.first().ok_or(NormalizeError::EmptyArray)?,
        other => other,
    };
    Ok(candidate.get("json").unwrap_or(candidate))
}

/// Normalize a raw workflow response into the canonical report. A candidate
/// that is not an object (null, string, number) is an explicit error; callers
/// fall back to showing the raw JSON only.
pub fn normalize(raw: &Value) -> Result<AnalysisReport, NormalizeError> {
    let candidate = unwrap_candidate(raw)?;
    if !candidate.is_object() {
        return Err(NormalizeError::NotAnObject(json_kind(candidate)));
    }
    Ok(serde_json::from_value(candidate.clone())?)
}

/// Pretty-print the unwrapped result for the raw-JSON fallback panel.
/// Falls back to the payload as received when unwrapping fails.
pub fn candidate_json(raw: &Value) -> String {
    pretty_json(unwrap_candidate(raw).unwrap_or(raw))
}

/// Pretty-print a JSON value as received, no unwrapping.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Badge classes for issue severity. Total over all inputs: anything
/// outside high/medium/low gets the neutral badge.
pub fn severity_badge(severity: Option<&str>) -> &'static str {
    match severity {
        Some("high") => "bg-red-100 text-red-800",
        Some("medium") => "bg-yellow-100 text-yellow-800",
        Some("low") => "bg-blue-100 text-blue-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

/// Badge classes for action priority. Same shape as severity, but low
/// priority reads green rather than blue.
pub fn priority_badge(priority: Option<&str>) -> &'static str {
    match priority {
        Some("high") => "bg-red-100 text-red-800",
        Some("medium") => "bg-yellow-100 text-yellow-800",
        Some("low") => "bg-green-100 text-green-800",
        _ => "bg-gray-100 text-gray-800",
    }
}
