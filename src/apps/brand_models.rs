// ABOUTME: Brand host model lookup app for air purifier filters.
// ABOUTME: Renders filter and host model lists from the lookup workflow.

use askama::Template;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use super::SubmitForm;
use crate::registry::AppInfo;
use crate::report::pretty_json;
use crate::templates::render_html;
use crate::workflow::user_message;
use crate::AppState;

const MARKETS: &[&str] = &["US", "CA", "UK"];

/// Lookup result returned by the brand-models workflow. Every field is
/// optional, like the analysis report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BrandModelsReport {
    pub brand: Option<String>,
    pub filters: Option<Vec<FilterEntry>>,
    #[serde(rename = "hostModels")]
    pub host_models: Option<Vec<HostModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FilterEntry {
    pub asin: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "compatibleModels")]
    pub compatible_models: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HostModel {
    pub model: Option<String>,
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct FilterView {
    pub asin: Option<String>,
    pub title: Option<String>,
    pub models: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HostModelView {
    pub model: String,
    pub details_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MarketOption {
    pub code: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "apps/brand_models.html")]
pub struct BrandModelsTemplate {
    pub title: String,
    pub description: String,
    pub brand: String,
    pub markets: Vec<MarketOption>,
    pub error: Option<String>,
    pub filters: Vec<FilterView>,
    pub host_models: Vec<HostModelView>,
    pub result_json: Option<String>,
}

fn blank(app: &AppInfo) -> BrandModelsTemplate {
    BrandModelsTemplate {
        title: app.title.to_string(),
        description: app.description.to_string(),
        brand: String::new(),
        markets: market_options("US"),
        error: None,
        filters: Vec::new(),
        host_models: Vec::new(),
        result_json: None,
    }
}

fn market_options(selected: &str) -> Vec<MarketOption> {
    MARKETS
        .iter()
        .map(|code| MarketOption {
            code: code.to_string(),
            selected: *code == selected,
        })
        .collect()
}

pub fn page(app: &AppInfo) -> Response {
    render_html(&blank(app))
}

pub async fn submit(state: &AppState, app: &AppInfo, form: &SubmitForm) -> Response {
    let brand = form.brand.as_deref().unwrap_or("").trim().to_string();
    let market = form
        .market
        .as_deref()
        .filter(|m| MARKETS.contains(m))
        .unwrap_or("US")
        .to_string();

    let mut template = blank(app);
    template.brand = brand.clone();
    template.markets = market_options(&market);

    if brand.is_empty() {
        template.error = Some("Please enter a brand name".to_string());
        return render_html(&template);
    }

    let payload = json!({
        "brand": brand,
        "category": "air purifier filters",
        "market": market,
    });

    match state.workflow.trigger(app.workflow, payload).await {
        Ok(value) => {
            template.result_json = Some(pretty_json(&value));
            match serde_json::from_value::<BrandModelsReport>(value) {
                Ok(report) => {
                    template.filters = filter_views(&report);
                    template.host_models = host_model_views(&report);
                }
                Err(error) => {
                    // Unexpected shape: the raw JSON panel still shows it.
                    tracing::warn!(app = app.slug, error = %error, "Could not parse lookup response");
                }
            }
        }
        Err(error) => {
            tracing::warn!(app = app.slug, error = %error, "Workflow submission failed");
            template.error = Some(user_message(&error));
        }
    }

    render_html(&template)
}

fn filter_views(report: &BrandModelsReport) -> Vec<FilterView> {
    report
        .filters
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|filter| FilterView {
            asin: filter.asin.clone(),
            title: filter.title.clone(),
            models: filter
                .compatible_models
                .as_deref()
                .filter(|models| !models.is_empty())
                .map(|models| models.join(", ")),
        })
        .collect()
}

fn host_model_views(report: &BrandModelsReport) -> Vec<HostModelView> {
    report
        .host_models
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|host| HostModelView {
            model: host.model.clone().unwrap_or_else(|| "unknown".to_string()),
            details_json: host
                .details
                .as_ref()
                .filter(|details| !details.is_null())
                .map(|details| {
                    serde_json::to_string_pretty(details).unwrap_or_else(|_| details.to_string())
                }),
        })
        .collect()
}
