// ABOUTME: ASIN listing audit & copy pack app - the portal's richest renderer.
// ABOUTME: Normalizes the workflow report and renders it as structured panels.

use askama::Template;
use axum::response::Response;
use serde_json::json;

use super::SubmitForm;
use crate::registry::AppInfo;
use crate::render::ReportView;
use crate::report::{candidate_json, normalize};
use crate::templates::render_html;
use crate::workflow::user_message;
use crate::AppState;

#[derive(Template)]
#[template(path = "apps/copywriter.html")]
pub struct CopywriterTemplate {
    pub title: String,
    pub description: String,
    pub asin: String,
    pub error: Option<String>,
    pub report: Option<ReportView>,
    /// Pretty-printed normalized result; present whenever a response came
    /// back, even when it did not match the report shape.
    pub raw_json: Option<String>,
}

fn blank(app: &AppInfo) -> CopywriterTemplate {
    CopywriterTemplate {
        title: app.title.to_string(),
        description: app.description.to_string(),
        asin: String::new(),
        error: None,
        report: None,
        raw_json: None,
    }
}

/// ASINs are 10 ASCII characters, uppercase letters and digits.
fn valid_asin(asin: &str) -> bool {
    asin.len() == 10
        && asin
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn page(app: &AppInfo) -> Response {
    render_html(&blank(app))
}

pub async fn submit(state: &AppState, app: &AppInfo, form: &SubmitForm) -> Response {
    let asin = form
        .asin
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_uppercase();
    let mut template = blank(app);
    template.asin = asin.clone();

    if asin.is_empty() {
        template.error = Some("Please enter an ASIN".to_string());
        return render_html(&template);
    }
    if !valid_asin(&asin) {
        template.error =
            Some("Invalid ASIN format: expected 10 letters and digits".to_string());
        return render_html(&template);
    }

    match state.workflow.trigger(app.workflow, json!({ "asin": asin })).await {
        Ok(value) => {
            template.raw_json = Some(candidate_json(&value));
            match normalize(&value) {
                Ok(report) => template.report = Some(ReportView::from_report(&report)),
                Err(error) => {
                    // Unreadable report shape: leave only the raw JSON panel.
                    tracing::warn!(app = app.slug, error = %error, "Could not normalize workflow response");
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
