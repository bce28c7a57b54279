// ABOUTME: Per-app route resolver for form pages and submissions.
// ABOUTME: Each app has its own module with a form/renderer pair.

pub mod brand_models;
pub mod copywriter;
pub mod keywords;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Form,
};
use serde::Deserialize;

use crate::registry;
use crate::templates::{render_with_status, NotFoundTemplate};
use crate::AppState;

/// Superset of every app's form fields; each app reads the subset it needs.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    pub asin: Option<String>,
    pub brand: Option<String>,
    pub market: Option<String>,
}

pub async fn app_page(Path(slug): Path<String>) -> Response {
    match registry::get_by_slug(&slug) {
        Some(app) => match app.slug {
            "asin-keywords" => keywords::page(app),
            "asin-copywriter" => copywriter::page(app),
            "brand-models" => brand_models::page(app),
            _ => not_found(&slug),
        },
        None => not_found(&slug),
    }
}

pub async fn app_submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<SubmitForm>,
) -> Response {
    match registry::get_by_slug(&slug) {
        Some(app) => match app.slug {
            "asin-keywords" => keywords::submit(&state, app, &form).await,
            "asin-copywriter" => copywriter::submit(&state, app, &form).await,
            "brand-models" => brand_models::submit(&state, app, &form).await,
            _ => not_found(&slug),
        },
        None => not_found(&slug),
    }
}

fn not_found(slug: &str) -> Response {
    render_with_status(
        StatusCode::NOT_FOUND,
        &NotFoundTemplate {
            slug: slug.to_string(),
        },
    )
}
