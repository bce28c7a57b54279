// ABOUTME: ASIN keyword analysis app - simplest form in the portal.
// ABOUTME: Forwards an ASIN and shows the raw workflow report as JSON.

use askama::Template;
use axum::response::Response;
use serde_json::json;

use super::SubmitForm;
use crate::registry::AppInfo;
use crate::report::pretty_json;
use crate::templates::render_html;
use crate::workflow::user_message;
use crate::AppState;

#[derive(Template)]
#[template(path = "apps/keywords.html")]
pub struct KeywordsTemplate {
    pub title: String,
    pub description: String,
    pub asin: String,
    pub error: Option<String>,
    pub result_json: Option<String>,
}

fn blank(app: &AppInfo) -> KeywordsTemplate {
    KeywordsTemplate {
        title: app.title.to_string(),
        description: app.description.to_string(),
        asin: String::new(),
        error: None,
        result_json: None,
    }
}

pub fn page(app: &AppInfo) -> Response {
    render_html(&blank(app))
}

pub async fn submit(state: &AppState, app: &AppInfo, form: &SubmitForm) -> Response {
    let asin = form.asin.as_deref().unwrap_or("").trim().to_string();
    let mut template = blank(app);
    template.asin = asin.clone();

    if asin.is_empty() {
        template.error = Some("Please enter an ASIN".to_string());
        return render_html(&template);
    }

    match state.workflow.trigger(app.workflow, json!({ "asin": asin })).await {
        Ok(value) => template.result_json = Some(pretty_json(&value)),
        Err(error) => {
            tracing::warn!(app = app.slug, error = %error, "Workflow submission failed");
            template.error = Some(user_message(&error));
        }
    }

    render_html(&template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> &'static AppInfo {
        crate::registry::get_by_slug("asin-keywords").unwrap()
    }

    #[test]
    fn test_blank_template_renders_form() {
        let rendered = blank(app()).render().unwrap();
        assert!(rendered.contains("ASIN Keyword Analysis"));
        assert!(rendered.contains("name=\"asin\""));
        assert!(!rendered.contains("Analysis result"));
    }

    #[test]
    fn test_template_renders_result_json() {
        let mut template = blank(app());
        template.result_json = Some("{\n  \"keywords\": []\n}".to_string());
        let rendered = template.render().unwrap();
        assert!(rendered.contains("Analysis result"));
        assert!(rendered.contains("&quot;keywords&quot;"));
    }

    #[test]
    fn test_template_renders_inline_error() {
        let mut template = blank(app());
        template.error = Some("Please enter an ASIN".to_string());
        let rendered = template.render().unwrap();
        assert!(rendered.contains("Please enter an ASIN"));
    }
}
