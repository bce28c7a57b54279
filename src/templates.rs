// ABOUTME: Shared Askama templates for the portal shell pages.
// ABOUTME: Render helper maps template failures to a logged 500.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub user: String,
    pub categories: Vec<CategoryGroup>,
}

#[derive(Clone)]
pub struct CategoryGroup {
    pub name: String,
    pub apps: Vec<AppCard>,
}

#[derive(Clone)]
pub struct AppCard {
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub slug: String,
}

pub fn render_html<T: Template>(template: &T) -> Response {
    render_with_status(StatusCode::OK, template)
}

pub fn render_with_status<T: Template>(status: StatusCode, template: &T) -> Response {
    match template.render() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_template_renders_categories() {
        let template = IndexTemplate {
            user: "alice".to_string(),
            categories: vec![CategoryGroup {
                name: "Amazon Tools".to_string(),
                apps: vec![AppCard {
                    slug: "asin-keywords".to_string(),
                    title: "ASIN Keyword Analysis".to_string(),
                    description: "Enter an ASIN".to_string(),
                }],
            }],
        };
        let rendered = template.render().unwrap();
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("Amazon Tools"));
        assert!(rendered.contains("/apps/asin-keywords"));
        assert!(!rendered.contains("No apps available"));
    }

    #[test]
    fn test_index_template_renders_empty_state() {
        let template = IndexTemplate {
            user: "alice".to_string(),
            categories: vec![],
        };
        let rendered = template.render().unwrap();
        assert!(rendered.contains("No apps available"));
    }

    #[test]
    fn test_login_template_with_notice() {
        let template = LoginTemplate {
            notice: Some("Your account is not on the whitelist.".to_string()),
        };
        let rendered = template.render().unwrap();
        assert!(rendered.contains("not on the whitelist"));
        assert!(rendered.contains("Sign in with GitHub"));
    }

    #[test]
    fn test_login_template_without_notice() {
        let template = LoginTemplate { notice: None };
        let rendered = template.render().unwrap();
        assert!(!rendered.contains("not on the whitelist"));
    }

    #[test]
    fn test_not_found_template() {
        let template = NotFoundTemplate {
            slug: "mystery-app".to_string(),
        };
        let rendered = template.render().unwrap();
        assert!(rendered.contains("mystery-app"));
    }
}
