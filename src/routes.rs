// ABOUTME: Axum router setup for the portal.
// ABOUTME: Splits public auth routes from session-guarded app routes.

use axum::{
    extract::Query,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

use crate::templates::{render_html, AppCard, CategoryGroup, IndexTemplate, LoginTemplate};
use crate::{apps, auth, proxy, registry, AppState};

pub fn create_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    let public = Router::new()
        .route("/login", get(login_page))
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        .route("/health", get(health));

    let protected = Router::new()
        .route("/", get(index))
        .route("/apps/{slug}", get(apps::app_page).post(apps::app_submit))
        .route("/api/n8n/trigger", post(proxy::trigger))
        .route_layer(middleware::from_fn(auth::require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(session: Session) -> Response {
    let user = match auth::get_current_user(&session).await {
        Some(user) => user,
        // The middleware already checked; a vanished session just re-logins.
        None => return Redirect::to("/login").into_response(),
    };

    let categories = registry::by_category()
        .into_iter()
        .map(|(name, apps)| CategoryGroup {
            name: name.to_string(),
            apps: apps
                .into_iter()
                .map(|app| AppCard {
                    slug: app.slug.to_string(),
                    title: app.title.to_string(),
                    description: app.description.to_string(),
                })
                .collect(),
        })
        .collect();

    render_html(&IndexTemplate {
        user: user.login,
        categories,
    })
}

#[derive(Deserialize)]
struct LoginParams {
    error: Option<String>,
}

async fn login_page(Query(params): Query<LoginParams>) -> Response {
    let notice = params.error.as_deref().map(|error| {
        match error {
            "denied" => "Your account is not on the whitelist. Ask an admin to add you.",
            "state" => "Sign-in expired, please try again.",
            _ => "Sign-in failed, please try again.",
        }
        .to_string()
    });
    render_html(&LoginTemplate { notice })
}

async fn health() -> &'static str {
    "ok"
}
