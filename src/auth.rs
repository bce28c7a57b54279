// ABOUTME: GitHub OAuth login flow and whitelist access gate.
// ABOUTME: Handles authorize redirect, token exchange, session user, and auth middleware.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::AppState;

const OAUTH_STATE_KEY: &str = "oauth_state";
pub const USER_KEY: &str = "user";

const GITHUB_AUTH_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

/// Signed-in principal stored in the session after a whitelisted login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub login: String,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct OauthConfig {
    pub client: BasicClient,
}

impl OauthConfig {
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Result<Self> {
        let client = BasicClient::new(
            ClientId::new(client_id.to_string()),
            Some(ClientSecret::new(client_secret.to_string())),
            AuthUrl::new(GITHUB_AUTH_URL.to_string())?,
            Some(TokenUrl::new(GITHUB_TOKEN_URL.to_string())?),
        )
        .set_redirect_uri(RedirectUrl::new(redirect_uri.to_string())?);

        Ok(Self { client })
    }
}

/// Whitelist check: allow iff the username is whitelisted or the email's
/// domain is. Both whitelists empty means deny everyone (fail closed).
pub fn is_allowed(
    login: Option<&str>,
    email: Option<&str>,
    allowed_logins: &[String],
    allowed_domains: &[String],
) -> bool {
    if allowed_logins.is_empty() && allowed_domains.is_empty() {
        return false;
    }

    if let Some(login) = login {
        if allowed_logins.iter().any(|allowed| allowed == login) {
            return true;
        }
    }

    if let Some(domain) = email.and_then(|email| email.split_once('@')).map(|(_, d)| d) {
        if allowed_domains.iter().any(|allowed| allowed == domain) {
            return true;
        }
    }

    false
}

pub async fn login(session: Session, State(state): State<AppState>) -> Redirect {
    let (auth_url, csrf_token) = state
        .oauth
        .client
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("read:user".to_string()))
        .add_scope(Scope::new("user:email".to_string()))
        .url();

    session
        .insert(OAUTH_STATE_KEY, csrf_token.secret().clone())
        .await
        .ok();

    Redirect::to(auth_url.as_str())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

pub async fn callback(
    session: Session,
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    let stored_state: Option<String> = session.get(OAUTH_STATE_KEY).await.ok().flatten();
    session.remove::<String>(OAUTH_STATE_KEY).await.ok();

    if stored_state.as_deref() != Some(params.state.as_str()) {
        tracing::warn!("OAuth CSRF state mismatch");
        return Redirect::to("/login?error=state");
    }

    let token = match state
        .oauth
        .client
        .exchange_code(AuthorizationCode::new(params.code))
        .request_async(oauth2::reqwest::async_http_client)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "OAuth token exchange failed");
            return Redirect::to("/login?error=oauth");
        }
    };

    let profile = match fetch_github_user(token.access_token().secret()).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch GitHub profile");
            return Redirect::to("/login?error=oauth");
        }
    };

    if !is_allowed(
        Some(&profile.login),
        profile.email.as_deref(),
        &state.config.allowed_logins,
        &state.config.allowed_domains,
    ) {
        tracing::warn!(login = %profile.login, "Login denied: not whitelisted");
        return Redirect::to("/login?error=denied");
    }

    tracing::info!(login = %profile.login, "User signed in");
    session
        .insert(
            USER_KEY,
            SessionUser {
                login: profile.login,
                email: profile.email,
            },
        )
        .await
        .ok();

    Redirect::to("/")
}

pub async fn logout(session: Session) -> Redirect {
    session.flush().await.ok();
    Redirect::to("/login")
}

pub async fn get_current_user(session: &Session) -> Option<SessionUser> {
    session.get::<SessionUser>(USER_KEY).await.ok().flatten()
}

#[derive(Debug, Deserialize)]
struct GithubProfile {
    login: String,
    email: Option<String>,
}

async fn fetch_github_user(access_token: &str) -> Result<GithubProfile> {
    let response = reqwest::Client::new()
        .get(GITHUB_USER_URL)
        // GitHub's API rejects requests without a User-Agent.
        .header(reqwest::header::USER_AGENT, "apphub")
        .bearer_auth(access_token)
        .send()
        .await
        .context("Failed to fetch GitHub user")?;

    if !response.status().is_success() {
        anyhow::bail!("GitHub user fetch failed: {}", response.status());
    }

    response.json().await.context("Failed to parse GitHub user")
}

/// Auth middleware: browser routes bounce to /login, API routes get a 401.
/// Only session presence is checked here; the whitelist ran at callback time.
pub async fn require_auth(request: Request, next: Next) -> Response {
    let user = match request.extensions().get::<Session>().cloned() {
        Some(session) => get_current_user(&session).await,
        None => None,
    };

    if user.is_some() {
        return next.run(request).await;
    }

    if request.uri().path().starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Unauthorized" })),
        )
            .into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logins(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_whitelists_deny_everyone() {
        assert!(!is_allowed(Some("alice"), Some("alice@corp.com"), &[], &[]));
        assert!(!is_allowed(None, None, &[], &[]));
    }

    #[test]
    fn test_username_whitelist_grants() {
        let allowed = logins(&["alice", "bob"]);
        assert!(is_allowed(Some("alice"), None, &allowed, &[]));
        assert!(!is_allowed(Some("mallory"), None, &allowed, &[]));
    }

    #[test]
    fn test_domain_whitelist_grants() {
        let domains = logins(&["b.com"]);
        assert!(is_allowed(None, Some("a@b.com"), &[], &domains));
        assert!(!is_allowed(None, Some("a@evil.com"), &[], &domains));
    }

    #[test]
    fn test_either_arm_is_sufficient() {
        let allowed = logins(&["alice"]);
        let domains = logins(&["corp.com"]);
        // Username matches, email does not.
        assert!(is_allowed(Some("alice"), Some("alice@gmail.com"), &allowed, &domains));
        // Email domain matches, username does not.
        assert!(is_allowed(Some("bob"), Some("bob@corp.com"), &allowed, &domains));
        assert!(!is_allowed(Some("bob"), Some("bob@gmail.com"), &allowed, &domains));
    }

    #[test]
    fn test_missing_principal_fields_fail_their_arm() {
        let allowed = logins(&["alice"]);
        let domains = logins(&["corp.com"]);
        assert!(!is_allowed(None, None, &allowed, &domains));
        assert!(!is_allowed(None, Some("not-an-email"), &allowed, &domains));
    }

    #[test]
    fn test_whitelist_matching_is_exact() {
        let domains = logins(&["b.com"]);
        // Subdomains and suffixes do not match.
        assert!(!is_allowed(None, Some("a@sub.b.com"), &[], &domains));
        assert!(!is_allowed(None, Some("a@bb.com"), &[], &domains));
    }
}
