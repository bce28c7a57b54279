// ABOUTME: Environment configuration for the App Hub portal.
// ABOUTME: Reads OAuth credentials, webhook settings, and access whitelists.

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub oauth_redirect_uri: String,
    pub allowed_logins: Vec<String>,
    pub allowed_domains: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: std::env::var("APPHUB_PORT")
                .unwrap_or_else(|_| "8090".to_string())
                .parse()
                .context("APPHUB_PORT must be a valid port number")?,
            bind_address: std::env::var("APPHUB_BIND_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            webhook_url: std::env::var("N8N_WEBHOOK_URL").ok(),
            webhook_secret: std::env::var("N8N_WEBHOOK_SECRET").ok(),
            github_client_id: std::env::var("GITHUB_ID")
                .context("GITHUB_ID is required (GitHub OAuth client id)")?,
            github_client_secret: std::env::var("GITHUB_SECRET")
                .context("GITHUB_SECRET is required (GitHub OAuth client secret)")?,
            oauth_redirect_uri: std::env::var("OAUTH_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8090/auth/callback".to_string()),
            allowed_logins: split_whitelist(
                &std::env::var("ALLOWED_GITHUB_LOGINS").unwrap_or_default(),
            ),
            allowed_domains: split_whitelist(
                &std::env::var("ALLOWED_EMAIL_DOMAINS").unwrap_or_default(),
            ),
        })
    }
}

/// Split a comma-separated whitelist, dropping whitespace and empty entries.
pub fn split_whitelist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("APPHUB_PORT");
        std::env::remove_var("APPHUB_BIND_ADDRESS");
        std::env::remove_var("N8N_WEBHOOK_URL");
        std::env::remove_var("N8N_WEBHOOK_SECRET");
        std::env::remove_var("GITHUB_ID");
        std::env::remove_var("GITHUB_SECRET");
        std::env::remove_var("OAUTH_REDIRECT_URI");
        std::env::remove_var("ALLOWED_GITHUB_LOGINS");
        std::env::remove_var("ALLOWED_EMAIL_DOMAINS");
    }

    #[test]
    fn test_split_whitelist() {
        assert_eq!(split_whitelist("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_whitelist(""), Vec::<String>::new());
        assert_eq!(split_whitelist(" , ,"), Vec::<String>::new());
        assert_eq!(split_whitelist("solo"), vec!["solo"]);
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        std::env::set_var("GITHUB_ID", "client-id");
        std::env::set_var("GITHUB_SECRET", "client-secret");

        let config = Config::load().unwrap();
        assert_eq!(config.port, 8090);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert!(config.webhook_url.is_none());
        assert!(config.webhook_secret.is_none());
        assert!(config.allowed_logins.is_empty());
        assert!(config.allowed_domains.is_empty());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_requires_oauth_credentials() {
        clear_env();
        assert!(Config::load().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_parses_whitelists() {
        clear_env();
        std::env::set_var("GITHUB_ID", "client-id");
        std::env::set_var("GITHUB_SECRET", "client-secret");
        std::env::set_var("ALLOWED_GITHUB_LOGINS", "alice, bob");
        std::env::set_var("ALLOWED_EMAIL_DOMAINS", "example.com");

        let config = Config::load().unwrap();
        assert_eq!(config.allowed_logins, vec!["alice", "bob"]);
        assert_eq!(config.allowed_domains, vec!["example.com"]);

        clear_env();
    }
}
