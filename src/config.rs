use std::time::Duration;

use anyhow::Context;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the token API; request paths are joined onto it.
    pub api_url: Url,
    /// Raw `Cookie` header value carrying the authenticated session.
    pub session_cookie: Option<String>,
    /// Total request timeout. Set via TOKENS_TIMEOUT_SECS. Default: 30.
    pub timeout: Duration,
    /// Set via TOKENS_CONNECT_TIMEOUT_SECS. Default: 5.
    pub connect_timeout: Duration,
    /// Emit logs as JSON lines (TOKENS_LOG_FORMAT=json).
    pub log_json: bool,
}

impl Config {
    /// Override the URL and cookie with values given on the command line.
    pub fn with_overrides(
        mut self,
        api_url: Option<&str>,
        session_cookie: Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(raw) = api_url {
            self.api_url = parse_api_url(raw)?;
        }
        if session_cookie.is_some() {
            self.session_cookie = session_cookie;
        }
        Ok(self)
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    from_lookup(|key| std::env::var(key).ok())
}

/// Build a config from an arbitrary variable source.
pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let api_url = lookup("TOKENS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());

    Ok(Config {
        api_url: parse_api_url(&api_url)?,
        session_cookie: lookup("TOKENS_SESSION_COOKIE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()),
        timeout: Duration::from_secs(
            lookup("TOKENS_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        ),
        connect_timeout: Duration::from_secs(
            lookup("TOKENS_CONNECT_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        ),
        log_json: lookup("TOKENS_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false),
    })
}

fn parse_api_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API URL: {}", raw))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("API URL must be http or https, got '{}'", url.scheme());
    }
    Ok(url)
}
