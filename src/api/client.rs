//! HTTP client for the token-management API.
//! Every call is a single attempt; callers decide what a failure means.
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::Method;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

use crate::api::middleware::RequestLogger;
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{GeneratedToken, TokenListResponse, TokenSummary};

pub const LIST_PATH: &str = "api/tokens/list";
pub const GENERATE_PATH: &str = "api/tokens/generate";
pub const DELETE_PATH_PREFIX: &str = "api/tokens/";

/// The three calls the token UI depends on.
#[async_trait]
pub trait TokenApi: Send + Sync {
    /// Read-only and idempotent.
    async fn list_tokens(&self) -> Result<Vec<TokenSummary>, ApiError>;

    /// Creates a token; not idempotent.
    async fn generate_token(&self) -> Result<GeneratedToken, ApiError>;

    async fn delete_token(&self, token_id: &str) -> Result<(), ApiError>;
}

pub struct HttpTokenApi {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl HttpTokenApi {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &cfg.session_cookie {
            let mut val = HeaderValue::from_str(cookie).context("invalid session cookie")?;
            val.set_sensitive(true);
            headers.insert(COOKIE, val);
        }

        let reqwest_client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(cfg.timeout)
            .connect_timeout(cfg.connect_timeout)
            .build()
            .context("failed to build token API client")?;

        let client = ClientBuilder::new(reqwest_client)
            .with(RequestLogger)
            .build();

        // Url::join drops the last segment unless the base ends in '/'
        let mut base_url = cfg.api_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::NetworkFailure(format!("invalid request URL: {}", e)))
    }

    async fn send(&self, method: Method, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path)?;
        let resp = self.client.request(method, url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }
        Ok(resp)
    }
}

#[async_trait]
impl TokenApi for HttpTokenApi {
    async fn list_tokens(&self) -> Result<Vec<TokenSummary>, ApiError> {
        let resp = self.send(Method::GET, LIST_PATH).await?;
        let body: TokenListResponse = resp.json().await?;
        Ok(body.tokens)
    }

    async fn generate_token(&self) -> Result<GeneratedToken, ApiError> {
        let resp = self.send(Method::POST, GENERATE_PATH).await?;
        Ok(resp.json().await?)
    }

    async fn delete_token(&self, token_id: &str) -> Result<(), ApiError> {
        let path = format!("{}{}", DELETE_PATH_PREFIX, urlencoding::encode(token_id));
        self.send(Method::DELETE, &path).await?;
        Ok(())
    }
}
