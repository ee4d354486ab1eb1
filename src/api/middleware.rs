use std::time::Instant;

use async_trait::async_trait;
use http::Extensions;
use reqwest::header::HeaderValue;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every outgoing request with a fresh X-Request-Id and logs its outcome.
/// The id lets a failed call be matched against the server's own logs.
pub struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let req_id = uuid::Uuid::new_v4().to_string();
        if let Ok(val) = HeaderValue::from_str(&req_id) {
            req.headers_mut().insert(REQUEST_ID_HEADER, val);
        }

        let method = req.method().clone();
        let path = req.url().path().to_string();
        let started = Instant::now();

        let result = next.run(req, extensions).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(resp) => tracing::debug!(
                request_id = %req_id,
                %method,
                path = %path,
                status = %resp.status(),
                elapsed_ms,
                "token api request completed"
            ),
            Err(e) => tracing::warn!(
                request_id = %req_id,
                %method,
                path = %path,
                elapsed_ms,
                error = %e,
                "token api request failed"
            ),
        }

        result
    }
}
