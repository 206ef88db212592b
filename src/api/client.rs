use super::error::{ApiError, ApiResult, ErrorBody};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking JSON client for the Atlas REST API.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::NotConfigured);
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("atlas-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url,
            http,
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(request, "GET", path)
    }

    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request, "POST", path)
    }

    fn send<T: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
        method: &str,
        path: &str,
    ) -> ApiResult<T> {
        request = request.header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        debug!(method, path, "api request");
        let response = request.send()?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        let result = parse_response(
            status.as_u16(),
            status.canonical_reason(),
            content_type.as_deref(),
            &body,
        );
        if let Err(err) = &result {
            warn!(method, path, error = %err, "api request failed");
        }
        result
    }
}

/// Turns a raw HTTP response into the decoded body or an [`ApiError`].
///
/// JSON error bodies contribute their `message` and `code`; other error
/// bodies are used as the message verbatim, falling back to the status
/// reason. An empty success body decodes as JSON `null`.
pub fn parse_response<T: DeserializeOwned>(
    status: u16,
    reason: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> ApiResult<T> {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));

    if !(200..300).contains(&status) {
        let parsed = if is_json {
            serde_json::from_str::<ErrorBody>(body).ok()
        } else {
            None
        };
        let (message, code) = match parsed {
            Some(ErrorBody { message, code }) => (message, code),
            None => (None, None),
        };
        let message = message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| (!is_json && !body.trim().is_empty()).then(|| body.trim().to_string()))
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| format!("Request failed: {status}"));
        return Err(ApiError::Status {
            status,
            message,
            code,
        });
    }

    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Malformed {
        details: e.to_string(),
    })
}
