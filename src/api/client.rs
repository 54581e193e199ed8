use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::http::Response;

use crate::error::{ApiError, AppError, PollError};
use crate::poller::UpdateSource;

use super::types::{CommandAck, ErrorBody, Health, Laptop, LastUpdate, ScanReport};

/// Characters kept as-is inside a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const API_KEY_HEADER: &str = "X-API-Key";

/// Blocking client for the scan server's REST API
#[derive(Clone)]
pub(crate) struct ApiClient {
    agent: Agent,
    base: String,
    api_key: Option<String>,
    session_cookie: Option<String>,
}

impl ApiClient {
    pub(crate) fn new(
        server: &str,
        api_key: Option<String>,
        session_cookie: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let trimmed = server.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(AppError::InvalidServer {
                input: server.to_string(),
            });
        }
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Ok(Self {
            agent,
            base: trimmed.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            session_cookie: session_cookie.filter(|c| !c.is_empty()),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }

    fn get(&self, path: &str) -> ureq::RequestBuilder<ureq::typestate::WithoutBody> {
        self.authorize(self.agent.get(self.url(path)))
    }

    fn authorize<B>(&self, mut request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie);
        }
        request
    }

    pub(crate) fn last_update(&self, status_path: &str) -> Result<LastUpdate, ApiError> {
        let response = self.get(status_path).call().map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn health(&self) -> Result<Health, ApiError> {
        let response = self.get("/api/health").call().map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn laptops(&self, limit: u32) -> Result<Vec<Laptop>, ApiError> {
        let response = self
            .get("/api/v1/laptops")
            .query("limit", limit.to_string())
            .call()
            .map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn reports_for(&self, laptop: &str, limit: u32) -> Result<Vec<ScanReport>, ApiError> {
        let path = format!("/api/v1/scanreports/laptop/{}", encode_segment(laptop));
        let response = self
            .get(&path)
            .query("limit", limit.to_string())
            .call()
            .map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn trigger_scan(&self, target: &str, scan_type: &str) -> Result<CommandAck, ApiError> {
        let path = format!(
            "/api/v1/clientcommands/trigger_scan/{}",
            encode_segment(target)
        );
        tracing::debug!("POST {path} (scan_type={scan_type})");
        let response = self
            .authorize(self.agent.post(self.url(&path)))
            .send_json(serde_json::json!({ "scan_type": scan_type }))
            .map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn cancel_command(&self, target: &str) -> Result<CommandAck, ApiError> {
        let path = format!(
            "/api/v1/clientcommands/cancel_command/{}",
            encode_segment(target)
        );
        tracing::debug!("POST {path}");
        let response = self
            .authorize(self.agent.post(self.url(&path)))
            .send_empty()
            .map_err(transport)?;
        read_json(response)
    }

    pub(crate) fn delete_laptop(&self, laptop: &str) -> Result<(), ApiError> {
        let path = format!("/api/v1/laptops/{}", encode_segment(laptop));
        tracing::debug!("DELETE {path}");
        let response = self
            .authorize(self.agent.delete(self.url(&path)))
            .call()
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }
}

/// The poller's view of the status endpoint
pub(crate) struct StatusEndpoint {
    client: ApiClient,
    path: String,
}

impl StatusEndpoint {
    pub(crate) fn new(client: ApiClient, path: &str) -> Self {
        Self {
            client,
            path: path.to_string(),
        }
    }
}

impl UpdateSource for StatusEndpoint {
    fn last_update(&mut self) -> Result<Option<String>, PollError> {
        let body = self.client.last_update(&self.path)?;
        Ok(body.token())
    }
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn transport(err: ureq::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Turn non-2xx responses into [`ApiError::Status`], preferring the server's
/// `detail` message over the bare status text.
fn check_status(mut response: Response<ureq::Body>) -> Result<Response<ureq::Body>, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.body_mut().read_to_string().unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message())
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

fn read_json<T: DeserializeOwned>(response: Response<ureq::Body>) -> Result<T, ApiError> {
    let mut response = check_status(response)?;
    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}
