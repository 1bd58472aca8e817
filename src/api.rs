// API client module: a small blocking HTTP client that talks to the
// Icinga2 REST API. The API only speaks POST; read-only queries carry an
// `X-HTTP-Method-Override: GET` header instead of using the GET verb.
// There is no retry and no partial-result path: the first failure is
// surfaced to the caller and ends the run.

use crate::model::{MonitoredObject, ObjectKind};
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connection settings for the Icinga2 API. Built once and handed to
/// [`ApiClient::new`]; nothing here lives in process-global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL including the scheme, e.g. `https://example.com`.
    pub address: String,
    pub port: u16,
    /// Basic-auth user; doubles as the acknowledgement author.
    pub username: String,
    pub password: String,
    /// When false the client accepts invalid TLS certificates.
    pub verify_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: "https://example.com".into(),
            port: 5665,
            username: "root".into(),
            password: "admin".into(),
            verify_tls: false,
        }
    }
}

/// Everything that can go wrong talking to the API. One taxonomy only:
/// callers never recover, the top level prints the error and exits.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("request failed: {status} - {body}")]
    Status { status: StatusCode, body: String },
}

/// Body for the acknowledge-problem action. The comment is a single
/// space: the API rejects an empty string.
#[derive(Serialize)]
struct AckRequest<'a> {
    author: &'a str,
    comment: &'a str,
}

/// Envelope every object query comes back in.
#[derive(Deserialize)]
struct ResultsEnvelope {
    results: Vec<MonitoredObject>,
}

/// Blocking Icinga2 API client.
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(ApiClient { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}:{}{}", self.config.address, self.config.port, path)
    }

    /// POST `path` with the GET override and return the `results` array.
    /// A record that does not deserialize fails the whole call.
    fn query_objects(&self, path: &str) -> Result<Vec<MonitoredObject>, ApiError> {
        let res = self
            .client
            .post(self.url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .header("X-HTTP-Method-Override", "GET")
            .send()?;
        debug!("query {} -> {}", path, res.status());
        let res = check_status(res)?;
        let envelope: ResultsEnvelope = res.json()?;
        Ok(envelope.results)
    }

    pub fn fetch_hosts(&self) -> Result<Vec<MonitoredObject>, ApiError> {
        self.query_objects("/v1/objects/hosts")
    }

    pub fn fetch_services(&self) -> Result<Vec<MonitoredObject>, ApiError> {
        self.query_objects("/v1/objects/services")
    }

    /// POST an action endpoint targeting a single object, addressed via
    /// a `?host=<name>` or `?service=<name>` query parameter.
    fn post_action(
        &self,
        path: &str,
        kind: ObjectKind,
        name: &str,
        body: Option<&AckRequest>,
    ) -> Result<(), ApiError> {
        let mut req = self
            .client
            .post(self.url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .query(&[(kind.as_str(), name)]);
        if let Some(body) = body {
            req = req.json(body);
        }
        let res = req.send()?;
        debug!("action {} {}={} -> {}", path, kind, name, res.status());
        check_status(res)?;
        Ok(())
    }

    /// Acknowledge a problem on `name` with a blank comment, authored by
    /// the configured user.
    pub fn acknowledge(&self, kind: ObjectKind, name: &str) -> Result<(), ApiError> {
        let body = AckRequest {
            author: &self.config.username,
            comment: " ",
        };
        self.post_action("/v1/actions/acknowledge-problem", kind, name, Some(&body))
    }

    /// Withdraw a previous acknowledgement.
    pub fn remove_acknowledgement(&self, kind: ObjectKind, name: &str) -> Result<(), ApiError> {
        self.post_action("/v1/actions/remove-acknowledgement", kind, name, None)
    }

    /// Ask the server to re-run the object's check immediately.
    pub fn reschedule_check(&self, kind: ObjectKind, name: &str) -> Result<(), ApiError> {
        self.post_action("/v1/actions/reschedule-check", kind, name, None)
    }
}

/// Turn a non-success response into [`ApiError::Status`], keeping the
/// response body as the error detail.
fn check_status(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().unwrap_or_else(|_| "".into());
        return Err(ApiError::Status { status, body });
    }
    Ok(res)
}
