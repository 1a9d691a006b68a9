use log::{debug, info, warn};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::RedfishConfig;

/// # Redfish session transport
///
/// Management controllers (iLO, iRMC, iDRAC) all follow the same session
/// handshake:
///
/// | Step    | Request                                   | Expected            |
/// |---------|-------------------------------------------|---------------------|
/// | Login   | `POST <session path>` `{UserName, Password}` | `201`, `X-Auth-Token`, `Location` |
/// | Query   | `GET <resource>` with `X-Auth-Token`      | `2xx` JSON body     |
/// | Logout  | `DELETE <Location>` with `X-Auth-Token`   | `2xx`               |
///
/// The service root (`/redfish/v1/`) answers without a token and carries the
/// `RedfishVersion` some dialect decisions depend on.

pub const SERVICE_ROOT: &str = "/redfish/v1/";
pub const SESSION_SERVICE_PATH: &str = "/redfish/v1/SessionService/Sessions/";
pub const LEGACY_SESSION_PATH: &str = "/redfish/v1/Sessions/";

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session created at {0} carried no auth token")]
    MissingToken(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

fn status_error(url: String, status: StatusCode) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound(url),
        _ => FetchError::Status {
            url,
            status: status.as_u16(),
        },
    }
}

/// Idempotent read of one Redfish resource.
pub trait Fetch {
    fn get(&self, path: &str) -> Result<Value, FetchError>;
}

pub struct RedfishClient {
    http: Client,
    base_url: String,
}

impl RedfishClient {
    pub fn new(address: &str, config: &RedfishConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", address.trim_end_matches('/'))
        };

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn get_json(&self, path: &str, token: Option<&str>) -> Result<Value, FetchError> {
        let start = Instant::now();
        let url = self.url(path);
        let mut request = self
            .http
            .get(&url)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("Can not get information at url: {}. Code {}", url, status.as_u16());
            return Err(status_error(url, status));
        }

        let body = response.text()?;
        let value = serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })?;
        debug!("GET {} took: {} ms", url, start.elapsed().as_millis());
        Ok(value)
    }

    /// Opens a token session at `session_path`.
    pub fn login(self, session_path: &str, username: &str, password: &str) -> Result<Session, FetchError> {
        let url = self.url(session_path);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("OData-Version", "4.0")
            .body(json!({ "UserName": username, "Password": password }).to_string())
            .send()?;

        if response.status() != StatusCode::CREATED {
            warn!(
                "Can not get session token at url: {}. Code {}",
                url,
                response.status().as_u16()
            );
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let headers = response.headers();
        let token = headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| FetchError::MissingToken(url.clone()))?;
        let location = headers
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        info!("Created session at url: {}", url);
        Ok(Session {
            client: self,
            token,
            location,
        })
    }
}

impl Fetch for RedfishClient {
    fn get(&self, path: &str) -> Result<Value, FetchError> {
        self.get_json(path, None)
    }
}

/// Authenticated session; expire it with [`Session::logout`].
pub struct Session {
    client: RedfishClient,
    token: String,
    location: Option<String>,
}

impl Session {
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Content-Type", "application/json")
            .header(AUTH_TOKEN_HEADER, &self.token)
    }

    pub fn logout(self) -> Result<(), FetchError> {
        let Some(location) = self.location.as_deref() else {
            warn!("Session on {} has no location to expire", self.client.base_url());
            return Ok(());
        };

        let url = self.client.url(location);
        let response = self.authorized(self.client.http.delete(&url)).send()?;
        if !response.status().is_success() {
            warn!("Can not expire session at url: {}. Code {}", url, response.status().as_u16());
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        info!("Expired session at url: {}", url);
        Ok(())
    }
}

impl Fetch for Session {
    fn get(&self, path: &str) -> Result<Value, FetchError> {
        self.client.get_json(path, Some(&self.token))
    }
}
