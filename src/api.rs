// API client module: a small blocking HTTP client that talks to the
// console's REST API. Only two endpoints are used, authentication and
// collection creation, and both are single request/response calls.

use anyhow::{Context, Result};
use log::{error, info};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::Config;

const AUTHENTICATE_PATH: &str = "/api/v1/authenticate";
const COLLECTIONS_PATH: &str = "/api/v1/collections";

/// Blocking client holding the reqwest client and the console base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Login payload: the access key pair goes in as username/password.
#[derive(Serialize, Debug)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of a successful authentication. Only the token is used.
#[derive(Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
}

/// Result of an authentication attempt. An empty `token` means the
/// console refused the credentials; `status` says how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub status: u16,
    pub token: String,
}

/// Collection creation payload.
#[derive(Serialize, Debug)]
pub struct CollectionRequest<'a> {
    pub name: &'a str,
    pub hosts: &'a [String],
}

/// Raw status and body of a collection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiClient {
    /// Build a client from the loaded configuration. The request timeout
    /// applies to every call made through it.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.credentials.base_url.clone(),
        })
    }

    /// Exchange the access key pair for a bearer token.
    ///
    /// Any status other than 200 is logged and returned with an empty
    /// token. Transport failures are returned as errors.
    pub fn authenticate(&self, access_key: &str, access_secret: &str) -> Result<AuthOutcome> {
        let url = format!("{}{}", &self.base_url, AUTHENTICATE_PATH);
        let req = AuthRequest {
            username: access_key,
            password: access_secret,
        };
        let res = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .context("Failed to send authenticate request")?;

        let status = res.status();
        if status != StatusCode::OK {
            error!("Failed to authenticate, Status Code: {}", status.as_u16());
            return Ok(AuthOutcome {
                status: status.as_u16(),
                token: String::new(),
            });
        }

        let resp: AuthResponse = res.json().context("Parsing authenticate response json")?;
        info!("Authenticated against {}", &self.base_url);
        Ok(AuthOutcome {
            status: status.as_u16(),
            token: resp.token,
        })
    }

    /// POST one collection. The status and body are returned as-is;
    /// deciding what counts as success is up to the caller.
    pub fn create_collection(&self, token: &str, name: &str, hosts: &[String]) -> Result<ApiResponse> {
        let url = format!("{}{}", &self.base_url, COLLECTIONS_PATH);
        let payload = CollectionRequest { name, hosts };
        let res = self
            .client
            .post(&url)
            .headers(collection_headers(token)?)
            .json(&payload)
            .send()
            .with_context(|| format!("Failed to send create request for collection {}", name))?;

        let status = res.status().as_u16();
        let body = res
            .text()
            .with_context(|| format!("Failed to read response for collection {}", name))?;
        Ok(ApiResponse { status, body })
    }
}

/// Headers the collections endpoint expects on every request.
fn collection_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json; charset=UTF-8"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .context("Token contains characters not allowed in a header")?;
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}
