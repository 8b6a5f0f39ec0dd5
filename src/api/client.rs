//! HTTP client for the onetimesecret.com API.
//!
//! Every operation is a single `POST` with a form-encoded body and
//! `Accept: application/json`, even the logically read-only ones; that
//! is the remote API's convention. A response status of 400 or above is
//! decoded as the service's error payload and surfaced as
//! [`OtsError::Api`]; anything else is decoded against the operation's
//! success schema.

use std::sync::Arc;

use base64::prelude::*;

use crate::api::options::{apply_all, Params, SecretOption};
use crate::api::types::{GeneratedSecret, Metadata};
use crate::errors::{ApiError, OtsError, Result};

/// Production API base.
const BASE_API: &str = "https://onetimesecret.com/api/v1";

/// Identifies this client to the service.
const USER_AGENT: &str = concat!("onetimesecret-cli/", env!("CARGO_PKG_VERSION"));

/// Snapshot of an outgoing request, handed to a request observer.
///
/// Carries the parameter set exactly as it goes on the wire. Credentials
/// are reduced to the `authenticated` flag; the token itself is never
/// captured.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub url: String,
    pub params: Vec<(String, String)>,
    pub authenticated: bool,
}

/// Snapshot of an incoming response, handed to a response observer.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub body: String,
}

/// Observer for outgoing requests. Diagnostic use only.
pub type RequestHook = Arc<dyn Fn(&RequestSnapshot) + Send + Sync>;

/// Observer for incoming responses. Diagnostic use only.
pub type ResponseHook = Arc<dyn Fn(&ResponseSnapshot) + Send + Sync>;

/// Client for the onetimesecret.com API.
///
/// Holds no mutable state, so a configured client can be shared freely
/// across concurrently executing calls. Construction performs no I/O.
#[derive(Clone)]
pub struct Client {
    username: Option<String>,
    api_token: Option<String>,
    base_url: String,
    agent: ureq::Agent,
    on_request: Option<RequestHook>,
    on_response: Option<ResponseHook>,
}

impl Client {
    /// Anonymous client against the production API.
    pub fn new() -> Self {
        Self {
            username: None,
            api_token: None,
            base_url: BASE_API.to_string(),
            agent: build_agent(),
            on_request: None,
            on_response: None,
        }
    }

    /// Authenticated client against the production API.
    ///
    /// Empty strings are treated as absent; unless both fields are
    /// non-empty the client stays anonymous.
    pub fn with_credentials(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        let username = username.into();
        let api_token = api_token.into();
        Self {
            username: (!username.is_empty()).then_some(username),
            api_token: (!api_token.is_empty()).then_some(api_token),
            ..Self::new()
        }
    }

    /// Override the API base URL (self-hosted instances, tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Install an observer that sees every outgoing request.
    ///
    /// Intended for single-threaded diagnostic use; production code
    /// leaves this unset.
    pub fn on_request(mut self, hook: RequestHook) -> Self {
        self.on_request = Some(hook);
        self
    }

    /// Install an observer that sees every incoming response.
    pub fn on_response(mut self, hook: ResponseHook) -> Self {
        self.on_response = Some(hook);
        self
    }

    /// Create a secret with the given value and return its metadata.
    pub fn create_secret(&self, value: &str, opts: &[SecretOption]) -> Result<Metadata> {
        let mut params = Params::new();
        params.set("secret", value);
        apply_all(&mut params, opts);
        let body = self.post_form("/share", &params)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Have the service generate a random secret value server-side.
    pub fn generate_secret(&self, opts: &[SecretOption]) -> Result<GeneratedSecret> {
        let mut params = Params::new();
        apply_all(&mut params, opts);
        let body = self.post_form("/generate", &params)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a secret's value. Equivalent to
    /// [`retrieve_secret_with_passphrase`](Self::retrieve_secret_with_passphrase)
    /// with the empty passphrase.
    ///
    /// One-time secrets are destroyed on first successful read; a second
    /// call reports "Unknown secret".
    pub fn retrieve_secret(&self, secret_key: &str) -> Result<String> {
        self.retrieve_secret_with_passphrase(secret_key, "")
    }

    /// Fetch the value of a secret that is protected by a passphrase.
    ///
    /// An empty passphrase is omitted from the request entirely, so an
    /// empty passphrase and "no passphrase" are indistinguishable on the
    /// wire. Nonexistent, already-consumed, and wrong-passphrase secrets
    /// all fail with the service message "Unknown secret".
    pub fn retrieve_secret_with_passphrase(
        &self,
        secret_key: &str,
        passphrase: &str,
    ) -> Result<String> {
        let mut params = Params::new();
        if !passphrase.is_empty() {
            params.set("passphrase", passphrase);
        }
        let body = self.post_form(&format!("/secret/{secret_key}"), &params)?;
        let secret: GeneratedSecret = serde_json::from_str(&body)?;
        Ok(secret.value)
    }

    /// Fetch metadata about a secret without consuming it.
    ///
    /// Repeated calls are safe and do not alter the received state.
    pub fn retrieve_metadata(&self, metadata_key: &str) -> Result<Metadata> {
        let body = self.post_form(&format!("/private/{metadata_key}"), &Params::new())?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch recent metadata for the authenticated account. The returned
    /// entries carry no secret keys.
    ///
    /// The upstream endpoint has a path-routing collision with the
    /// by-key metadata endpoint and is documented as unreliable; treat a
    /// success as best-effort. Whatever the service returns for an
    /// unauthenticated client is forwarded unchanged.
    pub fn retrieve_recent_metadata(&self) -> Result<Vec<Metadata>> {
        let body = self.post_form("/private/recent", &Params::new())?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Perform one request/response exchange and apply the decoding rule.
    ///
    /// Statuses of 400 and above decode the error schema and surface it;
    /// if the error body itself fails to decode, that failure is what
    /// the caller sees. Lower statuses hand the raw body back for the
    /// operation's own schema.
    fn post_form(&self, path: &str, params: &Params) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        if let Some(hook) = &self.on_request {
            hook(&RequestSnapshot {
                url: url.clone(),
                params: params.pairs().to_vec(),
                authenticated: self.auth_header().is_some(),
            });
        }

        let mut request = self
            .agent
            .post(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT);
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }

        let mut response =
            request.send_form(params.pairs().iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        if let Some(hook) = &self.on_response {
            hook(&ResponseSnapshot {
                status,
                body: body.clone(),
            });
        }

        if status >= 400 {
            let api_err: ApiError = serde_json::from_str(&body)?;
            return Err(OtsError::Api(api_err));
        }

        Ok(body)
    }

    /// `Authorization` header value, present only when both identity
    /// fields are set, never one without the other.
    fn auth_header(&self) -> Option<String> {
        match (&self.username, &self.api_token) {
            (Some(user), Some(token)) => Some(format!(
                "Basic {}",
                BASE64_STANDARD.encode(format!("{user}:{token}"))
            )),
            _ => None,
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

/// Agent with status-as-error disabled so 4xx/5xx come back as data and
/// the error payload can be decoded.
fn build_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}
