//! Gateway Authentication
//!
//! The gateway issues a session token from `/rest_login`; every later call
//! presents it in the `Auth` header. The handshake runs once per connector.

use super::error::{GatewayError, GatewayResult};
use super::http::GatewayHttpClient;
use super::request::RequestBuilder;
use crate::config::HostConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

/// Login endpoint, relative to the gateway origin
pub const LOGIN_PATH: &str = "/rest_login";

/// Header carrying the session token
pub const AUTH_HEADER: &str = "Auth";

/// Session credential returned by the login handshake
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// `Basic {token}`, marked sensitive so it stays out of debug output
    pub fn header_value(&self) -> GatewayResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Basic {}", self.0)).map_err(|_| {
            GatewayError::Authentication("session token is not a valid header value".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Password to send on login, decoding it first when it is stored encoded
pub fn login_password(config: &HostConfig) -> GatewayResult<String> {
    if !config.encrypt_password {
        return Ok(config.password.clone());
    }

    let bytes = STANDARD
        .decode(config.password.trim())
        .map_err(|e| GatewayError::Config(format!("encrypted password is not valid base64: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|_| GatewayError::Config("encrypted password is not valid UTF-8".into()))
}

/// Exchange username and password for a session token.
///
/// Gateway rejections and malformed login responses are authentication
/// errors; connection failures keep their transport classification.
pub async fn login(
    http: &GatewayHttpClient,
    builder: &RequestBuilder,
    config: &HostConfig,
) -> GatewayResult<SessionToken> {
    let password = login_password(config)?;
    let request = builder.build_raw(
        Method::POST,
        LOGIN_PATH,
        &json!({
            "username": config.username,
            "password": password,
        }),
    )?;

    let body = http.execute(request, None).await.map_err(|e| match e {
        GatewayError::Gateway { status, message } => {
            GatewayError::Authentication(format!("login rejected ({status}): {message}"))
        }
        other => other,
    })?;

    let response: LoginResponse = serde_json::from_str(&body).map_err(|_| {
        GatewayError::Authentication("login response is not valid JSON".into())
    })?;

    match response.access_token {
        Some(token) if !token.trim().is_empty() => Ok(SessionToken::new(token.trim())),
        _ => Err(GatewayError::Authentication(
            "login response did not contain an access token".into(),
        )),
    }
}
