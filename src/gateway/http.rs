//! HTTP requester for BlueCat Gateway REST calls

use super::auth::{SessionToken, AUTH_HEADER};
use super::error::{GatewayError, GatewayResult};
use super::request::PreparedRequest;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Extract the gateway's message from an error body.
///
/// The gateway answers failures with `{"message": ...}`; some endpoints use
/// `error` or `detail`. Plain-text bodies are used as-is.
pub fn gateway_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error", "detail"] {
            match fields.get(key) {
                Some(Value::String(message)) if !message.trim().is_empty() => {
                    return message.trim().to_string();
                }
                Some(Value::Object(inner)) => {
                    if let Some(Value::String(message)) = inner.get("message") {
                        return message.trim().to_string();
                    }
                }
                _ => {}
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return sanitize_for_log(text);
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

/// HTTP client wrapper for gateway calls
#[derive(Clone)]
pub struct GatewayHttpClient {
    client: Client,
}

impl GatewayHttpClient {
    /// Create a new HTTP client
    pub fn new() -> GatewayResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("bluecat-gss/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Send one request and return the raw response body.
    ///
    /// A single attempt: transport failures and non-2xx statuses are returned
    /// to the caller as they happen.
    pub async fn execute(
        &self,
        request: PreparedRequest,
        token: Option<&SessionToken>,
    ) -> GatewayResult<String> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(token) = token {
            builder = builder.header(AUTH_HEADER, token.header_value()?);
        }

        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("Gateway error: {} - {}", status, sanitize_for_log(&body));
            return Err(GatewayError::Gateway {
                status: status.as_u16(),
                message: gateway_message(status, &body),
            });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "é".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
        assert!(sanitized.starts_with(&"é".repeat(MAX_LOG_BODY_LENGTH)));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("line\nbreak\t"), "linebreak");
    }

    #[test]
    fn test_gateway_message_from_json() {
        let message = gateway_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Application already exists"}"#,
        );
        assert_eq!(message, "Application already exists");

        let nested = gateway_message(
            StatusCode::CONFLICT,
            r#"{"error": {"message": "Search order in use"}}"#,
        );
        assert_eq!(nested, "Search order in use");
    }

    #[test]
    fn test_gateway_message_falls_back_to_text_and_reason() {
        assert_eq!(
            gateway_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "upstream down"
        );
        assert_eq!(gateway_message(StatusCode::NOT_FOUND, ""), "Not Found");
    }
}
