//! Gateway connector
//!
//! [`Connector`] is the seam between the object manager and the wire: four
//! verbs over [`Operation`] descriptors. [`GatewayConnector`] is the REST
//! implementation; it logs in once at construction and reuses the session
//! token for every call.

use super::auth::{self, SessionToken};
use super::error::{GatewayError, GatewayResult};
use super::http::GatewayHttpClient;
use super::request::{Operation, OperationKind, RequestBuilder};
use crate::config::HostConfig;
use async_trait::async_trait;
use serde_json::Value;

/// CRUD capability over GSS objects
#[async_trait]
pub trait Connector: Send + Sync {
    /// POST to the collection; returns the raw response body for the caller to decode
    async fn create_object(&self, operation: &Operation) -> GatewayResult<String>;

    /// GET the item; returns the decoded JSON response
    async fn get_object(&self, operation: &Operation) -> GatewayResult<Value>;

    /// PUT the item; returns the decoded JSON response
    async fn update_object(&self, operation: &Operation) -> GatewayResult<Value>;

    /// DELETE the item; returns the gateway's message
    async fn delete_object(&self, operation: &Operation) -> GatewayResult<String>;
}

/// REST connector for a BlueCat Gateway
#[derive(Clone)]
pub struct GatewayConnector {
    config: HostConfig,
    builder: RequestBuilder,
    http: GatewayHttpClient,
    token: SessionToken,
}

impl GatewayConnector {
    /// Validate the host settings and log in
    pub async fn connect(config: HostConfig) -> GatewayResult<Self> {
        Self::connect_with(config, GatewayHttpClient::new()?).await
    }

    /// Like [`connect`](Self::connect) with a caller-supplied HTTP client
    pub async fn connect_with(config: HostConfig, http: GatewayHttpClient) -> GatewayResult<Self> {
        let config = config.validate()?;
        let builder = RequestBuilder::new(&config)?;
        let token = auth::login(&http, &builder, &config).await?;

        tracing::debug!(host = %config.host, port = %config.port, "Gateway session established");

        Ok(Self {
            config,
            builder,
            http,
            token,
        })
    }

    pub fn host_config(&self) -> &HostConfig {
        &self.config
    }

    pub fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    async fn dispatch(&self, expected: OperationKind, operation: &Operation) -> GatewayResult<String> {
        if operation.kind() != expected {
            return Err(GatewayError::InvalidOperation(format!(
                "{} operation passed to {} call",
                operation.kind(),
                expected
            )));
        }

        let request = self.builder.build(operation)?;
        self.http.execute(request, Some(&self.token)).await
    }
}

fn decode(body: &str) -> GatewayResult<Value> {
    serde_json::from_str(body).map_err(GatewayError::Decode)
}

#[async_trait]
impl Connector for GatewayConnector {
    async fn create_object(&self, operation: &Operation) -> GatewayResult<String> {
        self.dispatch(OperationKind::Create, operation).await
    }

    async fn get_object(&self, operation: &Operation) -> GatewayResult<Value> {
        let body = self.dispatch(OperationKind::Read, operation).await?;
        decode(&body)
    }

    async fn update_object(&self, operation: &Operation) -> GatewayResult<Value> {
        let body = self.dispatch(OperationKind::Update, operation).await?;
        decode(&body)
    }

    async fn delete_object(&self, operation: &Operation) -> GatewayResult<String> {
        self.dispatch(OperationKind::Delete, operation).await
    }
}
