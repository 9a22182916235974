//! Request construction
//!
//! An [`Operation`] describes one CRUD call against a GSS object: which verb,
//! which REST route and what JSON payload. The [`RequestBuilder`] turns it into
//! a [`PreparedRequest`] rooted at the gateway's API base URL. Both are pure;
//! nothing here touches the network.

use super::error::{GatewayError, GatewayResult};
use crate::config::HostConfig;
use crate::gss::GssObject;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

/// The four verbs the connector exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Read,
    Update,
    Delete,
}

impl OperationKind {
    /// HTTP method used for this verb
    pub fn method(self) -> Method {
        match self {
            OperationKind::Create => Method::POST,
            OperationKind::Read => Method::GET,
            OperationKind::Update => Method::PUT,
            OperationKind::Delete => Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Create => "create",
            OperationKind::Read => "read",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an operation is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Collection name, appended as `{base}/{name}`; used by create
    Collection(String),
    /// Item sub-path, appended as `{base}{sub_path}`; used by read, update and delete
    Item(String),
}

/// A validated request descriptor for one GSS object call
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    route: Route,
    payload: Value,
}

impl Operation {
    /// Build a descriptor, rejecting verb/route combinations the gateway does not serve.
    ///
    /// Create must target a collection; every other verb must target an item path.
    pub fn new(kind: OperationKind, route: Route, payload: Value) -> GatewayResult<Self> {
        let valid = match (&kind, &route) {
            (OperationKind::Create, Route::Collection(name)) => {
                !name.trim().is_empty() && !name.contains('/')
            }
            (OperationKind::Create, Route::Item(_)) => false,
            (_, Route::Item(path)) => !path.trim_matches('/').trim().is_empty(),
            (_, Route::Collection(_)) => false,
        };

        if !valid {
            return Err(GatewayError::InvalidOperation(format!(
                "{kind} cannot target {route:?}"
            )));
        }

        Ok(Self {
            kind,
            route,
            payload,
        })
    }

    /// POST the object to its collection
    pub fn create<T: GssObject>(object: &T) -> GatewayResult<Self> {
        Self::new(
            OperationKind::Create,
            Route::Collection(T::OBJECT_TYPE.to_string()),
            to_payload(object)?,
        )
    }

    /// GET the object from its item path
    pub fn read<T: GssObject>(object: &T) -> GatewayResult<Self> {
        Self::for_item(OperationKind::Read, object)
    }

    /// PUT the object to its item path
    pub fn update<T: GssObject>(object: &T) -> GatewayResult<Self> {
        Self::for_item(OperationKind::Update, object)
    }

    /// DELETE the object at its item path
    pub fn delete<T: GssObject>(object: &T) -> GatewayResult<Self> {
        Self::for_item(OperationKind::Delete, object)
    }

    fn for_item<T: GssObject>(kind: OperationKind, object: &T) -> GatewayResult<Self> {
        Self::new(kind, Route::Item(T::sub_path()), to_payload(object)?)
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

fn to_payload<T: Serialize>(object: &T) -> GatewayResult<Value> {
    serde_json::to_value(object)
        .map_err(|e| GatewayError::InvalidOperation(format!("cannot serialize payload: {e}")))
}

/// A request ready to hand to the HTTP requester
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

/// Builds gateway URLs and request bodies from operations
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    origin: String,
    base_url: String,
}

impl RequestBuilder {
    /// Create a builder for the given host.
    ///
    /// Fails with a configuration error when the host settings are incomplete
    /// or do not form a parseable URL.
    pub fn new(config: &HostConfig) -> GatewayResult<Self> {
        let config = config.clone().validate()?;
        let base_url = config.base_url();

        Url::parse(&base_url)
            .map_err(|e| GatewayError::Config(format!("invalid gateway URL '{base_url}': {e}")))?;

        Ok(Self {
            origin: config.origin(),
            base_url,
        })
    }

    /// `{transport}://{host}:{port}`, used for endpoints outside the API tree
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{transport}://{host}:{port}/api/{api_version}`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a route
    pub fn url_for(&self, route: &Route) -> String {
        match route {
            Route::Collection(name) => format!("{}/{}", self.base_url, name),
            Route::Item(path) if path.starts_with('/') => format!("{}{}", self.base_url, path),
            Route::Item(path) => format!("{}/{}", self.base_url, path),
        }
    }

    /// Absolute URL for a path relative to the origin, e.g. `/rest_login`
    pub fn origin_url(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }

    /// Turn an operation into a request with a JSON body
    pub fn build(&self, operation: &Operation) -> GatewayResult<PreparedRequest> {
        let body = serde_json::to_vec(operation.payload())
            .map_err(|e| GatewayError::InvalidOperation(format!("cannot encode body: {e}")))?;

        Ok(PreparedRequest {
            method: operation.kind().method(),
            url: self.url_for(operation.route()),
            body,
            headers: json_headers(),
        })
    }

    /// Request for a non-API endpoint under the origin
    pub fn build_raw(
        &self,
        method: Method,
        path: &str,
        payload: &Value,
    ) -> GatewayResult<PreparedRequest> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| GatewayError::InvalidOperation(format!("cannot encode body: {e}")))?;

        Ok(PreparedRequest {
            method,
            url: self.origin_url(path),
            body,
            headers: json_headers(),
        })
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gss::{Answer, Application};
    use serde_json::json;

    fn host() -> HostConfig {
        HostConfig {
            host: "gw.example.com".into(),
            port: "5000".into(),
            transport: "http".into(),
            username: "admin".into(),
            password: "secret".into(),
            api_version: "v1".into(),
            encrypt_password: false,
        }
    }

    #[test]
    fn test_collection_and_item_urls() {
        let builder = RequestBuilder::new(&host()).unwrap();
        assert_eq!(
            builder.url_for(&Route::Collection("bluecat_gss_answer".into())),
            "http://gw.example.com:5000/api/v1/bluecat_gss_answer"
        );
        assert_eq!(
            builder.url_for(&Route::Item("/bluecat_gss_answer".into())),
            "http://gw.example.com:5000/api/v1/bluecat_gss_answer"
        );
        assert_eq!(
            builder.url_for(&Route::Item("bluecat_gss_answer".into())),
            "http://gw.example.com:5000/api/v1/bluecat_gss_answer"
        );
    }

    #[test]
    fn test_origin_url() {
        let builder = RequestBuilder::new(&host()).unwrap();
        assert_eq!(
            builder.origin_url("/rest_login"),
            "http://gw.example.com:5000/rest_login"
        );
    }

    #[test]
    fn test_builder_rejects_empty_host() {
        let mut config = host();
        config.host = String::new();
        assert!(matches!(
            RequestBuilder::new(&config),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn test_builder_rejects_unparseable_host() {
        let mut config = host();
        config.host = "bad host".into();
        assert!(matches!(
            RequestBuilder::new(&config),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn test_create_routes_to_collection() {
        let answer = Answer {
            application_id: 10,
            name: "ans1".into(),
            ..Default::default()
        };
        let op = Operation::create(&answer).unwrap();
        assert_eq!(op.kind(), OperationKind::Create);
        assert_eq!(op.route(), &Route::Collection("bluecat_gss_answer".into()));
        assert_eq!(op.payload(), &json!({"application_id": 10, "name": "ans1"}));
    }

    #[test]
    fn test_item_verbs_route_to_sub_path() {
        let app = Application {
            absolute_name: "www.example.com".into(),
            ..Default::default()
        };
        for op in [
            Operation::read(&app).unwrap(),
            Operation::update(&app).unwrap(),
            Operation::delete(&app).unwrap(),
        ] {
            assert_eq!(op.route(), &Route::Item("/bluecat_gss_application".into()));
        }
    }

    #[test]
    fn test_mode_mismatch_is_rejected() {
        let create_item = Operation::new(
            OperationKind::Create,
            Route::Item("/bluecat_gss_answer".into()),
            Value::Null,
        );
        assert!(matches!(create_item, Err(GatewayError::InvalidOperation(_))));

        let read_collection = Operation::new(
            OperationKind::Read,
            Route::Collection("bluecat_gss_answer".into()),
            Value::Null,
        );
        assert!(read_collection.is_err());

        let empty = Operation::new(OperationKind::Delete, Route::Item("/".into()), Value::Null);
        assert!(empty.is_err());
    }

    #[test]
    fn test_build_sets_method_url_and_body() {
        let builder = RequestBuilder::new(&host()).unwrap();
        let answer = Answer {
            application_id: 10,
            id: Some(55),
            ..Default::default()
        };
        let request = builder.build(&Operation::delete(&answer).unwrap()).unwrap();

        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.url,
            "http://gw.example.com:5000/api/v1/bluecat_gss_answer"
        );
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, json!({"application_id": 10, "id": 55}));
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    }
}
