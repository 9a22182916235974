//! Routing and decoding for GSS objects

use super::entities::{Answer, Application, SearchOrder};
use crate::gateway::error::{GatewayError, GatewayResult};
use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// A gateway object with its REST routing
pub trait GssObject: Serialize + DeserializeOwned + Default + Debug + Send + Sync {
    /// Collection created objects are posted to
    const OBJECT_TYPE: &'static str;

    /// Human-readable kind, e.g. "GSS Answer"
    const LABEL: &'static str;

    /// Item path for read, update and delete
    fn sub_path() -> String {
        format!("/{}", Self::OBJECT_TYPE)
    }

    /// Gateway-assigned id, present once created or read
    fn id(&self) -> Option<i64>;

    /// Short identity for log lines and error messages
    fn describe(&self) -> String;
}

impl GssObject for Application {
    const OBJECT_TYPE: &'static str = "bluecat_gss_application";
    const LABEL: &'static str = "GSS Application";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn describe(&self) -> String {
        self.absolute_name.clone()
    }
}

impl GssObject for Answer {
    const OBJECT_TYPE: &'static str = "bluecat_gss_answer";
    const LABEL: &'static str = "GSS Answer";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn describe(&self) -> String {
        match self.id {
            Some(id) => format!("{id} (application {})", self.application_id),
            None if !self.name.is_empty() => {
                format!("{} (application {})", self.name, self.application_id)
            }
            None => format!("(application {})", self.application_id),
        }
    }
}

impl GssObject for SearchOrder {
    const OBJECT_TYPE: &'static str = "bluecat_gss_search_order";
    const LABEL: &'static str = "GSS Search Order";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

/// Decode a response body into a new instance
pub fn decode_fresh<T: GssObject>(body: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(GatewayError::Decode)
}

/// Decode a response on top of the request instance.
///
/// Fields present in the response replace the request's values; fields the
/// gateway leaves out keep what was sent.
pub fn decode_into<T: GssObject>(request: &T, response: Value) -> GatewayResult<T> {
    let mut merged = serde_json::to_value(request).map_err(GatewayError::Decode)?;

    match (merged.as_object_mut(), response) {
        (Some(fields), Value::Object(update)) => fields.extend(update),
        (_, other) => {
            return Err(GatewayError::Decode(serde_json::Error::custom(format!(
                "expected a JSON object, got {other}"
            ))));
        }
    }

    serde_json::from_value(merged).map_err(GatewayError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sub_paths() {
        assert_eq!(Application::sub_path(), "/bluecat_gss_application");
        assert_eq!(Answer::sub_path(), "/bluecat_gss_answer");
        assert_eq!(SearchOrder::sub_path(), "/bluecat_gss_search_order");
    }

    #[test]
    fn test_decode_into_keeps_request_fields() {
        let request = Application {
            configuration: "Default".into(),
            view: "Internal".into(),
            absolute_name: "www.example.com".into(),
            ..Default::default()
        };
        let decoded = decode_into(
            &request,
            json!({"id": 7, "properties": "a=1|", "absolute_name": "www.example.com"}),
        )
        .unwrap();

        assert_eq!(decoded.id, Some(7));
        assert_eq!(decoded.properties, "a=1|");
        assert_eq!(decoded.configuration, "Default");
        assert_eq!(decoded.view, "Internal");
    }

    #[test]
    fn test_decode_into_rejects_non_objects() {
        let err = decode_into(&Answer::default(), json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[test]
    fn test_decode_fresh_reports_shape_errors() {
        let err = decode_fresh::<Answer>(r#"{"id": "fifty-five"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }
}
