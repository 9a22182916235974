//! GSS wire entities
//!
//! Field names follow the gateway's JSON. Empty values are left out of request
//! bodies, and `null` in a response reads as the field's default.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// GSS Application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub configuration: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub view: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub absolute_name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub fallback: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub ttl: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub properties: String,
    #[serde(
        rename = "health_check_type",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub health_check: Vec<HealthCheck>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub search_order: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// Health probe kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthCheckType {
    Tcp,
    HttpHead,
    Customize,
    #[default]
    NoHealthCheck,
}

fn default_check_every() -> i64 {
    30
}

fn default_url_path() -> String {
    "/".to_string()
}

fn default_probe_port() -> String {
    "22".to_string()
}

/// Health check block of an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(rename = "type", default)]
    pub check_type: HealthCheckType,
    #[serde(default = "default_check_every")]
    pub check_every: i64,
    /// HTTP_HEAD only
    #[serde(default)]
    pub secure_connection: bool,
    /// HTTP_HEAD only
    #[serde(default = "default_url_path")]
    pub appended_url_path: String,
    /// HTTP_HEAD only
    #[serde(default, deserialize_with = "nullable")]
    pub optional_header: String,
    /// HTTP_HEAD only
    #[serde(default, deserialize_with = "nullable")]
    pub header_value: String,
    /// TCP only
    #[serde(default = "default_probe_port")]
    pub port: String,
    /// CUSTOMIZE only
    #[serde(default, deserialize_with = "nullable")]
    pub custom_data: BTreeMap<String, String>,
}

impl Default for HealthCheck {
    fn default() -> Self {
        Self {
            check_type: HealthCheckType::default(),
            check_every: default_check_every(),
            secure_connection: false,
            appended_url_path: default_url_path(),
            optional_header: String::new(),
            header_value: String::new(),
            port: default_probe_port(),
            custom_data: BTreeMap::new(),
        }
    }
}

/// How an answer resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    IpAddress,
    Fqdn,
}

impl AnswerType {
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerType::IpAddress => "ip_address",
            AnswerType::Fqdn => "fqdn",
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip_address" => Ok(AnswerType::IpAddress),
            "fqdn" => Ok(AnswerType::Fqdn),
            other => Err(format!("unknown answer type '{other}'")),
        }
    }
}

/// GSS Answer, owned by one application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero")]
    pub application_id: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub answer_type: Option<AnswerType>,
}

/// Search order graph node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
}

fn enabled() -> bool {
    true
}

/// Weighted edge between two nodes of a search order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub cost: i64,
    #[serde(default = "enabled")]
    pub enable_link: bool,
}

/// GSS Search Order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOrder {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}
