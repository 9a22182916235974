//! Declarative resource layer
//!
//! A resource definition is the declared configuration of one GSS object. The
//! lifecycle functions here drive the [`ObjectManager`] the way an
//! infrastructure-as-code host would: create then refresh, read back into
//! state, update only when the declared and stored values really differ, and
//! delete idempotently.
//!
//! # Architecture
//!
//! - [`names`] - FQDN/zone/property reconciliation helpers
//! - [`schema`] - Field validators
//! - [`application`], [`answer`], [`search_order`] - Per-type definitions and lifecycles
//!
//! # Example
//!
//! ```yaml
//! resource: bluecatgss_answer
//! application_id: 10
//! addresses: ["1.2.3.4"]
//! region: us
//! name: ans1
//! type: ip_address
//! ```

pub mod answer;
pub mod application;
pub mod names;
pub mod schema;
pub mod search_order;

use crate::gateway::Connector;
use crate::gss::ObjectManager;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub use answer::AnswerConfig;
pub use application::ApplicationConfig;
pub use schema::SchemaError;
pub use search_order::SearchOrderConfig;

/// Resource id plus declared configuration, as the host keeps it in state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceData<T> {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub config: T,
}

impl<T> ResourceData<T> {
    pub fn new(config: T) -> Self {
        Self {
            id: String::new(),
            config,
        }
    }

    pub fn with_id(id: impl Into<String>, config: T) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record the gateway-assigned id; `None` clears it
    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id.map(|id| id.to_string()).unwrap_or_default();
    }

    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// The id as a number, if it is one
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }
}

/// Lifecycle of one resource type
#[async_trait]
pub trait Resource: Serialize + Clone + Send + Sync + Sized {
    /// Name the host knows this resource type by
    const TYPE_NAME: &'static str;

    fn validate(&self) -> Result<(), SchemaError>;

    /// Whether `declared` differs from the refreshed `prior` state in a way
    /// that needs an update call
    fn needs_update(prior: &Self, declared: &Self) -> bool;

    /// Whether the change can only be applied by deleting and recreating
    fn requires_replacement(_prior: &Self, _declared: &Self) -> bool {
        false
    }

    async fn create<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()>;

    async fn read<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()>;

    async fn update<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()>;

    async fn delete<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()>;
}

/// Lifecycle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

/// Run one action on a resource. Returns the resulting state, or `None` once deleted.
pub async fn run<R: Resource, C: Connector>(
    manager: &ObjectManager<C>,
    action: Action,
    mut data: ResourceData<R>,
) -> Result<Option<ResourceData<R>>> {
    data.config.validate()?;

    match action {
        Action::Create => {
            R::create(manager, &mut data).await?;
        }
        Action::Read => {
            R::read(manager, &mut data).await?;
        }
        Action::Update => {
            let mut current = data.clone();
            R::read(manager, &mut current).await?;

            if R::requires_replacement(&current.config, &data.config) {
                tracing::info!(resource = R::TYPE_NAME, id = %current.id, "Replacing resource");
                R::delete(manager, &mut current).await?;
                data.clear_id();
                R::create(manager, &mut data).await?;
            } else if R::needs_update(&current.config, &data.config) {
                data.id = current.id;
                R::update(manager, &mut data).await?;
            } else {
                tracing::info!(resource = R::TYPE_NAME, id = %current.id, "Resource is up to date");
                data = current;
            }
        }
        Action::Delete => {
            R::delete(manager, &mut data).await?;
            return Ok(None);
        }
    }

    Ok(Some(data))
}

/// A resource definition file, tagged by resource type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource")]
pub enum ResourceDefinition {
    #[serde(rename = "bluecatgss_application")]
    Application(ApplicationConfig),
    #[serde(rename = "bluecatgss_answer")]
    Answer(AnswerConfig),
    #[serde(rename = "bluecatgss_search_order")]
    SearchOrder(SearchOrderConfig),
}

impl ResourceDefinition {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse YAML resource definition")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON resource definition")
    }

    /// Load a definition, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            ResourceDefinition::Application(_) => ApplicationConfig::TYPE_NAME,
            ResourceDefinition::Answer(_) => AnswerConfig::TYPE_NAME,
            ResourceDefinition::SearchOrder(_) => SearchOrderConfig::TYPE_NAME,
        }
    }

    /// Run `action` on this definition and return the resulting state as JSON
    pub async fn apply<C: Connector>(
        self,
        manager: &ObjectManager<C>,
        action: Action,
        id: Option<String>,
    ) -> Result<Option<Value>> {
        let id = id.unwrap_or_default();
        let state = match self {
            ResourceDefinition::Application(config) => {
                to_state(run(manager, action, ResourceData::with_id(id, config)).await?)?
            }
            ResourceDefinition::Answer(config) => {
                to_state(run(manager, action, ResourceData::with_id(id, config)).await?)?
            }
            ResourceDefinition::SearchOrder(config) => {
                to_state(run(manager, action, ResourceData::with_id(id, config)).await?)?
            }
        };
        Ok(state)
    }
}

fn to_state<T: Serialize>(data: Option<ResourceData<T>>) -> Result<Option<Value>> {
    data.map(|data| serde_json::to_value(&data).context("Failed to serialize resource state"))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_definition_applies_schema_defaults() {
        let definition = ResourceDefinition::from_yaml(
            r#"
resource: bluecatgss_application
configuration: Default
view: Internal
absolute_name: www
zone: example.com
fallback: ["10.0.0.1"]
health_check:
  - type: TCP
"#,
        )
        .unwrap();

        let ResourceDefinition::Application(config) = definition else {
            panic!("expected an application definition");
        };
        assert_eq!(config.ttl, -1);
        assert_eq!(config.health_check[0].port, "22");
        assert_eq!(config.health_check[0].check_every, 30);
    }

    #[test]
    fn test_json_search_order_definition() {
        let definition = ResourceDefinition::from_json(
            r#"{
                "resource": "bluecatgss_search_order",
                "name": "so1",
                "nodes": [{"name": "us"}, {"name": "eu"}],
                "links": [{"source": "us", "target": "eu", "cost": 5}]
            }"#,
        )
        .unwrap();

        assert_eq!(definition.resource_type(), "bluecatgss_search_order");
        let ResourceDefinition::SearchOrder(config) = definition else {
            panic!("expected a search order definition");
        };
        assert!(config.links[0].enable_link);
    }

    #[test]
    fn test_unknown_resource_type_is_rejected() {
        assert!(ResourceDefinition::from_yaml("resource: bluecatgss_zone\nname: x\n").is_err());
    }

    #[test]
    fn test_resource_data_ids() {
        let mut data = ResourceData::new(());
        assert_eq!(data.numeric_id(), None);
        data.set_id(Some(55));
        assert_eq!(data.id(), "55");
        assert_eq!(data.numeric_id(), Some(55));
        data.clear_id();
        assert!(data.id().is_empty());
    }

    #[test]
    fn test_state_serializes_flat() {
        let data = ResourceData::with_id(
            "7",
            SearchOrderConfig {
                name: "so1".into(),
                nodes: Vec::new(),
                links: Vec::new(),
            },
        );
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["name"], "so1");
    }
}
