//! `bluecatgss_search_order` resource
//!
//! Link endpoints are not checked against the node list here; the gateway
//! rejects links to unknown nodes.

use super::schema::{SchemaError, Validator};
use super::{Resource, ResourceData};
use crate::gateway::Connector;
use crate::gss::{Link, Node, ObjectManager};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Declared GSS Search Order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOrderConfig {
    pub name: String,
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

#[async_trait]
impl Resource for SearchOrderConfig {
    const TYPE_NAME: &'static str = "bluecatgss_search_order";

    fn validate(&self) -> Result<(), SchemaError> {
        let mut validator = Validator::new(Self::TYPE_NAME);
        validator.not_blank("name", &self.name);
        for (index, link) in self.links.iter().enumerate() {
            validator.not_blank(&format!("links.{index}.source"), &link.source);
        }
        validator.finish()
    }

    fn needs_update(prior: &Self, declared: &Self) -> bool {
        prior != declared
    }

    async fn create<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        tracing::debug!("Beginning to create GSS Search Order {}", config.name);

        let order = manager
            .create_search_order(&config.name, config.nodes.clone(), config.links.clone())
            .await
            .with_context(|| format!("Error creating GSS Search Order {}", config.name))?;

        data.set_id(order.id);
        tracing::debug!("Completed to create Search Order {}", data.config.name);

        Self::read(manager, data).await
    }

    async fn read<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let id = data.numeric_id().unwrap_or(0);
        let config = &data.config;
        tracing::debug!("Beginning to get GSS Search Order {}", config.name);

        let order = manager
            .get_search_order(id, &config.name, config.links.clone())
            .await
            .with_context(|| format!("Getting GSS Search Order {} failed", config.name))?;

        if order.id.is_some() {
            data.set_id(order.id);
        }
        data.config.nodes = order.nodes;
        data.config.links = order.links;
        if !order.name.is_empty() {
            data.config.name = order.name;
        }
        tracing::debug!("Completed reading GSS Search Order {}", data.config.name);
        Ok(())
    }

    async fn update<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let id = data.numeric_id().unwrap_or(0);
        let config = &data.config;
        tracing::debug!("Beginning to update GSS Search Order {}", config.name);

        let order = manager
            .update_search_order(&config.name, id, config.nodes.clone(), config.links.clone())
            .await
            .with_context(|| format!("Error updating GSS Search Order {}", config.name))?;

        if order.id.is_some() {
            data.set_id(order.id);
        }
        tracing::debug!("Completed to update GSS Search Order {}", data.config.name);

        Self::read(manager, data).await
    }

    async fn delete<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let name = data.config.name.clone();
        tracing::debug!("Beginning to delete GSS Search Order {}", name);

        manager
            .delete_search_order(&name)
            .await
            .with_context(|| format!("Delete GSS Search Order {name} failed"))?;

        data.clear_id();
        tracing::debug!("Completed to delete GSS Search Order: {}", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_link_sources() {
        let config = SearchOrderConfig {
            name: "so1".into(),
            nodes: vec![Node { name: "us".into() }],
            links: vec![Link {
                source: " ".into(),
                target: "us".into(),
                cost: 1,
                enable_link: true,
            }],
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "links.0.source");
    }

    #[test]
    fn test_dangling_link_targets_are_left_to_the_gateway() {
        let config = SearchOrderConfig {
            name: "so1".into(),
            nodes: Vec::new(),
            links: vec![Link {
                source: "us".into(),
                target: "nowhere".into(),
                cost: 1,
                enable_link: false,
            }],
        };
        assert!(config.validate().is_ok());
    }
}
