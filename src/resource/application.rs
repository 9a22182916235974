//! `bluecatgss_application` resource

use super::names::{fqdn, name_matches, properties_contained, zone_from};
use super::schema::{SchemaError, Validator};
use super::{Resource, ResourceData};
use crate::gateway::Connector;
use crate::gss::{HealthCheck, ObjectManager};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

fn default_ttl() -> i64 {
    -1
}

/// Declared GSS Application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub configuration: String,
    pub view: String,
    /// When empty, `absolute_name` must be fully qualified and the zone is inferred from it
    #[serde(default)]
    pub zone: String,
    pub absolute_name: String,
    pub fallback: Vec<String>,
    #[serde(default = "default_ttl")]
    pub ttl: i64,
    /// `attribute=value|` tokens
    #[serde(default)]
    pub properties: String,
    #[serde(default)]
    pub health_check: Vec<HealthCheck>,
    #[serde(default)]
    pub search_order: Vec<String>,
}

impl ApplicationConfig {
    /// Name and zone as sent to the gateway
    pub fn qualified_name(&self) -> (String, String) {
        if self.zone.is_empty() {
            (self.absolute_name.clone(), zone_from(&self.absolute_name))
        } else {
            (fqdn(&self.absolute_name, &self.zone), self.zone.clone())
        }
    }
}

/// An empty remote zone means the gateway did not echo it; the qualified
/// name comparison already covers that case.
fn zone_matches(prior: &ApplicationConfig, declared: &ApplicationConfig) -> bool {
    prior.zone.is_empty() || prior.zone == declared.qualified_name().1
}

/// A blank `appended_url_path` means "whatever the gateway has"
fn health_check_matches(prior: &HealthCheck, declared: &HealthCheck) -> bool {
    if declared.appended_url_path.is_empty() {
        let declared = HealthCheck {
            appended_url_path: prior.appended_url_path.clone(),
            ..declared.clone()
        };
        *prior == declared
    } else {
        prior == declared
    }
}

#[async_trait]
impl Resource for ApplicationConfig {
    const TYPE_NAME: &'static str = "bluecatgss_application";

    fn validate(&self) -> Result<(), SchemaError> {
        let mut validator = Validator::new(Self::TYPE_NAME);
        validator
            .not_blank("configuration", &self.configuration)
            .not_blank("view", &self.view)
            .not_blank("absolute_name", &self.absolute_name)
            .min_items("fallback", self.fallback.len(), 1)
            .max_items("health_check", self.health_check.len(), 1);

        for check in &self.health_check {
            for (key, value) in &check.custom_data {
                validator.not_blank(&format!("health_check.custom_data.{key}"), value);
            }
        }

        validator.finish()
    }

    fn needs_update(prior: &Self, declared: &Self) -> bool {
        let same_checks = prior.health_check.len() == declared.health_check.len()
            && prior
                .health_check
                .iter()
                .zip(&declared.health_check)
                .all(|(p, d)| health_check_matches(p, d));

        let in_sync = name_matches(&prior.absolute_name, &declared.absolute_name, &declared.zone)
            && properties_contained(&prior.properties, &declared.properties)
            && same_checks
            && prior.configuration == declared.configuration
            && prior.view == declared.view
            && zone_matches(prior, declared)
            && prior.fallback == declared.fallback
            && prior.ttl == declared.ttl
            && prior.search_order == declared.search_order;

        !in_sync
    }

    async fn create<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        let (name, zone) = config.qualified_name();
        tracing::debug!("Beginning to create GSS Application {}", name);

        let created = manager
            .create_application(
                &config.configuration,
                &config.view,
                &zone,
                &name,
                config.fallback.clone(),
                config.ttl,
                &config.properties,
                config.health_check.clone(),
                config.search_order.clone(),
            )
            .await
            .with_context(|| format!("Error creating GSS Application {name}"))?;

        data.config.absolute_name = name;
        data.set_id(created.id);
        tracing::debug!("Completed to create GSS Application {}", data.config.absolute_name);

        Self::read(manager, data).await
    }

    async fn read<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        let (name, _) = config.qualified_name();
        tracing::debug!("Beginning to get GSS Application {}", name);

        let application = manager
            .get_application(&config.configuration, &config.view, &name)
            .await
            .with_context(|| format!("Getting GSS Application {name} failed"))?;

        // Everything is taken from the gateway so `needs_update` compares
        // against what is stored there, not against the declaration.
        data.set_id(application.id);
        let config = &mut data.config;
        config.configuration = application.configuration;
        config.view = application.view;
        if !application.zone.is_empty() {
            config.zone = application.zone;
        }
        config.absolute_name = application.absolute_name;
        config.fallback = application.fallback;
        config.ttl = application.ttl;
        config.properties = application.properties;
        config.health_check = application.health_check;
        config.search_order = application.search_order;
        tracing::debug!("Completed reading GSS Application {}", data.config.absolute_name);
        Ok(())
    }

    async fn update<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        let (name, zone) = config.qualified_name();
        tracing::debug!("Beginning to update GSS Application {}", name);

        let updated = manager
            .update_application(
                &config.configuration,
                &config.view,
                &zone,
                &name,
                config.fallback.clone(),
                config.ttl,
                &config.properties,
                config.health_check.clone(),
                config.search_order.clone(),
            )
            .await
            .with_context(|| format!("Error updating GSS Application {name}"))?;

        if updated.id.is_some() {
            data.set_id(updated.id);
        }
        data.config.absolute_name = name;
        tracing::debug!("Completed to update GSS Application {}", data.config.absolute_name);

        Self::read(manager, data).await
    }

    async fn delete<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        let (name, _) = config.qualified_name();
        tracing::debug!("Beginning to delete GSS Application {}", name);

        match manager
            .get_application(&config.configuration, &config.view, &name)
            .await
        {
            Err(err) if err.is_not_found() => {
                tracing::debug!("The Application {} not found", name);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Delete GSS Application {name} failed"));
            }
            Ok(_) => {
                manager
                    .delete_application(&config.configuration, &config.view, &name)
                    .await
                    .with_context(|| format!("Delete GSS Application {name} failed"))?;
            }
        }

        data.clear_id();
        tracing::debug!("Completed to delete GSS Application {}", name);
        Ok(())
    }
}
