//! `bluecatgss_answer` resource

use super::schema::{SchemaError, Validator};
use super::{Resource, ResourceData};
use crate::gateway::Connector;
use crate::gss::{AnswerType, ObjectManager};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Accepted values of `type`
pub const ANSWER_TYPES: &[&str] = &["ip_address", "fqdn"];

/// Declared GSS Answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerConfig {
    pub application_id: i64,
    pub addresses: Vec<String>,
    pub region: String,
    pub name: String,
    #[serde(rename = "type")]
    pub answer_type: String,
}

impl AnswerConfig {
    fn parsed_type(&self) -> Result<AnswerType> {
        self.answer_type.parse().map_err(|e: String| anyhow!(e))
    }
}

fn answer_id(data: &ResourceData<AnswerConfig>) -> Result<i64> {
    data.numeric_id()
        .ok_or_else(|| anyhow!("GSS Answer id '{}' is not a number", data.id()))
}

#[async_trait]
impl Resource for AnswerConfig {
    const TYPE_NAME: &'static str = "bluecatgss_answer";

    fn validate(&self) -> Result<(), SchemaError> {
        Validator::new(Self::TYPE_NAME)
            .min_items("addresses", self.addresses.len(), 1)
            .one_of("type", &self.answer_type, ANSWER_TYPES, false)
            .finish()
    }

    fn needs_update(prior: &Self, declared: &Self) -> bool {
        prior != declared
    }

    /// Region and type cannot be changed in place
    fn requires_replacement(prior: &Self, declared: &Self) -> bool {
        prior.region != declared.region || prior.answer_type != declared.answer_type
    }

    async fn create<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let config = &data.config;
        let application_id = config.application_id;
        tracing::debug!("Beginning to create GSS Answer with Application ID {}", application_id);

        let answer = manager
            .create_answer(
                application_id,
                config.addresses.clone(),
                &config.region,
                &config.name,
                config.parsed_type()?,
            )
            .await
            .with_context(|| format!("Error creating GSS Answer {}", config.name))?;

        data.set_id(answer.id);
        tracing::debug!("Completed to create GSS Answer {}", data.id());

        Self::read(manager, data).await
    }

    async fn read<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let id = answer_id(data)?;
        let application_id = data.config.application_id;
        tracing::debug!("Beginning to get GSS Answer {} with Application ID {}", id, application_id);

        let answer = manager
            .get_answer(application_id, id)
            .await
            .with_context(|| format!("Getting GSS Answer {id} failed"))?;

        data.set_id(answer.id.or(Some(id)));
        data.config.addresses = answer.addresses;
        data.config.region = answer.region;
        data.config.name = answer.name;
        if let Some(answer_type) = answer.answer_type {
            data.config.answer_type = answer_type.to_string();
        }
        tracing::debug!("Completed reading GSS Answer {}", id);
        Ok(())
    }

    async fn update<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let id = answer_id(data)?;
        let config = &data.config;
        tracing::debug!("Beginning to update GSS Answer {} with Application ID {}", id, config.application_id);

        let answer = manager
            .update_answer(
                config.application_id,
                id,
                config.addresses.clone(),
                &config.region,
                &config.name,
                config.parsed_type()?,
            )
            .await
            .with_context(|| format!("Error updating GSS Answer {id}"))?;

        data.set_id(answer.id.or(Some(id)));
        tracing::debug!("Completed to update GSS Answer {}", id);

        Self::read(manager, data).await
    }

    async fn delete<C: Connector>(
        manager: &ObjectManager<C>,
        data: &mut ResourceData<Self>,
    ) -> Result<()> {
        let id = answer_id(data)?;
        let application_id = data.config.application_id;
        tracing::debug!("Beginning to delete GSS Answer {}", id);

        manager
            .delete_answer(application_id, id)
            .await
            .with_context(|| format!("Delete GSS Answer {id} failed"))?;

        data.clear_id();
        tracing::debug!("Completed to delete GSS Answer {}", id);
        Ok(())
    }
}
