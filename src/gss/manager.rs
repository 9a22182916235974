//! Object Manager
//!
//! One create/read/update/delete family per GSS object type. Each method maps
//! its parameters onto an entity, routes it through the [`Connector`] and
//! decodes the reply.

use super::entities::{Answer, AnswerType, Application, HealthCheck, Link, Node, SearchOrder};
use super::object::{decode_fresh, decode_into, GssObject};
use crate::gateway::connector::Connector;
use crate::gateway::error::GatewayError;
use crate::gateway::request::{Operation, OperationKind};
use thiserror::Error;

/// A failed manager call, naming the operation and object
#[derive(Debug, Error)]
#[error("{action} {kind} {object} failed")]
pub struct ManagerError {
    pub action: OperationKind,
    pub kind: &'static str,
    pub object: String,
    #[source]
    pub source: GatewayError,
}

impl ManagerError {
    fn new<T: GssObject>(action: OperationKind, object: &str, source: GatewayError) -> Self {
        Self {
            action,
            kind: T::LABEL,
            object: object.to_string(),
            source,
        }
    }

    /// Whether the gateway reported the object as absent
    pub fn is_not_found(&self) -> bool {
        self.source.is_not_found()
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// GSS object manager over a connector
pub struct ObjectManager<C> {
    connector: C,
}

impl<C: Connector> ObjectManager<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Create, then decode the gateway's copy (with its assigned id) into a new instance
    async fn create<T: GssObject>(&self, object: T) -> ManagerResult<T> {
        let name = object.describe();
        let wrap = |e| ManagerError::new::<T>(OperationKind::Create, &name, e);
        tracing::debug!(operation = "create", kind = T::LABEL, object = %name, "Creating object");

        let operation = Operation::create(&object).map_err(wrap)?;
        let body = self.connector.create_object(&operation).await.map_err(wrap)?;
        let created: T = decode_fresh(&body).map_err(wrap)?;

        tracing::debug!(operation = "create", kind = T::LABEL, id = ?created.id(), "Created object");
        Ok(created)
    }

    /// Read; `fresh` decodes into a new instance instead of the request
    async fn read<T: GssObject>(&self, object: T, fresh: bool) -> ManagerResult<T> {
        let name = object.describe();
        let wrap = |e| ManagerError::new::<T>(OperationKind::Read, &name, e);
        tracing::debug!(operation = "read", kind = T::LABEL, object = %name, "Reading object");

        let operation = Operation::read(&object).map_err(wrap)?;
        let response = self.connector.get_object(&operation).await.map_err(wrap)?;

        let target = if fresh { T::default() } else { object };
        decode_into(&target, response).map_err(wrap)
    }

    async fn update<T: GssObject>(&self, object: T) -> ManagerResult<T> {
        let name = object.describe();
        let wrap = |e| ManagerError::new::<T>(OperationKind::Update, &name, e);
        tracing::debug!(operation = "update", kind = T::LABEL, object = %name, "Updating object");

        let operation = Operation::update(&object).map_err(wrap)?;
        let response = self.connector.update_object(&operation).await.map_err(wrap)?;
        decode_into(&object, response).map_err(wrap)
    }

    async fn delete<T: GssObject>(&self, object: T) -> ManagerResult<String> {
        let name = object.describe();
        let wrap = |e| ManagerError::new::<T>(OperationKind::Delete, &name, e);
        tracing::debug!(operation = "delete", kind = T::LABEL, object = %name, "Deleting object");

        let operation = Operation::delete(&object).map_err(wrap)?;
        self.connector.delete_object(&operation).await.map_err(wrap)
    }

    // =========================================================================
    // GSS Application
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_application(
        &self,
        configuration: &str,
        view: &str,
        zone: &str,
        absolute_name: &str,
        fallback: Vec<String>,
        ttl: i64,
        properties: &str,
        health_check: Vec<HealthCheck>,
        search_order: Vec<String>,
    ) -> ManagerResult<Application> {
        self.create(Application {
            configuration: configuration.to_string(),
            view: view.to_string(),
            zone: zone.to_string(),
            absolute_name: absolute_name.to_string(),
            fallback,
            ttl,
            properties: properties.to_string(),
            health_check,
            search_order,
            id: None,
        })
        .await
    }

    pub async fn get_application(
        &self,
        configuration: &str,
        view: &str,
        absolute_name: &str,
    ) -> ManagerResult<Application> {
        self.read(
            Application {
                configuration: configuration.to_string(),
                view: view.to_string(),
                absolute_name: absolute_name.to_string(),
                ..Default::default()
            },
            false,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_application(
        &self,
        configuration: &str,
        view: &str,
        zone: &str,
        absolute_name: &str,
        fallback: Vec<String>,
        ttl: i64,
        properties: &str,
        health_check: Vec<HealthCheck>,
        search_order: Vec<String>,
    ) -> ManagerResult<Application> {
        self.update(Application {
            configuration: configuration.to_string(),
            view: view.to_string(),
            zone: zone.to_string(),
            absolute_name: absolute_name.to_string(),
            fallback,
            ttl,
            properties: properties.to_string(),
            health_check,
            search_order,
            id: None,
        })
        .await
    }

    pub async fn delete_application(
        &self,
        configuration: &str,
        view: &str,
        absolute_name: &str,
    ) -> ManagerResult<String> {
        self.delete(Application {
            configuration: configuration.to_string(),
            view: view.to_string(),
            absolute_name: absolute_name.to_string(),
            ..Default::default()
        })
        .await
    }

    // =========================================================================
    // GSS Answer
    // =========================================================================

    pub async fn create_answer(
        &self,
        application_id: i64,
        addresses: Vec<String>,
        region: &str,
        name: &str,
        answer_type: AnswerType,
    ) -> ManagerResult<Answer> {
        self.create(Answer {
            application_id,
            addresses,
            region: region.to_string(),
            name: name.to_string(),
            id: None,
            answer_type: Some(answer_type),
        })
        .await
    }

    pub async fn get_answer(&self, application_id: i64, answer_id: i64) -> ManagerResult<Answer> {
        self.read(
            Answer {
                application_id,
                id: Some(answer_id),
                ..Default::default()
            },
            true,
        )
        .await
    }

    pub async fn update_answer(
        &self,
        application_id: i64,
        answer_id: i64,
        addresses: Vec<String>,
        region: &str,
        name: &str,
        answer_type: AnswerType,
    ) -> ManagerResult<Answer> {
        self.update(Answer {
            application_id,
            addresses,
            region: region.to_string(),
            name: name.to_string(),
            id: Some(answer_id),
            answer_type: Some(answer_type),
        })
        .await
    }

    pub async fn delete_answer(&self, application_id: i64, answer_id: i64) -> ManagerResult<String> {
        self.delete(Answer {
            application_id,
            id: Some(answer_id),
            ..Default::default()
        })
        .await
    }

    // =========================================================================
    // GSS Search Order
    // =========================================================================

    pub async fn create_search_order(
        &self,
        name: &str,
        nodes: Vec<Node>,
        links: Vec<Link>,
    ) -> ManagerResult<SearchOrder> {
        self.create(SearchOrder {
            nodes,
            links,
            name: name.to_string(),
            id: None,
        })
        .await
    }

    pub async fn get_search_order(
        &self,
        search_order_id: i64,
        name: &str,
        links: Vec<Link>,
    ) -> ManagerResult<SearchOrder> {
        self.read(
            SearchOrder {
                links,
                name: name.to_string(),
                id: Some(search_order_id).filter(|id| *id != 0),
                ..Default::default()
            },
            true,
        )
        .await
    }

    pub async fn update_search_order(
        &self,
        name: &str,
        search_order_id: i64,
        nodes: Vec<Node>,
        links: Vec<Link>,
    ) -> ManagerResult<SearchOrder> {
        self.update(SearchOrder {
            nodes,
            links,
            name: name.to_string(),
            id: Some(search_order_id).filter(|id| *id != 0),
        })
        .await
    }

    pub async fn delete_search_order(&self, name: &str) -> ManagerResult<String> {
        self.delete(SearchOrder {
            name: name.to_string(),
            ..Default::default()
        })
        .await
    }
}
