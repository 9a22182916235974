//! GSS domain objects and their manager
//!
//! - [`entities`] - Application, Answer and Search Order records as the gateway sends them
//! - [`object`] - REST routing per object type and response decoding
//! - [`manager`] - Per-type create/read/update/delete over a [`Connector`](crate::gateway::Connector)

pub mod entities;
pub mod manager;
pub mod object;

pub use entities::{
    Answer, AnswerType, Application, HealthCheck, HealthCheckType, Link, Node, SearchOrder,
};
pub use manager::{ManagerError, ManagerResult, ObjectManager};
pub use object::GssObject;
