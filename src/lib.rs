//! Declarative management of BlueCat Gateway GSS objects
//!
//! Translates GSS Application, Answer and Search Order definitions into REST
//! calls against a BlueCat Gateway.
//!
//! # Module Structure
//!
//! - [`config`] - Host configuration and persisted provider settings
//! - [`gateway`] - Request building, HTTP execution, login and the `Connector` seam
//! - [`gss`] - Domain entities and the object manager
//! - [`resource`] - Resource definitions, validation, reconciliation and lifecycles
//! - [`logging`] - File logging setup for the binary
//!
//! # Example
//!
//! ```ignore
//! use bluecat_gss::{GatewayConnector, HostConfig, ObjectManager, AnswerType};
//!
//! async fn example(config: HostConfig) -> anyhow::Result<()> {
//!     let manager = ObjectManager::new(GatewayConnector::connect(config).await?);
//!     let answer = manager
//!         .create_answer(10, vec!["1.2.3.4".into()], "us", "ans1", AnswerType::IpAddress)
//!         .await?;
//!     println!("created answer {:?}", answer.id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod gateway;
pub mod gss;
pub mod logging;
pub mod resource;

pub use config::{HostConfig, ProviderSettings};
pub use gateway::{Connector, GatewayConnector, GatewayError, GatewayResult};
pub use gss::{AnswerType, ObjectManager};
