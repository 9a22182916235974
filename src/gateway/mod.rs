//! BlueCat Gateway REST plumbing
//!
//! # Module Structure
//!
//! - [`error`] - Error taxonomy for configuration, auth, transport, gateway and decode failures
//! - [`request`] - Operation descriptors and URL/body construction
//! - [`http`] - Single-attempt HTTP execution
//! - [`auth`] - Login handshake and session token
//! - [`connector`] - The `Connector` trait and its REST implementation
//!
//! # Example
//!
//! ```ignore
//! use bluecat_gss::gateway::GatewayConnector;
//!
//! async fn example(config: bluecat_gss::HostConfig) -> anyhow::Result<()> {
//!     let connector = GatewayConnector::connect(config).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod connector;
pub mod error;
pub mod http;
pub mod request;

pub use connector::{Connector, GatewayConnector};
pub use error::{GatewayError, GatewayResult};
pub use request::{Operation, OperationKind, PreparedRequest, RequestBuilder, Route};
