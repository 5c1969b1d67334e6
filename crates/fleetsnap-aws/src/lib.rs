//! fleetsnap AWS connector
//!
//! Implements the `fleetsnap-core` client traits on top of the official AWS
//! SDK: ECS for clusters, services, tasks and container instances, EC2 for
//! the instances that back them.
//!
//! ```no_run
//! # async fn demo() -> fleetsnap_aws::Result<()> {
//! use fleetsnap_aws::{AwsConnector, ConnectOptions};
//!
//! let connector = AwsConnector::connect(&ConnectOptions {
//!     profile: Some("prod".into()),
//!     region: Some("us-east-1".into()),
//! })
//! .await?;
//! # let _ = connector;
//! # Ok(())
//! # }
//! ```

mod connector;
mod convert;
pub mod error;

pub use connector::{AwsConnector, ConnectOptions};
pub use error::{AwsError, Result};
