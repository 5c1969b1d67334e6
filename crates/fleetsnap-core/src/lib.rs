//! fleetsnap core
//!
//! Point-in-time inventory of a container orchestration fleet. For every
//! cluster in an account/region this crate lists and describes services,
//! tasks, container instances and the compute instances behind them, then
//! cross-references them into one [`ClusterSnapshot`] per cluster.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 fleetsnap CLI                    │
//! │          (Renderer: table / json)                │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ClusterSnapshot
//! ┌─────────────────▼───────────────────────────────┐
//! │                fleetsnap-core                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │ FleetAggregator ── Correlator            │   │
//! │  └──────────────────┬───────────────────────┘   │
//! │  ┌──────────────────▼───────────────────────┐   │
//! │  │ ResourceFetcher ── collect_pages          │   │
//! │  └──────────────────┬───────────────────────┘   │
//! │        trait Connector { orchestration, compute }│
//! └─────────────────────┬───────────────────────────┘
//!                       │
//!               ┌───────▼───────┐
//!               │ fleetsnap-aws │
//!               │ (ECS + EC2)   │
//!               └───────────────┘
//! ```
//!
//! All remote calls are issued one at a time. Clusters are independent of
//! each other, so a bounded per-cluster worker pool would be the place to
//! add parallelism.

pub mod aggregator;
pub mod correlate;
pub mod error;
pub mod fetcher;
pub mod identity;
pub mod limits;
pub mod model;
pub mod paginate;
pub mod provider;
pub mod render;

// Re-exports
pub use aggregator::{AggregatorOptions, FleetAggregator, RunSummary, assemble};
pub use correlate::{link_tasks, pair_instances, summarize_deployments};
pub use error::{FleetError, Result};
pub use fetcher::{InstanceInventory, ResourceFetcher};
pub use identity::{Arn, IdentityError, TaskDefinitionId, short_name};
pub use limits::FetchLimits;
pub use model::{
    Cluster, ClusterSnapshot, ComputeInstance, ContainerInstance, Deployment, DeploymentCounts,
    DeploymentSummary, InstancePairing, Service, ServiceRef, Task, TaskServiceLink,
};
pub use paginate::{Page, collect_pages};
pub use provider::{ComputeApi, Connector, OrchestrationApi, operation};
pub use render::Renderer;
