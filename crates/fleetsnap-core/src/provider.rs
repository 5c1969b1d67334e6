//! Remote API abstraction
//!
//! The aggregator never talks to a cloud SDK directly. A [`Connector`] hands
//! it two already-authenticated, region-scoped clients: one for the
//! container orchestrator and one for the compute provider underneath it.

use crate::error::Result;
use crate::model::{Cluster, ComputeInstance, ContainerInstance, Service, Task};
use crate::paginate::Page;
use async_trait::async_trait;

/// Remote operation names used in error messages and logs
pub mod operation {
    pub const LIST_CLUSTERS: &str = "ecs.ListClusters";
    pub const DESCRIBE_CLUSTERS: &str = "ecs.DescribeClusters";
    pub const LIST_SERVICES: &str = "ecs.ListServices";
    pub const DESCRIBE_SERVICES: &str = "ecs.DescribeServices";
    pub const LIST_TASKS: &str = "ecs.ListTasks";
    pub const DESCRIBE_TASKS: &str = "ecs.DescribeTasks";
    pub const LIST_CONTAINER_INSTANCES: &str = "ecs.ListContainerInstances";
    pub const DESCRIBE_CONTAINER_INSTANCES: &str = "ecs.DescribeContainerInstances";
    pub const DESCRIBE_INSTANCES: &str = "ec2.DescribeInstances";
}

/// Container orchestrator client (list/describe only)
///
/// List calls return one page of identities; describe calls return whatever
/// the remote side found for the given identities. Implementations should
/// tag errors with the matching name from [`operation`].
#[async_trait]
pub trait OrchestrationApi: Send + Sync {
    async fn list_clusters(&self, max_results: u32, next_token: Option<String>)
    -> Result<Page<String>>;

    async fn describe_clusters(&self, clusters: &[String]) -> Result<Vec<Cluster>>;

    async fn list_services(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn describe_services(&self, cluster: &str, services: &[String]) -> Result<Vec<Service>>;

    async fn list_tasks(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn describe_tasks(&self, cluster: &str, tasks: &[String]) -> Result<Vec<Task>>;

    async fn list_container_instances(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>>;

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instances: &[String],
    ) -> Result<Vec<ContainerInstance>>;
}

/// Compute provider client
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Describe instances by id, one page at a time
    async fn describe_instances(
        &self,
        instance_ids: &[String],
        next_token: Option<String>,
    ) -> Result<Page<ComputeInstance>>;
}

/// Supplies the clients the aggregator works against
pub trait Connector: Send + Sync {
    /// Short name for logs (e.g. "aws")
    fn name(&self) -> &str;

    fn orchestration(&self) -> &dyn OrchestrationApi;

    fn compute(&self) -> &dyn ComputeApi;
}
