//! AWS connector
//!
//! Wraps an ECS client and an EC2 client that share one credential profile
//! and one region.

use crate::convert::{self, page_size, transport};
use crate::error::{AwsError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use fleetsnap_core::{
    Cluster, ComputeApi, ComputeInstance, Connector, ContainerInstance, OrchestrationApi, Page,
    Service, Task, operation,
};

/// Credential profile and region to connect with
///
/// `None` falls back to the SDK's default chain (environment, shared config).
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub profile: Option<String>,
    pub region: Option<String>,
}

/// ECS + EC2 connector
pub struct AwsConnector {
    ecs: EcsApi,
    ec2: Ec2Api,
    region: String,
    profile: Option<String>,
}

impl AwsConnector {
    /// Resolve credentials and region, then build both clients
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &options.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .ok_or(AwsError::MissingRegion)?;

        tracing::debug!(
            profile = options.profile.as_deref().unwrap_or("default"),
            region = %region,
            "AWS clients configured"
        );

        Ok(Self {
            ecs: EcsApi {
                client: aws_sdk_ecs::Client::new(&sdk_config),
            },
            ec2: Ec2Api {
                client: aws_sdk_ec2::Client::new(&sdk_config),
            },
            region,
            profile: options.profile.clone(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Profile name, "default" when none was given
    pub fn profile(&self) -> &str {
        self.profile.as_deref().unwrap_or("default")
    }
}

impl Connector for AwsConnector {
    fn name(&self) -> &str {
        "aws"
    }

    fn orchestration(&self) -> &dyn OrchestrationApi {
        &self.ecs
    }

    fn compute(&self) -> &dyn ComputeApi {
        &self.ec2
    }
}

struct EcsApi {
    client: aws_sdk_ecs::Client,
}

#[async_trait]
impl OrchestrationApi for EcsApi {
    async fn list_clusters(
        &self,
        max_results: u32,
        next_token: Option<String>,
    ) -> fleetsnap_core::Result<Page<String>> {
        let out = self
            .client
            .list_clusters()
            .max_results(page_size(max_results))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport(operation::LIST_CLUSTERS))?;

        Ok(convert::id_page(out.cluster_arns, out.next_token))
    }

    async fn describe_clusters(&self, clusters: &[String]) -> fleetsnap_core::Result<Vec<Cluster>> {
        let out = self
            .client
            .describe_clusters()
            .set_clusters(Some(clusters.to_vec()))
            .send()
            .await
            .map_err(transport(operation::DESCRIBE_CLUSTERS))?;

        convert::log_failures(operation::DESCRIBE_CLUSTERS, out.failures);
        Ok(out
            .clusters
            .unwrap_or_default()
            .into_iter()
            .map(convert::cluster)
            .collect())
    }

    async fn list_services(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> fleetsnap_core::Result<Page<String>> {
        let out = self
            .client
            .list_services()
            .cluster(cluster)
            .max_results(page_size(max_results))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport(operation::LIST_SERVICES))?;

        Ok(convert::id_page(out.service_arns, out.next_token))
    }

    async fn describe_services(
        &self,
        cluster: &str,
        services: &[String],
    ) -> fleetsnap_core::Result<Vec<Service>> {
        let out = self
            .client
            .describe_services()
            .cluster(cluster)
            .set_services(Some(services.to_vec()))
            .send()
            .await
            .map_err(transport(operation::DESCRIBE_SERVICES))?;

        convert::log_failures(operation::DESCRIBE_SERVICES, out.failures);
        Ok(out
            .services
            .unwrap_or_default()
            .into_iter()
            .map(|s| convert::service(s, cluster))
            .collect())
    }

    async fn list_tasks(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> fleetsnap_core::Result<Page<String>> {
        let out = self
            .client
            .list_tasks()
            .cluster(cluster)
            .max_results(page_size(max_results))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport(operation::LIST_TASKS))?;

        Ok(convert::id_page(out.task_arns, out.next_token))
    }

    async fn describe_tasks(&self, cluster: &str, tasks: &[String]) -> fleetsnap_core::Result<Vec<Task>> {
        let out = self
            .client
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(tasks.to_vec()))
            .send()
            .await
            .map_err(transport(operation::DESCRIBE_TASKS))?;

        convert::log_failures(operation::DESCRIBE_TASKS, out.failures);
        Ok(out
            .tasks
            .unwrap_or_default()
            .into_iter()
            .map(|t| convert::task(t, cluster))
            .collect())
    }

    async fn list_container_instances(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> fleetsnap_core::Result<Page<String>> {
        let out = self
            .client
            .list_container_instances()
            .cluster(cluster)
            .max_results(page_size(max_results))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport(operation::LIST_CONTAINER_INSTANCES))?;

        Ok(convert::id_page(out.container_instance_arns, out.next_token))
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instances: &[String],
    ) -> fleetsnap_core::Result<Vec<ContainerInstance>> {
        let out = self
            .client
            .describe_container_instances()
            .cluster(cluster)
            .set_container_instances(Some(container_instances.to_vec()))
            .send()
            .await
            .map_err(transport(operation::DESCRIBE_CONTAINER_INSTANCES))?;

        convert::log_failures(operation::DESCRIBE_CONTAINER_INSTANCES, out.failures);
        out.container_instances
            .unwrap_or_default()
            .into_iter()
            .map(|ci| convert::container_instance(ci, cluster))
            .collect()
    }
}

struct Ec2Api {
    client: aws_sdk_ec2::Client,
}

#[async_trait]
impl ComputeApi for Ec2Api {
    async fn describe_instances(
        &self,
        instance_ids: &[String],
        next_token: Option<String>,
    ) -> fleetsnap_core::Result<Page<ComputeInstance>> {
        let out = self
            .client
            .describe_instances()
            .set_instance_ids(Some(instance_ids.to_vec()))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(transport(operation::DESCRIBE_INSTANCES))?;

        Ok(convert::compute_page(out))
    }
}
