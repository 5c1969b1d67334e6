//! List-then-describe pipelines, one per resource kind

use crate::error::{FleetError, Result};
use crate::limits::{
    FetchLimits, MAX_DESCRIBE_CONTAINER_INSTANCES, MAX_DESCRIBE_SERVICES, MAX_DESCRIBE_TASKS,
};
use crate::model::{Cluster, ComputeInstance, ContainerInstance, Service, Task};
use crate::paginate::collect_pages;
use crate::provider::{Connector, operation};
use std::collections::HashSet;
use std::future::Future;

/// Container instances of a cluster plus the compute instances behind them
#[derive(Debug, Clone, Default)]
pub struct InstanceInventory {
    pub container_instances: Vec<ContainerInstance>,
    pub compute_instances: Vec<ComputeInstance>,
}

/// Fetches one resource kind at a time through a [`Connector`]
pub struct ResourceFetcher<'a> {
    connector: &'a dyn Connector,
    limits: FetchLimits,
}

impl<'a> ResourceFetcher<'a> {
    /// Fails with a configuration error if `limits` exceed API maxima
    pub fn new(connector: &'a dyn Connector, limits: FetchLimits) -> Result<Self> {
        limits.validate()?;
        Ok(Self { connector, limits })
    }

    /// Identities of every cluster in the account/region
    pub async fn list_clusters(&self) -> Result<Vec<String>> {
        let api = self.connector.orchestration();
        let page_size = self.limits.clusters;

        collect_pages(operation::LIST_CLUSTERS, |token| {
            api.list_clusters(page_size, token)
        })
        .await
    }

    /// Describe a single cluster that is known to exist
    pub async fn describe_cluster(&self, cluster: &str) -> Result<Cluster> {
        let api = self.connector.orchestration();
        let described = api.describe_clusters(&[cluster.to_string()]).await?;

        described.into_iter().find(|c| c.matches(cluster)).ok_or_else(|| {
            FleetError::consistency(
                operation::DESCRIBE_CLUSTERS,
                format!("no cluster returned for {}", cluster),
            )
        })
    }

    pub async fn list_and_describe_services(&self, cluster: &str) -> Result<Vec<Service>> {
        let api = self.connector.orchestration();
        let page_size = self.limits.services;

        let arns = collect_pages(operation::LIST_SERVICES, |token| {
            api.list_services(cluster, page_size, token)
        })
        .await?;

        let services = describe_in_batches(
            operation::DESCRIBE_SERVICES,
            &arns,
            MAX_DESCRIBE_SERVICES,
            |batch| async move { api.describe_services(cluster, &batch).await },
            |service: &Service| service.arn.as_str(),
        )
        .await?;

        tracing::debug!(cluster, count = services.len(), "Fetched services");
        Ok(services)
    }

    pub async fn list_and_describe_tasks(&self, cluster: &str) -> Result<Vec<Task>> {
        let api = self.connector.orchestration();
        let page_size = self.limits.tasks;

        let arns = collect_pages(operation::LIST_TASKS, |token| {
            api.list_tasks(cluster, page_size, token)
        })
        .await?;

        let tasks = describe_in_batches(
            operation::DESCRIBE_TASKS,
            &arns,
            MAX_DESCRIBE_TASKS,
            |batch| async move { api.describe_tasks(cluster, &batch).await },
            |task: &Task| task.arn.as_str(),
        )
        .await?;

        tracing::debug!(cluster, count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    /// Container instances of `cluster`, joined against the compute API
    ///
    /// The compute lookup is seeded from the container-instance describe
    /// response, so it cannot start before that call returns.
    pub async fn list_and_describe_container_instances(
        &self,
        cluster: &str,
    ) -> Result<InstanceInventory> {
        let api = self.connector.orchestration();
        let page_size = self.limits.container_instances;

        let arns = collect_pages(operation::LIST_CONTAINER_INSTANCES, |token| {
            api.list_container_instances(cluster, page_size, token)
        })
        .await?;

        let container_instances = describe_in_batches(
            operation::DESCRIBE_CONTAINER_INSTANCES,
            &arns,
            MAX_DESCRIBE_CONTAINER_INSTANCES,
            |batch| async move { api.describe_container_instances(cluster, &batch).await },
            |ci: &ContainerInstance| ci.arn.as_str(),
        )
        .await?;

        let instance_ids: Vec<String> = container_instances
            .iter()
            .map(|ci| ci.instance_id.clone())
            .collect();
        let compute_instances = self.describe_compute_instances(&instance_ids).await?;

        tracing::debug!(
            cluster,
            container_instances = container_instances.len(),
            compute_instances = compute_instances.len(),
            "Fetched instances"
        );
        Ok(InstanceInventory {
            container_instances,
            compute_instances,
        })
    }

    /// Describe compute instances in batches of `compute_batch` ids
    ///
    /// Each batch follows the compute API's continuation token, so clusters
    /// larger than one call's id limit are re-paged rather than truncated.
    pub async fn describe_compute_instances(
        &self,
        instance_ids: &[String],
    ) -> Result<Vec<ComputeInstance>> {
        let api = self.connector.compute();
        let mut instances = Vec::with_capacity(instance_ids.len());

        for batch in instance_ids.chunks(self.limits.compute_batch) {
            let described = collect_pages(operation::DESCRIBE_INSTANCES, |token| {
                api.describe_instances(batch, token)
            })
            .await?;
            instances.extend(described);
        }

        Ok(instances)
    }
}

/// Describe `ids` in chunks of at most `batch_size`, in order
///
/// Repeated ids are requested once. An empty id set makes no call. Every
/// requested identity must come back; any that do not are reported as a
/// consistency fault. Repeats in a response are collapsed to the first.
async fn describe_in_batches<T, F, Fut, I>(
    operation: &'static str,
    ids: &[String],
    batch_size: usize,
    mut describe: F,
    identity: I,
) -> Result<Vec<T>>
where
    F: FnMut(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    I: Fn(&T) -> &str,
{
    let mut listed = HashSet::with_capacity(ids.len());
    let unique: Vec<String> = ids
        .iter()
        .filter(|id| listed.insert(id.as_str()))
        .cloned()
        .collect();
    if unique.len() < ids.len() {
        tracing::debug!(
            operation,
            repeated = ids.len() - unique.len(),
            "Dropped repeated identities from list output"
        );
    }

    let mut described = Vec::with_capacity(unique.len());

    for chunk in unique.chunks(batch_size) {
        let requested: HashSet<&str> = chunk.iter().map(String::as_str).collect();
        let found = describe(chunk.to_vec()).await?;

        let mut seen = HashSet::with_capacity(chunk.len());
        for item in found {
            let id = identity(&item);
            if !requested.contains(id) {
                tracing::warn!(operation, identity = id, "Describe returned an unrequested identity");
                continue;
            }
            if seen.insert(id.to_string()) {
                described.push(item);
            }
        }

        let missing: Vec<&str> = chunk
            .iter()
            .map(String::as_str)
            .filter(|id| !seen.contains(*id))
            .collect();
        if !missing.is_empty() {
            return Err(FleetError::consistency(
                operation,
                format!(
                    "{} of {} requested identities not returned (missing: {})",
                    missing.len(),
                    chunk.len(),
                    missing.join(", ")
                ),
            ));
        }
    }

    Ok(described)
}
