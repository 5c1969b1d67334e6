//! Per-cluster snapshot assembly
//!
//! For each cluster the pipeline runs four fetch stages in order:
//!
//! 1. describe the cluster
//! 2. services (list + describe)
//! 3. tasks (list + describe)
//! 4. container instances (list + describe) joined with compute instances
//!
//! Stage 4's compute lookup depends on the container-instance response; the
//! other stages are independent of each other. Clusters are processed one
//! after another and the first failure ends the run.

use crate::correlate::{link_tasks, pair_instances, summarize_deployments};
use crate::error::{FleetError, Result};
use crate::fetcher::{InstanceInventory, ResourceFetcher};
use crate::identity::{Arn, short_name};
use crate::limits::FetchLimits;
use crate::model::{Cluster, ClusterSnapshot, Service, Task};
use crate::provider::Connector;
use crate::render::Renderer;
use serde::{Deserialize, Serialize};

/// Operation name reported when an entity lands in the wrong cluster
pub const CLUSTER_MEMBERSHIP: &str = "aggregate.ClusterMembership";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregatorOptions {
    pub limits: FetchLimits,

    /// Restrict the run to these clusters (ARN or name); empty means all
    #[serde(default)]
    pub clusters: Vec<String>,
}

/// Outcome of a completed [`FleetAggregator::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Snapshots handed to the renderer
    pub rendered: usize,
    /// Cluster filters that matched no listed cluster
    pub unmatched_filters: Vec<String>,
}

pub struct FleetAggregator<'a> {
    fetcher: ResourceFetcher<'a>,
    cluster_filter: Vec<String>,
}

impl<'a> FleetAggregator<'a> {
    /// Fails on invalid limits or on a filter that looks like an ARN but
    /// does not parse as one
    pub fn new(connector: &'a dyn Connector, options: AggregatorOptions) -> Result<Self> {
        tracing::debug!(connector = connector.name(), limits = ?options.limits, "Creating aggregator");
        for filter in options.clusters.iter().filter(|f| f.starts_with("arn:")) {
            Arn::parse(filter)?;
        }
        Ok(Self {
            fetcher: ResourceFetcher::new(connector, options.limits)?,
            cluster_filter: options.clusters,
        })
    }

    /// Snapshot every cluster, handing each to `renderer` as soon as it is
    /// assembled.
    ///
    /// An account with no clusters renders nothing and succeeds.
    pub async fn run(&self, renderer: &mut dyn Renderer) -> Result<RunSummary> {
        let (clusters, unmatched_filters) = self.cluster_ids().await?;
        tracing::info!(count = clusters.len(), "Found clusters");

        let mut rendered = 0;
        for cluster in &clusters {
            let snapshot = self.snapshot_cluster(cluster).await?;
            renderer.render(&snapshot)?;
            rendered += 1;
        }

        renderer.finish()?;
        Ok(RunSummary {
            rendered,
            unmatched_filters,
        })
    }

    /// Snapshot every cluster and return them in list order
    pub async fn collect(&self) -> Result<Vec<ClusterSnapshot>> {
        let mut snapshots = Vec::new();
        self.run(&mut snapshots).await?;
        Ok(snapshots)
    }

    /// Fetch and correlate a single cluster
    pub async fn snapshot_cluster(&self, cluster_id: &str) -> Result<ClusterSnapshot> {
        let cluster = self.fetcher.describe_cluster(cluster_id).await?;
        tracing::info!(cluster = %cluster.name, status = %cluster.status, "Collecting cluster");

        let services = self.fetcher.list_and_describe_services(cluster_id).await?;
        let tasks = self.fetcher.list_and_describe_tasks(cluster_id).await?;
        let instances = self
            .fetcher
            .list_and_describe_container_instances(cluster_id)
            .await?;

        assemble(cluster, services, tasks, instances)
    }

    /// Listed clusters passing the filter, plus the filters nothing matched
    async fn cluster_ids(&self) -> Result<(Vec<String>, Vec<String>)> {
        let ids = self.fetcher.list_clusters().await?;
        if self.cluster_filter.is_empty() {
            return Ok((ids, Vec::new()));
        }

        let selected: Vec<String> = ids
            .into_iter()
            .filter(|id| self.cluster_filter.iter().any(|f| cluster_matches(id, f)))
            .collect();

        let unmatched: Vec<String> = self
            .cluster_filter
            .iter()
            .filter(|wanted| !selected.iter().any(|id| cluster_matches(id, wanted)))
            .cloned()
            .collect();
        for wanted in &unmatched {
            tracing::warn!(cluster = %wanted, "Requested cluster not found");
        }

        Ok((selected, unmatched))
    }
}

fn cluster_matches(id: &str, wanted: &str) -> bool {
    id == wanted || short_name(id).is_ok_and(|name| name == wanted)
}

/// Build a snapshot from fetched collections and run the correlator
///
/// Every service, task and container instance must belong to `cluster`.
pub fn assemble(
    cluster: Cluster,
    services: Vec<Service>,
    tasks: Vec<Task>,
    instances: InstanceInventory,
) -> Result<ClusterSnapshot> {
    let foreign = services
        .iter()
        .map(|s| (&s.arn, &s.cluster_arn))
        .chain(tasks.iter().map(|t| (&t.arn, &t.cluster_arn)))
        .chain(
            instances
                .container_instances
                .iter()
                .map(|ci| (&ci.arn, &ci.cluster_arn)),
        )
        .find(|(_, owner)| **owner != cluster.arn);
    if let Some((arn, owner)) = foreign {
        return Err(FleetError::consistency(
            CLUSTER_MEMBERSHIP,
            format!("{} belongs to {}, not {}", arn, owner, cluster.arn),
        ));
    }

    let task_links = link_tasks(&services, &tasks);
    let instance_pairings = pair_instances(
        &instances.container_instances,
        &instances.compute_instances,
    )?;
    let deployment_summaries = services.iter().map(summarize_deployments).collect();

    let linked = task_links.iter().filter(|l| l.is_linked()).count();
    tracing::debug!(
        cluster = %cluster.name,
        services = services.len(),
        tasks = tasks.len(),
        linked_tasks = linked,
        container_instances = instances.container_instances.len(),
        "Assembled snapshot"
    );

    Ok(ClusterSnapshot {
        cluster,
        services,
        tasks,
        container_instances: instances.container_instances,
        compute_instances: instances.compute_instances,
        task_links,
        instance_pairings,
        deployment_summaries,
    })
}
