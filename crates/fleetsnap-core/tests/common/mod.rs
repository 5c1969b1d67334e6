use async_trait::async_trait;
use fleetsnap_core::{
    Cluster, ComputeApi, ComputeInstance, Connector, ContainerInstance, FleetError,
    OrchestrationApi, Page, Result, Service, Task, operation,
};
use std::sync::Mutex;

pub const ACCOUNT: &str = "arn:aws:ecs:us-east-1:123456789012";

pub fn cluster_arn(cluster: &str) -> String {
    format!("{}:cluster/{}", ACCOUNT, cluster)
}

#[allow(dead_code)]
pub fn service_arn(cluster: &str, name: &str) -> String {
    format!("{}:service/{}/{}", ACCOUNT, cluster, name)
}

#[allow(dead_code)]
pub fn task_arn(cluster: &str, id: &str) -> String {
    format!("{}:task/{}/{}", ACCOUNT, cluster, id)
}

#[allow(dead_code)]
pub fn container_instance_arn(cluster: &str, id: &str) -> String {
    format!("{}:container-instance/{}/{}", ACCOUNT, cluster, id)
}

/// One recorded remote call: operation, cluster (if any), size argument
///
/// The size is `max_results` for list calls and the identity count for
/// describe calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub cluster: Option<String>,
    pub size: usize,
}

/// In-memory fleet that pages and describes like the remote API
#[derive(Default)]
pub struct MockFleet {
    pub clusters: Vec<Cluster>,
    pub services: Vec<Service>,
    pub tasks: Vec<Task>,
    pub container_instances: Vec<ContainerInstance>,
    pub compute_instances: Vec<ComputeInstance>,

    /// Listed by ListClusters but unknown to DescribeClusters
    pub phantom_clusters: Vec<String>,
    /// (operation, cluster filter, message); `None` cluster fails everywhere
    pub failures: Vec<(&'static str, Option<String>, String)>,
    /// Describe operations that drop the first requested identity
    pub short_describes: Vec<&'static str>,
    /// Describe operations that answer every identity with the first one
    pub repeating_describes: Vec<&'static str>,
    /// Page size for DescribeInstances; 0 returns everything at once
    pub compute_page_size: usize,

    calls: Mutex<Vec<Call>>,
}

impl MockFleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, name: &str, pending: i64, running: i64) -> Self {
        let mut cluster = Cluster::new(cluster_arn(name), name);
        cluster.status = "ACTIVE".to_string();
        cluster.pending_tasks_count = pending;
        cluster.running_tasks_count = running;
        self.clusters.push(cluster);
        self
    }

    #[allow(dead_code)]
    pub fn fail(mut self, operation: &'static str, cluster: Option<&str>, message: &str) -> Self {
        self.failures.push((
            operation,
            cluster.map(cluster_arn),
            message.to_string(),
        ));
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn calls_for(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }

    fn record(&self, operation: &'static str, cluster: Option<&str>, size: usize) -> Result<()> {
        self.calls.lock().unwrap().push(Call {
            operation,
            cluster: cluster.map(str::to_string),
            size,
        });

        for (op, only, message) in &self.failures {
            if *op == operation && (only.is_none() || only.as_deref() == cluster) {
                return Err(FleetError::transport(operation, message.clone()));
            }
        }
        Ok(())
    }

    fn describe<T: Clone>(
        &self,
        operation: &'static str,
        items: &[T],
        ids: &[String],
        key: impl Fn(&T) -> &str,
    ) -> Vec<T> {
        let skip = usize::from(self.short_describes.contains(&operation));
        let lookup = |id: &String| items.iter().find(|item| key(*item) == id.as_str()).cloned();

        if self.repeating_describes.contains(&operation) {
            let first = ids.first().and_then(lookup);
            return ids.iter().filter_map(|_| first.clone()).collect();
        }

        // the remote side answers each distinct identity once
        let mut seen = Vec::new();
        ids.iter()
            .filter(|id| {
                let fresh = !seen.contains(id);
                seen.push(*id);
                fresh
            })
            .skip(skip)
            .filter_map(lookup)
            .collect()
    }
}

/// Slice `items` the way a token-paged list call would
fn page_of<T: Clone>(items: &[T], max: usize, token: Option<String>) -> Page<T> {
    let start = token.map(|t| t.parse::<usize>().unwrap()).unwrap_or(0);
    let end = if max == 0 {
        items.len()
    } else {
        (start + max).min(items.len())
    };
    let next = (end < items.len()).then(|| end.to_string());
    Page::new(items[start..end].to_vec(), next)
}

#[async_trait]
impl OrchestrationApi for MockFleet {
    async fn list_clusters(
        &self,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.record(operation::LIST_CLUSTERS, None, max_results as usize)?;
        let mut arns: Vec<String> = self.clusters.iter().map(|c| c.arn.clone()).collect();
        arns.extend(self.phantom_clusters.iter().cloned());
        Ok(page_of(&arns, max_results as usize, next_token))
    }

    async fn describe_clusters(&self, clusters: &[String]) -> Result<Vec<Cluster>> {
        let cluster = clusters.first().map(String::as_str);
        self.record(operation::DESCRIBE_CLUSTERS, cluster, clusters.len())?;
        Ok(self
            .clusters
            .iter()
            .filter(|c| clusters.iter().any(|id| c.matches(id)))
            .cloned()
            .collect())
    }

    async fn list_services(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.record(operation::LIST_SERVICES, Some(cluster), max_results as usize)?;
        let arns: Vec<String> = self
            .services
            .iter()
            .filter(|s| s.cluster_arn == cluster)
            .map(|s| s.arn.clone())
            .collect();
        Ok(page_of(&arns, max_results as usize, next_token))
    }

    async fn describe_services(&self, cluster: &str, services: &[String]) -> Result<Vec<Service>> {
        self.record(operation::DESCRIBE_SERVICES, Some(cluster), services.len())?;
        Ok(self.describe(operation::DESCRIBE_SERVICES, &self.services, services, |s: &Service| {
            s.arn.as_str()
        }))
    }

    async fn list_tasks(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.record(operation::LIST_TASKS, Some(cluster), max_results as usize)?;
        let arns: Vec<String> = self
            .tasks
            .iter()
            .filter(|t| t.cluster_arn == cluster)
            .map(|t| t.arn.clone())
            .collect();
        Ok(page_of(&arns, max_results as usize, next_token))
    }

    async fn describe_tasks(&self, cluster: &str, tasks: &[String]) -> Result<Vec<Task>> {
        self.record(operation::DESCRIBE_TASKS, Some(cluster), tasks.len())?;
        Ok(self.describe(operation::DESCRIBE_TASKS, &self.tasks, tasks, |t: &Task| {
            t.arn.as_str()
        }))
    }

    async fn list_container_instances(
        &self,
        cluster: &str,
        max_results: u32,
        next_token: Option<String>,
    ) -> Result<Page<String>> {
        self.record(
            operation::LIST_CONTAINER_INSTANCES,
            Some(cluster),
            max_results as usize,
        )?;
        let arns: Vec<String> = self
            .container_instances
            .iter()
            .filter(|ci| ci.cluster_arn == cluster)
            .map(|ci| ci.arn.clone())
            .collect();
        Ok(page_of(&arns, max_results as usize, next_token))
    }

    async fn describe_container_instances(
        &self,
        cluster: &str,
        container_instances: &[String],
    ) -> Result<Vec<ContainerInstance>> {
        self.record(
            operation::DESCRIBE_CONTAINER_INSTANCES,
            Some(cluster),
            container_instances.len(),
        )?;
        Ok(self.describe(
            operation::DESCRIBE_CONTAINER_INSTANCES,
            &self.container_instances,
            container_instances,
            |ci: &ContainerInstance| ci.arn.as_str(),
        ))
    }
}

#[async_trait]
impl ComputeApi for MockFleet {
    async fn describe_instances(
        &self,
        instance_ids: &[String],
        next_token: Option<String>,
    ) -> Result<Page<ComputeInstance>> {
        self.record(operation::DESCRIBE_INSTANCES, None, instance_ids.len())?;
        let found: Vec<ComputeInstance> = self
            .compute_instances
            .iter()
            .filter(|c| instance_ids.contains(&c.instance_id))
            .cloned()
            .collect();
        Ok(page_of(&found, self.compute_page_size, next_token))
    }
}

impl Connector for MockFleet {
    fn name(&self) -> &str {
        "mock"
    }

    fn orchestration(&self) -> &dyn OrchestrationApi {
        self
    }

    fn compute(&self) -> &dyn ComputeApi {
        self
    }
}
