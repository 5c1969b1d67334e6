//! Inventory data model
//!
//! Read-only value snapshots of remote state at fetch time. Nothing here is
//! mutated after construction; a fresh set is built on every run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cluster as reported by describe-clusters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub arn: String,
    pub name: String,
    pub status: String,
    pub pending_tasks_count: i64,
    pub running_tasks_count: i64,
    pub registered_container_instances_count: i64,
    pub active_services_count: i64,
}

impl Cluster {
    pub fn new(arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
            status: String::new(),
            pending_tasks_count: 0,
            running_tasks_count: 0,
            registered_container_instances_count: 0,
            active_services_count: 0,
        }
    }

    /// True when `id` names this cluster by ARN or by short name
    pub fn matches(&self, id: &str) -> bool {
        self.arn == id || self.name == id
    }
}

/// One rollout generation of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: Option<String>,
    /// PRIMARY, ACTIVE, INACTIVE
    pub status: String,
    pub task_definition: Option<String>,
    pub desired_count: i64,
    pub running_count: i64,
    pub pending_count: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Deployment {
    pub fn new(status: impl Into<String>, running_count: i64, pending_count: i64) -> Self {
        Self {
            id: None,
            status: status.into(),
            task_definition: None,
            desired_count: 0,
            running_count,
            pending_count,
            updated_at: None,
        }
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub arn: String,
    pub name: String,
    pub cluster_arn: String,
    pub status: String,
    /// Task definition identity (ARN or `family:revision`)
    pub task_definition: String,
    pub desired_count: i64,
    pub running_count: i64,
    pub pending_count: i64,
    pub launch_type: Option<String>,
    pub deployments: Vec<Deployment>,
}

impl Service {
    pub fn new(
        arn: impl Into<String>,
        name: impl Into<String>,
        cluster_arn: impl Into<String>,
        task_definition: impl Into<String>,
    ) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
            cluster_arn: cluster_arn.into(),
            status: String::new(),
            task_definition: task_definition.into(),
            desired_count: 0,
            running_count: 0,
            pending_count: 0,
            launch_type: None,
            deployments: Vec::new(),
        }
    }

    pub fn with_counts(mut self, desired: i64, running: i64, pending: i64) -> Self {
        self.desired_count = desired;
        self.running_count = running;
        self.pending_count = pending;
        self
    }

    pub fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployments.push(deployment);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub arn: String,
    pub cluster_arn: String,
    pub task_definition: String,
    pub last_status: String,
    pub desired_status: String,
    pub container_count: usize,
    pub container_instance_arn: Option<String>,
    /// `ecs-svc/...` for service-managed tasks
    pub started_by: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        arn: impl Into<String>,
        cluster_arn: impl Into<String>,
        task_definition: impl Into<String>,
    ) -> Self {
        Self {
            arn: arn.into(),
            cluster_arn: cluster_arn.into(),
            task_definition: task_definition.into(),
            last_status: String::new(),
            desired_status: String::new(),
            container_count: 0,
            container_instance_arn: None,
            started_by: None,
            started_at: None,
        }
    }

    pub fn with_status(mut self, last: impl Into<String>, desired: impl Into<String>) -> Self {
        self.last_status = last.into();
        self.desired_status = desired.into();
        self
    }
}

/// A host registered with a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInstance {
    pub arn: String,
    pub cluster_arn: String,
    /// Id of the backing compute instance (e.g. `i-0abc...`)
    pub instance_id: String,
    pub status: String,
    pub agent_connected: bool,
    pub running_tasks_count: i64,
    pub pending_tasks_count: i64,
}

impl ContainerInstance {
    pub fn new(
        arn: impl Into<String>,
        cluster_arn: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            arn: arn.into(),
            cluster_arn: cluster_arn.into(),
            instance_id: instance_id.into(),
            status: String::new(),
            agent_connected: false,
            running_tasks_count: 0,
            pending_tasks_count: 0,
        }
    }
}

/// The virtual machine behind a container instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeInstance {
    pub instance_id: String,
    pub instance_type: Option<String>,
    pub state: Option<String>,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub availability_zone: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
}

impl ComputeInstance {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            instance_type: None,
            state: None,
            private_ip: None,
            public_ip: None,
            availability_zone: None,
            launch_time: None,
        }
    }
}

/// Reference to the service a task was credited to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRef {
    pub arn: String,
    pub name: String,
}

/// Result of correlating one task against the cluster's services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskServiceLink {
    pub task_arn: String,
    /// `None` when no service runs the task's exact task definition
    pub service: Option<ServiceRef>,
}

impl TaskServiceLink {
    pub fn is_linked(&self) -> bool {
        self.service.is_some()
    }
}

/// A container instance resolved to its compute instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePairing {
    pub container_instance_arn: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentCounts {
    pub running: i64,
    pub pending: i64,
}

/// Deployments of one service folded by status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub service_arn: String,
    pub by_status: BTreeMap<String, DeploymentCounts>,
    /// Latest `updated_at` across the service's deployments
    pub last_changed: Option<DateTime<Utc>>,
}

/// Everything known about one cluster at fetch time, cross-referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub cluster: Cluster,
    pub services: Vec<Service>,
    pub tasks: Vec<Task>,
    pub container_instances: Vec<ContainerInstance>,
    pub compute_instances: Vec<ComputeInstance>,
    pub task_links: Vec<TaskServiceLink>,
    pub instance_pairings: Vec<InstancePairing>,
    pub deployment_summaries: Vec<DeploymentSummary>,
}

impl ClusterSnapshot {
    /// Service a task was credited to, if any
    pub fn service_for_task(&self, task_arn: &str) -> Option<&Service> {
        let link = self.task_links.iter().find(|l| l.task_arn == task_arn)?;
        let service = link.service.as_ref()?;
        self.services.iter().find(|s| s.arn == service.arn)
    }

    /// Compute instance backing a container instance
    pub fn compute_for(&self, container_instance_arn: &str) -> Option<&ComputeInstance> {
        let pairing = self
            .instance_pairings
            .iter()
            .find(|p| p.container_instance_arn == container_instance_arn)?;
        self.compute_instances
            .iter()
            .find(|c| c.instance_id == pairing.instance_id)
    }

    pub fn deployment_summary(&self, service_arn: &str) -> Option<&DeploymentSummary> {
        self.deployment_summaries
            .iter()
            .find(|d| d.service_arn == service_arn)
    }

    /// Tasks no service could be credited with
    pub fn unlinked_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| {
            self.task_links
                .iter()
                .any(|l| l.task_arn == t.arn && !l.is_linked())
        })
    }
}
