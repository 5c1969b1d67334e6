//! Matching of entities that share no foreign key
//!
//! Everything here is pure: same inputs, same outputs, no I/O.

use crate::error::{FleetError, Result};
use crate::model::{
    ComputeInstance, ContainerInstance, Deployment, DeploymentCounts, DeploymentSummary,
    InstancePairing, Service, ServiceRef, Task, TaskServiceLink,
};
use std::collections::{BTreeMap, HashMap};

/// Operation name reported when the instance join is inconsistent
pub const INSTANCE_JOIN: &str = "correlate.InstanceJoin";

/// Credit each task to the first service running its exact task definition
///
/// Matching is full-string equality on the task definition identity
/// (family and revision), so services on different revisions of one family
/// never share tasks. When several services reference the same revision the
/// one fetched first wins.
pub fn link_tasks(services: &[Service], tasks: &[Task]) -> Vec<TaskServiceLink> {
    tasks
        .iter()
        .map(|task| {
            let service = services
                .iter()
                .find(|s| s.task_definition == task.task_definition)
                .map(|s| ServiceRef {
                    arn: s.arn.clone(),
                    name: s.name.clone(),
                });

            if service.is_none() {
                tracing::trace!(task = %task.arn, "Task has no matching service");
            }

            TaskServiceLink {
                task_arn: task.arn.clone(),
                service,
            }
        })
        .collect()
}

/// Resolve each container instance to its compute instance by id
///
/// A container instance whose id is absent from `compute` is reported as an
/// inconsistency rather than dropped.
pub fn pair_instances(
    container_instances: &[ContainerInstance],
    compute: &[ComputeInstance],
) -> Result<Vec<InstancePairing>> {
    let by_id: HashMap<&str, &ComputeInstance> = compute
        .iter()
        .map(|c| (c.instance_id.as_str(), c))
        .collect();

    let mut unresolved = Vec::new();
    let mut pairings = Vec::with_capacity(container_instances.len());

    for ci in container_instances {
        match by_id.get(ci.instance_id.as_str()) {
            Some(instance) => pairings.push(InstancePairing {
                container_instance_arn: ci.arn.clone(),
                instance_id: instance.instance_id.clone(),
            }),
            None => unresolved.push(format!("{} -> {}", ci.arn, ci.instance_id)),
        }
    }

    if !unresolved.is_empty() {
        return Err(FleetError::consistency(
            INSTANCE_JOIN,
            format!(
                "{} container instance(s) reference compute instances that were not described: {}",
                unresolved.len(),
                unresolved.join(", ")
            ),
        ));
    }

    Ok(pairings)
}

/// Fold a service's deployments into per-status counts and last change time
pub fn summarize_deployments(service: &Service) -> DeploymentSummary {
    let mut by_status: BTreeMap<String, DeploymentCounts> = BTreeMap::new();
    let mut last_changed = None;

    for deployment in &service.deployments {
        let counts = by_status.entry(deployment.status.clone()).or_default();
        counts.running += deployment.running_count;
        counts.pending += deployment.pending_count;

        last_changed = latest(last_changed, deployment);
    }

    DeploymentSummary {
        service_arn: service.arn.clone(),
        by_status,
        last_changed,
    }
}

fn latest(
    current: Option<chrono::DateTime<chrono::Utc>>,
    deployment: &Deployment,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match (current, deployment.updated_at) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}
