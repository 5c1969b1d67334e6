//! SDK shapes to fleetsnap model values

use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::types as ec2;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types as ecs;
use chrono::{DateTime, Utc};
use fleetsnap_core::{
    Cluster, ComputeInstance, ContainerInstance, Deployment, FleetError, Page, Service, Task,
    operation,
};

/// Map an SDK error to a transport fault tagged with `operation`
///
/// The full error chain is kept so "AccessDeniedException: ..." style causes
/// survive into the message.
pub(crate) fn transport<E>(operation: &'static str) -> impl FnOnce(E) -> FleetError
where
    E: std::error::Error,
{
    move |err| FleetError::transport(operation, DisplayErrorContext(err).to_string())
}

/// `maxResults` as the SDK wants it; values are validated upstream
pub(crate) fn page_size(max_results: u32) -> i32 {
    i32::try_from(max_results).unwrap_or(i32::MAX)
}

/// One page of a list call's identities
pub(crate) fn id_page(arns: Option<Vec<String>>, next_token: Option<String>) -> Page<String> {
    Page::new(arns.unwrap_or_default(), next_token)
}

/// Instances from every reservation, in response order
pub(crate) fn compute_page(out: DescribeInstancesOutput) -> Page<ComputeInstance> {
    let instances = out
        .reservations
        .unwrap_or_default()
        .into_iter()
        .flat_map(|r| r.instances.unwrap_or_default())
        .map(compute_instance)
        .collect();

    Page::new(instances, out.next_token)
}

pub(crate) fn timestamp(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// Log per-identity failures reported alongside a describe response
pub(crate) fn log_failures(operation: &'static str, failures: Option<Vec<ecs::Failure>>) {
    for failure in failures.unwrap_or_default() {
        tracing::warn!(
            operation,
            arn = failure.arn.as_deref().unwrap_or("-"),
            reason = failure.reason.as_deref().unwrap_or("-"),
            "Describe reported a failure"
        );
    }
}

pub(crate) fn cluster(c: ecs::Cluster) -> Cluster {
    Cluster {
        arn: c.cluster_arn.unwrap_or_default(),
        name: c.cluster_name.unwrap_or_default(),
        status: c.status.unwrap_or_default(),
        pending_tasks_count: i64::from(c.pending_tasks_count),
        running_tasks_count: i64::from(c.running_tasks_count),
        registered_container_instances_count: i64::from(c.registered_container_instances_count),
        active_services_count: i64::from(c.active_services_count),
    }
}

fn deployment(d: ecs::Deployment) -> Deployment {
    Deployment {
        id: d.id,
        status: d.status.unwrap_or_default(),
        task_definition: d.task_definition,
        desired_count: i64::from(d.desired_count),
        running_count: i64::from(d.running_count),
        pending_count: i64::from(d.pending_count),
        updated_at: d
            .updated_at
            .and_then(|t| timestamp(t.secs(), t.subsec_nanos())),
    }
}

/// `cluster` fills in the owner when the response leaves it out
pub(crate) fn service(s: ecs::Service, cluster: &str) -> Service {
    Service {
        arn: s.service_arn.unwrap_or_default(),
        name: s.service_name.unwrap_or_default(),
        cluster_arn: s.cluster_arn.unwrap_or_else(|| cluster.to_string()),
        status: s.status.unwrap_or_default(),
        task_definition: s.task_definition.unwrap_or_default(),
        desired_count: i64::from(s.desired_count),
        running_count: i64::from(s.running_count),
        pending_count: i64::from(s.pending_count),
        launch_type: s.launch_type.map(|l| l.as_str().to_string()),
        deployments: s
            .deployments
            .unwrap_or_default()
            .into_iter()
            .map(deployment)
            .collect(),
    }
}

pub(crate) fn task(t: ecs::Task, cluster: &str) -> Task {
    Task {
        arn: t.task_arn.unwrap_or_default(),
        cluster_arn: t.cluster_arn.unwrap_or_else(|| cluster.to_string()),
        task_definition: t.task_definition_arn.unwrap_or_default(),
        last_status: t.last_status.unwrap_or_default(),
        desired_status: t.desired_status.unwrap_or_default(),
        container_count: t.containers.map(|c| c.len()).unwrap_or_default(),
        container_instance_arn: t.container_instance_arn,
        started_by: t.started_by,
        started_at: t
            .started_at
            .and_then(|ts| timestamp(ts.secs(), ts.subsec_nanos())),
    }
}

/// A container instance must name the EC2 instance behind it
pub(crate) fn container_instance(
    ci: ecs::ContainerInstance,
    cluster: &str,
) -> fleetsnap_core::Result<ContainerInstance> {
    let arn = ci.container_instance_arn.unwrap_or_default();
    let instance_id = ci.ec2_instance_id.ok_or_else(|| {
        FleetError::consistency(
            operation::DESCRIBE_CONTAINER_INSTANCES,
            format!("{} has no EC2 instance id", arn),
        )
    })?;

    Ok(ContainerInstance {
        arn,
        cluster_arn: cluster.to_string(),
        instance_id,
        status: ci.status.unwrap_or_default(),
        agent_connected: ci.agent_connected,
        running_tasks_count: i64::from(ci.running_tasks_count),
        pending_tasks_count: i64::from(ci.pending_tasks_count),
    })
}

pub(crate) fn compute_instance(i: ec2::Instance) -> ComputeInstance {
    ComputeInstance {
        instance_id: i.instance_id.unwrap_or_default(),
        instance_type: i.instance_type.map(|t| t.as_str().to_string()),
        state: i
            .state
            .and_then(|s| s.name)
            .map(|n| n.as_str().to_string()),
        private_ip: i.private_ip_address,
        public_ip: i.public_ip_address,
        availability_zone: i.placement.and_then(|p| p.availability_zone),
        launch_time: i
            .launch_time
            .and_then(|t| timestamp(t.secs(), t.subsec_nanos())),
    }
}
