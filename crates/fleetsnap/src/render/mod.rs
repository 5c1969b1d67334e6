//! Output renderers

mod json;
mod table;

use clap::ValueEnum;
use fleetsnap_core::Renderer;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables, one block per cluster
    Table,
    /// One JSON object per cluster per line
    Json,
}

impl OutputFormat {
    /// Case-insensitive lookup used for the settings file value
    pub fn parse(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

pub fn renderer<'w, W: Write + 'w>(format: OutputFormat, out: W) -> Box<dyn Renderer + 'w> {
    match format {
        OutputFormat::Table => Box::new(table::TableRenderer::new(out)),
        OutputFormat::Json => Box::new(json::JsonRenderer::new(out)),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use fleetsnap_core::{
        Cluster, ClusterSnapshot, ComputeInstance, ContainerInstance, Deployment,
        InstanceInventory, Service, Task, assemble,
    };

    pub const PROD: &str = "arn:aws:ecs:us-east-1:123456789012:cluster/prod";

    pub fn snapshot() -> ClusterSnapshot {
        let mut cluster = Cluster::new(PROD, "prod");
        cluster.status = "ACTIVE".to_string();
        cluster.running_tasks_count = 2;

        let updated = Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap();
        let web = Service::new(
            "arn:aws:ecs:us-east-1:123456789012:service/prod/web",
            "web",
            PROD,
            "arn:aws:ecs:us-east-1:123456789012:task-definition/web:7",
        )
        .with_counts(2, 1, 1)
        .with_deployment(Deployment::new("PRIMARY", 1, 1).with_updated_at(updated));

        let tasks = vec![
            Task::new(
                "arn:aws:ecs:us-east-1:123456789012:task/prod/aaa",
                PROD,
                "arn:aws:ecs:us-east-1:123456789012:task-definition/web:7",
            )
            .with_status("RUNNING", "RUNNING"),
            Task::new(
                "arn:aws:ecs:us-east-1:123456789012:task/prod/bbb",
                PROD,
                "arn:aws:ecs:us-east-1:123456789012:task-definition/cron:2",
            )
            .with_status("STOPPED", "STOPPED"),
        ];

        let mut compute = ComputeInstance::new("i-0abc");
        compute.instance_type = Some("t3.micro".to_string());
        compute.state = Some("running".to_string());
        compute.private_ip = Some("10.0.1.12".to_string());
        let inventory = InstanceInventory {
            container_instances: vec![ContainerInstance::new(
                "arn:aws:ecs:us-east-1:123456789012:container-instance/prod/ci1",
                PROD,
                "i-0abc",
            )],
            compute_instances: vec![compute],
        };

        assemble(cluster, vec![web], tasks, inventory).unwrap()
    }
}
