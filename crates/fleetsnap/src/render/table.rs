use colored::Colorize;
use fleetsnap_core::{ClusterSnapshot, DeploymentSummary, Renderer, TaskDefinitionId, short_name};
use std::io::{self, Write};

const RULE_WIDTH: usize = 105;

/// Human-readable tables, one block per cluster
pub struct TableRenderer<W: Write> {
    out: W,
    rendered: usize,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, rendered: 0 }
    }

    fn heading(&mut self, title: &str, columns: String) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "  {}", title.bold())?;
        writeln!(self.out, "  {}", columns.bold())?;
        writeln!(self.out, "  {}", "─".repeat(RULE_WIDTH).dimmed())
    }

    fn clusters(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        let c = &snapshot.cluster;
        writeln!(
            self.out,
            "{} {}",
            format!("▶ {}", c.name).cyan().bold(),
            c.arn.dimmed()
        )?;
        self.heading(
            "Cluster",
            format!(
                "{:<20} {:<10} {:>8} {:>8} {:>10}",
                "NAME", "STATUS", "PENDING", "RUNNING", "INSTANCES"
            ),
        )?;
        writeln!(
            self.out,
            "  {} {} {:>8} {:>8} {:>10}",
            format!("{:<20}", c.name).cyan(),
            status(&c.status, 10),
            c.pending_tasks_count,
            c.running_tasks_count,
            c.registered_container_instances_count
        )
    }

    fn services(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        if snapshot.services.is_empty() {
            return Ok(());
        }
        self.heading(
            "Services",
            format!(
                "{:<20} {:<10} {:<20} {:>9} {:<24} {}",
                "NAME", "STATUS", "TASK DEF", "RUN/PEND", "DEPLOYMENTS", "UPDATED"
            ),
        )?;
        for service in &snapshot.services {
            let summary = snapshot.deployment_summary(&service.arn);
            let updated = summary
                .and_then(|d| d.last_changed)
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                self.out,
                "  {} {} {:<20} {:>9} {:<24} {}",
                format!("{:<20}", service.name).cyan(),
                status(&service.status, 10),
                task_definition(&service.task_definition),
                format!("{}/{}", service.running_count, service.pending_count),
                summary.map(deployments).unwrap_or_default(),
                updated.dimmed()
            )?;
        }
        Ok(())
    }

    fn tasks(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        if snapshot.tasks.is_empty() {
            return Ok(());
        }
        self.heading(
            "Tasks",
            format!(
                "{:<20} {:<10} {:<10} {:>10} {}",
                "TASK DEF", "STATUS", "DESIRED", "CONTAINERS", "SERVICE"
            ),
        )?;
        for task in &snapshot.tasks {
            let service = snapshot
                .service_for_task(&task.arn)
                .map(|s| s.name.as_str().normal())
                .unwrap_or_else(|| "-".dimmed());
            writeln!(
                self.out,
                "  {:<20} {} {:<10} {:>10} {}",
                task_definition(&task.task_definition),
                status(&task.last_status, 10),
                task.desired_status,
                task.container_count,
                service
            )?;
        }
        Ok(())
    }

    fn instances(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        if snapshot.container_instances.is_empty() {
            return Ok(());
        }
        self.heading(
            "Instances",
            format!(
                "{:<38} {:<20} {:<12} {:<10} {:<16} {}",
                "CONTAINER INSTANCE", "EC2 ID", "TYPE", "STATE", "PRIVATE IP", "AZ"
            ),
        )?;
        for ci in &snapshot.container_instances {
            let compute = snapshot.compute_for(&ci.arn);
            let instance_type = compute.and_then(|c| c.instance_type.as_deref());
            let state = compute.and_then(|c| c.state.as_deref());
            let private_ip = compute.and_then(|c| c.private_ip.as_deref());
            let zone = compute.and_then(|c| c.availability_zone.as_deref());
            writeln!(
                self.out,
                "  {:<38} {} {:<12} {} {:<16} {}",
                short(&ci.arn),
                format!("{:<20}", ci.instance_id).cyan(),
                instance_type.unwrap_or("-"),
                status(state.unwrap_or("-"), 10),
                private_ip.unwrap_or("-"),
                zone.unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn render(&mut self, snapshot: &ClusterSnapshot) -> io::Result<()> {
        if self.rendered > 0 {
            writeln!(self.out)?;
        }
        self.clusters(snapshot)?;
        self.services(snapshot)?;
        self.tasks(snapshot)?;
        self.instances(snapshot)?;
        self.rendered += 1;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.rendered == 0 {
            writeln!(self.out, "{}", "No clusters found".dimmed())?;
        }
        self.out.flush()
    }
}

/// Last path segment of an ARN, or the input unchanged
fn short(identity: &str) -> String {
    short_name(identity).unwrap_or_else(|_| identity.to_string())
}

/// `family:revision`, falling back to the short name when there is no revision
fn task_definition(identity: &str) -> String {
    TaskDefinitionId::parse(identity)
        .map(|id| id.to_string())
        .unwrap_or_else(|_| short(identity))
}

fn status(value: &str, width: usize) -> colored::ColoredString {
    let padded = format!("{:<width$}", value, width = width);
    match value.to_ascii_uppercase().as_str() {
        "ACTIVE" | "RUNNING" => padded.green(),
        "PENDING" | "PROVISIONING" | "ACTIVATING" | "DRAINING" => padded.yellow(),
        "-" => padded.dimmed(),
        _ => padded.red(),
    }
}

/// "PRIMARY 2/1, ACTIVE 1/0"
fn deployments(summary: &DeploymentSummary) -> String {
    summary
        .by_status
        .iter()
        .map(|(status, counts)| format!("{} {}/{}", status, counts.running, counts.pending))
        .collect::<Vec<_>>()
        .join(", ")
}
