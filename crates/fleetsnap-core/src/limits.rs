//! Page and batch sizes for remote calls

use crate::error::{FleetError, Result};
use serde::{Deserialize, Serialize};

/// Largest `maxResults` the ECS list calls accept
pub const MAX_LIST_PAGE: u32 = 100;

/// Largest identity set a single DescribeServices call accepts
pub const MAX_DESCRIBE_SERVICES: usize = 10;

/// Largest identity set a single DescribeTasks call accepts
pub const MAX_DESCRIBE_TASKS: usize = 100;

/// Largest identity set a single DescribeContainerInstances call accepts
pub const MAX_DESCRIBE_CONTAINER_INSTANCES: usize = 100;

/// Largest instance-id set a single DescribeInstances call accepts
pub const MAX_COMPUTE_BATCH: usize = 1000;

/// Page sizes used by the list calls and the compute lookup batch size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchLimits {
    pub clusters: u32,
    pub services: u32,
    pub tasks: u32,
    pub container_instances: u32,
    pub compute_batch: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            clusters: 100,
            services: 10,
            tasks: 100,
            container_instances: 100,
            compute_batch: MAX_COMPUTE_BATCH,
        }
    }
}

impl FetchLimits {
    /// Reject zero or over-limit values before any remote call is made
    pub fn validate(&self) -> Result<()> {
        let pages = [
            ("clusters", self.clusters),
            ("services", self.services),
            ("tasks", self.tasks),
            ("container_instances", self.container_instances),
        ];
        for (name, value) in pages {
            if value == 0 || value > MAX_LIST_PAGE {
                return Err(FleetError::Configuration(format!(
                    "{} page size {} must be between 1 and {}",
                    name, value, MAX_LIST_PAGE
                )));
            }
        }

        if self.compute_batch == 0 || self.compute_batch > MAX_COMPUTE_BATCH {
            return Err(FleetError::Configuration(format!(
                "compute_batch {} must be between 1 and {}",
                self.compute_batch, MAX_COMPUTE_BATCH
            )));
        }

        Ok(())
    }
}
