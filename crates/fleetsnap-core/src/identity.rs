//! Resource identity parsing
//!
//! ECS hands back identities as ARNs such as
//! `arn:aws:ecs:ap-northeast-1:123456789012:service/prod/web`. The helpers
//! here split those into typed parts so callers can show short names without
//! guessing at string layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("empty identity")]
    Empty,

    #[error("not an ARN: {0}")]
    NotAnArn(String),

    #[error("ARN has no resource part: {0}")]
    MissingResource(String),

    #[error("task definition has no revision: {0}")]
    MissingRevision(String),

    #[error("task definition revision is not a number: {0}")]
    InvalidRevision(String),
}

/// A parsed Amazon Resource Name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    /// Everything after the account id, e.g. `service/prod/web`
    pub resource: String,
}

impl Arn {
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        s.parse()
    }

    /// Resource type prefix (`cluster`, `service`, `task-definition`, ...)
    pub fn resource_type(&self) -> Option<&str> {
        self.resource.split_once('/').map(|(kind, _)| kind)
    }

    /// Last path segment of the resource, i.e. the human-readable name
    ///
    /// `service/prod/web` yields `web`, `task-definition/web:7` yields `web:7`.
    pub fn resource_name(&self) -> &str {
        self.resource
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.resource)
    }
}

impl FromStr for Arn {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdentityError::Empty);
        }

        let mut parts = s.splitn(6, ':');
        let (Some("arn"), Some(partition), Some(service), Some(region), Some(account_id)) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(IdentityError::NotAnArn(s.to_string()));
        };

        if partition.is_empty() || service.is_empty() {
            return Err(IdentityError::NotAnArn(s.to_string()));
        }

        let resource = match parts.next() {
            Some(r) if !r.is_empty() => r,
            _ => return Err(IdentityError::MissingResource(s.to_string())),
        };

        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

/// Task definition identity: family plus revision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDefinitionId {
    pub family: String,
    pub revision: u32,
}

impl TaskDefinitionId {
    /// Accepts either `family:revision` or a full task definition ARN
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        s.parse()
    }
}

impl FromStr for TaskDefinitionId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdentityError::Empty);
        }

        let short = if s.starts_with("arn:") {
            let arn = Arn::parse(s)?;
            arn.resource_name().to_string()
        } else {
            s.to_string()
        };

        let (family, revision) = short
            .rsplit_once(':')
            .ok_or_else(|| IdentityError::MissingRevision(s.to_string()))?;
        if family.is_empty() {
            return Err(IdentityError::MissingRevision(s.to_string()));
        }
        let revision = revision
            .parse::<u32>()
            .map_err(|_| IdentityError::InvalidRevision(s.to_string()))?;

        Ok(Self {
            family: family.to_string(),
            revision,
        })
    }
}

impl fmt::Display for TaskDefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.revision)
    }
}

/// Short display name for an identity that may or may not be an ARN
///
/// Plain names pass through unchanged; ARNs are reduced to their last
/// resource segment. Malformed ARNs are reported, not silently blanked.
pub fn short_name(identity: &str) -> Result<String, IdentityError> {
    if identity.is_empty() {
        return Err(IdentityError::Empty);
    }
    if identity.starts_with("arn:") {
        Ok(Arn::parse(identity)?.resource_name().to_string())
    } else {
        Ok(identity.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_arn() {
        let arn = Arn::parse("arn:aws:ecs:ap-northeast-1:123456789012:service/prod/web").unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "ecs");
        assert_eq!(arn.region, "ap-northeast-1");
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(arn.resource_type(), Some("service"));
        assert_eq!(arn.resource_name(), "web");
    }

    #[test]
    fn test_arn_display_round_trips_text() {
        let raw = "arn:aws:ecs:us-east-1:123456789012:cluster/prod";
        assert_eq!(Arn::parse(raw).unwrap().to_string(), raw);
    }

    #[test]
    fn test_parse_rejects_non_arn() {
        assert_eq!(
            Arn::parse("prod"),
            Err(IdentityError::NotAnArn("prod".to_string()))
        );
        assert_eq!(Arn::parse(""), Err(IdentityError::Empty));
        assert!(matches!(
            Arn::parse("arn:aws:ecs:us-east-1:123456789012:"),
            Err(IdentityError::MissingResource(_))
        ));
    }

    #[test]
    fn test_task_definition_from_arn() {
        let id = TaskDefinitionId::parse(
            "arn:aws:ecs:us-east-1:123456789012:task-definition/web:7",
        )
        .unwrap();
        assert_eq!(id.family, "web");
        assert_eq!(id.revision, 7);
        assert_eq!(id.to_string(), "web:7");
    }

    #[test]
    fn test_task_definition_short_form() {
        let id = TaskDefinitionId::parse("fam:3").unwrap();
        assert_eq!(id.family, "fam");
        assert_eq!(id.revision, 3);
    }

    #[test]
    fn test_task_definition_errors() {
        assert!(matches!(
            TaskDefinitionId::parse("web"),
            Err(IdentityError::MissingRevision(_))
        ));
        assert!(matches!(
            TaskDefinitionId::parse("web:latest"),
            Err(IdentityError::InvalidRevision(_))
        ));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("prod").unwrap(), "prod");
        assert_eq!(
            short_name("arn:aws:ecs:us-east-1:123456789012:cluster/prod").unwrap(),
            "prod"
        );
        assert!(short_name("arn:broken").is_err());
    }
}
