//! Fleet inventory error types

use crate::identity::IdentityError;
use thiserror::Error;

/// Fleet inventory errors
///
/// Every remote failure carries the name of the call that produced it
/// (e.g. `ecs.ListServices`) so the message reads `<operation>: <cause>`.
#[derive(Error, Debug)]
pub enum FleetError {
    /// The underlying call failed (network, throttling, auth)
    #[error("{operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// A describe call returned fewer items than the requested identities imply
    #[error("{operation}: {message}")]
    Consistency {
        operation: &'static str,
        message: String,
    },

    /// Caller-supplied limits exceed what the remote API accepts
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid identity: {0}")]
    Identity(#[from] IdentityError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FleetError {
    pub fn transport(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    pub fn consistency(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Consistency {
            operation,
            message: message.into(),
        }
    }

    /// Name of the remote call that failed, if the error came from one
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Transport { operation, .. } | Self::Consistency { operation, .. } => {
                Some(operation)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;
