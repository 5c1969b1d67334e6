//! AWS connector error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error(
        "No AWS region configured. Set AWS_REGION, pass --region, or add `region` to the profile in ~/.aws/config"
    )]
    MissingRegion,
}

pub type Result<T> = std::result::Result<T, AwsError>;
