//! Errors raised while constructing a client
//!
//! Failures of individual operations are not wrapped here; they are returned
//! as the SDK's own `SdkError` (see [`crate::aws::services::OperationResult`]).

use aws_credential_types::provider::error::CredentialsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The config file path could not be made absolute
    #[error("Could not resolve config file path {path:?}")]
    ConfigPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Credential resolution failed while probing a new session
    #[error("Could not create AWS session")]
    Session {
        #[source]
        source: CredentialsError,
    },

    /// The loaded configuration has no credentials provider at all
    #[error("Could not create AWS session: no credential providers configured")]
    NoCredentialsProvider,

    /// The tokio runtime backing the blocking client could not be built
    #[error("Could not start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
