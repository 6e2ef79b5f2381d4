//! AWS client module
//!
//! This module provides a single client over IAM, STS and S3:
//! - [`client::AwsClient`] - Facade implementing the [`client::Client`] operations
//! - [`session`] - Session construction from profiles or static credentials
//! - [`credentials::AwsClientInput`] - Explicit credential configuration
//! - [`services`] - Per-service sub-client traits

pub mod client;
pub mod credentials;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use client::{AwsClient, Client};
pub use credentials::AwsClientInput;
pub use services::{IamApi, OperationResult, S3Api, StsApi};
pub use session::{Session, SessionOptions};
