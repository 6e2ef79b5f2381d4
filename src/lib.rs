//! Unified AWS client library
//!
//! This crate provides one client over AWS IAM, STS and S3. A client is built
//! either from ambient profile/environment credentials ([`AwsClient::new`]) or
//! from explicit keys ([`AwsClient::with_input`]); every operation is then a
//! direct call into the corresponding AWS SDK client.

pub mod aws;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod error;
pub mod logging;
pub mod settings;

pub use aws::{AwsClient, AwsClientInput, Client};
pub use error::{Error, Result};
