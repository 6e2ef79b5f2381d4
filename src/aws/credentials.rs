//! Static AWS credential configuration
//!
//! [`AwsClientInput`] carries explicitly supplied keys. It is the input of the
//! second construction path, [`crate::aws::AwsClient::with_input`], and bypasses
//! the profile and environment lookup the SDK would otherwise perform.

use aws_credential_types::Credentials;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name reported by the SDK for credentials created from an [`AwsClientInput`]
pub const STATIC_PROVIDER_NAME: &str = "AwsClientInput";

/// Explicit credentials and region for a new client
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsClientInput {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Session token for temporary credentials; empty when not used
    #[serde(default)]
    pub session_token: String,
    pub region: String,

    /// Custom endpoint (for S3-compatible stores such as MinIO)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Use path-style addressing for S3 requests
    #[serde(default)]
    pub force_path_style: bool,
}

impl AwsClientInput {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    /// Point all sub-clients at a custom endpoint
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>, force_path_style: bool) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self.force_path_style = force_path_style;
        self
    }

    /// Build SDK credentials from the configured keys
    pub fn credentials(&self) -> Credentials {
        let session_token = if self.session_token.is_empty() {
            None
        } else {
            Some(self.session_token.clone())
        };

        Credentials::new(
            &self.access_key_id,
            &self.secret_access_key,
            session_token,
            None,
            STATIC_PROVIDER_NAME,
        )
    }
}

impl fmt::Debug for AwsClientInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsClientInput")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &if self.session_token.is_empty() { "" } else { "** redacted **" },
            )
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}
