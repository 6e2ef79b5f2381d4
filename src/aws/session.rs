//! Session construction
//!
//! A [`Session`] wraps the loaded SDK configuration (resolved region and
//! credentials provider) and hands out the per-service SDK clients. It is
//! built either from [`SessionOptions`] (named profile, ambient credentials)
//! or from an [`AwsClientInput`] (static credentials).

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_runtime::env_config::file::{EnvConfigFileKind, EnvConfigFiles};
use std::path::{Path, PathBuf};

use crate::aws::credentials::AwsClientInput;
use crate::error::{Error, Result};

/// Options for a session resolved from the environment and shared config files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Named profile; `None` uses the SDK's default selection
    pub profile: Option<String>,
    /// Region; `None` falls back to the SDK region provider chain
    pub region: Option<String>,
    /// Absolute path of a shared config file replacing the default ones
    pub config_file: Option<PathBuf>,
}

impl SessionOptions {
    /// Build options from raw constructor arguments.
    ///
    /// Empty strings mean "not set". A non-empty `config_file` is made
    /// absolute against the current working directory.
    pub fn new(profile: &str, region: &str, config_file: &str) -> Result<Self> {
        let config_file = if config_file.is_empty() {
            None
        } else {
            Some(absolute_config_path(Path::new(config_file))?)
        };

        Ok(Self {
            profile: non_empty(profile),
            region: non_empty(region),
            config_file,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn absolute_config_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::ConfigPath {
        path: path.to_path_buf(),
        source,
    })
}

/// Loaded SDK configuration used to construct sub-clients
#[derive(Debug, Clone)]
pub struct Session {
    config: SdkConfig,
    force_path_style: bool,
}

impl Session {
    /// Load a session from the environment, honouring profile, region and config file
    pub async fn from_options(options: &SessionOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(ref profile) = options.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(ref region) = options.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(ref path) = options.config_file {
            tracing::debug!("Using shared config file {:?}", path);
            let files = EnvConfigFiles::builder()
                .with_file(EnvConfigFileKind::Config, path)
                .build();
            loader = loader.profile_files(files);
        }

        let config = loader.load().await;

        Self {
            config,
            force_path_style: false,
        }
    }

    /// Build a session from static credentials; no lookup of ambient credentials happens
    pub async fn from_input(input: &AwsClientInput) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(input.region.clone()))
            .credentials_provider(input.credentials());

        if let Some(ref endpoint) = input.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        Self {
            config,
            force_path_style: input.force_path_style,
        }
    }

    /// Resolve credentials once, failing if none can be obtained
    pub async fn resolve_credentials(&self) -> Result<()> {
        let provider = self
            .config
            .credentials_provider()
            .ok_or(Error::NoCredentialsProvider)?;

        provider
            .provide_credentials()
            .await
            .map_err(|source| Error::Session { source })?;

        Ok(())
    }

    /// Region the session resolved, if any
    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    pub fn iam_client(&self) -> aws_sdk_iam::Client {
        aws_sdk_iam::Client::new(&self.config)
    }

    pub fn sts_client(&self) -> aws_sdk_sts::Client {
        aws_sdk_sts::Client::new(&self.config)
    }

    pub fn s3_client(&self) -> aws_sdk_s3::Client {
        let config = aws_sdk_s3::config::Builder::from(&self.config)
            .force_path_style(self.force_path_style)
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }
}
