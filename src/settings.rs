//! Persisted client settings
//!
//! Stores the credential source in the platform-specific app data folder:
//! - Linux: ~/.config/aws-provider/settings.json
//! - Windows: %APPDATA%/aws-provider/settings.json
//! - macOS: ~/Library/Application Support/aws-provider/settings.json

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aws::{AwsClient, AwsClientInput};

/// Where a client gets its credentials from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    /// Named profile resolved from the environment and shared config files
    Profile {
        #[serde(default)]
        profile: String,
        #[serde(default)]
        region: String,
        #[serde(default)]
        config_file: String,
    },
    /// Explicit keys
    Static(AwsClientInput),
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Profile {
            profile: "default".to_string(),
            region: String::new(),
            config_file: String::new(),
        }
    }
}

/// Settings that persist between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub credentials: CredentialSource,
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Load settings from `path`, returning defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::info!("Loaded settings from {:?}: {}", path, settings.describe());

        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        tracing::debug!("Saved settings to {:?}", path);

        Ok(())
    }

    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "github.n-orlov", "aws-provider")
            .context("Failed to determine settings directory")?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Use a named profile
    pub fn set_profile(&mut self, profile: &str, region: &str, config_file: Option<&str>) {
        self.credentials = CredentialSource::Profile {
            profile: profile.to_string(),
            region: region.to_string(),
            config_file: config_file.unwrap_or_default().to_string(),
        };
    }

    /// Use explicit credentials
    pub fn set_static(&mut self, input: AwsClientInput) {
        self.credentials = CredentialSource::Static(input);
    }

    /// Build a client from the configured credential source
    pub async fn connect(&self) -> crate::Result<AwsClient> {
        match &self.credentials {
            CredentialSource::Profile {
                profile,
                region,
                config_file,
            } => AwsClient::new(profile, region, config_file).await,
            CredentialSource::Static(input) => AwsClient::with_input(input).await,
        }
    }

    // Never includes secrets
    fn describe(&self) -> String {
        match &self.credentials {
            CredentialSource::Profile { profile, region, .. } => {
                format!("profile={:?}, region={:?}", profile, region)
            }
            CredentialSource::Static(input) => {
                format!("static key {}, region={:?}", input.access_key_id, input.region)
            }
        }
    }
}
