use crate::analyzer::Scheme;
use crate::domain::{Clock, PreReleaseComposer, TagNaming, TimestampLayout};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE_NAME: &str = "autotag.toml";

/// Represents the complete configuration for autotag, as read from
/// `autotag.toml` and overridden by command-line flags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Branch to tag; `main` or `master` when unset
    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default)]
    pub pre_release_name: Option<String>,

    /// `epoch` or `datetime`
    #[serde(default)]
    pub pre_release_timestamp: Option<String>,

    #[serde(default)]
    pub build_metadata: Option<String>,

    /// Prepend a literal `v` to written tags
    #[serde(default = "default_prefix")]
    pub prefix: bool,

    /// Only consider and write tags named `<subdirectory>/<version>`
    #[serde(default)]
    pub subdirectory: Option<String>,
}

fn default_scheme() -> String {
    Scheme::default().to_string()
}

fn default_prefix() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            branch: None,
            scheme: default_scheme(),
            pre_release_name: None,
            pre_release_timestamp: None,
            build_metadata: None,
            prefix: default_prefix(),
            subdirectory: None,
        }
    }
}

/// Validated settings consumed by [`crate::Autotag`]
#[derive(Debug, Clone)]
pub struct AutotagConfig {
    pub branch: Option<String>,
    pub scheme: Scheme,
    pub naming: TagNaming,
    pub composer: PreReleaseComposer,
}

impl AutotagConfig {
    /// Replace the clock used for pre-release timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.composer = self.composer.with_clock(clock);
        self
    }
}

// Empty strings coming from flags or the file mean "not set".
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl Config {
    /// Check every value and build the engine settings.
    ///
    /// Runs before the repository is touched, so invalid input never leads
    /// to a partial run.
    pub fn validate(&self) -> Result<AutotagConfig> {
        let scheme: Scheme = self.scheme.parse()?;
        let timestamp = non_empty(&self.pre_release_timestamp)
            .map(|layout| layout.parse::<TimestampLayout>())
            .transpose()?;
        let composer = PreReleaseComposer::new(
            non_empty(&self.pre_release_name),
            timestamp,
            non_empty(&self.build_metadata),
        )?;

        Ok(AutotagConfig {
            branch: non_empty(&self.branch),
            scheme,
            naming: TagNaming::new(self.prefix, non_empty(&self.subdirectory)),
            composer,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autotag.toml` in current directory
/// 3. `autotag.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            log::debug!("No `{}` found, using default config", CONFIG_FILE_NAME);
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
