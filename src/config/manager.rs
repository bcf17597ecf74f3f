use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::ClientOptions;
use crate::paths;
use crate::upload::DEFAULT_CHUNK_SIZE;

/// Server used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:12101/api";

/// Default settings in the `[client]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the default server in `[servers]`.
    pub server: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Bytes per chunk when streaming audio.
    pub chunk_size: Option<usize>,
}

/// A named Rhasspy server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the HTTP API, including `/api`.
    pub api_url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/rhasspy-client/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub client: ClientConfig,
    /// Server configurations keyed by name.
    #[serde(default)]
    pub servers: HashMap<String, ServerConfig>,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The selected server name, if the URL came from `[servers]`.
    pub server_name: Option<String>,
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub chunk_size: usize,
}

impl ResolvedConfig {
    pub const fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout,
            chunk_size: self.chunk_size,
        }
    }
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub api_url: Option<String>,
    pub server: Option<String>,
    pub timeout_secs: Option<u64>,
    pub chunk_size: Option<usize>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// The API URL comes from `--api-url`, else the named server (`--server`,
/// then `[client].server`), else [`DEFAULT_API_URL`].
///
/// # Errors
///
/// Returns an error if the selected server is not configured or the chunk
/// size is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let (server_name, api_url) = if let Some(api_url) = &options.api_url {
        (None, api_url.clone())
    } else if let Some(name) = options.server.as_ref().or(config_file.client.server.as_ref()) {
        let server = config_file.servers.get(name).ok_or_else(|| {
            let mut available: Vec<_> = config_file.servers.keys().map(String::as_str).collect();
            available.sort_unstable();
            if available.is_empty() {
                anyhow::anyhow!(
                    "Server '{name}' not found\n\n\
                     No servers configured. Add one with:\n  \
                     rhasspy-client servers add <name> <api-url>"
                )
            } else {
                anyhow::anyhow!(
                    "Server '{name}' not found\n\n\
                     Available servers:\n  \
                     - {}",
                    available.join("\n  - ")
                )
            }
        })?;
        (Some(name.clone()), server.api_url.clone())
    } else {
        (None, DEFAULT_API_URL.to_string())
    };

    let chunk_size = options
        .chunk_size
        .or(config_file.client.chunk_size)
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    if chunk_size == 0 {
        bail!("Invalid configuration: 'chunk_size' must be greater than zero");
    }

    let timeout = options
        .timeout_secs
        .or(config_file.client.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ResolvedConfig {
        server_name,
        api_url,
        timeout,
        chunk_size,
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/rhasspy-client/config.toml`
    /// or `~/.config/rhasspy-client/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
