//! Configuration file management and server selection.

mod manager;

pub use manager::{
    ClientConfig, ConfigFile, ConfigManager, DEFAULT_API_URL, ResolveOptions, ResolvedConfig,
    ServerConfig, resolve_config,
};
