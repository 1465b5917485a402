#[cfg(feature = "cli")]
pub mod cli;
pub mod http;
pub mod local;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use http::HttpAssets;
pub use local::LocalAssets;
pub use toml_config::TomlConfig;

pub const DEFAULT_DOMAINS_FILE: &str = "domains.json";
pub const DEFAULT_SERVICES_FILE: &str = "services.json";
pub const DEFAULT_DIVISIONS_FILE: &str = "divisions.json";

/// Where the catalog's JSON assets come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Local { root: String },
    Http { base_url: String, timeout_seconds: u64 },
}
