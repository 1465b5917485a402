use crate::config::{AssetSource, DEFAULT_DIVISIONS_FILE, DEFAULT_DOMAINS_FILE, DEFAULT_SERVICES_FILE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_json_file, validate_path, validate_positive_number, validate_url, Validate,
};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "domain-catalog")]
#[command(about = "Browse catalog domains, the services that process them, and their aliases")]
pub struct CliConfig {
    /// Directory holding domains.json, services.json, divisions.json and data-flow files
    #[arg(long, default_value = "./assets")]
    pub assets: String,

    /// Fetch assets over HTTP from this base URL instead of the local directory
    #[arg(long)]
    pub base_url: Option<String>,

    /// TOML configuration file; replaces the source and loading flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "5")]
    pub concurrent_loads: usize,

    #[arg(long, default_value = DEFAULT_DOMAINS_FILE)]
    pub domains_file: String,

    #[arg(long, default_value = DEFAULT_SERVICES_FILE)]
    pub services_file: String,

    #[arg(long, default_value = DEFAULT_DIVISIONS_FILE)]
    pub divisions_file: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List domains
    Domains {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show a domain with every service alias for it
    Domain { name: String },
    /// List services
    Services {
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        division: Option<String>,
        #[arg(long)]
        sub_division: Option<String>,
    },
    /// Show the domains a service processes and what it calls them
    Service { name: String },
    /// Print a domain's data-flow graph
    Flow { domain: String },
    /// Validate one domain's data flow, or every flow in the catalog
    Validate { domain: Option<String> },
}

impl CliConfig {
    pub fn asset_source(&self) -> AssetSource {
        match &self.base_url {
            Some(base_url) => AssetSource::Http {
                base_url: base_url.clone(),
                timeout_seconds: crate::config::http::DEFAULT_TIMEOUT_SECONDS,
            },
            None => AssetSource::Local {
                root: self.assets.clone(),
            },
        }
    }
}

impl ConfigProvider for CliConfig {
    fn domains_file(&self) -> &str {
        &self.domains_file
    }

    fn services_file(&self) -> &str {
        &self.services_file
    }

    fn divisions_file(&self) -> &str {
        &self.divisions_file
    }

    fn concurrent_loads(&self) -> usize {
        self.concurrent_loads
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.base_url {
            Some(base_url) => validate_url("base_url", base_url)?,
            None => validate_path("assets", &self.assets)?,
        }

        validate_positive_number("concurrent_loads", self.concurrent_loads, 1)?;
        validate_json_file("domains_file", &self.domains_file)?;
        validate_json_file("services_file", &self.services_file)?;
        validate_json_file("divisions_file", &self.divisions_file)?;

        Ok(())
    }
}
