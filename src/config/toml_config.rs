use crate::config::http::DEFAULT_TIMEOUT_SECONDS;
use crate::config::{AssetSource, DEFAULT_DIVISIONS_FILE, DEFAULT_DOMAINS_FILE, DEFAULT_SERVICES_FILE};
use crate::core::catalog::DEFAULT_CONCURRENT_LOADS;
use crate::core::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_json_file, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: Option<CatalogSection>,
    pub source: SourceConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "local" or "http"
    pub r#type: String,
    pub asset_root: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    #[serde(default = "default_concurrent_loads")]
    pub concurrent_loads: usize,
    #[serde(default = "default_domains_file")]
    pub domains_file: String,
    #[serde(default = "default_services_file")]
    pub services_file: String,
    #[serde(default = "default_divisions_file")]
    pub divisions_file: String,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            concurrent_loads: default_concurrent_loads(),
            domains_file: default_domains_file(),
            services_file: default_services_file(),
            divisions_file: default_divisions_file(),
        }
    }
}

fn default_concurrent_loads() -> usize {
    DEFAULT_CONCURRENT_LOADS
}

fn default_domains_file() -> String {
    DEFAULT_DOMAINS_FILE.to_string()
}

fn default_services_file() -> String {
    DEFAULT_SERVICES_FILE.to_string()
}

fn default_divisions_file() -> String {
    DEFAULT_DIVISIONS_FILE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ASSET_HOST})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validate_non_empty_string("catalog.name", &catalog.name)?;
        }

        match self.source.r#type.as_str() {
            "local" => {
                let root = validate_required_field("source.asset_root", &self.source.asset_root)?;
                validate_path("source.asset_root", root)?;
            }
            "http" => {
                let base_url = validate_required_field("source.base_url", &self.source.base_url)?;
                validate_url("source.base_url", base_url)?;
            }
            other => {
                return Err(CatalogError::invalid_value(
                    "source.type",
                    other,
                    "Unsupported source type. Valid types: local, http",
                ));
            }
        }

        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(level) = self.log_level() {
            if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
                return Err(CatalogError::invalid_value(
                    "monitoring.log_level",
                    level,
                    "Valid levels: trace, debug, info, warn, error",
                ));
            }
        }

        validate_positive_number("loading.concurrent_loads", self.loading.concurrent_loads, 1)?;
        validate_json_file("loading.domains_file", &self.loading.domains_file)?;
        validate_json_file("loading.services_file", &self.loading.services_file)?;
        validate_json_file("loading.divisions_file", &self.loading.divisions_file)?;

        Ok(())
    }

    pub fn asset_source(&self) -> Result<AssetSource> {
        match self.source.r#type.as_str() {
            "http" => Ok(AssetSource::Http {
                base_url: validate_required_field("source.base_url", &self.source.base_url)?
                    .clone(),
                timeout_seconds: self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            }),
            _ => Ok(AssetSource::Local {
                root: validate_required_field("source.asset_root", &self.source.asset_root)?
                    .clone(),
            }),
        }
    }

    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.name.as_str())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn domains_file(&self) -> &str {
        &self.loading.domains_file
    }

    fn services_file(&self) -> &str {
        &self.loading.services_file
    }

    fn divisions_file(&self) -> &str {
        &self.loading.divisions_file
    }

    fn concurrent_loads(&self) -> usize {
        self.loading.concurrent_loads
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
