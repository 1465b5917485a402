pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::{AssetSource, HttpAssets, LocalAssets, TomlConfig};

pub use crate::core::aliases::{
    aliases_for_service, all_display_names, extract_aliases, format_domain_with_alias,
    format_domain_with_aliases, has_aliases, primary_display_name, raw_aliases_for_service,
    should_display_aliases,
};
pub use crate::core::catalog::{Catalog, DomainValidationReport};
pub use crate::core::filter::{DomainFilter, ServiceFilter};
pub use crate::core::graph_validator::{
    find_cycles, has_errors, validate_catalog_entities, validate_data_flow, Severity,
    ValidationCode, ValidationError,
};
pub use crate::core::{
    AssetLoader, ConfigProvider, DomainAliasService, ServiceRegistry, ServiceViewService,
};
pub use crate::domain::model::*;
pub use crate::utils::error::{CatalogError, Result};
