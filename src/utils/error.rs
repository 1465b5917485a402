use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("Data unavailable for '{resource}': {reason}")]
    DataUnavailable { resource: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Domain,
    Service,
    DataFlowNode,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Domain => write!(f, "Domain"),
            EntityKind::Service => write!(f, "Service"),
            EntityKind::DataFlowNode => write!(f, "Data flow node"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Data,
    Network,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn data_unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        CatalogError::DataUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        CatalogError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 將載入層的錯誤統一轉為 DataUnavailable，保留資源名稱
    pub fn into_data_unavailable(self, resource: &str) -> Self {
        match self {
            CatalogError::NotFound { .. } | CatalogError::DataUnavailable { .. } => self,
            other => CatalogError::data_unavailable(resource, other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::NotFound { .. } => ErrorCategory::Lookup,
            CatalogError::DataUnavailable { .. }
            | CatalogError::Io(_)
            | CatalogError::Serialization(_) => ErrorCategory::Data,
            CatalogError::Http(_) => ErrorCategory::Network,
            CatalogError::ConfigError { .. }
            | CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::NotFound { kind, name } => {
                format!("No {} named '{}' exists in the catalog", kind.to_string().to_lowercase(), name)
            }
            CatalogError::DataUnavailable { resource, .. } => {
                format!("Could not load catalog data from '{}'", resource)
            }
            CatalogError::Http(_) => "Could not reach the asset server".to_string(),
            CatalogError::Io(_) => "Could not read a catalog file".to_string(),
            CatalogError::Serialization(_) => "A catalog file contains malformed JSON".to_string(),
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Check the spelling; names are case-sensitive",
            ErrorCategory::Data => "Verify the asset root and that the referenced JSON file exists and is valid",
            ErrorCategory::Network => "Check the base URL and that the asset server is reachable",
            ErrorCategory::Configuration => "Review the command-line flags or TOML configuration file",
        }
    }
}
