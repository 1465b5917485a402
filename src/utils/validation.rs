use crate::utils::error::{CatalogError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Only absolute `http(s)` URLs can serve assets.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CatalogError::invalid_value(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str).map_err(|e| {
        CatalogError::invalid_value(field_name, url_str, format!("Invalid URL format: {}", e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CatalogError::invalid_value(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    let reason = if path.is_empty() {
        "Path cannot be empty"
    } else if path.contains('\0') {
        "Path contains null bytes"
    } else {
        return Ok(());
    };
    Err(CatalogError::invalid_value(field_name, path, reason))
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CatalogError::invalid_value(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

/// 資料檔必須為 .json
pub fn validate_json_file(field_name: &str, file: &str) -> Result<()> {
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(()),
        Some(other) => Err(CatalogError::invalid_value(
            field_name,
            file,
            format!("Expected a .json file, got .{}", other),
        )),
        None => Err(CatalogError::invalid_value(
            field_name,
            file,
            "Expected a .json file name",
        )),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CatalogError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_value(field_name, value, "Value cannot be blank"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CatalogError::invalid_value(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.base_url", "https://catalog.example.com/assets").is_ok());
        assert!(validate_url("source.base_url", "http://localhost:4200").is_ok());
        assert!(validate_url("source.base_url", "").is_err());
        assert!(validate_url("source.base_url", "assets").is_err());
        assert!(validate_url("source.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("loading.concurrent_loads", 4, 1).is_ok());
        assert!(validate_positive_number("loading.concurrent_loads", 0, 1).is_err());
    }

    #[test]
    fn test_validate_json_file() {
        assert!(validate_json_file("loading.domains_file", "domains.json").is_ok());
        assert!(validate_json_file("loading.domains_file", "flows/patents.json").is_ok());
        assert!(validate_json_file("loading.domains_file", "domains.yaml").is_err());
        assert!(validate_json_file("loading.domains_file", "domains").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("source.base_url", &missing),
            Err(CatalogError::MissingConfigError { .. })
        ));
        let present = Some("http://localhost".to_string());
        assert_eq!(
            validate_required_field("source.base_url", &present).unwrap(),
            "http://localhost"
        );
    }

    #[test]
    fn test_validate_path_and_blank_strings() {
        assert!(validate_path("source.asset_root", "./assets").is_ok());
        assert!(validate_path("source.asset_root", "").is_err());
        assert!(validate_path("source.asset_root", "bad\0path").is_err());
        assert!(validate_non_empty_string("catalog.name", "Editorial").is_ok());
        assert!(validate_non_empty_string("catalog.name", " \t").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("source.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("source.timeout_seconds", 301u64, 1, 300).is_err());
    }
}
