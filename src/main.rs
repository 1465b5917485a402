use clap::Parser;
use domain_catalog::core::graph_validator::has_errors;
use domain_catalog::utils::error::ErrorSeverity;
use domain_catalog::utils::{logger, validation::Validate};
use domain_catalog::{
    format_domain_with_aliases, AssetLoader, AssetSource, Catalog, CliConfig, Command,
    ConfigProvider, DomainAliasService, DomainFilter, HttpAssets, LocalAssets, ServiceFilter,
    ServiceViewService, TomlConfig, ValidationError,
};
use serde::Serialize;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let toml_config = match &config.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(toml_config) => Some(toml_config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(4);
            }
        },
        None => None,
    };

    // 初始化日誌
    let log_level = if config.verbose {
        "debug"
    } else {
        toml_config
            .as_ref()
            .and_then(|c| c.log_level())
            .unwrap_or("warn")
    };
    if config.json {
        logger::init_json_logger(log_level);
    } else {
        logger::init_cli_logger(log_level);
    }

    tracing::info!("Starting domain-catalog CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    let validation = match &toml_config {
        Some(toml_config) => toml_config.validate(),
        None => config.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(4);
    }

    let provider: &dyn ConfigProvider = match &toml_config {
        Some(toml_config) => toml_config,
        None => &config,
    };
    let source = match &toml_config {
        Some(toml_config) => toml_config.asset_source(),
        None => Ok(config.asset_source()),
    };

    let outcome = match source {
        Ok(AssetSource::Local { root }) => {
            let assets = LocalAssets::new(root);
            tracing::debug!("📂 Asset root: {}", assets.base_path().display());
            run(assets, provider, &config).await
        }
        Ok(AssetSource::Http {
            base_url,
            timeout_seconds,
        }) => match HttpAssets::with_timeout(&base_url, Duration::from_secs(timeout_seconds)) {
            Ok(assets) => run(assets, provider, &config).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match outcome {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Catalog query failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 1,      // 查無資料
                ErrorSeverity::Medium => 2,   // 網路錯誤
                ErrorSeverity::High => 3,     // 資料錯誤
                ErrorSeverity::Critical => 4, // 配置錯誤
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> domain_catalog::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_findings(findings: &[ValidationError]) {
    for finding in findings {
        println!("  {}", finding);
    }
}

/// Returns the process exit code: 0 on success, 1 when validation found errors.
async fn run<L: AssetLoader>(
    assets: L,
    provider: &dyn ConfigProvider,
    config: &CliConfig,
) -> domain_catalog::Result<i32> {
    let catalog = Catalog::load(assets, provider).await?;

    match &config.command {
        Command::Domains { filter } => {
            let filter = DomainFilter::new(filter.clone().unwrap_or_default());
            let domains = catalog.filter_domains(&filter);
            if config.json {
                print_json(&domains)?;
            } else {
                for domain in domains {
                    println!("{}  [{} / {}]", domain.name, domain.division, domain.sub_division);
                }
            }
        }
        Command::Domain { name } => {
            let view = catalog.get_domain_with_aliases(name).await?;
            if config.json {
                print_json(&view)?;
            } else {
                println!("{}", view.domain.name);
                println!("  Division: {} / {}", view.domain.division, view.domain.sub_division);
                if !view.domain.description.is_empty() {
                    println!("  {}", view.domain.description);
                }
                if view.aliases.is_empty() {
                    println!("  No service-specific aliases");
                } else {
                    println!("  Aliases:");
                    for alias in &view.aliases {
                        println!("    {}: {}", alias.service_name, alias.alias);
                    }
                }
            }
        }
        Command::Services {
            filter,
            division,
            sub_division,
        } => {
            if let (Some(division), Some(sub_division)) = (division, sub_division) {
                let known = catalog.sub_divisions_for(division);
                if !known.is_empty() && !known.contains(sub_division) {
                    tracing::warn!(
                        "⚠️ '{}' is not a sub-division of '{}' (known: {})",
                        sub_division,
                        division,
                        known.join(", ")
                    );
                }
            }

            let filter = ServiceFilter {
                text: filter.clone().unwrap_or_default(),
                division: division.clone(),
                sub_division: sub_division.clone(),
            };
            let services = catalog.filter_services(&filter);
            if config.json {
                print_json(&services)?;
            } else {
                for service in services {
                    let kind = if service.content { "content" } else { "consumer" };
                    println!("{}  [{}] {}", service.name, kind, service.division);
                }
            }
        }
        Command::Service { name } => {
            let selected = catalog.select_service(name).await?;
            if config.json {
                print_json(&selected)?;
            } else {
                println!("{}", selected.name);
                if !selected.description.is_empty() {
                    println!("  {}", selected.description);
                }
                for domain in &selected.domains {
                    let marker = if domain.data_updated { " (updates data)" } else { "" };
                    println!(
                        "  - {}{}",
                        format_domain_with_aliases(&domain.name, Some(domain.aliases.as_slice())),
                        marker
                    );
                }
            }
        }
        Command::Flow { domain } => {
            let flow = catalog.get_data_flow(domain).await?;
            if config.json {
                print_json(&flow)?;
            } else {
                println!("{}", flow.domain);
                for (id, role) in flow.node_roles() {
                    let display = flow
                        .node(id)
                        .map(|n| domain_catalog::primary_display_name(n, &flow.domain))
                        .unwrap_or(&flow.domain);
                    println!("  {} [{:?}] as \"{}\"", id, role, display);
                }
                for edge in &flow.edges {
                    println!("  {} -> {}", edge.source, edge.target);
                }
            }
        }
        Command::Validate { domain: Some(name) } => {
            let findings = catalog.validate_domain(name).await?;
            if config.json {
                print_json(&findings)?;
            } else if findings.is_empty() {
                println!("✅ {} is valid", name);
            } else {
                println!("{}:", name);
                print_findings(&findings);
            }
            if has_errors(&findings) {
                return Ok(1);
            }
        }
        Command::Validate { domain: None } => {
            let catalog_findings = catalog.validate_catalog();
            let reports = catalog.validate_all().await;
            let failed = has_errors(&catalog_findings) || reports.iter().any(|r| !r.is_valid());

            if config.json {
                #[derive(Serialize)]
                struct Summary<'a> {
                    catalog: &'a [ValidationError],
                    domains: &'a [domain_catalog::DomainValidationReport],
                }
                print_json(&Summary {
                    catalog: &catalog_findings,
                    domains: &reports,
                })?;
            } else {
                if !catalog_findings.is_empty() {
                    println!("catalog:");
                    print_findings(&catalog_findings);
                }
                for report in &reports {
                    if report.findings.is_empty() {
                        println!("✅ {}", report.domain);
                    } else {
                        println!("{} {}:", if report.is_valid() { "⚠️" } else { "❌" }, report.domain);
                        print_findings(&report.findings);
                    }
                }
            }

            if failed {
                return Ok(1);
            }
        }
    }

    Ok(0)
}
