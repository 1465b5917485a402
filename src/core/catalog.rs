use crate::core::aliases::{aliases_for_service, extract_aliases, primary_display_name};
use crate::core::filter::{DomainFilter, ServiceFilter};
use crate::core::graph_validator::{
    has_errors, validate_catalog_entities, validate_data_flow, ValidationCode, ValidationError,
};
use crate::domain::model::{
    Division, Domain, DomainDataFlow, DomainServiceAlias, DomainWithAliases, SelectedService,
    Service, ServiceAlias, ServiceAliasLookup, ServiceDomain,
};
use crate::domain::ports::{
    AssetLoader, ConfigProvider, DomainAliasService, ServiceRegistry, ServiceViewService,
};
use crate::utils::error::{CatalogError, EntityKind, Result};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;

pub const DEFAULT_CONCURRENT_LOADS: usize = 5;

/// Validation findings for one domain's data flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainValidationReport {
    pub domain: String,
    pub findings: Vec<ValidationError>,
}

impl DomainValidationReport {
    pub fn is_valid(&self) -> bool {
        !has_errors(&self.findings)
    }
}

/// Read-only catalog of domains, services and divisions.
///
/// Lists are loaded once; data-flow documents are fetched through the
/// loader on every query and derived views are rebuilt each time.
pub struct Catalog<L: AssetLoader> {
    loader: L,
    domains: Vec<Domain>,
    services: Vec<Service>,
    divisions: Vec<Division>,
    concurrent_loads: usize,
}

impl<L: AssetLoader> Catalog<L> {
    pub async fn load<C: ConfigProvider + ?Sized>(loader: L, config: &C) -> Result<Self> {
        let domains: Vec<Domain> = loader.load_json(config.domains_file()).await?;
        let services: Vec<Service> = loader.load_json(config.services_file()).await?;

        // divisions 只用於篩選，載入失敗時以空清單繼續
        let divisions: Vec<Division> = match loader.load_json(config.divisions_file()).await {
            Ok(divisions) => divisions,
            Err(e) => {
                tracing::warn!("⚠️ Divisions unavailable, continuing without facets: {}", e);
                Vec::new()
            }
        };

        tracing::info!(
            "📚 Catalog loaded: {} domains, {} services, {} divisions",
            domains.len(),
            services.len(),
            divisions.len()
        );

        Ok(Self::from_parts(loader, domains, services, divisions)
            .with_concurrent_loads(config.concurrent_loads()))
    }

    pub fn from_parts(
        loader: L,
        domains: Vec<Domain>,
        services: Vec<Service>,
        divisions: Vec<Division>,
    ) -> Self {
        Self {
            loader,
            domains,
            services,
            divisions,
            concurrent_loads: DEFAULT_CONCURRENT_LOADS,
        }
    }

    pub fn with_concurrent_loads(mut self, concurrent_loads: usize) -> Self {
        self.concurrent_loads = concurrent_loads.max(1);
        self
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn get_all_services(&self) -> &[Service] {
        &self.services
    }

    pub fn get_divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn find_domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }

    fn require_domain(&self, name: &str) -> Result<&Domain> {
        self.find_domain(name)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Domain, name))
    }

    pub fn get_service(&self, name: &str) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Service, name))
    }

    /// Empty when the division is unknown.
    pub fn sub_divisions_for(&self, division: &str) -> &[String] {
        self.divisions
            .iter()
            .find(|d| d.division == division)
            .map(|d| d.sub_divisions.as_slice())
            .unwrap_or(&[])
    }

    pub fn filter_domains(&self, filter: &DomainFilter) -> Vec<&Domain> {
        filter.apply(&self.domains)
    }

    pub fn filter_services(&self, filter: &ServiceFilter) -> Vec<&Service> {
        filter.apply(&self.services)
    }

    async fn load_flow_file(&self, file: &str) -> Result<DomainDataFlow> {
        self.loader.load_json(file).await
    }

    /// `Ok(None)` when the domain has no data-flow file.
    async fn load_domain_flow(&self, domain: &Domain) -> Result<Option<DomainDataFlow>> {
        let Some(file) = domain.data_flow_file.as_deref() else {
            return Ok(None);
        };

        let flow = self.load_flow_file(file).await?;
        if flow.domain != domain.name {
            tracing::warn!(
                "Data flow '{}' declares domain '{}' but is referenced by '{}'",
                file,
                flow.domain,
                domain.name
            );
        }
        Ok(Some(flow))
    }

    async fn require_domain_flow(&self, domain: &Domain) -> Result<DomainDataFlow> {
        self.load_domain_flow(domain).await?.ok_or_else(|| {
            CatalogError::data_unavailable(domain.name.as_str(), "domain has no data flow file")
        })
    }

    pub async fn get_service_display_name(
        &self,
        service_name: &str,
        domain_name: &str,
    ) -> Result<String> {
        let domain = self.require_domain(domain_name)?;
        let flow = self.require_domain_flow(domain).await?;
        let node = flow
            .node(service_name)
            .ok_or_else(|| CatalogError::not_found(EntityKind::DataFlowNode, service_name))?;
        Ok(primary_display_name(node, &flow.domain).to_string())
    }

    pub fn validate_catalog(&self) -> Vec<ValidationError> {
        validate_catalog_entities(&self.domains, &self.services)
    }

    pub async fn validate_domain(&self, name: &str) -> Result<Vec<ValidationError>> {
        let domain = self.require_domain(name)?;
        let flow = self.require_domain_flow(domain).await?;
        Ok(validate_data_flow(&flow, self))
    }

    /// Loads the flows of `domains` at most `concurrent_loads` at a time.
    /// Results line up with the input regardless of completion order.
    async fn load_flows<'a>(
        &'a self,
        domains: &[&'a Domain],
    ) -> Vec<(&'a Domain, Result<Option<DomainDataFlow>>)> {
        let mut results = Vec::with_capacity(domains.len());
        for chunk in domains.chunks(self.concurrent_loads) {
            let flows = join_all(chunk.iter().map(|domain| self.load_domain_flow(domain))).await;
            results.extend(chunk.iter().copied().zip(flows));
        }
        results
    }

    fn domains_with_flows(&self) -> Vec<&Domain> {
        self.domains
            .iter()
            .filter(|d| d.data_flow_file.is_some())
            .collect()
    }

    /// One report per domain with a data-flow file, in catalog order.
    /// A flow that cannot be loaded is reported as a `DATA_UNAVAILABLE` finding.
    pub async fn validate_all(&self) -> Vec<DomainValidationReport> {
        let candidates = self.domains_with_flows();

        self.load_flows(&candidates)
            .await
            .into_iter()
            .map(|(domain, outcome)| {
                let findings = match outcome {
                    Ok(Some(flow)) => validate_data_flow(&flow, self),
                    Ok(None) => Vec::new(),
                    Err(e) => vec![ValidationError::error(
                        ValidationCode::DataUnavailable,
                        e.to_string(),
                        Some("dataFlowFile".to_string()),
                    )],
                };
                DomainValidationReport {
                    domain: domain.name.clone(),
                    findings,
                }
            })
            .collect()
    }
}

impl<L: AssetLoader> ServiceRegistry for Catalog<L> {
    fn contains_service(&self, name: &str) -> bool {
        self.services.iter().any(|s| s.name == name)
    }

    fn contains_domain(&self, name: &str) -> Option<bool> {
        Some(self.find_domain(name).is_some())
    }
}

#[async_trait]
impl<L: AssetLoader> DomainAliasService for Catalog<L> {
    async fn get_domain(&self, name: &str) -> Result<Domain> {
        self.require_domain(name).cloned()
    }

    async fn get_all_domains(&self) -> Result<Vec<Domain>> {
        Ok(self.domains.clone())
    }

    async fn get_domain_with_aliases(&self, name: &str) -> Result<DomainWithAliases> {
        let domain = self.require_domain(name)?;
        let aliases = match self.load_domain_flow(domain).await? {
            Some(flow) => extract_aliases(&flow),
            None => Vec::new(),
        };

        Ok(DomainWithAliases {
            domain: domain.clone(),
            aliases,
        })
    }

    async fn get_aliases_for_domain(&self, domain_name: &str) -> Result<Vec<ServiceAlias>> {
        let domain = self.require_domain(domain_name)?;
        Ok(self
            .load_domain_flow(domain)
            .await?
            .map(|flow| extract_aliases(&flow))
            .unwrap_or_default())
    }

    async fn get_data_flow(&self, domain_name: &str) -> Result<DomainDataFlow> {
        let domain = self.require_domain(domain_name)?;
        self.require_domain_flow(domain).await
    }

    async fn get_service_aliases(
        &self,
        service_name: &str,
        domain_name: &str,
    ) -> Result<ServiceAliasLookup> {
        let flow = self.get_data_flow(domain_name).await?;
        Ok(aliases_for_service(service_name, &flow))
    }
}

#[async_trait]
impl<L: AssetLoader> ServiceViewService for Catalog<L> {
    async fn get_domains_for_service(&self, service_name: &str) -> Result<Vec<DomainServiceAlias>> {
        let candidates = self.domains_with_flows();
        let mut matches = Vec::new();

        for (domain, outcome) in self.load_flows(&candidates).await {
            match outcome {
                Ok(Some(flow)) => {
                    if let Some(node) = flow.node(service_name) {
                        matches.push(DomainServiceAlias {
                            domain_name: domain.name.clone(),
                            aliases: node.aliases.clone().unwrap_or_default(),
                            modifies: node.modifies,
                            domain: domain.clone(),
                        });
                    }
                }
                Ok(None) => {}
                // 單一網域載入失敗不影響其他網域
                Err(e) => tracing::warn!(
                    "⚠️ Skipping domain '{}' while scanning for '{}': {}",
                    domain.name,
                    service_name,
                    e
                ),
            }
        }

        Ok(matches)
    }

    async fn select_service(&self, service_name: &str) -> Result<SelectedService> {
        let service = self.get_service(service_name)?;
        let domains = self
            .get_domains_for_service(service_name)
            .await?
            .into_iter()
            .map(|entry| ServiceDomain {
                name: entry.domain_name,
                description: entry.domain.description,
                data_updated: entry.modifies,
                aliases: entry.aliases,
            })
            .collect();

        Ok(SelectedService {
            name: service.name.clone(),
            description: service.description.clone(),
            domains,
        })
    }
}
