use crate::domain::model::{
    Domain, DomainDataFlow, DomainServiceAlias, DomainWithAliases, SelectedService, Service,
    ServiceAlias, ServiceAliasLookup,
};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Read-only access to the catalog's JSON assets.
pub trait AssetLoader: Send + Sync {
    fn load(&self, path: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Human-readable location of `path`, used in diagnostics.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }

    /// Loads and parses a JSON asset. Any failure becomes `DataUnavailable`
    /// naming the described location.
    fn load_json<T>(&self, path: &str) -> impl Future<Output = Result<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move {
            let location = self.describe(path);
            tracing::debug!("Loading {}", location);
            let bytes = self
                .load(path)
                .await
                .map_err(|e| e.into_data_unavailable(&location))?;
            serde_json::from_slice(&bytes).map_err(|e| CatalogError::data_unavailable(location, e))
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn domains_file(&self) -> &str;
    fn services_file(&self) -> &str;
    fn divisions_file(&self) -> &str;
    fn concurrent_loads(&self) -> usize;
}

/// The set of service names a data flow may reference.
pub trait ServiceRegistry {
    fn contains_service(&self, name: &str) -> bool;

    /// `None` when the registry does not track domains.
    fn contains_domain(&self, _name: &str) -> Option<bool> {
        None
    }
}

impl ServiceRegistry for std::collections::HashSet<String> {
    fn contains_service(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl ServiceRegistry for [Service] {
    fn contains_service(&self, name: &str) -> bool {
        self.iter().any(|s| s.name == name)
    }
}

/// Domain-centric read views.
#[async_trait]
pub trait DomainAliasService: Send + Sync {
    async fn get_domain(&self, name: &str) -> Result<Domain>;
    async fn get_all_domains(&self) -> Result<Vec<Domain>>;
    async fn get_domain_with_aliases(&self, name: &str) -> Result<DomainWithAliases>;
    async fn get_aliases_for_domain(&self, domain_name: &str) -> Result<Vec<ServiceAlias>>;
    async fn get_data_flow(&self, domain_name: &str) -> Result<DomainDataFlow>;
    async fn get_service_aliases(
        &self,
        service_name: &str,
        domain_name: &str,
    ) -> Result<ServiceAliasLookup>;
}

/// Service-centric read views.
#[async_trait]
pub trait ServiceViewService: Send + Sync {
    async fn get_domains_for_service(&self, service_name: &str) -> Result<Vec<DomainServiceAlias>>;
    async fn select_service(&self, service_name: &str) -> Result<SelectedService>;
}
