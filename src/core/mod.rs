pub mod aliases;
pub mod catalog;
pub mod filter;
pub mod graph_validator;

pub use crate::domain::model::{
    DataFlowEdge, DataFlowNode, Division, Domain, DomainDataFlow, DomainServiceAlias,
    DomainWithAliases, Initialization, NodeRole, SelectedService, Service, ServiceAlias,
    ServiceAliasLookup, ServiceDomain,
};
pub use crate::domain::ports::{
    AssetLoader, ConfigProvider, DomainAliasService, ServiceRegistry, ServiceViewService,
};
pub use crate::utils::error::Result;
