use serde::{Deserialize, Serialize};

/// A business data category tracked by the catalog. `name` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub division: String,
    #[serde(default, rename = "sub-division", alias = "subDivision")]
    pub sub_division: String,
    #[serde(default)]
    pub description: String,
    /// Path of the domain's data-flow document, relative to the asset root.
    #[serde(
        default,
        rename = "dataFlowFile",
        skip_serializing_if = "Option::is_none"
    )]
    pub data_flow_file: Option<String>,
}

/// A system that processes one or more domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub division: String,
    #[serde(default, rename = "sub-division", alias = "subDivision")]
    pub sub_division: Option<String>,
    /// `true` for content (producing) services, `false` for consumers.
    #[serde(default)]
    pub content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub division: String,
    #[serde(default, rename = "sub-divisions", alias = "subDivisions")]
    pub sub_divisions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowNode {
    /// Service name.
    pub id: String,
    #[serde(default)]
    pub modifies: bool,
    /// What this service calls the domain. `None` means the canonical name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl DataFlowNode {
    pub fn new(id: impl Into<String>, modifies: bool) -> Self {
        Self {
            id: id.into(),
            modifies,
            aliases: None,
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = Some(aliases.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowEdge {
    pub source: String,
    pub target: String,
}

impl DataFlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initialization {
    #[serde(default)]
    pub services: Vec<String>,
}

/// Processing graph of a single domain; the aggregate root of a data-flow document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDataFlow {
    pub domain: String,
    #[serde(default)]
    pub nodes: Vec<DataFlowNode>,
    #[serde(default)]
    pub edges: Vec<DataFlowEdge>,
    #[serde(default)]
    pub initialization: Initialization,
}

/// How a service participates in a domain's flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Initial,
    Modifier,
    Consumer,
}

impl DomainDataFlow {
    pub fn node(&self, id: &str) -> Option<&DataFlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_initialization_service(&self, id: &str) -> bool {
        self.initialization.services.iter().any(|s| s == id)
    }

    /// Initialization wins over `modifies`.
    pub fn node_role(&self, id: &str) -> Option<NodeRole> {
        let node = self.node(id)?;
        Some(if self.is_initialization_service(id) {
            NodeRole::Initial
        } else if node.modifies {
            NodeRole::Modifier
        } else {
            NodeRole::Consumer
        })
    }

    pub fn node_roles(&self) -> Vec<(&str, NodeRole)> {
        self.nodes
            .iter()
            .filter_map(|n| self.node_role(&n.id).map(|role| (n.id.as_str(), role)))
            .collect()
    }
}

/// One service's alias for a domain. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAlias {
    pub service_name: String,
    pub alias: String,
    pub domain_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainWithAliases {
    #[serde(flatten)]
    pub domain: Domain,
    pub aliases: Vec<ServiceAlias>,
}

/// A domain seen from one service: what that service calls it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainServiceAlias {
    pub domain_name: String,
    pub aliases: Vec<String>,
    pub modifies: bool,
    pub domain: Domain,
}

/// Result of looking up one service's aliases inside a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ServiceAliasLookup {
    NotFound,
    UsesCanonicalName(String),
    HasAliases(Vec<String>),
}

impl ServiceAliasLookup {
    /// Collapses to the legacy optional shape: absent node and canonical name both become `None`.
    pub fn into_aliases(self) -> Option<Vec<String>> {
        match self {
            ServiceAliasLookup::HasAliases(aliases) => Some(aliases),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDomain {
    pub name: String,
    pub description: String,
    pub data_updated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedService {
    pub name: String,
    pub description: String,
    pub domains: Vec<ServiceDomain>,
}
