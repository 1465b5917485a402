//! Alias derivation over a domain's data-flow graph.
//!
//! Every function here is total and side-effect free: missing aliases fall
//! back to the canonical domain name instead of failing.

use crate::domain::model::{DataFlowNode, DomainDataFlow, ServiceAlias, ServiceAliasLookup};

/// `true` iff the node declares a non-empty alias list.
pub fn has_aliases(node: &DataFlowNode) -> bool {
    node.aliases.as_ref().is_some_and(|a| !a.is_empty())
}

/// First alias, or the domain name.
pub fn primary_display_name<'a>(node: &'a DataFlowNode, domain_name: &'a str) -> &'a str {
    node.aliases
        .as_ref()
        .and_then(|a| a.first())
        .map(String::as_str)
        .unwrap_or(domain_name)
}

pub fn all_display_names(node: &DataFlowNode, domain_name: &str) -> Vec<String> {
    match &node.aliases {
        Some(aliases) if !aliases.is_empty() => aliases.clone(),
        _ => vec![domain_name.to_string()],
    }
}

/// An alias list that only repeats the domain name is redundant and not shown.
pub fn should_display_aliases(node: &DataFlowNode, domain_name: &str) -> bool {
    match &node.aliases {
        Some(aliases) => aliases.iter().any(|a| a != domain_name),
        None => false,
    }
}

pub fn format_domain_with_alias(domain_name: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) if !alias.is_empty() && alias != domain_name => {
            format!("{} (known as: {})", domain_name, alias)
        }
        _ => domain_name.to_string(),
    }
}

/// Keeps relative order; only entries equal to the domain name are dropped.
pub fn format_domain_with_aliases<S: AsRef<str>>(domain_name: &str, aliases: Option<&[S]>) -> String {
    let distinct: Vec<&str> = aliases
        .unwrap_or_default()
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|a| *a != domain_name)
        .collect();

    if distinct.is_empty() {
        return domain_name.to_string();
    }

    format!("{} (known as: {})", domain_name, distinct.join(", "))
}

/// One entry per (node, alias) pair whose alias differs from the flow's domain,
/// in node order then alias order.
pub fn extract_aliases(data_flow: &DomainDataFlow) -> Vec<ServiceAlias> {
    data_flow
        .nodes
        .iter()
        .flat_map(|node| {
            node.aliases
                .iter()
                .flatten()
                .filter(|alias| **alias != data_flow.domain)
                .map(|alias| ServiceAlias {
                    service_name: node.id.clone(),
                    alias: alias.clone(),
                    domain_name: data_flow.domain.clone(),
                })
        })
        .collect()
}

/// Raw alias list of `service_name`'s node. `None` covers both a missing node
/// and a node using the canonical name; see [`aliases_for_service`] to tell them apart.
pub fn raw_aliases_for_service<'a>(
    service_name: &str,
    data_flow: &'a DomainDataFlow,
) -> Option<&'a [String]> {
    data_flow
        .node(service_name)
        .and_then(|n| n.aliases.as_deref())
}

pub fn aliases_for_service(service_name: &str, data_flow: &DomainDataFlow) -> ServiceAliasLookup {
    match data_flow.node(service_name) {
        None => ServiceAliasLookup::NotFound,
        Some(node) if has_aliases(node) => {
            ServiceAliasLookup::HasAliases(node.aliases.clone().unwrap_or_default())
        }
        Some(_) => ServiceAliasLookup::UsesCanonicalName(data_flow.domain.clone()),
    }
}
