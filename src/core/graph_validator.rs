//! Structural checks over data-flow graphs and the catalog lists.
//!
//! Problems are returned as data, never as `Err`: every check runs and all
//! findings are collected so a report can list them together.

use crate::domain::model::{Domain, DomainDataFlow, Service};
use crate::domain::ports::ServiceRegistry;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    UnknownService,
    UnknownDomain,
    DuplicateNode,
    EmptyAliases,
    DanglingEdgeSource,
    DanglingEdgeTarget,
    UnknownInitializationService,
    CycleDetected,
    DuplicateDomain,
    DuplicateService,
    DataUnavailable,
}

impl ValidationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCode::UnknownService => "UNKNOWN_SERVICE",
            ValidationCode::UnknownDomain => "UNKNOWN_DOMAIN",
            ValidationCode::DuplicateNode => "DUPLICATE_NODE",
            ValidationCode::EmptyAliases => "EMPTY_ALIASES",
            ValidationCode::DanglingEdgeSource => "DANGLING_EDGE_SOURCE",
            ValidationCode::DanglingEdgeTarget => "DANGLING_EDGE_TARGET",
            ValidationCode::UnknownInitializationService => "UNKNOWN_INITIALIZATION_SERVICE",
            ValidationCode::CycleDetected => "CYCLE_DETECTED",
            ValidationCode::DuplicateDomain => "DUPLICATE_DOMAIN",
            ValidationCode::DuplicateService => "DUPLICATE_SERVICE",
            ValidationCode::DataUnavailable => "DATA_UNAVAILABLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub code: ValidationCode,
    pub message: String,
    /// JSON path of the offending field, e.g. `edges[3].source`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub severity: Severity,
}

impl ValidationError {
    pub fn error(code: ValidationCode, message: impl Into<String>, path: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path,
            severity: Severity::Error,
        }
    }

    pub fn warning(code: ValidationCode, message: impl Into<String>, path: Option<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path,
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.path {
            Some(path) => write!(f, "{} [{}] {}: {}", level, self.code.as_str(), path, self.message),
            None => write!(f, "{} [{}] {}", level, self.code.as_str(), self.message),
        }
    }
}

pub fn has_errors(findings: &[ValidationError]) -> bool {
    findings.iter().any(ValidationError::is_error)
}

/// Runs every graph check against `data_flow`. An empty result means the graph is valid.
pub fn validate_data_flow<R>(data_flow: &DomainDataFlow, registry: &R) -> Vec<ValidationError>
where
    R: ServiceRegistry + ?Sized,
{
    let mut findings = Vec::new();

    if registry.contains_domain(&data_flow.domain) == Some(false) {
        findings.push(ValidationError::error(
            ValidationCode::UnknownDomain,
            format!("Data flow refers to unknown domain '{}'", data_flow.domain),
            Some("domain".to_string()),
        ));
    }

    let mut node_ids: HashSet<&str> = HashSet::with_capacity(data_flow.nodes.len());
    for (i, node) in data_flow.nodes.iter().enumerate() {
        if !node_ids.insert(node.id.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::DuplicateNode,
                format!("Node '{}' is declared more than once", node.id),
                Some(format!("nodes[{}].id", i)),
            ));
        }

        if !registry.contains_service(&node.id) {
            findings.push(ValidationError::error(
                ValidationCode::UnknownService,
                format!("Node '{}' does not match any known service", node.id),
                Some(format!("nodes[{}].id", i)),
            ));
        }

        if node.aliases.as_ref().is_some_and(|a| a.is_empty()) {
            findings.push(ValidationError::warning(
                ValidationCode::EmptyAliases,
                format!(
                    "Node '{}' declares an empty alias list; omit the field to use the domain name",
                    node.id
                ),
                Some(format!("nodes[{}].aliases", i)),
            ));
        }
    }

    for (i, edge) in data_flow.edges.iter().enumerate() {
        if !node_ids.contains(edge.source.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::DanglingEdgeSource,
                format!("Edge source '{}' is not a node in this flow", edge.source),
                Some(format!("edges[{}].source", i)),
            ));
        }
        if !node_ids.contains(edge.target.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::DanglingEdgeTarget,
                format!("Edge target '{}' is not a node in this flow", edge.target),
                Some(format!("edges[{}].target", i)),
            ));
        }
    }

    for (i, service) in data_flow.initialization.services.iter().enumerate() {
        if !node_ids.contains(service.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::UnknownInitializationService,
                format!("Initialization service '{}' is not a node in this flow", service),
                Some(format!("initialization.services[{}]", i)),
            ));
        }
    }

    for cycle in find_cycles(data_flow) {
        findings.push(ValidationError::error(
            ValidationCode::CycleDetected,
            format!("Data flow contains a cycle: {}", cycle.nodes.join(" -> ")),
            Some(format!("edges[{}]", cycle.closing_edge)),
        ));
    }

    tracing::debug!(
        "Validated data flow '{}': {} finding(s)",
        data_flow.domain,
        findings.len()
    );

    findings
}

/// A cycle as a closed walk (first node repeated at the end) plus the index
/// of the edge that closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub nodes: Vec<String>,
    pub closing_edge: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

struct FlowGraph<'a> {
    ids: Vec<&'a str>,
    // (target, edge index) in edge declaration order
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl<'a> FlowGraph<'a> {
    /// Vertices are the declared nodes followed by any id only edges mention,
    /// so cycles through dangling ids are still caught.
    fn build(data_flow: &'a DomainDataFlow) -> Self {
        let mut ids: Vec<&'a str> = Vec::new();
        let mut index: HashMap<&'a str, usize> = HashMap::new();

        let mut intern = |id: &'a str, ids: &mut Vec<&'a str>| -> usize {
            *index.entry(id).or_insert_with(|| {
                ids.push(id);
                ids.len() - 1
            })
        };

        for node in &data_flow.nodes {
            intern(&node.id, &mut ids);
        }

        let mut edges = Vec::with_capacity(data_flow.edges.len());
        for edge in &data_flow.edges {
            let source = intern(&edge.source, &mut ids);
            let target = intern(&edge.target, &mut ids);
            edges.push((source, target));
        }

        let mut adjacency = vec![Vec::new(); ids.len()];
        for (edge_index, (source, target)) in edges.into_iter().enumerate() {
            adjacency[source].push((target, edge_index));
        }

        Self { ids, adjacency }
    }

    /// Iterative DFS from `root`. Each frame is a vertex and the cursor of its
    /// next outgoing edge, so path depth never touches the call stack.
    fn visit(&self, root: usize, marks: &mut [Mark], cycles: &mut Vec<Cycle>) {
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::OnStack;

        while let Some(frame) = frames.last_mut() {
            let (vertex, cursor) = *frame;
            let Some(&(next, edge_index)) = self.adjacency[vertex].get(cursor) else {
                frames.pop();
                marks[vertex] = Mark::Done;
                continue;
            };
            frame.1 += 1;

            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::OnStack;
                    frames.push((next, 0));
                }
                Mark::OnStack => {
                    if let Some(start) = frames.iter().position(|&(v, _)| v == next) {
                        let mut nodes: Vec<String> = frames[start..]
                            .iter()
                            .map(|&(v, _)| self.ids[v].to_string())
                            .collect();
                        nodes.push(self.ids[next].to_string());
                        cycles.push(Cycle {
                            nodes,
                            closing_edge: edge_index,
                        });
                    }
                }
                Mark::Done => {}
            }
        }
    }
}

/// Depth-first search in declaration order; one cycle per back edge.
pub fn find_cycles(data_flow: &DomainDataFlow) -> Vec<Cycle> {
    let graph = FlowGraph::build(data_flow);
    let mut marks = vec![Mark::Unvisited; graph.ids.len()];
    let mut cycles = Vec::new();

    for vertex in 0..graph.ids.len() {
        if marks[vertex] == Mark::Unvisited {
            graph.visit(vertex, &mut marks, &mut cycles);
        }
    }

    cycles
}

pub fn is_acyclic(data_flow: &DomainDataFlow) -> bool {
    find_cycles(data_flow).is_empty()
}

/// Uniqueness of domain and service names across the catalog lists.
pub fn validate_catalog_entities(domains: &[Domain], services: &[Service]) -> Vec<ValidationError> {
    let mut findings = Vec::new();

    let mut seen = HashSet::new();
    for (i, domain) in domains.iter().enumerate() {
        if !seen.insert(domain.name.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::DuplicateDomain,
                format!("Domain '{}' is listed more than once", domain.name),
                Some(format!("domains[{}].name", i)),
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, service) in services.iter().enumerate() {
        if !seen.insert(service.name.as_str()) {
            findings.push(ValidationError::error(
                ValidationCode::DuplicateService,
                format!("Service '{}' is listed more than once", service.name),
                Some(format!("services[{}].name", i)),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DataFlowEdge, DataFlowNode, Initialization};

    fn registry(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn flow(nodes: &[&str], edges: &[(&str, &str)], init: &[&str]) -> DomainDataFlow {
        DomainDataFlow {
            domain: "Commercial Items".to_string(),
            nodes: nodes.iter().map(|id| DataFlowNode::new(*id, false)).collect(),
            edges: edges.iter().map(|(s, t)| DataFlowEdge::new(*s, *t)).collect(),
            initialization: Initialization {
                services: init.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn test_valid_flow_has_no_findings() {
        let data_flow = flow(
            &["JPharm", "OCR", "Search"],
            &[("JPharm", "OCR"), ("OCR", "Search"), ("JPharm", "Search")],
            &["JPharm"],
        );
        let findings = validate_data_flow(&data_flow, &registry(&["JPharm", "OCR", "Search"]));
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
    }

    #[test]
    fn test_dangling_edge_source_reports_path() {
        let data_flow = flow(&["JPharm"], &[("X", "JPharm")], &["JPharm"]);
        let findings = validate_data_flow(&data_flow, &registry(&["JPharm"]));

        assert!(!findings.is_empty());
        let dangling = findings
            .iter()
            .find(|f| f.code == ValidationCode::DanglingEdgeSource)
            .expect("dangling source finding");
        assert_eq!(dangling.path.as_deref(), Some("edges[0].source"));
        assert_eq!(dangling.severity, Severity::Error);
    }

    #[test]
    fn test_cycle_reported_even_when_services_unknown() {
        let data_flow = flow(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")], &["A"]);
        let findings = validate_data_flow(&data_flow, &registry(&[]));

        let unknown = findings
            .iter()
            .filter(|f| f.code == ValidationCode::UnknownService)
            .count();
        assert_eq!(unknown, 3);

        let cycle = findings
            .iter()
            .find(|f| f.code == ValidationCode::CycleDetected)
            .expect("cycle finding");
        assert!(cycle.is_error());
        assert!(cycle.message.contains("A -> B -> C -> A"));
        assert_eq!(cycle.path.as_deref(), Some("edges[2]"));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let data_flow = flow(&["A"], &[("A", "A")], &["A"]);
        let cycles = find_cycles(&data_flow);
        assert_eq!(
            cycles,
            vec![Cycle {
                nodes: vec!["A".to_string(), "A".to_string()],
                closing_edge: 0,
            }]
        );
    }

    #[test]
    fn test_cycle_through_dangling_ids() {
        let data_flow = flow(&["A"], &[("A", "X"), ("X", "A")], &["A"]);
        assert!(!is_acyclic(&data_flow));
    }

    #[test]
    fn test_diamond_is_acyclic() {
        let data_flow = flow(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
            &["A"],
        );
        assert!(is_acyclic(&data_flow));
    }

    #[test]
    fn test_long_chain_does_not_exhaust_stack() {
        let ids: Vec<String> = (0..100_000).map(|i| format!("S{}", i)).collect();
        let data_flow = DomainDataFlow {
            domain: "Dockets".to_string(),
            nodes: ids.iter().map(|id| DataFlowNode::new(id.as_str(), false)).collect(),
            edges: ids
                .windows(2)
                .map(|pair| DataFlowEdge::new(pair[0].as_str(), pair[1].as_str()))
                .collect(),
            initialization: Initialization {
                services: vec!["S0".to_string()],
            },
        };
        assert!(is_acyclic(&data_flow));

        let mut closed = data_flow.clone();
        closed.edges.push(DataFlowEdge::new("S99999", "S0"));
        let cycles = find_cycles(&closed);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].closing_edge, 99_999);
        assert_eq!(cycles[0].nodes.len(), 100_001);
        assert_eq!(cycles[0].nodes.first(), cycles[0].nodes.last());
    }

    #[test]
    fn test_all_checks_collected() {
        let mut data_flow = flow(&["A", "A"], &[("A", "Y")], &["Z"]);
        data_flow.nodes[0].aliases = Some(vec![]);
        let findings = validate_data_flow(&data_flow, &registry(&["A"]));

        let codes: Vec<ValidationCode> = findings.iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![
                ValidationCode::EmptyAliases,
                ValidationCode::DuplicateNode,
                ValidationCode::DanglingEdgeTarget,
                ValidationCode::UnknownInitializationService,
            ]
        );
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[3].path.as_deref(), Some("initialization.services[0]"));
        assert!(has_errors(&findings));
        assert!(!has_errors(&findings[..1]));
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let data_flow = flow(&["A", "B"], &[("A", "B"), ("B", "A")], &["A"]);
        let before = data_flow.clone();
        let first = validate_data_flow(&data_flow, &registry(&["A", "B"]));
        let second = validate_data_flow(&data_flow, &registry(&["A", "B"]));
        assert_eq!(data_flow, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_service_slice_registry() {
        let services = vec![Service {
            name: "A".to_string(),
            description: String::new(),
            division: String::new(),
            sub_division: None,
            content: true,
        }];
        let data_flow = flow(&["A", "B"], &[], &[]);
        let findings = validate_data_flow(&data_flow, services.as_slice());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path.as_deref(), Some("nodes[1].id"));
    }

    #[test]
    fn test_duplicate_catalog_names() {
        let domain = |name: &str| Domain {
            name: name.to_string(),
            division: String::new(),
            sub_division: String::new(),
            description: String::new(),
            data_flow_file: None,
        };
        let findings = validate_catalog_entities(&[domain("Patents"), domain("Patents")], &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, ValidationCode::DuplicateDomain);
        assert_eq!(findings[0].path.as_deref(), Some("domains[1].name"));
    }

    #[test]
    fn test_finding_display() {
        let finding = ValidationError::error(
            ValidationCode::DanglingEdgeSource,
            "Edge source 'X' is not a node in this flow",
            Some("edges[0].source".to_string()),
        );
        assert_eq!(
            finding.to_string(),
            "error [DANGLING_EDGE_SOURCE] edges[0].source: Edge source 'X' is not a node in this flow"
        );
    }
}
