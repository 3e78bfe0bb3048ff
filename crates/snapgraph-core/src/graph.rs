//! ReferenceGraph: the directed graph view over a closed node set.
//!
//! Each node becomes one vertex and each connection whose target is present
//! becomes one `references` edge. Vertex ids follow node-set order, so the
//! same snapshot always yields the same ids.
//!
//! The graph is what renderers consume. It never computes layout; it only
//! answers identity, adjacency and grouping questions.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::class::EntityClass;
use crate::error::CoreError;
use crate::id::NodeId;
use crate::node::{Node, NodeOrder, NodeSet};

/// Edge weight. Snapshots only know one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    References,
}

/// Which nodes a filtered view keeps. `None` means "no restriction".
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    pub classes: Option<HashSet<EntityClass>>,
    pub programs: Option<HashSet<String>>,
    pub primary_only: bool,
}

impl NodeFilter {
    pub fn matches(&self, node: &Node) -> bool {
        if self.primary_only && node.order != NodeOrder::Primary {
            return false;
        }
        if let Some(classes) = &self.classes {
            if !classes.contains(&node.class) {
                return false;
            }
        }
        if let Some(programs) = &self.programs {
            if !programs.contains(&node.program) {
                return false;
            }
        }
        true
    }
}

/// Vertex record in a [`GraphExport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: NodeId,
    pub name: String,
    pub display_name: String,
    pub class: EntityClass,
    pub program: String,
    pub order: NodeOrder,
    pub query: bool,
}

/// Edge record in a [`GraphExport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// Flat, serializable node/edge lists for external renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

/// Directed reference graph over one snapshot's nodes.
#[derive(Debug, Clone)]
pub struct ReferenceGraph {
    graph: DiGraph<Node, EdgeKind, u32>,
    index: HashMap<String, NodeIndex<u32>>,
}

impl ReferenceGraph {
    /// Builds the graph from a node set. Connections to names outside the
    /// set produce no edge.
    pub fn from_nodes(nodes: NodeSet) -> Self {
        let mut graph: DiGraph<Node, EdgeKind, u32> = DiGraph::with_capacity(nodes.len(), 0);
        let mut index = HashMap::with_capacity(nodes.len());
        for (name, node) in nodes {
            let idx = graph.add_node(node);
            index.insert(name, idx);
        }

        let mut edges = Vec::new();
        for source in graph.node_indices() {
            for target in &graph[source].connections {
                if let Some(&target_idx) = index.get(target) {
                    edges.push((source, target_idx));
                }
            }
        }
        for (source, target) in edges {
            graph.add_edge(source, target, EdgeKind::References);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built reference graph"
        );
        ReferenceGraph { graph, index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).map(|&idx| NodeId::from(idx))
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Targets of `name`'s references, in connection order.
    pub fn refers_to(&self, name: &str) -> Result<Vec<&Node>, CoreError> {
        let idx = self.lookup(name)?;
        Ok(self.graph[idx]
            .connections
            .iter()
            .filter_map(|target| self.node(target))
            .collect())
    }

    /// Nodes referencing `name`, in id order.
    pub fn referred_by(&self, name: &str) -> Result<Vec<&Node>, CoreError> {
        let idx = self.lookup(name)?;
        let sources: BTreeSet<NodeIndex<u32>> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        Ok(sources.into_iter().map(|source| &self.graph[source]).collect())
    }

    /// Incoming plus outgoing edge count.
    pub fn degree(&self, name: &str) -> Result<usize, CoreError> {
        let idx = self.lookup(name)?;
        Ok(self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count())
    }

    /// Node names grouped by owning program, both in first-seen order.
    pub fn program_clusters(&self) -> IndexMap<&str, Vec<&str>> {
        let mut clusters: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for node in self.nodes() {
            clusters
                .entry(node.program.as_str())
                .or_default()
                .push(node.name.as_str());
        }
        clusters
    }

    /// A new graph holding only the nodes `filter` accepts, with edges
    /// restricted to pairs of kept nodes.
    pub fn filtered(&self, filter: &NodeFilter) -> ReferenceGraph {
        let kept: NodeSet = self
            .nodes()
            .filter(|node| filter.matches(node))
            .map(|node| (node.name.clone(), node.clone()))
            .collect();
        ReferenceGraph::from_nodes(kept)
    }

    /// Flattens the graph into serializable node and edge lists.
    pub fn export(&self) -> GraphExport {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                ExportNode {
                    id: NodeId::from(idx),
                    name: node.name.clone(),
                    display_name: node.display_name.clone(),
                    class: node.class,
                    program: node.program.clone(),
                    order: node.order,
                    query: node.query,
                }
            })
            .collect();
        let mut edges: Vec<ExportEdge> = self
            .graph
            .edge_references()
            .map(|edge| ExportEdge {
                source: NodeId::from(edge.source()),
                target: NodeId::from(edge.target()),
                kind: *edge.weight(),
            })
            .collect();
        edges.sort_by_key(|edge| (edge.source, edge.target));
        GraphExport { nodes, edges }
    }

    fn lookup(&self, name: &str) -> Result<NodeIndex<u32>, CoreError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::NodeNotFound {
                name: name.to_string(),
            })
    }
}
