//! In-memory mapping graph with a reference index.
//!
//! Uses `petgraph` for the graph structure and a `HashMap` for O(1) lookups
//! from a [`Reference`] to its node.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::index::deduplicate_evidence;
use crate::model::Mapping;
use crate::reference::Reference;

use super::EdgeData;

/// Directed multigraph of mappings.
///
/// Parallel edges between the same two nodes carry different predicates;
/// inserting a mapping whose triple is already present merges its evidence
/// into the existing edge.
#[derive(Debug, Clone, Default)]
pub struct MappingGraph {
    /// The directed graph: nodes are References, edges carry EdgeData.
    graph: DiGraph<Reference, EdgeData>,
    /// Reference → NodeIndex mapping for O(1) node lookups.
    node_index: HashMap<Reference, NodeIndex>,
}

impl MappingGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from mappings, in input order.
    pub fn from_mappings(mappings: &[Mapping]) -> Self {
        let mut graph = Self::new();
        for mapping in mappings {
            graph.insert_mapping(mapping);
        }
        graph
    }

    /// Ensure a node exists for the given reference, returning its NodeIndex.
    fn ensure_node(&mut self, reference: &Reference) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(reference) {
            return idx;
        }
        let idx = self.graph.add_node(reference.clone());
        self.node_index.insert(reference.clone(), idx);
        idx
    }

    /// Insert a mapping as an edge from subject to object.
    pub fn insert_mapping(&mut self, mapping: &Mapping) {
        let subj_idx = self.ensure_node(&mapping.subject);
        let obj_idx = self.ensure_node(&mapping.object);

        match self.find_edge(subj_idx, obj_idx, &mapping.predicate) {
            Some(edge) => {
                let data = &mut self.graph[edge];
                data.evidence.extend(mapping.evidence.iter().cloned());
                data.evidence = deduplicate_evidence(&data.evidence);
            }
            None => {
                self.graph.add_edge(subj_idx, obj_idx, EdgeData::from(mapping));
            }
        }
    }

    fn find_edge(&self, from: NodeIndex, to: NodeIndex, predicate: &Reference) -> Option<EdgeIndex> {
        self.graph
            .edges_connecting(from, to)
            .find(|e| &e.weight().predicate == predicate)
            .map(|e| e.id())
    }

    /// Look up the node for a reference.
    pub fn node(&self, reference: &Reference) -> Option<NodeIndex> {
        self.node_index.get(reference).copied()
    }

    /// The reference stored on a node.
    pub fn reference(&self, node: NodeIndex) -> &Reference {
        &self.graph[node]
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges (distinct triples).
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether any edge runs from `from` to `to`.
    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// Whether any edge joins the two nodes, in either direction.
    pub fn has_edge_between(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    /// All edges from `from` to `to`, in insertion order.
    pub fn edges(&self, from: NodeIndex, to: NodeIndex) -> Vec<&EdgeData> {
        let mut edges: Vec<(EdgeIndex, &EdgeData)> = self
            .graph
            .edges_connecting(from, to)
            .map(|e| (e.id(), e.weight()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, data)| data).collect()
    }

    /// Distinct direct successors, in node order.
    pub fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct neighbors in either direction, in node order.
    pub fn neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors_undirected(node).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Rebuild the mapping an edge stands for.
    pub fn mapping(&self, from: NodeIndex, to: NodeIndex, edge: &EdgeData) -> Mapping {
        Mapping::new(
            self.reference(from).clone(),
            edge.predicate.clone(),
            self.reference(to).clone(),
            edge.evidence.clone(),
        )
    }
}
