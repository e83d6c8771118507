//! Graph analytics: weakly connected components and bounded simple paths.
//!
//! Both walk nodes and neighbors in node order, so results are reproducible
//! for a given input order.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;

use super::EdgeData;
use super::index::MappingGraph;

// ---------------------------------------------------------------------------
// Weakly connected components
// ---------------------------------------------------------------------------

/// Find weakly connected components ("clusters").
///
/// Members are listed in node order and components are ordered by their
/// first member.
pub fn weakly_connected_components(graph: &MappingGraph) -> Vec<Vec<NodeIndex>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut components = Vec::new();

    for start in graph.nodes() {
        if !visited.insert(start) {
            continue;
        }
        let mut members = vec![start];
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for neighbor in graph.neighbors(node) {
                if visited.insert(neighbor) {
                    members.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }
        members.sort();
        components.push(members);
    }

    components
}

// ---------------------------------------------------------------------------
// Simple paths
// ---------------------------------------------------------------------------

/// Enumerate all simple directed paths from `from` to `to` with at most
/// `cutoff` hops, as node sequences.
///
/// Successors are visited in node order and parallel edges do not multiply
/// paths here (see [`expand_edges`]); `petgraph::algo::all_simple_paths`
/// guarantees neither. Worst-case exponential in the size of the graph: `cutoff` is the only bound.
pub fn simple_paths(
    graph: &MappingGraph,
    from: NodeIndex,
    to: NodeIndex,
    cutoff: usize,
) -> Vec<Vec<NodeIndex>> {
    let mut paths = Vec::new();
    if from == to || cutoff == 0 {
        return paths;
    }
    let mut path = vec![from];
    let mut on_path: HashSet<NodeIndex> = HashSet::from([from]);
    extend_paths(graph, to, cutoff, &mut path, &mut on_path, &mut paths);
    paths
}

fn extend_paths(
    graph: &MappingGraph,
    to: NodeIndex,
    cutoff: usize,
    path: &mut Vec<NodeIndex>,
    on_path: &mut HashSet<NodeIndex>,
    paths: &mut Vec<Vec<NodeIndex>>,
) {
    let Some(&current) = path.last() else {
        return;
    };
    let hops = path.len() - 1;
    for next in graph.successors(current) {
        if next == to {
            let mut found = path.clone();
            found.push(next);
            paths.push(found);
            continue;
        }
        if hops + 1 >= cutoff || on_path.contains(&next) {
            continue;
        }
        path.push(next);
        on_path.insert(next);
        extend_paths(graph, to, cutoff, path, on_path, paths);
        on_path.remove(&next);
        path.pop();
    }
}

/// One hop of an edge path: source node, target node, and the edge taken.
pub type Hop<'a> = (NodeIndex, NodeIndex, &'a EdgeData);

/// Expand a node path into every edge path through it, choosing one of the
/// parallel edges at each hop.
pub fn expand_edges<'a>(graph: &'a MappingGraph, nodes: &[NodeIndex]) -> Vec<Vec<Hop<'a>>> {
    if nodes.len() < 2 {
        return Vec::new();
    }
    let mut expanded: Vec<Vec<Hop<'a>>> = vec![Vec::new()];
    for pair in nodes.windows(2) {
        let (u, v) = (pair[0], pair[1]);
        let edges = graph.edges(u, v);
        let mut next = Vec::with_capacity(expanded.len() * edges.len());
        for prefix in &expanded {
            for &edge in &edges {
                let mut extended = prefix.clone();
                extended.push((u, v, edge));
                next.push(extended);
            }
        }
        expanded = next;
    }
    expanded
}
