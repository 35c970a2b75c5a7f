//! Directed weighted graph derived from a carved grid.
//! Weights are baked in at build time, so a new cost function needs a new graph.

use crate::cost::CostFunction;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(node_count: usize) -> Self {
        Self { node_count, edges: Vec::new(), adjacency: vec![Vec::new(); node_count] }
    }

    /// One node per cell (row-major) and one edge per open passage side, with
    /// directions swept N, S, E, W.
    pub fn from_grid(grid: &Grid, cost: &dyn CostFunction) -> Self {
        let mut graph = Self::new(grid.area());
        for pos in grid.positions() {
            let from = grid.index(pos);
            let current = grid.height_at(pos);
            for (_, next) in grid.open_neighbors(pos) {
                let weight = cost.cost(current, grid.height_at(next));
                graph.add_edge(from, grid.index(next), weight);
            }
        }

        tracing::debug!(
            target: "heightmaze::graph",
            cost = cost.name(),
            nodes = graph.node_count,
            edges = graph.edges.len(),
            negative = graph.has_negative_edge(),
            "graph.built"
        );
        graph
    }

    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) {
        debug_assert!(from < self.node_count && to < self.node_count);
        self.adjacency[from].push(self.edges.len());
        self.edges.push(Edge { from, to, weight });
    }

    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency[node].iter().map(|&edge| &self.edges[edge])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_negative_edge(&self) -> bool {
        self.edges.iter().any(|edge| edge.weight < 0.0)
    }

    /// Copy of the graph with one extra node joined to every original node by a
    /// zero-weight edge. Returns the copy and the index of the extra node.
    pub fn with_virtual_source(&self) -> (Graph, usize) {
        let source = self.node_count;
        let mut augmented = Graph::new(self.node_count + 1);
        for edge in &self.edges {
            augmented.add_edge(edge.from, edge.to, edge.weight);
        }
        for node in 0..self.node_count {
            augmented.add_edge(source, node, 0.0);
        }
        (augmented, source)
    }

    /// Applies `w'(u, v) = w(u, v) + h(u) - h(v)` to every edge. Edge order and
    /// adjacency are preserved.
    pub fn reweighted(&self, potentials: &[f64]) -> Graph {
        debug_assert!(potentials.len() >= self.node_count);
        let edges = self
            .edges
            .iter()
            .map(|edge| Edge {
                weight: edge.weight + potentials[edge.from] - potentials[edge.to],
                ..*edge
            })
            .collect();
        Graph { node_count: self.node_count, edges, adjacency: self.adjacency.clone() }
    }
}
