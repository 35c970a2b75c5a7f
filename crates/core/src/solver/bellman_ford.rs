//! Classic Bellman-Ford over the full edge list.

use super::{PathSolver, SearchTree, ShortestPath, check_nodes};
use crate::error::SolveError;
use crate::graph::Graph;

#[derive(Clone, Copy, Debug, Default)]
pub struct BellmanFord;

/// Up to `V - 1` relaxation passes with an early exit on a quiet pass, then one
/// more pass: any edge that still improves proves a negative cycle reachable
/// from `source`.
pub(crate) fn bellman_ford_distances(
    graph: &Graph,
    source: usize,
    solver: &'static str,
) -> Result<SearchTree, SolveError> {
    let mut tree = SearchTree::new(graph.node_count(), source);
    let passes = graph.node_count().saturating_sub(1);

    let mut converged = false;
    for _ in 0..passes {
        let mut updated = false;
        for edge in graph.edges() {
            updated |= tree.relax(edge.from, edge.to, edge.weight);
        }
        if !updated {
            converged = true;
            break;
        }
    }

    if !converged && has_improvable_edge(graph, &tree) {
        tracing::warn!(
            target: "heightmaze::solver",
            solver,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "solver.negative_cycle"
        );
        return Err(SolveError::NegativeCycle { solver });
    }
    Ok(tree)
}

pub(super) fn has_improvable_edge(graph: &Graph, tree: &SearchTree) -> bool {
    graph.edges().iter().any(|edge| {
        let base = tree.distances[edge.from];
        base.is_finite() && base + edge.weight < tree.distances[edge.to]
    })
}

impl PathSolver for BellmanFord {
    fn name(&self) -> &'static str {
        "bellman_ford"
    }

    fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        goal: usize,
    ) -> Result<Option<ShortestPath>, SolveError> {
        check_nodes(graph, [start, goal])?;
        let tree = bellman_ford_distances(graph, start, self.name())?;
        Ok(tree.path_to(start, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_negative_edges_without_cycles() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, 4.0);
        graph.add_edge(0, 2, 5.0);
        graph.add_edge(2, 1, -3.0);
        graph.add_edge(1, 3, 1.0);
        let path = BellmanFord.shortest_path(&graph, 0, 3).expect("no cycle").expect("reachable");
        assert_eq!(path.nodes, vec![0, 2, 1, 3]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn negative_cycle_is_fatal() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, -1.0);
        graph.add_edge(1, 2, -1.0);
        graph.add_edge(2, 0, -1.0);
        graph.add_edge(2, 3, 1.0);
        assert_eq!(
            BellmanFord.shortest_path(&graph, 0, 3),
            Err(SolveError::NegativeCycle { solver: "bellman_ford" })
        );
    }

    #[test]
    fn unreachable_negative_cycle_is_ignored() {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(2, 3, -1.0);
        graph.add_edge(3, 4, -1.0);
        graph.add_edge(4, 2, -1.0);
        let path = BellmanFord.shortest_path(&graph, 0, 1).expect("cycle is unreachable");
        assert_eq!(path.map(|path| path.cost), Some(2.0));
    }
}
