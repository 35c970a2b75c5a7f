//! Johnson's reweighting followed by Dijkstra.

use super::bellman_ford::bellman_ford_distances;
use super::{PathSolver, ShortestPath, check_nodes, dijkstra, reconstruct_path};
use crate::error::SolveError;
use crate::graph::Graph;

/// Computes potentials with one Bellman-Ford pass from a virtual source, shifts
/// every edge to a non-negative weight and runs Dijkstra on the result.
#[derive(Clone, Copy, Debug, Default)]
pub struct Johnson;

impl Johnson {
    /// Potentials `h(v)`: shortest distance from the virtual source to each
    /// original node. All are `<= 0` and finite.
    pub fn potentials(&self, graph: &Graph) -> Result<Vec<f64>, SolveError> {
        let (augmented, source) = graph.with_virtual_source();
        let mut tree = bellman_ford_distances(&augmented, source, self.name())?;
        tree.distances.truncate(graph.node_count());
        Ok(tree.distances)
    }
}

impl PathSolver for Johnson {
    fn name(&self) -> &'static str {
        "johnson"
    }

    fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        goal: usize,
    ) -> Result<Option<ShortestPath>, SolveError> {
        check_nodes(graph, [start, goal])?;

        let potentials = self.potentials(graph)?;
        let reweighted = graph.reweighted(&potentials);
        let tree = dijkstra(&reweighted, start);

        let shifted = tree.distances[goal];
        if !shifted.is_finite() {
            return Ok(None);
        }
        let Some(nodes) = reconstruct_path(&tree.predecessors, start, goal) else {
            return Ok(None);
        };
        let cost = shifted - potentials[start] + potentials[goal];
        Ok(Some(ShortestPath { nodes, cost }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BellmanFord;

    fn negative_but_acyclic() -> Graph {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1, 3.0);
        graph.add_edge(0, 2, 8.0);
        graph.add_edge(0, 4, -4.0);
        graph.add_edge(1, 3, 1.0);
        graph.add_edge(1, 4, 7.0);
        graph.add_edge(2, 1, 4.0);
        graph.add_edge(3, 0, 2.0);
        graph.add_edge(3, 2, -5.0);
        graph.add_edge(4, 3, 6.0);
        graph
    }

    #[test]
    fn reweighted_edges_are_non_negative() {
        let graph = negative_but_acyclic();
        let potentials = Johnson.potentials(&graph).expect("no cycle");
        assert!(potentials.iter().all(|&h| h <= 0.0));
        let reweighted = graph.reweighted(&potentials);
        assert!(!reweighted.has_negative_edge());
    }

    #[test]
    fn agrees_with_bellman_ford_on_every_pair() {
        let graph = negative_but_acyclic();
        for start in 0..graph.node_count() {
            for goal in 0..graph.node_count() {
                let expected = BellmanFord.shortest_path(&graph, start, goal).expect("no cycle");
                let actual = Johnson.shortest_path(&graph, start, goal).expect("no cycle");
                assert_eq!(
                    actual.as_ref().map(|path| path.cost),
                    expected.as_ref().map(|path| path.cost),
                    "{start} -> {goal}"
                );
            }
        }
    }

    #[test]
    fn negative_cycle_anywhere_aborts() {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(2, 3, -1.0);
        graph.add_edge(3, 4, -1.0);
        graph.add_edge(4, 2, -1.0);
        assert_eq!(
            Johnson.shortest_path(&graph, 0, 1),
            Err(SolveError::NegativeCycle { solver: "johnson" })
        );
    }
}
