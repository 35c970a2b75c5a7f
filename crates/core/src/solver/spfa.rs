//! Shortest Path Faster Algorithm: Bellman-Ford driven by a FIFO of nodes
//! whose distance just improved.

use std::collections::VecDeque;

use super::bellman_ford::has_improvable_edge;
use super::{PathSolver, SearchTree, ShortestPath, check_nodes};
use crate::error::SolveError;
use crate::graph::Graph;

#[derive(Clone, Copy, Debug, Default)]
pub struct Spfa;

impl Spfa {
    fn negative_cycle(&self, graph: &Graph) -> SolveError {
        tracing::warn!(
            target: "heightmaze::solver",
            solver = self.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "solver.negative_cycle"
        );
        SolveError::NegativeCycle { solver: self.name() }
    }
}

impl PathSolver for Spfa {
    fn name(&self) -> &'static str {
        "spfa"
    }

    fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        goal: usize,
    ) -> Result<Option<ShortestPath>, SolveError> {
        check_nodes(graph, [start, goal])?;

        let node_count = graph.node_count();
        let mut tree = SearchTree::new(node_count, start);
        let mut queued = vec![false; node_count];
        // Edges on the best known path to each node. A simple path has at most
        // V - 1 of them, so reaching V means the path repeats a node on a
        // negative cycle.
        let mut hops = vec![0_usize; node_count];

        let mut queue = VecDeque::from([start]);
        queued[start] = true;
        while let Some(node) = queue.pop_front() {
            queued[node] = false;
            for edge in graph.outgoing(node) {
                if !tree.relax(node, edge.to, edge.weight) {
                    continue;
                }
                hops[edge.to] = hops[node] + 1;
                if hops[edge.to] >= node_count {
                    return Err(self.negative_cycle(graph));
                }
                if !queued[edge.to] {
                    queued[edge.to] = true;
                    queue.push_back(edge.to);
                }
            }
        }

        if has_improvable_edge(graph, &tree) {
            return Err(self.negative_cycle(graph));
        }
        Ok(tree.path_to(start, goal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_bellman_ford_on_negative_edges() {
        let mut graph = Graph::new(5);
        graph.add_edge(0, 1, 6.0);
        graph.add_edge(0, 3, 7.0);
        graph.add_edge(1, 2, 5.0);
        graph.add_edge(1, 3, 8.0);
        graph.add_edge(1, 4, -4.0);
        graph.add_edge(2, 1, -2.0);
        graph.add_edge(3, 2, -3.0);
        graph.add_edge(3, 4, 9.0);
        graph.add_edge(4, 2, 7.0);
        let path = Spfa.shortest_path(&graph, 0, 4).expect("no cycle").expect("reachable");
        assert_eq!(path.cost, -2.0);
        assert_eq!(path.nodes, vec![0, 3, 2, 1, 4]);
    }

    #[test]
    fn negative_cycle_is_fatal() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, -1.0);
        graph.add_edge(1, 2, -1.0);
        graph.add_edge(2, 0, -1.0);
        graph.add_edge(2, 3, 1.0);
        assert_eq!(
            Spfa.shortest_path(&graph, 0, 3),
            Err(SolveError::NegativeCycle { solver: "spfa" })
        );
    }

    #[test]
    fn two_node_negative_cycle_is_caught() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 0, -2.0);
        graph.add_edge(1, 2, 1.0);
        assert!(matches!(
            Spfa.shortest_path(&graph, 0, 2),
            Err(SolveError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn zero_weight_cycles_terminate() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, 0.0);
        graph.add_edge(1, 0, 0.0);
        graph.add_edge(1, 2, 2.0);
        let path = Spfa.shortest_path(&graph, 0, 2).expect("no negative cycle").expect("reachable");
        assert_eq!(path.cost, 2.0);
    }
}
