//! A* over the maze graph with a heuristic of zero.

use std::collections::BinaryHeap;

use super::{PathSolver, QueueEntry, SearchTree, ShortestPath, check_nodes};
use crate::error::SolveError;
use crate::graph::Graph;

/// Best-first search that settles each node at most once. Per-step costs can
/// drop below one (or below zero), so no distance estimate is admissible for
/// every cost function and the heuristic stays at zero; the search therefore
/// behaves like Dijkstra and stops as soon as the goal is settled.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStar;

impl AStar {
    fn heuristic(&self, _node: usize, _goal: usize) -> f64 {
        0.0
    }
}

impl PathSolver for AStar {
    fn name(&self) -> &'static str {
        "a_star"
    }

    fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        goal: usize,
    ) -> Result<Option<ShortestPath>, SolveError> {
        check_nodes(graph, [start, goal])?;

        let mut tree = SearchTree::new(graph.node_count(), start);
        let mut closed = vec![false; graph.node_count()];
        let mut open =
            BinaryHeap::from([QueueEntry { priority: self.heuristic(start, goal), node: start }]);

        while let Some(QueueEntry { node, .. }) = open.pop() {
            if closed[node] {
                continue;
            }
            if node == goal {
                return Ok(tree.path_to(start, goal));
            }
            closed[node] = true;

            for edge in graph.outgoing(node) {
                if closed[edge.to] {
                    continue;
                }
                if tree.relax(node, edge.to, edge.weight) {
                    let priority = tree.distances[edge.to] + self.heuristic(edge.to, goal);
                    open.push(QueueEntry { priority, node: edge.to });
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_cheaper_of_two_routes() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 3, 5.0);
        graph.add_edge(0, 2, 2.0);
        graph.add_edge(2, 3, 1.0);
        let path = AStar.shortest_path(&graph, 0, 3).expect("valid nodes").expect("reachable");
        assert_eq!(path.nodes, vec![0, 2, 3]);
        assert_eq!(path.cost, 3.0);
    }

    #[test]
    fn accepts_improvements_before_settling() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 2, 10.0);
        graph.add_edge(0, 1, 1.0);
        graph.add_edge(1, 2, 1.0);
        let path = AStar.shortest_path(&graph, 0, 2).expect("valid nodes").expect("reachable");
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.cost, 2.0);
    }

    #[test]
    fn disconnected_goal_is_none() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1, 1.0);
        assert_eq!(AStar.shortest_path(&graph, 0, 2), Ok(None));
    }
}
