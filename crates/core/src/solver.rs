//! Minimum-cost path search over a maze graph.
//!
//! Four interchangeable solvers share one contract: `Ok(Some(path))` for the
//! cheapest route, `Ok(None)` when the goal cannot be reached, and
//! [`SolveError::NegativeCycle`] when the weights admit no shortest path.
//! Only Bellman-Ford, SPFA and Johnson are correct with negative edges; A*
//! runs with a zero heuristic and assumes non-negative weights.

mod astar;
mod bellman_ford;
mod johnson;
mod spfa;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::normalize_variant;
use crate::cost::{CostFunction, CostFunctionKind};
use crate::error::{ConfigError, SolveError};
use crate::graph::Graph;
use crate::grid::Grid;
use crate::solution::{Solution, Waypoint};
use crate::types::Pos;

pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use johnson::Johnson;
pub use spfa::Spfa;

/// Node sequence from start to goal (both included) and its summed weight.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPath {
    pub nodes: Vec<usize>,
    pub cost: f64,
}

pub trait PathSolver: fmt::Debug {
    fn name(&self) -> &'static str;

    fn shortest_path(
        &self,
        graph: &Graph,
        start: usize,
        goal: usize,
    ) -> Result<Option<ShortestPath>, SolveError>;
}

pub(crate) fn check_nodes(graph: &Graph, nodes: [usize; 2]) -> Result<(), SolveError> {
    let node_count = graph.node_count();
    for node in nodes {
        if node >= node_count {
            return Err(SolveError::NodeOutOfRange { node, node_count });
        }
    }
    Ok(())
}

/// Walks the predecessor chain back from `goal`. `None` if the chain does not
/// lead to `start`.
pub(crate) fn reconstruct_path(
    predecessors: &[Option<usize>],
    start: usize,
    goal: usize,
) -> Option<Vec<usize>> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while current != start {
        current = predecessors[current]?;
        nodes.push(current);
        if nodes.len() > predecessors.len() {
            return None;
        }
    }
    nodes.reverse();
    Some(nodes)
}

/// Min-heap entry for the priority-queue searches.
#[derive(Clone, Copy, Debug)]
pub(crate) struct QueueEntry {
    pub(crate) priority: f64,
    pub(crate) node: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Reversed so `BinaryHeap` pops the cheapest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority).then_with(|| other.node.cmp(&self.node))
    }
}

/// Distances and predecessors of a single-source search.
#[derive(Clone, Debug)]
pub(crate) struct SearchTree {
    pub(crate) distances: Vec<f64>,
    pub(crate) predecessors: Vec<Option<usize>>,
}

impl SearchTree {
    pub(crate) fn new(node_count: usize, source: usize) -> Self {
        let mut distances = vec![f64::INFINITY; node_count];
        distances[source] = 0.0;
        Self { distances, predecessors: vec![None; node_count] }
    }

    /// Relaxes `from -> to` if it improves the target. Returns whether it did.
    pub(crate) fn relax(&mut self, from: usize, to: usize, weight: f64) -> bool {
        let base = self.distances[from];
        if base == f64::INFINITY {
            return false;
        }
        let candidate = base + weight;
        if candidate < self.distances[to] {
            self.distances[to] = candidate;
            self.predecessors[to] = Some(from);
            return true;
        }
        false
    }

    pub(crate) fn path_to(&self, start: usize, goal: usize) -> Option<ShortestPath> {
        let cost = self.distances[goal];
        if !cost.is_finite() {
            return None;
        }
        let nodes = reconstruct_path(&self.predecessors, start, goal)?;
        Some(ShortestPath { nodes, cost })
    }
}

/// Dijkstra with lazy deletion over non-negative weights. Settles each node at
/// most once and runs until the queue drains.
pub(crate) fn dijkstra(graph: &Graph, source: usize) -> SearchTree {
    let mut tree = SearchTree::new(graph.node_count(), source);
    let mut settled = vec![false; graph.node_count()];
    let mut open = BinaryHeap::from([QueueEntry { priority: 0.0, node: source }]);

    while let Some(QueueEntry { priority, node }) = open.pop() {
        if settled[node] || priority > tree.distances[node] {
            continue;
        }
        settled[node] = true;
        for edge in graph.outgoing(node) {
            if !settled[edge.to] && tree.relax(node, edge.to, edge.weight) {
                open.push(QueueEntry { priority: tree.distances[edge.to], node: edge.to });
            }
        }
    }
    tree
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SolverKind {
    AStar,
    BellmanFord,
    Spfa,
    Johnson,
}

impl SolverKind {
    pub const ALL: [SolverKind; 4] =
        [SolverKind::AStar, SolverKind::BellmanFord, SolverKind::Spfa, SolverKind::Johnson];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AStar => "a_star",
            Self::BellmanFord => "bellman_ford",
            Self::Spfa => "spfa",
            Self::Johnson => "johnson",
        }
    }

    /// Whether this solver returns correct costs on graphs with negative edges.
    pub fn handles_negative_edges(self) -> bool {
        !matches!(self, Self::AStar)
    }

    /// Whether the reported cost is the true minimum under `cost`.
    pub fn is_exact_for(self, cost: CostFunctionKind) -> bool {
        self.handles_negative_edges() || !cost.allows_negative_steps()
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_variant(value).as_str() {
            "a_star" | "astar" | "a*" => Ok(Self::AStar),
            "bellman_ford" | "bellmanford" => Ok(Self::BellmanFord),
            "spfa" => Ok(Self::Spfa),
            "johnson" | "johnsons" => Ok(Self::Johnson),
            _ => Err(ConfigError::UnknownVariant {
                kind: "solver",
                value: value.to_string(),
                expected: "a_star, bellman_ford, spfa, johnson",
            }),
        }
    }
}

impl TryFrom<String> for SolverKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn build_solver(kind: SolverKind) -> Box<dyn PathSolver> {
    match kind {
        SolverKind::AStar => Box::new(AStar),
        SolverKind::BellmanFord => Box::new(BellmanFord),
        SolverKind::Spfa => Box::new(Spfa),
        SolverKind::Johnson => Box::new(Johnson),
    }
}

/// Solves from the entrance (top-left) to the exit (bottom-right).
pub fn solve_maze(
    grid: &Grid,
    cost: &dyn CostFunction,
    solver: &dyn PathSolver,
) -> Result<Option<Solution>, SolveError> {
    solve_maze_between(grid, cost, solver, grid.entrance(), grid.exit())
}

pub fn solve_maze_between(
    grid: &Grid,
    cost: &dyn CostFunction,
    solver: &dyn PathSolver,
    start: Pos,
    goal: Pos,
) -> Result<Option<Solution>, SolveError> {
    if grid.is_empty() {
        return Err(SolveError::EmptyGrid);
    }
    for pos in [start, goal] {
        if !grid.in_bounds(pos) {
            return Err(SolveError::OutOfBounds {
                pos,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }

    let graph = Graph::from_grid(grid, cost);
    let found = match solver.shortest_path(&graph, grid.index(start), grid.index(goal)) {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(
                target: "heightmaze::solver",
                solver = solver.name(),
                cost = cost.name(),
                error = %err,
                "solver.failed"
            );
            return Err(err);
        }
    };

    let Some(shortest) = found else {
        tracing::info!(
            target: "heightmaze::solver",
            solver = solver.name(),
            cost = cost.name(),
            "solver.unreachable"
        );
        return Ok(None);
    };

    let path = shortest
        .nodes
        .iter()
        .map(|&node| {
            let pos = grid.pos_of(node);
            Waypoint { pos, height: grid.height_at(pos) }
        })
        .collect();
    tracing::debug!(
        target: "heightmaze::solver",
        solver = solver.name(),
        cost = cost.name(),
        total_cost = shortest.cost,
        hops = shortest.nodes.len().saturating_sub(1),
        "solver.solved"
    );
    Ok(Some(Solution::new(path, shortest.cost)))
}
