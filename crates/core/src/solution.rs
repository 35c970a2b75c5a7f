//! A solved route through the maze and its cost.

use serde::{Deserialize, Serialize};

use crate::cost::CostFunction;
use crate::grid::Grid;
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: Pos,
    pub height: i32,
}

/// Ordered waypoints from start to goal (both included) and the cost the
/// solver reported for them. The heights are copied out of the grid at solve
/// time, so the cost can be recomputed without the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    path: Vec<Waypoint>,
    total_cost: f64,
}

impl Solution {
    pub fn new(path: Vec<Waypoint>, total_cost: f64) -> Self {
        Self { path, total_cost }
    }

    pub fn path(&self) -> &[Waypoint] {
        &self.path
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.path.iter().map(|waypoint| waypoint.pos)
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of steps between waypoints.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Pos> {
        self.path.first().map(|waypoint| waypoint.pos)
    }

    pub fn goal(&self) -> Option<Pos> {
        self.path.last().map(|waypoint| waypoint.pos)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.path.iter().any(|waypoint| waypoint.pos == pos)
    }

    /// Sums `cost` over consecutive waypoints. Does not touch the stored total.
    pub fn cost_with(&self, cost: &dyn CostFunction) -> f64 {
        self.path.windows(2).map(|step| cost.cost(step[0].height, step[1].height)).sum()
    }

    /// True when every step moves to an adjacent cell through an open passage
    /// and the stored heights still match the grid.
    pub fn is_valid_in(&self, grid: &Grid) -> bool {
        if self.path.is_empty() {
            return false;
        }
        let heights_match = self.path.iter().all(|waypoint| {
            grid.in_bounds(waypoint.pos) && grid.height_at(waypoint.pos) == waypoint.height
        });
        heights_match
            && self.path.windows(2).all(|step| {
                Direction::ALL.into_iter().any(|direction| {
                    grid.neighbor(step[0].pos, direction) == Some(step[1].pos)
                        && !grid.has_wall(step[0].pos, direction)
                })
            })
    }
}
