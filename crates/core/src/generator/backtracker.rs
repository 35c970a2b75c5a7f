//! Depth-first recursive backtracker with an explicit stack.

use super::MazeGenerator;
use crate::grid::Grid;
use crate::seed::{MazeRng, choose};
use crate::types::{Direction, Pos};

/// Grows one long corridor from the top-left cell, backing up only when the
/// current cell has no unvisited neighbour left.
#[derive(Clone, Copy, Debug, Default)]
pub struct Backtracker;

impl MazeGenerator for Backtracker {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn carve(&self, grid: &mut Grid, rng: &mut MazeRng) {
        if grid.is_empty() {
            return;
        }

        let mut visited = vec![false; grid.area()];
        let start = grid.entrance();
        visited[grid.index(start)] = true;

        let mut stack = vec![start];
        let mut candidates: Vec<(Direction, Pos)> = Vec::with_capacity(4);
        while let Some(&current) = stack.last() {
            candidates.clear();
            for direction in Direction::ALL {
                if let Some(next) = grid.neighbor(current, direction)
                    && !visited[grid.index(next)]
                {
                    candidates.push((direction, next));
                }
            }

            match choose(rng, &candidates) {
                Some(&(direction, next)) => {
                    grid.remove_wall(current, direction);
                    visited[grid.index(next)] = true;
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}
