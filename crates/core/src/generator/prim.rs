//! Randomized Prim: a frontier of candidate walls ordered by random priorities.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand_chacha::rand_core::Rng;

use super::MazeGenerator;
use crate::grid::Grid;
use crate::seed::{MazeRng, random_index};
use crate::types::{Direction, Pos};

/// One wall on the edge of the carved region. Ordered by `priority`, with the
/// insertion sequence breaking ties so the heap order never depends on `Pos`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Frontier {
    priority: u64,
    seq: u64,
    pos: Pos,
    direction: Direction,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Prim;

impl MazeGenerator for Prim {
    fn name(&self) -> &'static str {
        "prim"
    }

    fn carve(&self, grid: &mut Grid, rng: &mut MazeRng) {
        if grid.is_empty() {
            return;
        }

        let mut visited = vec![false; grid.area()];
        let mut frontier = BinaryHeap::new();
        let mut seq = 0_u64;

        let start = grid.pos_of(random_index(rng, grid.area()));
        visited[grid.index(start)] = true;
        push_candidates(grid, &visited, start, &mut frontier, &mut seq, rng);

        while let Some(Reverse(candidate)) = frontier.pop() {
            let Some(next) = grid.neighbor(candidate.pos, candidate.direction) else {
                continue;
            };
            let next_idx = grid.index(next);
            if visited[next_idx] {
                continue;
            }

            grid.remove_wall(candidate.pos, candidate.direction);
            visited[next_idx] = true;
            push_candidates(grid, &visited, next, &mut frontier, &mut seq, rng);
        }
    }
}

fn push_candidates(
    grid: &Grid,
    visited: &[bool],
    pos: Pos,
    frontier: &mut BinaryHeap<Reverse<Frontier>>,
    seq: &mut u64,
    rng: &mut MazeRng,
) {
    for direction in Direction::ALL {
        let Some(next) = grid.neighbor(pos, direction) else {
            continue;
        };
        if visited[grid.index(next)] {
            continue;
        }
        frontier.push(Reverse(Frontier { priority: rng.next_u64(), seq: *seq, pos, direction }));
        *seq += 1;
    }
}
