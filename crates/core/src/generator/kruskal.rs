//! Randomized Kruskal over shuffled candidate walls.

use std::cmp::Ordering;

use super::MazeGenerator;
use crate::grid::Grid;
use crate::seed::{MazeRng, shuffle};
use crate::types::{Direction, Pos};

/// Union-find with path compression and union by rank.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self { parent: (0..size).collect(), rank: vec![0; size] }
    }

    pub fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = item;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns `false` when they already shared one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => self.parent[root_a] = root_b,
            Ordering::Greater => self.parent[root_b] = root_a,
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }
}

/// Joins randomly ordered neighbouring cells whenever they are still in
/// different components.
#[derive(Clone, Copy, Debug, Default)]
pub struct Kruskal;

impl MazeGenerator for Kruskal {
    fn name(&self) -> &'static str {
        "kruskal"
    }

    fn carve(&self, grid: &mut Grid, rng: &mut MazeRng) {
        if grid.is_empty() {
            return;
        }

        // WEST and SOUTH only, so each undirected wall is listed once.
        let mut candidates: Vec<(Pos, Direction, Pos)> = Vec::with_capacity(grid.area() * 2);
        for pos in grid.positions() {
            for direction in [Direction::West, Direction::South] {
                if let Some(next) = grid.neighbor(pos, direction) {
                    candidates.push((pos, direction, next));
                }
            }
        }
        shuffle(rng, &mut candidates);

        let mut components = DisjointSet::new(grid.area());
        for (pos, direction, next) in candidates {
            if components.union(grid.index(pos), grid.index(next)) {
                grid.remove_wall(pos, direction);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_reports_whether_sets_merged() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
        assert_ne!(sets.find(0), sets.find(4));
    }

    #[test]
    fn find_compresses_long_chains() {
        let mut sets = DisjointSet::new(64);
        for i in 1..64 {
            sets.union(i - 1, i);
        }
        let root = sets.find(63);
        for i in 0..64 {
            assert_eq!(sets.find(i), root);
        }
    }
}
