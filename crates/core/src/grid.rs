//! Cell and wall storage for the maze surface.
//! Every wall removal goes through [`Grid::remove_wall`] so both sides of a
//! passage always agree. Traversal scratch state (visited marks) is never
//! stored here; callers keep their own bitmaps.

use std::collections::VecDeque;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Direction, Pos};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Walls: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST = 0b0100;
        const WEST = 0b1000;
    }
}

impl From<Direction> for Walls {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Walls::NORTH,
            Direction::South => Walls::SOUTH,
            Direction::East => Walls::EAST,
            Direction::West => Walls::WEST,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub height: i32,
    pub walls: Walls,
}

impl Default for Cell {
    fn default() -> Self {
        Self { height: 0, walls: Walls::all() }
    }
}

impl Cell {
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(Walls::from(direction))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a fully walled grid with every height at zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major node index, `y * width + x`.
    pub fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos));
        pos.y * self.width + pos.x
    }

    pub fn pos_of(&self, index: usize) -> Pos {
        debug_assert!(index < self.cells.len());
        Pos { y: index / self.width, x: index % self.width }
    }

    /// Top-left cell, where every solve starts.
    pub fn entrance(&self) -> Pos {
        Pos::ORIGIN
    }

    /// Bottom-right cell, where every solve ends.
    pub fn exit(&self) -> Pos {
        Pos { y: self.height.saturating_sub(1), x: self.width.saturating_sub(1) }
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn height_at(&self, pos: Pos) -> i32 {
        self.cell(pos).height
    }

    pub fn set_height(&mut self, pos: Pos, height: i32) {
        let idx = self.index(pos);
        self.cells[idx].height = height;
    }

    pub fn has_wall(&self, pos: Pos, direction: Direction) -> bool {
        self.cell(pos).has_wall(direction)
    }

    pub fn neighbor(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        direction.step(pos, self.width, self.height)
    }

    /// In-bounds neighbours reachable through an open passage.
    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = (Direction, Pos)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            if self.has_wall(pos, direction) {
                return None;
            }
            self.neighbor(pos, direction).map(|next| (direction, next))
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Pos { y, x }))
    }

    /// Opens the passage from `pos` towards `direction`. The mirrored wall of the
    /// neighbour is cleared too; on the grid boundary only the own side exists.
    pub fn remove_wall(&mut self, pos: Pos, direction: Direction) {
        let idx = self.index(pos);
        self.cells[idx].walls.remove(Walls::from(direction));
        if let Some(next) = self.neighbor(pos, direction) {
            let next_idx = self.index(next);
            self.cells[next_idx].walls.remove(Walls::from(direction.opposite()));
        }
    }

    pub fn reset_walls(&mut self) {
        for cell in &mut self.cells {
            cell.walls = Walls::all();
        }
    }

    /// Cells reachable from `start` through open passages, as a row-major bitmap.
    pub fn reachable_from(&self, start: Pos) -> Vec<bool> {
        let mut seen = vec![false; self.cells.len()];
        if !self.in_bounds(start) {
            return seen;
        }

        let mut open = VecDeque::from([start]);
        seen[self.index(start)] = true;
        while let Some(pos) = open.pop_front() {
            for (_, next) in self.open_neighbors(pos) {
                let idx = self.index(next);
                if !seen[idx] {
                    seen[idx] = true;
                    open.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_fully_connected(&self) -> bool {
        self.is_empty() || self.reachable_from(self.entrance()).into_iter().all(|seen| seen)
    }

    /// True when every interior wall flag matches its mirror in the neighbour.
    pub fn walls_are_symmetric(&self) -> bool {
        self.positions().all(|pos| {
            Direction::ALL.into_iter().all(|direction| match self.neighbor(pos, direction) {
                Some(next) => {
                    self.has_wall(pos, direction) == self.has_wall(next, direction.opposite())
                }
                None => true,
            })
        })
    }

    /// Number of open interior passages, each counted once.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|pos| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| {
                        self.neighbor(pos, direction).is_some() && !self.has_wall(pos, direction)
                    })
                    .count()
            })
            .sum()
    }

    pub fn min_max_height(&self) -> Option<(i32, i32)> {
        let min = self.cells.iter().map(|cell| cell.height).min()?;
        let max = self.cells.iter().map(|cell| cell.height).max()?;
        Some((min, max))
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.cells.len() * 5);
        bytes.extend_from_slice(&(self.width as u64).to_le_bytes());
        bytes.extend_from_slice(&(self.height as u64).to_le_bytes());
        for cell in &self.cells {
            bytes.extend_from_slice(&cell.height.to_le_bytes());
            bytes.push(cell.walls.bits());
        }
        bytes
    }

    /// Stable hash of dimensions, heights and walls.
    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
