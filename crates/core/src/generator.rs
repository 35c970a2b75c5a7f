//! Maze carving: one spanning-tree algorithm followed by the shared loop
//! injection and exit passes.

mod backtracker;
mod kruskal;
mod prim;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::normalize_variant;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::seed::{MazeRng, unit_interval};
use crate::types::Direction;

pub use backtracker::Backtracker;
pub use kruskal::{DisjointSet, Kruskal};
pub use prim::Prim;

pub trait MazeGenerator: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Carves a spanning tree into a fully walled grid: afterwards every cell
    /// is reachable from every other one through exactly one route.
    fn carve(&self, grid: &mut Grid, rng: &mut MazeRng);
}

/// Runs the full generation pass over `grid`, replacing any previous walls.
/// Heights are left as they are.
pub fn generate(
    grid: &mut Grid,
    generator: &dyn MazeGenerator,
    loop_probability: f64,
    rng: &mut MazeRng,
) {
    if grid.is_empty() {
        return;
    }

    grid.reset_walls();
    generator.carve(grid, rng);
    let tree_passages = grid.passage_count();
    let loops = add_loops(grid, loop_probability, rng);
    open_exits(grid);

    tracing::debug!(
        target: "heightmaze::generator",
        generator = generator.name(),
        width = grid.width(),
        height = grid.height(),
        tree_passages,
        loops,
        "generator.carved"
    );
}

/// Knocks out each remaining interior wall with probability `loop_probability`.
/// Every undirected wall is visited once, through its EAST or SOUTH side.
/// Returns the number of walls removed.
pub fn add_loops(grid: &mut Grid, loop_probability: f64, rng: &mut MazeRng) -> usize {
    let mut removed = 0;
    for pos in grid.positions() {
        for direction in [Direction::East, Direction::South] {
            if grid.neighbor(pos, direction).is_none() || !grid.has_wall(pos, direction) {
                continue;
            }
            if unit_interval(rng) < loop_probability {
                grid.remove_wall(pos, direction);
                removed += 1;
            }
        }
    }
    removed
}

/// Opens the entrance above the top-left cell and the exit below the
/// bottom-right cell.
pub fn open_exits(grid: &mut Grid) {
    if grid.is_empty() {
        return;
    }
    let entrance = grid.entrance();
    let exit = grid.exit();
    grid.remove_wall(entrance, Direction::North);
    grid.remove_wall(exit, Direction::South);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum GeneratorKind {
    Dfs,
    Kruskal,
    Prim,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 3] =
        [GeneratorKind::Dfs, GeneratorKind::Kruskal, GeneratorKind::Prim];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Kruskal => "kruskal",
            Self::Prim => "prim",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_variant(value).as_str() {
            "dfs" | "backtracker" | "recursive_backtracker" => Ok(Self::Dfs),
            "kruskal" => Ok(Self::Kruskal),
            "prim" => Ok(Self::Prim),
            _ => Err(ConfigError::UnknownVariant {
                kind: "generator",
                value: value.to_string(),
                expected: "dfs, kruskal, prim",
            }),
        }
    }
}

impl TryFrom<String> for GeneratorKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn build_generator(kind: GeneratorKind) -> Box<dyn MazeGenerator> {
    match kind {
        GeneratorKind::Dfs => Box::new(Backtracker),
        GeneratorKind::Kruskal => Box::new(Kruskal),
        GeneratorKind::Prim => Box::new(Prim),
    }
}
