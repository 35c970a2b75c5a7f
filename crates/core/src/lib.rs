//! Height-field mazes and the shortest-path solvers that cross them.

pub mod config;
pub mod cost;
pub mod error;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod heightfield;
pub mod pipeline;
pub mod seed;
pub mod solution;
pub mod solver;
pub mod types;

pub use config::Settings;
pub use cost::{CostFunction, CostFunctionKind, build_cost_function};
pub use error::{ConfigError, PipelineError, SolveError};
pub use generator::{GeneratorKind, MazeGenerator, build_generator, generate};
pub use graph::{Edge, Graph};
pub use grid::{Cell, Grid, Walls};
pub use heightfield::{HeightProvider, HeightProviderKind, build_height_provider};
pub use pipeline::{SolvedMaze, build_maze, build_solved_maze};
pub use seed::{MazeRng, generate_runtime_seed, rng_from_seed};
pub use solution::{Solution, Waypoint};
pub use solver::{
    PathSolver, ShortestPath, SolverKind, build_solver, solve_maze, solve_maze_between,
};
pub use types::{Direction, Pos};
