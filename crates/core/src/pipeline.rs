//! End-to-end run: heights, walls, graph, solve.
//! Each randomized stage draws from its own stream of the run seed, so a
//! fixed seed and fixed settings always produce the same maze and route.

use crate::config::Settings;
use crate::cost::{CostFunctionKind, build_cost_function};
use crate::error::{ConfigError, PipelineError};
use crate::generator::{build_generator, generate};
use crate::grid::Grid;
use crate::heightfield::build_height_provider;
use crate::seed::{Stream, stream_rng};
use crate::solution::Solution;
use crate::solver::{SolverKind, build_solver, solve_maze};

#[derive(Clone, Debug)]
pub struct SolvedMaze {
    pub grid: Grid,
    pub solution: Option<Solution>,
    pub seed: u64,
    pub settings: Settings,
}

impl SolvedMaze {
    /// Solves the same grid again with another solver and cost function.
    pub fn resolve_with(
        &self,
        solver: SolverKind,
        cost: CostFunctionKind,
    ) -> Result<Option<Solution>, PipelineError> {
        let cost_fn = build_cost_function(cost, &self.settings.cost)?;
        let solver = build_solver(solver);
        Ok(solve_maze(&self.grid, cost_fn.as_ref(), solver.as_ref())?)
    }

    /// Cost of the stored route under `kind`, without solving again. `None`
    /// when the maze has no route.
    pub fn cost_with(&self, kind: CostFunctionKind) -> Result<Option<f64>, ConfigError> {
        let cost_fn = build_cost_function(kind, &self.settings.cost)?;
        Ok(self.solution.as_ref().map(|solution| solution.cost_with(cost_fn.as_ref())))
    }

    pub fn fingerprint(&self) -> u64 {
        self.grid.fingerprint()
    }
}

/// Fills heights and carves walls for `settings`, without solving.
pub fn build_maze(settings: &Settings, seed: u64) -> Result<Grid, ConfigError> {
    settings.validate()?;

    let mut grid = Grid::new(settings.maze.width, settings.maze.height);

    let mut surface_rng = stream_rng(seed, Stream::Surface);
    let provider = build_height_provider(&settings.surface, &settings.perlin, &mut surface_rng);
    provider.fill(&mut grid, &mut surface_rng);
    if let Some((min, max)) = grid.min_max_height() {
        tracing::debug!(
            target: "heightmaze::surface",
            provider = provider.name(),
            min,
            max,
            "surface.filled"
        );
    }

    let mut carving_rng = stream_rng(seed, Stream::Carving);
    let generator = build_generator(settings.generator.kind);
    generate(&mut grid, generator.as_ref(), settings.generator.loop_probability, &mut carving_rng);
    Ok(grid)
}

pub fn build_solved_maze(settings: &Settings, seed: u64) -> Result<SolvedMaze, PipelineError> {
    let grid = build_maze(settings, seed)?;

    if !settings.solver.kind.is_exact_for(settings.cost.kind) {
        tracing::warn!(
            target: "heightmaze::solver",
            solver = %settings.solver.kind,
            cost = %settings.cost.kind,
            "solver.inexact"
        );
    }

    let cost_fn = build_cost_function(settings.cost.kind, &settings.cost)?;
    let solver = build_solver(settings.solver.kind);
    let solution = solve_maze(&grid, cost_fn.as_ref(), solver.as_ref())?;

    tracing::info!(
        target: "heightmaze::pipeline",
        seed,
        width = grid.width(),
        height = grid.height(),
        generator = %settings.generator.kind,
        solver = %settings.solver.kind,
        cost = %settings.cost.kind,
        fingerprint = grid.fingerprint(),
        total_cost = solution.as_ref().map(Solution::total_cost),
        "pipeline.solved"
    );

    Ok(SolvedMaze { grid, solution, seed, settings: settings.clone() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::HeightProviderKind;

    fn small_settings() -> Settings {
        let mut settings = Settings::default();
        settings.maze.width = 9;
        settings.maze.height = 7;
        settings
    }

    #[test]
    fn default_pipeline_reaches_the_exit() {
        let maze = build_solved_maze(&small_settings(), 31).expect("default settings solve");
        let solution = maze.solution.as_ref().expect("connected mazes have a route");
        assert_eq!(solution.start(), Some(maze.grid.entrance()));
        assert_eq!(solution.goal(), Some(maze.grid.exit()));
        assert!(solution.is_valid_in(&maze.grid));
        assert!(maze.grid.is_fully_connected());
    }

    #[test]
    fn surface_and_carving_streams_are_independent() {
        let mut flat = small_settings();
        flat.surface.kind = HeightProviderKind::Random;
        let mut other = flat.clone();
        other.surface.height_range = 1;

        let a = build_maze(&flat, 5).expect("valid");
        let b = build_maze(&other, 5).expect("valid");
        let walls = |grid: &Grid| grid.cells().iter().map(|cell| cell.walls).collect::<Vec<_>>();
        assert_eq!(walls(&a), walls(&b));
    }

    #[test]
    fn cost_with_matches_a_fresh_solve_for_the_same_function() {
        let maze = build_solved_maze(&small_settings(), 8).expect("solves");
        let stored = maze.solution.as_ref().map(Solution::total_cost);
        let recomputed = maze.cost_with(maze.settings.cost.kind).expect("valid kind");
        match (stored, recomputed) {
            (Some(stored), Some(recomputed)) => assert!((stored - recomputed).abs() < 1e-9),
            other => panic!("expected both costs, got {other:?}"),
        }
    }

    #[test]
    fn resolve_with_constant_cost_counts_hops() {
        let maze = build_solved_maze(&small_settings(), 12).expect("solves");
        let solution = maze
            .resolve_with(SolverKind::BellmanFord, CostFunctionKind::Constant)
            .expect("no negative weights")
            .expect("connected");
        assert_eq!(solution.total_cost(), solution.hop_count() as f64);
    }

    #[test]
    fn invalid_settings_never_reach_the_solver() {
        let mut settings = small_settings();
        settings.generator.loop_probability = 2.0;
        match build_solved_maze(&settings, 1) {
            Err(PipelineError::Config(ConfigError::Invalid { field, .. })) => {
                assert_eq!(field, "generator.loop_probability");
            }
            other => panic!("expected an invalid-config error, got {other:?}"),
        }
    }
}
