use std::io;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use maze_core::seed::choose;
use maze_core::{
    CostFunctionKind, GeneratorKind, HeightProviderKind, MazeRng, Settings, SolvedMaze,
    SolverKind, build_solved_maze, rng_from_seed,
};
use rand_chacha::rand_core::Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Largest width and height drawn for a run
    #[arg(short, long, default_value_t = 24)]
    max_size: usize,
}

const TOLERANCE: f64 = 1e-9;

fn pick<T: Copy>(rng: &mut MazeRng, items: &[T]) -> Result<T> {
    choose(rng, items).copied().context("Nothing to pick from")
}

fn random_settings(rng: &mut MazeRng, max_size: usize) -> Result<Settings> {
    let mut settings = Settings::default();
    settings.maze.width = 1 + rng.next_u64() as usize % max_size;
    settings.maze.height = 1 + rng.next_u64() as usize % max_size;
    settings.generator.kind = pick(rng, &GeneratorKind::ALL)?;
    settings.generator.loop_probability = (rng.next_u64() % 101) as f64 / 100.0;
    settings.surface.kind =
        pick(rng, &[HeightProviderKind::Random, HeightProviderKind::PerlinNoise])?;
    settings.surface.height_range = 1 + (rng.next_u64() % 12) as u32;
    settings.solver.kind = pick(rng, &SolverKind::ALL)?;
    settings.cost.kind = pick(rng, &CostFunctionKind::ALL)?;
    settings.cost.penalty_threshold = 1 + (rng.next_u64() % 4) as u32;
    Ok(settings)
}

fn resolved_cost(maze: &SolvedMaze, solver: SolverKind, cost: CostFunctionKind) -> Result<f64> {
    let solution = maze
        .resolve_with(solver, cost)
        .with_context(|| format!("{solver} failed under {cost}"))?
        .with_context(|| format!("{solver} found no route under {cost}"))?;
    ensure!(solution.is_valid_in(&maze.grid), "{solver} returned a broken route under {cost}");
    Ok(solution.total_cost())
}

fn check_run(maze: &SolvedMaze) -> Result<()> {
    let grid = &maze.grid;
    ensure!(grid.is_fully_connected(), "Invariant failed: unreachable cells");
    ensure!(grid.walls_are_symmetric(), "Invariant failed: asymmetric walls");

    let Some(solution) = &maze.solution else {
        bail!("Invariant failed: connected maze without a route");
    };
    ensure!(solution.is_valid_in(grid), "Invariant failed: route crosses a wall");
    ensure!(solution.start() == Some(grid.entrance()), "Invariant failed: route start");
    ensure!(solution.goal() == Some(grid.exit()), "Invariant failed: route goal");

    for cost in CostFunctionKind::ALL {
        let reference = resolved_cost(maze, SolverKind::BellmanFord, cost)?;
        for solver in SolverKind::ALL {
            if !solver.is_exact_for(cost) {
                continue;
            }
            let value = resolved_cost(maze, solver, cost)?;
            ensure!(
                (value - reference).abs() < TOLERANCE,
                "Invariant failed: {solver} cost {value} != bellman_ford {reference} under {cost}"
            );
        }
    }

    for cost in CostFunctionKind::ALL {
        let first = maze.cost_with(cost)?;
        let second = maze.cost_with(cost)?;
        ensure!(first == second, "Invariant failed: cost_with({cost}) is not idempotent");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    ensure!(args.max_size > 0, "--max-size must be positive");

    println!("Starting stress run on seed {} for {} mazes...", args.seed, args.runs);
    let mut rng = rng_from_seed(args.seed);

    for run in 0..args.runs {
        let settings = random_settings(&mut rng, args.max_size)?;
        let maze_seed = rng.next_u64();
        let maze = build_solved_maze(&settings, maze_seed)
            .with_context(|| format!("Run {run} (seed {maze_seed}) failed to solve"))?;
        check_run(&maze).with_context(|| {
            format!(
                "Run {run}: seed {maze_seed}, {}x{} {} / {} / {}",
                settings.maze.width,
                settings.maze.height,
                settings.generator.kind,
                settings.solver.kind,
                settings.cost.kind
            )
        })?;
    }

    println!("Stress run completed successfully.");
    Ok(())
}
