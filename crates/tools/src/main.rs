mod heatmap;
mod render;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::{
    CostFunctionKind, GeneratorKind, HeightProviderKind, Pos, Settings, SolvedMaze, SolverKind,
    build_solved_maze, generate_runtime_seed,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::heatmap::save_heatmap;
use crate::render::render_ascii;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML settings file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Run seed; a fresh one is drawn when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    generator: Option<GeneratorKind>,
    #[arg(long)]
    solver: Option<SolverKind>,
    #[arg(long)]
    cost: Option<CostFunctionKind>,
    #[arg(long)]
    surface: Option<HeightProviderKind>,
    #[arg(long)]
    loop_probability: Option<f64>,
    /// Recompute the found route's cost under these functions
    #[arg(long, num_args = 1..)]
    compare_cost: Vec<CostFunctionKind>,
    /// Draw the maze on stdout
    #[arg(long, overrides_with = "no_console")]
    console: bool,
    #[arg(long, overrides_with = "console")]
    no_console: bool,
    /// Print a JSON report instead of the text summary
    #[arg(long)]
    json: bool,
    /// Write a PNG heat map of the maze to this path
    #[arg(long, value_name = "PATH")]
    image: Option<String>,
    /// Pixels per cell in the heat map
    #[arg(long)]
    cell_size: Option<u32>,
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    fingerprint: String,
    width: usize,
    height: usize,
    generator: GeneratorKind,
    surface: HeightProviderKind,
    solver: SolverKind,
    cost_function: CostFunctionKind,
    total_cost: Option<f64>,
    length: Option<usize>,
    path: Vec<Pos>,
    compared: Vec<ComparedCost>,
}

#[derive(Serialize)]
struct ComparedCost {
    cost_function: CostFunctionKind,
    total_cost: Option<f64>,
}

fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::warn!(
            target: "heightmaze::config",
            path = %path.display(),
            "config.loaded=defaults"
        );
        return Ok(Settings::default());
    }
    Settings::load(path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(width) = args.width {
        settings.maze.width = width;
    }
    if let Some(height) = args.height {
        settings.maze.height = height;
    }
    if let Some(generator) = args.generator {
        settings.generator.kind = generator;
    }
    if let Some(loop_probability) = args.loop_probability {
        settings.generator.loop_probability = loop_probability;
    }
    if let Some(surface) = args.surface {
        settings.surface.kind = surface;
    }
    if let Some(solver) = args.solver {
        settings.solver.kind = solver;
    }
    if let Some(cost) = args.cost {
        settings.cost.kind = cost;
    }
    if args.console {
        settings.visuals.console = true;
    }
    if args.no_console {
        settings.visuals.console = false;
    }
    if args.json {
        settings.visuals.json = true;
    }
    if let Some(filename) = &args.image {
        settings.visuals.image = true;
        settings.visuals.filename = filename.clone();
    }
    if let Some(cell_size) = args.cell_size {
        settings.visuals.cell_size = cell_size;
    }
}

fn compare_costs(maze: &SolvedMaze, kinds: &[CostFunctionKind]) -> Result<Vec<ComparedCost>> {
    kinds
        .iter()
        .map(|&kind| {
            let total_cost = maze
                .cost_with(kind)
                .with_context(|| format!("Failed to build cost function {kind}"))?;
            Ok(ComparedCost { cost_function: kind, total_cost })
        })
        .collect()
}

fn print_summary(maze: &SolvedMaze, settings: &Settings, compared: &[ComparedCost]) {
    match &maze.solution {
        Some(solution) => {
            println!("Solution cost with {}: {}", settings.cost.kind, solution.total_cost());
            println!("Solution length: {}", solution.len());
        }
        None => println!("No solution found."),
    }
    for entry in compared {
        if let Some(total_cost) = entry.total_cost {
            println!("Solution cost with {}: {}", entry.cost_function, total_cost);
        }
    }
    println!("Seed: {}", maze.seed);
    println!("Fingerprint: {:016x}", maze.fingerprint());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    apply_overrides(&mut settings, &args);
    settings.validate().context("Invalid settings after command-line overrides")?;

    let seed = args.seed.unwrap_or_else(generate_runtime_seed);
    let maze = build_solved_maze(&settings, seed)
        .with_context(|| format!("Failed to build and solve maze for seed {seed}"))?;
    let compared = compare_costs(&maze, &args.compare_cost)?;

    if settings.visuals.json {
        let solution = maze.solution.as_ref();
        let report = Report {
            seed,
            fingerprint: format!("{:016x}", maze.fingerprint()),
            width: maze.grid.width(),
            height: maze.grid.height(),
            generator: settings.generator.kind,
            surface: settings.surface.kind,
            solver: settings.solver.kind,
            cost_function: settings.cost.kind,
            total_cost: solution.map(|solution| solution.total_cost()),
            length: solution.map(|solution| solution.len()),
            path: solution.map(|solution| solution.positions().collect()).unwrap_or_default(),
            compared,
        };
        let json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize report JSON")?;
        println!("{json}");
    } else {
        print_summary(&maze, &settings, &compared);
        if settings.visuals.console {
            let color = io::stdout().is_terminal();
            print!("{}", render_ascii(&maze.grid, maze.solution.as_ref(), color));
        }
    }

    if settings.visuals.image {
        let path = Path::new(&settings.visuals.filename);
        save_heatmap(&maze.grid, maze.solution.as_ref(), settings.visuals.cell_size, path)?;
        if !settings.visuals.json {
            println!("Maze image saved as {}", path.display());
        }
    }

    Ok(())
}
