use maze_core::{
    CostFunctionKind, GeneratorKind, HeightProviderKind, Settings, SolverKind, build_solved_maze,
};

fn settings(width: usize, height: usize) -> Settings {
    let mut settings = Settings::default();
    settings.maze.width = width;
    settings.maze.height = height;
    settings
}

#[test]
fn test_fixed_seed_reproduces_grid_and_cost() {
    for kind in GeneratorKind::ALL {
        let mut config = settings(15, 11);
        config.generator.kind = kind;
        let first = build_solved_maze(&config, 2024).expect("first run");
        let second = build_solved_maze(&config, 2024).expect("second run");
        assert_eq!(first.fingerprint(), second.fingerprint(), "{kind}");
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.solution, second.solution);
    }
}

#[test]
fn test_different_seeds_produce_different_mazes() {
    let config = settings(15, 11);
    let first = build_solved_maze(&config, 1).expect("first run");
    let second = build_solved_maze(&config, 2).expect("second run");
    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[test]
fn test_five_by_five_dfs_constant_scenario() {
    let mut config = settings(5, 5);
    config.generator.kind = GeneratorKind::Dfs;
    config.cost.kind = CostFunctionKind::Constant;

    for solver in SolverKind::ALL {
        config.solver.kind = solver;
        for seed in 0..8 {
            let maze = build_solved_maze(&config, seed).expect("constant costs never cycle");
            let solution = maze.solution.expect("dfs mazes are connected");
            assert_eq!(solution.start(), Some(maze.grid.entrance()));
            assert_eq!(solution.goal(), Some(maze.grid.exit()));
            assert_eq!(solution.total_cost(), (solution.len() - 1) as f64);
            assert!(solution.is_valid_in(&maze.grid));
        }
    }
}

#[test]
fn test_negative_capable_solvers_agree_on_linear_and_nonlinear_costs() {
    let mut config = settings(12, 9);
    config.surface.kind = HeightProviderKind::Random;
    for cost in [CostFunctionKind::Linear, CostFunctionKind::NonLinear] {
        config.cost.kind = cost;
        let maze = build_solved_maze(&config, 404).expect("solves");
        let reference = maze
            .resolve_with(SolverKind::BellmanFord, cost)
            .expect("no negative cycle")
            .expect("connected")
            .total_cost();
        for solver in [SolverKind::Spfa, SolverKind::Johnson] {
            let value = maze
                .resolve_with(solver, cost)
                .expect("no negative cycle")
                .expect("connected")
                .total_cost();
            assert!((value - reference).abs() < 1e-9, "{solver} {cost}: {value} vs {reference}");
        }
    }
}

#[test]
fn test_cost_with_recomputes_without_changing_the_solution() {
    let maze = build_solved_maze(&settings(10, 10), 17).expect("solves");
    let before = maze.solution.clone();
    let first = maze.cost_with(CostFunctionKind::Tanh).expect("valid kind");
    let second = maze.cost_with(CostFunctionKind::Tanh).expect("valid kind");
    assert_eq!(first, second);
    assert_eq!(maze.solution, before);
}
