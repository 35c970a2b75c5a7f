use maze_core::generator::{GeneratorKind, build_generator, generate};
use maze_core::seed::rng_from_seed;
use maze_core::{Direction, Grid, Pos};

fn generated(kind: GeneratorKind, width: usize, height: usize, seed: u64, loops: f64) -> Grid {
    let mut grid = Grid::new(width, height);
    let mut rng = rng_from_seed(seed);
    generate(&mut grid, build_generator(kind).as_ref(), loops, &mut rng);
    grid
}

#[test]
fn test_every_cell_is_reachable_from_the_entrance() {
    for kind in GeneratorKind::ALL {
        for seed in 0..16 {
            let grid = generated(kind, 13, 9, seed, 0.1);
            let reachable = grid.reachable_from(Pos::ORIGIN);
            assert!(reachable.iter().all(|&seen| seen), "{kind} seed {seed}");
        }
    }
}

#[test]
fn test_walls_stay_symmetric_after_loop_injection() {
    for kind in GeneratorKind::ALL {
        for loops in [0.0, 0.25, 0.5, 1.0] {
            let grid = generated(kind, 10, 10, 77, loops);
            for pos in grid.positions() {
                for direction in Direction::ALL {
                    if let Some(next) = grid.neighbor(pos, direction) {
                        assert_eq!(
                            grid.has_wall(pos, direction),
                            grid.has_wall(next, direction.opposite()),
                            "{kind} loops={loops} at {pos:?} {direction:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_only_the_entrance_and_exit_break_the_boundary() {
    for kind in GeneratorKind::ALL {
        let grid = generated(kind, 6, 4, 5, 1.0);
        let mut openings = Vec::new();
        for pos in grid.positions() {
            for direction in Direction::ALL {
                if grid.neighbor(pos, direction).is_none() && !grid.has_wall(pos, direction) {
                    openings.push((pos, direction));
                }
            }
        }
        assert_eq!(
            openings,
            vec![(Pos::new(0, 0), Direction::North), (Pos::new(5, 3), Direction::South)],
            "{kind}"
        );
    }
}

#[test]
fn test_degenerate_shapes_still_connect() {
    for kind in GeneratorKind::ALL {
        for (width, height) in [(1, 1), (1, 12), (12, 1)] {
            let grid = generated(kind, width, height, 3, 0.0);
            assert!(grid.is_fully_connected(), "{kind} {width}x{height}");
            assert_eq!(grid.passage_count(), width * height - 1);
        }
    }
}

#[test]
fn test_generation_leaves_heights_alone() {
    let mut grid = Grid::new(5, 5);
    for pos in grid.positions() {
        grid.set_height(pos, (pos.x * 3) as i32 - pos.y as i32);
    }
    let before: Vec<i32> = grid.cells().iter().map(|cell| cell.height).collect();
    let mut rng = rng_from_seed(44);
    generate(&mut grid, build_generator(GeneratorKind::Kruskal).as_ref(), 0.3, &mut rng);
    let after: Vec<i32> = grid.cells().iter().map(|cell| cell.height).collect();
    assert_eq!(before, after);
}
