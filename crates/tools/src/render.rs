//! Text rendering of a solved maze.
//!
//! Every cell is drawn `cell_width` characters wide, where `cell_width` fits the
//! longest height label in the grid. Cells on the route show their height,
//! centered; with `color` set they are also highlighted with an ANSI
//! background.

use maze_core::{Direction, Grid, Pos, Solution};

const HIGHLIGHT: &str = "\x1b[30;43m";
const RESET: &str = "\x1b[0m";

pub fn render_ascii(grid: &Grid, solution: Option<&Solution>, color: bool) -> String {
    if grid.is_empty() {
        return String::new();
    }

    let mut on_path = vec![false; grid.area()];
    if let Some(solution) = solution {
        for pos in solution.positions().filter(|&pos| grid.in_bounds(pos)) {
            on_path[grid.index(pos)] = true;
        }
    }

    let cell_width = cell_width(grid);
    let mut out = String::new();
    for y in 0..grid.height() {
        horizontal_border(&mut out, grid, y, Direction::North, cell_width);
        for x in 0..grid.width() {
            let pos = Pos::new(x, y);
            out.push(if grid.has_wall(pos, Direction::West) { '|' } else { ' ' });
            if on_path[grid.index(pos)] {
                let label = center(&grid.height_at(pos).to_string(), cell_width);
                if color {
                    out.push_str(HIGHLIGHT);
                    out.push_str(&label);
                    out.push_str(RESET);
                } else {
                    out.push_str(&label);
                }
            } else {
                out.push_str(&" ".repeat(cell_width));
            }
        }
        let last = Pos::new(grid.width() - 1, y);
        out.push(if grid.has_wall(last, Direction::East) { '|' } else { ' ' });
        out.push('\n');
    }
    horizontal_border(&mut out, grid, grid.height() - 1, Direction::South, cell_width);
    out
}

fn horizontal_border(out: &mut String, grid: &Grid, y: usize, side: Direction, width: usize) {
    for x in 0..grid.width() {
        out.push('+');
        let fill = if grid.has_wall(Pos::new(x, y), side) { "-" } else { " " };
        out.push_str(&fill.repeat(width));
    }
    out.push_str("+\n");
}

fn cell_width(grid: &Grid) -> usize {
    grid.cells().iter().map(|cell| cell.height.to_string().len()).max().unwrap_or(1).max(1)
}

fn center(label: &str, width: usize) -> String {
    format!("{label:^width$}")
}

#[cfg(test)]
mod tests {
    use maze_core::Waypoint;

    use super::*;

    fn corridor() -> (Grid, Solution) {
        let mut grid = Grid::new(3, 1);
        grid.set_height(Pos::new(1, 0), -12);
        grid.remove_wall(Pos::new(0, 0), Direction::East);
        grid.remove_wall(Pos::new(1, 0), Direction::East);
        grid.remove_wall(Pos::new(0, 0), Direction::North);
        grid.remove_wall(Pos::new(2, 0), Direction::South);
        let path = grid
            .positions()
            .map(|pos| Waypoint { pos, height: grid.height_at(pos) })
            .collect();
        (grid, Solution::new(path, 0.0))
    }

    #[test]
    fn draws_walls_openings_and_centered_heights() {
        let (grid, solution) = corridor();
        let drawn = render_ascii(&grid, Some(&solution), false);
        let lines: Vec<&str> = drawn.lines().collect();
        assert_eq!(lines, vec!["+   +---+---+", "| 0  -12  0 |", "+---+---+   +"]);
    }

    #[test]
    fn cells_off_the_route_stay_blank() {
        let (grid, _) = corridor();
        let drawn = render_ascii(&grid, None, false);
        assert_eq!(drawn.lines().nth(1), Some("|           |"));
    }

    #[test]
    fn color_wraps_route_cells_in_escape_codes() {
        let (grid, solution) = corridor();
        let drawn = render_ascii(&grid, Some(&solution), true);
        assert_eq!(drawn.matches(HIGHLIGHT).count(), 3);
        assert_eq!(drawn.matches(RESET).count(), 3);
    }

    #[test]
    fn plain_output_carries_no_escape_codes() {
        let (grid, solution) = corridor();
        assert!(!render_ascii(&grid, Some(&solution), false).contains('\x1b'));
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert!(render_ascii(&Grid::new(0, 0), None, true).is_empty());
    }
}
