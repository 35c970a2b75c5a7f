//! PNG heat map of a solved maze.
//!
//! Cells are shaded by height on a terrain ramp stretched between the lowest
//! and highest cell, walls are drawn in black over the cell borders and the
//! route is a blue band through the cell centers.

use std::array;
use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use maze_core::{Direction, Grid, Pos, Solution};

const WALL: Rgb<u8> = Rgb([0, 0, 0]);
const ROUTE: Rgb<u8> = Rgb([0, 0, 255]);
const WALL_WIDTH: u32 = 2;

// (position, rgb) stops; deep water, shallows, lowland, sand, rock, snow.
const TERRAIN: [(f64, [f64; 3]); 6] = [
    (0.00, [0.2, 0.2, 0.6]),
    (0.15, [0.0, 0.6, 1.0]),
    (0.25, [0.0, 0.8, 0.4]),
    (0.50, [1.0, 1.0, 0.6]),
    (0.75, [0.5, 0.36, 0.33]),
    (1.00, [1.0, 1.0, 1.0]),
];

/// Level used for every cell when the surface is flat.
const FLAT_LEVEL: u8 = 128;

pub fn render_heatmap(
    grid: &Grid,
    solution: Option<&Solution>,
    cell_size: u32,
) -> Result<RgbImage> {
    let width = pixels(grid.width(), cell_size)?;
    let height = pixels(grid.height(), cell_size)?;
    let mut img = RgbImage::new(width, height);
    let Some((min, max)) = grid.min_max_height() else {
        return Ok(img);
    };

    for pos in grid.positions() {
        let (px, py) = origin(pos, cell_size);
        let color = height_color(grid.height_at(pos), min, max);
        fill_rect(&mut img, px, py, cell_size, cell_size, color);
    }
    for pos in grid.positions() {
        draw_walls(&mut img, grid, pos, cell_size);
    }
    if let Some(solution) = solution {
        draw_route(&mut img, grid, solution, cell_size);
    }
    Ok(img)
}

/// Renders the heat map and writes it as PNG, whatever the extension of `path`.
pub fn save_heatmap(
    grid: &Grid,
    solution: Option<&Solution>,
    cell_size: u32,
    path: &Path,
) -> Result<()> {
    let img = render_heatmap(grid, solution, cell_size)?;
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write heat map to {}", path.display()))?;
    tracing::info!(
        target: "heightmaze::image",
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "image.saved"
    );
    Ok(())
}

fn pixels(cells: usize, cell_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(cell_size))
        .with_context(|| format!("{cells} cells of {cell_size}px do not fit in one image"))
}

fn origin(pos: Pos, cell_size: u32) -> (u32, u32) {
    (pos.x as u32 * cell_size, pos.y as u32 * cell_size)
}

fn height_color(height: i32, min: i32, max: i32) -> Rgb<u8> {
    let level = if max == min {
        FLAT_LEVEL
    } else {
        let ratio = (f64::from(height) - f64::from(min)) / (f64::from(max) - f64::from(min));
        (ratio.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    terrain_color(f64::from(level) / 255.0)
}

fn terrain_color(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let upper = TERRAIN
        .iter()
        .position(|&(stop, _)| stop >= t)
        .unwrap_or(TERRAIN.len() - 1)
        .max(1);
    let (t0, low) = TERRAIN[upper - 1];
    let (t1, high) = TERRAIN[upper];
    let f = (t - t0) / (t1 - t0);
    Rgb(array::from_fn(|i| ((low[i] + (high[i] - low[i]) * f) * 255.0).round() as u8))
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(width).min(img.width());
    let y_end = y.saturating_add(height).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_walls(img: &mut RgbImage, grid: &Grid, pos: Pos, cell_size: u32) {
    let (px, py) = origin(pos, cell_size);
    let half = WALL_WIDTH / 2;
    for direction in Direction::ALL {
        if !grid.has_wall(pos, direction) {
            continue;
        }
        let (x, y, width, height) = match direction {
            Direction::North => (px, py.saturating_sub(half), cell_size, WALL_WIDTH),
            Direction::South => (px, py + cell_size - half, cell_size, WALL_WIDTH),
            Direction::West => (px.saturating_sub(half), py, WALL_WIDTH, cell_size),
            Direction::East => (px + cell_size - half, py, WALL_WIDTH, cell_size),
        };
        fill_rect(img, x, y, width, height, WALL);
    }
}

fn draw_route(img: &mut RgbImage, grid: &Grid, solution: &Solution, cell_size: u32) {
    let band = (cell_size / 3).max(1);
    let center = |pos: Pos| {
        let (px, py) = origin(pos, cell_size);
        (px + cell_size / 2, py + cell_size / 2)
    };
    let cells: Vec<Pos> = solution.positions().filter(|&pos| grid.in_bounds(pos)).collect();

    // Steps are axis-aligned, so each one is a single band between two centers.
    if let [only] = cells.as_slice() {
        let (cx, cy) = center(*only);
        let (x, y) = (cx.saturating_sub(band / 2), cy.saturating_sub(band / 2));
        fill_rect(img, x, y, band, band, ROUTE);
    }
    for step in cells.windows(2) {
        let (ax, ay) = center(step[0]);
        let (bx, by) = center(step[1]);
        let x = ax.min(bx).saturating_sub(band / 2);
        let y = ay.min(by).saturating_sub(band / 2);
        fill_rect(img, x, y, ax.abs_diff(bx) + band, ay.abs_diff(by) + band, ROUTE);
    }
}
