//! Height synthesis for the maze surface.
//! Providers only write cell heights; walls are left untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{PerlinSettings, SurfaceSettings, normalize_variant};
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::seed::{MazeRng, shuffle, uniform_range};

pub trait HeightProvider: fmt::Debug {
    fn name(&self) -> &'static str;

    fn fill(&self, grid: &mut Grid, rng: &mut MazeRng);
}

/// Independent uniform heights in `[-height_range, height_range]`.
#[derive(Clone, Copy, Debug)]
pub struct UniformHeights {
    height_range: u32,
}

impl UniformHeights {
    pub fn new(height_range: u32) -> Self {
        Self { height_range }
    }
}

impl HeightProvider for UniformHeights {
    fn name(&self) -> &'static str {
        "random"
    }

    fn fill(&self, grid: &mut Grid, rng: &mut MazeRng) {
        let range = f64::from(self.height_range);
        for pos in grid.positions() {
            grid.set_height(pos, quantize(uniform_range(rng, -1.0, 1.0), range));
        }
    }
}

/// Multi-octave gradient noise over a permutation table shuffled once at
/// construction. Two instances built from different draws give different
/// surfaces; one instance always answers the same for the same cell.
#[derive(Clone)]
pub struct PerlinHeights {
    scale: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    height_range: u32,
    permutation: [u8; 512],
}

impl fmt::Debug for PerlinHeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerlinHeights")
            .field("scale", &self.scale)
            .field("octaves", &self.octaves)
            .field("persistence", &self.persistence)
            .field("lacunarity", &self.lacunarity)
            .field("height_range", &self.height_range)
            .finish_non_exhaustive()
    }
}

impl PerlinHeights {
    pub fn new(params: &PerlinSettings, height_range: u32, rng: &mut MazeRng) -> Self {
        let mut base = [0_u8; 256];
        for (value, slot) in base.iter_mut().enumerate() {
            *slot = value as u8;
        }
        shuffle(rng, &mut base);

        let mut permutation = [0_u8; 512];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = base[i & 255];
        }

        Self {
            scale: params.scale,
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            height_range,
            permutation,
        }
    }

    fn amplitude_sum(&self) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        for _ in 0..self.octaves {
            total += amplitude;
            amplitude *= self.persistence;
        }
        total
    }

    /// Octave sum at a cell, normalized to roughly `[-1, 1]`.
    pub fn sample(&self, x: usize, y: usize) -> f64 {
        let max_amplitude = self.amplitude_sum();
        if max_amplitude == 0.0 {
            return 0.0;
        }

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            let sample_x = (x as f64 / self.scale) * frequency;
            let sample_y = (y as f64 / self.scale) * frequency;
            total += self.noise(sample_x, sample_y) * amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total / max_amplitude
    }

    fn perm(&self, index: usize) -> usize {
        usize::from(self.permutation[index])
    }

    fn noise(&self, x: f64, y: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;

        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let aa = self.perm(self.perm(xi) + yi);
        let ab = self.perm(self.perm(xi) + yi + 1);
        let ba = self.perm(self.perm(xi + 1) + yi);
        let bb = self.perm(self.perm(xi + 1) + yi + 1);

        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }
}

impl HeightProvider for PerlinHeights {
    fn name(&self) -> &'static str {
        "perlin_noise"
    }

    fn fill(&self, grid: &mut Grid, _rng: &mut MazeRng) {
        let range = f64::from(self.height_range);
        for pos in grid.positions() {
            grid.set_height(pos, quantize(self.sample(pos.x, pos.y), range));
        }
    }
}

/// Scales a sample in `[-1, 1]` to `[-range, range]`. Halfway values round
/// away from zero, so `-2.5` becomes `-3` and the surface stays symmetric.
fn quantize(sample: f64, range: f64) -> i32 {
    (sample * range).round() as i32
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let u = if h < 4 { x } else { y };
    let v = if h < 4 { y } else { x };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum HeightProviderKind {
    Random,
    PerlinNoise,
}

impl HeightProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::PerlinNoise => "perlin_noise",
        }
    }
}

impl fmt::Display for HeightProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeightProviderKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_variant(value).as_str() {
            "random" | "uniform" => Ok(Self::Random),
            "perlin_noise" | "perlin" => Ok(Self::PerlinNoise),
            _ => Err(ConfigError::UnknownVariant {
                kind: "height provider",
                value: value.to_string(),
                expected: "random, perlin_noise",
            }),
        }
    }
}

impl TryFrom<String> for HeightProviderKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn build_height_provider(
    surface: &SurfaceSettings,
    perlin: &PerlinSettings,
    rng: &mut MazeRng,
) -> Box<dyn HeightProvider> {
    match surface.kind {
        HeightProviderKind::Random => Box::new(UniformHeights::new(surface.height_range)),
        HeightProviderKind::PerlinNoise => {
            Box::new(PerlinHeights::new(perlin, surface.height_range, rng))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::rng_from_seed;
    use crate::types::Direction;

    fn perlin(rng: &mut MazeRng) -> PerlinHeights {
        PerlinHeights::new(&PerlinSettings::default(), 10, rng)
    }

    #[test]
    fn halfway_samples_round_away_from_zero() {
        assert_eq!(quantize(-0.25, 10.0), -3);
        assert_eq!(quantize(0.25, 10.0), 3);
        assert_eq!(quantize(-0.24, 10.0), -2);
        assert_eq!(quantize(1.0, 10.0), 10);
    }

    #[test]
    fn fade_is_smooth_at_the_ends() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
        let mut previous = 0.0;
        for step in 1..=100 {
            let value = fade(f64::from(step) / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn permutation_is_a_duplicated_shuffle() {
        let mut rng = rng_from_seed(5);
        let heights = perlin(&mut rng);
        let mut seen = [false; 256];
        for value in &heights.permutation[..256] {
            seen[usize::from(*value)] = true;
        }
        assert!(seen.iter().all(|&present| present));
        assert_eq!(heights.permutation[..256], heights.permutation[256..]);
    }

    #[test]
    fn noise_vanishes_on_lattice_points() {
        let mut rng = rng_from_seed(11);
        let heights = perlin(&mut rng);
        for x in 0..4 {
            for y in 0..4 {
                assert_eq!(heights.noise(f64::from(x), f64::from(y)), 0.0);
            }
        }
    }

    #[test]
    fn perlin_fill_is_stable_for_one_instance() {
        let mut rng = rng_from_seed(21);
        let heights = perlin(&mut rng);
        let mut first = Grid::new(12, 9);
        let mut second = Grid::new(12, 9);
        heights.fill(&mut first, &mut rng);
        heights.fill(&mut second, &mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn perlin_heights_stay_within_range() {
        let mut rng = rng_from_seed(3);
        let heights = perlin(&mut rng);
        let mut grid = Grid::new(30, 30);
        heights.fill(&mut grid, &mut rng);
        let (min, max) = grid.min_max_height().expect("non-empty grid");
        assert!(min >= -10 && max <= 10, "heights {min}..{max} escaped the range");
    }

    #[test]
    fn uniform_heights_cover_the_range_without_touching_walls() {
        let mut rng = rng_from_seed(8);
        let mut grid = Grid::new(40, 40);
        UniformHeights::new(3).fill(&mut grid, &mut rng);
        let (min, max) = grid.min_max_height().expect("non-empty grid");
        assert!(min >= -3 && max <= 3);
        assert!(min < 0 && max > 0);
        for pos in grid.positions() {
            assert!(Direction::ALL.into_iter().all(|direction| grid.has_wall(pos, direction)));
        }
    }

    #[test]
    fn provider_kinds_parse_original_spellings() {
        assert_eq!(
            "PERLIN_NOISE".parse::<HeightProviderKind>().ok(),
            Some(HeightProviderKind::PerlinNoise)
        );
        assert_eq!("Random".parse::<HeightProviderKind>().ok(), Some(HeightProviderKind::Random));
        assert!("simplex".parse::<HeightProviderKind>().is_err());
    }
}
