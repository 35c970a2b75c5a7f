//! Seed mixing and random-draw helpers shared by every randomized stage.
//! Stages never reach for a global generator; they receive a [`MazeRng`]
//! derived from the run seed so a fixed seed replays a whole run.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub type MazeRng = ChaCha8Rng;

/// Independent draw streams carved out of one run seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Surface,
    Carving,
}

impl Stream {
    fn code(self) -> u64 {
        match self {
            Self::Surface => 0x5355_5246,
            Self::Carving => 0x4341_5256,
        }
    }
}

pub fn rng_from_seed(seed: u64) -> MazeRng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn stream_rng(seed: u64, stream: Stream) -> MazeRng {
    rng_from_seed(mix_seed_stream(seed, stream.code()))
}

pub fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Seed for runs where the caller did not pick one.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed_stream(entropy, 0x9E37_79B9_7F4A_7C15)
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn random_index(rng: &mut MazeRng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Uniform draw from `[0, 1)` with 53 bits of precision.
pub fn unit_interval(rng: &mut MazeRng) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
}

/// Uniform draw from `[low, high)`.
pub fn uniform_range(rng: &mut MazeRng, low: f64, high: f64) -> f64 {
    low + unit_interval(rng) * (high - low)
}

pub fn shuffle<T>(rng: &mut MazeRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = random_index(rng, i + 1);
        items.swap(i, j);
    }
}

pub fn choose<'a, T>(rng: &mut MazeRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random_index(rng, items.len()))
}
