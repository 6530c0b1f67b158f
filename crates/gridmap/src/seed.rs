//! Seeded generator construction and bounded draws used by the walk and the jitter pass.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Seed used when a configuration does not name one, so unseeded maps are reproducible.
pub const DEFAULT_SEED: u32 = 5489;

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform draw in `[min_value, max_value]`.
pub(crate) fn random_u32(rng: &mut ChaCha8Rng, min_value: u32, max_value: u32) -> u32 {
    debug_assert!(min_value <= max_value);
    let range_size = u64::from(max_value - min_value) + 1;
    min_value + (rng.next_u64() % range_size) as u32
}

/// Uniform draw in `[min_value, max_value]`.
pub(crate) fn random_i32(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value)) as u64 + 1;
    (i64::from(min_value) + (rng.next_u64() % range_size) as i64) as i32
}

/// Uniform draw in `[min_value, max_value)` built from the top 53 bits of one output word.
pub(crate) fn random_f64(rng: &mut ChaCha8Rng, min_value: f64, max_value: f64) -> f64 {
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    min_value + unit * (max_value - min_value)
}

/// Fresh seed drawn from wall-clock time, process id and a call counter.
pub fn runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
