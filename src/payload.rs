//! Random payload generation.
//!
//! Payloads are bulk data, not entropy: they exist to put a known number of
//! bytes on the wire. Each caller constructs its own generator so that runs
//! are reproducible when a seed is supplied.

use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Construct a payload generator, seeded from `seed` when given and from
/// system entropy otherwise.
#[must_use]
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Produce a string of exactly `len` characters drawn uniformly from the
/// 62-character alphanumeric alphabet.
pub fn alphanumeric<R>(rng: &mut R, len: usize) -> String
where
    R: Rng + ?Sized,
{
    Alphanumeric.sample_string(rng, len)
}
