//! Capacity planning: turn a requested element count into a prime table
//! size that sits midway between two adjacent powers of two.
//!
//! Power-of-two table sizes let low-entropy hash codes (sequential ids,
//! aligned addresses) collapse onto a few buckets under `hash mod capacity`.
//! A prime away from those boundaries spreads them. The sieve runs once per
//! construction; rehash growth does not consult the planner.

use crate::config::SetConfig;
use core::fmt;

/// Reasons a table capacity cannot be produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapacityError {
    /// A zero capacity was requested; `hash mod 0` is undefined.
    ZeroCapacity,
    /// The sieve found no prime in `[lower, upper]`.
    NoPrimeInRange { lower: usize, upper: usize },
    /// The computed capacity does not fit in `usize`.
    CapacityOverflow,
    /// The `SetConfig` was rejected.
    InvalidConfig(&'static str),
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::ZeroCapacity => f.write_str("requested capacity must be non-zero"),
            CapacityError::NoPrimeInRange { lower, upper } => {
                write!(f, "no prime found between {lower} and {upper}")
            }
            CapacityError::CapacityOverflow => f.write_str("capacity overflow"),
            CapacityError::InvalidConfig(why) => write!(f, "invalid set config: {why}"),
        }
    }
}

impl std::error::Error for CapacityError {}

/// Largest sieve bound, and so largest planned capacity, the planner
/// accepts: 2^32 on 64-bit targets, 2^16 on 32-bit ones. Requests that
/// would sieve past it fail with `CapacityError::CapacityOverflow` before
/// anything is allocated.
pub const MAX_SIEVE_BOUND: usize = 1 << (usize::BITS / 2);

/// Plan the table capacity for `requested` elements.
///
/// The request is first scaled by the inverse load factor so the table
/// starts under-loaded. Small requests get `config.min_capacity`; larger
/// ones get the median prime between the enclosing powers of two.
///
/// The cutoff compares the scaled request against `min_capacity - 1`, so a
/// request that scales to exactly that value already goes through the
/// sieve and may come back smaller than `min_capacity` (41 plans to 47
/// under the defaults). Callers must not assume `capacity >= min_capacity`.
pub fn plan(requested: usize, config: &SetConfig) -> Result<usize, CapacityError> {
    config.validate()?;
    if requested == 0 {
        return Err(CapacityError::ZeroCapacity);
    }

    let adjusted = (requested as f64 / config.load_factor).ceil() as usize;
    if adjusted < config.min_capacity.saturating_sub(1) {
        tracing::debug!(requested, adjusted, capacity = config.min_capacity, "planned minimum capacity");
        return Ok(config.min_capacity);
    }

    let lower = highest_power_of_two(adjusted);
    let upper = lower
        .checked_mul(2)
        .ok_or(CapacityError::CapacityOverflow)?;
    if upper > MAX_SIEVE_BOUND {
        return Err(CapacityError::CapacityOverflow);
    }

    let primes = primes_between(lower, upper);
    let capacity = *primes
        .get(primes.len() / 2)
        .ok_or(CapacityError::NoPrimeInRange { lower, upper })?;

    tracing::debug!(
        requested,
        adjusted,
        lower,
        upper,
        candidates = primes.len(),
        capacity,
        "planned prime capacity"
    );
    Ok(capacity)
}

/// All primes `p` with `lower <= p <= upper`, ascending.
///
/// Classic sieve of Eratosthenes over `0..=upper`.
pub fn primes_between(lower: usize, upper: usize) -> Vec<usize> {
    if upper < 2 {
        return Vec::new();
    }
    let mut composite = vec![false; upper + 1];
    let mut primes = Vec::new();
    for i in 2..=upper {
        if composite[i] {
            continue;
        }
        if i >= lower {
            primes.push(i);
        }
        // Multiples below i*i were already marked by smaller primes.
        if let Some(start) = i.checked_mul(i) {
            for multiple in (start..=upper).step_by(i) {
                composite[multiple] = true;
            }
        }
    }
    primes
}

#[inline]
fn highest_power_of_two(n: usize) -> usize {
    debug_assert!(n > 0);
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
