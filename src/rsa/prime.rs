// Prime Generation
// Solovay-Strassen probable primes, the test proposed in the RSA paper

use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::One;
use rand::Rng;
use tracing::{debug, warn};

use super::bigint::{gcd, jacobi, mod_pow, RsaBigInt};
use super::error::{RsaError, RsaResult};

/// Witness rounds a candidate must survive in a row
pub const DEFAULT_PRIMALITY_ROUNDS: u32 = 100;

/// Candidates drawn before giving up on a single prime
pub const DEFAULT_MAX_PRIME_CANDIDATES: u64 = 100_000;

pub enum Primality {
    ProbablyPrime,
    Composite,
}

impl Primality {
    pub fn is_probably_prime(&self) -> bool {
        match self {
            Self::ProbablyPrime => true,
            Self::Composite => false,
        }
    }
}

/// Euler witness check for a single base `a` against odd `b >= 3`.
///
/// Passes when gcd(a, b) = 1 and the Jacobi symbol (a / b), taken mod b,
/// equals a^((b-1)/2) mod b. A prime `b` passes for every coprime `a`;
/// an odd composite fails for at least half of them.
pub fn passes_witness(a: &RsaBigInt, b: &RsaBigInt) -> bool {
    if !gcd(a, b).is_one() {
        return false;
    }

    let euler = mod_pow(a, &((b - 1u8) >> 1), b);
    let symbol = match jacobi(a, b) {
        1 => RsaBigInt::one(),
        -1 => b - 1u8,
        _ => return false,
    };

    euler == symbol
}

/// Draws probable primes from an instance-owned random source
pub struct PrimeGenerator<R> {
    rng: R,
    rounds: u32,
    max_candidates: u64,
}

impl<R: Rng> PrimeGenerator<R> {
    pub fn new(rng: R, rounds: u32, max_candidates: u64) -> Self {
        Self {
            rng,
            rounds,
            max_candidates,
        }
    }

    /// Generate a probable prime with exactly `bit_length` significant bits.
    ///
    /// Each candidate must pass `rounds` consecutive witness checks; any
    /// failure discards it and the count starts over with a fresh candidate.
    pub fn get_prime(&mut self, bit_length: u64) -> RsaResult<RsaBigInt> {
        if bit_length < 2 {
            return Err(RsaError::InvalidBitLength(bit_length));
        }

        for attempt in 1..=self.max_candidates {
            let candidate = self.odd_candidate(bit_length);

            if self.test_candidate(&candidate).is_probably_prime() {
                debug!(bit_length, attempts = attempt, "found probable prime");
                return Ok(candidate);
            }
        }

        warn!(
            bit_length,
            attempts = self.max_candidates,
            "prime generation gave up"
        );
        Err(RsaError::PrimeGenerationTimeout {
            bit_length,
            attempts: self.max_candidates,
        })
    }

    /// Run the configured number of witness rounds against an odd `candidate >= 3`
    pub(crate) fn test_candidate(&mut self, candidate: &RsaBigInt) -> Primality {
        // No witness range below 3
        if *candidate < RsaBigInt::from(3u8) {
            return Primality::Composite;
        }

        for _ in 0..self.rounds {
            // Uniform in [0, candidate)
            let a = self.rng.gen_biguint_below(candidate);

            if !passes_witness(&a, candidate) {
                return Primality::Composite;
            }
        }

        Primality::ProbablyPrime
    }

    /// Random odd integer of exactly `bit_length` bits, redrawn until it fits
    fn odd_candidate(&mut self, bit_length: u64) -> RsaBigInt {
        loop {
            let candidate = self.rng.gen_biguint(bit_length);
            if candidate.bits() == bit_length && candidate.is_odd() {
                return candidate;
            }
        }
    }
}
