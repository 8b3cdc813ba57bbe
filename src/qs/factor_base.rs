// src/qs/factor_base.rs

use crate::integer_math::eratosthenes::primes_up_to;
use crate::integer_math::legendre::Legendre;
use log::debug;
use num::BigInt;
use num::Integer;

/// A single factor-base prime, carrying the `f64` log used by the sieve's
/// residual array alongside the prime itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorBasePrime {
    pub p: u64,
    pub log_p: f64,
}

/// Result of building a factor base for `N` up to bound `b`.
#[derive(Debug, Clone, Default)]
pub struct FactorBase {
    pub primes: Vec<FactorBasePrime>,
    /// Small primes discovered to divide `N` exactly while scanning for
    /// quadratic residues; these short-circuit the sieve entirely.
    pub early_divisors: Vec<u64>,
}

impl FactorBase {
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn primes_u64(&self) -> Vec<u64> {
        self.primes.iter().map(|fp| fp.p).collect()
    }
}

/// Build the factor base for `n` with smoothness bound `b`.
///
/// `2` is always included when `n` is odd (there is no odd square root of an
/// odd residue class issue at `p = 2`; it is simply always eligible). Odd
/// primes are classified by their Legendre symbol against `n`.
pub fn build(n: &BigInt, b: u64) -> FactorBase {
    let mut result = FactorBase::default();
    let candidates = primes_up_to(b);
    debug!("scanning {} candidate primes up to B={}", candidates.len(), b);

    for p in candidates {
        if p == 2 {
            result.primes.push(FactorBasePrime { p, log_p: (2.0f64).ln() });
            continue;
        }

        let symbol = Legendre::symbol_u64(n, p);
        if symbol == 1 {
            result.primes.push(FactorBasePrime { p, log_p: (p as f64).ln() });
        } else if symbol == 0 {
            let divisor = BigInt::from(p);
            if n.mod_floor(&divisor) == BigInt::from(0) {
                result.early_divisors.push(p);
            }
        }
        // symbol == -1: not a quadratic residue, skip entirely.
    }

    debug!(
        "factor base built: {} primes, {} early divisors",
        result.primes.len(),
        result.early_divisors.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_odd_prime_is_a_residue_of_n() {
        let n = BigInt::from(8051u64); // 83 * 97
        let fb = build(&n, 200);
        for fp in &fb.primes {
            if fp.p == 2 {
                continue;
            }
            assert_eq!(Legendre::symbol_u64(&n, fp.p), 1);
        }
    }

    #[test]
    fn early_divisors_are_actual_factors() {
        let n = BigInt::from(8051u64);
        let fb = build(&n, 200);
        for &p in &fb.early_divisors {
            assert_eq!(&n % BigInt::from(p), BigInt::from(0));
        }
        assert!(fb.early_divisors.contains(&83));
        assert!(fb.early_divisors.contains(&97));
    }

    #[test]
    fn includes_two() {
        let n = BigInt::from(15);
        let fb = build(&n, 50);
        assert!(fb.primes.iter().any(|fp| fp.p == 2));
    }
}
