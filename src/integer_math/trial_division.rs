// src/integer_math/trial_division.rs

use crate::integer_math::eratosthenes::primes_up_to;
use log::debug;
use num::{BigInt, Zero};

/// Small-prime pre-pass: strip every prime factor up to `ceil(ln N)`
/// from `N`, returning the discovered primes (with multiplicity collapsed to
/// presence) and the residual `N`.
///
/// This is the `Trial` state of the driver's state machine; it exists so the
/// heavy sieve never has to deal with tiny prime factors.
pub fn strip_small_factors(n: &BigInt) -> (Vec<u64>, BigInt) {
    let mut residual = n.clone();
    let mut found = Vec::new();

    if residual <= BigInt::from(1) {
        return (found, residual);
    }

    let bound = small_factor_bound(&residual);
    debug!("trial division pre-pass up to {}", bound);

    for p in primes_up_to(bound) {
        let divisor = BigInt::from(p);
        while !residual.is_zero() && &residual % &divisor == BigInt::zero() {
            residual /= &divisor;
            found.push(p);
            debug!("stripped small factor {}", p);
        }
    }

    (found, residual)
}

/// `ceil(ln N)`, the bound used for the trial-division pre-pass.
///
/// `ln(n) = bits(n) * ln(2)` to within a bounded error from truncating the
/// leading bits; exact enough for a sieve bound.
fn small_factor_bound(n: &BigInt) -> u64 {
    let bits = n.bits() as f64;
    let bound = (bits * std::f64::consts::LN_2).ceil();
    if bound.is_finite() && bound >= 2.0 {
        bound as u64
    } else {
        2
    }
}
