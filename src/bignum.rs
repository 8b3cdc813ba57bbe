//! Arbitrary-precision integer type used throughout the sieve.
//!
//! The factor base and sieve interior run on `u64` since sieve primes are
//! bounded well below a machine word even for
//! 100-digit `N`. `BigInt` only has to carry `N` itself, relation values
//! `x`/`Q`, and the congruence-of-squares arithmetic in the solver, so a thin
//! re-export of `num::BigInt` is all this layer needs to be.

pub use num::BigInt;
pub use num::BigUint;

use num::{Integer, Signed};

/// Largest integer `r >= 0` with `r * r <= n`, for `n >= 0`.
///
/// `num::integer::Roots::sqrt` already implements Newton's method for
/// arbitrary-precision integers; this wrapper just pins the name used by the
/// rest of the crate and documents the non-negativity precondition.
pub fn isqrt(n: &BigInt) -> BigInt {
    assert!(!n.is_negative(), "isqrt is undefined for negative input");
    let (_, magnitude) = n.clone().into_parts();
    let root = num::integer::Roots::sqrt(&magnitude);
    BigInt::from(root)
}

/// Ceiling of the integer square root: smallest `r` with `r * r >= n`.
pub fn isqrt_ceil(n: &BigInt) -> BigInt {
    let floor = isqrt(n);
    if &floor * &floor == *n {
        floor
    } else {
        floor + 1
    }
}

/// `true` iff `n` is a perfect square.
pub fn is_perfect_square(n: &BigInt) -> bool {
    if n.is_negative() {
        return false;
    }
    let r = isqrt(n);
    &r * &r == *n
}

/// `gcd(a, b)`, always non-negative, matching `num::Integer::gcd`.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Reduce `n` into the symmetric-free non-negative residue class mod `m`.
pub fn mod_floor(n: &BigInt, m: &BigInt) -> BigInt {
    n.mod_floor(m)
}
