// src/integer_math/legendre.rs

use num::{BigInt, Integer, ToPrimitive};

/// `base^exp mod modulus`, widening through `u128` to avoid overflow when
/// squaring values near `u64::MAX`.
pub fn pow_mod_u64(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result: u128 = 1;
    let mut base = (base as u128) % (modulus as u128);
    let mut exp = exp;
    let modulus = modulus as u128;
    while exp > 0 {
        if exp & 1 == 1 {
            result = (result * base) % modulus;
        }
        exp >>= 1;
        base = (base * base) % modulus;
    }
    result as u64
}

/// `N mod p` reduced into a `u64` residue, for odd prime `p` fitting a
/// machine word. `N` may be of either sign or arbitrary magnitude.
pub fn reduce_mod_u64(n: &BigInt, p: u64) -> u64 {
    let modulus = BigInt::from(p);
    n.mod_floor(&modulus).to_u64().expect("mod_floor residue fits u64")
}

/// Legendre symbol `(n | p)` for odd prime `p`, via Euler's criterion:
/// `n^((p-1)/2) mod p` is 1, p-1, or 0, mapping to +1, -1, 0.
///
/// Returns 0 when `p` divides `n` exactly (an [`crate::qs::factor_base`]
/// `EarlyDivisors` candidate), 1 when `n` is a nonzero quadratic residue mod
/// `p`, and -1 otherwise.
pub struct Legendre;

impl Legendre {
    pub fn symbol_u64(n: &BigInt, p: u64) -> i32 {
        assert!(p > 2, "symbol_u64 is only defined for odd primes");
        let residue = reduce_mod_u64(n, p);
        if residue == 0 {
            return 0;
        }
        let power = pow_mod_u64(residue, (p - 1) / 2, p);
        if power == 1 {
            1
        } else if power == p - 1 {
            -1
        } else {
            // Only possible if p was not actually prime.
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_mod_matches_naive() {
        assert_eq!(pow_mod_u64(2, 10, 1000), 1024 % 1000);
        assert_eq!(pow_mod_u64(7, 0, 13), 1);
    }

    #[test]
    fn known_residues_mod_7() {
        // Quadratic residues mod 7 are {1, 2, 4}.
        assert_eq!(Legendre::symbol_u64(&BigInt::from(1), 7), 1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(2), 7), 1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(4), 7), 1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(3), 7), -1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(5), 7), -1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(6), 7), -1);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(7), 7), 0);
        assert_eq!(Legendre::symbol_u64(&BigInt::from(14), 7), 0);
    }

    #[test]
    fn large_n_mod_small_prime() {
        let n = BigInt::from(8051u64); // 83 * 97
        // 8051 mod 83 == 0
        assert_eq!(Legendre::symbol_u64(&n, 83), 0);
    }
}
