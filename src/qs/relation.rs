// src/qs/relation.rs

use crate::core::CountDictionary;
use bitvec::prelude::*;
use num::{BigInt, Signed};

/// A single sieve relation `(x, Q = x^2 - N)` with `Q` fully factored over
/// the factor base.
#[derive(Debug, Clone)]
pub struct Relation {
    pub x: BigInt,
    pub q: BigInt,
    /// Parity exponent vector: bit 0 is the sign bit of `Q`, bit `1+j` is
    /// `v_{p_j}(|Q|) mod 2` for the j-th factor-base prime.
    pub exponents: BitVec<u8, Lsb0>,
    /// Exact per-prime exponents, for diagnostics and reconstruction.
    pub factorization: CountDictionary,
}

impl Relation {
    /// Build a relation from `x`, `Q`, and its exact factorization over the
    /// `factor_base_primes` ordering. `factorization` must account for every
    /// prime factor of `|Q|`.
    pub fn new(x: BigInt, q: BigInt, factorization: CountDictionary, factor_base_primes: &[u64]) -> Self {
        let mut exponents: BitVec<u8, Lsb0> = BitVec::with_capacity(factor_base_primes.len() + 1);
        exponents.push(q.is_negative());
        for &p in factor_base_primes {
            let exponent = factorization.exponent_of(p);
            exponents.push(exponent % 2 == 1);
        }
        Relation { x, q, exponents, factorization }
    }

    /// `true` iff `Q`'s absolute value factors entirely over the given
    /// factor-base primes (i.e. the exact factorization accounts for it).
    pub fn is_fully_factored(&self) -> bool {
        let mut product = BigInt::from(1);
        for (&prime, &exp) in self.factorization.0.iter() {
            product *= BigInt::from(prime).pow(exp);
        }
        product == self.q.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponents_encode_sign_and_parity() {
        let mut fact = CountDictionary::new();
        fact.add_count(2, 2);
        fact.add_count(3, 1);
        let primes = vec![2, 3, 5];
        let relation = Relation::new(BigInt::from(10), BigInt::from(-12), fact, &primes);
        // sign bit set (Q negative), 2^2 -> even -> 0, 3^1 -> odd -> 1, 5^0 -> 0
        assert_eq!(relation.exponents.len(), 4);
        assert!(relation.exponents[0]);
        assert!(!relation.exponents[1]);
        assert!(relation.exponents[2]);
        assert!(!relation.exponents[3]);
    }

    #[test]
    fn fully_factored_check() {
        let mut fact = CountDictionary::new();
        fact.add_count(2, 2);
        fact.add_count(3, 1);
        let relation = Relation::new(BigInt::from(0), BigInt::from(12), fact, &[2, 3]);
        assert!(relation.is_fully_factored());
    }
}
