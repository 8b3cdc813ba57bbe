// src/qs/solver.rs

use crate::bignum::{gcd, is_perfect_square, isqrt};
use crate::qs::relation::Relation;
use bitvec::prelude::*;
use num::{BigInt, Integer, Signed};

/// Attempt to extract a non-trivial factor of `n` from a dependency mask
/// over `relations`.
///
/// `B = product(x_i) mod N`; `A = isqrt(product(Q_i))`, exact since the
/// product is a perfect square by construction of the dependency. Returns
/// `gcd(B - A, N)` when non-trivial, else `gcd(B + A, N)`, else `None`.
pub fn solve(relations: &[Relation], dependency: &BitSlice<u8, Lsb0>, n: &BigInt) -> Option<BigInt> {
    let mut b = BigInt::from(1);
    let mut q_product = BigInt::from(1);

    for (i, bit) in dependency.iter().enumerate() {
        if !*bit {
            continue;
        }
        let relation = &relations[i];
        b = (&b * &relation.x).mod_floor(n);
        q_product *= &relation.q;
    }

    let q_abs = q_product.abs();
    debug_assert!(is_perfect_square(&q_abs), "dependency product must be a perfect square");
    let a = isqrt(&q_abs);

    let candidate = gcd(&(&b - &a), n);
    if is_nontrivial(&candidate, n) {
        return Some(candidate);
    }

    let candidate = gcd(&(&b + &a), n);
    if is_nontrivial(&candidate, n) {
        return Some(candidate);
    }

    None
}

fn is_nontrivial(f: &BigInt, n: &BigInt) -> bool {
    f > &BigInt::from(1) && f < n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CountDictionary;

    fn relation(x: i64, q: i64) -> Relation {
        Relation::new(BigInt::from(x), BigInt::from(q), CountDictionary::new(), &[])
    }

    #[test]
    fn single_relation_recovers_nontrivial_sqrt_of_one() {
        // n = 143 = 11 * 13; x = 12 gives Q = 12^2 - 143 = 1, a perfect
        // square, and 12 is a nontrivial square root of 1 mod 143.
        let relations = vec![relation(12, 1)];
        let dep = bitvec![u8, Lsb0; 1];
        let n = BigInt::from(143);
        assert_eq!(solve(&relations, &dep, &n), Some(BigInt::from(11)));
    }

    #[test]
    fn repeated_relation_gives_only_a_trivial_congruence() {
        // Taking the same relation twice makes B = x^2 mod n = A exactly,
        // so B - A = 0 (gcd = n) and B + A = 2 (coprime to n): no factor.
        let relations = vec![relation(12, 1), relation(12, 1)];
        let dep = bitvec![u8, Lsb0; 1, 1];
        let n = BigInt::from(143);
        assert!(solve(&relations, &dep, &n).is_none());
    }
}
