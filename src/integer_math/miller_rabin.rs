// src/integer_math/miller_rabin.rs

use num::{BigInt, Integer, One};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic witness bases sufficient for an exact primality verdict for
/// any `n` fitting under 3,317,044,064,679,887,385,961,981 (Sorenson &
/// Webster), well above `u64::MAX`.
const DETERMINISTIC_WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// `true` if the witness set above is known sufficient for `n` (n fits
/// comfortably under 3.3 * 10^24, which covers every `u64`).
fn fits_deterministic_witnesses(n: &BigInt) -> bool {
    n.bits() <= 64
}

/// Outcome of a Miller-Rabin run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    ProbablyPrime,
    Composite,
}

/// Rabin-Miller probable-primality test with `k` repetitions.
///
/// For `n` that fits in a `u64`, the fixed deterministic witness table above
/// is exact. Above that width, `k` random bases are drawn from a ChaCha RNG
/// seeded by `seed` (or from entropy when `seed` is `None`), so a fixed seed
/// reproduces a fixed verdict for deterministic tests against Carmichael
/// numbers.
pub fn is_probably_prime(n: &BigInt, k: u32, seed: Option<u64>) -> Verdict {
    let two = BigInt::from(2);
    let three = BigInt::from(3);
    if n == &two || n == &three {
        return Verdict::ProbablyPrime;
    }
    if n < &two || n.is_even() {
        return Verdict::Composite;
    }

    let n_minus_one: BigInt = n - 1;
    let mut d = n_minus_one.clone();
    let mut s: u32 = 0;
    while d.is_even() {
        d /= 2;
        s += 1;
    }

    if fits_deterministic_witnesses(n) {
        for &a in DETERMINISTIC_WITNESSES.iter() {
            let base = BigInt::from(a);
            if &base >= n {
                continue;
            }
            if !passes_witness(&base, &d, s, n, &n_minus_one) {
                return Verdict::Composite;
            }
        }
        return Verdict::ProbablyPrime;
    }

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let lower = BigInt::from(2);
    let upper = n - 2;
    for _ in 0..k {
        let base = random_bigint_in_range(&mut rng, &lower, &upper);
        if !passes_witness(&base, &d, s, n, &n_minus_one) {
            return Verdict::Composite;
        }
    }
    Verdict::ProbablyPrime
}

fn passes_witness(base: &BigInt, d: &BigInt, s: u32, n: &BigInt, n_minus_one: &BigInt) -> bool {
    let mut x = base.modpow(d, n);
    if x.is_one() || &x == n_minus_one {
        return true;
    }
    for _ in 1..s {
        x = x.modpow(&BigInt::from(2), n);
        if &x == n_minus_one {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }
    false
}

fn random_bigint_in_range(rng: &mut ChaCha8Rng, lower: &BigInt, upper: &BigInt) -> BigInt {
    let span: BigInt = upper - lower + 1;
    let bits = span.bits() as usize;
    let bytes = bits.div_ceil(8).max(1);
    loop {
        let mut buf = vec![0u8; bytes];
        rng.fill(buf.as_mut_slice());
        let candidate = BigInt::from_bytes_be(num::bigint::Sign::Plus, &buf);
        if candidate < span {
            return lower + candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes_are_prime() {
        for p in [2u64, 3, 5, 7, 11, 13, 9999999967] {
            assert_eq!(is_probably_prime(&BigInt::from(p), 20, Some(1)), Verdict::ProbablyPrime);
        }
    }

    #[test]
    fn small_composites_are_composite() {
        for c in [4u64, 6, 8, 9, 15, 8051, 1_022_117] {
            assert_eq!(is_probably_prime(&BigInt::from(c), 20, Some(1)), Verdict::Composite);
        }
    }

    #[test]
    fn carmichael_number_561_is_composite() {
        // 561 = 3 * 11 * 17, the smallest Carmichael number.
        assert_eq!(is_probably_prime(&BigInt::from(561), 20, Some(42)), Verdict::Composite);
    }

    #[test]
    fn large_carmichael_number_is_composite() {
        // 41041 = 7 * 11 * 13 * 41, a Carmichael number.
        assert_eq!(is_probably_prime(&BigInt::from(41041), 20, Some(7)), Verdict::Composite);
    }

    #[test]
    fn deterministic_with_fixed_seed() {
        let n = BigInt::parse_bytes(b"115792089237316195423570985008687907853269984665640564039457584007913129639937", 10).unwrap();
        let v1 = is_probably_prime(&n, 20, Some(99));
        let v2 = is_probably_prime(&n, 20, Some(99));
        assert_eq!(v1, v2);
    }
}
