// src/qs/sieve.rs

use crate::bignum::isqrt_ceil;
use crate::core::CountDictionary;
use crate::integer_math::legendre::reduce_mod_u64;
use crate::integer_math::tonelli_shanks::roots;
use crate::qs::factor_base::FactorBase;
use crate::qs::relation::Relation;
use log::debug;
use num::{BigInt, Signed, Zero};
use rayon::prelude::*;

/// Residual-sieve over one window `[x0, x0 + length)`.
///
/// Returns every relation the window yielded; the caller (the driver) owns
/// advancing `x0` and deciding when to stop.
pub fn sieve_window(n: &BigInt, factor_base: &FactorBase, x0: &BigInt, length: u64) -> Vec<Relation> {
    let length = length as usize;

    // Step 1: Q_i = (x0 + i)^2 - N, computed in parallel.
    let q_values: Vec<BigInt> = (0..length)
        .into_par_iter()
        .map(|i| {
            let x = x0 + i as u64;
            &x * &x - n
        })
        .collect();

    // Step 2: initial residual is ln|Q_i|.
    let mut logs: Vec<f64> = q_values
        .par_iter()
        .map(|q| if q.is_zero() { f64::NEG_INFINITY } else { ln_bigint_abs(q) })
        .collect();

    // Step 3: subtract log p at every index p divides Q_i. Partition the
    // array into one contiguous chunk per worker so each thread mutates its
    // own slice; stable Rust has no atomic f64, so disjoint chunks are the
    // mechanism, not atomics.
    let num_chunks = rayon::current_num_threads().max(1);
    let chunk_len = length.div_ceil(num_chunks).max(1);

    logs.par_chunks_mut(chunk_len).enumerate().for_each(|(chunk_idx, chunk)| {
        let chunk_start = chunk_idx * chunk_len;
        let chunk_end = (chunk_start + chunk.len()).min(length);
        sieve_chunk(chunk, chunk_start, chunk_end, &q_values, factor_base, x0);
    });

    debug!("sieve window [{}, {}) scanned", x0, x0 + length as u64);

    // Step 4: candidates near zero residual.
    let candidates: Vec<usize> = logs
        .iter()
        .enumerate()
        .filter(|(_, &v)| v < 0.1)
        .map(|(i, _)| i)
        .collect();

    // Step 5: re-verify by full trial division, in parallel.
    candidates
        .into_par_iter()
        .filter_map(|i| verify_candidate(factor_base, x0, i, &q_values[i]))
        .collect()
}

/// Strip every factor-base prime's contribution to `logs[chunk_start..chunk_end]`
/// (expressed as a slice starting at index 0 of `chunk`).
fn sieve_chunk(
    chunk: &mut [f64],
    chunk_start: usize,
    chunk_end: usize,
    q_values: &[BigInt],
    factor_base: &FactorBase,
    x0: &BigInt,
) {
    for fp in &factor_base.primes {
        let p = fp.p;
        if p == 2 {
            for (local, slot) in chunk.iter_mut().enumerate() {
                let i = chunk_start + local;
                if i >= chunk_end {
                    break;
                }
                let mut q = q_values[i].clone();
                if q.is_zero() {
                    continue;
                }
                let mut count = 0u32;
                while (&q % 2) == BigInt::from(0) {
                    q /= 2;
                    count += 1;
                }
                if count > 0 {
                    *slot -= count as f64 * fp.log_p;
                }
            }
            continue;
        }

        let (r1, r2) = roots(x0, p);
        let x0_mod_p = reduce_mod_u64(x0, p);
        let candidate_roots: &[u64] = if r1 == r2 { &[r1] } else { &[r1, r2] };

        for &r in candidate_roots {
            let offset = ((r as i128 - x0_mod_p as i128).rem_euclid(p as i128)) as usize;
            let mut i = offset;
            while i < chunk_start {
                i += p as usize;
            }
            while i < chunk_end {
                let local = i - chunk_start;
                let divisor = BigInt::from(p);
                let mut q = q_values[i].clone();
                let mut count = 0u32;
                while !q.is_zero() && (&q % &divisor) == BigInt::from(0) {
                    q /= &divisor;
                    count += 1;
                }
                if count > 0 {
                    chunk[local] -= count as f64 * fp.log_p;
                }
                i += p as usize;
            }
        }
    }
}

fn verify_candidate(factor_base: &FactorBase, x0: &BigInt, i: usize, q: &BigInt) -> Option<Relation> {
    if q.is_zero() {
        return None;
    }
    let mut residue = q.abs();
    let mut factorization = CountDictionary::new();

    for fp in &factor_base.primes {
        let divisor = BigInt::from(fp.p);
        let mut count = 0u32;
        while !residue.is_zero() && (&residue % &divisor) == BigInt::from(0) {
            residue /= &divisor;
            count += 1;
        }
        if count > 0 {
            factorization.add_count(fp.p, count);
        }
    }

    if residue != BigInt::from(1) {
        return None; // sieve residual was a false positive; not fully smooth
    }

    let x = x0 + i as u64;
    let primes = factor_base.primes_u64();
    Some(Relation::new(x, q.clone(), factorization, &primes))
}

/// `ln|q|` for a (possibly large) nonzero `BigInt`.
fn ln_bigint_abs(q: &BigInt) -> f64 {
    let magnitude = q.abs();
    let bits = magnitude.bits();
    if let Some(f) = num::ToPrimitive::to_f64(&magnitude) {
        if f.is_finite() && f > 0.0 {
            return f.ln();
        }
    }
    let shift = bits.saturating_sub(53);
    let mantissa = &magnitude >> shift;
    let mantissa_f = num::ToPrimitive::to_f64(&mantissa).unwrap_or(1.0).max(1.0);
    mantissa_f.ln() + (shift as f64) * std::f64::consts::LN_2
}

/// Default starting point for the first sieve window: `ceil(sqrt(N))`.
pub fn initial_x0(n: &BigInt) -> BigInt {
    isqrt_ceil(n)
}
