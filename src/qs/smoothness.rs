// src/qs/smoothness.rs

use num::BigInt;

/// Choose the smoothness bound `B` for `n`:
/// `B = max(b_min, floor(exp(0.5 * sqrt(ln N * ln ln N))))`.
pub fn choose_bound(n: &BigInt, b_min: u64) -> u64 {
    let ln_n = ln_bigint(n);
    let lnln_n = ln_n.ln();
    let exponent = 0.5 * (ln_n * lnln_n).sqrt();
    let bound = exponent.exp().floor();

    if !bound.is_finite() || bound < b_min as f64 {
        b_min
    } else {
        bound as u64
    }
}

/// `ln(n)` for a positive `BigInt`, via `bits(n) * ln(2)` plus a correction
/// from the leading 53 bits, giving `f64`-grade precision without needing an
/// exact-to-string round trip for 100-digit inputs.
fn ln_bigint(n: &BigInt) -> f64 {
    let bits = n.bits();
    if bits <= 1023 {
        // Small enough that a direct f64 conversion is exact enough.
        if let Some(f) = num::ToPrimitive::to_f64(n) {
            if f.is_finite() && f > 0.0 {
                return f.ln();
            }
        }
    }
    // Fall back to the mantissa-shift trick for very large n: ln(n) =
    // ln(mantissa) + (bits - mantissa_bits) * ln(2).
    let shift = bits.saturating_sub(53);
    let mantissa = n >> shift;
    let mantissa_f = num::ToPrimitive::to_f64(&mantissa).unwrap_or(1.0).max(1.0);
    mantissa_f.ln() + (shift as f64) * std::f64::consts::LN_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_respects_minimum() {
        let n = BigInt::from(15);
        assert_eq!(choose_bound(&n, 1000), 1000);
    }

    #[test]
    fn bound_grows_with_n() {
        let small = choose_bound(&BigInt::from(8051u64), 2);
        let large = BigInt::parse_bytes(b"1000000000000000000000000000000000000000000000061", 10).unwrap();
        let large_bound = choose_bound(&large, 2);
        assert!(large_bound >= small);
    }

    #[test]
    fn ln_bigint_matches_f64_ln_for_small_values() {
        let n = BigInt::from(1_000_000u64);
        let approx = ln_bigint(&n);
        assert!((approx - (1_000_000f64).ln()).abs() < 1e-6);
    }
}
