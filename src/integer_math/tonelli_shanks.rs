// src/integer_math/tonelli_shanks.rs

use crate::integer_math::legendre::{pow_mod_u64, reduce_mod_u64, Legendre};
use num::BigInt;

/// Square root of `n` modulo odd prime `p`, assuming `(n | p) = 1`.
///
/// Returns one root `r`; the other root is `p - r`. Callers needing both
/// (the sieve engine does, to walk both residue classes per prime) should
/// call [`roots`] instead.
pub fn tonelli_shanks(n: u64, p: u64) -> u64 {
    if p == 2 {
        return n % 2;
    }

    let n = n % p;
    if n == 0 {
        return 0;
    }

    // Fast path: p = 3 (mod 4) has a closed form.
    if p % 4 == 3 {
        return pow_mod_u64(n, (p + 1) / 4, p);
    }

    // Factor p - 1 = q * 2^s with q odd.
    let mut q = p - 1;
    let mut s = 0u32;
    while q % 2 == 0 {
        q /= 2;
        s += 1;
    }

    // Find a quadratic non-residue z by linear search.
    let mut z = 2u64;
    while legendre_u64(z, p) != -1 {
        z += 1;
    }

    let mut m = s;
    let mut c = pow_mod_u64(z, q, p);
    let mut t = pow_mod_u64(n, q, p);
    let mut r = pow_mod_u64(n, (q + 1) / 2, p);

    loop {
        if t == 1 {
            return r;
        }
        // Find smallest i in (0, m) with t^(2^i) == 1.
        let mut i = 0u32;
        let mut t2i = t;
        while t2i != 1 {
            t2i = pow_mod_u64(t2i, 2, p);
            i += 1;
            if i == m {
                // (n | p) != 1; caller violated the precondition.
                return 0;
            }
        }
        let b = pow_mod_u64(c, 1u64 << (m - i - 1), p);
        m = i;
        c = pow_mod_u64(b, 2, p);
        t = (t as u128 * c as u128 % p as u128) as u64;
        r = (r as u128 * b as u128 % p as u128) as u64;
    }
}

fn legendre_u64(a: u64, p: u64) -> i32 {
    Legendre::symbol_u64(&BigInt::from(a), p)
}

/// Both square roots of `n` mod `p`: `(r, p - r)`, with `r <= p - r`.
pub fn roots(n: &BigInt, p: u64) -> (u64, u64) {
    let residue = reduce_mod_u64(n, p);
    let r = tonelli_shanks(residue, p);
    let other = (p - r) % p;
    if r <= other {
        (r, other)
    } else {
        (other, r)
    }
}
