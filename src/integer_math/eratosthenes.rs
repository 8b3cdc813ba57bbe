// src/integer_math/eratosthenes.rs

/// All primes `p` with `2 <= p <= bound`, via a plain sieve of Eratosthenes.
///
/// The smoothness bounds this crate works with are modest enough that
/// a single flat bitset sieve is the right tool; no paging is needed.
pub fn primes_up_to(bound: u64) -> Vec<u64> {
    if bound < 2 {
        return Vec::new();
    }
    let bound = bound as usize;
    let mut is_composite = vec![false; bound + 1];
    let mut primes = Vec::new();
    for candidate in 2..=bound {
        if !is_composite[candidate] {
            primes.push(candidate as u64);
            let mut multiple = candidate * candidate;
            while multiple <= bound {
                is_composite[multiple] = true;
                multiple += candidate;
            }
        }
    }
    primes
}
