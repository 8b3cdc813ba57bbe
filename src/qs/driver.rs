// src/qs/driver.rs

use crate::bignum::BigInt;
use crate::config::QsConfig;
use crate::core::CancellationToken;
use crate::integer_math::miller_rabin::{is_probably_prime, Verdict};
use crate::integer_math::trial_division::strip_small_factors;
use crate::qs::error::DriverError;
use crate::qs::relation::Relation;
use crate::qs::{factor_base, linalg, sieve, smoothness, solver};
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// Stages of a single factorization run. `Sieving` and `Solving` are folded
/// into one enum value here: `run_sieve_to_solution` loops between growing
/// the window and attempting elimination internally, recovering from a round
/// with no usable dependency or only trivial factors without leaving this
/// stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Pre,
    Trial,
    Probable,
    Sieving,
}

/// Run the full factorization pipeline over `n`, honoring `config` and
/// cooperatively stopping at the next sieve-window boundary once `cancel` is
/// signalled.
pub fn factor(n: &BigInt, config: &QsConfig, cancel: &CancellationToken) -> Result<BTreeSet<BigInt>, DriverError> {
    let mut stage = Stage::Pre;
    let mut factors: BTreeSet<BigInt> = BTreeSet::new();
    let mut residual = n.clone();

    loop {
        match stage {
            Stage::Pre => {
                if residual.bits() as usize > digits_to_bits(config.max_digits) {
                    return Err(DriverError::InputInvalid(format!(
                        "input exceeds configured digit limit of {}",
                        config.max_digits
                    )));
                }
                if residual <= BigInt::from(1) {
                    return Err(DriverError::InputInvalid("input must be greater than 1".to_string()));
                }
                stage = Stage::Trial;
            }

            Stage::Trial => {
                let (found, remainder) = strip_small_factors(&residual);
                for p in found {
                    info!("trial division found small factor {}", p);
                    factors.insert(BigInt::from(p));
                }
                residual = remainder;
                stage = Stage::Probable;
            }

            Stage::Probable => {
                if residual == BigInt::from(1) {
                    return Ok(factors);
                }
                match is_probably_prime(&residual, config.miller_rabin_k, config.miller_rabin_seed) {
                    Verdict::ProbablyPrime => {
                        if factors.is_empty() {
                            if config.exit_on_probable_prime {
                                return Err(DriverError::InputPrime);
                            }
                            warn!("input is probably prime; proceeding into the sieve anyway per configuration");
                        }
                        factors.insert(residual.clone());
                        return Ok(factors);
                    }
                    Verdict::Composite => {
                        stage = Stage::Sieving;
                    }
                }
            }

            Stage::Sieving => {
                let nested = factor_composite(&residual, config, cancel)?;
                factors.extend(nested);
                return Ok(factors);
            }
        }
    }
}

/// Recursively factor a composite cofactor discovered mid-run, reusing the
/// same sieve machinery without re-running trial division or the top-level
/// digit-limit check (the caller already validated those against `n`).
fn factor_composite(n: &BigInt, config: &QsConfig, cancel: &CancellationToken) -> Result<BTreeSet<BigInt>, DriverError> {
    let mut factors = BTreeSet::new();
    let factor = run_sieve_to_solution(n, config, cancel)?;
    let other = n / &factor;
    for part in [factor, other] {
        if part == BigInt::from(1) {
            continue;
        }
        match is_probably_prime(&part, config.miller_rabin_k, config.miller_rabin_seed) {
            Verdict::ProbablyPrime => {
                factors.insert(part);
            }
            Verdict::Composite => {
                let nested = factor_composite(&part, config, cancel)?;
                factors.extend(nested);
            }
        }
    }
    Ok(factors)
}

/// The `Sieving` / `Solving` loop: build the factor base, grow sieve windows
/// until there are enough relations, eliminate, and try every dependency in
/// turn until one yields a non-trivial split of `n`.
fn run_sieve_to_solution(n: &BigInt, config: &QsConfig, cancel: &CancellationToken) -> Result<BigInt, DriverError> {
    let b = smoothness::choose_bound(n, config.b_min);
    info!("chosen smoothness bound B = {}", b);

    if b > u32::MAX as u64 {
        return Err(DriverError::NumericOverflow(format!("smoothness bound {} exceeds supported width", b)));
    }

    let fb = factor_base::build(n, b);
    info!("factor base size = {}, early divisors = {:?}", fb.len(), fb.early_divisors);

    if let Some(&p) = fb.early_divisors.first() {
        return Ok(BigInt::from(p));
    }

    let required = fb.len() + 3;
    let mut relations: Vec<Relation> = Vec::new();
    let mut x0 = sieve::initial_x0(n);
    let mut window_length = config.initial_interval;
    let mut windows_tried: u64 = 0;
    let mut unproductive_streak: u32 = 0;

    loop {
        if cancel.is_cancellation_requested() {
            return Err(DriverError::SieveBudgetExhausted { windows_tried });
        }

        let before = relations.len();
        let mut found = sieve::sieve_window(n, &fb, &x0, window_length);
        relations.append(&mut found);
        x0 += BigInt::from(window_length);
        windows_tried += 1;

        debug!(
            "window {}: +{} relations ({} total, need {})",
            windows_tried,
            relations.len() - before,
            relations.len(),
            required
        );

        if relations.len() == before {
            unproductive_streak += 1;
        } else {
            unproductive_streak = 0;
        }

        if unproductive_streak >= 5 {
            if window_length >= config.max_interval {
                return Err(DriverError::SieveBudgetExhausted { windows_tried });
            }
            window_length = (window_length * 10).min(config.max_interval);
            unproductive_streak = 0;
            info!("growing sieve window to {}", window_length);
        }

        if relations.len() <= required {
            continue;
        }

        // Solving: eliminate and try every dependency until one splits n.
        let rows = relations.iter().map(|r| r.exponents.clone()).collect();
        let matrix = linalg::ParityMatrix::from_rows(rows);
        let dependencies = linalg::eliminate(&matrix);

        for dependency in &dependencies {
            if let Some(factor) = solver::solve(&relations, dependency, n) {
                return Ok(factor);
            }
        }

        debug!("{} dependencies found, none yielded a non-trivial factor; collecting more relations", dependencies.len());
        // OnlyTrivialFactors / NoDependencyYet recovery: loop back to sieve more.
    }
}

fn digits_to_bits(digits: usize) -> usize {
    // log2(10) ~ 3.3219..., rounded up generously so the limit is never
    // stricter than the configured decimal digit count.
    ((digits as f64) * std::f64::consts::LOG2_10).ceil() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> QsConfig {
        QsConfig {
            miller_rabin_seed: Some(42),
            ..QsConfig::default()
        }
    }

    #[test]
    fn factors_small_semiprime_via_trial_division() {
        let token = CancellationToken::new();
        let result = factor(&BigInt::from(15), &config(), &token).unwrap();
        assert_eq!(result, BTreeSet::from([BigInt::from(3), BigInt::from(5)]));
    }

    #[test]
    fn rejects_prime_input() {
        let token = CancellationToken::new();
        let result = factor(&BigInt::from(9_999_999_967u64), &config(), &token);
        assert_eq!(result, Err(DriverError::InputPrime));
    }

    #[test]
    fn factors_medium_semiprime_via_sieve() {
        let token = CancellationToken::new();
        let result = factor(&BigInt::from(8051u64), &config(), &token).unwrap();
        assert_eq!(result, BTreeSet::from([BigInt::from(83), BigInt::from(97)]));
    }
}
