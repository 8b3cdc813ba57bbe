use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num::BigInt;
use qsieve::config::QsConfig;
use qsieve::core::CancellationToken;
use qsieve::qs;

fn factor_medium_semiprime(c: &mut Criterion) {
    let n = BigInt::from(16843009u64); // 257 * 65537
    let config = QsConfig {
        miller_rabin_seed: Some(7),
        ..QsConfig::default()
    };

    c.bench_function("factor 16843009", |b| {
        b.iter(|| {
            let cancel = CancellationToken::new();
            qs::factor(black_box(&n), &config, &cancel).unwrap()
        })
    });
}

fn sieve_single_window(c: &mut Criterion) {
    let n = BigInt::from(1_022_117u64); // 1009 * 1013
    let fb = qsieve::qs::factor_base::build(&n, 2000);
    let x0 = qsieve::qs::sieve::initial_x0(&n);

    c.bench_function("sieve window length 10000", |b| {
        b.iter(|| qsieve::qs::sieve::sieve_window(black_box(&n), &fb, &x0, 10_000))
    });
}

criterion_group!(benches, factor_medium_semiprime, sieve_single_window);
criterion_main!(benches);
