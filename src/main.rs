// src/main.rs

use log::{error, info};
use num::BigInt;
use qsieve::config::QsConfig;
use qsieve::core::CancellationToken;
use qsieve::qs::{self, DriverError};
use std::io::{self, Write};
use std::process::ExitCode;
use std::str::FromStr;

fn main() -> ExitCode {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", "info")
        .write_style_or("RUST_LOG_STYLE", "always");
    env_logger::Builder::from_env(env).init();

    let config = QsConfig::load().unwrap_or_else(|err| {
        error!("failed to load configuration, falling back to defaults: {}", err);
        QsConfig::default()
    });

    if let Some(threads) = config.threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }
    info!("using {} worker threads", num_cpus::get());

    let cancel = CancellationToken::new();
    let handler_token = cancel.clone();
    if ctrlc::set_handler(move || {
        info!("interrupt received, stopping at the next sieve-window boundary");
        handler_token.cancel();
    })
    .is_err()
    {
        error!("failed to install SIGINT handler");
    }

    print!("Enter a positive integer to factor: ");
    if io::stdout().flush().is_err() {
        error!("failed to flush stdout");
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        eprintln!("failed to read input");
        return ExitCode::from(DriverError::InputInvalid("failed to read input".to_string()).exit_code() as u8);
    }

    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        eprintln!("input must be a positive decimal integer");
        return ExitCode::from(DriverError::InputInvalid("non-digit input".to_string()).exit_code() as u8);
    }
    if trimmed.len() > config.max_digits {
        eprintln!("input exceeds the configured digit limit of {}", config.max_digits);
        return ExitCode::from(DriverError::InputInvalid("over-long input".to_string()).exit_code() as u8);
    }

    let n = match BigInt::from_str(trimmed) {
        Ok(n) => n,
        Err(_) => {
            eprintln!("input must be a positive decimal integer");
            return ExitCode::from(DriverError::InputInvalid("unparseable input".to_string()).exit_code() as u8);
        }
    };

    match qs::factor(&n, &config, &cancel) {
        Ok(factors) => {
            let line = factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
