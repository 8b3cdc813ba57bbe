// src/core/cancellation_token.rs

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// A shareable cooperative-cancellation flag.
///
/// The sieve driver checks `is_cancellation_requested` at sieve-window
/// boundaries; the CLI front-end wires a `ctrlc` SIGINT handler to
/// `cancel()` so a long-running sieve can be stopped between windows instead
/// of mid-computation.
#[derive(Clone)]
pub struct CancellationToken {
    is_cancelled: Arc<Mutex<bool>>,
    condvar: Arc<Condvar>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken {
            is_cancelled: Arc::new(Mutex::new(false)),
            condvar: Arc::new(Condvar::new()),
        }
    }

    pub fn is_cancellation_requested(&self) -> bool {
        *self.is_cancelled.lock().unwrap()
    }

    pub fn cancel(&self) {
        let mut flag = self.is_cancelled.lock().unwrap();
        *flag = true;
        self.condvar.notify_all();
    }

    /// Block the calling thread until cancellation is requested.
    pub fn wait(&self) {
        let mut flag = self.is_cancelled.lock().unwrap();
        while !*flag {
            flag = self.condvar.wait(flag).unwrap();
        }
    }

    /// Spawn a background thread that invokes `callback` once cancellation
    /// is requested. Fire-and-forget; the thread exits after the call.
    pub fn register_callback<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let token = self.clone();
        thread::spawn(move || {
            token.wait();
            callback();
        });
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
