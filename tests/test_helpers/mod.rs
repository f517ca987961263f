//! Scoped environment overrides for integration tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Applies variable overrides until dropped, then restores prior values.
///
/// Holding the guard serializes every test that touches the environment.
pub struct EnvVarGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or clears each listed variable for the guard lifetime.
    pub fn apply(changes: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let before = env::var(key).ok();
                unsafe {
                    // SAFETY: the global mutex serializes environment mutations in tests.
                    match value {
                        Some(next) => env::set_var(key, next),
                        None => env::remove_var(key),
                    }
                }
                (*key, before)
            })
            .collect();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(before) => env::set_var(key, before),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
