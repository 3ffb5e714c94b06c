//! Thread-safe engine handle.
//!
//! [`SharedEngine`] guards an [`Engine`] with one mutex. Each call to
//! [`SharedEngine::with`] is a single critical section, so multi-lookup
//! operations such as `rgb_combine` see a consistent store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::Engine;

/// Cloneable, lock-guarded [`Engine`].
///
/// # Example
///
/// ```rust
/// use ime_engine::{Engine, SharedEngine};
///
/// let shared = SharedEngine::new(Engine::new());
/// let worker = shared.clone();
/// std::thread::spawn(move || {
///     worker.with(|e| e.put_raw_image("px", 1, 1, 255, &[[1, 2, 3]]).map(|_| ()))
/// })
/// .join()
/// .unwrap()
/// .unwrap();
/// assert!(shared.with(|e| e.store().contains("px")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    /// Wraps `engine`.
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    // Operations never leave the store half-written, so a poisoned lock is
    // still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_writers() {
        let shared = SharedEngine::default();
        shared.with(|e| e.put_raw_image("src", 2, 1, 255, &[[10, 10, 10], [20, 20, 20]]).map(|_| ())).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.with(|e| e.brighten(i, "src", &format!("out{i}")))
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }

        shared.with(|e| {
            assert_eq!(e.store().len(), 9);
            assert_eq!(e.get_raw_image("out7").unwrap().pixels[1], [27, 27, 27]);
        });
    }
}
