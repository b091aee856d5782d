//! Detached background work.
//!
//! Session-expiry redirects run without the caller awaiting them. Browser
//! builds hand them to the JS event loop. Native builds only run them when a
//! local executor was supplied explicitly, since tokio cannot tell whether
//! the current task belongs to a `LocalSet`.

use std::future::Future;
use std::pin::Pin;

/// A boxed, non-`Send` unit future.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs futures on the current thread without waiting for them.
pub trait TaskSpawner {
    /// Starts `task`. Returns false if it was dropped without running.
    fn spawn_detached(&self, task: LocalTask) -> bool;
}

/// Default spawner for the target.
///
/// On WASM this is `wasm_bindgen_futures::spawn_local`. Elsewhere there is
/// no executor to borrow, so tasks are dropped with a `debug` log.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSpawner;

#[cfg(target_arch = "wasm32")]
impl TaskSpawner for DefaultSpawner {
    fn spawn_detached(&self, task: LocalTask) -> bool {
        wasm_bindgen_futures::spawn_local(task);
        true
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TaskSpawner for DefaultSpawner {
    fn spawn_detached(&self, _task: LocalTask) -> bool {
        tracing::debug!("No local executor configured, background task skipped (non-WASM)");
        false
    }
}

/// Spawns onto the enclosing `tokio::task::LocalSet`.
///
/// Only install this when every caller runs inside a `LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioLocalSpawner;

#[cfg(not(target_arch = "wasm32"))]
impl TaskSpawner for TokioLocalSpawner {
    fn spawn_detached(&self, task: LocalTask) -> bool {
        drop(tokio::task::spawn_local(task));
        true
    }
}
