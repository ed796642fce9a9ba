// crates/geodb-core/src/cache.rs

//! # Dataset Cache
//!
//! Owns the lifecycle of the in-memory dataset:
//!
//! ```text
//! Uninitialized --ensure_ready--> Building --ok--> Ready (terminal)
//!                                    |
//!                                    +--err--> Uninitialized (next call retries)
//! ```
//!
//! One build runs at a time. Callers that arrive while it is in flight
//! await the same shared future and see the same index or the same error.
//! The build itself runs in a detached task, so a caller that gets
//! cancelled half-way never leaves the state machine half-advanced.

use crate::error::{BuildError, LoadError};
use crate::index::GeoIndex;
use crate::loader::FileSource;
use crate::traits::DatasetSource;
use futures::future::{BoxFuture, FutureExt, Shared};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{error, info};

type BuildOutcome = Result<Arc<GeoIndex>, BuildError>;
type BuildFuture = Shared<BoxFuture<'static, BuildOutcome>>;

/// Observable lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheState {
    Uninitialized,
    Building,
    Ready,
}

enum Slot {
    Idle,
    Building { attempt: u64, build: BuildFuture },
}

struct Inner {
    source: Arc<dyn DatasetSource>,
    // Set exactly once; readers never take the lock after that.
    ready: OnceCell<Arc<GeoIndex>>,
    slot: Mutex<Slot>,
    attempts: AtomicU64,
}

/// Lazily built, shared dataset. Cheap to clone; clones share one cache.
#[derive(Clone)]
pub struct DatasetCache {
    inner: Arc<Inner>,
}

enum Ticket {
    Ready(Arc<GeoIndex>),
    Wait { attempt: u64, build: BuildFuture },
}

impl DatasetCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        DatasetCache {
            inner: Arc::new(Inner {
                source,
                ready: OnceCell::new(),
                slot: Mutex::new(Slot::Idle),
                attempts: AtomicU64::new(0),
            }),
        }
    }

    /// Cache over a JSON (or `.json.gz`) dataset file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSource::new(path)))
    }

    pub fn state(&self) -> CacheState {
        if self.inner.ready.get().is_some() {
            return CacheState::Ready;
        }
        let slot = self.inner.lock_slot();
        // Re-check under the lock: `settle` publishes before going idle.
        if self.inner.ready.get().is_some() {
            return CacheState::Ready;
        }
        match *slot {
            Slot::Idle => CacheState::Uninitialized,
            Slot::Building { .. } => CacheState::Building,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.get().is_some()
    }

    /// The built index, without triggering a build.
    pub fn peek(&self) -> Option<Arc<GeoIndex>> {
        self.inner.ready.get().cloned()
    }

    /// Country records held once Ready, 0 before.
    pub fn countries_count(&self) -> usize {
        self.inner.ready.get().map_or(0, |index| index.len())
    }

    /// How many builds have been started over the cache's lifetime.
    pub fn build_attempts(&self) -> u64 {
        self.inner.attempts.load(Ordering::SeqCst)
    }

    /// Returns the index, building it first if needed.
    ///
    /// Must be called from within a tokio runtime: the build runs on the
    /// blocking pool.
    pub async fn ensure_ready(&self) -> Result<Arc<GeoIndex>, BuildError> {
        if let Some(index) = self.inner.ready.get() {
            return Ok(Arc::clone(index));
        }

        match self.join_or_start() {
            Ticket::Ready(index) => Ok(index),
            Ticket::Wait { attempt, build } => {
                let outcome = build.await;
                // Normally the build task already settled; this covers a
                // task that died before it could.
                self.inner.settle(attempt, &outcome);
                outcome
            }
        }
    }

    fn join_or_start(&self) -> Ticket {
        let mut slot = self.inner.lock_slot();

        if let Some(index) = self.inner.ready.get() {
            return Ticket::Ready(Arc::clone(index));
        }
        if let Slot::Building { attempt, build } = &*slot {
            return Ticket::Wait {
                attempt: *attempt,
                build: build.clone(),
            };
        }

        let attempt = self.inner.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let source = Arc::clone(&inner.source);
            let outcome = match tokio::task::spawn_blocking(move || build_index(source.as_ref(), attempt)).await {
                Ok(result) => result.map(Arc::new).map_err(Arc::new),
                Err(join) => Err(Arc::new(LoadError::Interrupted(join.to_string()))),
            };
            inner.settle(attempt, &outcome);
            outcome
        });

        let build = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(join) => Err(Arc::new(LoadError::Interrupted(join.to_string()))),
            }
        }
        .boxed()
        .shared();

        *slot = Slot::Building {
            attempt,
            build: build.clone(),
        };
        Ticket::Wait { attempt, build }
    }
}

impl Inner {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        // The slot holds no invariant a panic could break halfway.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Installs the outcome of build `attempt`, once.
    fn settle(&self, attempt: u64, outcome: &BuildOutcome) {
        let mut slot = self.lock_slot();
        let current = matches!(&*slot, Slot::Building { attempt: a, .. } if *a == attempt);
        if !current {
            return;
        }

        match outcome {
            Ok(index) => {
                let _ = self.ready.set(Arc::clone(index));
            }
            Err(err) => {
                error!(attempt, source = %self.source.describe(), error = %err, "Cache initialization error");
            }
        }
        *slot = Slot::Idle;
    }
}

fn build_index(source: &dyn DatasetSource, attempt: u64) -> Result<GeoIndex, LoadError> {
    info!(attempt, source = %source.describe(), "Initializing country cache...");
    let started = Instant::now();

    let countries = source.load()?;
    let index = GeoIndex::build(countries);

    let stats = index.stats();
    info!(
        attempt,
        states = stats.states,
        cities = stats.cities,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Cache initialized with {} countries",
        index.len()
    );
    Ok(index)
}
