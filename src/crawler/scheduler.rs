//! Concurrency primitives for the crawl
//!
//! This module handles:
//! - Global socket limiting via a semaphore
//! - Counting every spawned task so the crawl knows when it is done

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{AcquireError, Notify, Semaphore, SemaphorePermit};

/// Caps the number of fetches in flight at once
///
/// Tasks queue on [`SocketLimiter::acquire`] in FIFO order. The limiter also
/// tracks the highest number of permits ever held at once, which the crawl
/// reports as its peak concurrency.
#[derive(Debug)]
pub struct SocketLimiter {
    semaphore: Semaphore,
    capacity: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// A held socket slot; dropping it frees the slot
#[derive(Debug)]
pub struct SocketPermit<'a> {
    _permit: SemaphorePermit<'a>,
    in_flight: &'a AtomicUsize,
}

impl Drop for SocketPermit<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl SocketLimiter {
    /// Creates a limiter with `capacity` slots
    ///
    /// Callers are expected to pass a validated, positive capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Semaphore::new(capacity),
            capacity,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Waits for a free slot
    ///
    /// # Returns
    ///
    /// * `Ok(SocketPermit)` - A slot, held until the permit is dropped
    /// * `Err(AcquireError)` - The limiter was closed
    pub async fn acquire(&self) -> Result<SocketPermit<'_>, AcquireError> {
        let permit = self.semaphore.acquire().await?;
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(SocketPermit {
            _permit: permit,
            in_flight: &self.in_flight,
        })
    }

    /// Returns the number of free slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Returns the configured number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of slots currently held
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Returns the most slots ever held at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Counts outstanding crawl tasks and wakes a waiter when none remain
///
/// A task is counted from the moment it is spawned until its future finishes,
/// so a parent that spawns children before returning keeps the count above
/// zero. Once the count reaches zero no task exists that could spawn another,
/// which makes zero a terminal state.
#[derive(Debug, Default)]
pub struct TaskGroup {
    outstanding: AtomicUsize,
    idle: Notify,
}

/// Keeps one task counted in its [`TaskGroup`] until dropped
#[derive(Debug)]
pub struct TaskGuard {
    group: Arc<TaskGroup>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        if self.group.outstanding.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.group.idle.notify_one();
        }
    }
}

impl TaskGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more task
    pub fn register(self: &Arc<Self>) -> TaskGuard {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        TaskGuard {
            group: Arc::clone(self),
        }
    }

    /// Spawns a counted task onto the runtime
    ///
    /// The count is taken before the task is handed to tokio, so it can never
    /// be observed as finished before it started.
    pub fn spawn<F>(self: &Arc<Self>, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.register();
        tokio::spawn(async move {
            let _guard = guard;
            fut.await;
        });
    }

    /// Returns the number of tasks that have not finished yet
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Waits until every counted task has finished
    pub async fn wait(&self) {
        loop {
            let notified = self.idle.notified();
            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }
}
