//! Fixed-size worker pool backing asynchronous dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::CommandStackError;

/// A unit of work submitted to the pool.
pub type Job = Box<dyn FnOnce() -> Result<(), CommandStackError> + Send>;

/// Statistics from a worker pool.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of jobs accepted by `submit`.
    pub submitted: usize,
    /// Number of jobs that ran to completion, successfully or not.
    pub completed: usize,
    /// Number of completed jobs that returned an error.
    pub failed: usize,
}

struct PoolState {
    submitted: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    failures: Mutex<Vec<CommandStackError>>,
}

/// A fixed set of worker threads draining a shared job queue.
///
/// Submission is fire-and-forget: `submit` returns as soon as the job is
/// queued. Job failures are never re-raised to the submitter — they are
/// recorded in the pool's failure store, observable via [`stats`] and
/// [`take_failures`].
///
/// Shutdown: [`shutdown`] closes the queue, lets the workers drain remaining
/// jobs, joins them, and returns the final stats. Dropping the pool closes
/// the queue without joining.
///
/// [`stats`]: WorkerPool::stats
/// [`take_failures`]: WorkerPool::take_failures
/// [`shutdown`]: WorkerPool::shutdown
pub struct WorkerPool {
    job_tx: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    state: Arc<PoolState>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

impl WorkerPool {
    /// Spawn a pool with the given number of worker threads.
    ///
    /// A size of zero is a configuration error.
    pub fn new(size: usize) -> Result<Self, CommandStackError> {
        if size == 0 {
            return Err(CommandStackError::InvalidArgument(
                "worker pool size must be greater than zero",
            ));
        }

        let (job_tx, job_rx) = channel::<Job>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        let state = Arc::new(PoolState {
            submitted: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            failures: Mutex::new(Vec::new()),
        });

        let workers = (0..size)
            .map(|worker| {
                let job_rx = Arc::clone(&job_rx);
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    log::debug!("worker {} started", worker);
                    Self::run_worker(&job_rx, &state);
                    log::debug!("worker {} stopped", worker);
                })
            })
            .collect();

        Ok(Self {
            job_tx: Some(job_tx),
            workers,
            state,
        })
    }

    fn run_worker(job_rx: &Mutex<Receiver<Job>>, state: &PoolState) {
        loop {
            // Hold the lock only while receiving so other workers can take
            // the next job while this one runs.
            let job = match job_rx.lock() {
                Ok(rx) => rx.recv(),
                Err(_) => break,
            };

            match job {
                Ok(job) => {
                    let result = job();
                    state.completed.fetch_add(1, Ordering::SeqCst);
                    if let Err(e) = result {
                        state.failed.fetch_add(1, Ordering::SeqCst);
                        log::warn!("dispatched command failed: {}", e);
                        if let Ok(mut failures) = state.failures.lock() {
                            failures.push(e);
                        }
                    }
                }
                // Channel closed: pool is shutting down.
                Err(_) => break,
            }
        }
    }

    /// Submit a unit of work. Returns once the job is queued.
    pub fn submit<F>(&self, job: F) -> Result<(), CommandStackError>
    where
        F: FnOnce() -> Result<(), CommandStackError> + Send + 'static,
    {
        let job_tx = self
            .job_tx
            .as_ref()
            .ok_or(CommandStackError::WorkerPoolClosed)?;

        job_tx
            .send(Box::new(job))
            .map_err(|_| CommandStackError::WorkerPoolClosed)?;

        self.state.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            submitted: self.state.submitted.load(Ordering::SeqCst),
            completed: self.state.completed.load(Ordering::SeqCst),
            failed: self.state.failed.load(Ordering::SeqCst),
        }
    }

    /// Drain and return the recorded job failures.
    pub fn take_failures(&self) -> Vec<CommandStackError> {
        self.state
            .failures
            .lock()
            .map(|mut failures| failures.drain(..).collect())
            .unwrap_or_default()
    }

    /// Close the queue, wait for the workers to drain it, and return the
    /// final stats.
    pub fn shutdown(mut self) -> PoolStats {
        self.job_tx.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
        self.stats()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channel stops the workers after the queue drains.
        self.job_tx.take();
    }
}
