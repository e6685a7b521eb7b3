//! Asynchronous dispatch decorator backed by a worker pool.

use std::sync::Arc;

use crate::command::Command;
use crate::error::CommandStackError;

use super::worker_pool::{PoolStats, WorkerPool};
use super::CommandDispatcher;

/// Dispatcher decorator that offloads command execution to a worker pool.
///
/// `send` submits a task invoking the wrapped dispatcher and returns without
/// waiting for it; handler failures land in the pool's failure store instead
/// of reaching the caller. Commands whose type declares the synchronous
/// capability ([`Command::synchronous`]) bypass the pool entirely and run on
/// the calling thread, so caller-thread side effects and program order are
/// preserved for them.
///
/// ## Example
///
/// ```
/// use commandstack_rust::{
///     AsyncDispatcher, BoxError, Command, CommandDispatcher, CommandHandler,
///     DefaultDispatcher, RegistryProvider,
/// };
///
/// struct Deposit { amount: u64 }
/// impl Command for Deposit {}
///
/// struct DepositHandler;
/// impl CommandHandler<Deposit> for DepositHandler {
///     fn handle(&self, command: Deposit) -> Result<(), BoxError> {
///         Ok(())
///     }
/// }
///
/// let registry = RegistryProvider::new();
/// registry.register::<Deposit, _, _>(|| Ok(DepositHandler)).unwrap();
///
/// let dispatcher = AsyncDispatcher::new(DefaultDispatcher::new(registry), 4).unwrap();
/// dispatcher.send(Deposit { amount: 100 }).unwrap(); // returns immediately
/// let stats = dispatcher.shutdown(); // drains the pool
/// assert_eq!(stats.completed, 1);
/// ```
pub struct AsyncDispatcher<D> {
    inner: Arc<D>,
    pool: WorkerPool,
}

impl<D: CommandDispatcher + 'static> AsyncDispatcher<D> {
    /// Wrap a dispatcher with a fresh pool of `workers` threads.
    pub fn new(inner: D, workers: usize) -> Result<Self, CommandStackError> {
        Ok(Self::with_pool(inner, WorkerPool::new(workers)?))
    }

    /// Wrap a dispatcher with an existing pool.
    pub fn with_pool(inner: D, pool: WorkerPool) -> Self {
        Self {
            inner: Arc::new(inner),
            pool,
        }
    }

    /// Snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Drain and return failures from asynchronously dispatched commands.
    pub fn take_failures(&self) -> Vec<CommandStackError> {
        self.pool.take_failures()
    }

    /// Shut the pool down, waiting for queued commands to finish, and return
    /// the final stats.
    pub fn shutdown(self) -> PoolStats {
        self.pool.shutdown()
    }
}

impl<D: CommandDispatcher + 'static> CommandDispatcher for AsyncDispatcher<D> {
    fn send<C: Command>(&self, command: C) -> Result<(), CommandStackError> {
        if command.synchronous() {
            return self.inner.send(command);
        }

        let inner = Arc::clone(&self.inner);
        self.pool.submit(move || inner.send(command))
    }
}
