//! Command dispatchers - the entry points that resolve and invoke handlers.
//!
//! ```text
//! caller ──► CommandDispatcher::send(command)
//!                    │
//!                    ▼ (AsyncDispatcher only: offload to worker pool,
//!                    │  unless the command declares itself synchronous)
//!                    ▼
//!            DefaultDispatcher ──► provider.handler_for(type) ──► handler
//!                    │
//!                    └─ absent ──► FallbackPolicy (error | listener | callback)
//! ```
//!
//! Dispatch is single-shot request/response: `send` returns after the
//! handler completes (or, for async offload, after submission).

mod async_dispatcher;
mod default;
mod worker_pool;

pub use async_dispatcher::AsyncDispatcher;
pub use default::{DefaultDispatcher, FallbackPolicy};
pub use worker_pool::{PoolStats, WorkerPool};

use std::any::Any;
use std::sync::Arc;

use crate::command::{Command, CommandType};
use crate::error::CommandStackError;
use crate::provider::{CommandHandlerProvider, CompositeProvider, NullProvider};

/// The entry point that resolves and invokes a handler for a command.
///
/// Constructed once and shared for the process's lifetime; safe to call from
/// multiple threads.
pub trait CommandDispatcher: Send + Sync {
    /// Dispatch the command to its registered handler.
    fn send<C: Command>(&self, command: C) -> Result<(), CommandStackError>;
}

/// Fluent builder accumulating providers for a [`DefaultDispatcher`].
///
/// Zero providers yields a dispatcher over [`NullProvider`] — every command
/// resolves absent and the fallback applies, never a crash. One provider is
/// used directly; more are wrapped in a [`CompositeProvider`].
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use commandstack_rust::{CommandDispatcher, DispatcherBuilder, RegistryProvider};
///
/// let registry = Arc::new(RegistryProvider::new());
///
/// let dispatcher = DispatcherBuilder::new()
///     .provider(registry)
///     .strict()
///     .build()
///     .unwrap();
/// ```
pub struct DispatcherBuilder {
    providers: Vec<Arc<dyn CommandHandlerProvider>>,
    fallback: FallbackPolicy,
}

impl DispatcherBuilder {
    /// Start an empty builder with the default fallback policy.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            fallback: FallbackPolicy::default(),
        }
    }

    /// Add a command handler provider.
    pub fn provider(mut self, provider: Arc<dyn CommandHandlerProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Fail `send` with a handler-not-found error when no handler resolves.
    pub fn strict(mut self) -> Self {
        self.fallback = FallbackPolicy::Error;
        self
    }

    /// Invoke `callback` with the command type when no handler resolves.
    pub fn on_not_found<F>(mut self, callback: F) -> Self
    where
        F: Fn(CommandType) + Send + Sync + 'static,
    {
        self.fallback = FallbackPolicy::not_found(callback);
        self
    }

    /// Invoke `listener` with the command when no handler resolves.
    pub fn on_unhandled<F>(mut self, listener: F) -> Self
    where
        F: Fn(&dyn Any) + Send + Sync + 'static,
    {
        self.fallback = FallbackPolicy::unhandled(listener);
        self
    }

    /// Build the dispatcher.
    pub fn build(
        self,
    ) -> Result<DefaultDispatcher<Arc<dyn CommandHandlerProvider>>, CommandStackError> {
        let mut providers = self.providers;

        let provider: Arc<dyn CommandHandlerProvider> = match providers.len() {
            0 => Arc::new(NullProvider),
            1 => providers.remove(0),
            _ => Arc::new(CompositeProvider::new(providers)?),
        };

        Ok(DefaultDispatcher::with_fallback(provider, self.fallback))
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
