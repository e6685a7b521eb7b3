//! Synchronous dispatcher resolving handlers through a single provider.

use std::any::Any;

use crate::command::{Command, CommandType};
use crate::error::CommandStackError;
use crate::provider::{CheckedProvider, CommandHandlerProvider};

use super::CommandDispatcher;

/// Behavior applied when resolution yields no handler for a command.
pub enum FallbackPolicy {
    /// Fail the `send` call with a handler-not-found error (strict mode).
    Error,
    /// Invoke a callback with the unresolved command's type. The default
    /// policy is a callback that logs a warning and drops the command.
    NotFound(Box<dyn Fn(CommandType) + Send + Sync>),
    /// Invoke a listener with the unhandled command itself.
    Unhandled(Box<dyn Fn(&dyn Any) + Send + Sync>),
}

impl FallbackPolicy {
    /// Policy invoking `callback` with the unresolved command type.
    pub fn not_found<F>(callback: F) -> Self
    where
        F: Fn(CommandType) + Send + Sync + 'static,
    {
        FallbackPolicy::NotFound(Box::new(callback))
    }

    /// Policy invoking `listener` with the unhandled command.
    pub fn unhandled<F>(listener: F) -> Self
    where
        F: Fn(&dyn Any) + Send + Sync + 'static,
    {
        FallbackPolicy::Unhandled(Box::new(listener))
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::not_found(|command_type| {
            log::warn!(
                "no handler registered for command {}; dropping it",
                command_type
            );
        })
    }
}

/// Dispatcher that resolves a handler for each command's runtime type via a
/// single configured provider and invokes it on the calling thread.
///
/// Stateless per call beyond the provider reference and fallback policy; the
/// handler's result or error propagates back to the `send` caller with no
/// retry, suppression, or wrapping beyond the `Handler` error variant. The
/// configured provider is wrapped in a [`CheckedProvider`] so a misbehaving
/// provider is caught before its handler runs.
///
/// ## Example
///
/// ```
/// use commandstack_rust::{
///     BoxError, Command, CommandDispatcher, CommandHandler, DefaultDispatcher,
///     RegistryProvider,
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
/// let dispatcher = DefaultDispatcher::new(registry);
/// dispatcher.send(Deposit { amount: 100 }).unwrap();
/// ```
pub struct DefaultDispatcher<P: CommandHandlerProvider> {
    provider: CheckedProvider<P>,
    fallback: FallbackPolicy,
}

impl<P: CommandHandlerProvider> DefaultDispatcher<P> {
    /// Create a dispatcher with the default fallback: log a warning and drop
    /// unresolved commands.
    pub fn new(provider: P) -> Self {
        Self::with_fallback(provider, FallbackPolicy::default())
    }

    /// Create a strict dispatcher: an unresolved command fails the `send`
    /// call with a handler-not-found error.
    pub fn strict(provider: P) -> Self {
        Self::with_fallback(provider, FallbackPolicy::Error)
    }

    /// Create a dispatcher with an explicit fallback policy.
    pub fn with_fallback(provider: P, fallback: FallbackPolicy) -> Self {
        Self {
            provider: CheckedProvider::new(provider),
            fallback,
        }
    }
}

impl<P: CommandHandlerProvider> CommandDispatcher for DefaultDispatcher<P> {
    fn send<C: Command>(&self, command: C) -> Result<(), CommandStackError> {
        let command_type = CommandType::of::<C>();

        match self.provider.handler_for(command_type)? {
            Some(handler) => handler.handle_boxed(Box::new(command)),
            None => match &self.fallback {
                FallbackPolicy::Error => Err(CommandStackError::HandlerNotFound(command_type)),
                FallbackPolicy::NotFound(callback) => {
                    callback(command_type);
                    Ok(())
                }
                FallbackPolicy::Unhandled(listener) => {
                    listener(&command);
                    Ok(())
                }
            },
        }
    }
}
