//! Command handler traits and the type-erasure seam.
//!
//! Application code implements the typed [`CommandHandler<C>`] trait. The bus
//! internals operate on [`ErasedCommandHandler`] trait objects so that
//! providers can store handlers for heterogeneous command types in one table.
//! [`TypedHandler`] bridges the two.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::command::{Command, CommandType};
use crate::error::{BoxError, CommandStackError};

/// The unit of logic that processes one command type.
///
/// Handlers are stateless from the bus's perspective; any internal state is
/// the implementation's concern. An instance may be a shared singleton or
/// newly constructed per resolution, depending on how it was registered.
///
/// ## Example
///
/// ```
/// use commandstack_rust::{BoxError, Command, CommandHandler};
///
/// struct Deposit {
///     amount: u64,
/// }
/// impl Command for Deposit {}
///
/// struct DepositHandler;
///
/// impl CommandHandler<Deposit> for DepositHandler {
///     fn handle(&self, command: Deposit) -> Result<(), BoxError> {
///         println!("depositing {}", command.amount);
///         Ok(())
///     }
/// }
/// ```
pub trait CommandHandler<C: Command>: Send + Sync {
    /// Process the command. Errors propagate to the `send` caller unmodified.
    fn handle(&self, command: C) -> Result<(), BoxError>;
}

/// Object-safe form of a command handler, keyed by the command type it claims.
///
/// Providers resolve these; the dispatcher feeds them boxed commands. A
/// well-behaved implementation only ever receives commands of the type
/// reported by `command_type()`.
pub trait ErasedCommandHandler: Send + Sync {
    /// The command type this handler claims to process.
    fn command_type(&self) -> CommandType;

    /// Process a boxed command.
    ///
    /// A command of any other type than `command_type()` is a provider
    /// contract violation and fails with a bus configuration error.
    fn handle_boxed(&self, command: Box<dyn Any + Send>) -> Result<(), CommandStackError>;
}

impl std::fmt::Debug for dyn ErasedCommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedCommandHandler")
            .field("command_type", &self.command_type())
            .finish()
    }
}

/// A resolved handler as returned by providers.
pub type ResolvedHandler = Arc<dyn ErasedCommandHandler>;

/// Adapts a typed [`CommandHandler<C>`] to [`ErasedCommandHandler`].
pub struct TypedHandler<C, H> {
    handler: H,
    // fn(C) keeps the adapter Send + Sync without requiring C: Sync.
    _command: PhantomData<fn(C)>,
}

impl<C, H> TypedHandler<C, H>
where
    C: Command,
    H: CommandHandler<C>,
{
    /// Wrap a typed handler.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _command: PhantomData,
        }
    }

    /// Wrap a typed handler and erase it behind a shared pointer.
    pub fn erased(handler: H) -> ResolvedHandler
    where
        H: 'static,
    {
        Arc::new(Self::new(handler))
    }
}

impl<C, H> ErasedCommandHandler for TypedHandler<C, H>
where
    C: Command,
    H: CommandHandler<C>,
{
    fn command_type(&self) -> CommandType {
        CommandType::of::<C>()
    }

    fn handle_boxed(&self, command: Box<dyn Any + Send>) -> Result<(), CommandStackError> {
        let command = command.downcast::<C>().map_err(|_| {
            CommandStackError::BusConfiguration(format!(
                "handler for {} received a command of a different type",
                CommandType::of::<C>()
            ))
        })?;

        self.handler
            .handle(*command)
            .map_err(CommandStackError::Handler)
    }
}
