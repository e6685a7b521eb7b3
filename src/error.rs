//! Error types for the command bus.

use std::error::Error;
use std::fmt;

use crate::command::CommandType;

/// Boxed error type returned by handlers and instance factories.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Error type for bus operations.
///
/// Every failure the bus itself can produce is one of these kinds; none are
/// retried internally. Handler failures pass through `send` in the `Handler`
/// variant with the original error preserved as the source.
#[derive(Debug)]
pub enum CommandStackError {
    /// An invalid argument was passed to a public operation (empty composite
    /// provider list, zero-sized worker pool).
    InvalidArgument(&'static str),
    /// The same command type was registered twice in one registry.
    DuplicateRegistration(CommandType),
    /// Two or more providers in a composite resolved the same command type.
    DuplicateHandlerFound(CommandType),
    /// No handler resolved where one was required.
    HandlerNotFound(CommandType),
    /// A registered instance factory failed to produce a handler.
    InstanceCreation {
        command_type: CommandType,
        source: BoxError,
    },
    /// A provider implementation violated its own contract.
    BusConfiguration(String),
    /// The handler itself failed while processing a command.
    Handler(BoxError),
    /// The registry lock was poisoned by a panicking thread.
    LockPoisoned(&'static str),
    /// A task was submitted to a worker pool that has shut down.
    WorkerPoolClosed,
}

impl fmt::Display for CommandStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStackError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CommandStackError::DuplicateRegistration(command_type) => write!(
                f,
                "command {} is already registered in this registry",
                command_type
            ),
            CommandStackError::DuplicateHandlerFound(command_type) => write!(
                f,
                "multiple handlers found for command {}; check provider configuration",
                command_type
            ),
            CommandStackError::HandlerNotFound(command_type) => {
                write!(f, "no handler found for command {}", command_type)
            }
            CommandStackError::InstanceCreation {
                command_type,
                source,
            } => write!(
                f,
                "instance factory for command {} failed: {}; check registration",
                command_type, source
            ),
            CommandStackError::BusConfiguration(msg) => {
                write!(f, "bus configuration error: {}", msg)
            }
            CommandStackError::Handler(e) => write!(f, "handler failed: {}", e),
            CommandStackError::LockPoisoned(operation) => {
                write!(f, "registry lock poisoned during {}", operation)
            }
            CommandStackError::WorkerPoolClosed => {
                write!(f, "worker pool has shut down; command was not submitted")
            }
        }
    }
}

impl Error for CommandStackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CommandStackError::InstanceCreation { source, .. } => Some(source.as_ref()),
            CommandStackError::Handler(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
