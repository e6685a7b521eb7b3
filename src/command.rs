//! Command trait and the type token used as the routing key.

use std::any::{type_name, TypeId};
use std::fmt;

/// A command routed by the bus.
///
/// Commands are immutable application-defined values; their runtime type is
/// the sole routing key. The bus attaches no identity or metadata of its own.
///
/// ## Example
///
/// ```
/// use commandstack_rust::Command;
///
/// struct Deposit {
///     account_id: String,
///     amount: u64,
/// }
///
/// impl Command for Deposit {}
/// ```
pub trait Command: Send + 'static {
    /// Whether this command must execute on the dispatching thread.
    ///
    /// Consulted only by `AsyncDispatcher` — synchronous commands bypass the
    /// worker pool so caller-thread side effects (transaction context,
    /// ordering relative to the caller) are preserved. Defaults to `false`.
    fn synchronous(&self) -> bool {
        false
    }
}

/// Routing key for a command type.
///
/// Pairs the `TypeId` (the actual key) with the type name for diagnostics.
/// Lookup is by exact type equality — no supertype matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandType {
    id: TypeId,
    name: &'static str,
}

impl CommandType {
    /// Get the routing key for a command type.
    pub fn of<C: Command>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// The command type's name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
