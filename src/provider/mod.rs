//! Command handler providers.
//!
//! A provider resolves a command type to at most one handler. Backends vary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Dispatcher                               │
//! │  resolves via exactly one configured provider               │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        CommandHandlerProvider trait                         │
//! │  handler_for(command_type) -> Ok(Some | None) | Err         │
//! └─────────────────────────────────────────────────────────────┘
//!     │              │                │                │
//!     ▼              ▼                ▼                ▼
//! ┌──────────┐ ┌───────────┐ ┌────────────────┐ ┌────────────┐
//! │ Registry │ │ Composite │ │ Required /     │ │ Null       │
//! │ (table)  │ │ (fan-in)  │ │ Checked (deco) │ │ (zero val) │
//! └──────────┘ └───────────┘ └────────────────┘ └────────────┘
//! ```
//!
//! `Ok(None)` is the well-formed "no handler registered" result. Whether
//! absence is fatal is decided by the caller — a [`RequiredProvider`] or the
//! dispatcher's fallback policy — never by the backend itself.

mod checked;
mod composite;
mod null;
mod registry;
mod required;

pub use checked::CheckedProvider;
pub use composite::CompositeProvider;
pub use null::NullProvider;
pub use registry::RegistryProvider;
pub use required::RequiredProvider;

use std::sync::Arc;

use crate::command::CommandType;
use crate::error::CommandStackError;
use crate::handler::ResolvedHandler;

/// Resolves a command type to at most one handler.
///
/// Side-effect-free and safe to query concurrently. Implementations must
/// return `Ok(None)` when nothing is registered for the type; errors are
/// reserved for genuine failures (ambiguity, broken factories).
pub trait CommandHandlerProvider: Send + Sync {
    /// Get the handler registered for the given command type, if any.
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError>;
}

// Shared providers resolve like the provider they point to. This lets one
// registry feed a composite and still be queried independently elsewhere.
impl<P: CommandHandlerProvider + ?Sized> CommandHandlerProvider for Arc<P> {
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        (**self).handler_for(command_type)
    }
}
