//! Zero-value provider that resolves everything absent.

use crate::command::CommandType;
use crate::error::CommandStackError;
use crate::handler::ResolvedHandler;

use super::CommandHandlerProvider;

/// A provider with no registrations: every lookup resolves absent and never
/// errors.
///
/// Used by [`DispatcherBuilder`](crate::DispatcherBuilder) when no providers
/// were added, so the built dispatcher is a harmless null object rather than
/// a crash. An explicit value, not a hidden global.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProvider;

impl CommandHandlerProvider for NullProvider {
    fn handler_for(
        &self,
        _command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        Ok(None)
    }
}
