//! Required decorator: turns an absent lookup into a hard failure.

use crate::command::CommandType;
use crate::error::CommandStackError;
use crate::handler::ResolvedHandler;

use super::CommandHandlerProvider;

/// Provider decorator that fails with a handler-not-found error when the
/// wrapped provider reports absence.
///
/// Use it where unconditional resolution is expected, instead of re-checking
/// at every call site.
pub struct RequiredProvider<P> {
    inner: P,
}

impl<P: CommandHandlerProvider> RequiredProvider<P> {
    /// Wrap a provider.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: CommandHandlerProvider> CommandHandlerProvider for RequiredProvider<P> {
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        match self.inner.handler_for(command_type)? {
            Some(handler) => Ok(Some(handler)),
            None => Err(CommandStackError::HandlerNotFound(command_type)),
        }
    }
}
