//! Contract-enforcing decorator guarding against misbehaving providers.

use std::any::type_name;

use crate::command::CommandType;
use crate::error::CommandStackError;
use crate::handler::ResolvedHandler;

use super::CommandHandlerProvider;

/// Provider decorator that fails fast when the wrapped provider breaks its
/// contract by resolving a handler for a different command type than the one
/// requested.
///
/// This is a defensive check against broken third-party provider
/// implementations, not a business-logic branch — a well-formed absent result
/// (`Ok(None)`) passes through untouched. Dispatchers wrap their configured
/// provider in this decorator so a misrouted handler is caught before it is
/// invoked.
pub struct CheckedProvider<P> {
    inner: P,
}

impl<P: CommandHandlerProvider> CheckedProvider<P> {
    /// Wrap a provider.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: CommandHandlerProvider> CommandHandlerProvider for CheckedProvider<P> {
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        let resolved = self.inner.handler_for(command_type)?;

        if let Some(handler) = &resolved {
            if handler.command_type() != command_type {
                return Err(CommandStackError::BusConfiguration(format!(
                    "provider {} resolved a handler for {} when asked for {}; \
                     check provider configuration",
                    type_name::<P>(),
                    handler.command_type(),
                    command_type
                )));
            }
        }

        Ok(resolved)
    }
}
