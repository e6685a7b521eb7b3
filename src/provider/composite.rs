//! Composite provider: fans a lookup out over an ordered list of children.

use std::sync::Arc;

use crate::command::CommandType;
use crate::error::CommandStackError;
use crate::handler::ResolvedHandler;

use super::CommandHandlerProvider;

/// Aggregates an ordered list of child providers.
///
/// Every child is asked for the command type; present results are collected
/// in child order. Exactly one match resolves; two or more is a
/// duplicate-handler-found error — a configuration inconsistency that is
/// never silently resolved by precedence. Zero matches reports absence: the
/// composite never invents a not-found error, that decision belongs to a
/// [`RequiredProvider`](super::RequiredProvider) or the dispatcher's fallback.
///
/// Children are shared references and are never mutated; the same provider
/// may also be queried independently elsewhere.
pub struct CompositeProvider {
    providers: Vec<Arc<dyn CommandHandlerProvider>>,
}

impl std::fmt::Debug for CompositeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeProvider")
            .field("providers", &self.providers.len())
            .finish()
    }
}

impl CompositeProvider {
    /// Create a composite over an ordered, non-empty list of providers.
    ///
    /// An empty list is a configuration error.
    pub fn new(providers: Vec<Arc<dyn CommandHandlerProvider>>) -> Result<Self, CommandStackError> {
        if providers.is_empty() {
            return Err(CommandStackError::InvalidArgument(
                "composite provider requires at least one child provider",
            ));
        }
        Ok(Self { providers })
    }

    /// Number of child providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false — an empty composite cannot be constructed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl CommandHandlerProvider for CompositeProvider {
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        // Query every child; a child's own error propagates immediately.
        let mut resolved = Vec::new();
        for provider in &self.providers {
            if let Some(handler) = provider.handler_for(command_type)? {
                resolved.push(handler);
            }
        }

        if resolved.len() > 1 {
            return Err(CommandStackError::DuplicateHandlerFound(command_type));
        }

        Ok(resolved.pop())
    }
}
