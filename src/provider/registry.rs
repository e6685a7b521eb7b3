//! Registry-backed provider: an explicit table from command type to handler
//! factory.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::command::{Command, CommandType};
use crate::error::{BoxError, CommandStackError};
use crate::handler::{CommandHandler, ResolvedHandler, TypedHandler};

use super::CommandHandlerProvider;

/// A registration record: the command type plus the instance factory that
/// produces its handler.
///
/// The factory is re-invoked on every lookup — no caching. Registrants with
/// expensive factories should memoize themselves (or use
/// [`RegistryProvider::register_singleton`]).
struct RegisteredHandler {
    command_type: CommandType,
    factory: Box<dyn Fn() -> Result<ResolvedHandler, BoxError> + Send + Sync>,
}

impl RegisteredHandler {
    fn instance(&self) -> Result<ResolvedHandler, CommandStackError> {
        (self.factory)().map_err(|source| CommandStackError::InstanceCreation {
            command_type: self.command_type,
            source,
        })
    }
}

/// A provider backed by an explicit registration table.
///
/// Registration is expected during a bootstrap phase, but both registration
/// and resolution are safe under concurrent calls: lookups share a read lock
/// (no exclusive locking on the hot path), and registration holds the write
/// lock across its duplicate check and insert.
///
/// ## Example
///
/// ```
/// use commandstack_rust::{BoxError, Command, CommandHandler, RegistryProvider};
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
/// ```
pub struct RegistryProvider {
    handlers: RwLock<HashMap<CommandType, RegisteredHandler>>,
}

impl std::fmt::Debug for RegistryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryProvider")
            .field("handlers", &self.handlers.read().map(|h| h.len()).ok())
            .finish()
    }
}

impl RegistryProvider {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry and run a bootstrap configuration closure against it.
    ///
    /// ## Example
    ///
    /// ```
    /// # use commandstack_rust::{BoxError, Command, CommandHandler, RegistryProvider};
    /// # struct Deposit;
    /// # impl Command for Deposit {}
    /// # struct DepositHandler;
    /// # impl CommandHandler<Deposit> for DepositHandler {
    /// #     fn handle(&self, _: Deposit) -> Result<(), BoxError> { Ok(()) }
    /// # }
    /// let registry = RegistryProvider::configure(|registry| {
    ///     registry.register::<Deposit, _, _>(|| Ok(DepositHandler))?;
    ///     Ok(())
    /// })
    /// .unwrap();
    /// ```
    pub fn configure<F>(configuration: F) -> Result<Self, CommandStackError>
    where
        F: FnOnce(&Self) -> Result<(), CommandStackError>,
    {
        let registry = Self::new();
        configuration(&registry)?;
        Ok(registry)
    }

    /// Register an instance factory for command type `C`.
    ///
    /// Fails with a duplicate-registration error if `C` is already present —
    /// whether the factories differ makes no difference. Returns `&self` so
    /// registrations chain inside a `Result`-returning bootstrap:
    ///
    /// ```ignore
    /// registry
    ///     .register::<Deposit, _, _>(|| Ok(DepositHandler))?
    ///     .register::<Withdraw, _, _>(|| Ok(WithdrawHandler))?;
    /// ```
    pub fn register<C, H, F>(&self, factory: F) -> Result<&Self, CommandStackError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
        F: Fn() -> Result<H, BoxError> + Send + Sync + 'static,
    {
        let command_type = CommandType::of::<C>();

        let erased_factory = move || -> Result<ResolvedHandler, BoxError> {
            factory().map(|handler| TypedHandler::<C, H>::erased(handler))
        };

        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| CommandStackError::LockPoisoned("register"))?;

        // Check-then-insert under the write lock so duplicates cannot race in.
        if handlers.contains_key(&command_type) {
            return Err(CommandStackError::DuplicateRegistration(command_type));
        }

        handlers.insert(
            command_type,
            RegisteredHandler {
                command_type,
                factory: Box::new(erased_factory),
            },
        );

        Ok(self)
    }

    /// Register a single shared handler instance for command type `C`.
    ///
    /// Every resolution returns a clone of the same `Arc`-held instance.
    pub fn register_singleton<C, H>(&self, handler: H) -> Result<&Self, CommandStackError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let instance = TypedHandler::<C, H>::erased(handler);
        self.register::<C, SharedHandler<C>, _>(move || {
            Ok(SharedHandler {
                inner: Arc::clone(&instance),
                _command: std::marker::PhantomData,
            })
        })
    }

    /// Number of registered command types.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|h| h.len()).unwrap_or(0)
    }

    /// Whether the registry has no registrations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The registered command types, in no particular order.
    pub fn registered_types(&self) -> Vec<CommandType> {
        self.handlers
            .read()
            .map(|h| h.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl Default for RegistryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHandlerProvider for RegistryProvider {
    fn handler_for(
        &self,
        command_type: CommandType,
    ) -> Result<Option<ResolvedHandler>, CommandStackError> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| CommandStackError::LockPoisoned("handler_for"))?;

        match handlers.get(&command_type) {
            None => Ok(None),
            Some(registered) => registered.instance().map(Some),
        }
    }
}

/// Delegating handler that forwards to a shared, already-erased instance.
/// Exists so `register_singleton` can reuse the factory-based registration
/// path.
struct SharedHandler<C> {
    inner: ResolvedHandler,
    _command: std::marker::PhantomData<fn(C)>,
}

impl<C: Command> CommandHandler<C> for SharedHandler<C> {
    fn handle(&self, command: C) -> Result<(), BoxError> {
        self.inner
            .handle_boxed(Box::new(command))
            .map_err(|e| -> BoxError { Box::new(e) })
    }
}
