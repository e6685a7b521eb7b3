mod command;
mod dispatcher;
mod error;
mod handler;
mod provider;

pub use command::{Command, CommandType};
pub use dispatcher::{
    AsyncDispatcher, CommandDispatcher, DefaultDispatcher, DispatcherBuilder, FallbackPolicy,
    PoolStats, WorkerPool,
};
pub use error::{BoxError, CommandStackError};
pub use handler::{CommandHandler, ErasedCommandHandler, ResolvedHandler, TypedHandler};
pub use provider::{
    CheckedProvider, CommandHandlerProvider, CompositeProvider, NullProvider, RegistryProvider,
    RequiredProvider,
};
