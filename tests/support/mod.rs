//! Shared test commands and capturing handlers for the bank domain used
//! across the integration suites.

// Not every suite uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use commandstack_rust::{BoxError, Command, CommandHandler};

#[derive(Clone, Debug, PartialEq)]
pub struct Deposit {
    pub account_id: String,
    pub amount: u64,
}

impl Command for Deposit {}

#[derive(Clone, Debug, PartialEq)]
pub struct Withdraw {
    pub account_id: String,
    pub amount: u64,
}

impl Command for Withdraw {}

/// Must run on the dispatching thread (e.g. inside the caller's transaction),
/// so it declares the synchronous capability.
#[derive(Clone, Debug, PartialEq)]
pub struct CloseAccount {
    pub account_id: String,
}

impl Command for CloseAccount {
    fn synchronous(&self) -> bool {
        true
    }
}

/// One observed handler invocation: the command it received and the thread it
/// ran on.
pub struct Invocation<C> {
    pub command: C,
    pub thread: ThreadId,
}

/// Capture store shared between a test and its handlers.
pub struct Captured<C> {
    invocations: Mutex<Vec<Invocation<C>>>,
}

impl<C: Clone> Captured<C> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            invocations: Mutex::new(Vec::new()),
        })
    }

    pub fn record(&self, command: C) {
        self.invocations.lock().unwrap().push(Invocation {
            command,
            thread: thread::current().id(),
        });
    }

    pub fn count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn commands(&self) -> Vec<C> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.command.clone())
            .collect()
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.thread)
            .collect()
    }

    /// Spin until at least `count` invocations were recorded.
    pub fn wait_for(&self, count: usize) {
        while self.count() < count {
            thread::yield_now();
        }
    }
}

/// Handler that records every command it receives.
pub struct CapturingHandler<C> {
    captured: Arc<Captured<C>>,
}

impl<C: Clone> CapturingHandler<C> {
    pub fn new(captured: Arc<Captured<C>>) -> Self {
        Self { captured }
    }
}

impl<C: Command + Clone> CommandHandler<C> for CapturingHandler<C> {
    fn handle(&self, command: C) -> Result<(), BoxError> {
        self.captured.record(command);
        Ok(())
    }
}

/// Handler that rejects every command with the given message.
pub struct RejectingHandler {
    pub message: &'static str,
}

impl<C: Command> CommandHandler<C> for RejectingHandler {
    fn handle(&self, _command: C) -> Result<(), BoxError> {
        Err(self.message.into())
    }
}
