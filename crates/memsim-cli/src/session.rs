//! Command dispatch.
//!
//! A [`Session`] owns the allocator (absent until the first `init`) and the
//! currently selected strategy. Every command produces a [`Reply`]; failures
//! of the core (no fit, invalid id) become ordinary messages.

use memsim_alloc::{Allocator, AllocatorConfig};
use memsim_core::FitStrategy;

use crate::command::Command;
use crate::render::{render_dump, render_metrics};

/// Outcome of executing one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the user.
    Text(String),
    /// The user asked to leave.
    Exit,
}

impl Reply {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

const NOT_INITIALIZED: &str = "Memory not initialized (use: init memory <size>)";

/// Interactive simulator state.
#[derive(Debug)]
pub struct Session {
    allocator: Option<Allocator>,
    strategy: FitStrategy,
    alignment: usize,
}

impl Session {
    /// A session with no memory and first-fit selected.
    pub fn new() -> Self {
        Self::with_alignment(AllocatorConfig::DEFAULT_ALIGNMENT)
    }

    /// A session whose allocators round requests to `alignment`.
    pub fn with_alignment(alignment: usize) -> Self {
        Self {
            allocator: None,
            strategy: FitStrategy::default(),
            alignment,
        }
    }

    /// The strategy used by `malloc`.
    pub fn strategy(&self) -> FitStrategy {
        self.strategy
    }

    /// The allocator, once initialized.
    pub fn allocator(&self) -> Option<&Allocator> {
        self.allocator.as_ref()
    }

    /// Execute one command.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Exit => Reply::Exit,
            Command::Init { size } => self.init(size),
            Command::SetAllocator(strategy) => {
                self.strategy = strategy;
                Reply::text(format!("Allocator set to {strategy}"))
            }
            Command::Malloc { size } => {
                let strategy = self.strategy;
                self.with_allocator(|alloc| match alloc.allocate(strategy, size) {
                    Ok(id) => format!("Allocated block id={id}"),
                    Err(e) => {
                        tracing::debug!(error = %e, "malloc rejected");
                        "Allocation failed".to_string()
                    }
                })
            }
            Command::Free { id } => self.with_allocator(|alloc| match alloc.free(id) {
                Ok(()) => format!("Block {id} freed"),
                Err(e) => e.to_string(),
            }),
            Command::Dump => self.with_allocator(|alloc| render_dump(&alloc.dump())),
            Command::Stats => self.with_allocator(|alloc| render_metrics(&alloc.metrics())),
        }
    }

    fn init(&mut self, size: usize) -> Reply {
        let config = AllocatorConfig::new(size).with_alignment(self.alignment);
        match Allocator::with_config(config) {
            Ok(alloc) => {
                self.allocator = Some(alloc);
                Reply::text(format!("Initialized memory of size {size}"))
            }
            Err(e) => Reply::text(format!("Cannot initialize memory: {e}")),
        }
    }

    fn with_allocator(&mut self, f: impl FnOnce(&mut Allocator) -> String) -> Reply {
        match self.allocator.as_mut() {
            Some(alloc) => Reply::Text(f(alloc)),
            None => Reply::text(NOT_INITIALIZED),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
