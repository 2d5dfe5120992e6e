//! Command front end for the memsim simulator.
//!
//! Thin glue between text and the core crates:
//!
//! - [`command`]: tokenizes one input line into a typed [`Command`].
//! - [`session`]: holds the allocator and the selected strategy and
//!   executes commands, producing a [`Reply`].
//! - [`render`]: formats dumps, metrics, and cache statistics.
//! - [`repl`]: the prompt/read/execute loop over any `BufRead`.
//! - [`demo`]: the two-level cache walkthrough run at exit.
//!
//! The core crates never see text; everything here maps their typed
//! results to messages.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod command;
pub mod demo;
pub mod render;
pub mod repl;
pub mod session;

pub use command::{Command, ParseError};
pub use session::{Reply, Session};
