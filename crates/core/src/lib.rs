// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The daily coverage state machine.
//!
//! This crate owns the single authoritative implementation of every coverage
//! transition: attendance marking, replacement, extra-coverage assignment and
//! unassignment, and undo. The business rules live exactly once, here, as a
//! pure function; the persistence layer gathers the inputs inside a
//! transaction and executes the declared effects. No transition logic is ever
//! duplicated in stored routines or callers.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{LedgerEffect, LedgerEntryState, TransitionContext, TransitionResult};
