// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod day_record;
mod error;
mod plan;
mod status;
mod types;

#[cfg(test)]
mod tests;

pub use day_record::{DaySlotRecord, TransitionMetadata};
pub use error::DomainError;
pub use plan::{PlannedDay, expand_month};
pub use status::{OutcomeStatus, PlannedStatus};
pub use types::{GuardId, InstallationId, RolePattern, RolePatternId, Slot, SlotId};
