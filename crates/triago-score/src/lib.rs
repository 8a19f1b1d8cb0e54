// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Score ledger for the Triago gateway.
//!
//! Maps routing outcomes to point deltas and applies them to a
//! caller-supplied balance with a floor clamp at zero. Pure computation;
//! the session layer owns persistence.

pub mod ledger;

pub use ledger::{apply_penalty, PenaltyCategory, PenaltyOutcome, INITIAL_POINTS};
