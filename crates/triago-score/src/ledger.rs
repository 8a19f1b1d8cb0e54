// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Point penalties for low-value requests.
//!
//! Each routing outcome maps to a fixed signed delta. The ledger is a pure
//! function over the caller-supplied balance: it owns no storage, and
//! persistence of the updated balance is entirely the session layer's job.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

/// Balance granted to a session on first contact.
pub const INITIAL_POINTS: u32 = 100;

/// The category of request that triggered a score adjustment.
///
/// This is a closed vocabulary: a new kind of outcome means a new variant
/// here, never an ad hoc string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PenaltyCategory {
    /// Message was pure social noise (greetings, thanks).
    Politeness,
    /// Question answerable with a basic web search.
    Googleable,
    /// Question redirected to official documentation.
    Documentation,
    /// Question about a shell command, redirected to its man page.
    Manpage,
    /// Low-effort or empty request with nothing to answer.
    NoSubstance,
    /// The model's answer arrived malformed and had to be salvaged.
    InvalidFormat,
    /// A genuine technical question, answered in full.
    Answered,
}

impl PenaltyCategory {
    /// The signed point delta for this category.
    pub fn delta(self) -> i32 {
        match self {
            PenaltyCategory::Politeness => -5,
            PenaltyCategory::Googleable => -10,
            PenaltyCategory::Documentation => -5,
            PenaltyCategory::Manpage => -5,
            PenaltyCategory::NoSubstance => -3,
            PenaltyCategory::InvalidFormat => -2,
            PenaltyCategory::Answered => 0,
        }
    }

    /// Fixed human-readable reason, one per category.
    pub fn reason(self) -> &'static str {
        match self {
            PenaltyCategory::Politeness => "polite filler costs energy",
            PenaltyCategory::Googleable => "answerable with a basic web search",
            PenaltyCategory::Documentation => "covered by official documentation",
            PenaltyCategory::Manpage => "covered by the manual page",
            PenaltyCategory::NoSubstance => "no substantive question asked",
            PenaltyCategory::InvalidFormat => "response required format recovery",
            PenaltyCategory::Answered => "technical question answered",
        }
    }
}

/// Result of applying a penalty to a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PenaltyOutcome {
    /// New balance after the delta, floor-clamped to 0.
    pub points: u32,
    /// The delta that was applied (pre-clamp).
    pub delta: i32,
    /// Fixed reason string for the applied category.
    pub reason: &'static str,
}

/// Apply the penalty for `category` to `current` and return the new balance.
///
/// The balance never goes below zero. Callers read the current value from
/// the session store and write the returned one back; concurrent requests
/// for the same session are last-writer-wins by design.
pub fn apply_penalty(current: u32, category: PenaltyCategory) -> PenaltyOutcome {
    let delta = category.delta();
    let points = current.saturating_add_signed(delta);

    debug!(
        category = %category,
        current,
        delta,
        points,
        "penalty applied"
    );

    PenaltyOutcome {
        points,
        delta,
        reason: category.reason(),
    }
}
