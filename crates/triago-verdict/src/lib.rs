// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intermediate verdict classification for the Triago gateway.
//!
//! A small, cheap model is asked to sort each surviving request into one
//! of five verdict codes before the expensive answer model runs. This
//! crate owns the rubric prompt, the defensive extraction of the code
//! from noisy model output, and the mapping to user-facing text.

pub mod classifier;
pub mod verdict;

pub use classifier::VerdictClassifier;
pub use verdict::{extract_verdict, IntermediateVerdict, NO_SUBSTANCE_MESSAGE};
