// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message classification and routing for the Triago gateway.
//!
//! This crate provides the zero-cost heuristic filters that run before any
//! LLM call:
//! - [`check_politeness`]: is a message pure social noise?
//! - [`analyze`]: which of answer/google/docs/manpage does a query deserve?
//! - [`DomainClassifier`]: two-tier "is this on-topic?" gate with an
//!   LLM-backed fallback that fails open.
//!
//! All lexicons, keyword tables, and compiled regex sets live in
//! [`tables`] as process-wide read-only statics.

pub mod action;
pub mod domain;
pub mod politeness;
pub mod tables;

pub use action::{analyze, ActionVerdict};
pub use domain::{is_likely_technical, DomainClassifier, TechnicalAnalysis};
pub use politeness::{check_politeness, PolitenessCheck};
