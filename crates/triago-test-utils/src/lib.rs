// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Triago workspace.

pub mod mock_provider;

pub use mock_provider::MockProvider;
