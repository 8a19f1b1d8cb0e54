// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triago gateway.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Triago workspace. Classifier crates and
//! provider adapters all build on what is defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriagoError;
pub use types::{
    AdapterType, ChatMessage, ChatRole, HealthStatus, MessageId, ProviderRequest,
    ProviderResponse, SessionId,
};

// Re-export adapter traits at crate root.
pub use traits::{PluginAdapter, ProviderAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triago_error_has_all_variants() {
        // Verify all 5 error variants exist and can be constructed.
        let _config = TriagoError::Config("test".into());
        let _provider = TriagoError::Provider {
            message: "test".into(),
            source: None,
        };
        let _channel = TriagoError::Channel {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _timeout = TriagoError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        let _internal = TriagoError::Internal("test".into());
    }

    #[test]
    fn error_display_includes_message() {
        let err = TriagoError::Provider {
            message: "model not found".into(),
            source: None,
        };
        assert_eq!(err.to_string(), "provider error: model not found");
    }

    #[test]
    fn session_and_message_ids() {
        let sid = SessionId("session-1".into());
        let mid = MessageId("msg-1".into());

        let sid2 = sid.clone();
        assert_eq!(sid, sid2);

        let mid2 = mid.clone();
        assert_eq!(mid, mid2);
    }

    #[test]
    fn trait_objects_are_constructible() {
        // If either trait loses object safety this stops compiling.
        fn _assert_plugin_adapter(_: &dyn PluginAdapter) {}
        fn _assert_provider_adapter(_: &dyn ProviderAdapter) {}
    }
}
