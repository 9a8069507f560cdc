//! Common error infrastructure for combat-core.
//!
//! This module provides shared types and traits used across all error types in
//! combat-core. Domain-specific errors (e.g. `CastError`, `OracleError`) are
//! defined alongside the operations that produce them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rich Context**: Errors carry the actor and frame for debugging
//! - **Severity Classification**: Errors are categorized for recovery strategies
//!
//! Rejected casts (cooldown, energy) are *not* errors; they are ordinary
//! outcomes reported through [`crate::engine::CastOutcome`].

use crate::state::ActorId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Corrupted content data, the caller cannot continue meaningfully
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: actor not found, malformed cast intent
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: two effects of one type on the same actor.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - content data is corrupted or missing.
    ///
    /// Examples: unknown attack id, missing attack oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupted data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Actor that triggered the error (if applicable).
    pub actor: Option<ActorId>,

    /// Simulation frame at the time of error.
    pub frame: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given frame.
    #[must_use]
    pub const fn new(frame: u64) -> Self {
        Self {
            actor: None,
            frame,
            message: None,
        }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Include `ErrorContext` in variants that need debugging info
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }

    #[test]
    fn context_builder_keeps_fields() {
        let ctx = ErrorContext::new(7)
            .with_actor(ActorId(3))
            .with_message("lookup");
        assert_eq!(ctx.frame, 7);
        assert_eq!(ctx.actor, Some(ActorId(3)));
        assert_eq!(ctx.message, Some("lookup"));
    }
}
