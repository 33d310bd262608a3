//! Common error infrastructure for hexfall-core.
//!
//! Domain-specific errors (e.g. [`crate::hex::HexError`],
//! [`crate::snapshot::RestoreAnomaly`]) live next to the component that raises
//! them. Almost all of them are handled locally by the owning component and
//! only surface in reports and logs, so every error type carries a severity
//! and a stable code through [`GameError`].

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the component handled it (skipped a cell, forced a turn
///   to end) and play continues
/// - **Validation**: the caller asked for something invalid and was refused
/// - **Internal**: an invariant that should be unreachable was observed
/// - **Fatal**: state can no longer be trusted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all hexfall-core errors and anomalies.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable and safe to match on in tooling and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
