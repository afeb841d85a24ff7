//! # Error Types
//!
//! Domain-specific error types for glow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  glow-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Persistence errors (separate crate, out of tree)                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What frontend sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (template, tier, transition)
//! 3. Errors are enum variants, never String
//! 4. Resolution functions stay total; errors only occur at lookup,
//!    validation, and entity-apply boundaries
//!
//! Note that a denied lifecycle transition is NOT an error at the
//! [`crate::lifecycle::can_transition`] level — the check returns a
//! [`crate::lifecycle::TransitionResult`] either way. `TransitionDenied`
//! exists for the write path ([`crate::lifecycle::Appointment::apply_transition`]),
//! where a denial must abort the state change.

use thiserror::Error;

use crate::catalog::{ModuleId, TemplateId};
use crate::config::AuthorityTier;
use crate::lifecycle::{AppointmentState, DenialReason};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Template is not present in the injected catalog.
    ///
    /// ## When This Occurs
    /// - A technician row references a template that a custom catalog omits
    /// - Stale data after a catalog rollout removed a template
    ///
    /// Callers are expected to validate the template against the catalog
    /// before resolving; this variant is the typed surface for the ones
    /// that don't.
    #[error("Template not found in catalog: {0}")]
    TemplateNotFound(TemplateId),

    /// Appointment cannot be found.
    ///
    /// ## When This Occurs
    /// - Appointment ID doesn't exist in the database
    /// - Sync conflict where the appointment exists on one device but not
    ///   another
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    /// A lifecycle transition was attempted and denied.
    ///
    /// ## When This Occurs
    /// - Applying `wrap_up → complete` without the required after photo
    /// - Applying any transition out of a terminal state
    ///
    /// ## User Workflow
    /// ```text
    /// Tech taps "Start Service"
    ///      │
    ///      ▼
    /// apply_transition(Working)
    ///      │
    ///      ▼
    /// TransitionDenied { reason: BeforePhotoRequired }
    ///      │
    ///      ▼
    /// UI shows: "Take a before photo to start"
    /// ```
    #[error("Transition {from:?} -> {to:?} denied: {reason:?}")]
    TransitionDenied {
        from: AppointmentState,
        to: AppointmentState,
        reason: DenialReason,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when tenant-supplied settings don't meet requirements.
/// Used for early validation on the admin write path, before rows are saved.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// One tier's settings both enable and disable the same modules.
    ///
    /// The resolver tolerates this (disable wins), but the admin UI should
    /// surface it before saving rather than let the tenant wonder why a
    /// module they "enabled" stays off.
    #[error("{tier:?} settings enable and disable the same modules: {modules:?}")]
    ConflictingOverrides {
        tier: AuthorityTier,
        modules: Vec<ModuleId>,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
