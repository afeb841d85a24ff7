//! # glow-core: Pure Business Logic for Glow Booking
//!
//! This crate is the **heart** of Glow Booking. It contains the product's
//! configuration/policy resolution engine and the appointment lifecycle
//! state machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Glow Booking Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Booking UI / Admin UI                       │   │
//! │  │   Dashboard ──► Module toggles ──► Appointment timeline         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ API / IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Server handlers                              │   │
//! │  │    load tenant rows, call resolvers, render results             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ glow-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  config   │  │  policy   │  │ lifecycle │  │   │
//! │  │   │ ModuleId  │  │ 3-tier    │  │ 2-tier    │  │ gated FSM │  │   │
//! │  │   │ Templates │  │ reduce    │  │ max-merge │  │ + entity  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          Persistence / SMS OTP / payments (out of tree)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The fixed module universe and named templates
//! - [`config`] - Three-tier module override resolution
//! - [`policy`] - Two-tier photo policy resolution
//! - [`lifecycle`] - The policy-gated appointment state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation for the write path
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every resolver is deterministic - same input = same output
//! 2. **No I/O**: Database, network, clock access is FORBIDDEN here
//! 3. **Closed Enums**: Module ids, states, modes, and denial reasons are
//!    sum types - illegal values are unrepresentable, matches are exhaustive
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use glow_core::catalog::{Catalog, ModuleId, TemplateId};
//! use glow_core::config::{resolve_effective_config, SalonLocks, SuperAdminLocks, TechConfig};
//!
//! let catalog = Catalog::builtin();
//! let tech = TechConfig::new("550e8400-e29b-41d4-a716-446655440000", TemplateId::ZenMaster);
//!
//! let effective = resolve_effective_config(
//!     &catalog,
//!     &tech,
//!     &SalonLocks::default(),
//!     &SuperAdminLocks::default(),
//! )
//! .unwrap();
//!
//! assert!(effective.is_enabled(ModuleId::StepChecklist));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod policy;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use glow_core::EffectiveConfig` instead of
// `use glow_core::config::EffectiveConfig`

pub use catalog::{Catalog, ModuleId, Template, TemplateId};
pub use config::{
    resolve_effective_config, AuthorityTier, EffectiveConfig, SalonLocks, SuperAdminLocks,
    TechConfig,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use lifecycle::{
    can_transition, Appointment, AppointmentState, Artifacts, DenialReason, Transition,
    TransitionCheck, TransitionResult,
};
pub use policy::{
    resolve_effective_policy, AutoPostSettings, EffectivePolicy, PhotoRequirementMode,
    SalonPolicy, SuperAdminPolicy,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum auto-post delay a salon can configure (one week).
///
/// ## Business Reason
/// An after photo posted months later reads as spam to the client; capping
/// the delay keeps the gallery close to the appointment it came from.
pub const MAX_AUTO_POST_DELAY_MINUTES: u32 = 7 * 24 * 60;

/// Maximum length of appointment notes.
///
/// ## Business Reason
/// Notes are shown inline on the schedule; longer free text belongs in the
/// client record, not the appointment row.
pub const MAX_NOTES_LEN: usize = 500;
