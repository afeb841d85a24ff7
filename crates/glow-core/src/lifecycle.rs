//! # Appointment Lifecycle State Machine
//!
//! Decides whether a proposed appointment transition is allowed, given the
//! effective photo policy and the runtime evidence (uploaded photos).
//!
//! ## State Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Appointment Lifecycle                               │
//! │                                                                         │
//! │   Waiting ──────► Working ──────► WrapUp ──────► Complete ⊣            │
//! │      │  [before      │               │  [after                         │
//! │      │   photo       │               │   photo                         │
//! │      │   gate]       │               │   gate]                         │
//! │      │               │               │                                  │
//! │      ├───────────────┼───────────────┤                                  │
//! │      ▼               ▼               ▼                                  │
//! │   Cancelled ⊣     Cancelled ⊣     Cancelled ⊣   (ungated escapes)      │
//! │   NoShow ⊣        NoShow ⊣        NoShow ⊣                             │
//! │                                                                         │
//! │   ⊣ = terminal: no outgoing transitions, ever                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The adjacency table is a const data structure; anything not in it —
//! self-loops, skips, transitions out of a terminal state — is rejected
//! with [`DenialReason::InvalidTransition`] regardless of policy. Escape
//! transitions to `Cancelled`/`NoShow` are never photo-gated: a client who
//! walks out must always be recordable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::policy::EffectivePolicy;

// =============================================================================
// Appointment State
// =============================================================================

/// The lifecycle state of an appointment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentState {
    /// Client checked in, service not started.
    Waiting,
    /// Service in progress.
    Working,
    /// Service done; photos, rebooking, payment wrap-up.
    WrapUp,
    /// Finished and closed out.
    Complete,
    /// Cancelled before completion.
    Cancelled,
    /// Client never arrived.
    NoShow,
}

impl AppointmentState {
    /// Whether this state has no legal outgoing transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentState::Complete | AppointmentState::Cancelled | AppointmentState::NoShow
        )
    }
}

impl Default for AppointmentState {
    fn default() -> Self {
        AppointmentState::Waiting
    }
}

// =============================================================================
// Transition Inputs
// =============================================================================

/// A proposed state change, evaluated against the fixed adjacency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transition {
    pub from: AppointmentState,
    pub to: AppointmentState,
}

/// Runtime evidence supplied by the caller, not derived by this core.
///
/// The booking UI knows which photos were actually uploaded; the state
/// machine only consumes the flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Artifacts {
    pub before_photo_uploaded: bool,
    pub after_photo_uploaded: bool,
}

/// Everything [`can_transition`] needs to answer one yes/no question.
#[derive(Debug, Clone, Copy)]
pub struct TransitionCheck<'a> {
    pub transition: Transition,
    pub policy: &'a EffectivePolicy,
    pub artifacts: Artifacts,
}

// =============================================================================
// Transition Result
// =============================================================================

/// Why a transition was denied.
///
/// A closed enum, matched structurally by the UI (e.g. to open the "upload a
/// photo" remediation dialog) — never substring-matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// `waiting → working` blocked: before photo required but missing.
    BeforePhotoRequired,
    /// `wrap_up → complete` blocked: after photo required but missing.
    AfterPhotoRequired,
    /// Not an edge of the lifecycle graph (or `from` is terminal).
    InvalidTransition,
}

/// The allow/deny decision for a proposed transition.
///
/// `reason` is `Some` if and only if `allowed` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransitionResult {
    pub allowed: bool,
    pub reason: Option<DenialReason>,
}

impl TransitionResult {
    /// An allowed transition (no reason).
    #[inline]
    pub const fn allowed() -> Self {
        TransitionResult {
            allowed: true,
            reason: None,
        }
    }

    /// A denied transition with its machine-checkable reason.
    #[inline]
    pub const fn denied(reason: DenialReason) -> Self {
        TransitionResult {
            allowed: false,
            reason: Some(reason),
        }
    }
}

// =============================================================================
// Adjacency Table
// =============================================================================

/// The gate attached to a legal edge, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    /// Always passes (escape transitions and ungated forward steps).
    None,
    /// Blocked when the before photo is required but missing.
    BeforePhoto,
    /// Blocked when the after photo is required but missing.
    AfterPhoto,
}

/// The only transitions considered legal, with their gates.
///
/// Kept as data so the precedence of "is this edge legal at all" over
/// "does policy block it" is structural, and so tests can sweep the full
/// from × to product against it.
const TRANSITION_TABLE: &[(AppointmentState, AppointmentState, Gate)] = &[
    (AppointmentState::Waiting, AppointmentState::Working, Gate::BeforePhoto),
    (AppointmentState::Working, AppointmentState::WrapUp, Gate::None),
    (AppointmentState::WrapUp, AppointmentState::Complete, Gate::AfterPhoto),
    // Ungated escapes from every non-terminal state.
    (AppointmentState::Waiting, AppointmentState::Cancelled, Gate::None),
    (AppointmentState::Working, AppointmentState::Cancelled, Gate::None),
    (AppointmentState::WrapUp, AppointmentState::Cancelled, Gate::None),
    (AppointmentState::Waiting, AppointmentState::NoShow, Gate::None),
    (AppointmentState::Working, AppointmentState::NoShow, Gate::None),
    (AppointmentState::WrapUp, AppointmentState::NoShow, Gate::None),
];

fn lookup_gate(transition: Transition) -> Option<Gate> {
    TRANSITION_TABLE
        .iter()
        .find(|(from, to, _)| *from == transition.from && *to == transition.to)
        .map(|(_, _, gate)| *gate)
}

/// Legal target states from a given state, in table order.
///
/// For UI button rendering; an empty slice means the state is terminal.
pub fn legal_targets(from: AppointmentState) -> Vec<AppointmentState> {
    TRANSITION_TABLE
        .iter()
        .filter(|(f, _, _)| *f == from)
        .map(|(_, to, _)| *to)
        .collect()
}

// =============================================================================
// Transition Check
// =============================================================================

/// Answers whether a proposed transition is allowed and, if not, why.
///
/// ## Decision Order
/// 1. Edge not in the adjacency table (including anything out of a terminal
///    state) → denied, `InvalidTransition`, policy never consulted.
/// 2. Edge legal and gated → the gate is evaluated against the effective
///    policy and the supplied artifacts. `Optional` never blocks.
/// 3. Edge legal and ungated → allowed.
///
/// The after-photo gate fires when either `require_after_photo_to_finish`
/// or `require_after_photo_to_pay` is `Required`; the two requirements
/// share the single `wrap_up → complete` edge because the lifecycle has no
/// separate pay step.
///
/// ## Example
/// ```rust
/// use glow_core::lifecycle::{
///     can_transition, AppointmentState, Artifacts, DenialReason, Transition, TransitionCheck,
/// };
/// use glow_core::policy::{EffectivePolicy, PhotoRequirementMode};
///
/// let policy = EffectivePolicy {
///     require_before_photo_to_start: PhotoRequirementMode::Required,
///     ..EffectivePolicy::default()
/// };
///
/// let result = can_transition(&TransitionCheck {
///     transition: Transition {
///         from: AppointmentState::Waiting,
///         to: AppointmentState::Working,
///     },
///     policy: &policy,
///     artifacts: Artifacts::default(),
/// });
///
/// assert!(!result.allowed);
/// assert_eq!(result.reason, Some(DenialReason::BeforePhotoRequired));
/// ```
pub fn can_transition(check: &TransitionCheck<'_>) -> TransitionResult {
    let Transition { from, to } = check.transition;

    let Some(gate) = lookup_gate(check.transition) else {
        return TransitionResult::denied(DenialReason::InvalidTransition);
    };

    let result = match gate {
        Gate::None => TransitionResult::allowed(),
        Gate::BeforePhoto => {
            if check.policy.require_before_photo_to_start.is_required()
                && !check.artifacts.before_photo_uploaded
            {
                TransitionResult::denied(DenialReason::BeforePhotoRequired)
            } else {
                TransitionResult::allowed()
            }
        }
        Gate::AfterPhoto => {
            let required = check.policy.require_after_photo_to_finish.is_required()
                || check.policy.require_after_photo_to_pay.is_required();
            if required && !check.artifacts.after_photo_uploaded {
                TransitionResult::denied(DenialReason::AfterPhotoRequired)
            } else {
                TransitionResult::allowed()
            }
        }
    };

    debug!(?from, ?to, allowed = result.allowed, reason = ?result.reason, "transition check");
    result
}

// =============================================================================
// Appointment Entity
// =============================================================================

/// An appointment as the rest of the product sees it.
///
/// The core holds no appointment store; this type is what the persistence
/// layer hydrates and what [`Appointment::apply_transition`] mutates in
/// memory before the caller writes it back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Appointment {
    pub id: String,
    pub tenant_id: String,
    pub salon_id: String,
    pub tech_id: String,
    pub state: AppointmentState,

    /// Upload evidence observed so far, maintained by the caller.
    pub artifacts: Artifacts,

    pub notes: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    /// Set once, on entering `Complete`.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Sync version for conflict resolution; bumped on every state change.
    pub sync_version: i64,
}

impl Appointment {
    /// Applies a transition to this appointment, or reports why it can't.
    ///
    /// Runs [`can_transition`] against the appointment's own artifacts; on
    /// success updates `state`, stamps `updated_at` (and `completed_at` when
    /// entering `Complete`), and bumps `sync_version`. The caller supplies
    /// `at` — the core never reads a clock.
    ///
    /// On denial the appointment is left untouched and
    /// [`CoreError::TransitionDenied`] carries the structured reason.
    pub fn apply_transition(
        &mut self,
        to: AppointmentState,
        policy: &EffectivePolicy,
        at: DateTime<Utc>,
    ) -> CoreResult<()> {
        let result = can_transition(&TransitionCheck {
            transition: Transition {
                from: self.state,
                to,
            },
            policy,
            artifacts: self.artifacts,
        });

        if let Some(reason) = result.reason {
            return Err(CoreError::TransitionDenied {
                from: self.state,
                to,
                reason,
            });
        }

        self.state = to;
        self.updated_at = at;
        if to == AppointmentState::Complete {
            self.completed_at = Some(at);
        }
        self.sync_version += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PhotoRequirementMode;
    use AppointmentState::*;

    const ALL_STATES: [AppointmentState; 6] = [Waiting, Working, WrapUp, Complete, Cancelled, NoShow];

    fn policy(
        before: PhotoRequirementMode,
        finish: PhotoRequirementMode,
        pay: PhotoRequirementMode,
    ) -> EffectivePolicy {
        EffectivePolicy {
            require_before_photo_to_start: before,
            require_after_photo_to_finish: finish,
            require_after_photo_to_pay: pay,
            ..EffectivePolicy::default()
        }
    }

    fn check(
        from: AppointmentState,
        to: AppointmentState,
        policy: &EffectivePolicy,
        artifacts: Artifacts,
    ) -> TransitionResult {
        can_transition(&TransitionCheck {
            transition: Transition { from, to },
            policy,
            artifacts,
        })
    }

    fn open_policy() -> EffectivePolicy {
        EffectivePolicy::default()
    }

    #[test]
    fn test_every_edge_outside_table_is_denied() {
        // Sweep the full from × to product; whatever the table doesn't list
        // must come back denied with InvalidTransition.
        let p = open_policy();
        let uploaded = Artifacts {
            before_photo_uploaded: true,
            after_photo_uploaded: true,
        };

        for from in ALL_STATES {
            for to in ALL_STATES {
                let legal = legal_targets(from).contains(&to);
                let result = check(from, to, &p, uploaded);
                assert_eq!(result.allowed, legal, "{from:?} -> {to:?}");
                if !legal {
                    assert_eq!(result.reason, Some(DenialReason::InvalidTransition));
                }
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        let p = open_policy();
        for from in [Complete, Cancelled, NoShow] {
            assert!(from.is_terminal());
            assert!(legal_targets(from).is_empty());
            for to in ALL_STATES {
                let result = check(from, to, &p, Artifacts::default());
                assert!(!result.allowed);
                assert_eq!(result.reason, Some(DenialReason::InvalidTransition));
            }
        }
    }

    #[test]
    fn test_self_loops_are_denied() {
        let p = open_policy();
        for state in ALL_STATES {
            let result = check(state, state, &p, Artifacts::default());
            assert!(!result.allowed, "{state:?} self-loop");
        }
    }

    #[test]
    fn test_before_photo_gate() {
        use PhotoRequirementMode::{Off, Optional, Required};

        let required = policy(Required, Off, Off);

        // Required + missing photo: denied with the structured reason.
        let result = check(Waiting, Working, &required, Artifacts::default());
        assert!(!result.allowed);
        assert_eq!(result.reason, Some(DenialReason::BeforePhotoRequired));

        // Required + uploaded photo: allowed.
        let result = check(
            Waiting,
            Working,
            &required,
            Artifacts {
                before_photo_uploaded: true,
                after_photo_uploaded: false,
            },
        );
        assert!(result.allowed);
        assert_eq!(result.reason, None);

        // Optional and Off never block, regardless of upload state.
        for mode in [Off, Optional] {
            let p = policy(mode, Off, Off);
            assert!(check(Waiting, Working, &p, Artifacts::default()).allowed);
        }
    }

    #[test]
    fn test_after_photo_gate_fires_for_either_requirement() {
        use PhotoRequirementMode::{Off, Required};

        // Finish-side requirement alone.
        let p = policy(Off, Required, Off);
        let result = check(WrapUp, Complete, &p, Artifacts::default());
        assert_eq!(result.reason, Some(DenialReason::AfterPhotoRequired));

        // Pay-side requirement alone gates the same edge.
        let p = policy(Off, Off, Required);
        let result = check(WrapUp, Complete, &p, Artifacts::default());
        assert_eq!(result.reason, Some(DenialReason::AfterPhotoRequired));

        // Uploaded photo satisfies both.
        let p = policy(Off, Required, Required);
        let result = check(
            WrapUp,
            Complete,
            &p,
            Artifacts {
                before_photo_uploaded: false,
                after_photo_uploaded: true,
            },
        );
        assert!(result.allowed);
    }

    #[test]
    fn test_working_to_wrap_up_is_ungated() {
        use PhotoRequirementMode::Required;

        // Even a maximally strict policy doesn't gate the middle edge.
        let p = policy(Required, Required, Required);
        assert!(check(Working, WrapUp, &p, Artifacts::default()).allowed);
    }

    #[test]
    fn test_escape_transitions_ignore_photo_policy() {
        use PhotoRequirementMode::Required;

        let p = policy(Required, Required, Required);
        for from in [Waiting, Working, WrapUp] {
            for to in [Cancelled, NoShow] {
                let result = check(from, to, &p, Artifacts::default());
                assert!(result.allowed, "{from:?} -> {to:?} must stay ungated");
                assert_eq!(result.reason, None);
            }
        }
    }

    #[test]
    fn test_reason_present_iff_denied() {
        let p = policy(
            PhotoRequirementMode::Required,
            PhotoRequirementMode::Required,
            PhotoRequirementMode::Off,
        );
        for from in ALL_STATES {
            for to in ALL_STATES {
                for uploaded in [false, true] {
                    let result = check(
                        from,
                        to,
                        &p,
                        Artifacts {
                            before_photo_uploaded: uploaded,
                            after_photo_uploaded: uploaded,
                        },
                    );
                    assert_eq!(result.allowed, result.reason.is_none());
                }
            }
        }
    }

    #[test]
    fn test_legal_targets_for_ui() {
        assert_eq!(legal_targets(Waiting), vec![Working, Cancelled, NoShow]);
        assert_eq!(legal_targets(WrapUp), vec![Complete, Cancelled, NoShow]);
        assert!(legal_targets(Complete).is_empty());
    }

    // -------------------------------------------------------------------------
    // Appointment entity
    // -------------------------------------------------------------------------

    fn appointment(state: AppointmentState) -> Appointment {
        let t0 = DateTime::parse_from_rfc3339("2025-06-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Appointment {
            id: "a1d9c2b3-0000-4000-8000-000000000001".to_string(),
            tenant_id: "a1d9c2b3-0000-4000-8000-0000000000aa".to_string(),
            salon_id: "a1d9c2b3-0000-4000-8000-0000000000bb".to_string(),
            tech_id: "a1d9c2b3-0000-4000-8000-0000000000cc".to_string(),
            state,
            artifacts: Artifacts::default(),
            notes: None,
            created_at: t0,
            updated_at: t0,
            completed_at: None,
            sync_version: 1,
        }
    }

    fn later() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_apply_transition_updates_entity() {
        let mut appt = appointment(Waiting);
        appt.apply_transition(Working, &open_policy(), later()).unwrap();

        assert_eq!(appt.state, Working);
        assert_eq!(appt.updated_at, later());
        assert_eq!(appt.completed_at, None);
        assert_eq!(appt.sync_version, 2);
    }

    #[test]
    fn test_apply_transition_stamps_completed_at() {
        let mut appt = appointment(WrapUp);
        appt.apply_transition(Complete, &open_policy(), later()).unwrap();

        assert_eq!(appt.state, Complete);
        assert_eq!(appt.completed_at, Some(later()));
    }

    #[test]
    fn test_apply_denied_transition_leaves_entity_untouched() {
        let strict = policy(
            PhotoRequirementMode::Required,
            PhotoRequirementMode::Off,
            PhotoRequirementMode::Off,
        );

        let mut appt = appointment(Waiting);
        let before = appt.clone();
        let err = appt.apply_transition(Working, &strict, later()).unwrap_err();

        assert!(matches!(
            err,
            CoreError::TransitionDenied {
                from: Waiting,
                to: Working,
                reason: DenialReason::BeforePhotoRequired,
            }
        ));
        assert_eq!(appt.state, before.state);
        assert_eq!(appt.updated_at, before.updated_at);
        assert_eq!(appt.sync_version, before.sync_version);
    }

    #[test]
    fn test_apply_transition_uses_own_artifacts() {
        let strict = policy(
            PhotoRequirementMode::Required,
            PhotoRequirementMode::Off,
            PhotoRequirementMode::Off,
        );

        let mut appt = appointment(Waiting);
        appt.artifacts.before_photo_uploaded = true;
        appt.apply_transition(Working, &strict, later()).unwrap();
        assert_eq!(appt.state, Working);
    }
}
