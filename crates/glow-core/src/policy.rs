//! # Policy Resolver
//!
//! Merges two authority tiers of photo-capture business rules into one
//! effective policy.
//!
//! ## Merge Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Photo Policy Merge                                 │
//! │                                                                         │
//! │   Super-admin tier          Salon tier                                  │
//! │   (platform floor)          (salon choice + auxiliary settings)         │
//! │        │                         │                                      │
//! │        └────────┬────────────────┘                                      │
//! │                 ▼                                                       │
//! │   field-wise max under  off < optional < required                       │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │   EffectivePolicy ──► lifecycle gates + UI hints                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The super-admin tier is a strictness floor: it can raise what a salon
//! chose, never lower it. `Off` on the super-admin side means "no platform
//! floor" and defers entirely to the salon. Salon-only auxiliary settings
//! (auto-posting) have no super-admin counterpart and pass through unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

// =============================================================================
// Photo Requirement Mode
// =============================================================================

/// How strongly a photo is required at a lifecycle gate.
///
/// The declaration order carries meaning: `Off < Optional < Required`
/// under the derived ordering, and the merge is `max` over it. `Optional`
/// never blocks a transition — it exists for UI hinting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PhotoRequirementMode {
    /// No requirement.
    #[default]
    Off,
    /// Suggested in the UI, never enforced.
    Optional,
    /// Enforced: the gated transition is blocked until the photo exists.
    Required,
}

impl PhotoRequirementMode {
    /// Whether this mode blocks a transition when the photo is missing.
    #[inline]
    pub const fn is_required(&self) -> bool {
        matches!(self, PhotoRequirementMode::Required)
    }
}

// =============================================================================
// Auxiliary Settings (salon-only)
// =============================================================================

/// Auto-posting of after photos to the salon gallery.
///
/// Salon-only: the super-admin tier cannot express an opinion here, so
/// these fields bypass the merge and pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AutoPostSettings {
    /// Whether finished-appointment photos are posted automatically.
    pub enabled: bool,

    /// Delay between completion and posting, in minutes.
    /// Bounded by [`crate::MAX_AUTO_POST_DELAY_MINUTES`] on the write path.
    pub delay_minutes: u32,

    /// Optional caption template, e.g. "Fresh look by {tech_name}".
    pub caption_template: Option<String>,
}

// =============================================================================
// Tier Inputs
// =============================================================================

/// Platform-level photo policy — the strictness floor.
///
/// Carries only the three requirement fields; it has no counterpart for the
/// salon-only auxiliary settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuperAdminPolicy {
    pub require_before_photo_to_start: PhotoRequirementMode,
    pub require_after_photo_to_finish: PhotoRequirementMode,
    pub require_after_photo_to_pay: PhotoRequirementMode,
}

/// A salon's own photo policy plus its auxiliary settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalonPolicy {
    pub require_before_photo_to_start: PhotoRequirementMode,
    pub require_after_photo_to_finish: PhotoRequirementMode,
    pub require_after_photo_to_pay: PhotoRequirementMode,

    /// Salon-only; passed through unmerged.
    pub auto_post: AutoPostSettings,
}

// =============================================================================
// Effective Policy
// =============================================================================

/// The single merged photo policy consumed by the lifecycle gates and the
/// booking UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EffectivePolicy {
    pub require_before_photo_to_start: PhotoRequirementMode,
    pub require_after_photo_to_finish: PhotoRequirementMode,
    pub require_after_photo_to_pay: PhotoRequirementMode,
    pub auto_post: AutoPostSettings,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the effective photo policy for one salon.
///
/// Each requirement field independently becomes
/// `max(super_admin.field, salon.field)` under `off < optional < required`.
/// Total function, no side effects.
///
/// ## Example
/// ```rust
/// use glow_core::policy::{
///     resolve_effective_policy, PhotoRequirementMode, SalonPolicy, SuperAdminPolicy,
/// };
///
/// let salon = SalonPolicy {
///     require_before_photo_to_start: PhotoRequirementMode::Optional,
///     ..SalonPolicy::default()
/// };
/// let super_admin = SuperAdminPolicy {
///     require_before_photo_to_start: PhotoRequirementMode::Required,
///     ..SuperAdminPolicy::default()
/// };
///
/// let effective = resolve_effective_policy(&super_admin, &salon);
/// assert_eq!(
///     effective.require_before_photo_to_start,
///     PhotoRequirementMode::Required
/// );
/// ```
pub fn resolve_effective_policy(
    super_admin: &SuperAdminPolicy,
    salon: &SalonPolicy,
) -> EffectivePolicy {
    let effective = EffectivePolicy {
        require_before_photo_to_start: salon
            .require_before_photo_to_start
            .max(super_admin.require_before_photo_to_start),
        require_after_photo_to_finish: salon
            .require_after_photo_to_finish
            .max(super_admin.require_after_photo_to_finish),
        require_after_photo_to_pay: salon
            .require_after_photo_to_pay
            .max(super_admin.require_after_photo_to_pay),
        auto_post: salon.auto_post.clone(),
    };

    debug!(
        before = ?effective.require_before_photo_to_start,
        finish = ?effective.require_after_photo_to_finish,
        pay = ?effective.require_after_photo_to_pay,
        "resolved effective photo policy"
    );

    effective
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use PhotoRequirementMode::{Off, Optional, Required};

    #[test]
    fn test_mode_ordering() {
        assert!(Off < Optional);
        assert!(Optional < Required);
        assert_eq!(Off.max(Required), Required);
        assert_eq!(Optional.max(Off), Optional);
    }

    #[test]
    fn test_merge_is_fieldwise_max() {
        // Every (salon, super_admin) pair, one field at a time.
        let modes = [Off, Optional, Required];
        for salon_mode in modes {
            for admin_mode in modes {
                let salon = SalonPolicy {
                    require_before_photo_to_start: salon_mode,
                    ..SalonPolicy::default()
                };
                let super_admin = SuperAdminPolicy {
                    require_before_photo_to_start: admin_mode,
                    ..SuperAdminPolicy::default()
                };

                let effective = resolve_effective_policy(&super_admin, &salon);
                assert_eq!(
                    effective.require_before_photo_to_start,
                    salon_mode.max(admin_mode),
                    "salon={salon_mode:?} super_admin={admin_mode:?}"
                );
                // Monotone: never below either input.
                assert!(effective.require_before_photo_to_start >= salon_mode);
                assert!(effective.require_before_photo_to_start >= admin_mode);
            }
        }
    }

    #[test]
    fn test_super_admin_floor_raises_salon_setting() {
        let salon = SalonPolicy {
            require_before_photo_to_start: Optional,
            ..SalonPolicy::default()
        };
        let super_admin = SuperAdminPolicy {
            require_before_photo_to_start: Required,
            ..SuperAdminPolicy::default()
        };

        let effective = resolve_effective_policy(&super_admin, &salon);
        assert_eq!(effective.require_before_photo_to_start, Required);
    }

    #[test]
    fn test_super_admin_off_does_not_lower_salon_setting() {
        let salon = SalonPolicy {
            require_after_photo_to_finish: Required,
            ..SalonPolicy::default()
        };
        let super_admin = SuperAdminPolicy {
            require_after_photo_to_finish: Off,
            ..SuperAdminPolicy::default()
        };

        let effective = resolve_effective_policy(&super_admin, &salon);
        assert_eq!(effective.require_after_photo_to_finish, Required);
    }

    #[test]
    fn test_fields_merge_independently() {
        let salon = SalonPolicy {
            require_before_photo_to_start: Required,
            require_after_photo_to_finish: Off,
            require_after_photo_to_pay: Optional,
            ..SalonPolicy::default()
        };
        let super_admin = SuperAdminPolicy {
            require_before_photo_to_start: Off,
            require_after_photo_to_finish: Optional,
            require_after_photo_to_pay: Required,
        };

        let effective = resolve_effective_policy(&super_admin, &salon);
        assert_eq!(effective.require_before_photo_to_start, Required);
        assert_eq!(effective.require_after_photo_to_finish, Optional);
        assert_eq!(effective.require_after_photo_to_pay, Required);
    }

    #[test]
    fn test_auxiliary_settings_pass_through_unchanged() {
        let salon = SalonPolicy {
            auto_post: AutoPostSettings {
                enabled: true,
                delay_minutes: 120,
                caption_template: Some("Fresh look by {tech_name}".to_string()),
            },
            ..SalonPolicy::default()
        };
        // The super-admin tier has no auto-post fields to contribute.
        let super_admin = SuperAdminPolicy {
            require_before_photo_to_start: Required,
            require_after_photo_to_finish: Required,
            require_after_photo_to_pay: Required,
        };

        let effective = resolve_effective_policy(&super_admin, &salon);
        assert_eq!(effective.auto_post, salon.auto_post);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let salon = SalonPolicy {
            require_before_photo_to_start: Optional,
            require_after_photo_to_pay: Required,
            ..SalonPolicy::default()
        };
        let super_admin = SuperAdminPolicy::default();

        let first = resolve_effective_policy(&super_admin, &salon);
        let second = resolve_effective_policy(&super_admin, &salon);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
