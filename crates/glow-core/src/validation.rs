//! # Validation Module
//!
//! Strict-mode validation for tenant-supplied settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin UI (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API handler (Rust)                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  └── NOT NULL / UNIQUE / foreign key constraints                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolvers themselves stay total: a conflicting override pair still
//! resolves (disable wins) and resolution never throws. These checks exist
//! for the admin write path, so bad settings are surfaced when they are
//! saved rather than silently absorbed at render time.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, ModuleId, TemplateId};
use crate::config::{AuthorityTier, SalonLocks, SuperAdminLocks, TechConfig};
use crate::error::ValidationError;
use crate::{MAX_AUTO_POST_DELAY_MINUTES, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use glow_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Override Set Validators
// =============================================================================

/// Reports modules named in both the enable and disable set of one tier.
///
/// The resolver tolerates the overlap (disable wins); this check lets the
/// admin UI warn before saving a setting that will not do what the tenant
/// thinks it does.
pub fn validate_override_sets(
    tier: AuthorityTier,
    enable: &BTreeSet<ModuleId>,
    disable: &BTreeSet<ModuleId>,
) -> ValidationResult<()> {
    let conflicts: Vec<ModuleId> = enable.intersection(disable).copied().collect();

    if !conflicts.is_empty() {
        return Err(ValidationError::ConflictingOverrides {
            tier,
            modules: conflicts,
        });
    }

    Ok(())
}

/// Validates a technician's configuration row before save.
pub fn validate_tech_config(tech: &TechConfig) -> ValidationResult<()> {
    validate_uuid(&tech.tech_id)?;
    validate_override_sets(
        AuthorityTier::Technician,
        &tech.enabled_overrides,
        &tech.disabled_overrides,
    )
}

/// Validates salon-tier locks before save.
pub fn validate_salon_locks(locks: &SalonLocks) -> ValidationResult<()> {
    validate_override_sets(
        AuthorityTier::Salon,
        &locks.force_enabled,
        &locks.force_disabled,
    )
}

/// Validates super-admin-tier locks before save.
pub fn validate_super_admin_locks(locks: &SuperAdminLocks) -> ValidationResult<()> {
    validate_override_sets(
        AuthorityTier::SuperAdmin,
        &locks.force_enabled,
        &locks.force_disabled,
    )
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Checks a template id against the injected catalog.
///
/// Resolution treats a missing template as a caller contract violation;
/// this is the check callers run first.
pub fn validate_template_id(catalog: &Catalog, id: TemplateId) -> ValidationResult<()> {
    if catalog.contains(id) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: "template_id".to_string(),
        allowed: catalog
            .template_ids()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect(),
    })
}

// =============================================================================
// Policy Validators
// =============================================================================

/// Validates the auto-post delay.
///
/// ## Rules
/// - Must not exceed MAX_AUTO_POST_DELAY_MINUTES (one week)
/// - Zero is allowed (post immediately)
pub fn validate_auto_post_delay(minutes: u32) -> ValidationResult<()> {
    if minutes > MAX_AUTO_POST_DELAY_MINUTES {
        return Err(ValidationError::OutOfRange {
            field: "auto_post.delay_minutes".to_string(),
            min: 0,
            max: MAX_AUTO_POST_DELAY_MINUTES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates appointment notes.
///
/// ## Rules
/// - Can be empty
/// - Maximum MAX_NOTES_LEN characters
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Template;

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_override_sets_reports_conflicts() {
        let enable: BTreeSet<ModuleId> =
            [ModuleId::VoiceOrb, ModuleId::GapFiller].into_iter().collect();
        let disable: BTreeSet<ModuleId> =
            [ModuleId::VoiceOrb, ModuleId::MoneyTicker].into_iter().collect();

        let err = validate_override_sets(AuthorityTier::Salon, &enable, &disable).unwrap_err();
        match err {
            ValidationError::ConflictingOverrides { tier, modules } => {
                assert_eq!(tier, AuthorityTier::Salon);
                assert_eq!(modules, vec![ModuleId::VoiceOrb]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_override_sets_accepts_disjoint_sets() {
        let enable: BTreeSet<ModuleId> = [ModuleId::VoiceOrb].into_iter().collect();
        let disable: BTreeSet<ModuleId> = [ModuleId::MoneyTicker].into_iter().collect();
        assert!(validate_override_sets(AuthorityTier::Technician, &enable, &disable).is_ok());
    }

    #[test]
    fn test_validate_tech_config_checks_id_and_overrides() {
        let mut tech = TechConfig::new(
            "550e8400-e29b-41d4-a716-446655440000",
            TemplateId::ZenMaster,
        );
        assert!(validate_tech_config(&tech).is_ok());

        tech.enabled_overrides.insert(ModuleId::SmartUpsell);
        tech.disabled_overrides.insert(ModuleId::SmartUpsell);
        assert!(validate_tech_config(&tech).is_err());

        let bad_id = TechConfig::new("nope", TemplateId::ZenMaster);
        assert!(validate_tech_config(&bad_id).is_err());
    }

    #[test]
    fn test_validate_template_id_against_catalog() {
        let sparse = Catalog::new([Template::new(TemplateId::Minimal, [])]);
        assert!(validate_template_id(&sparse, TemplateId::Minimal).is_ok());

        let err = validate_template_id(&sparse, TemplateId::Hustle).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_validate_auto_post_delay() {
        assert!(validate_auto_post_delay(0).is_ok());
        assert!(validate_auto_post_delay(120).is_ok());
        assert!(validate_auto_post_delay(MAX_AUTO_POST_DELAY_MINUTES).is_ok());
        assert!(validate_auto_post_delay(MAX_AUTO_POST_DELAY_MINUTES + 1).is_err());
    }

    #[test]
    fn test_validate_notes() {
        assert!(validate_notes("").is_ok());
        assert!(validate_notes("client prefers quiet appointments").is_ok());
        assert!(validate_notes(&"x".repeat(MAX_NOTES_LEN + 1)).is_err());
    }
}
