//! # Module Catalog & Templates
//!
//! The fixed universe of dashboard feature modules and the named templates
//! that pre-select subsets of it.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Config Resolution Pipeline                          │
//! │                                                                         │
//! │  Catalog (THIS MODULE) ──► template default set                        │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  TechConfig / SalonLocks / SuperAdminLocks ──► config::resolve          │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │  EffectiveConfig ──► booking UI renders enabled modules                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is an injected, immutable value constructed once at process
//! start — never import-time global state — so tests can substitute alternate
//! catalogs without module-system tricks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Module Identifiers
// =============================================================================

/// A named, independently toggleable feature unit in the booking UI.
///
/// The universe is closed and known at compile time; adding a module is a
/// code change, not a data change. Sets of modules therefore never contain
/// ids outside this enum — the type system rejects them before resolution
/// ever runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    /// Live running total of the day's earnings.
    MoneyTicker,
    /// Per-service step-by-step checklist overlay.
    StepChecklist,
    /// Hands-free voice assistant orb.
    VoiceOrb,
    /// Contextual add-on service suggestions.
    SmartUpsell,
    /// Schedule-gap rebooking prompts.
    GapFiller,
}

impl ModuleId {
    /// The full module universe, in canonical order.
    pub const ALL: [ModuleId; 5] = [
        ModuleId::MoneyTicker,
        ModuleId::StepChecklist,
        ModuleId::VoiceOrb,
        ModuleId::SmartUpsell,
        ModuleId::GapFiller,
    ];

    /// Stable wire/storage identifier (matches the serde representation).
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModuleId::MoneyTicker => "money_ticker",
            ModuleId::StepChecklist => "step_checklist",
            ModuleId::VoiceOrb => "voice_orb",
            ModuleId::SmartUpsell => "smart_upsell",
            ModuleId::GapFiller => "gap_filler",
        }
    }

    /// Human-readable name shown in the admin UI.
    pub const fn label(&self) -> &'static str {
        match self {
            ModuleId::MoneyTicker => "Money Ticker",
            ModuleId::StepChecklist => "Step Checklist",
            ModuleId::VoiceOrb => "Voice Orb",
            ModuleId::SmartUpsell => "Smart Upsell",
            ModuleId::GapFiller => "Gap Filler",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Template Identifiers
// =============================================================================

/// Identifier of a built-in dashboard template.
///
/// A template is a curated starting point: it decides which modules a
/// technician's dashboard enables before any tier-level overrides apply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// Calm, guidance-focused preset (checklist + voice).
    ZenMaster,
    /// Revenue-maximizing preset (everything on).
    Hustle,
    /// Reception-station preset (earnings + gap filling).
    FrontDesk,
    /// Everything off; tiers opt modules in one by one.
    Minimal,
}

impl TemplateId {
    /// Stable wire/storage identifier (matches the serde representation).
    pub const fn as_str(&self) -> &'static str {
        match self {
            TemplateId::ZenMaster => "zen_master",
            TemplateId::Hustle => "hustle",
            TemplateId::FrontDesk => "front_desk",
            TemplateId::Minimal => "minimal",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Template
// =============================================================================

/// A named template and the module subset it enables by default.
///
/// Everything outside `default_modules` starts disabled for that template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Template {
    pub id: TemplateId,
    pub default_modules: BTreeSet<ModuleId>,
}

impl Template {
    /// Creates a template from a list of default-enabled modules.
    pub fn new(id: TemplateId, default_modules: impl IntoIterator<Item = ModuleId>) -> Self {
        Template {
            id,
            default_modules: default_modules.into_iter().collect(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable template catalog, injected at process start.
///
/// ## Usage
/// ```rust
/// use glow_core::catalog::{Catalog, TemplateId, ModuleId};
///
/// let catalog = Catalog::builtin();
/// let template = catalog.template(TemplateId::ZenMaster).unwrap();
/// assert!(template.default_modules.contains(&ModuleId::StepChecklist));
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: BTreeMap<TemplateId, Template>,
}

impl Catalog {
    /// Builds a catalog from an explicit template list.
    ///
    /// Primarily for tests that need an alternate catalog; production code
    /// uses [`Catalog::builtin`]. Later templates with a duplicate id
    /// replace earlier ones.
    pub fn new(templates: impl IntoIterator<Item = Template>) -> Self {
        Catalog {
            templates: templates.into_iter().map(|t| (t.id, t)).collect(),
        }
    }

    /// The production catalog shipped with the product.
    pub fn builtin() -> Self {
        Catalog::new([
            Template::new(
                TemplateId::ZenMaster,
                [ModuleId::StepChecklist, ModuleId::VoiceOrb],
            ),
            Template::new(TemplateId::Hustle, ModuleId::ALL),
            Template::new(
                TemplateId::FrontDesk,
                [ModuleId::MoneyTicker, ModuleId::GapFiller],
            ),
            Template::new(TemplateId::Minimal, []),
        ])
    }

    /// Looks up a template by id.
    ///
    /// A missing template is a caller contract violation (callers validate
    /// against the catalog before resolving), surfaced as a typed error
    /// rather than a panic.
    pub fn template(&self, id: TemplateId) -> CoreResult<&Template> {
        self.templates
            .get(&id)
            .ok_or(CoreError::TemplateNotFound(id))
    }

    /// Checks whether the catalog carries a template.
    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    /// Ids of all templates in the catalog, in canonical order.
    pub fn template_ids(&self) -> Vec<TemplateId> {
        self.templates.keys().copied().collect()
    }

    /// The fixed module universe.
    ///
    /// Lives on the catalog (not a free constant) so resolution code reads
    /// it from its injected configuration.
    pub const fn universe(&self) -> &'static [ModuleId] {
        &ModuleId::ALL
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_zen_master_defaults() {
        let catalog = Catalog::builtin();
        let template = catalog.template(TemplateId::ZenMaster).unwrap();
        let expected: BTreeSet<ModuleId> =
            [ModuleId::StepChecklist, ModuleId::VoiceOrb].into_iter().collect();
        assert_eq!(template.default_modules, expected);
    }

    #[test]
    fn test_builtin_hustle_enables_everything() {
        let catalog = Catalog::builtin();
        let template = catalog.template(TemplateId::Hustle).unwrap();
        assert_eq!(template.default_modules.len(), ModuleId::ALL.len());
    }

    #[test]
    fn test_builtin_minimal_enables_nothing() {
        let catalog = Catalog::builtin();
        let template = catalog.template(TemplateId::Minimal).unwrap();
        assert!(template.default_modules.is_empty());
    }

    #[test]
    fn test_missing_template_is_typed_error() {
        let catalog = Catalog::new([Template::new(TemplateId::Minimal, [])]);
        let err = catalog.template(TemplateId::Hustle).unwrap_err();
        assert!(matches!(err, CoreError::TemplateNotFound(TemplateId::Hustle)));
    }

    #[test]
    fn test_universe_matches_all() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.universe(), &ModuleId::ALL);
    }

    #[test]
    fn test_module_id_serde_representation() {
        let json = serde_json::to_string(&ModuleId::StepChecklist).unwrap();
        assert_eq!(json, "\"step_checklist\"");
        assert_eq!(ModuleId::StepChecklist.as_str(), "step_checklist");
    }

    #[test]
    fn test_template_id_display() {
        assert_eq!(TemplateId::ZenMaster.to_string(), "zen_master");
        assert_eq!(TemplateId::FrontDesk.to_string(), "front_desk");
    }
}
