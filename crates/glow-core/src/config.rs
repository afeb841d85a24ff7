//! # Config Resolver
//!
//! Merges module settings contributed by three authority tiers into one
//! effective, conflict-free dashboard configuration.
//!
//! ## Precedence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Authority Tiers (low → high)                       │
//! │                                                                         │
//! │   Template default set                                                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Technician overrides     (personal preference)                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Salon locks              (owner policy for the whole salon)           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   Super-admin locks        (platform policy, wins over everything)      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   EffectiveConfig { enabled_modules, blocked_modules }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is an ordered reduce over the tier list: each step computes
//! `E' = (E ∪ enable) \ disable`. Because the fold proceeds strictly from
//! lowest to highest authority, a higher tier's force-disable can never be
//! re-enabled from below, and its force-enable can never be turned off from
//! below. Within a single tier, a module named in both sets resolves to
//! disabled.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::catalog::{Catalog, ModuleId, Template, TemplateId};
use crate::error::CoreResult;

// =============================================================================
// Authority Tiers
// =============================================================================

/// One of the three override-contributing tiers, in increasing precedence
/// order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityTier {
    Technician,
    Salon,
    SuperAdmin,
}

// =============================================================================
// Tier Inputs
// =============================================================================

/// A technician's personal dashboard settings — the lowest-authority tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TechConfig {
    /// Technician this configuration belongs to (UUID).
    pub tech_id: String,

    /// The template the technician picked as a starting point.
    pub template_id: TemplateId,

    /// Modules the technician switched on beyond the template default.
    pub enabled_overrides: BTreeSet<ModuleId>,

    /// Modules the technician switched off.
    pub disabled_overrides: BTreeSet<ModuleId>,
}

impl TechConfig {
    /// A fresh configuration with no overrides on the given template.
    pub fn new(tech_id: impl Into<String>, template_id: TemplateId) -> Self {
        TechConfig {
            tech_id: tech_id.into(),
            template_id,
            enabled_overrides: BTreeSet::new(),
            disabled_overrides: BTreeSet::new(),
        }
    }
}

/// Salon-owner locks, applied over all technician settings in the salon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalonLocks {
    /// Modules forced on for every technician.
    pub force_enabled: BTreeSet<ModuleId>,

    /// Modules forced off for every technician.
    pub force_disabled: BTreeSet<ModuleId>,
}

/// Platform-level locks, the highest-authority tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SuperAdminLocks {
    /// Modules forced on platform-wide.
    pub force_enabled: BTreeSet<ModuleId>,

    /// Modules forced off platform-wide.
    pub force_disabled: BTreeSet<ModuleId>,
}

/// One tier's contribution to the ordered reduce.
///
/// Making the precedence order a data structure (a slice of these, lowest
/// authority first) keeps the fold itself trivial and the order testable.
struct TierOverrides<'a> {
    enable: &'a BTreeSet<ModuleId>,
    disable: &'a BTreeSet<ModuleId>,
}

// =============================================================================
// Effective Config
// =============================================================================

/// The single merged result of applying all tiers' settings.
///
/// `enabled_modules` is the final truth the dashboard renders.
/// `blocked_modules` exists for UI transparency: modules that are off
/// because some tier deliberately turned them off, as opposed to modules no
/// template or tier ever enabled. The distinction lets the UI explain
/// "locked off" vs "never on".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EffectiveConfig {
    pub template_id: TemplateId,
    pub enabled_modules: BTreeSet<ModuleId>,
    pub blocked_modules: BTreeSet<ModuleId>,
}

impl EffectiveConfig {
    /// Whether the dashboard should render a module.
    #[inline]
    pub fn is_enabled(&self, module: ModuleId) -> bool {
        self.enabled_modules.contains(&module)
    }

    /// Whether a module is off because some tier explicitly disabled it.
    #[inline]
    pub fn is_blocked(&self, module: ModuleId) -> bool {
        self.blocked_modules.contains(&module)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the effective module configuration for one technician.
///
/// Looks the template up in the injected catalog (the only fallible step),
/// then folds the three tiers over its default set. See
/// [`resolve_with_template`] for the total inner function.
///
/// ## Example
/// ```rust
/// use glow_core::catalog::{Catalog, ModuleId, TemplateId};
/// use glow_core::config::{resolve_effective_config, SalonLocks, SuperAdminLocks, TechConfig};
///
/// let catalog = Catalog::builtin();
/// let tech = TechConfig::new("8f14e45f-ceea-4a78-a2f2-3d4c5b6a7c8d", TemplateId::ZenMaster);
///
/// let effective = resolve_effective_config(
///     &catalog,
///     &tech,
///     &SalonLocks::default(),
///     &SuperAdminLocks::default(),
/// )
/// .unwrap();
///
/// assert!(effective.is_enabled(ModuleId::VoiceOrb));
/// assert!(!effective.is_enabled(ModuleId::MoneyTicker));
/// ```
pub fn resolve_effective_config(
    catalog: &Catalog,
    tech: &TechConfig,
    salon: &SalonLocks,
    super_admin: &SuperAdminLocks,
) -> CoreResult<EffectiveConfig> {
    let template = catalog.template(tech.template_id)?;
    Ok(resolve_with_template(template, tech, salon, super_admin))
}

/// Total resolution over an already-looked-up template.
///
/// ## Algorithm
/// 1. Start with the template's default enabled set.
/// 2. Fold each tier, lowest authority first: `E' = (E ∪ enable) \ disable`.
///    Union-then-subtract makes disable win when one tier names a module in
///    both sets.
/// 3. A module ends up blocked when it is in the universe, not enabled at
///    the end, and was named by at least one tier's disable set.
///
/// Pure and deterministic: `BTreeSet` iteration order is canonical, so
/// identical inputs produce bit-identical outputs.
pub fn resolve_with_template(
    template: &Template,
    tech: &TechConfig,
    salon: &SalonLocks,
    super_admin: &SuperAdminLocks,
) -> EffectiveConfig {
    // Precedence order as data: lowest authority first.
    let tiers = [
        TierOverrides {
            enable: &tech.enabled_overrides,
            disable: &tech.disabled_overrides,
        },
        TierOverrides {
            enable: &salon.force_enabled,
            disable: &salon.force_disabled,
        },
        TierOverrides {
            enable: &super_admin.force_enabled,
            disable: &super_admin.force_disabled,
        },
    ];

    let mut enabled = template.default_modules.clone();
    let mut explicitly_disabled: BTreeSet<ModuleId> = BTreeSet::new();

    for tier in &tiers {
        enabled.extend(tier.enable.iter().copied());
        for module in tier.disable {
            enabled.remove(module);
        }
        explicitly_disabled.extend(tier.disable.iter().copied());
    }

    let blocked_modules: BTreeSet<ModuleId> = ModuleId::ALL
        .iter()
        .copied()
        .filter(|m| !enabled.contains(m) && explicitly_disabled.contains(m))
        .collect();

    debug!(
        template = %template.id,
        enabled = enabled.len(),
        blocked = blocked_modules.len(),
        "resolved effective module config"
    );

    EffectiveConfig {
        template_id: template.id,
        enabled_modules: enabled,
        blocked_modules,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
