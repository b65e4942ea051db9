//! Per-tenant theme registry
//!
//! Owns the [`ThemeTarget`] and tracks one entry per tenant. Every write is an
//! idempotent replace keyed by the tenant's style element id, so repeated
//! applies (a color picker being dragged) never accumulate elements.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::{build_theme_tokens, ThemeBuildResult};
use crate::config::{ThemeConfig, ThemeInput};
use crate::error::{Result, TargetError, ThemeError};
use crate::target::ThemeTarget;

const STYLE_ELEMENT_PREFIX: &str = "tenant-theme-";

/// Restaurant identifier (URL slug)
#[derive(Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize)]
pub struct TenantId(String);

impl TenantId {
    /// Lower-case ASCII letters, digits and inner `-`
    pub fn new(slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        let valid = !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && slug
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if valid {
            Ok(Self(slug))
        } else {
            Err(ThemeError::InvalidTenant(slug))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the `<style>` element holding this tenant's theme
    pub fn style_element_id(&self) -> String {
        format!("{STYLE_ELEMENT_PREFIX}{}", self.0)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TenantId {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Lifecycle of a tenant's injected theme
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStatus {
    #[default]
    Unapplied,
    Applying,
    Applied,
    Removed,
}

/// Which theme [`ThemeRegistry::apply_or_fallback`] ended up applying
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeSource {
    Requested,
    LastKnownGood,
    Default,
}

#[derive(Debug, Default)]
struct TenantEntry {
    status: ThemeStatus,
    /// CSS of the most recent successful write
    last_good: Option<String>,
    last_error: Option<TargetError>,
}

/// Owner of every tenant's style element
#[derive(Debug)]
pub struct ThemeRegistry<T: ThemeTarget> {
    target: T,
    entries: FxHashMap<TenantId, TenantEntry>,
}

impl<T: ThemeTarget> ThemeRegistry<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            entries: FxHashMap::default(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Write a built theme for `tenant`, replacing any previous one
    pub fn apply(&mut self, tenant: &TenantId, result: &ThemeBuildResult) -> Result<ThemeStatus> {
        debug!(%tenant, theme = %result.name, "applying theme");
        self.apply_css(tenant, &result.css)
    }

    fn apply_css(&mut self, tenant: &TenantId, css: &str) -> Result<ThemeStatus> {
        if !self.target.is_available() {
            debug!(%tenant, "theme target unavailable, skipping apply");
            return Ok(self.status(tenant));
        }

        let element_id = tenant.style_element_id();
        let entry = self.entries.entry(tenant.clone()).or_default();
        entry.status = ThemeStatus::Applying;

        match self.target.upsert_style(&element_id, css) {
            Ok(()) => {
                entry.status = ThemeStatus::Applied;
                entry.last_good = Some(css.to_string());
                entry.last_error = None;
                info!(%tenant, %element_id, "theme applied");
                Ok(ThemeStatus::Applied)
            }
            Err(err) => {
                entry.status = ThemeStatus::Unapplied;
                entry.last_error = Some(err.clone());
                warn!(%tenant, %element_id, error = %err, "theme apply failed");
                Err(err.into())
            }
        }
    }

    /// Detach the tenant's style element
    pub fn remove(&mut self, tenant: &TenantId) -> Result<()> {
        let element_id = tenant.style_element_id();
        if self.target.is_available() {
            if let Err(err) = self.target.remove_style(&element_id) {
                if let Some(entry) = self.entries.get_mut(tenant) {
                    entry.last_error = Some(err.clone());
                }
                warn!(%tenant, %element_id, error = %err, "theme removal failed");
                return Err(err.into());
            }
        }

        if let Some(entry) = self.entries.get_mut(tenant) {
            entry.status = ThemeStatus::Removed;
            entry.last_error = None;
        }
        info!(%tenant, %element_id, "theme removed");
        Ok(())
    }

    /// Apply the requested theme, else the last one that worked, else the default
    pub fn apply_or_fallback(
        &mut self,
        tenant: &TenantId,
        input: &ThemeInput,
        config: &ThemeConfig,
    ) -> Result<ThemeSource> {
        match build_theme_tokens(input, config) {
            Ok(result) => match self.apply(tenant, &result) {
                Ok(_) => return Ok(ThemeSource::Requested),
                Err(err) => warn!(%tenant, error = %err, "requested theme not applied"),
            },
            Err(err) => warn!(%tenant, error = %err, "requested theme failed to build"),
        }

        let last_good = self
            .entries
            .get(tenant)
            .and_then(|entry| entry.last_good.clone());
        if let Some(css) = last_good {
            if self.apply_css(tenant, &css).is_ok() {
                return Ok(ThemeSource::LastKnownGood);
            }
        }

        let fallback = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default())?;
        self.apply(tenant, &fallback)?;
        Ok(ThemeSource::Default)
    }

    pub fn status(&self, tenant: &TenantId) -> ThemeStatus {
        self.entries
            .get(tenant)
            .map(|entry| entry.status)
            .unwrap_or_default()
    }

    /// Error from the last failed write, cleared by the next success
    pub fn last_error(&self, tenant: &TenantId) -> Option<&TargetError> {
        self.entries.get(tenant)?.last_error.as_ref()
    }

    /// CSS currently injected for `tenant`
    pub fn applied_css(&self, tenant: &TenantId) -> Option<&str> {
        let entry = self.entries.get(tenant)?;
        match entry.status {
            ThemeStatus::Applied => entry.last_good.as_deref(),
            _ => None,
        }
    }

    /// Tenants with a theme currently applied
    pub fn applied_tenants(&self) -> impl Iterator<Item = &TenantId> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.status == ThemeStatus::Applied)
            .map(|(tenant, _)| tenant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{MemoryTarget, NoopTarget};

    fn tenant(slug: &str) -> TenantId {
        TenantId::new(slug).unwrap()
    }

    #[test]
    fn test_tenant_slug_rules() {
        assert!(TenantId::new("pizzaria-do-ze").is_ok());
        assert!(TenantId::new("bar42").is_ok());
        for bad in ["", "Pizzaria", "pizza ria", "-pizza", "pizza-", "açaí"] {
            assert!(
                matches!(TenantId::new(bad), Err(ThemeError::InvalidTenant(_))),
                "{bad:?} accepted"
            );
        }
        assert_eq!(tenant("bar42").style_element_id(), "tenant-theme-bar42");
    }

    #[test]
    fn test_status_transitions() {
        let mut registry = ThemeRegistry::new(MemoryTarget::new());
        let id = tenant("cantina");
        assert_eq!(registry.status(&id), ThemeStatus::Unapplied);

        let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
        assert_eq!(registry.apply(&id, &result).unwrap(), ThemeStatus::Applied);
        assert_eq!(registry.applied_css(&id), Some(result.css.as_str()));

        registry.remove(&id).unwrap();
        assert_eq!(registry.status(&id), ThemeStatus::Removed);
        assert_eq!(registry.applied_css(&id), None);
        assert!(registry.target().is_empty());
    }

    #[test]
    fn test_failed_write_returns_to_unapplied() {
        let mut target = MemoryTarget::new();
        target.fail_writes(true);
        let mut registry = ThemeRegistry::new(target);
        let id = tenant("cantina");

        let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
        let err = registry.apply(&id, &result).unwrap_err();
        assert!(matches!(err, ThemeError::Target(TargetError::Write { .. })));
        assert_eq!(registry.status(&id), ThemeStatus::Unapplied);
        assert!(registry.last_error(&id).is_some());
        assert!(registry.target().is_empty());
    }

    #[test]
    fn test_unavailable_target_is_a_no_op() {
        let mut registry = ThemeRegistry::new(NoopTarget);
        let id = tenant("cantina");
        let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
        assert_eq!(registry.apply(&id, &result).unwrap(), ThemeStatus::Unapplied);
        assert!(registry.last_error(&id).is_none());
        assert!(registry.remove(&id).is_ok());
    }
}
