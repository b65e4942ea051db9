//! Theme input and build options
//!
//! A tenant's stored theme is two brand colors plus an optional `[options]`
//! table. Both TOML (`theme.toml`) and the JSON stored alongside a restaurant
//! record (`{"primaryHex": ..., "secondaryHex": ...}`) are accepted.

use std::collections::BTreeMap;

use cardapio_core::Color;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::contrast::{AccessibilityLevel, AdjustedSide, CorrectionPolicy};
use crate::css::kebab_case;
use crate::error::{Result, ThemeError};
use crate::scale::{validate_step_keys, ScaleOptions, StepKey, DEFAULT_STEP_KEYS};
use crate::tokens::TokenSlot;

/// Primary color used when a tenant has none or a malformed one
pub const DEFAULT_PRIMARY: Color = Color::from_hex(0x3b82f6);
/// Secondary color used when a tenant has none or a malformed one
pub const DEFAULT_SECONDARY: Color = Color::from_hex(0x10b981);

/// Largest lightness step the corrector may take per iteration
const MAX_CORRECTION_STEP: f64 = 50.0;

/// The two brand colors a tenant picks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInput {
    #[serde(alias = "primaryHex", alias = "primary")]
    pub primary_hex: String,
    #[serde(alias = "secondaryHex", alias = "secondary")]
    pub secondary_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ThemeInput {
    pub fn new(primary_hex: impl Into<String>, secondary_hex: impl Into<String>) -> Self {
        Self {
            primary_hex: primary_hex.into(),
            secondary_hex: secondary_hex.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Strict check of both colors
    ///
    /// The builder never calls this; it substitutes defaults instead. Editors
    /// call it to reject a form before saving.
    pub fn validate(&self) -> Result<()> {
        Color::parse_hex(&self.primary_hex).map_err(|source| ThemeError::InvalidColor {
            field: "primary",
            source,
        })?;
        Color::parse_hex(&self.secondary_hex).map_err(|source| ThemeError::InvalidColor {
            field: "secondary",
            source,
        })?;
        Ok(())
    }
}

impl Default for ThemeInput {
    fn default() -> Self {
        Self {
            primary_hex: DEFAULT_PRIMARY.to_hex(),
            secondary_hex: DEFAULT_SECONDARY.to_hex(),
            name: Some("Padrão".to_string()),
        }
    }
}

/// Build options
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Minimum contrast every pair must reach
    #[serde(default, alias = "accessibilityLevel")]
    pub accessibility_level: AccessibilityLevel,
    /// Scale step keys, strictly ascending
    #[serde(default = "default_step_keys", alias = "stepKeys")]
    pub step_keys: Vec<StepKey>,
    #[serde(default = "default_true", alias = "saturationTaper")]
    pub saturation_taper: bool,
    /// Slot name (`button-primary`, `text-muted`, ...) to target lightness
    #[serde(default, alias = "targetLightness")]
    pub target_lightness: BTreeMap<String, f64>,
    #[serde(
        default = "default_max_correction_iterations",
        alias = "maxCorrectionIterations"
    )]
    pub max_correction_iterations: u32,
    #[serde(default = "default_correction_step", alias = "correctionStep")]
    pub correction_step: f64,
    /// Prepended to every CSS variable name
    #[serde(default, alias = "cssPrefix", skip_serializing_if = "Option::is_none")]
    pub css_prefix: Option<String>,
}

fn default_step_keys() -> Vec<StepKey> {
    DEFAULT_STEP_KEYS.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_max_correction_iterations() -> u32 {
    CorrectionPolicy::DEFAULT_MAX_ITERATIONS
}

fn default_correction_step() -> f64 {
    CorrectionPolicy::DEFAULT_STEP
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accessibility_level: AccessibilityLevel::default(),
            step_keys: default_step_keys(),
            saturation_taper: true,
            target_lightness: BTreeMap::new(),
            max_correction_iterations: default_max_correction_iterations(),
            correction_step: default_correction_step(),
            css_prefix: None,
        }
    }
}

impl ThemeConfig {
    /// Parse a bare options table
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject contradictory options
    pub fn validate(&self) -> Result<()> {
        validate_step_keys(&self.step_keys)?;
        self.target_overrides()?;

        if !self.correction_step.is_finite()
            || self.correction_step <= 0.0
            || self.correction_step > MAX_CORRECTION_STEP
        {
            return Err(ThemeError::InvalidCorrection(format!(
                "correction_step must be within (0, {MAX_CORRECTION_STEP}], got {}",
                self.correction_step
            )));
        }
        if self.max_correction_iterations == 0 {
            return Err(ThemeError::InvalidCorrection(
                "max_correction_iterations must be at least 1".into(),
            ));
        }
        self.prefix()?;
        Ok(())
    }

    /// Lightness overrides keyed by slot
    pub fn target_overrides(&self) -> Result<FxHashMap<TokenSlot, f64>> {
        let mut overrides = FxHashMap::default();
        for (name, value) in &self.target_lightness {
            let slot: TokenSlot = name.parse().map_err(ThemeError::UnknownSlot)?;
            if !value.is_finite() || !(0.0..=100.0).contains(value) {
                return Err(ThemeError::InvalidTargetLightness {
                    slot: name.clone(),
                    value: *value,
                });
            }
            overrides.insert(slot, *value);
        }
        Ok(overrides)
    }

    /// Normalized CSS prefix, `None` when unset
    pub fn prefix(&self) -> Result<Option<String>> {
        let Some(raw) = self.css_prefix.as_deref() else {
            return Ok(None);
        };
        let normalized = kebab_case(raw);
        match normalized.chars().next() {
            Some(c) if c.is_ascii_lowercase() => Ok(Some(normalized)),
            _ => Err(ThemeError::InvalidPrefix(raw.to_string())),
        }
    }

    pub fn scale_options(&self) -> ScaleOptions {
        ScaleOptions {
            saturation_taper: self.saturation_taper,
        }
    }

    pub fn correction_policy(&self, prefer: AdjustedSide) -> CorrectionPolicy {
        CorrectionPolicy {
            min_ratio: self.accessibility_level.min_ratio(),
            step: self.correction_step,
            max_iterations: self.max_correction_iterations,
            prefer,
        }
    }
}

/// A stored theme: brand colors plus optional `[options]`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    #[serde(flatten)]
    pub input: ThemeInput,
    #[serde(default)]
    pub options: ThemeConfig,
}

impl ThemeDocument {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let document: Self = toml::from_str(source)?;
        document.options.validate()?;
        Ok(document)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(source)?;
        document.options.validate()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{ComponentSlot, SemanticSlot};

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::default();
        assert_eq!(config.accessibility_level, AccessibilityLevel::Aa);
        assert_eq!(config.step_keys, DEFAULT_STEP_KEYS.to_vec());
        assert!(config.saturation_taper);
        assert!(config.validate().is_ok());
        assert!(ThemeInput::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ThemeConfig::from_toml_str("").unwrap(), ThemeConfig::default());
    }

    #[test]
    fn test_parse_full_document() {
        let doc = ThemeDocument::from_toml_str(
            r##"
            primary = "#b91c1c"
            secondary_hex = "#f59e0b"
            name = "Cantina"

            [options]
            accessibility_level = "AAA"
            step_keys = [100, 300, 500, 700, 900]
            css_prefix = "Cardapio"

            [options.target_lightness]
            button-primary = 40.0
            text-muted = 40
            "##,
        )
        .unwrap();

        assert_eq!(doc.input.primary_hex, "#b91c1c");
        assert_eq!(doc.input.secondary_hex, "#f59e0b");
        assert_eq!(doc.input.name.as_deref(), Some("Cantina"));
        assert_eq!(doc.options.accessibility_level, AccessibilityLevel::Aaa);
        assert_eq!(doc.options.prefix().unwrap().as_deref(), Some("cardapio"));

        let overrides = doc.options.target_overrides().unwrap();
        assert_eq!(
            overrides.get(&TokenSlot::Component(ComponentSlot::ButtonPrimary)),
            Some(&40.0)
        );
        assert_eq!(
            overrides.get(&TokenSlot::Semantic(SemanticSlot::TextMuted)),
            Some(&40.0)
        );
    }

    #[test]
    fn test_parse_stored_json() {
        let doc = ThemeDocument::from_json_str(
            r##"{"primaryHex": "#3b82f6", "secondaryHex": "#10b981"}"##,
        )
        .unwrap();
        assert_eq!(doc.input.primary_hex, "#3b82f6");
        assert_eq!(doc.input.name, None);
        assert_eq!(doc.options, ThemeConfig::default());
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = ThemeConfig::from_toml_str("step_size = 3").unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
    }

    #[test]
    fn test_contradictory_options() {
        let unsorted = ThemeConfig {
            step_keys: vec![500, 100],
            ..ThemeConfig::default()
        };
        assert!(matches!(unsorted.validate(), Err(ThemeError::InvalidStepKeys(_))));

        let mut unknown = ThemeConfig::default();
        unknown.target_lightness.insert("button-tertiary".into(), 40.0);
        assert!(matches!(unknown.validate(), Err(ThemeError::UnknownSlot(name)) if name == "button-tertiary"));

        let mut out_of_range = ThemeConfig::default();
        out_of_range.target_lightness.insert("card".into(), 120.0);
        assert!(matches!(
            out_of_range.validate(),
            Err(ThemeError::InvalidTargetLightness { .. })
        ));

        let zero_step = ThemeConfig {
            correction_step: 0.0,
            ..ThemeConfig::default()
        };
        assert!(matches!(zero_step.validate(), Err(ThemeError::InvalidCorrection(_))));

        let no_iterations = ThemeConfig {
            max_correction_iterations: 0,
            ..ThemeConfig::default()
        };
        assert!(matches!(no_iterations.validate(), Err(ThemeError::InvalidCorrection(_))));

        let bad_prefix = ThemeConfig {
            css_prefix: Some("--".into()),
            ..ThemeConfig::default()
        };
        assert!(matches!(bad_prefix.validate(), Err(ThemeError::InvalidPrefix(_))));
    }

    #[test]
    fn test_strict_input_validation() {
        let err = ThemeInput::new("#3b82f6", "green").validate().unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { field: "secondary", .. }));
    }

    #[test]
    fn test_policy_carries_options() {
        let config = ThemeConfig {
            accessibility_level: AccessibilityLevel::Aaa,
            correction_step: 1.5,
            max_correction_iterations: 10,
            ..ThemeConfig::default()
        };
        let policy = config.correction_policy(AdjustedSide::Foreground);
        assert_eq!(policy.min_ratio, 7.0);
        assert_eq!(policy.step, 1.5);
        assert_eq!(policy.max_iterations, 10);
        assert_eq!(policy.prefer, AdjustedSide::Foreground);
    }
}
