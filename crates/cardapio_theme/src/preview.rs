//! Theme preview for the admin editor
//!
//! Runs the same pipeline as the live theme but never touches a registry.

use cardapio_core::Color;
use serde::Serialize;
use tracing::warn;

use crate::builder::{build_theme_tokens, ThemeBuildResult};
use crate::config::{ThemeConfig, ThemeInput};
use crate::contrast::{best_text_color, ContrastCheck};
use crate::error::Result;
use crate::scale::{ColorScale, StepKey};
use crate::tokens::{TokenSlot, NEAR_BLACK, NEAR_WHITE};

/// One scale step rendered as a swatch
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Swatch {
    pub scale: &'static str,
    pub key: StepKey,
    pub color: Color,
    /// Label color drawn on top of the swatch
    pub text: Color,
    pub is_anchor: bool,
}

/// Pass/fail badge data for one slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContrastReportEntry {
    pub slot: TokenSlot,
    pub foreground: Color,
    pub background: Color,
    pub check: ContrastCheck,
    /// The corrector changed this pair
    pub adjusted: bool,
    /// The pair still misses the configured level
    pub warned: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemePreview {
    pub result: ThemeBuildResult,
    pub swatches: Vec<Swatch>,
    pub contrast: Vec<ContrastReportEntry>,
    /// Why the requested theme could not be built, when the default is shown
    pub fallback_reason: Option<String>,
}

impl ThemePreview {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    /// Entries that meet the configured level
    pub fn passing(&self) -> usize {
        self.contrast
            .iter()
            .filter(|entry| entry.check.meets(self.result.level))
            .count()
    }
}

/// Build a preview, showing the default theme if `input`/`config` cannot build
pub fn preview_theme(input: &ThemeInput, config: &ThemeConfig) -> Result<ThemePreview> {
    let (result, fallback_reason) = match build_theme_tokens(input, config) {
        Ok(result) => (result, None),
        Err(err) => {
            warn!(error = %err, "preview falling back to the default theme");
            let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default())?;
            (result, Some(err.to_string()))
        }
    };

    let swatches = [
        ("primary", &result.primary),
        ("secondary", &result.secondary),
        ("neutral", &result.neutral),
    ]
    .into_iter()
    .flat_map(|(name, scale)| scale_swatches(name, scale))
    .collect();

    let contrast = result
        .contrast_report()
        .into_iter()
        .map(|(slot, pair, check)| ContrastReportEntry {
            slot,
            foreground: pair.foreground,
            background: pair.background,
            check,
            adjusted: result.report.adjustment(slot).is_some(),
            warned: result.report.warning(slot).is_some(),
        })
        .collect();

    Ok(ThemePreview {
        result,
        swatches,
        contrast,
        fallback_reason,
    })
}

fn scale_swatches<'a>(
    name: &'static str,
    scale: &'a ColorScale,
) -> impl Iterator<Item = Swatch> + 'a {
    scale.iter().map(move |step| Swatch {
        scale: name,
        key: step.key,
        color: step.color,
        text: best_text_color(step.color, &[NEAR_WHITE, NEAR_BLACK]).unwrap_or(NEAR_BLACK),
        is_anchor: step.key == scale.anchor_key(),
    })
}
