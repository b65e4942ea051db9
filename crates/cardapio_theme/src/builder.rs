//! Theme token builder
//!
//! [`build_theme_tokens`] is the whole pipeline: brand colors in, scales,
//! semantic and component tokens, a validation report and CSS text out.
//! It is pure; the same input and config always give the same result.

use cardapio_core::Color;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ThemeConfig, ThemeInput, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
use crate::contrast::{
    auto_correct, best_text_color, check_pair, AccessibilityLevel, AdjustedSide, ContrastCheck,
    CorrectionOutcome,
};
use crate::css::{serialize_root, to_css_variable_map};
use crate::error::Result;
use crate::scale::{build_scale, neutral_scale, ColorScale, StepKey};
use crate::tokens::{
    ColorPair, ComponentColors, ComponentRole, ComponentSlot, ComponentTokens, ScaleRole,
    SemanticSlot, SemanticTokens, SurfaceLevel, SurfaceTokens, TokenSlot, DANGER_BASE, NEAR_BLACK,
    NEAR_WHITE, STATUS_FOREGROUND_TARGET, SUCCESS_BASE, WARNING_BASE,
};

// Surface lightness targets on the neutral scale
const SURFACE_RAISED: f64 = 97.0;
const SURFACE_SUNKEN: f64 = 94.0;
const SURFACE_OVERLAY: f64 = 14.0;
const SURFACE_BORDER: f64 = 86.0;

// Decorations
const OUTLINE_BORDER: f64 = 55.0;
const INPUT_BORDER: f64 = 77.0;
const FOCUS_RING: f64 = 55.0;
const CHIP_BORDER: f64 = 86.0;

const TEXT_CANDIDATES: [Color; 2] = [NEAR_WHITE, NEAR_BLACK];

/// A pair the corrector changed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Adjustment {
    pub slot: TokenSlot,
    pub side: AdjustedSide,
    pub from: ColorPair,
    pub to: ColorPair,
    pub ratio_before: f64,
    pub ratio_after: f64,
    pub message: String,
}

/// A pair that still misses the required ratio after correction
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContrastWarning {
    pub slot: TokenSlot,
    pub pair: ColorPair,
    pub ratio: f64,
    pub required: f64,
    pub message: String,
}

/// What the builder changed or could not fix
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub adjustments: Vec<Adjustment>,
    pub warnings: Vec<ContrastWarning>,
    /// Input problems absorbed by fallbacks
    pub diagnostics: Vec<String>,
}

impl ValidationReport {
    /// No adjustments, warnings or diagnostics
    pub fn is_clean(&self) -> bool {
        self.adjustments.is_empty() && self.warnings.is_empty() && self.diagnostics.is_empty()
    }

    pub fn adjustment(&self, slot: TokenSlot) -> Option<&Adjustment> {
        self.adjustments.iter().find(|a| a.slot == slot)
    }

    pub fn warning(&self, slot: TokenSlot) -> Option<&ContrastWarning> {
        self.warnings.iter().find(|w| w.slot == slot)
    }
}

/// Everything derived from one [`ThemeInput`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemeBuildResult {
    pub name: String,
    pub level: AccessibilityLevel,
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub neutral: ColorScale,
    pub semantic: SemanticTokens,
    pub components: ComponentTokens,
    pub report: ValidationReport,
    /// Normalized CSS variable prefix
    pub css_prefix: Option<String>,
    /// Serialized `:root { ... }` block
    pub css: String,
}

impl ThemeBuildResult {
    /// Final pair for any slot
    pub fn pair(&self, slot: TokenSlot) -> ColorPair {
        match slot {
            TokenSlot::Semantic(slot) => self.semantic.pair(slot),
            TokenSlot::Component(slot) => self.components.get(slot).pair,
        }
    }

    /// Every slot with its final pair and measured contrast
    pub fn contrast_report(&self) -> Vec<(TokenSlot, ColorPair, ContrastCheck)> {
        TokenSlot::all()
            .map(|slot| {
                let pair = self.pair(slot);
                (slot, pair, check_pair(pair.foreground, pair.background))
            })
            .collect()
    }
}

/// Build the complete token set for a tenant
///
/// Malformed brand colors fall back to [`DEFAULT_PRIMARY`] and
/// [`DEFAULT_SECONDARY`] with a diagnostic; only an invalid `config` fails.
pub fn build_theme_tokens(input: &ThemeInput, config: &ThemeConfig) -> Result<ThemeBuildResult> {
    config.validate()?;
    let overrides = config.target_overrides()?;
    let css_prefix = config.prefix()?;

    let mut report = ValidationReport::default();
    let primary_base = resolve_brand("primary", &input.primary_hex, DEFAULT_PRIMARY, &mut report);
    let secondary_base =
        resolve_brand("secondary", &input.secondary_hex, DEFAULT_SECONDARY, &mut report);

    let keys = &config.step_keys;
    let options = config.scale_options();
    let scales = Scales {
        primary: build_scale(primary_base, keys, options)?,
        secondary: build_scale(secondary_base, keys, options)?,
        neutral: neutral_scale(keys)?,
    };
    debug!(
        primary = %primary_base,
        secondary = %secondary_base,
        steps = keys.len(),
        "built theme scales"
    );

    let builder = TokenBuilder {
        config,
        overrides: &overrides,
        scales: &scales,
        surface: surfaces(&scales.neutral),
    };

    let mut semantic = builder.semantic_tokens(keys)?;
    for slot in SemanticSlot::ALL {
        let pair = semantic.pair_mut(slot);
        *pair = builder.validate(slot.into(), *pair, &mut report);
    }

    let components = ComponentTokens::from_fn(|slot| {
        let colors = builder.component(slot);
        ComponentColors {
            pair: builder.validate(slot.into(), colors.pair, &mut report),
            ..colors
        }
    });

    debug!(
        adjustments = report.adjustments.len(),
        warnings = report.warnings.len(),
        "validated theme tokens"
    );

    let Scales {
        primary,
        secondary,
        neutral,
    } = scales;
    let mut result = ThemeBuildResult {
        name: input
            .name
            .clone()
            .unwrap_or_else(|| format!("{} / {}", primary_base, secondary_base)),
        level: config.accessibility_level,
        primary,
        secondary,
        neutral,
        semantic,
        components,
        report,
        css_prefix,
        css: String::new(),
    };
    result.css = serialize_root(&to_css_variable_map(&result));
    Ok(result)
}

fn resolve_brand(field: &str, hex: &str, fallback: Color, report: &mut ValidationReport) -> Color {
    match Color::parse_hex(hex) {
        Ok(color) => color,
        Err(err) => {
            warn!(field, input = hex, %fallback, "malformed brand color, using fallback");
            report.diagnostics.push(format!(
                "Cor {} inválida ({err}); usando {fallback}",
                field_label(field)
            ));
            fallback
        }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "primary" => "primária",
        "secondary" => "secundária",
        other => other,
    }
}

fn surfaces(neutral: &ColorScale) -> SurfaceTokens {
    SurfaceTokens {
        base: Color::WHITE,
        raised: neutral.closest_to_lightness(SURFACE_RAISED).color,
        sunken: neutral.closest_to_lightness(SURFACE_SUNKEN).color,
        overlay: neutral.closest_to_lightness(SURFACE_OVERLAY).color,
        border: neutral.closest_to_lightness(SURFACE_BORDER).color,
    }
}

struct Scales {
    primary: ColorScale,
    secondary: ColorScale,
    neutral: ColorScale,
}

impl Scales {
    fn get(&self, role: ScaleRole) -> &ColorScale {
        match role {
            ScaleRole::Primary => &self.primary,
            ScaleRole::Secondary => &self.secondary,
            ScaleRole::Neutral => &self.neutral,
        }
    }
}

struct TokenBuilder<'a> {
    config: &'a ThemeConfig,
    overrides: &'a FxHashMap<TokenSlot, f64>,
    scales: &'a Scales,
    surface: SurfaceTokens,
}

impl TokenBuilder<'_> {
    fn target(&self, slot: TokenSlot, default: f64) -> f64 {
        self.overrides.get(&slot).copied().unwrap_or(default)
    }

    fn pick(&self, role: ScaleRole, lightness: f64) -> Color {
        self.scales.get(role).closest_to_lightness(lightness).color
    }

    fn semantic_tokens(&self, keys: &[StepKey]) -> Result<SemanticTokens> {
        let options = self.config.scale_options();
        let success = build_scale(SUCCESS_BASE, keys, options)?;
        let warning = build_scale(WARNING_BASE, keys, options)?;
        let danger = build_scale(DANGER_BASE, keys, options)?;

        let status = |slot: SemanticSlot, scale: &ColorScale| {
            let bg = self.target(slot.into(), slot.default_target_lightness());
            ColorPair::new(
                scale.closest_to_lightness(bg).color,
                scale.closest_to_lightness(STATUS_FOREGROUND_TARGET).color,
            )
        };
        let text = |slot: SemanticSlot| {
            let fg = self.target(slot.into(), slot.default_target_lightness());
            ColorPair::new(self.surface.base, self.pick(ScaleRole::Neutral, fg))
        };

        Ok(SemanticTokens {
            success: status(SemanticSlot::Success, &success),
            warning: status(SemanticSlot::Warning, &warning),
            danger: status(SemanticSlot::Danger, &danger),
            info: status(SemanticSlot::Info, &self.scales.secondary),
            text_strong: text(SemanticSlot::TextStrong),
            text_body: text(SemanticSlot::TextBody),
            text_muted: text(SemanticSlot::TextMuted),
            surface: self.surface,
        })
    }

    fn component(&self, slot: ComponentSlot) -> ComponentColors {
        let role = match self.overrides.get(&slot.into()) {
            Some(target) => slot.role().with_target(*target),
            None => slot.role(),
        };

        let pair = match role {
            ComponentRole::Filled { scale, target } => filled(self.pick(scale, target)),
            ComponentRole::OnSurface { scale, target } => {
                ColorPair::new(self.surface.base, self.pick(scale, target))
            }
            ComponentRole::Surface(SurfaceLevel::Base) => filled(self.surface.base),
            ComponentRole::Surface(SurfaceLevel::Raised) => filled(self.surface.raised),
        };

        let colors = ComponentColors::new(pair);
        match slot {
            ComponentSlot::ButtonOutline => {
                colors.with_border(self.pick(ScaleRole::Primary, OUTLINE_BORDER))
            }
            ComponentSlot::Card => colors.with_border(self.surface.border),
            ComponentSlot::Input => colors
                .with_border(self.pick(ScaleRole::Neutral, INPUT_BORDER))
                .with_focus_ring(self.pick(ScaleRole::Primary, FOCUS_RING)),
            ComponentSlot::Chip => colors.with_border(self.pick(ScaleRole::Secondary, CHIP_BORDER)),
            _ => colors,
        }
    }

    /// Run the corrector over one pair and record what happened
    fn validate(&self, slot: TokenSlot, pair: ColorPair, report: &mut ValidationReport) -> ColorPair {
        let policy = self.config.correction_policy(slot.preferred_side());
        let outcome = auto_correct(pair, &policy);
        let level = self.config.accessibility_level;
        let ratio_before = check_pair(pair.foreground, pair.background).ratio;

        match outcome {
            CorrectionOutcome::Accessible(_) => pair,
            CorrectionOutcome::Corrected(correction) => {
                let message = format!(
                    "{}: {} {} para atingir contraste {level} ({:.2}:1)",
                    slot.label(),
                    side_label(correction.side),
                    if correction.darkened { "escurecido" } else { "clareado" },
                    correction.ratio,
                );
                debug!(%slot, ratio_before, ratio_after = correction.ratio, "adjusted pair");
                report.adjustments.push(Adjustment {
                    slot,
                    side: correction.side,
                    from: pair,
                    to: correction.pair,
                    ratio_before,
                    ratio_after: correction.ratio,
                    message,
                });
                correction.pair
            }
            CorrectionOutcome::Unresolved(best) => {
                let required = policy.min_ratio;
                warn!(%slot, ratio = best.ratio, required, "contrast could not be corrected");
                report.warnings.push(ContrastWarning {
                    slot,
                    pair: best.pair,
                    ratio: best.ratio,
                    required,
                    message: format!(
                        "{}: contraste {:.2}:1 abaixo do mínimo {level} ({required:.1}:1)",
                        slot.label(),
                        best.ratio,
                    ),
                });
                best.pair
            }
        }
    }
}

/// Background with whichever text constant reads best on it
fn filled(background: Color) -> ColorPair {
    let foreground = best_text_color(background, &TEXT_CANDIDATES).unwrap_or(NEAR_BLACK);
    ColorPair::new(background, foreground)
}

fn side_label(side: AdjustedSide) -> &'static str {
    match side {
        AdjustedSide::Background => "fundo",
        AdjustedSide::Foreground => "texto",
    }
}
