//! Semantic color tokens

use cardapio_core::Color;
use serde::Serialize;

use super::ColorPair;
use crate::contrast::AdjustedSide;

/// Base hue for success states (green 600)
pub const SUCCESS_BASE: Color = Color::from_hex(0x16a34a);
/// Base hue for warning states (amber 600)
pub const WARNING_BASE: Color = Color::from_hex(0xd97706);
/// Base hue for danger states (red 600)
pub const DANGER_BASE: Color = Color::from_hex(0xdc2626);

/// Lightness of status foregrounds, drawn from the same scale as the background
pub const STATUS_FOREGROUND_TARGET: f64 = 24.0;

/// Semantic slot keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticSlot {
    // Status
    Success,
    Warning,
    Danger,
    Info,

    // Text tones on the base surface
    TextStrong,
    TextBody,
    TextMuted,
}

impl SemanticSlot {
    pub const ALL: [SemanticSlot; 7] = [
        SemanticSlot::Success,
        SemanticSlot::Warning,
        SemanticSlot::Danger,
        SemanticSlot::Info,
        SemanticSlot::TextStrong,
        SemanticSlot::TextBody,
        SemanticSlot::TextMuted,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::TextStrong => "text-strong",
            Self::TextBody => "text-body",
            Self::TextMuted => "text-muted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "Sucesso",
            Self::Warning => "Aviso",
            Self::Danger => "Perigo",
            Self::Info => "Informação",
            Self::TextStrong => "Texto forte",
            Self::TextBody => "Texto padrão",
            Self::TextMuted => "Texto suave",
        }
    }

    /// Status slots target their background; text tones target their foreground
    pub fn default_target_lightness(self) -> f64 {
        match self {
            Self::Success | Self::Warning | Self::Danger | Self::Info => 94.0,
            Self::TextStrong => 15.0,
            Self::TextBody => 30.0,
            Self::TextMuted => 45.0,
        }
    }

    pub fn is_status(self) -> bool {
        matches!(
            self,
            Self::Success | Self::Warning | Self::Danger | Self::Info
        )
    }

    /// Surfaces and tinted status backgrounds stay put; text moves
    pub fn preferred_side(self) -> AdjustedSide {
        AdjustedSide::Foreground
    }
}

/// Surface levels drawn from the neutral scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfaceTokens {
    /// Page background
    pub base: Color,
    /// Cards and popovers
    pub raised: Color,
    /// Wells and table stripes
    pub sunken: Color,
    /// Modal scrim
    pub overlay: Color,
    pub border: Color,
}

/// Complete set of semantic tokens
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SemanticTokens {
    // Status colors
    pub success: ColorPair,
    pub warning: ColorPair,
    pub danger: ColorPair,
    pub info: ColorPair,

    // Text tones (background is `surface.base`)
    pub text_strong: ColorPair,
    pub text_body: ColorPair,
    pub text_muted: ColorPair,

    pub surface: SurfaceTokens,
}

impl SemanticTokens {
    /// Get a pair by slot key
    pub fn pair(&self, slot: SemanticSlot) -> ColorPair {
        match slot {
            SemanticSlot::Success => self.success,
            SemanticSlot::Warning => self.warning,
            SemanticSlot::Danger => self.danger,
            SemanticSlot::Info => self.info,
            SemanticSlot::TextStrong => self.text_strong,
            SemanticSlot::TextBody => self.text_body,
            SemanticSlot::TextMuted => self.text_muted,
        }
    }

    pub(crate) fn pair_mut(&mut self, slot: SemanticSlot) -> &mut ColorPair {
        match slot {
            SemanticSlot::Success => &mut self.success,
            SemanticSlot::Warning => &mut self.warning,
            SemanticSlot::Danger => &mut self.danger,
            SemanticSlot::Info => &mut self.info,
            SemanticSlot::TextStrong => &mut self.text_strong,
            SemanticSlot::TextBody => &mut self.text_body,
            SemanticSlot::TextMuted => &mut self.text_muted,
        }
    }

    /// All pairs in slot order
    pub fn pairs(&self) -> impl Iterator<Item = (SemanticSlot, ColorPair)> + '_ {
        SemanticSlot::ALL.iter().map(move |slot| (*slot, self.pair(*slot)))
    }
}
