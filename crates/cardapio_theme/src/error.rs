//! Theme error types

use cardapio_core::ColorError;
use thiserror::Error;

/// Errors surfaced to callers of the theme engine
///
/// Malformed brand colors are absorbed by the builder (fallback + diagnostic);
/// only contradictory configuration and target failures reach this type.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// A brand color failed strict validation
    #[error("invalid {field} color: {source}")]
    InvalidColor {
        field: &'static str,
        #[source]
        source: ColorError,
    },

    /// Step keys are empty, unsorted, duplicated, out of range or too many
    #[error("invalid step keys: {0}")]
    InvalidStepKeys(String),

    /// A lightness override names a slot that does not exist
    #[error("unknown token slot in target_lightness: {0:?}")]
    UnknownSlot(String),

    /// A lightness override is outside 0..=100
    #[error("target lightness for {slot} must be within 0..=100, got {value}")]
    InvalidTargetLightness { slot: String, value: f64 },

    /// Correction step or iteration cap is not positive
    #[error("invalid correction policy: {0}")]
    InvalidCorrection(String),

    /// The CSS prefix normalizes to nothing usable
    #[error("invalid css prefix {0:?}")]
    InvalidPrefix(String),

    /// Tenant identifiers must be URL slugs
    #[error("invalid tenant slug {0:?}")]
    InvalidTenant(String),

    /// Writing to the theme target failed
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Theme file could not be parsed
    #[error("failed to parse theme file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Stored theme JSON could not be parsed
    #[error("failed to parse stored theme: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`crate::target::ThemeTarget`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The target has no document to write into (e.g. server-side render)
    #[error("theme target unavailable: {0}")]
    Unavailable(String),

    /// The target rejected the write
    #[error("failed to write style element {element_id}: {reason}")]
    Write { element_id: String, reason: String },
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
