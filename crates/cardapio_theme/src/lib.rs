//! Cardapio Theme Engine
//!
//! Turns a restaurant's two brand colors into an accessible design-token
//! palette and injects it as CSS custom properties, one style element per
//! tenant.
//!
//! # Pipeline
//!
//! 1. **Scales**: [`build_scale`] derives an ordered lightness ramp around each
//!    brand color; [`neutral_scale`] supplies a fixed cool gray.
//! 2. **Tokens**: the builder binds scale steps to semantic slots (status
//!    colors, text tones, surfaces) and component slots (buttons, badges,
//!    card, input, sidebar, chips).
//! 3. **Contrast**: every foreground/background pair is checked against the
//!    configured WCAG level and nudged in lightness when it falls short.
//! 4. **CSS**: the result is flattened into `--kebab-case` variables under a
//!    single `:root` block.
//! 5. **Injection**: [`ThemeRegistry`] writes that block through a
//!    [`ThemeTarget`], replacing in place on every re-apply.
//!
//! # Quick Start
//!
//! ```rust
//! use cardapio_theme::{
//!     build_theme_tokens, MemoryTarget, TenantId, ThemeConfig, ThemeInput, ThemeRegistry,
//! };
//!
//! let input = ThemeInput::new("#b91c1c", "#f59e0b").with_name("Cantina");
//! let result = build_theme_tokens(&input, &ThemeConfig::default()).unwrap();
//! assert!(result.css.starts_with(":root {"));
//!
//! let mut registry = ThemeRegistry::new(MemoryTarget::new());
//! let tenant = TenantId::new("cantina").unwrap();
//! registry.apply(&tenant, &result).unwrap();
//! registry.apply(&tenant, &result).unwrap();
//! assert_eq!(registry.target().len(), 1);
//! ```
//!
//! All stages except injection are pure: the same input and [`ThemeConfig`]
//! always produce the same [`ThemeBuildResult`].

pub mod builder;
pub mod config;
pub mod contrast;
pub mod css;
pub mod error;
pub mod preview;
pub mod registry;
pub mod scale;
pub mod target;
pub mod tokens;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub use builder::{
    build_theme_tokens, Adjustment, ContrastWarning, ThemeBuildResult, ValidationReport,
};
pub use config::{ThemeConfig, ThemeDocument, ThemeInput, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
pub use contrast::{
    auto_correct, batch_contrast_test, check_contrast, check_pair, contrast_ratio,
    AccessibilityLevel, AdjustedSide, ContrastCheck, ContrastLevel, CorrectionOutcome,
    CorrectionPolicy,
};
pub use css::{serialize_root, to_css_variable_map, CssVariables};
pub use error::{Result, TargetError, ThemeError};
pub use preview::{preview_theme, ContrastReportEntry, Swatch, ThemePreview};
pub use registry::{TenantId, ThemeRegistry, ThemeSource, ThemeStatus};
pub use scale::{build_scale, neutral_scale, ColorScale, ScaleOptions, ScaleStep, StepKey};
pub use target::{MemoryTarget, NoopTarget, ThemeTarget};
pub use tokens::{
    ColorPair, ComponentColors, ComponentSlot, ComponentTokens, SemanticSlot, SemanticTokens,
    SurfaceTokens, TokenSlot,
};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::DomTarget;

// Color primitives
pub use cardapio_core::{hex_to_hsl, hsl_to_hex, Color, Hsl};
