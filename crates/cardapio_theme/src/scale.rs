//! Color scale generation
//!
//! A scale is an ordered set of lightness variants of one base hue, keyed by
//! step (`50`, `100`, ... `950`). Lightness follows a fixed design curve that
//! is re-anchored on the base color, so the input color itself appears at its
//! nearest step:
//!
//! ```text
//!  key        50   100  200  300  400  500  600  700  800  900  950
//!  curve L    97   94   86   77   66   55   45   37   29   22   14
//! ```
//!
//! Steps lighter than the anchor are rescaled into `(anchor, 100]` and darker
//! steps into `[0, anchor)`. Adjacent steps always differ by at least
//! [`MIN_STEP_DELTA`] lightness points; a base that sits at an extreme pulls
//! the anchor inward to make room (the scale is then marked as widened).

use cardapio_core::{Color, Hsl};
use serde::Serialize;

use crate::error::{Result, ThemeError};

/// Step identifier within a scale
pub type StepKey = u16;

/// Default 11-step ramp
pub const DEFAULT_STEP_KEYS: [StepKey; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Largest accepted step key
pub const MAX_STEP_KEY: StepKey = 1000;

/// Upper bound on the number of steps in a custom key list
pub const MAX_STEPS: usize = 25;

/// Minimum lightness distance between adjacent steps
pub const MIN_STEP_DELTA: f64 = 2.0;

/// Base of the constant neutral ramp (cool slate gray, sits on step 500)
pub const NEUTRAL_BASE: Color = Color::from_hex(0x7a899f);

/// Design lightness curve as `(key, lightness)` anchors
const LIGHTNESS_CURVE: [(f64, f64); 13] = [
    (0.0, 99.0),
    (50.0, 97.0),
    (100.0, 94.0),
    (200.0, 86.0),
    (300.0, 77.0),
    (400.0, 66.0),
    (500.0, 55.0),
    (600.0, 45.0),
    (700.0, 37.0),
    (800.0, 29.0),
    (900.0, 22.0),
    (950.0, 14.0),
    (1000.0, 8.0),
];

// Bounds of the even fallback curve used when keys are packed too densely
const EVEN_CURVE_TOP: f64 = 97.0;
const EVEN_CURVE_BOTTOM: f64 = 8.0;

// Saturation taper
const TAPER_LIGHT_START: f64 = 85.0;
const TAPER_DARK_START: f64 = 20.0;
const TAPER_MAX: f64 = 0.3;

/// Options for [`build_scale`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleOptions {
    /// Desaturate very light and very dark steps
    pub saturation_taper: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            saturation_taper: true,
        }
    }
}

/// One entry of a [`ColorScale`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleStep {
    pub key: StepKey,
    pub color: Color,
    /// HSL lightness of `color` in percent
    pub lightness: f64,
}

/// Ordered lightness scale for one base color
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorScale {
    base: Color,
    steps: Vec<ScaleStep>,
    anchor_key: StepKey,
    widened: bool,
}

impl ColorScale {
    /// Color at `key`, if the key is part of this scale
    pub fn get(&self, key: StepKey) -> Option<Color> {
        self.steps.iter().find(|s| s.key == key).map(|s| s.color)
    }

    /// Steps in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &ScaleStep> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[ScaleStep] {
        &self.steps
    }

    pub fn keys(&self) -> impl Iterator<Item = StepKey> + '_ {
        self.steps.iter().map(|s| s.key)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The color this scale was derived from
    pub fn base(&self) -> Color {
        self.base
    }

    /// Step that carries the base color (or its widened replacement)
    pub fn anchor_key(&self) -> StepKey {
        self.anchor_key
    }

    /// Whether the minimum-delta rule had to move the anchor
    pub fn is_widened(&self) -> bool {
        self.widened
    }

    /// Step whose lightness is closest to `target` (ties go to the lighter step)
    pub fn closest_to_lightness(&self, target: f64) -> ScaleStep {
        let mut best = self.steps[0];
        for step in &self.steps[1..] {
            if (step.lightness - target).abs() < (best.lightness - target).abs() {
                best = *step;
            }
        }
        best
    }
}

/// Validate a custom step-key list
pub fn validate_step_keys(keys: &[StepKey]) -> Result<()> {
    if keys.is_empty() {
        return Err(ThemeError::InvalidStepKeys("no step keys".into()));
    }
    if keys.len() > MAX_STEPS {
        return Err(ThemeError::InvalidStepKeys(format!(
            "{} steps exceeds the maximum of {MAX_STEPS}",
            keys.len()
        )));
    }
    if let Some(key) = keys.iter().find(|k| **k > MAX_STEP_KEY) {
        return Err(ThemeError::InvalidStepKeys(format!(
            "key {key} is above {MAX_STEP_KEY}"
        )));
    }
    if let Some(pair) = keys.windows(2).find(|w| w[0] >= w[1]) {
        return Err(ThemeError::InvalidStepKeys(format!(
            "keys must be strictly ascending ({} then {})",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Build a scale around `base` for the given step keys
pub fn build_scale(base: Color, keys: &[StepKey], options: ScaleOptions) -> Result<ColorScale> {
    validate_step_keys(keys)?;

    let hsl = base.to_hsl();
    let curve: Vec<f64> = keys.iter().map(|k| curve_lightness(*k)).collect();

    let layout = layout_steps(&curve, hsl.l).unwrap_or_else(|| {
        let even = even_curve(keys.len());
        let mut fallback = layout_steps(&even, hsl.l).unwrap_or_else(|| forced_layout(&even, hsl.l));
        fallback.widened = true;
        fallback
    });

    let steps = keys
        .iter()
        .zip(&layout.targets)
        .enumerate()
        .map(|(index, (key, target))| {
            let color = if index == layout.anchor_index && !layout.anchor_moved {
                base
            } else {
                let saturation = if options.saturation_taper {
                    tapered_saturation(hsl.s, *target)
                } else {
                    hsl.s
                };
                Hsl::new(hsl.h, saturation, *target).to_color()
            };
            ScaleStep {
                key: *key,
                color,
                lightness: color.lightness(),
            }
        })
        .collect();

    if layout.widened {
        tracing::debug!(
            base = %base,
            anchor = keys[layout.anchor_index],
            "scale widened to keep adjacent steps distinguishable"
        );
    }

    Ok(ColorScale {
        base,
        steps,
        anchor_key: keys[layout.anchor_index],
        widened: layout.widened,
    })
}

/// Constant neutral gray ramp, independent of any brand color
pub fn neutral_scale(keys: &[StepKey]) -> Result<ColorScale> {
    build_scale(
        NEUTRAL_BASE,
        keys,
        ScaleOptions {
            saturation_taper: false,
        },
    )
}

/// Design lightness for a step key (piecewise linear over the curve anchors)
pub fn curve_lightness(key: StepKey) -> f64 {
    let key = f64::from(key.min(MAX_STEP_KEY));
    for pair in LIGHTNESS_CURVE.windows(2) {
        let (k0, l0) = pair[0];
        let (k1, l1) = pair[1];
        if key <= k1 {
            let t = (key - k0) / (k1 - k0);
            return l0 + (l1 - l0) * t;
        }
    }
    LIGHTNESS_CURVE[LIGHTNESS_CURVE.len() - 1].1
}

struct StepLayout {
    targets: Vec<f64>,
    anchor_index: usize,
    /// Anchor lightness differs from the base lightness
    anchor_moved: bool,
    widened: bool,
}

/// Lay out target lightness for each step, or `None` if the curve is too
/// dense to honor [`MIN_STEP_DELTA`].
fn layout_steps(curve: &[f64], base_lightness: f64) -> Option<StepLayout> {
    let n = curve.len();
    let anchor_index = nearest_index(curve, base_lightness);
    let anchor_curve = curve[anchor_index];

    // Relative position of each lighter step between the anchor and white,
    // and of each darker step between the anchor and black.
    let light_fraction = |i: usize| (curve[i] - anchor_curve) / (100.0 - anchor_curve);
    let dark_fraction = |i: usize| (anchor_curve - curve[i]) / anchor_curve;

    let min_light_gap = (0..anchor_index)
        .map(|i| light_fraction(i) - light_fraction(i + 1))
        .fold(f64::INFINITY, f64::min);
    let min_dark_gap = (anchor_index + 1..n)
        .map(|i| dark_fraction(i) - dark_fraction(i - 1))
        .fold(f64::INFINITY, f64::min);

    let upper = if anchor_index == 0 {
        100.0
    } else {
        100.0 - MIN_STEP_DELTA / min_light_gap
    };
    let lower = if anchor_index + 1 == n {
        0.0
    } else {
        MIN_STEP_DELTA / min_dark_gap
    };
    if lower > upper {
        return None;
    }

    let anchor = base_lightness.clamp(lower, upper);
    let targets = (0..n)
        .map(|i| {
            if i < anchor_index {
                anchor + light_fraction(i) * (100.0 - anchor)
            } else if i > anchor_index {
                anchor - dark_fraction(i) * anchor
            } else {
                anchor
            }
        })
        .collect();

    let anchor_moved = (anchor - base_lightness).abs() > f64::EPSILON;
    Some(StepLayout {
        targets,
        anchor_index,
        anchor_moved,
        widened: anchor_moved,
    })
}

/// Evenly spaced layout ignoring the base position; only reached if the
/// even curve itself cannot be anchored.
fn forced_layout(curve: &[f64], base_lightness: f64) -> StepLayout {
    let anchor_index = nearest_index(curve, base_lightness);
    StepLayout {
        targets: curve.to_vec(),
        anchor_index,
        anchor_moved: true,
        widened: true,
    }
}

fn even_curve(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![curve_lightness(500); n];
    }
    let gap = (EVEN_CURVE_TOP - EVEN_CURVE_BOTTOM) / (n - 1) as f64;
    (0..n).map(|i| EVEN_CURVE_TOP - gap * i as f64).collect()
}

fn nearest_index(curve: &[f64], lightness: f64) -> usize {
    let mut best = 0;
    for (i, l) in curve.iter().enumerate().skip(1) {
        if (l - lightness).abs() < (curve[best] - lightness).abs() {
            best = i;
        }
    }
    best
}

fn tapered_saturation(saturation: f64, lightness: f64) -> f64 {
    let factor = if lightness > TAPER_LIGHT_START {
        1.0 - TAPER_MAX * ((lightness - TAPER_LIGHT_START) / (100.0 - TAPER_LIGHT_START)).min(1.0)
    } else if lightness < TAPER_DARK_START {
        1.0 - TAPER_MAX * ((TAPER_DARK_START - lightness) / TAPER_DARK_START).min(1.0)
    } else {
        1.0
    };
    saturation * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_strictly_darker(scale: &ColorScale) {
        for pair in scale.steps().windows(2) {
            assert!(
                pair[0].lightness > pair[1].lightness,
                "step {} ({}) is not lighter than step {} ({})",
                pair[0].key,
                pair[0].color,
                pair[1].key,
                pair[1].color
            );
            assert_ne!(pair[0].color, pair[1].color);
        }
    }

    #[test]
    fn test_curve_hits_anchor_points() {
        assert_eq!(curve_lightness(50), 97.0);
        assert_eq!(curve_lightness(500), 55.0);
        assert_eq!(curve_lightness(950), 14.0);
        assert_eq!(curve_lightness(250), 81.5);
        assert_eq!(curve_lightness(5000), 8.0);
    }

    #[test]
    fn test_base_color_is_reproduced_at_anchor() {
        let base = Color::from_hex(0x3b82f6);
        let scale = build_scale(base, &DEFAULT_STEP_KEYS, ScaleOptions::default()).unwrap();
        assert_eq!(scale.len(), 11);
        assert_eq!(scale.anchor_key(), 500);
        assert_eq!(scale.get(500), Some(base));
        assert!(!scale.is_widened());
        assert_strictly_darker(&scale);
    }

    #[test]
    fn test_scale_preserves_hue() {
        let base = Color::from_hex(0x10b981);
        let hue = base.to_hsl().h;
        let scale = build_scale(base, &DEFAULT_STEP_KEYS, ScaleOptions::default()).unwrap();
        for step in scale.iter().filter(|s| s.lightness > 10.0 && s.lightness < 90.0) {
            let h = step.color.to_hsl().h;
            assert!((h - hue).abs() < 4.0, "step {} drifted to hue {h}", step.key);
        }
    }

    #[test]
    fn test_near_white_base_is_widened_and_distinct() {
        let scale = build_scale(
            Color::from_hex(0xfefefe),
            &DEFAULT_STEP_KEYS,
            ScaleOptions::default(),
        )
        .unwrap();
        assert_eq!(scale.anchor_key(), 50);
        assert_strictly_darker(&scale);
    }

    #[test]
    fn test_pale_base_pulls_anchor_inward() {
        // Three steps packed at the light end leave no room above L = 97.2
        let base = Hsl::new(30.0, 80.0, 97.2).to_color();
        let scale = build_scale(base, &[0, 25, 50], ScaleOptions::default()).unwrap();
        assert_eq!(scale.anchor_key(), 50);
        assert_ne!(scale.get(50), Some(base));
        assert!(scale.is_widened());
        assert_strictly_darker(&scale);
        for pair in scale.steps().windows(2) {
            assert!(pair[0].lightness - pair[1].lightness >= MIN_STEP_DELTA - 0.5);
        }
    }

    #[test]
    fn test_black_and_white_bases() {
        for base in [Color::BLACK, Color::WHITE] {
            let scale = build_scale(base, &DEFAULT_STEP_KEYS, ScaleOptions::default()).unwrap();
            assert_strictly_darker(&scale);
        }
    }

    #[test]
    fn test_dense_custom_keys_fall_back_to_even_spacing() {
        let keys: Vec<StepKey> = (0..20).map(|i| 500 + i).collect();
        let scale = build_scale(Color::from_hex(0xef4444), &keys, ScaleOptions::default()).unwrap();
        assert_eq!(scale.len(), 20);
        assert!(scale.is_widened());
        assert_strictly_darker(&scale);
    }

    #[test]
    fn test_single_step_scale_is_the_base() {
        let base = Color::from_hex(0x123456);
        let scale = build_scale(base, &[500], ScaleOptions::default()).unwrap();
        assert_eq!(scale.get(500), Some(base));
    }

    #[test]
    fn test_taper_desaturates_extremes_only() {
        let base = Color::from_hex(0x3b82f6);
        let tapered = build_scale(base, &DEFAULT_STEP_KEYS, ScaleOptions::default()).unwrap();
        let flat = build_scale(
            base,
            &DEFAULT_STEP_KEYS,
            ScaleOptions {
                saturation_taper: false,
            },
        )
        .unwrap();
        assert!(tapered.get(50).unwrap().to_hsl().s < flat.get(50).unwrap().to_hsl().s);
        assert_eq!(tapered.get(400), flat.get(400));
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let base = Color::from_hex(0x3b82f6);
        for keys in [
            vec![],
            vec![100, 100],
            vec![200, 100],
            vec![100, 1001],
            (0..30).map(|i| i * 10).collect::<Vec<StepKey>>(),
        ] {
            assert!(matches!(
                build_scale(base, &keys, ScaleOptions::default()),
                Err(ThemeError::InvalidStepKeys(_))
            ));
        }
    }

    #[test]
    fn test_neutral_scale_is_constant() {
        let a = neutral_scale(&DEFAULT_STEP_KEYS).unwrap();
        let b = neutral_scale(&DEFAULT_STEP_KEYS).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(500), Some(NEUTRAL_BASE));
        assert_strictly_darker(&a);
    }

    #[test]
    fn test_closest_to_lightness() {
        let scale = neutral_scale(&DEFAULT_STEP_KEYS).unwrap();
        assert_eq!(scale.closest_to_lightness(96.0).key, 50);
        assert_eq!(scale.closest_to_lightness(46.0).key, 600);
        assert_eq!(scale.closest_to_lightness(0.0).key, 950);
    }
}
