//! WCAG contrast checks and bounded auto-correction

use std::fmt;
use std::str::FromStr;

use cardapio_core::Color;
use serde::{Deserialize, Serialize};

use crate::tokens::ColorPair;

/// Minimum ratio for normal text at level AA
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum ratio for normal text at level AAA
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;

/// Luminance at which black and white text have equal contrast
const MID_LUMINANCE: f64 = 0.179;

/// Accessibility target requested by the caller
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum AccessibilityLevel {
    #[default]
    #[serde(rename = "AA", alias = "aa")]
    Aa,
    #[serde(rename = "AAA", alias = "aaa")]
    Aaa,
}

impl AccessibilityLevel {
    pub fn min_ratio(self) -> f64 {
        match self {
            Self::Aa => WCAG_AA_NORMAL_TEXT,
            Self::Aaa => WCAG_AAA_NORMAL_TEXT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccessibilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AA" => Ok(Self::Aa),
            "AAA" => Ok(Self::Aaa),
            other => Err(format!("unknown accessibility level {other:?} (expected AA or AAA)")),
        }
    }
}

/// Classification of a measured ratio
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
pub enum ContrastLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "fail")]
    Fail,
}

impl ContrastLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= WCAG_AAA_NORMAL_TEXT {
            Self::Aaa
        } else if ratio >= WCAG_AA_NORMAL_TEXT {
            Self::Aa
        } else {
            Self::Fail
        }
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Fail => "fail",
        })
    }
}

/// Result of a single contrast measurement
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ContrastCheck {
    pub ratio: f64,
    pub level: ContrastLevel,
    /// At least AA for normal text
    pub is_accessible: bool,
}

impl ContrastCheck {
    pub fn meets(&self, level: AccessibilityLevel) -> bool {
        self.ratio >= level.min_ratio()
    }
}

/// `(L_lighter + 0.05) / (L_darker + 0.05)`
pub fn contrast_ratio(fg: Color, bg: Color) -> f64 {
    let lum_fg = fg.relative_luminance();
    let lum_bg = bg.relative_luminance();
    let lighter = lum_fg.max(lum_bg);
    let darker = lum_fg.min(lum_bg);
    (lighter + 0.05) / (darker + 0.05)
}

pub fn check_pair(fg: Color, bg: Color) -> ContrastCheck {
    let ratio = contrast_ratio(fg, bg);
    ContrastCheck {
        ratio,
        level: ContrastLevel::from_ratio(ratio),
        is_accessible: ratio >= WCAG_AA_NORMAL_TEXT,
    }
}

/// Check two hex strings; malformed input is measured as black
pub fn check_contrast(fg_hex: &str, bg_hex: &str) -> ContrastCheck {
    check_pair(Color::from_hex_lossy(fg_hex), Color::from_hex_lossy(bg_hex))
}

/// Check many `(foreground, background)` hex pairs, preserving input order
pub fn batch_contrast_test<'a, I>(pairs: I) -> Vec<ContrastCheck>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(fg, bg)| check_contrast(fg, bg))
        .collect()
}

/// Pick the candidate with the highest contrast against `bg` (first wins ties)
pub fn best_text_color(bg: Color, candidates: &[Color]) -> Option<Color> {
    let mut best: Option<(Color, f64)> = None;
    for &candidate in candidates {
        let ratio = contrast_ratio(candidate, bg);
        if best.map_or(true, |(_, r)| ratio > r) {
            best = Some((candidate, ratio));
        }
    }
    best.map(|(color, _)| color)
}

/// Which half of a pair the corrector moved
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustedSide {
    Background,
    Foreground,
}

/// Parameters for [`auto_correct`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrectionPolicy {
    pub min_ratio: f64,
    /// Lightness change per iteration, in percent points
    pub step: f64,
    pub max_iterations: u32,
    /// Side to move when both directions cost the same
    pub prefer: AdjustedSide,
}

impl CorrectionPolicy {
    pub const DEFAULT_STEP: f64 = 2.0;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 24;

    pub fn for_level(level: AccessibilityLevel) -> Self {
        Self {
            min_ratio: level.min_ratio(),
            step: Self::DEFAULT_STEP,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            prefer: AdjustedSide::Background,
        }
    }

    pub fn prefer(mut self, side: AdjustedSide) -> Self {
        self.prefer = side;
        self
    }
}

/// A candidate pair produced by the corrector
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Correction {
    pub pair: ColorPair,
    pub side: AdjustedSide,
    /// Whether the moved color got darker
    pub darkened: bool,
    pub ratio: f64,
    /// Absolute lightness change of the moved color, in percent points
    pub lightness_delta: f64,
    pub iterations: u32,
}

/// Outcome of [`auto_correct`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CorrectionOutcome {
    /// The pair already met the threshold
    Accessible(f64),
    /// A passing pair was found
    Corrected(Correction),
    /// Iteration cap reached; carries the least-bad candidate
    Unresolved(Correction),
}

impl CorrectionOutcome {
    /// The pair to render after correction
    pub fn resolve(&self, original: ColorPair) -> ColorPair {
        match self {
            Self::Accessible(_) => original,
            Self::Corrected(c) | Self::Unresolved(c) => c.pair,
        }
    }

    pub fn ratio(&self) -> f64 {
        match self {
            Self::Accessible(ratio) => *ratio,
            Self::Corrected(c) | Self::Unresolved(c) => c.ratio,
        }
    }
}

/// Nudge lightness until `pair` meets `policy.min_ratio`
///
/// Both sides are tried independently, each moving away from the other in
/// `policy.step` increments for at most `policy.max_iterations` steps. When
/// both pass, the smaller lightness change wins; ties go to `policy.prefer`.
pub fn auto_correct(pair: ColorPair, policy: &CorrectionPolicy) -> CorrectionOutcome {
    let ratio = contrast_ratio(pair.foreground, pair.background);
    if ratio >= policy.min_ratio {
        return CorrectionOutcome::Accessible(ratio);
    }

    let background = refine(pair, AdjustedSide::Background, policy);
    let foreground = refine(pair, AdjustedSide::Foreground, policy);
    let (preferred, other) = match policy.prefer {
        AdjustedSide::Background => (background, foreground),
        AdjustedSide::Foreground => (foreground, background),
    };

    match (preferred.passed, other.passed) {
        (true, true) => {
            if other.correction.lightness_delta + 1e-9 < preferred.correction.lightness_delta {
                CorrectionOutcome::Corrected(other.correction)
            } else {
                CorrectionOutcome::Corrected(preferred.correction)
            }
        }
        (true, false) => CorrectionOutcome::Corrected(preferred.correction),
        (false, true) => CorrectionOutcome::Corrected(other.correction),
        (false, false) => {
            if other.correction.ratio > preferred.correction.ratio {
                CorrectionOutcome::Unresolved(other.correction)
            } else {
                CorrectionOutcome::Unresolved(preferred.correction)
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Attempt {
    correction: Correction,
    passed: bool,
}

fn refine(pair: ColorPair, side: AdjustedSide, policy: &CorrectionPolicy) -> Attempt {
    let (moving, fixed) = match side {
        AdjustedSide::Background => (pair.background, pair.foreground),
        AdjustedSide::Foreground => (pair.foreground, pair.background),
    };

    let moving_lum = moving.relative_luminance();
    let fixed_lum = fixed.relative_luminance();
    let darken = if (moving_lum - fixed_lum).abs() < 1e-12 {
        fixed_lum >= MID_LUMINANCE
    } else {
        moving_lum < fixed_lum
    };

    let hsl = moving.to_hsl();
    let with_moved = |color: Color| match side {
        AdjustedSide::Background => ColorPair::new(color, pair.foreground),
        AdjustedSide::Foreground => ColorPair::new(pair.background, color),
    };

    let mut best = Correction {
        pair,
        side,
        darkened: darken,
        ratio: contrast_ratio(moving, fixed),
        lightness_delta: 0.0,
        iterations: 0,
    };

    for i in 1..=policy.max_iterations {
        let offset = policy.step * f64::from(i);
        let target = if darken { hsl.l - offset } else { hsl.l + offset };
        let candidate = hsl.with_lightness(target).to_color();
        let ratio = contrast_ratio(candidate, fixed);

        if ratio > best.ratio {
            best = Correction {
                pair: with_moved(candidate),
                side,
                darkened: darken,
                ratio,
                lightness_delta: (candidate.lightness() - moving.lightness()).abs(),
                iterations: i,
            };
        }
        if ratio >= policy.min_ratio {
            return Attempt {
                correction: best,
                passed: true,
            };
        }
        if !(0.0..=100.0).contains(&target) {
            break;
        }
    }

    Attempt {
        correction: best,
        passed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(bg: u32, fg: u32) -> ColorPair {
        ColorPair::new(Color::from_hex(bg), Color::from_hex(fg))
    }

    #[test]
    fn test_black_on_white_is_maximum() {
        let check = check_contrast("#ffffff", "#000000");
        assert!((check.ratio - 21.0).abs() < 1e-9);
        assert_eq!(check.level, ContrastLevel::Aaa);
        assert!(check.is_accessible);
    }

    #[test]
    fn test_identical_colors_have_ratio_one() {
        let check = check_contrast("#3b82f6", "#3b82f6");
        assert!((check.ratio - 1.0).abs() < 1e-9);
        assert_eq!(check.level, ContrastLevel::Fail);
        assert!(!check.is_accessible);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        let a = Color::from_hex(0x3b82f6);
        let b = Color::from_hex(0xfafafa);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ContrastLevel::from_ratio(7.0), ContrastLevel::Aaa);
        assert_eq!(ContrastLevel::from_ratio(6.99), ContrastLevel::Aa);
        assert_eq!(ContrastLevel::from_ratio(4.5), ContrastLevel::Aa);
        assert_eq!(ContrastLevel::from_ratio(4.49), ContrastLevel::Fail);
    }

    #[test]
    fn test_gray_767676_is_the_aa_boundary_on_white() {
        assert!(check_contrast("#767676", "#ffffff").is_accessible);
        assert!(!check_contrast("#777777", "#ffffff").is_accessible);
    }

    #[test]
    fn test_batch_preserves_order() {
        let results = batch_contrast_test([("#000", "#fff"), ("#fff", "#fff"), ("#767676", "#fff")]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].level, ContrastLevel::Aaa);
        assert_eq!(results[1].level, ContrastLevel::Fail);
        assert_eq!(results[2].level, ContrastLevel::Aa);
    }

    #[test]
    fn test_best_text_color() {
        let candidates = [Color::from_hex(0xfafafa), Color::from_hex(0x111827)];
        assert_eq!(
            best_text_color(Color::from_hex(0x1d4ed8), &candidates),
            Some(Color::from_hex(0xfafafa))
        );
        assert_eq!(
            best_text_color(Color::from_hex(0xfde68a), &candidates),
            Some(Color::from_hex(0x111827))
        );
        assert_eq!(best_text_color(Color::WHITE, &[]), None);
    }

    #[test]
    fn test_accessible_pair_is_untouched() {
        let policy = CorrectionPolicy::for_level(AccessibilityLevel::Aa);
        let original = pair(0x000000, 0xffffff);
        let outcome = auto_correct(original, &policy);
        assert!(matches!(outcome, CorrectionOutcome::Accessible(_)));
        assert_eq!(outcome.resolve(original), original);
    }

    #[test]
    fn test_light_text_on_mid_background_darkens_background() {
        let policy = CorrectionPolicy::for_level(AccessibilityLevel::Aa);
        // White on a mid blue; the foreground cannot get any lighter
        let original = pair(0x3b82f6, 0xffffff);
        let CorrectionOutcome::Corrected(correction) = auto_correct(original, &policy) else {
            panic!("expected a correction");
        };
        assert_eq!(correction.side, AdjustedSide::Background);
        assert!(correction.darkened);
        assert!(correction.ratio >= WCAG_AA_NORMAL_TEXT);
        assert_eq!(correction.pair.foreground, Color::WHITE);
        assert!(correction.pair.background.lightness() < original.background.lightness());
    }

    #[test]
    fn test_smaller_delta_wins_regardless_of_preference() {
        let policy = CorrectionPolicy::for_level(AccessibilityLevel::Aa);
        // Gray on gray: lightening the background and darkening the text both
        // pass, but the text needs the shorter trip
        let original = pair(0x808080, 0x707070);
        let background = refine(original, AdjustedSide::Background, &policy);
        let foreground = refine(original, AdjustedSide::Foreground, &policy);
        assert!(background.passed && foreground.passed);
        assert!(foreground.correction.lightness_delta < background.correction.lightness_delta);

        for prefer in [AdjustedSide::Background, AdjustedSide::Foreground] {
            let CorrectionOutcome::Corrected(correction) =
                auto_correct(original, &policy.prefer(prefer))
            else {
                panic!("expected a correction");
            };
            assert_eq!(correction.side, AdjustedSide::Foreground);
            assert!(correction.darkened);
            assert_eq!(correction.lightness_delta, foreground.correction.lightness_delta);
        }
    }

    #[test]
    fn test_equal_delta_goes_to_preferred_side() {
        // One full-range step: the background jumps to white and the text to
        // black, 40 points each
        let policy = CorrectionPolicy {
            step: 100.0,
            max_iterations: 1,
            ..CorrectionPolicy::for_level(AccessibilityLevel::Aa)
        };
        let original = pair(0x999999, 0x666666);
        let background = refine(original, AdjustedSide::Background, &policy);
        let foreground = refine(original, AdjustedSide::Foreground, &policy);
        assert!(background.passed && foreground.passed);
        assert!(
            (background.correction.lightness_delta - foreground.correction.lightness_delta).abs()
                < 1e-9
        );

        for prefer in [AdjustedSide::Background, AdjustedSide::Foreground] {
            let CorrectionOutcome::Corrected(correction) =
                auto_correct(original, &policy.prefer(prefer))
            else {
                panic!("expected a correction");
            };
            assert_eq!(correction.side, prefer);
        }
    }

    #[test]
    fn test_only_passing_side_is_used() {
        let policy =
            CorrectionPolicy::for_level(AccessibilityLevel::Aa).prefer(AdjustedSide::Background);
        // Muted gray text on white: the background is already at the ceiling,
        // so only darkening the text can pass
        let original = pair(0xffffff, 0x8a8a8a);
        let CorrectionOutcome::Corrected(correction) = auto_correct(original, &policy) else {
            panic!("expected a correction");
        };
        assert_eq!(correction.side, AdjustedSide::Foreground);
        assert!(correction.darkened);
        assert!(correction.ratio >= WCAG_AA_NORMAL_TEXT);
    }

    #[test]
    fn test_iteration_cap_reports_least_bad_candidate() {
        let policy = CorrectionPolicy {
            max_iterations: 1,
            ..CorrectionPolicy::for_level(AccessibilityLevel::Aaa)
        };
        let original = pair(0x888888, 0x999999);
        let CorrectionOutcome::Unresolved(best) = auto_correct(original, &policy) else {
            panic!("expected an unresolved outcome");
        };
        assert!(best.ratio > contrast_ratio(original.foreground, original.background));
        assert!(best.ratio < WCAG_AAA_NORMAL_TEXT);
        assert_eq!(best.iterations, 1);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("aa".parse::<AccessibilityLevel>(), Ok(AccessibilityLevel::Aa));
        assert_eq!(" AAA ".parse::<AccessibilityLevel>(), Ok(AccessibilityLevel::Aaa));
        assert!("A".parse::<AccessibilityLevel>().is_err());
    }
}
