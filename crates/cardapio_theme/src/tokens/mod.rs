//! Design tokens for tenant themes
//!
//! Tokens are the named color bindings a storefront or admin page consumes:
//! - Semantic tokens: status colors, text tones, surfaces
//! - Component tokens: buttons, badges, card, input, sidebar items, chips
//!
//! Every slot that renders text is a [`ColorPair`] and is contrast-checked.

mod component;
mod semantic;

pub use component::*;
pub use semantic::*;

use std::fmt;
use std::str::FromStr;

use cardapio_core::Color;
use serde::{Serialize, Serializer};

use crate::contrast::AdjustedSide;

/// Text-on-background binding
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ColorPair {
    pub background: Color,
    pub foreground: Color,
}

impl ColorPair {
    pub const fn new(background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// Any contrast-checked slot
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum TokenSlot {
    Semantic(SemanticSlot),
    Component(ComponentSlot),
}

impl TokenSlot {
    /// Every slot, semantic first, in serialization order
    pub fn all() -> impl Iterator<Item = TokenSlot> {
        SemanticSlot::ALL
            .iter()
            .map(|s| TokenSlot::Semantic(*s))
            .chain(ComponentSlot::ALL.iter().map(|c| TokenSlot::Component(*c)))
    }

    /// Kebab-case name used in CSS variables and config keys
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Semantic(slot) => slot.css_name(),
            Self::Component(slot) => slot.css_name(),
        }
    }

    /// Human-readable (pt-BR) label used in validation messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Semantic(slot) => slot.label(),
            Self::Component(slot) => slot.label(),
        }
    }

    /// Side the corrector moves when both directions cost the same
    pub fn preferred_side(self) -> AdjustedSide {
        match self {
            Self::Semantic(slot) => slot.preferred_side(),
            Self::Component(slot) => slot.preferred_side(),
        }
    }
}

impl fmt::Display for TokenSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

impl FromStr for TokenSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        TokenSlot::all()
            .find(|slot| slot.css_name() == name)
            .ok_or_else(|| name.to_string())
    }
}

impl From<SemanticSlot> for TokenSlot {
    fn from(slot: SemanticSlot) -> Self {
        Self::Semantic(slot)
    }
}

impl From<ComponentSlot> for TokenSlot {
    fn from(slot: ComponentSlot) -> Self {
        Self::Component(slot)
    }
}

impl Serialize for TokenSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_names_are_unique() {
        let mut names: Vec<&str> = TokenSlot::all().map(|s| s.css_name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, SemanticSlot::ALL.len() + ComponentSlot::ALL.len());
    }

    #[test]
    fn test_slot_parses_from_css_name() {
        assert_eq!(
            "button-primary".parse::<TokenSlot>(),
            Ok(TokenSlot::Component(ComponentSlot::ButtonPrimary))
        );
        assert_eq!(
            "text-muted".parse::<TokenSlot>(),
            Ok(TokenSlot::Semantic(SemanticSlot::TextMuted))
        );
        assert_eq!("buton-primary".parse::<TokenSlot>(), Err("buton-primary".into()));
    }

    #[test]
    fn test_css_names_are_kebab_case() {
        for slot in TokenSlot::all() {
            let name = slot.css_name();
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{name} is not kebab-case"
            );
        }
    }
}
