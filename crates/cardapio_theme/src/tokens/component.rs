//! Component color tokens

use cardapio_core::Color;
use serde::Serialize;

use super::ColorPair;
use crate::contrast::AdjustedSide;

/// Light text constant for dark backgrounds
pub const NEAR_WHITE: Color = Color::from_hex(0xfafafa);
/// Dark text constant for light backgrounds
pub const NEAR_BLACK: Color = Color::from_hex(0x111827);

/// Which generated scale a slot draws from
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleRole {
    Primary,
    Secondary,
    Neutral,
}

/// Surface level a slot sits on directly
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SurfaceLevel {
    Base,
    Raised,
}

/// How the builder resolves a component slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentRole {
    /// Background picked from a scale at `target` lightness, constant text
    Filled { scale: ScaleRole, target: f64 },
    /// Base-surface background, foreground picked from a scale at `target`
    OnSurface { scale: ScaleRole, target: f64 },
    /// Background is a surface level, constant text
    Surface(SurfaceLevel),
}

impl ComponentRole {
    /// Apply a lightness override; surface slots move onto the neutral scale
    pub fn with_target(self, target: f64) -> Self {
        match self {
            Self::Filled { scale, .. } => Self::Filled { scale, target },
            Self::OnSurface { scale, .. } => Self::OnSurface { scale, target },
            Self::Surface(_) => Self::Filled {
                scale: ScaleRole::Neutral,
                target,
            },
        }
    }
}

/// Component slot keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentSlot {
    // Buttons
    ButtonPrimary,
    ButtonPrimaryHover,
    ButtonSecondary,
    ButtonSecondaryHover,
    ButtonOutline,
    ButtonGhost,

    // Badges
    BadgePrimary,
    BadgeSecondary,
    BadgeNeutral,

    // Containers and fields
    Card,
    Input,

    // Admin sidebar
    SidebarItem,
    SidebarItemHover,
    SidebarItemActive,

    // Category chips on the storefront
    Chip,
    ChipSelected,
}

impl ComponentSlot {
    pub const ALL: [ComponentSlot; 16] = [
        ComponentSlot::ButtonPrimary,
        ComponentSlot::ButtonPrimaryHover,
        ComponentSlot::ButtonSecondary,
        ComponentSlot::ButtonSecondaryHover,
        ComponentSlot::ButtonOutline,
        ComponentSlot::ButtonGhost,
        ComponentSlot::BadgePrimary,
        ComponentSlot::BadgeSecondary,
        ComponentSlot::BadgeNeutral,
        ComponentSlot::Card,
        ComponentSlot::Input,
        ComponentSlot::SidebarItem,
        ComponentSlot::SidebarItemHover,
        ComponentSlot::SidebarItemActive,
        ComponentSlot::Chip,
        ComponentSlot::ChipSelected,
    ];

    pub fn css_name(self) -> &'static str {
        match self {
            Self::ButtonPrimary => "button-primary",
            Self::ButtonPrimaryHover => "button-primary-hover",
            Self::ButtonSecondary => "button-secondary",
            Self::ButtonSecondaryHover => "button-secondary-hover",
            Self::ButtonOutline => "button-outline",
            Self::ButtonGhost => "button-ghost",
            Self::BadgePrimary => "badge-primary",
            Self::BadgeSecondary => "badge-secondary",
            Self::BadgeNeutral => "badge-neutral",
            Self::Card => "card",
            Self::Input => "input",
            Self::SidebarItem => "sidebar-item",
            Self::SidebarItemHover => "sidebar-item-hover",
            Self::SidebarItemActive => "sidebar-item-active",
            Self::Chip => "chip",
            Self::ChipSelected => "chip-selected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ButtonPrimary => "Botão primário",
            Self::ButtonPrimaryHover => "Botão primário (hover)",
            Self::ButtonSecondary => "Botão secundário",
            Self::ButtonSecondaryHover => "Botão secundário (hover)",
            Self::ButtonOutline => "Botão contornado",
            Self::ButtonGhost => "Botão fantasma",
            Self::BadgePrimary => "Selo primário",
            Self::BadgeSecondary => "Selo secundário",
            Self::BadgeNeutral => "Selo neutro",
            Self::Card => "Cartão",
            Self::Input => "Campo de texto",
            Self::SidebarItem => "Item da barra lateral",
            Self::SidebarItemHover => "Item da barra lateral (hover)",
            Self::SidebarItemActive => "Item ativo da barra lateral",
            Self::Chip => "Chip",
            Self::ChipSelected => "Chip selecionado",
        }
    }

    /// Built-in role and target lightness
    pub fn role(self) -> ComponentRole {
        use ComponentRole::{Filled, OnSurface, Surface};
        use ScaleRole::{Neutral, Primary, Secondary};

        match self {
            Self::ButtonPrimary => Filled { scale: Primary, target: 45.0 },
            Self::ButtonPrimaryHover => Filled { scale: Primary, target: 37.0 },
            Self::ButtonSecondary => Filled { scale: Secondary, target: 45.0 },
            Self::ButtonSecondaryHover => Filled { scale: Secondary, target: 37.0 },
            Self::ButtonOutline => OnSurface { scale: Primary, target: 40.0 },
            Self::ButtonGhost => OnSurface { scale: Primary, target: 35.0 },
            Self::BadgePrimary => Filled { scale: Primary, target: 92.0 },
            Self::BadgeSecondary => Filled { scale: Secondary, target: 92.0 },
            Self::BadgeNeutral => Filled { scale: Neutral, target: 92.0 },
            Self::Card => Surface(SurfaceLevel::Raised),
            Self::Input => Surface(SurfaceLevel::Base),
            Self::SidebarItem => Filled { scale: Neutral, target: 97.0 },
            Self::SidebarItemHover => Filled { scale: Neutral, target: 92.0 },
            Self::SidebarItemActive => Filled { scale: Primary, target: 45.0 },
            Self::Chip => Filled { scale: Secondary, target: 94.0 },
            Self::ChipSelected => Filled { scale: Secondary, target: 40.0 },
        }
    }

    /// Brand-filled slots keep their text constant and move the fill
    pub fn preferred_side(self) -> AdjustedSide {
        match self.role() {
            ComponentRole::Filled { .. } => AdjustedSide::Background,
            ComponentRole::OnSurface { .. } | ComponentRole::Surface(_) => {
                AdjustedSide::Foreground
            }
        }
    }
}

/// Colors bound to one component
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComponentColors {
    pub pair: ColorPair,
    pub border: Option<Color>,
    pub focus_ring: Option<Color>,
}

impl ComponentColors {
    pub fn new(pair: ColorPair) -> Self {
        Self {
            pair,
            border: None,
            focus_ring: None,
        }
    }

    pub fn with_border(mut self, border: Color) -> Self {
        self.border = Some(border);
        self
    }

    pub fn with_focus_ring(mut self, ring: Color) -> Self {
        self.focus_ring = Some(ring);
        self
    }
}

/// Complete set of component tokens
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ComponentTokens {
    // Buttons
    pub button_primary: ComponentColors,
    pub button_primary_hover: ComponentColors,
    pub button_secondary: ComponentColors,
    pub button_secondary_hover: ComponentColors,
    pub button_outline: ComponentColors,
    pub button_ghost: ComponentColors,

    // Badges
    pub badge_primary: ComponentColors,
    pub badge_secondary: ComponentColors,
    pub badge_neutral: ComponentColors,

    // Containers and fields
    pub card: ComponentColors,
    pub input: ComponentColors,

    // Admin sidebar
    pub sidebar_item: ComponentColors,
    pub sidebar_item_hover: ComponentColors,
    pub sidebar_item_active: ComponentColors,

    // Chips
    pub chip: ComponentColors,
    pub chip_selected: ComponentColors,
}

impl ComponentTokens {
    /// Build from a resolver called once per slot in [`ComponentSlot::ALL`] order
    pub(crate) fn from_fn(mut f: impl FnMut(ComponentSlot) -> ComponentColors) -> Self {
        Self {
            button_primary: f(ComponentSlot::ButtonPrimary),
            button_primary_hover: f(ComponentSlot::ButtonPrimaryHover),
            button_secondary: f(ComponentSlot::ButtonSecondary),
            button_secondary_hover: f(ComponentSlot::ButtonSecondaryHover),
            button_outline: f(ComponentSlot::ButtonOutline),
            button_ghost: f(ComponentSlot::ButtonGhost),
            badge_primary: f(ComponentSlot::BadgePrimary),
            badge_secondary: f(ComponentSlot::BadgeSecondary),
            badge_neutral: f(ComponentSlot::BadgeNeutral),
            card: f(ComponentSlot::Card),
            input: f(ComponentSlot::Input),
            sidebar_item: f(ComponentSlot::SidebarItem),
            sidebar_item_hover: f(ComponentSlot::SidebarItemHover),
            sidebar_item_active: f(ComponentSlot::SidebarItemActive),
            chip: f(ComponentSlot::Chip),
            chip_selected: f(ComponentSlot::ChipSelected),
        }
    }

    /// Get a component's colors by slot key
    pub fn get(&self, slot: ComponentSlot) -> ComponentColors {
        match slot {
            ComponentSlot::ButtonPrimary => self.button_primary,
            ComponentSlot::ButtonPrimaryHover => self.button_primary_hover,
            ComponentSlot::ButtonSecondary => self.button_secondary,
            ComponentSlot::ButtonSecondaryHover => self.button_secondary_hover,
            ComponentSlot::ButtonOutline => self.button_outline,
            ComponentSlot::ButtonGhost => self.button_ghost,
            ComponentSlot::BadgePrimary => self.badge_primary,
            ComponentSlot::BadgeSecondary => self.badge_secondary,
            ComponentSlot::BadgeNeutral => self.badge_neutral,
            ComponentSlot::Card => self.card,
            ComponentSlot::Input => self.input,
            ComponentSlot::SidebarItem => self.sidebar_item,
            ComponentSlot::SidebarItemHover => self.sidebar_item_hover,
            ComponentSlot::SidebarItemActive => self.sidebar_item_active,
            ComponentSlot::Chip => self.chip,
            ComponentSlot::ChipSelected => self.chip_selected,
        }
    }

    /// All components in slot order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentSlot, ComponentColors)> + '_ {
        ComponentSlot::ALL.iter().map(move |slot| (*slot, self.get(*slot)))
    }
}
