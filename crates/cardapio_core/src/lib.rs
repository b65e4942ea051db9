//! Cardapio Core
//!
//! Color primitives shared by the Cardapio theme engine:
//!
//! - **Hex parsing**: 3- and 6-digit hex strings with or without a leading `#`
//! - **HSL conversion**: lossless-as-possible `Color` <-> `Hsl` round trips
//! - **Luminance**: WCAG relative luminance used by contrast checks
//!
//! # Example
//!
//! ```rust
//! use cardapio_core::{hex_to_hsl, hsl_to_hex, Color};
//!
//! let hsl = hex_to_hsl("#3b82f6");
//! assert_eq!(hsl_to_hex(hsl.h, hsl.s, hsl.l), "#3b82f6");
//!
//! let white = Color::parse_hex("fff").unwrap();
//! assert_eq!(white, Color::WHITE);
//! ```

pub mod color;
pub mod error;
pub mod hsl;

pub use color::{is_valid_hex, Color};
pub use error::{ColorError, Result};
pub use hsl::{hex_to_hsl, hsl_to_hex, Hsl};
