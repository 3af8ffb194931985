//! Semantic color tokens and the palettes that resolve them.
//!
//! Profiles never name raw RGB values. Each primitive carries a
//! [`ColorToken`] and the profile's [`Palette`] maps it to a concrete
//! [`Color`]. The built-in palettes are built once per process and shared.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use image::Rgba;
use palette::{Srgb, Srgba, WithAlpha};
use serde::{Deserialize, Serialize};

use crate::error::{IconError, IconResult};

// ============================================================================
// Color
// ============================================================================

/// An sRGB color with 8-bit channels and straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Srgba<u8>);

impl Color {
    /// Fully transparent. Drawing it erases.
    pub const TRANSPARENT: Self = Self(Srgba::new(0, 0, 0, 0));

    /// Opaque pure white.
    pub const WHITE: Self = Self(Srgba::new(255, 255, 255, 255));

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parses `#RRGGBB` (the `#` is optional) and attaches `alpha`.
    pub fn from_hex(hex: &str, alpha: u8) -> IconResult<Self> {
        let rgb: Srgb<u8> = hex
            .trim()
            .parse()
            .map_err(|e| IconError::constraint(format!("invalid color {hex:?}: {e}")))?;
        Ok(Self(rgb.with_alpha(alpha)))
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    /// The color channels without alpha.
    pub fn to_srgb(&self) -> Srgb<u8> {
        self.0.color
    }

    pub fn to_pixel(&self) -> Rgba<u8> {
        Rgba([self.0.red, self.0.green, self.0.blue, self.0.alpha])
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0.red, self.0.green, self.0.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (alpha {})", self.to_hex(), self.alpha())
    }
}

// ============================================================================
// ColorToken
// ============================================================================

/// A semantic color name, resolved through a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ColorToken {
    Primary,
    Accent,
    BrandWhite,
    Transparent,
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::BrandWhite => "brand-white",
            Self::Transparent => "transparent",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Palette
// ============================================================================

static BRAND: LazyLock<Arc<Palette>> = LazyLock::new(|| {
    Arc::new(
        Palette::new("brand")
            .with(ColorToken::Primary, Color::rgb(0x00, 0x78, 0xD4))
            .with(ColorToken::Accent, Color::rgb(0x50, 0xE6, 0xFF))
            .with(ColorToken::BrandWhite, Color::WHITE)
            .with(ColorToken::Transparent, Color::TRANSPARENT),
    )
});

static WHITE_ONLY: LazyLock<Arc<Palette>> = LazyLock::new(|| {
    Arc::new(
        Palette::new("white-only")
            .with(ColorToken::BrandWhite, Color::WHITE)
            .with(ColorToken::Transparent, Color::TRANSPARENT),
    )
});

/// A lookup table from [`ColorToken`] to [`Color`].
///
/// Palettes are immutable once shared; build one with [`Palette::new`] and
/// [`Palette::with`], then wrap it in an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    entries: BTreeMap<ColorToken, Color>,
}

impl Palette {
    /// Creates an empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Adds or replaces the color for `token`.
    pub fn with(mut self, token: ColorToken, color: Color) -> Self {
        self.entries.insert(token, color);
        self
    }

    /// The full brand palette used by the color profile.
    pub fn brand() -> Arc<Self> {
        Arc::clone(&BRAND)
    }

    /// Brand white plus transparent, used by the outline profile.
    pub fn white_only() -> Arc<Self> {
        Arc::clone(&WHITE_ONLY)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves a token to its color.
    ///
    /// A token the palette does not define is a constraint violation.
    pub fn resolve(&self, token: ColorToken) -> IconResult<Color> {
        self.entries.get(&token).copied().ok_or_else(|| {
            IconError::constraint(format!(
                "palette {:?} has no color for token {token}",
                self.name
            ))
        })
    }

    pub fn contains(&self, token: ColorToken) -> bool {
        self.entries.contains_key(&token)
    }

    /// Iterates the defined tokens in a stable order.
    pub fn entries(&self) -> impl Iterator<Item = (ColorToken, Color)> + '_ {
        self.entries.iter().map(|(t, c)| (*t, *c))
    }
}
