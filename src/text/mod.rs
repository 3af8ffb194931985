//! Label text with a guaranteed fallback font.
//!
//! A label names a preferred font through a [`FontRef`]. Resolving it is a
//! two-branch lookup: either the preferred face loads and renders, or the
//! embedded bitmap font is used instead. There is no third outcome, so text
//! rendering never fails a generation.

pub mod bitmap;
pub mod outline;

pub use outline::OutlineFont;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// FontRef
// ============================================================================

/// Where a label's preferred font comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum FontRef {
    /// A TrueType/OpenType file on disk.
    File(PathBuf),
    /// An installed font family, looked up among system fonts.
    Family(String),
    /// The embedded bitmap font.
    #[default]
    Embedded,
}

impl FontRef {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn family(name: impl Into<String>) -> Self {
        Self::Family(name.into())
    }
}

/// Why a preferred font could not be used. Always recovered locally.
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    #[error("cannot read font file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font data could not be parsed")]
    Unparsable,

    #[error("font family {0:?} is not installed")]
    FamilyNotFound(String),

    #[error("font produced no glyph outlines")]
    NoGlyphs,

    #[error("text rendering failed: {0}")]
    Render(String),
}

// ============================================================================
// GlyphMask
// ============================================================================

/// Per-pixel text coverage, 0 (no ink) to 255 (solid ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl GlyphMask {
    /// A mask with no ink. Dimensions too large to address give an empty
    /// mask.
    pub fn blank(width: u32, height: u32) -> Self {
        match width.checked_mul(height) {
            Some(len) => Self {
                width,
                height,
                coverage: vec![0; len as usize],
            },
            None => Self {
                width: 0,
                height: 0,
                coverage: Vec::new(),
            },
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: u8) {
        let index = self.index(x, y);
        self.coverage[index] = value;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn inked_pixels(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0).count()
    }

    /// Crops to the smallest box holding every inked pixel.
    pub fn trimmed(&self) -> Self {
        let inked = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y) > 0);

        let mut extent: Option<(u32, u32, u32, u32)> = None;
        for (x, y) in inked {
            extent = Some(match extent {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        let Some((x0, y0, x1, y1)) = extent else {
            return Self::blank(0, 0);
        };

        let mut out = Self::blank(x1 - x0 + 1, y1 - y0 + 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.set(x - x0, y - y0, self.get(x, y));
            }
        }
        out
    }
}

// ============================================================================
// Font resolution
// ============================================================================

/// A usable font: the preferred face, or the embedded default.
#[derive(Debug, Clone)]
pub enum Font {
    Preferred(OutlineFont),
    Embedded,
}

impl Font {
    /// Resolves a font reference, falling back to the embedded font on any
    /// failure.
    pub fn resolve(font_ref: &FontRef) -> Self {
        let loaded = match font_ref {
            FontRef::Embedded => return Self::Embedded,
            FontRef::File(path) => std::fs::read(path)
                .map_err(|source| ResourceError::Read {
                    path: path.clone(),
                    source,
                })
                .and_then(OutlineFont::from_data),
            FontRef::Family(name) => OutlineFont::from_system(name),
        };

        match loaded {
            Ok(font) => {
                tracing::debug!(family = font.family(), "preferred font loaded");
                Self::Preferred(font)
            }
            Err(err) => {
                tracing::warn!(?font_ref, error = %err, "preferred font unavailable, using embedded font");
                Self::Embedded
            }
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded)
    }

    /// Renders one line of text roughly `px_size` pixels tall.
    pub fn rasterize(&self, text: &str, px_size: f32) -> GlyphMask {
        match self {
            Self::Embedded => bitmap::rasterize(text, px_size),
            Self::Preferred(font) => font.rasterize(text, px_size).unwrap_or_else(|err| {
                if !text.trim().is_empty() {
                    tracing::warn!(family = font.family(), error = %err, "falling back to embedded font");
                }
                bitmap::rasterize(text, px_size)
            }),
        }
    }
}
