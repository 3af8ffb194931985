//! Serializable icon profiles.
//!
//! A [`ProfileTemplate`] is a size-independent icon description: every
//! coordinate and length in its layers is a fraction of the icon size, so
//! [`ProfileTemplate::instantiate`] at any size yields a proportionally
//! identical [`VariantSpec`]. Templates serialize to camelCase JSON, which
//! is how callers supply profiles beyond the two built-ins.
//!
//! # Example
//!
//! ```
//! use icon_forge::ProfileTemplate;
//!
//! let template = ProfileTemplate::outline();
//! let json = template.to_json().unwrap();
//! let restored = ProfileTemplate::from_json(&json).unwrap();
//!
//! let spec = restored.instantiate(64).unwrap();
//! assert_eq!(spec.size(), 64);
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorToken, Palette};
use crate::constraint::PurityRule;
use crate::error::IconResult;
use crate::icon::{BoundsF, PointF};
use crate::primitive::{Layer, ShapePrimitive};
use crate::text::FontRef;
use crate::variant::VariantSpec;

/// Where the color profile asks for its label font first.
pub const DEFAULT_LABEL_FONT: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

// ============================================================================
// Palette references
// ============================================================================

/// One of the palettes built into the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum BuiltinPalette {
    Brand,
    WhiteOnly,
}

/// A palette color written as hex, optionally with alpha.
///
/// ```json
/// "#0078D4"
/// // or
/// { "hex": "#FFFFFF", "alpha": 128 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum PaletteEntry {
    Hex(String),
    WithAlpha { hex: String, alpha: u8 },
}

impl PaletteEntry {
    pub fn to_color(&self) -> IconResult<Color> {
        match self {
            Self::Hex(hex) => Color::from_hex(hex, u8::MAX),
            Self::WithAlpha { hex, alpha } => Color::from_hex(hex, *alpha),
        }
    }
}

/// Either a built-in palette name or an inline token table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum PaletteRef {
    Builtin(BuiltinPalette),
    Custom(BTreeMap<ColorToken, PaletteEntry>),
}

impl Default for PaletteRef {
    fn default() -> Self {
        Self::Builtin(BuiltinPalette::Brand)
    }
}

impl PaletteRef {
    /// Resolves to a shared palette. Built-ins are never rebuilt.
    pub fn load(&self, profile_name: &str) -> IconResult<Arc<Palette>> {
        match self {
            Self::Builtin(BuiltinPalette::Brand) => Ok(Palette::brand()),
            Self::Builtin(BuiltinPalette::WhiteOnly) => Ok(Palette::white_only()),
            Self::Custom(entries) => {
                let mut palette = Palette::new(profile_name);
                for (token, entry) in entries {
                    palette = palette.with(*token, entry.to_color()?);
                }
                Ok(Arc::new(palette))
            }
        }
    }
}

// ============================================================================
// ProfileTemplate
// ============================================================================

/// A size-independent icon profile.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "outline",
///   "fileName": "outline.png",
///   "defaultSize": 32,
///   "paddingRatio": 0.0625,
///   "minPaddingPx": 2.0,
///   "palette": "white-only",
///   "purity": "#FFFFFF",
///   "layers": [
///     { "kind": "ellipse", "center": { "x": 0.5, "y": 0.5 },
///       "radii": { "x": 0.375, "y": 0.3125 }, "color": "brand-white" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ProfileTemplate {
    pub name: String,

    /// Destination file name, relative to the output directory.
    pub file_name: PathBuf,

    /// Size used when the caller does not ask for one.
    pub default_size: u32,

    /// Fraction of the size kept clear on every edge.
    pub padding_ratio: f32,

    /// Absolute padding floor in pixels. Not scaled with the size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_padding_px: Option<f32>,

    #[serde(default)]
    pub palette: PaletteRef,

    /// If set, every visible pixel must be exactly this `#RRGGBB` color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,

    /// Layers in draw order, in fractions of the size.
    pub layers: Vec<Layer>,
}

impl ProfileTemplate {
    /// The 192 px full-color icon: a rounded brand square holding a white
    /// speech bubble with an accent sparkle and a "GPT" label.
    pub fn color() -> Self {
        let px = |v: f32| v / 192.0;
        let star_center = PointF::new(0.5, px(91.0));

        Self {
            name: "color".into(),
            file_name: "color.png".into(),
            default_size: 192,
            padding_ratio: 0.1875,
            min_padding_px: None,
            palette: PaletteRef::Builtin(BuiltinPalette::Brand),
            purity: None,
            layers: vec![
                Layer::background(ShapePrimitive::RoundedRect {
                    bounds: BoundsF::new(0.1875, 0.1875, 0.8125, 0.8125),
                    corner_radius: px(20.0),
                    color: ColorToken::Primary,
                }),
                Layer::content(ShapePrimitive::Ellipse {
                    center: PointF::new(0.5, 0.5),
                    radii: PointF::new(px(46.0), px(36.0)),
                    color: ColorToken::BrandWhite,
                }),
                Layer::content(ShapePrimitive::Polygon {
                    points: vec![
                        PointF::new(px(65.0), px(132.0)),
                        PointF::new(px(55.0), px(147.0)),
                        PointF::new(px(75.0), px(137.0)),
                    ],
                    color: ColorToken::BrandWhite,
                }),
                Layer::content(ShapePrimitive::Star {
                    center: star_center,
                    spoke_count: 8,
                    outer_length: px(35.0),
                    inner_length_ratio: 0.4,
                    stroke_width: px(6.0),
                    color: ColorToken::Accent,
                }),
                Layer::content(ShapePrimitive::Circle {
                    center: star_center,
                    radius: px(8.0),
                    color: ColorToken::Accent,
                }),
                Layer::content(ShapePrimitive::Label {
                    anchor: PointF::new(0.5, 0.68),
                    text: "GPT".into(),
                    px_size: px(20.0),
                    color: ColorToken::Primary,
                    preferred_font: FontRef::file(DEFAULT_LABEL_FONT),
                }),
            ],
        }
    }

    /// The 32 px outline icon: every primitive in pure white on
    /// transparency.
    pub fn outline() -> Self {
        let px = |v: f32| v / 32.0;
        let star_center = PointF::new(0.5, px(15.0));

        Self {
            name: "outline".into(),
            file_name: "outline.png".into(),
            default_size: 32,
            padding_ratio: 0.0625,
            min_padding_px: Some(2.0),
            palette: PaletteRef::Builtin(BuiltinPalette::WhiteOnly),
            purity: Some(Color::WHITE.to_hex()),
            layers: vec![
                Layer::content(ShapePrimitive::Ellipse {
                    center: PointF::new(0.5, 0.5),
                    radii: PointF::new(px(12.0), px(10.0)),
                    color: ColorToken::BrandWhite,
                }),
                Layer::content(ShapePrimitive::Polygon {
                    points: vec![
                        PointF::new(px(7.0), px(26.0)),
                        PointF::new(px(5.0), px(30.0)),
                        PointF::new(px(9.0), px(27.0)),
                    ],
                    color: ColorToken::BrandWhite,
                }),
                Layer::content(ShapePrimitive::Star {
                    center: star_center,
                    spoke_count: 4,
                    outer_length: px(8.0),
                    inner_length_ratio: 1.0,
                    stroke_width: px(2.0),
                    color: ColorToken::BrandWhite,
                }),
                Layer::content(ShapePrimitive::Circle {
                    center: star_center,
                    radius: px(2.0),
                    color: ColorToken::BrandWhite,
                }),
            ],
        }
    }

    /// Both built-in profiles, color first.
    pub fn defaults() -> Vec<Self> {
        vec![Self::color(), Self::outline()]
    }

    /// Builds a validated spec at `size` pixels.
    pub fn instantiate(&self, size: u32) -> IconResult<VariantSpec> {
        let factor = size as f32;
        let purity = self
            .purity
            .as_deref()
            .map(|hex| Color::from_hex(hex, u8::MAX).map(|c| PurityRule::new(c.to_srgb())))
            .transpose()?;

        VariantSpec::builder(&self.name, size)
            .file_name(&self.file_name)
            .padding_ratio(self.padding_ratio)
            .min_padding_px(self.min_padding_px)
            .palette(self.palette.load(&self.name)?)
            .purity(purity)
            .layers(self.layers.iter().map(|layer| layer.scaled(factor)))
            .build()
    }

    /// Builds a validated spec at the template's default size.
    pub fn default_spec(&self) -> IconResult<VariantSpec> {
        self.instantiate(self.default_size)
    }

    /// Serializes the template to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the template to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a template from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// ProfileSet
// ============================================================================

/// Several templates in one JSON document, generated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ProfileSet {
    pub profiles: Vec<ProfileTemplate>,
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self {
            profiles: ProfileTemplate::defaults(),
        }
    }
}

impl ProfileSet {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_instantiate_at_default_size() {
        let color = ProfileTemplate::color().default_spec().unwrap();
        assert_eq!(color.size(), 192);
        assert_eq!(color.padding(), 36.0);
        assert!(color.purity().is_none());

        let outline = ProfileTemplate::outline().default_spec().unwrap();
        assert_eq!(outline.size(), 32);
        assert_eq!(outline.padding(), 2.0);
        assert_eq!(outline.purity(), Some(&PurityRule::pure_white()));
        assert_eq!(outline.palette().name(), "white-only");
    }

    #[test]
    fn builtins_survive_other_sizes() {
        for size in [96, 256, 384] {
            assert!(ProfileTemplate::color().instantiate(size).is_ok(), "color at {size}");
        }
        for size in [32, 48, 64, 128] {
            assert!(ProfileTemplate::outline().instantiate(size).is_ok(), "outline at {size}");
        }
    }

    #[test]
    fn outline_padding_floor_binds_below_native_size() {
        // At 16 px the 2 px floor beats the ratio and the bubble tail crosses it.
        let err = ProfileTemplate::outline().instantiate(16).unwrap_err();
        assert!(err.is_constraint());
        assert!(err.to_string().contains("polygon"));
    }

    #[test]
    fn outline_draws_every_layer_in_brand_white() {
        let template = ProfileTemplate::outline();
        assert!(
            template
                .layers
                .iter()
                .all(|layer| layer.primitive.color() == ColorToken::BrandWhite)
        );

        let canvas = crate::compositor::compose(&template.default_spec().unwrap()).unwrap();
        let image = canvas.image();
        assert!(PurityRule::pure_white().check(image).is_ok());
        let opaque: Vec<_> = image.pixels().filter(|p| p.0[3] > 0).collect();
        assert!(!opaque.is_empty());
        assert!(opaque.iter().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn file_name_must_stay_under_output_root() {
        for bad in ["/tmp/outline.png", "../outline.png", "icons/../../outline.png"] {
            let mut template = ProfileTemplate::outline();
            template.file_name = bad.into();
            let err = template.default_spec().unwrap_err();
            assert!(err.is_constraint(), "{bad}: {err}");
        }

        let mut nested = ProfileTemplate::outline();
        nested.file_name = "icons/outline.png".into();
        assert!(nested.default_spec().is_ok());
    }

    #[test]
    fn color_background_spans_padded_square() {
        let spec = ProfileTemplate::color().instantiate(192).unwrap();
        let background = &spec.layers()[0];
        assert!(background.is_background());
        let ShapePrimitive::RoundedRect { bounds, .. } = background.primitive else {
            panic!("background is not a rounded rect");
        };
        assert_eq!(bounds, BoundsF::new(36.0, 36.0, 156.0, 156.0));
    }

    #[test]
    fn template_json_roundtrip() {
        let template = ProfileTemplate::color();
        let json = template.to_json_pretty().unwrap();
        assert!(json.contains("\"paddingRatio\""));
        assert!(json.contains("\"roundedRect\""));
        assert!(json.contains("\"preferredFont\""));

        let restored = ProfileTemplate::from_json(&json).unwrap();
        assert_eq!(restored, template);
    }

    #[test]
    fn palette_reference_forms() {
        let builtin: PaletteRef = serde_json::from_str(r#""white-only""#).unwrap();
        assert_eq!(builtin, PaletteRef::Builtin(BuiltinPalette::WhiteOnly));

        let custom: PaletteRef = serde_json::from_str(
            r##"{ "primary": "#112233", "brand-white": { "hex": "#FFFFFF", "alpha": 128 } }"##,
        )
        .unwrap();
        let palette = custom.load("custom").unwrap();
        assert_eq!(
            palette.resolve(ColorToken::Primary).unwrap(),
            Color::rgb(0x11, 0x22, 0x33)
        );
        assert_eq!(palette.resolve(ColorToken::BrandWhite).unwrap().alpha(), 128);
        assert!(palette.resolve(ColorToken::Accent).unwrap_err().is_constraint());
    }

    #[test]
    fn bad_hex_is_a_constraint_violation() {
        let mut template = ProfileTemplate::outline();
        template.purity = Some("#nothex".into());
        assert!(template.instantiate(32).unwrap_err().is_constraint());
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = r#"{
            "name": "dot",
            "fileName": "dot.png",
            "defaultSize": 24,
            "paddingRatio": 0.125,
            "layers": [
                { "kind": "circle", "center": { "x": 0.5, "y": 0.5 }, "radius": 0.25, "color": "accent" }
            ]
        }"#;
        let template = ProfileTemplate::from_json(json).unwrap();
        assert_eq!(template.palette, PaletteRef::default());
        let spec = template.default_spec().unwrap();
        assert_eq!(spec.padding(), 3.0);
        assert!(spec.purity().is_none());
    }

    #[test]
    fn profile_set_defaults_to_builtins() {
        let set = ProfileSet::default();
        let names: Vec<_> = set.profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["color", "outline"]);

        let restored = ProfileSet::from_json(&set.to_json_pretty().unwrap()).unwrap();
        assert_eq!(restored, set);
    }
}
