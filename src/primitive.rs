//! Declarative draw operations.
//!
//! A [`ShapePrimitive`] names a shape, its parameters, and the palette token
//! it is filled with. The same type describes both profile templates (every
//! coordinate a fraction of the icon size) and instantiated variants (pixel
//! coordinates); [`ShapePrimitive::scaled`] converts between the two.

use serde::{Deserialize, Serialize};

use crate::color::ColorToken;
use crate::error::{IconError, IconResult};
use crate::geometry::{Ellipse, Polygon, RoundedRect, Shape, Star, Stroke};
use crate::icon::{BoundsF, PointF};
use crate::text::FontRef;

// ============================================================================
// ShapePrimitive
// ============================================================================

/// One draw operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ShapePrimitive {
    Circle {
        center: PointF,
        radius: f32,
        color: ColorToken,
    },
    Ellipse {
        center: PointF,
        radii: PointF,
        color: ColorToken,
    },
    RoundedRect {
        bounds: BoundsF,
        corner_radius: f32,
        color: ColorToken,
    },
    Polygon {
        points: Vec<PointF>,
        color: ColorToken,
    },
    Line {
        from: PointF,
        to: PointF,
        width: f32,
        color: ColorToken,
    },
    Star {
        center: PointF,
        spoke_count: u32,
        outer_length: f32,
        inner_length_ratio: f32,
        stroke_width: f32,
        color: ColorToken,
    },
    /// A single line of text centered on `anchor`, about `px_size` tall.
    Label {
        anchor: PointF,
        text: String,
        px_size: f32,
        color: ColorToken,
        #[serde(default)]
        preferred_font: FontRef,
    },
}

/// A primitive turned into something the canvas can draw.
pub enum Drawable<'a> {
    Fill(Box<dyn Shape>),
    Text {
        anchor: PointF,
        text: &'a str,
        px_size: f32,
        font: &'a FontRef,
    },
}

impl std::fmt::Debug for Drawable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fill(shape) => f.debug_tuple("Fill").field(&shape.bounds()).finish(),
            Self::Text {
                anchor,
                text,
                px_size,
                font,
            } => f
                .debug_struct("Text")
                .field("anchor", anchor)
                .field("text", text)
                .field("px_size", px_size)
                .field("font", font)
                .finish(),
        }
    }
}

impl ShapePrimitive {
    /// Short name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::RoundedRect { .. } => "rounded rect",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
            Self::Star { .. } => "star",
            Self::Label { .. } => "label",
        }
    }

    pub fn color(&self) -> ColorToken {
        match self {
            Self::Circle { color, .. }
            | Self::Ellipse { color, .. }
            | Self::RoundedRect { color, .. }
            | Self::Polygon { color, .. }
            | Self::Line { color, .. }
            | Self::Star { color, .. }
            | Self::Label { color, .. } => *color,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label { .. })
    }

    /// Multiplies every coordinate and length by `factor`.
    ///
    /// Counts and ratios (spoke count, inner length ratio) are unitless and
    /// stay as they are.
    pub fn scaled(&self, factor: f32) -> Self {
        match self {
            Self::Circle {
                center,
                radius,
                color,
            } => Self::Circle {
                center: center.scaled(factor),
                radius: radius * factor,
                color: *color,
            },
            Self::Ellipse {
                center,
                radii,
                color,
            } => Self::Ellipse {
                center: center.scaled(factor),
                radii: radii.scaled(factor),
                color: *color,
            },
            Self::RoundedRect {
                bounds,
                corner_radius,
                color,
            } => Self::RoundedRect {
                bounds: bounds.scaled(factor),
                corner_radius: corner_radius * factor,
                color: *color,
            },
            Self::Polygon { points, color } => Self::Polygon {
                points: points.iter().map(|p| p.scaled(factor)).collect(),
                color: *color,
            },
            Self::Line {
                from,
                to,
                width,
                color,
            } => Self::Line {
                from: from.scaled(factor),
                to: to.scaled(factor),
                width: width * factor,
                color: *color,
            },
            Self::Star {
                center,
                spoke_count,
                outer_length,
                inner_length_ratio,
                stroke_width,
                color,
            } => Self::Star {
                center: center.scaled(factor),
                spoke_count: *spoke_count,
                outer_length: outer_length * factor,
                inner_length_ratio: *inner_length_ratio,
                stroke_width: stroke_width * factor,
                color: *color,
            },
            Self::Label {
                anchor,
                text,
                px_size,
                color,
                preferred_font,
            } => Self::Label {
                anchor: anchor.scaled(factor),
                text: text.clone(),
                px_size: px_size * factor,
                color: *color,
                preferred_font: preferred_font.clone(),
            },
        }
    }

    /// Validates the parameters and builds the drawable form.
    pub fn drawable(&self) -> IconResult<Drawable<'_>> {
        let shape: Box<dyn Shape> = match self {
            Self::Circle { center, radius, .. } => Box::new(Ellipse::circle(*center, *radius)?),
            Self::Ellipse { center, radii, .. } => {
                Box::new(Ellipse::new(*center, radii.x, radii.y)?)
            }
            Self::RoundedRect {
                bounds,
                corner_radius,
                ..
            } => Box::new(RoundedRect::new(*bounds, *corner_radius)?),
            Self::Polygon { points, .. } => Box::new(Polygon::new(points.clone())?),
            Self::Line {
                from, to, width, ..
            } => Box::new(Stroke::new(*from, *to, *width)?),
            Self::Star {
                center,
                spoke_count,
                outer_length,
                inner_length_ratio,
                stroke_width,
                ..
            } => Box::new(Star::new(
                *center,
                *spoke_count,
                *outer_length,
                *inner_length_ratio,
                *stroke_width,
            )?),
            Self::Label {
                anchor,
                text,
                px_size,
                preferred_font,
                ..
            } => {
                if !(*px_size > 0.0 && px_size.is_finite()) {
                    return Err(IconError::geometry(format!(
                        "label {text:?} size must be positive, got {px_size}"
                    )));
                }
                if !(anchor.x.is_finite() && anchor.y.is_finite()) {
                    return Err(IconError::geometry(format!(
                        "label {text:?} has a non-finite anchor"
                    )));
                }
                return Ok(Drawable::Text {
                    anchor: *anchor,
                    text,
                    px_size: *px_size,
                    font: preferred_font,
                });
            }
        };
        Ok(Drawable::Fill(shape))
    }
}

// ============================================================================
// Layer
// ============================================================================

/// Whether a layer is the icon's container or content inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Role {
    /// The container shape. Exempt from the padding bound.
    Background,
    /// Everything drawn inside the padded area.
    #[default]
    Content,
}

/// A primitive at a fixed position in the draw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Layer {
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub primitive: ShapePrimitive,
}

impl Layer {
    pub fn background(primitive: ShapePrimitive) -> Self {
        Self {
            role: Role::Background,
            primitive,
        }
    }

    pub fn content(primitive: ShapePrimitive) -> Self {
        Self {
            role: Role::Content,
            primitive,
        }
    }

    pub fn is_background(&self) -> bool {
        self.role == Role::Background
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            role: self.role,
            primitive: self.primitive.scaled(factor),
        }
    }
}
