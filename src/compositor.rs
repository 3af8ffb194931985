//! Ordered drawing of a [`VariantSpec`] onto a fresh canvas.
//!
//! Layers are drawn in declaration order with replace semantics, then the
//! raster passes the output checks: exact size, alpha binarization, and the
//! profile's purity rule if it has one. Only a canvas that passed every check
//! leaves this module.

use std::collections::HashMap;

use crate::canvas::Canvas;
use crate::constraint::{binarize_alpha, check_on_canvas, check_padding, check_size};
use crate::error::IconResult;
use crate::icon::{BoundsF, PointF};
use crate::primitive::Drawable;
use crate::text::{Font, FontRef};
use crate::variant::VariantSpec;

/// Draws variant specs, reusing resolved fonts between calls.
#[derive(Debug, Default)]
pub struct Compositor {
    fonts: HashMap<FontRef, Font>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every layer of `spec` and validates the result.
    pub fn compose(&mut self, spec: &VariantSpec) -> IconResult<Canvas> {
        let mut canvas = Canvas::new(spec.size());
        let padding = spec.padding();

        for (index, layer) in spec.layers().iter().enumerate() {
            let primitive = &layer.primitive;
            let color = spec.palette().resolve(primitive.color())?;

            let painted = match primitive.drawable()? {
                Drawable::Fill(shape) => canvas.fill(shape.as_ref(), color),
                Drawable::Text {
                    anchor,
                    text,
                    px_size,
                    font,
                } => {
                    let mask = self.font(font).rasterize(text, px_size);
                    if mask.is_empty() {
                        tracing::debug!(index, text, "label has no ink");
                        continue;
                    }

                    let (left, top) = centered_origin(anchor, mask.width(), mask.height());
                    let bounds = BoundsF::new(
                        left as f32,
                        top as f32,
                        (left + i64::from(mask.width())) as f32,
                        (top + i64::from(mask.height())) as f32,
                    );
                    let what = format!("layer {index} (label {text:?})");
                    check_on_canvas(&what, &bounds, spec.size())?;
                    if !layer.is_background() {
                        check_padding(&what, &bounds, spec.size(), padding)?;
                    }
                    canvas.paint_mask(&mask, left, top, color)
                }
            };
            tracing::debug!(index, kind = primitive.kind(), %color, painted, "drew layer");
        }

        check_size(canvas.image(), spec.size())?;

        let repaired = binarize_alpha(canvas.image_mut());
        if repaired > 0 {
            tracing::warn!(
                profile = spec.name(),
                repaired,
                "binarized semi-transparent pixels"
            );
        }

        if let Some(rule) = spec.purity() {
            rule.check(canvas.image())?;
        }

        Ok(canvas)
    }

    fn font(&mut self, font_ref: &FontRef) -> &Font {
        self.fonts
            .entry(font_ref.clone())
            .or_insert_with(|| Font::resolve(font_ref))
    }
}

/// Composes `spec` with a throwaway font cache.
pub fn compose(spec: &VariantSpec) -> IconResult<Canvas> {
    Compositor::new().compose(spec)
}

/// Top-left corner that centers a `width × height` box on `anchor`.
fn centered_origin(anchor: PointF, width: u32, height: u32) -> (i64, i64) {
    let left = (anchor.x - width as f32 / 2.0).round() as i64;
    let top = (anchor.y - height as f32 / 2.0).round() as i64;
    (left, top)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::color::{Color, ColorToken, Palette};
    use crate::constraint::PurityRule;
    use crate::primitive::{Layer, ShapePrimitive};

    fn rect(min: f32, max: f32, color: ColorToken) -> ShapePrimitive {
        ShapePrimitive::RoundedRect {
            bounds: BoundsF::new(min, min, max, max),
            corner_radius: 0.0,
            color,
        }
    }

    fn label(x: f32, y: f32) -> ShapePrimitive {
        ShapePrimitive::Label {
            anchor: PointF::new(x, y),
            text: "GPT".into(),
            px_size: 16.0,
            color: ColorToken::BrandWhite,
            preferred_font: FontRef::Embedded,
        }
    }

    #[test]
    fn layers_draw_in_order_with_replace() {
        let spec = VariantSpec::builder("order", 16)
            .layer(Layer::background(rect(0.0, 16.0, ColorToken::Primary)))
            .layer(Layer::content(rect(4.0, 12.0, ColorToken::Accent)))
            .build()
            .unwrap();
        let canvas = compose(&spec).unwrap();
        assert_eq!(canvas.image().get_pixel(0, 0).0, [0, 120, 212, 255]);
        assert_eq!(canvas.image().get_pixel(8, 8).0, [80, 230, 255, 255]);
    }

    #[test]
    fn transparent_token_cuts_holes() {
        let spec = VariantSpec::builder("cut", 16)
            .palette(Palette::white_only())
            .purity(Some(PurityRule::pure_white()))
            .layer(Layer::content(rect(2.0, 14.0, ColorToken::BrandWhite)))
            .layer(Layer::content(rect(6.0, 10.0, ColorToken::Transparent)))
            .build()
            .unwrap();
        let canvas = compose(&spec).unwrap();
        assert_eq!(canvas.image().get_pixel(7, 7).0, [0, 0, 0, 0]);
        assert_eq!(canvas.image().get_pixel(3, 3).0, [255, 255, 255, 255]);
    }

    #[test]
    fn purity_violation_aborts() {
        let spec = VariantSpec::builder("impure", 16)
            .purity(Some(PurityRule::pure_white()))
            .layer(Layer::content(rect(2.0, 14.0, ColorToken::Accent)))
            .build()
            .unwrap();
        assert!(compose(&spec).unwrap_err().is_constraint());
    }

    #[test]
    fn partial_alpha_is_binarized() {
        let faint = Arc::new(
            Palette::new("faint")
                .with(ColorToken::BrandWhite, Color::rgba(255, 255, 255, 200))
                .with(ColorToken::Accent, Color::rgba(255, 255, 255, 60)),
        );
        let spec = VariantSpec::builder("faint", 16)
            .palette(faint)
            .purity(Some(PurityRule::pure_white()))
            .layer(Layer::content(rect(0.0, 8.0, ColorToken::BrandWhite)))
            .layer(Layer::content(rect(8.0, 16.0, ColorToken::Accent)))
            .build()
            .unwrap();
        let canvas = compose(&spec).unwrap();
        assert_eq!(canvas.image().get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(canvas.image().get_pixel(12, 12).0, [0, 0, 0, 0]);
        assert!(canvas.image().pixels().all(|p| p.0[3] == 0 || p.0[3] == 255));
    }

    #[test]
    fn label_is_centered_on_anchor() {
        let spec = VariantSpec::builder("label", 64)
            .padding_ratio(0.09375)
            .palette(Palette::white_only())
            .layer(Layer::content(label(32.0, 32.0)))
            .build()
            .unwrap();
        let canvas = compose(&spec).unwrap();

        // The embedded font renders "GPT" at 16px as a 44x14 block.
        let inked: Vec<_> = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());
        assert_eq!(inked.iter().map(|p| p.0).min(), Some(10));
        assert_eq!(inked.iter().map(|p| p.0).max(), Some(53));
        assert_eq!(inked.iter().map(|p| p.1).min(), Some(25));
        assert_eq!(inked.iter().map(|p| p.1).max(), Some(38));
    }

    #[test]
    fn label_crossing_padding_is_a_constraint_violation() {
        let spec = VariantSpec::builder("label", 48)
            .padding_ratio(0.125)
            .palette(Palette::white_only())
            .layer(Layer::content(label(24.0, 24.0)))
            .build()
            .unwrap();
        assert!(compose(&spec).unwrap_err().is_constraint());
    }

    #[test]
    fn label_off_canvas_is_a_geometry_error() {
        let spec = VariantSpec::builder("label", 48)
            .palette(Palette::white_only())
            .layer(Layer::background(label(2.0, 24.0)))
            .build()
            .unwrap();
        assert!(compose(&spec).unwrap_err().is_geometry());
    }

    #[test]
    fn fonts_are_cached_per_reference() {
        let spec = VariantSpec::builder("label", 64)
            .palette(Palette::white_only())
            .layer(Layer::content(label(32.0, 20.0)))
            .layer(Layer::content(label(32.0, 44.0)))
            .build()
            .unwrap();
        let mut compositor = Compositor::new();
        compositor.compose(&spec).unwrap();
        assert_eq!(compositor.fonts.len(), 1);
    }
}
