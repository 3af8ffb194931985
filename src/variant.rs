//! A fully instantiated icon profile.
//!
//! A [`VariantSpec`] fixes the canvas size, padding, palette, purity rule,
//! and the ordered layers in pixel coordinates. Everything that can be
//! checked without drawing is checked by [`VariantSpecBuilder::build`], so a
//! spec that exists is one the compositor can draw.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::color::Palette;
use crate::constraint::{check_on_canvas, check_padding, effective_padding, PurityRule};
use crate::error::{IconError, IconResult};
use crate::icon::BoundsF;
use crate::primitive::{Drawable, Layer};

/// Largest canvas edge, in pixels, a spec may ask for.
pub const MAX_SIZE: u32 = 4096;

/// One icon profile at one size. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    name: String,
    file_name: PathBuf,
    size: u32,
    padding_ratio: f32,
    min_padding_px: Option<f32>,
    palette: Arc<Palette>,
    purity: Option<PurityRule>,
    layers: Vec<Layer>,
}

impl VariantSpec {
    pub fn builder(name: impl Into<String>, size: u32) -> VariantSpecBuilder {
        VariantSpecBuilder::new(name, size)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Destination file name, relative to wherever the asset sink writes.
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn padding_ratio(&self) -> f32 {
        self.padding_ratio
    }

    pub fn min_padding_px(&self) -> Option<f32> {
        self.min_padding_px
    }

    /// The inset content must stay inside, in pixels.
    pub fn padding(&self) -> f32 {
        effective_padding(self.size, self.padding_ratio, self.min_padding_px)
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn purity(&self) -> Option<&PurityRule> {
        self.purity.as_ref()
    }

    /// Layers in draw order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects the parts of a [`VariantSpec`] and validates them together.
#[derive(Debug, Clone)]
pub struct VariantSpecBuilder {
    name: String,
    file_name: Option<PathBuf>,
    size: u32,
    padding_ratio: f32,
    min_padding_px: Option<f32>,
    palette: Arc<Palette>,
    purity: Option<PurityRule>,
    layers: Vec<Layer>,
}

impl VariantSpecBuilder {
    fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            size,
            padding_ratio: 0.0,
            min_padding_px: None,
            palette: Palette::brand(),
            purity: None,
            layers: Vec::new(),
        }
    }

    /// Defaults to `<name>.png`.
    pub fn file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn padding_ratio(mut self, ratio: f32) -> Self {
        self.padding_ratio = ratio;
        self
    }

    /// Padding never drops below this many pixels.
    pub fn min_padding_px(mut self, floor: Option<f32>) -> Self {
        self.min_padding_px = floor;
        self
    }

    pub fn palette(mut self, palette: Arc<Palette>) -> Self {
        self.palette = palette;
        self
    }

    pub fn purity(mut self, rule: Option<PurityRule>) -> Self {
        self.purity = rule;
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Validates every layer and freezes the spec.
    ///
    /// Bad primitive parameters and anything off the canvas are geometry
    /// errors. An unknown palette token, a bad padding setting, or content
    /// crossing the padding bound is a constraint violation. Labels are
    /// only checked at their anchor here; their measured box is checked
    /// when the text is drawn.
    pub fn build(self) -> IconResult<VariantSpec> {
        if self.size == 0 {
            return Err(IconError::geometry(format!(
                "profile {:?} has a zero canvas size",
                self.name
            )));
        }
        if self.size > MAX_SIZE {
            return Err(IconError::geometry(format!(
                "profile {:?} canvas size {} exceeds the {MAX_SIZE}px limit",
                self.name, self.size
            )));
        }
        if !(0.0..0.5).contains(&self.padding_ratio) {
            return Err(IconError::constraint(format!(
                "profile {:?} padding ratio must be in [0, 0.5), got {}",
                self.name, self.padding_ratio
            )));
        }
        if let Some(floor) = self.min_padding_px {
            if !(floor.is_finite() && floor >= 0.0) {
                return Err(IconError::constraint(format!(
                    "profile {:?} minimum padding must be a non-negative number, got {floor}",
                    self.name
                )));
            }
        }

        let padding = effective_padding(self.size, self.padding_ratio, self.min_padding_px);
        if padding * 2.0 >= self.size as f32 {
            return Err(IconError::constraint(format!(
                "profile {:?} padding {padding} leaves no room on a {}px canvas",
                self.name, self.size
            )));
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let primitive = &layer.primitive;
            let what = format!("layer {index} ({})", primitive.kind());

            self.palette.resolve(primitive.color())?;

            match primitive.drawable()? {
                Drawable::Fill(shape) => {
                    let bounds = shape.bounds();
                    check_on_canvas(&what, &bounds, self.size)?;
                    if !layer.is_background() {
                        check_padding(&what, &bounds, self.size, padding)?;
                    }
                }
                Drawable::Text {
                    anchor, px_size, ..
                } => {
                    let point = BoundsF::around(anchor, 0.0, 0.0);
                    check_on_canvas(&format!("{what} anchor"), &point, self.size)?;
                    // A label taller than the canvas can never fit.
                    if px_size > self.size as f32 {
                        return Err(IconError::geometry(format!(
                            "{what} is {px_size}px tall, larger than the {}px canvas",
                            self.size
                        )));
                    }
                }
            }
        }

        let file_name = self
            .file_name
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", self.name)));
        check_relative(&self.name, &file_name)?;

        Ok(VariantSpec {
            name: self.name,
            file_name,
            size: self.size,
            padding_ratio: self.padding_ratio,
            min_padding_px: self.min_padding_px,
            palette: self.palette,
            purity: self.purity,
            layers: self.layers,
        })
    }
}

/// Output paths must stay below whatever root the asset sink writes to.
fn check_relative(name: &str, file_name: &Path) -> IconResult<()> {
    let escapes = file_name.as_os_str().is_empty()
        || file_name
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(IconError::constraint(format!(
            "profile {name:?} file name {} must be a relative path without '..'",
            file_name.display()
        )));
    }
    Ok(())
}
