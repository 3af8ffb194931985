//! The icon generation engine.
//!
//! [`IconGenerator`] owns a list of profile templates and turns each into a
//! validated, PNG-encoded [`GeneratedAsset`]. Profiles are independent: one
//! failing never stops or alters another.

use std::io::Cursor;

use image::ImageFormat;

use crate::canvas::Canvas;
use crate::compositor::Compositor;
use crate::error::IconResult;
use crate::icon::GeneratedAsset;
use crate::output::{AssetSink, Persisted};
use crate::profile::ProfileTemplate;
use crate::variant::VariantSpec;

/// Encodes a finished canvas as RGBA PNG. Equal canvases give equal bytes.
pub fn encode_png(canvas: &Canvas) -> IconResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// ============================================================================
// ProfileOutcome
// ============================================================================

/// What happened to one profile during [`IconGenerator::generate_all`].
#[derive(Debug)]
pub struct ProfileOutcome {
    pub profile: String,
    pub result: IconResult<Persisted>,
}

impl ProfileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

// ============================================================================
// IconGenerator
// ============================================================================

/// Generates icons for a set of profiles.
///
/// # Example
///
/// ```
/// use icon_forge::{IconGenerator, MemoryAssetSink};
///
/// let mut generator = IconGenerator::with_defaults();
/// let mut sink = MemoryAssetSink::new();
///
/// let outcomes = generator.generate_all(&mut sink);
/// assert!(outcomes.iter().all(|o| o.is_ok()));
/// assert!(sink.get("outline.png").is_some());
/// ```
#[derive(Debug)]
pub struct IconGenerator {
    profiles: Vec<ProfileTemplate>,
    compositor: Compositor,
}

impl IconGenerator {
    pub fn new(profiles: Vec<ProfileTemplate>) -> Self {
        Self {
            profiles,
            compositor: Compositor::new(),
        }
    }

    /// A generator for the built-in color and outline profiles.
    pub fn with_defaults() -> Self {
        Self::new(ProfileTemplate::defaults())
    }

    pub fn profiles(&self) -> &[ProfileTemplate] {
        &self.profiles
    }

    /// Draws, validates, and encodes one spec.
    ///
    /// Nothing is returned unless the raster passed every check.
    #[tracing::instrument(skip(self, spec), fields(profile = spec.name(), size = spec.size()))]
    pub fn generate(&mut self, spec: &VariantSpec) -> IconResult<GeneratedAsset> {
        let canvas = self.compositor.compose(spec)?;
        let encoded_bytes = encode_png(&canvas)?;
        let (width, height) = canvas.image().dimensions();

        tracing::info!(bytes = encoded_bytes.len(), "generated icon");
        Ok(GeneratedAsset {
            path: spec.file_name().to_path_buf(),
            width,
            height,
            encoded_bytes,
        })
    }

    /// Generates every profile at its default size and hands each asset to
    /// `sink`. Returns one outcome per profile, in profile order.
    pub fn generate_all(&mut self, sink: &mut dyn AssetSink) -> Vec<ProfileOutcome> {
        let profiles = self.profiles.clone();
        profiles
            .iter()
            .map(|template| {
                let result = template
                    .default_spec()
                    .and_then(|spec| self.generate(&spec))
                    .and_then(|asset| sink.persist(&asset));
                if let Err(err) = &result {
                    tracing::error!(profile = %template.name, error = %err, "profile failed");
                }
                ProfileOutcome {
                    profile: template.name.clone(),
                    result,
                }
            })
            .collect()
    }
}

impl Default for IconGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorToken;
    use crate::icon::PointF;
    use crate::output::MemoryAssetSink;
    use crate::primitive::{Layer, ShapePrimitive};

    fn decode(bytes: &[u8]) -> image::RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    #[test]
    fn encoded_png_keeps_alpha() {
        let spec = ProfileTemplate::outline().default_spec().unwrap();
        let mut generator = IconGenerator::with_defaults();
        let asset = generator.generate(&spec).unwrap();

        assert_eq!((asset.width, asset.height), (32, 32));
        assert_eq!(&asset.encoded_bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = decode(&asset.encoded_bytes);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(5, 16).0, [255, 255, 255, 255]);
    }

    #[test]
    fn generation_is_deterministic() {
        let spec = ProfileTemplate::color().default_spec().unwrap();
        let first = IconGenerator::with_defaults().generate(&spec).unwrap();
        let second = IconGenerator::with_defaults().generate(&spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failing_profile_does_not_affect_others() {
        let mut broken = ProfileTemplate::outline();
        broken.name = "broken".into();
        broken.file_name = "broken.png".into();
        broken.layers.push(Layer::content(ShapePrimitive::Circle {
            center: PointF::new(0.5, 0.5),
            radius: 0.2,
            color: ColorToken::Primary,
        }));

        let mut generator = IconGenerator::new(vec![
            ProfileTemplate::color(),
            broken,
            ProfileTemplate::outline(),
        ]);
        let mut sink = MemoryAssetSink::new();
        let outcomes = generator.generate_all(&mut sink);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].result.as_ref().unwrap_err().is_constraint());
        assert!(outcomes[2].is_ok());
        assert!(sink.get("broken.png").is_none());
        assert_eq!(sink.len(), 2);
    }
}
