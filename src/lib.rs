//! icon-forge: parametric icon generation with strict output constraints
//!
//! This crate draws flat icons from declarative profiles and guarantees the
//! result meets exact size, padding, alpha, and color-purity rules before a
//! single byte is written.
//!
//! # Example
//!
//! ```
//! use icon_forge::{IconGenerator, ProfileTemplate};
//!
//! let mut generator = IconGenerator::with_defaults();
//!
//! let spec = ProfileTemplate::outline().instantiate(32).unwrap();
//! let asset = generator.generate(&spec).unwrap();
//! assert_eq!((asset.width, asset.height), (32, 32));
//! ```
//!
//! # Custom Profiles
//!
//! Profiles are plain JSON. Every coordinate is a fraction of the icon size:
//!
//! ```
//! use icon_forge::{IconGenerator, MemoryAssetSink, ProfileTemplate};
//!
//! let json = r#"{
//!     "name": "dot",
//!     "fileName": "dot.png",
//!     "defaultSize": 48,
//!     "paddingRatio": 0.125,
//!     "layers": [
//!         { "kind": "circle", "center": { "x": 0.5, "y": 0.5 },
//!           "radius": 0.3, "color": "accent" }
//!     ]
//! }"#;
//!
//! let template = ProfileTemplate::from_json(json).unwrap();
//! let mut sink = MemoryAssetSink::new();
//! let outcomes = IconGenerator::new(vec![template]).generate_all(&mut sink);
//! assert!(outcomes[0].is_ok());
//! ```

mod canvas;
mod color;
mod compositor;
mod constraint;
mod error;
mod generator;
mod icon;
mod output;
mod primitive;
mod profile;
mod variant;

pub mod geometry;
pub mod text;

pub use canvas::{Canvas, COVERAGE_THRESHOLD};
pub use color::{Color, ColorToken, Palette};
pub use compositor::{compose, Compositor};
pub use constraint::{
    binarize_alpha, check_on_canvas, check_padding, check_size, effective_padding, PurityRule,
    ALPHA_THRESHOLD, BOUNDS_TOLERANCE,
};
pub use error::{IconError, IconResult};
pub use generator::{encode_png, IconGenerator, ProfileOutcome};
pub use icon::{BoundsF, GeneratedAsset, PointF, RectPx, SizePx};
pub use output::{
    backup_path_for, AssetSink, BackupRecord, FsAssetSink, MemoryAssetSink, Persisted,
    BACKUP_SUFFIX,
};
pub use primitive::{Drawable, Layer, Role, ShapePrimitive};
pub use profile::{
    BuiltinPalette, PaletteEntry, PaletteRef, ProfileSet, ProfileTemplate, DEFAULT_LABEL_FONT,
};
pub use text::{Font, FontRef, GlyphMask};
pub use variant::{VariantSpec, VariantSpecBuilder, MAX_SIZE};
