//! Error taxonomy for icon generation.

use std::path::PathBuf;

pub type IconResult<T> = Result<T, IconError>;

/// Every failure a generation can surface to its caller.
///
/// Font resolution problems never appear here: they are absorbed by the
/// embedded-font fallback in [`crate::text`].
#[derive(thiserror::Error, Debug)]
pub enum IconError {
    /// Invalid primitive parameters or coordinates outside the canvas.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Palette, padding, size, or color purity rule broken.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The raster buffer could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),

    /// The asset (or its backup) could not be written.
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied profile document could not be decoded.
    #[error("profile error: {0}")]
    Profile(#[from] serde_json::Error),
}

impl IconError {
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors raised by invalid shape parameters.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::Geometry(_))
    }

    /// Returns true for palette, padding, size, or purity violations.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}
