//! Outline-font text rendering using resvg/usvg.
//!
//! The label is wrapped in a one-element SVG document, parsed against a font
//! database holding the preferred face, and rasterized. usvg turns the text
//! into glyph outlines while parsing, so the tree's bounding box is the
//! tight ink box of the run.

use std::sync::Arc;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use super::{GlyphMask, ResourceError};

/// A font face loaded into its own database, ready to shape text.
#[derive(Clone)]
pub struct OutlineFont {
    db: Arc<fontdb::Database>,
    family: String,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .field("faces", &self.db.len())
            .finish()
    }
}

impl OutlineFont {
    /// Loads a face from raw font bytes.
    pub fn from_data(data: Vec<u8>) -> Result<Self, ResourceError> {
        let mut db = fontdb::Database::new();
        db.load_font_data(data);
        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .ok_or(ResourceError::Unparsable)?;
        Ok(Self {
            db: Arc::new(db),
            family,
        })
    }

    /// Looks up an installed family by name.
    pub fn from_system(family: &str) -> Result<Self, ResourceError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            ..Default::default()
        };
        let id = db
            .query(&query)
            .ok_or_else(|| ResourceError::FamilyNotFound(family.to_string()))?;
        let family = db
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| family.to_string());
        Ok(Self {
            db: Arc::new(db),
            family,
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// Renders `text` at `px_size` into a mask trimmed to its ink box.
    pub fn rasterize(&self, text: &str, px_size: f32) -> Result<GlyphMask, ResourceError> {
        // Room for every glyph to be a full em wide plus descenders.
        let doc_w = (px_size * (text.chars().count() as f32 + 1.0)).ceil();
        let doc_h = (px_size * 2.0).ceil();
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{doc_w}" height="{doc_h}"><text x="0" y="{px_size}" font-family="{family}" font-size="{px_size}" fill="#000000">{text}</text></svg>"##,
            family = escape_xml(&self.family),
            text = escape_xml(text),
        );

        let opts = Options {
            font_family: self.family.clone(),
            fontdb: Arc::clone(&self.db),
            ..Options::default()
        };
        let tree = Tree::from_str(&svg, &opts).map_err(|e| ResourceError::Render(e.to_string()))?;

        if !tree.root().has_children() {
            return Err(ResourceError::NoGlyphs);
        }
        let bbox = tree.root().abs_bounding_box();
        let width = bbox.width().ceil() as u32;
        let height = bbox.height().ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or(ResourceError::NoGlyphs)?;

        let transform = Transform::from_translate(-bbox.x(), -bbox.y());
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let mask = pixmap_to_mask(&pixmap).trimmed();
        if mask.is_empty() {
            return Err(ResourceError::NoGlyphs);
        }
        Ok(mask)
    }
}

/// Keeps only the alpha channel, which is the glyph coverage.
///
/// tiny_skia stores premultiplied color, but alpha itself is unaffected.
fn pixmap_to_mask(pixmap: &Pixmap) -> GlyphMask {
    let mut mask = GlyphMask::blank(pixmap.width(), pixmap.height());
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if let Some(pixel) = pixmap.pixel(x, y) {
                mask.set(x, y, pixel.alpha());
            }
        }
    }
    mask
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
