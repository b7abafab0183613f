// SVG-subset shape model, transforms and rasterization
mod arena;
pub mod canvas;
mod color;
mod geometry;
mod parse;
pub mod shape;
pub mod syntax;

pub use arena::{ShapeArena, ShapeId};
pub use canvas::{Canvas, DrawCall, RasterCanvas, Recorder};
pub use color::Color;
pub use geometry::Point;
pub use shape::{Geometry, Primitive, Shape, ShapeKind};
pub use syntax::Transform;

use image::{ImageFormat, RgbImage};
use parse::Parser;
use roxmltree::Document as XmlDocument;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SvgError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Missing required attribute '{attr}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attr: &'static str,
    },

    #[error("Invalid value '{value}' for attribute '{attr}' on element '{element}'")]
    InvalidAttribute {
        element: &'static str,
        attr: &'static str,
        value: String,
    },

    #[error("Malformed point '{pair}' in 'points' on element '{element}'")]
    InvalidPoint { element: &'static str, pair: String },

    #[error("Unknown color '{token}' in attribute '{attr}' on element '{element}'")]
    UnresolvedColor {
        element: &'static str,
        attr: &'static str,
        token: String,
    },

    #[error("Invalid SVG structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, SvgError>;

/// A loaded document: canvas size plus the shape tree
#[derive(Debug)]
pub struct Document {
    width: u32,
    height: u32,
    arena: ShapeArena,
    roots: Vec<ShapeId>,
}

impl Document {
    /// Parse a document from XML text
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = XmlDocument::parse(xml)?;

        let mut parser = Parser::new();
        let parsed = parser.parse_document(&doc)?;

        Ok(Self {
            width: parsed.width,
            height: parsed.height,
            arena: parser.arena,
            roots: parsed.roots,
        })
    }

    /// Parse a document from file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Top-level shapes in paint order
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    pub fn shape(&self, id: ShapeId) -> &Shape {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &ShapeArena {
        &self.arena
    }

    /// Visit every shape in document order with its nesting depth.
    pub fn walk(&self, mut f: impl FnMut(ShapeId, &Shape, usize)) {
        fn visit(
            arena: &ShapeArena,
            id: ShapeId,
            depth: usize,
            f: &mut dyn FnMut(ShapeId, &Shape, usize),
        ) {
            let shape = arena.get(id);
            f(id, shape, depth);
            for &child in shape.children() {
                visit(arena, child, depth + 1, f);
            }
        }

        for &root in &self.roots {
            visit(&self.arena, root, 0, &mut f);
        }
    }

    /// First shape in document order whose `id` attribute equals `id`
    pub fn find(&self, id: &str) -> Option<ShapeId> {
        let mut found = None;
        self.walk(|handle, shape, _| {
            if found.is_none() && shape.id() == Some(id) {
                found = Some(handle);
            }
        });
        found
    }

    /// Issue every draw call, back to front.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for &root in &self.roots {
            self.arena.draw(root, canvas);
        }
    }

    pub fn rasterize(&self) -> RgbImage {
        let mut canvas = RasterCanvas::new(self.width, self.height);
        self.render(&mut canvas);
        canvas.into_image()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.rasterize()
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }
}

/// Load `svg_file` and write it rasterized to `png_file`.
pub fn convert(svg_file: impl AsRef<Path>, png_file: impl AsRef<Path>) -> Result<()> {
    let svg_file = svg_file.as_ref();
    let doc = Document::parse_file(svg_file)?;
    log::debug!(
        "Rasterizing {} ({}x{}, {} shapes)",
        svg_file.display(),
        doc.width(),
        doc.height(),
        doc.arena().len()
    );
    doc.save_png(png_file)
}
