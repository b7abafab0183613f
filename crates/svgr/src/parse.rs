use crate::color::Color;
use crate::geometry::Point;
use crate::shape::Shape;
use crate::syntax::{self, Transform};
use crate::{Result, ShapeArena, ShapeId, SvgError};
use roxmltree::{Document, Node};

/// Transform resolved for one element.
///
/// An element carries at most one transform kind; the other two stay at
/// their identity values. Applied as rotate, then translate, then scale, with
/// rotate and scale pivoting on `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementTransform {
    /// Degrees, see [`Point::rotate`] for the direction (default: 0.0)
    pub rotation: f64,
    /// Translation (default: 0, 0)
    pub offset: Point,
    /// Scale factor (default: 1.0)
    pub scale: f64,
    /// Pivot for rotation and scale (default: document origin)
    pub origin: Point,
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self {
            rotation: 0.0,
            offset: Point::ORIGIN,
            scale: 1.0,
            origin: Point::ORIGIN,
        }
    }
}

impl ElementTransform {
    pub fn new(transform: Transform, origin: Point) -> Self {
        let mut xf = Self {
            origin,
            ..Self::default()
        };
        match transform {
            Transform::Identity => {}
            Transform::Rotate(degrees) => xf.rotation = degrees,
            Transform::Translate(dir) => xf.offset = dir,
            Transform::Scale(factor) => xf.scale = factor,
        }
        xf
    }

    pub fn apply(&self, arena: &mut ShapeArena, id: ShapeId) {
        if self.rotation != 0.0 {
            arena.rotate(id, self.origin, self.rotation);
        }
        if self.offset != Point::ORIGIN {
            arena.translate(id, self.offset);
        }
        if self.scale != 1.0 {
            arena.scale(id, self.origin, self.scale);
        }
    }
}

/// Builder turning the element tree into arena shapes
#[derive(Debug, Default)]
pub struct Parser {
    pub arena: ShapeArena,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            arena: ShapeArena::new(),
        }
    }

    pub fn parse_document(&mut self, doc: &Document) -> Result<ParsedDocument> {
        let root = doc.root_element();

        if root.tag_name().name() != "svg" {
            return Err(SvgError::InvalidStructure(format!(
                "Expected root element 'svg', found '{}'",
                root.tag_name().name()
            )));
        }

        let width = self.parse_dimension(&root, "width")?;
        let height = self.parse_dimension(&root, "height")?;
        let roots = self.parse_children(&root)?;

        log::debug!(
            "Built {} shapes ({} top-level) on a {width}x{height} canvas",
            self.arena.len(),
            roots.len()
        );

        Ok(ParsedDocument {
            width,
            height,
            roots,
        })
    }

    fn parse_children(&mut self, node: &Node) -> Result<Vec<ShapeId>> {
        let mut ids = Vec::new();
        for child in node.children().filter(|n| n.is_element()) {
            if let Some(id) = self.parse_element(&child)? {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Build one element and apply its own transform. Unknown tags yield `None`.
    fn parse_element(&mut self, node: &Node) -> Result<Option<ShapeId>> {
        let (element, shape) = match node.tag_name().name() {
            "ellipse" => ("ellipse", self.parse_ellipse(node)?),
            "circle" => ("circle", self.parse_circle(node)?),
            "rect" => ("rect", self.parse_rect(node)?),
            "line" => ("line", self.parse_line(node)?),
            "polyline" => ("polyline", self.parse_polyline(node)?),
            "polygon" => ("polygon", self.parse_polygon(node)?),
            "g" => ("g", self.parse_group(node)?),
            name => {
                log::debug!("Skipping unsupported element <{name}>");
                return Ok(None);
            }
        };

        let id = self
            .arena
            .alloc(shape.with_id(node.attribute("id").map(str::to_string)));
        let xf = self.parse_transform(node, element);
        xf.apply(&mut self.arena, id);

        log::trace!("Built <{element}> as {id:?} with {xf:?}");
        Ok(Some(id))
    }

    fn parse_ellipse(&mut self, node: &Node) -> Result<Shape> {
        let cx = self.parse_int_attr(node, "cx", "ellipse")?;
        let cy = self.parse_int_attr(node, "cy", "ellipse")?;
        let rx = self.parse_int_attr(node, "rx", "ellipse")?;
        let ry = self.parse_int_attr(node, "ry", "ellipse")?;
        let fill = self.parse_color_attr(node, "fill", "ellipse")?;
        Ok(Shape::ellipse(
            fill,
            Point::from((cx, cy)),
            Point::from((rx, ry)),
        ))
    }

    fn parse_circle(&mut self, node: &Node) -> Result<Shape> {
        let cx = self.parse_int_attr(node, "cx", "circle")?;
        let cy = self.parse_int_attr(node, "cy", "circle")?;
        let r = self.parse_int_attr(node, "r", "circle")?;
        let fill = self.parse_color_attr(node, "fill", "circle")?;
        Ok(Shape::circle(fill, Point::from((cx, cy)), r as f64))
    }

    fn parse_rect(&mut self, node: &Node) -> Result<Shape> {
        let x = self.parse_int_attr(node, "x", "rect")?;
        let y = self.parse_int_attr(node, "y", "rect")?;
        let width = self.parse_int_attr(node, "width", "rect")?;
        let height = self.parse_int_attr(node, "height", "rect")?;
        let fill = self.parse_color_attr(node, "fill", "rect")?;
        Ok(Shape::rect(fill, Point::from((x, y)), width, height))
    }

    fn parse_line(&mut self, node: &Node) -> Result<Shape> {
        let x1 = self.parse_int_attr(node, "x1", "line")?;
        let y1 = self.parse_int_attr(node, "y1", "line")?;
        let x2 = self.parse_int_attr(node, "x2", "line")?;
        let y2 = self.parse_int_attr(node, "y2", "line")?;
        let stroke = self.parse_color_attr(node, "stroke", "line")?;
        Ok(Shape::line(
            stroke,
            Point::from((x1, y1)),
            Point::from((x2, y2)),
        ))
    }

    fn parse_polyline(&mut self, node: &Node) -> Result<Shape> {
        let points = self.parse_points_attr(node, "polyline")?;
        let stroke = self.parse_color_attr(node, "fill", "polyline")?;
        Ok(Shape::polyline(stroke, points))
    }

    fn parse_polygon(&mut self, node: &Node) -> Result<Shape> {
        let points = self.parse_points_attr(node, "polygon")?;
        let fill = self.parse_color_attr(node, "fill", "polygon")?;
        Ok(Shape::polygon(fill, points))
    }

    // Children are built (and transformed) on their own first; the group's
    // transform is applied afterwards by the caller, on top of theirs.
    fn parse_group(&mut self, node: &Node) -> Result<Shape> {
        let children = self.parse_children(node)?;
        Ok(Shape::group(children))
    }

    /// Resolve `transform` and `transform_origin`. Malformed values degrade
    /// to identity (and the document origin) with a warning.
    fn parse_transform(&self, node: &Node, element: &'static str) -> ElementTransform {
        let transform = node
            .attribute("transform")
            .map(|s| {
                Transform::parse(s).unwrap_or_else(|e| {
                    log::warn!("Ignoring transform on <{element}>: {e}");
                    Transform::Identity
                })
            })
            .unwrap_or_default();

        let origin = node
            .attribute("transform_origin")
            .map(|s| {
                syntax::parse_origin(s).unwrap_or_else(|e| {
                    log::warn!("Ignoring transform_origin on <{element}>: {e}");
                    Point::ORIGIN
                })
            })
            .unwrap_or(Point::ORIGIN);

        ElementTransform::new(transform, origin)
    }

    // Helper methods
    fn required_attr<'a>(
        &self,
        node: &Node<'a, '_>,
        attr: &'static str,
        element: &'static str,
    ) -> Result<&'a str> {
        node.attribute(attr)
            .ok_or(SvgError::MissingAttribute { element, attr })
    }

    fn parse_int_attr(&self, node: &Node, attr: &'static str, element: &'static str) -> Result<i64> {
        let value = self.required_attr(node, attr, element)?;
        value
            .trim()
            .parse()
            .map_err(|_| SvgError::InvalidAttribute {
                element,
                attr,
                value: value.to_string(),
            })
    }

    fn parse_dimension(&self, node: &Node, attr: &'static str) -> Result<u32> {
        let value = self.required_attr(node, attr, "svg")?;
        value
            .trim()
            .parse()
            .map_err(|_| SvgError::InvalidAttribute {
                element: "svg",
                attr,
                value: value.to_string(),
            })
    }

    fn parse_color_attr(
        &self,
        node: &Node,
        attr: &'static str,
        element: &'static str,
    ) -> Result<Color> {
        let token = self.required_attr(node, attr, element)?;
        Color::resolve(token).ok_or_else(|| SvgError::UnresolvedColor {
            element,
            attr,
            token: token.to_string(),
        })
    }

    fn parse_points_attr(&self, node: &Node, element: &'static str) -> Result<Vec<Point>> {
        let value = self.required_attr(node, "points", element)?;
        syntax::parse_points(value).map_err(|e| match e {
            syntax::SyntaxError::Point(pair) => SvgError::InvalidPoint { element, pair },
            other => SvgError::InvalidStructure(other.to_string()),
        })
    }
}

/// Parsed document (before handing the arena to the caller)
#[derive(Debug)]
pub struct ParsedDocument {
    pub width: u32,
    pub height: u32,
    pub roots: Vec<ShapeId>,
}
