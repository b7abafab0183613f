use crate::ShapeId;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::geometry::Point;
use serde::Serialize;

/// Drawing and transform capability shared by every leaf geometry.
///
/// Transforms mutate in place. Groups are not primitives: they own no
/// geometry and fan out through [`crate::ShapeArena`] instead.
pub trait Primitive {
    fn draw(&self, canvas: &mut dyn Canvas);
    fn translate(&mut self, dir: Point);
    fn rotate(&mut self, origin: Point, degrees: f64);
    fn scale(&mut self, origin: Point, factor: f64);

    /// Every coordinate this primitive owns, in a stable order.
    fn coords(&self) -> Vec<Point>;
}

/// Shape type tag, named after the element that produces it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Ellipse,
    Circle,
    Polyline,
    Line,
    Polygon,
    Rect,
    #[serde(rename = "g")]
    Group,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ellipse => "ellipse",
            Self::Circle => "circle",
            Self::Polyline => "polyline",
            Self::Line => "line",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Group => "g",
        }
    }
}

/// Axis-aligned ellipse. Rotation moves the center only; the axes never tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub fill: Color,
    pub center: Point,
    /// `x` is the horizontal radius, `y` the vertical one
    pub radius: Point,
}

impl Ellipse {
    pub fn new(fill: Color, center: Point, radius: Point) -> Self {
        Self {
            fill,
            center,
            radius,
        }
    }

    pub fn circle(fill: Color, center: Point, radius: f64) -> Self {
        Self::new(fill, center, Point::new(radius, radius))
    }
}

impl Primitive for Ellipse {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_ellipse(self.center, self.radius, self.fill);
    }

    fn translate(&mut self, dir: Point) {
        self.center = self.center.translate(dir);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.center = self.center.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: f64) {
        self.center = self.center.scale(origin, factor);
        self.radius = self.radius * factor;
    }

    fn coords(&self) -> Vec<Point> {
        vec![self.center, self.radius]
    }
}

/// Open path of straight segments between consecutive points
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub stroke: Color,
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(stroke: Color, points: Vec<Point>) -> Self {
        Self { stroke, points }
    }
}

impl Primitive for Polyline {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for pair in self.points.windows(2) {
            canvas.draw_line(pair[0], pair[1], self.stroke);
        }
    }

    fn translate(&mut self, dir: Point) {
        transform_all(&mut self.points, |p| p.translate(dir));
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        transform_all(&mut self.points, |p| p.rotate(origin, degrees));
    }

    fn scale(&mut self, origin: Point, factor: f64) {
        transform_all(&mut self.points, |p| p.scale(origin, factor));
    }

    fn coords(&self) -> Vec<Point> {
        self.points.clone()
    }
}

/// Single segment with named endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub stroke: Color,
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(stroke: Color, start: Point, end: Point) -> Self {
        Self { stroke, start, end }
    }
}

impl Primitive for Line {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_line(self.start, self.end, self.stroke);
    }

    fn translate(&mut self, dir: Point) {
        self.start = self.start.translate(dir);
        self.end = self.end.translate(dir);
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        self.start = self.start.rotate(origin, degrees);
        self.end = self.end.rotate(origin, degrees);
    }

    fn scale(&mut self, origin: Point, factor: f64) {
        self.start = self.start.scale(origin, factor);
        self.end = self.end.scale(origin, factor);
    }

    fn coords(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }
}

/// Closed filled region
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub fill: Color,
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(fill: Color, points: Vec<Point>) -> Self {
        Self { fill, points }
    }

    /// Four-vertex rectangle starting at `upper_left`, clockwise on screen.
    ///
    /// The far edges sit at `width - 1` and `height - 1` because the raster
    /// fills polygons inclusive of their boundary, so the result covers exactly
    /// `width` x `height` pixels. A rectangle with no area has no vertices.
    pub fn rect(fill: Color, upper_left: Point, width: i64, height: i64) -> Self {
        if width <= 0 || height <= 0 {
            return Self::new(fill, Vec::new());
        }
        let dx = (width - 1) as f64;
        let dy = (height - 1) as f64;
        Self::new(
            fill,
            vec![
                upper_left,
                upper_left + Point::new(dx, 0.0),
                upper_left + Point::new(dx, dy),
                upper_left + Point::new(0.0, dy),
            ],
        )
    }
}

impl Primitive for Polygon {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_polygon(&self.points, self.fill);
    }

    fn translate(&mut self, dir: Point) {
        transform_all(&mut self.points, |p| p.translate(dir));
    }

    fn rotate(&mut self, origin: Point, degrees: f64) {
        transform_all(&mut self.points, |p| p.rotate(origin, degrees));
    }

    fn scale(&mut self, origin: Point, factor: f64) {
        transform_all(&mut self.points, |p| p.scale(origin, factor));
    }

    fn coords(&self) -> Vec<Point> {
        self.points.clone()
    }
}

fn transform_all(points: &mut [Point], f: impl Fn(Point) -> Point) {
    for p in points {
        *p = f(*p);
    }
}

/// Ordered child handles. Later children paint over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub children: Vec<ShapeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Ellipse(Ellipse),
    Circle(Ellipse),
    Polyline(Polyline),
    Line(Line),
    Polygon(Polygon),
    Rect(Polygon),
    Group(Group),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Polyline(_) => ShapeKind::Polyline,
            Self::Line(_) => ShapeKind::Line,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Rect(_) => ShapeKind::Rect,
            Self::Group(_) => ShapeKind::Group,
        }
    }

    /// Leaf geometry, or `None` for a group
    pub fn primitive(&self) -> Option<&dyn Primitive> {
        match self {
            Self::Ellipse(e) | Self::Circle(e) => Some(e),
            Self::Polyline(p) => Some(p),
            Self::Line(l) => Some(l),
            Self::Polygon(p) | Self::Rect(p) => Some(p),
            Self::Group(_) => None,
        }
    }

    pub fn primitive_mut(&mut self) -> Option<&mut dyn Primitive> {
        match self {
            Self::Ellipse(e) | Self::Circle(e) => Some(e),
            Self::Polyline(p) => Some(p),
            Self::Line(l) => Some(l),
            Self::Polygon(p) | Self::Rect(p) => Some(p),
            Self::Group(_) => None,
        }
    }

    /// Paint color of a leaf
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Ellipse(e) | Self::Circle(e) => Some(e.fill),
            Self::Polyline(p) => Some(p.stroke),
            Self::Line(l) => Some(l.stroke),
            Self::Polygon(p) | Self::Rect(p) => Some(p.fill),
            Self::Group(_) => None,
        }
    }
}

/// A drawable entity: geometry plus an optional identifier.
///
/// The id only serves lookup; it never affects geometry and a group's id is
/// not passed on to its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: Option<String>,
    geometry: Geometry,
}

impl Shape {
    pub fn new(geometry: Geometry) -> Self {
        Self { id: None, geometry }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn ellipse(fill: Color, center: Point, radius: Point) -> Self {
        Self::new(Geometry::Ellipse(Ellipse::new(fill, center, radius)))
    }

    pub fn circle(fill: Color, center: Point, radius: f64) -> Self {
        Self::new(Geometry::Circle(Ellipse::circle(fill, center, radius)))
    }

    pub fn polyline(stroke: Color, points: Vec<Point>) -> Self {
        Self::new(Geometry::Polyline(Polyline::new(stroke, points)))
    }

    pub fn line(stroke: Color, start: Point, end: Point) -> Self {
        Self::new(Geometry::Line(Line::new(stroke, start, end)))
    }

    pub fn polygon(fill: Color, points: Vec<Point>) -> Self {
        Self::new(Geometry::Polygon(Polygon::new(fill, points)))
    }

    pub fn rect(fill: Color, upper_left: Point, width: i64, height: i64) -> Self {
        Self::new(Geometry::Rect(Polygon::rect(fill, upper_left, width, height)))
    }

    pub fn group(children: Vec<ShapeId>) -> Self {
        Self::new(Geometry::Group(Group { children }))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    pub fn children(&self) -> &[ShapeId] {
        match &self.geometry {
            Geometry::Group(g) => &g.children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCall, Recorder};

    const RED: Color = Color::rgb(255, 0, 0);

    fn pts(raw: &[(i64, i64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn rect_vertices_cover_declared_size() {
        let rect = Polygon::rect(RED, Point::ORIGIN, 10, 5);
        assert_eq!(rect.points, pts(&[(0, 0), (9, 0), (9, 4), (0, 4)]));

        let xs = rect.points.iter().map(|p| p.x);
        let ys = rect.points.iter().map(|p| p.y);
        let width = xs.clone().fold(f64::MIN, f64::max) - xs.fold(f64::MAX, f64::min) + 1.0;
        let height = ys.clone().fold(f64::MIN, f64::max) - ys.fold(f64::MAX, f64::min) + 1.0;
        assert_eq!((width, height), (10.0, 5.0));
    }

    #[test]
    fn rect_offset_from_upper_left() {
        let rect = Polygon::rect(RED, Point::new(3.0, 4.0), 2, 1);
        assert_eq!(rect.points, pts(&[(3, 4), (4, 4), (4, 4), (3, 4)]));
    }

    #[test]
    fn rect_without_area_has_no_vertices() {
        assert!(Polygon::rect(RED, Point::ORIGIN, 0, 3).points.is_empty());
        assert!(Polygon::rect(RED, Point::ORIGIN, 4, -2).points.is_empty());
    }

    #[test]
    fn ellipse_scale_multiplies_radius_about_own_center() {
        let mut e = Ellipse::new(RED, Point::new(10.0, 10.0), Point::new(4.0, 2.0));
        e.scale(Point::new(0.0, 10.0), 3.0);
        assert_eq!(e.center, Point::new(30.0, 10.0));
        assert_eq!(e.radius, Point::new(12.0, 6.0));
    }

    #[test]
    fn ellipse_rotation_keeps_axes() {
        let mut e = Ellipse::new(RED, Point::new(10.0, 0.0), Point::new(5.0, 1.0));
        e.rotate(Point::ORIGIN, 90.0);
        assert!(e.center.approx_eq(Point::new(0.0, 10.0), 1e-9));
        assert_eq!(e.radius, Point::new(5.0, 1.0));
    }

    #[test]
    fn polyline_draws_one_segment_per_pair() {
        let line = Polyline::new(RED, pts(&[(0, 0), (5, 0), (5, 5)]));
        let mut rec = Recorder::new();
        line.draw(&mut rec);
        assert_eq!(
            rec.calls(),
            &[
                DrawCall::Line {
                    from: Point::new(0.0, 0.0),
                    to: Point::new(5.0, 0.0),
                    color: RED
                },
                DrawCall::Line {
                    from: Point::new(5.0, 0.0),
                    to: Point::new(5.0, 5.0),
                    color: RED
                },
            ]
        );
    }

    #[test]
    fn short_polylines_draw_nothing() {
        for points in [vec![], pts(&[(7, 7)])] {
            let mut rec = Recorder::new();
            Polyline::new(RED, points).draw(&mut rec);
            assert!(rec.calls().is_empty());
        }
    }

    #[test]
    fn polygon_draws_single_closed_fill() {
        let poly = Polygon::new(RED, pts(&[(0, 0), (4, 0), (2, 3)]));
        let mut rec = Recorder::new();
        poly.draw(&mut rec);
        assert_eq!(
            rec.calls(),
            &[DrawCall::Polygon {
                points: pts(&[(0, 0), (4, 0), (2, 3)]),
                color: RED
            }]
        );
    }

    #[test]
    fn line_transforms_both_endpoints() {
        let mut line = Line::new(RED, Point::new(1.0, 1.0), Point::new(3.0, 1.0));
        line.translate(Point::new(1.0, 2.0));
        line.scale(Point::new(2.0, 3.0), 2.0);
        assert_eq!(line.coords(), pts(&[(2, 3), (6, 3)]));
    }

    #[test]
    fn circle_reports_its_own_kind() {
        let circle = Shape::circle(RED, Point::new(1.0, 2.0), 3.0);
        assert_eq!(circle.kind(), ShapeKind::Circle);
        assert_eq!(circle.kind().as_str(), "circle");
        assert_eq!(Shape::rect(RED, Point::ORIGIN, 1, 1).kind().as_str(), "rect");
        assert_eq!(Shape::group(vec![]).kind().as_str(), "g");
    }

    #[test]
    fn group_has_no_primitive() {
        let group = Shape::group(vec![]).with_id(Some("layer".into()));
        assert!(group.geometry().primitive().is_none());
        assert_eq!(group.id(), Some("layer"));
        assert_eq!(group.geometry().color(), None);
    }
}
