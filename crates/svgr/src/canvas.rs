//! Draw targets for shapes.
//!
//! [`RasterCanvas`] paints into an RGB pixel buffer using `imageproc`. Geometry
//! arrives in floating point and is rounded to pixels here, and nowhere
//! earlier. [`Recorder`] keeps the exact calls instead, which is what the
//! inspection tooling and the tests look at.

use crate::color::Color;
use crate::geometry::Point;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_ellipse_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point as PixelPoint;
use serde::Serialize;

/// Sink for primitive draw calls. Coordinates outside the target are the
/// sink's problem; callers never validate them.
pub trait Canvas {
    fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color);
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
    fn draw_polygon(&mut self, points: &[Point], color: Color);
}

/// Fixed-size RGB raster with a white background
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbImage,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background.into()),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn put_pixel(&mut self, (x, y): (i32, i32), color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Corners of the region geometry is clipped to before rasterizing.
    ///
    /// Anything inside is drawn exactly as given. The margin keeps clipped
    /// edges well away from the visible pixels while bounding the work the
    /// pixel loops in imageproc can be asked to do.
    fn clip_bounds(&self) -> (Point, Point) {
        let (w, h) = (self.image.width() as f64, self.image.height() as f64);
        let margin = (w.max(h) + 1.0) * 4.0;
        (Point::new(-margin, -margin), Point::new(w + margin, h + margin))
    }

    fn in_bounds(&self, p: Point) -> bool {
        let (lo, hi) = self.clip_bounds();
        (lo.x..=hi.x).contains(&p.x) && (lo.y..=hi.y).contains(&p.y)
    }

    fn fill_span(&mut self, y: u32, x0: f64, x1: f64, color: Rgb<u8>) {
        let last = self.image.width() as f64 - 1.0;
        let (x0, x1) = (x0.ceil().max(0.0), x1.floor().min(last));
        if x0 > x1 {
            return;
        }
        for x in x0 as u32..=x1 as u32 {
            self.image.put_pixel(x, y, color);
        }
    }

    // Ellipses reaching past the clip bounds are filled row by row over the
    // visible image only.
    fn fill_large_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Rgb<u8>) {
        for y in 0..self.image.height() {
            let dy = y as f64 - center.y;
            let half = if ry == 0.0 {
                if dy.abs() > 0.5 {
                    continue;
                }
                rx
            } else {
                let t = dy / ry;
                if t.abs() > 1.0 {
                    continue;
                }
                rx * (1.0 - t * t).sqrt()
            };
            self.fill_span(y, center.x - half, center.x + half, color);
        }
    }
}

impl Canvas for RasterCanvas {
    fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color) {
        if !(center.is_finite() && radii.is_finite()) {
            log::debug!("Skipping ellipse with non-finite geometry at {center:?}");
            return;
        }
        // Mirrored scales can leave negative radii behind.
        let (rx, ry) = (radii.x.abs(), radii.y.abs());
        let (lo, hi) = self.clip_bounds();
        if !self.in_bounds(center) || rx > hi.x - lo.x || ry > hi.y - lo.y {
            self.fill_large_ellipse(center, rx, ry, color.into());
            return;
        }
        draw_filled_ellipse_mut(
            &mut self.image,
            center.to_pixel(),
            rx.round() as i32,
            ry.round() as i32,
            color.into(),
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (lo, hi) = self.clip_bounds();
        let Some((from, to)) = clip_segment(from, to, lo, hi) else {
            return;
        };
        let (x0, y0) = from.to_pixel();
        let (x1, y1) = to.to_pixel();
        draw_line_segment_mut(
            &mut self.image,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            color.into(),
        );
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        if !points.iter().all(|p| p.is_finite()) {
            log::debug!("Skipping polygon with non-finite vertices");
            return;
        }
        let (lo, hi) = self.clip_bounds();
        let clipped = if points.iter().all(|&p| self.in_bounds(p)) {
            points.to_vec()
        } else {
            clip_polygon(points, lo, hi)
        };

        let mut pixels: Vec<PixelPoint<i32>> = clipped
            .iter()
            .map(|p| {
                let (x, y) = p.to_pixel();
                PixelPoint::new(x, y)
            })
            .collect();

        // imageproc rejects polygons whose first and last vertex coincide.
        pixels.dedup();
        while pixels.len() > 1 && pixels.first() == pixels.last() {
            pixels.pop();
        }

        match pixels.as_slice() {
            [] => {}
            [p] => self.put_pixel((p.x, p.y), color.into()),
            [a, b] => draw_line_segment_mut(
                &mut self.image,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                color.into(),
            ),
            _ => draw_polygon_mut(&mut self.image, &pixels, color.into()),
        }
    }
}

/// Liang-Barsky: the part of `a -> b` inside the box `lo..=hi`, if any.
fn clip_segment(a: Point, b: Point, lo: Point, hi: Point) -> Option<(Point, Point)> {
    if !(a.is_finite() && b.is_finite()) {
        return None;
    }
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, a.x - lo.x),
        (d.x, hi.x - a.x),
        (-d.y, a.y - lo.y),
        (d.y, hi.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    let start = if t0 > 0.0 { a + d * t0 } else { a };
    let end = if t1 < 1.0 { a + d * t1 } else { b };
    Some((start, end))
}

/// Sutherland-Hodgman against the box `lo..=hi`.
fn clip_polygon(points: &[Point], lo: Point, hi: Point) -> Vec<Point> {
    let out = clip_edge(points.to_vec(), |p| p.x >= lo.x, |a, b| at_x(a, b, lo.x));
    let out = clip_edge(out, |p| p.x <= hi.x, |a, b| at_x(a, b, hi.x));
    let out = clip_edge(out, |p| p.y >= lo.y, |a, b| at_y(a, b, lo.y));
    clip_edge(out, |p| p.y <= hi.y, |a, b| at_y(a, b, hi.y))
}

fn clip_edge(
    input: Vec<Point>,
    inside: impl Fn(Point) -> bool,
    cross: impl Fn(Point, Point) -> Point,
) -> Vec<Point> {
    let Some(&last) = input.last() else {
        return input;
    };
    let mut out = Vec::with_capacity(input.len() + 2);
    let mut prev = last;
    for &cur in &input {
        match (inside(prev), inside(cur)) {
            (true, true) => out.push(cur),
            (true, false) => out.push(cross(prev, cur)),
            (false, true) => {
                out.push(cross(prev, cur));
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

fn at_x(a: Point, b: Point, x: f64) -> Point {
    let t = (x - a.x) / (b.x - a.x);
    Point::new(x, a.y + (b.y - a.y) * t)
}

fn at_y(a: Point, b: Point, y: f64) -> Point {
    let t = (y - a.y) / (b.y - a.y);
    Point::new(a.x + (b.x - a.x) * t, y)
}

/// One call received by a [`Recorder`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCall {
    Ellipse {
        center: Point,
        radii: Point,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
    },
}

/// Canvas that remembers every call in order
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }
}

impl Canvas for Recorder {
    fn draw_ellipse(&mut self, center: Point, radii: Point, color: Color) {
        self.calls.push(DrawCall::Ellipse {
            center,
            radii,
            color,
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }
}
