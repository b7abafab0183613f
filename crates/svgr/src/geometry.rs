use serde::Serialize;
use std::ops::{Add, Mul, Sub};

/// Location in the raster's coordinate space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Move by `dir`.
    pub fn translate(self, dir: Point) -> Point {
        self + dir
    }

    /// Rotate about `origin` by `degrees`.
    ///
    /// Uses the standard rotation matrix on raster coordinates, so with y
    /// pointing down a positive angle turns clockwise on screen, the same way
    /// SVG's `rotate()` does: `(10, 0)` rotated by 90 about the origin lands on
    /// `(0, 10)`.
    pub fn rotate(self, origin: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rel = self - origin;
        Point {
            x: rel.x * cos - rel.y * sin,
            y: rel.x * sin + rel.y * cos,
        } + origin
    }

    /// Scale the distance to `origin` by `factor`. Negative factors mirror.
    pub fn scale(self, origin: Point, factor: f64) -> Point {
        origin + (self - origin) * factor
    }

    /// Round to the nearest pixel.
    pub fn to_pixel(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn approx_eq(self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x as f64, y as f64)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}
