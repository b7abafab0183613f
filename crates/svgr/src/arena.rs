// Owned shape storage addressed by small copyable handles.
// Groups refer to their children by handle, so transforms can fan out through
// nested groups without shared references.

use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::shape::{Geometry, Primitive, Shape};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub struct ShapeArena {
    shapes: Vec<Shape>,
}

impl ShapeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(u32::try_from(self.shapes.len()).expect("too many shapes"));
        self.shapes.push(shape);
        id
    }

    pub fn get(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }

    pub fn get_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.shapes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Draw `id`, recursing into groups in child order.
    pub fn draw(&self, id: ShapeId, canvas: &mut dyn Canvas) {
        match self.get(id).geometry() {
            Geometry::Group(group) => {
                for &child in &group.children {
                    self.draw(child, canvas);
                }
            }
            geometry => {
                if let Some(prim) = geometry.primitive() {
                    prim.draw(canvas);
                }
            }
        }
    }

    pub fn translate(&mut self, id: ShapeId, dir: Point) {
        self.for_each_primitive(id, &mut |p| p.translate(dir));
    }

    pub fn rotate(&mut self, id: ShapeId, origin: Point, degrees: f64) {
        self.for_each_primitive(id, &mut |p| p.rotate(origin, degrees));
    }

    pub fn scale(&mut self, id: ShapeId, origin: Point, factor: f64) {
        self.for_each_primitive(id, &mut |p| p.scale(origin, factor));
    }

    /// Coordinates of every leaf under `id`, in paint order
    pub fn coords(&self, id: ShapeId) -> Vec<Point> {
        let mut out = Vec::new();
        self.collect_coords(id, &mut out);
        out
    }

    fn collect_coords(&self, id: ShapeId, out: &mut Vec<Point>) {
        let geometry = self.get(id).geometry();
        if let Some(prim) = geometry.primitive() {
            out.extend(prim.coords());
        }
        for &child in self.get(id).children() {
            self.collect_coords(child, out);
        }
    }

    // Groups hold no geometry of their own: a transform on a group is the same
    // transform applied to each child, depth first, in child order.
    fn for_each_primitive(&mut self, id: ShapeId, f: &mut dyn FnMut(&mut dyn Primitive)) {
        let children = match self.get_mut(id).geometry_mut() {
            Geometry::Group(group) => group.children.clone(),
            geometry => {
                if let Some(prim) = geometry.primitive_mut() {
                    f(prim);
                }
                return;
            }
        };
        for child in children {
            self.for_each_primitive(child, f);
        }
    }
}
