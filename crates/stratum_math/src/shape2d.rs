//! Integer 2D shapes
//!
//! Every solid in the engine is seen through three of these, one per plane.
//! Overlap is strict: shapes that only share an edge or a corner do not
//! collide, which is what lets a mover stand flush against a wall.

use serde::{Serialize, Deserialize};

/// A point on one of the projection planes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle, `x..x+w` by `y..y+h`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle containing all the given points
    pub fn enclosing(points: &[Point2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    fn corners(&self) -> [Point2; 4] {
        [
            Point2::new(self.x, self.y),
            Point2::new(self.right(), self.y),
            Point2::new(self.right(), self.bottom()),
            Point2::new(self.x, self.bottom()),
        ]
    }
}

/// Triangle given by three absolute points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle2 {
    pub points: [Point2; 3],
}

impl Triangle2 {
    #[inline]
    pub const fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { points: [a, b, c] }
    }

    /// Twice the signed area; zero for degenerate triangles
    pub fn doubled_area(&self) -> i64 {
        let [a, b, c] = self.points;
        let abx = (b.x - a.x) as i64;
        let aby = (b.y - a.y) as i64;
        let acx = (c.x - a.x) as i64;
        let acy = (c.y - a.y) as i64;
        abx * acy - aby * acx
    }
}

/// A shape on one projection plane
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape2D {
    Rect(Rect),
    Triangle(Triangle2),
}

impl Shape2D {
    /// Move the shape in place
    pub fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Shape2D::Rect(r) => {
                r.x += dx;
                r.y += dy;
            }
            Shape2D::Triangle(t) => {
                for p in t.points.iter_mut() {
                    *p = p.offset(dx, dy);
                }
            }
        }
    }

    /// A moved copy of the shape
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut out = *self;
        out.translate(dx, dy);
        out
    }

    /// Bounding rectangle
    pub fn bounds(&self) -> Rect {
        match self {
            Shape2D::Rect(r) => *r,
            Shape2D::Triangle(t) => Rect::enclosing(&t.points),
        }
    }

    /// Whether the two shapes overlap with positive area
    pub fn is_colliding(&self, other: &Shape2D) -> bool {
        if !self.bounds().overlaps(&other.bounds()) {
            return false;
        }
        match (self, other) {
            (Shape2D::Rect(_), Shape2D::Rect(_)) => true,
            _ => polygons_overlap(&self.vertices(), &other.vertices()),
        }
    }

    /// Whether the shapes would overlap if `self` were moved by (dx, dy)
    pub fn would_be_colliding(&self, other: &Shape2D, dx: i32, dy: i32) -> bool {
        self.translated(dx, dy).is_colliding(other)
    }

    fn vertices(&self) -> Vec<Point2> {
        match self {
            Shape2D::Rect(r) => r.corners().to_vec(),
            Shape2D::Triangle(t) => t.points.to_vec(),
        }
    }
}

impl From<Rect> for Shape2D {
    fn from(r: Rect) -> Self {
        Shape2D::Rect(r)
    }
}

impl From<Triangle2> for Shape2D {
    fn from(t: Triangle2) -> Self {
        Shape2D::Triangle(t)
    }
}

/// Separating axis test between two convex polygons
///
/// Touching projections count as separated.
fn polygons_overlap(a: &[Point2], b: &[Point2]) -> bool {
    for poly in [a, b] {
        for i in 0..poly.len() {
            let p = poly[i];
            let q = poly[(i + 1) % poly.len()];
            let nx = -((q.y - p.y) as i64);
            let ny = (q.x - p.x) as i64;
            if nx == 0 && ny == 0 {
                continue;
            }
            let (a_min, a_max) = project(a, nx, ny);
            let (b_min, b_max) = project(b, nx, ny);
            if a_max <= b_min || b_max <= a_min {
                return false;
            }
        }
    }
    true
}

fn project(poly: &[Point2], nx: i64, ny: i64) -> (i64, i64) {
    poly.iter()
        .map(|p| p.x as i64 * nx + p.y as i64 * ny)
        .fold((i64::MAX, i64::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)))
}
