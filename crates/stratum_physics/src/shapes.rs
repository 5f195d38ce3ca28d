//! Solid shapes and their plane projections
//!
//! A solid is never tested in 3D directly. Instead each one carries three 2D
//! shapes: the top-down view (XY), the front view (XZ) and the side view (ZY).
//! Two solids overlap in 3D only when all three views overlap.

use serde::{Deserialize, Serialize};
use stratum_math::{IVec3, Point2, Rect, Shape2D, Triangle2};

/// Axis a triangular prism is extruded along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Cross-section lies in the (z, y) plane
    X,
    /// Cross-section lies in the (x, z) plane
    Y,
    /// Cross-section lies in the (x, y) plane
    Z,
}

/// The three plane views of one solid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeProjection {
    /// Top-down: (x, y)
    pub xy: Shape2D,
    /// Front: (x, z)
    pub xz: Shape2D,
    /// Side: (z, y)
    pub zy: Shape2D,
}

impl ShapeProjection {
    /// Move every view by the matching components of `delta`
    pub fn translate(&mut self, delta: IVec3) {
        self.xy.translate(delta.x, delta.y);
        self.xz.translate(delta.x, delta.z);
        self.zy.translate(delta.z, delta.y);
    }

    /// A copy moved by `delta`
    pub fn translated(&self, delta: IVec3) -> Self {
        let mut out = *self;
        out.translate(delta);
        out
    }

    /// Overlap on all three planes
    pub fn overlaps(&self, other: &ShapeProjection) -> bool {
        self.xy.is_colliding(&other.xy)
            && self.xz.is_colliding(&other.xz)
            && self.zy.is_colliding(&other.zy)
    }
}

/// Right-triangular prism
///
/// The anchor is the collider root. `p2` and `p3` are relative to it and are
/// expressed in the cross-section plane of `axis`, as (u, v):
///
/// | axis | u | v |
/// |------|---|---|
/// | X    | z | y |
/// | Y    | x | z |
/// | Z    | x | y |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrianglePrism {
    pub p2: Point2,
    pub p3: Point2,
    /// Extrusion length along `axis`
    pub depth: i32,
    pub axis: Axis,
}

impl TrianglePrism {
    pub fn new(p2: Point2, p3: Point2, depth: i32, axis: Axis) -> Self {
        Self { p2, p3, depth, axis }
    }

    /// Cross-section vertices relative to the root
    pub fn section(&self) -> [Point2; 3] {
        [Point2::new(0, 0), self.p2, self.p3]
    }

    /// Bounding rectangle of the cross-section, relative to the root
    pub fn section_bounds(&self) -> Rect {
        Rect::enclosing(&self.section())
    }

    /// Whether the vertices form a right angle at one of the corners
    pub fn is_right(&self) -> bool {
        let pts = self.section();
        (0..3).any(|i| {
            let a = pts[i];
            let b = pts[(i + 1) % 3];
            let c = pts[(i + 2) % 3];
            let dot = (b.x - a.x) as i64 * (c.x - a.x) as i64
                + (b.y - a.y) as i64 * (c.y - a.y) as i64;
            dot == 0
        })
    }

    fn section_at(&self, u: i32, v: i32) -> Triangle2 {
        let [a, b, c] = self.section();
        Triangle2::new(a.offset(u, v), b.offset(u, v), c.offset(u, v))
    }
}

/// Which coordinate of a cross-section point is being measured
#[derive(Clone, Copy)]
enum Measure {
    U,
    V,
}

/// Extent of a cross-section along one of its coordinates at a query
/// position on the other
///
/// Picks the vertex furthest along the measured coordinate and interpolates
/// along both edges leaving it. Queries outside the triangle yield 0.
fn section_extent(points: [Point2; 3], measure: Measure, query: i32) -> i32 {
    let split = |p: Point2| match measure {
        Measure::U => (p.x, p.y),
        Measure::V => (p.y, p.x),
    };

    let mut apex_idx = 0;
    for i in 1..3 {
        if split(points[i]).0 > split(points[apex_idx]).0 {
            apex_idx = i;
        }
    }
    let (apex_m, apex_q) = split(points[apex_idx]);
    if query == apex_q {
        return apex_m;
    }

    let mut extent = 0;
    for (i, p) in points.iter().enumerate() {
        if i == apex_idx {
            continue;
        }
        let (m, q) = split(*p);
        if query < q.min(apex_q) || query > q.max(apex_q) {
            continue;
        }
        let run = (q - apex_q) as i64;
        if run == 0 {
            return apex_m;
        }
        let value = apex_m as i64 + (m - apex_m) as i64 * (query - apex_q) as i64 / run;
        extent = extent.max(value as i32);
    }
    extent
}

/// Geometry of a solid, independent of where it is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box spanning `w` on x, `h` on y and `d` on z
    Block { w: i32, h: i32, d: i32 },
    Triangle(TrianglePrism),
}

impl ColliderShape {
    /// Build the three plane views with the root at `pos`
    pub fn project(&self, pos: IVec3) -> ShapeProjection {
        match *self {
            ColliderShape::Block { w, h, d } => ShapeProjection {
                xy: Rect::new(pos.x, pos.y, w, h).into(),
                xz: Rect::new(pos.x, pos.z, w, d).into(),
                zy: Rect::new(pos.z, pos.y, d, h).into(),
            },
            ColliderShape::Triangle(tri) => {
                let b = tri.section_bounds();
                match tri.axis {
                    Axis::X => ShapeProjection {
                        xy: Rect::new(pos.x, pos.y + b.y, tri.depth, b.h).into(),
                        xz: Rect::new(pos.x, pos.z + b.x, tri.depth, b.w).into(),
                        zy: tri.section_at(pos.z, pos.y).into(),
                    },
                    Axis::Y => ShapeProjection {
                        xy: Rect::new(pos.x + b.x, pos.y, b.w, tri.depth).into(),
                        xz: tri.section_at(pos.x, pos.z).into(),
                        zy: Rect::new(pos.z + b.y, pos.y, b.h, tri.depth).into(),
                    },
                    Axis::Z => ShapeProjection {
                        xy: tri.section_at(pos.x, pos.y).into(),
                        xz: Rect::new(pos.x + b.x, pos.z, b.w, tri.depth).into(),
                        zy: Rect::new(pos.z, pos.y + b.y, tri.depth, b.h).into(),
                    },
                }
            }
        }
    }

    /// Span on x at root-relative (y, z)
    pub fn x_depth(&self, ry: i32, rz: i32) -> i32 {
        match *self {
            ColliderShape::Block { w, .. } => w,
            ColliderShape::Triangle(tri) => match tri.axis {
                Axis::X => tri.depth,
                Axis::Y => section_extent(tri.section(), Measure::U, rz),
                Axis::Z => section_extent(tri.section(), Measure::U, ry),
            },
        }
    }

    /// Span on y at root-relative (x, z)
    pub fn y_depth(&self, rx: i32, rz: i32) -> i32 {
        match *self {
            ColliderShape::Block { h, .. } => h,
            ColliderShape::Triangle(tri) => match tri.axis {
                Axis::X => section_extent(tri.section(), Measure::V, rz),
                Axis::Y => tri.depth,
                Axis::Z => section_extent(tri.section(), Measure::V, rx),
            },
        }
    }

    /// Height above the root at root-relative (x, y)
    pub fn z_depth(&self, rx: i32, ry: i32) -> i32 {
        match *self {
            ColliderShape::Block { d, .. } => d,
            ColliderShape::Triangle(tri) => match tri.axis {
                Axis::X => section_extent(tri.section(), Measure::U, ry),
                Axis::Y => section_extent(tri.section(), Measure::V, rx),
                Axis::Z => tri.depth,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_x() -> ColliderShape {
        // rises 16 in z at y=0, down to 0 at y=16, 32 long on x
        ColliderShape::Triangle(TrianglePrism::new(
            Point2::new(16, 0),
            Point2::new(0, 16),
            32,
            Axis::X,
        ))
    }

    #[test]
    fn test_block_projection() {
        let shape = ColliderShape::Block { w: 4, h: 5, d: 6 };
        let proj = shape.project(IVec3::new(1, 2, 3));
        assert_eq!(proj.xy, Shape2D::Rect(Rect::new(1, 2, 4, 5)));
        assert_eq!(proj.xz, Shape2D::Rect(Rect::new(1, 3, 4, 6)));
        assert_eq!(proj.zy, Shape2D::Rect(Rect::new(3, 2, 6, 5)));
    }

    #[test]
    fn test_projection_translate_matches_reprojection() {
        let shape = ramp_x();
        let delta = IVec3::new(3, -7, 11);
        let moved = shape.project(IVec3::ZERO).translated(delta);
        assert_eq!(moved, shape.project(delta));
    }

    #[test]
    fn test_triangle_x_projection() {
        let proj = ramp_x().project(IVec3::new(10, 20, 30));
        assert_eq!(proj.xy.bounds(), Rect::new(10, 20, 32, 16));
        assert_eq!(proj.xz.bounds(), Rect::new(10, 30, 32, 16));
        assert!(matches!(proj.zy, Shape2D::Triangle(_)));
        assert_eq!(proj.zy.bounds(), Rect::new(30, 20, 16, 16));
    }

    #[test]
    fn test_triangle_z_depth_along_slope() {
        let shape = ramp_x();
        assert_eq!(shape.z_depth(0, 0), 16, "apex returns its exact depth");
        assert_eq!(shape.z_depth(0, 8), 8, "midpoint is the mean of the endpoints");
        assert_eq!(shape.z_depth(0, 16), 0);
        assert_eq!(shape.z_depth(0, 40), 0, "outside the section");
        assert_eq!(shape.x_depth(5, 5), 32, "extrusion axis is constant");
    }

    #[test]
    fn test_triangle_y_depth_on_x_prism() {
        // y extent at a given z: full 16 at z=0, none at z=16
        let shape = ramp_x();
        assert_eq!(shape.y_depth(0, 0), 16);
        assert_eq!(shape.y_depth(0, 4), 12);
        assert_eq!(shape.y_depth(0, 16), 0);
    }

    #[test]
    fn test_triangle_y_axis_depths() {
        // wedge in (x, z): rises from z=0 at x=0 to z=8 at x=16
        let shape = ColliderShape::Triangle(TrianglePrism::new(
            Point2::new(16, 0),
            Point2::new(16, 8),
            24,
            Axis::Y,
        ));
        assert_eq!(shape.z_depth(16, 0), 8);
        assert_eq!(shape.z_depth(8, 0), 4);
        assert_eq!(shape.z_depth(0, 0), 0);
        assert_eq!(shape.y_depth(3, 3), 24);
    }

    #[test]
    fn test_block_depths_are_constant() {
        let shape = ColliderShape::Block { w: 4, h: 5, d: 6 };
        assert_eq!(shape.x_depth(100, -3), 4);
        assert_eq!(shape.y_depth(-1, 7), 5);
        assert_eq!(shape.z_depth(0, 0), 6);
    }

    #[test]
    fn test_is_right() {
        let right = TrianglePrism::new(Point2::new(16, 0), Point2::new(0, 16), 8, Axis::Z);
        assert!(right.is_right());
        let skew = TrianglePrism::new(Point2::new(16, 0), Point2::new(5, 16), 8, Axis::Z);
        assert!(!skew.is_right());
    }
}
