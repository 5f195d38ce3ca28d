//! Serializable shape templates
//!
//! Rooms are authored in tile units. A template becomes a concrete
//! [`ColliderShape`] once it is scaled by the tile size.

use serde::{Deserialize, Serialize};
use stratum_math::Point2;
use stratum_physics::{Axis, ColliderShape, TrianglePrism};

/// Scale a tile-unit length to whole pixels, rounding down
pub fn to_pixels(value: f32, tile_size: i32) -> i32 {
    (value * tile_size as f32).floor() as i32
}

/// Shape of a collider in a room file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeTemplate {
    /// Box spanning `w` on x, `h` on y and `d` on z
    Block { w: f32, h: f32, d: f32 },
    /// Right-triangular prism; the second and third cross-section points are
    /// relative to the collider root
    Triangle {
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
        d: f32,
        axis: Axis,
    },
}

impl ShapeTemplate {
    /// Create a block template
    pub fn block(w: f32, h: f32, d: f32) -> Self {
        ShapeTemplate::Block { w, h, d }
    }

    /// Create a triangular prism template
    pub fn triangle(p2: (f32, f32), p3: (f32, f32), d: f32, axis: Axis) -> Self {
        ShapeTemplate::Triangle {
            x2: p2.0,
            y2: p2.1,
            x3: p3.0,
            y3: p3.1,
            d,
            axis,
        }
    }

    /// Create the concrete shape at `tile_size` pixels per tile unit
    pub fn to_shape(&self, tile_size: i32) -> ColliderShape {
        let px = |v: f32| to_pixels(v, tile_size);
        match *self {
            ShapeTemplate::Block { w, h, d } => ColliderShape::Block {
                w: px(w),
                h: px(h),
                d: px(d),
            },
            ShapeTemplate::Triangle { x2, y2, x3, y3, d, axis } => ColliderShape::Triangle(TrianglePrism::new(
                Point2::new(px(x2), px(y2)),
                Point2::new(px(x3), px(y3)),
                px(d),
                axis,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_scales_by_tile_size() {
        let shape = ShapeTemplate::block(1.0, 2.0, 0.5).to_shape(16);
        assert_eq!(shape, ColliderShape::Block { w: 16, h: 32, d: 8 });
    }

    #[test]
    fn test_fractional_tiles_round_down() {
        assert_eq!(to_pixels(0.3, 16), 4);
        assert_eq!(to_pixels(-0.3, 16), -5);
        assert_eq!(to_pixels(1.99, 1), 1);
    }

    #[test]
    fn test_triangle_template() {
        let shape = ShapeTemplate::triangle((1.0, 0.0), (0.0, 1.0), 2.0, Axis::X).to_shape(8);
        match shape {
            ColliderShape::Triangle(prism) => {
                assert_eq!(prism.p2, Point2::new(8, 0));
                assert_eq!(prism.p3, Point2::new(0, 8));
                assert_eq!(prism.depth, 16);
                assert_eq!(prism.axis, Axis::X);
            }
            other => panic!("expected a triangle, got {:?}", other),
        }
    }
}
