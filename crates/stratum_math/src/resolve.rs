//! Backing a displacement out of an overlap
//!
//! [`resolve`] is the only collision primitive the engine has. It answers a
//! purely 2D question: if `a` wants to move by (dx, dy), how far can it go
//! before it would overlap `b`? Everything 3D is built from three of these.

use crate::Shape2D;

/// Result of a 2D resolve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Safe displacement on the first plane axis
    pub dx: i32,
    /// Safe displacement on the second plane axis
    pub dy: i32,
    /// The requested displacement would have overlapped
    pub colliding: bool,
    /// The walk went well past zero to find a free spot
    pub teleporting: bool,
}

impl Resolution {
    fn unobstructed(dx: i32, dy: i32) -> Self {
        Self { dx, dy, colliding: false, teleporting: false }
    }
}

/// Walk the displacement back one unit at a time until `a` no longer overlaps `b`
///
/// The dominant axis of the displacement is stepped towards (and, if the
/// shapes already overlap, past) zero; the other axis follows in proportion.
/// A zero displacement never collides.
pub fn resolve(a: &Shape2D, b: &Shape2D, dx: i32, dy: i32) -> Resolution {
    if dx == 0 && dy == 0 {
        return Resolution::unobstructed(0, 0);
    }

    let x_major = dx.abs() >= dy.abs();
    let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };
    let major_len = major.abs() as i64;
    let step = major.signum();

    let ab = a.bounds();
    let bb = b.bounds();
    let extents = if x_major { ab.w + bb.w } else { ab.h + bb.h };
    let max_steps = major.abs() as i64 + extents.max(0) as i64 + 2;

    let mut rx = dx;
    let mut ry = dy;
    let mut colliding = false;
    let mut k: i64 = 0;

    while a.would_be_colliding(b, rx, ry) {
        if k >= max_steps {
            break;
        }
        colliding = true;
        k += 1;
        let m = major as i64 - step as i64 * k;
        // minor shrinks in proportion to how far the major axis has walked
        let n = minor as i64 * (major_len - k) / major_len;
        let (nx, ny) = if x_major { (m, n) } else { (n, m) };
        rx = nx as i32;
        ry = ny as i32;
    }

    if !colliding {
        return Resolution::unobstructed(dx, dy);
    }

    let teleporting = 2 * (dx as i64 - rx as i64).abs() > 3 * (dx as i64).abs()
        || 2 * (dy as i64 - ry as i64).abs() > 3 * (dy as i64).abs();

    log::trace!("resolve ({}, {}) -> ({}, {}) teleporting={}", dx, dy, rx, ry, teleporting);

    Resolution { dx: rx, dy: ry, colliding, teleporting }
}
