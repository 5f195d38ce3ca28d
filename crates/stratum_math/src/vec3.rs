//! Fractional 3D vector used for velocities

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::IVec3;

/// 3D Vector with x, y, z components
///
/// Velocities and sub-pixel remainders live here; the collision engine only
/// ever sees the whole-number part produced by [`Vec3::split_whole`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new Vec3
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length (magnitude)
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize to unit length
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Split into a floored whole part and the remaining fraction
    ///
    /// The fraction of each component is in `[0, 1)`, so
    /// `whole + fraction == self` for all finite inputs.
    pub fn split_whole(self) -> (IVec3, Self) {
        let fx = self.x.floor();
        let fy = self.y.floor();
        let fz = self.z.floor();
        (
            IVec3::new(fx as i32, fy as i32, fz as i32),
            Self::new(self.x - fx, self.y - fy, self.z - fz),
        )
    }
}

impl From<IVec3> for Vec3 {
    fn from(v: IVec3) -> Self {
        Self::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
