//! Whole-number 3D vector
//!
//! Every position and displacement the collision engine sees is an `IVec3`.
//! `x` runs right, `y` runs down the screen (top-down depth) and `z` is
//! elevation.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

/// Integer vector with x, y, z components
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
    pub const X: Self = Self { x: 1, y: 0, z: 0 };
    pub const Y: Self = Self { x: 0, y: 1, z: 0 };
    pub const Z: Self = Self { x: 0, y: 0, z: 1 };

    /// Create a new IVec3
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Vector with only an x component
    #[inline]
    pub const fn along_x(x: i32) -> Self {
        Self::new(x, 0, 0)
    }

    /// Vector with only a y component
    #[inline]
    pub const fn along_y(y: i32) -> Self {
        Self::new(0, y, 0)
    }

    /// Vector with only a z component
    #[inline]
    pub const fn along_z(z: i32) -> Self {
        Self::new(0, 0, z)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Component-wise sign (-1, 0 or 1)
    #[inline]
    pub fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum(), self.z.signum())
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component-wise minimum
    #[inline]
    pub fn min_components(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max_components(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Unit vector along the component with the largest magnitude
    ///
    /// Ties prefer x, then y, then z. The zero vector maps to zero.
    pub fn dominant_axis(self) -> Self {
        let a = self.abs();
        if a.x == 0 && a.y == 0 && a.z == 0 {
            Self::ZERO
        } else if a.x >= a.y && a.x >= a.z {
            Self::along_x(self.x.signum())
        } else if a.y >= a.z {
            Self::along_y(self.y.signum())
        } else {
            Self::along_z(self.z.signum())
        }
    }

    /// The (x, y) pair, i.e. the coordinates seen by the top-down plane
    #[inline]
    pub fn xy(self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// The (x, z) pair, i.e. the coordinates seen by the front plane
    #[inline]
    pub fn xz(self) -> (i32, i32) {
        (self.x, self.z)
    }

    /// The (z, y) pair, i.e. the coordinates seen by the side plane
    #[inline]
    pub fn zy(self) -> (i32, i32) {
        (self.z, self.y)
    }
}

// Operator overloads

impl std::ops::Add for IVec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for IVec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for IVec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for IVec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<i32> for IVec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: i32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Neg for IVec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
