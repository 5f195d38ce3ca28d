//! Math and 2D collision primitives for the Stratum engine
//!
//! ## Core Types
//!
//! - [`IVec3`] - Whole-number 3D position / displacement
//! - [`Vec3`] - Fractional 3D velocity, floored into [`IVec3`] before collision
//!
//! ## 2D Primitives
//!
//! - [`Rect`] / [`Triangle2`] / [`Shape2D`] - Integer plane shapes with strict overlap tests
//! - [`resolve`] - Walks a requested displacement back until two shapes separate

mod ivec3;
mod vec3;
pub mod shape2d;
pub mod resolve;

pub use ivec3::IVec3;
pub use vec3::Vec3;
pub use shape2d::{Point2, Rect, Shape2D, Triangle2};
pub use resolve::{resolve, Resolution};
