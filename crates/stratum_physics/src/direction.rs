//! Eight-way facing on the ground plane
//!
//! `Up` is towards negative y (up the screen).

use serde::{Deserialize, Serialize};
use stratum_math::{IVec3, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    #[default]
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Facing implied by a velocity, or `None` when it has no ground-plane component
    pub fn from_velocity(velocity: Vec3) -> Option<Self> {
        let sx = sign(velocity.x);
        let sy = sign(velocity.y);
        Self::from_signs(sx, sy)
    }

    fn from_signs(sx: i32, sy: i32) -> Option<Self> {
        match (sx, sy) {
            (0, -1) => Some(Direction::Up),
            (1, -1) => Some(Direction::UpRight),
            (1, 0) => Some(Direction::Right),
            (1, 1) => Some(Direction::DownRight),
            (0, 1) => Some(Direction::Down),
            (-1, 1) => Some(Direction::DownLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, -1) => Some(Direction::UpLeft),
            _ => None,
        }
    }

    /// Unit step on the ground plane
    pub fn to_vec(self) -> IVec3 {
        let (x, y) = match self {
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, -1),
        };
        IVec3::new(x, y, 0)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Facing straight along x or y
    pub fn is_orthogonal(self) -> bool {
        self.is_vertical() || self.is_horizontal()
    }
}

fn sign(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_velocity() {
        assert_eq!(Direction::from_velocity(Vec3::new(-1.5, -0.2, 3.0)), Some(Direction::UpLeft));
        assert_eq!(Direction::from_velocity(Vec3::new(0.0, 2.0, 0.0)), Some(Direction::Down));
        assert_eq!(Direction::from_velocity(Vec3::new(0.0, 0.0, -4.0)), None);
    }

    #[test]
    fn test_to_vec_roundtrips() {
        for dir in [
            Direction::Up,
            Direction::UpRight,
            Direction::Right,
            Direction::DownRight,
            Direction::Down,
            Direction::DownLeft,
            Direction::Left,
            Direction::UpLeft,
        ] {
            let v = dir.to_vec();
            assert_eq!(Direction::from_signs(v.x, v.y), Some(dir));
        }
    }

    #[test]
    fn test_orthogonal() {
        assert!(Direction::Left.is_orthogonal());
        assert!(Direction::Up.is_orthogonal());
        assert!(!Direction::DownRight.is_orthogonal());
    }
}
