use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use super::almost_equals;
use super::vec::Vector;

/// 2D position.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn distance_to(&self, rhs: Point) -> f64 {
        (rhs - *self).norm()
    }

    /// Rotates this point around `center` by `angle` radians.
    pub fn rotate_around(&self, angle: f64, center: Point) -> Point {
        center + (*self - center).rotate(angle)
    }
}

/// Equality is tolerance based, matching [`Vector`].
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        almost_equals(self.x, other.x) && almost_equals(self.y, other.y)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Self::Output {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
