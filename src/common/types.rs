//! Common types used throughout dubins_routing

use nalgebra::Vector2;

/// Oriented endpoint of a route: position plus heading.
///
/// Headings are given in degrees at the API boundary (matching the port
/// orientation convention of the layout tools this crate targets) and
/// converted to radians internally via [`Configuration::to_pose`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    pub x: f64,
    pub y: f64,
    pub heading_degrees: f64,
}

impl Configuration {
    pub fn new(x: f64, y: f64, heading_degrees: f64) -> Self {
        Self { x, y, heading_degrees }
    }

    /// Heading converted to radians.
    pub fn heading_radians(&self) -> f64 {
        self.heading_degrees.to_radians()
    }

    /// Convert to an internal pose with the heading in radians.
    pub fn to_pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.heading_radians())
    }

    /// True if all three components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.heading_degrees.is_finite()
    }
}

/// 2D pose (position + orientation), orientation in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn distance(&self, other: &Pose2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Normalize yaw to [-pi, pi]
    pub fn normalize_yaw(&mut self) {
        while self.yaw > std::f64::consts::PI {
            self.yaw -= 2.0 * std::f64::consts::PI;
        }
        while self.yaw < -std::f64::consts::PI {
            self.yaw += 2.0 * std::f64::consts::PI;
        }
    }
}
