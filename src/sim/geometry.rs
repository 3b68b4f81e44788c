//! Axis-aligned geometry for the rectangular arena
//!
//! Everything here is pure: boxes, circles, overlap tests and reflection.
//! The arena uses y-up coordinates centered on the origin.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Build a box from its full width and height
    pub fn from_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Closest point on (or in) the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        let d = (p - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}

/// A circle (the ball's collision shape)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Clamped-point overlap test.
///
/// True iff the point of `aabb` closest to the circle center lies within
/// `radius` of that center. Touching counts.
#[inline]
pub fn intersects(circle: &Circle, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(circle.center);
    circle.center.distance_squared(closest) <= circle.radius * circle.radius
}

/// Standard elastic reflection: v' = v - 2(v·n)n
///
/// `normal` must be unit length. For axis normals this is an exact sign flip,
/// so speed is preserved bit-for-bit.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Which face(s) of a box a circle pressed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAxis {
    /// Left or right face
    X,
    /// Top or bottom face
    Y,
    /// Exactly on a corner diagonal: both faces at once
    Corner,
}

/// Outward contact normal between a circle and the box it touches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactNormal {
    pub axis: ContactAxis,
    /// Per-axis outward sign (-1 or +1). Only the components named by `axis`
    /// take part in the reflection.
    pub sign: Vec2,
}

impl ContactNormal {
    /// The normal as a vector (unit length for faces, diagonal for corners)
    pub fn as_vec2(&self) -> Vec2 {
        match self.axis {
            ContactAxis::X => Vec2::new(self.sign.x, 0.0),
            ContactAxis::Y => Vec2::new(0.0, self.sign.y),
            ContactAxis::Corner => self.sign.normalize(),
        }
    }

    /// True if `velocity` moves into the surface
    pub fn is_approached_by(&self, velocity: Vec2) -> bool {
        self.as_vec2().dot(velocity) < 0.0
    }

    /// Reflect `velocity` off this contact.
    ///
    /// Face contacts reflect the one component; corner contacts reflect each
    /// component that is moving into the box.
    pub fn reflect(&self, velocity: Vec2) -> Vec2 {
        match self.axis {
            ContactAxis::X | ContactAxis::Y => reflect(velocity, self.as_vec2()),
            ContactAxis::Corner => {
                let mut v = velocity;
                if v.x * self.sign.x < 0.0 {
                    v = reflect(v, Vec2::new(self.sign.x, 0.0));
                }
                if v.y * self.sign.y < 0.0 {
                    v = reflect(v, Vec2::new(0.0, self.sign.y));
                }
                v
            }
        }
    }
}

/// Determine the face a circle hit on a box.
///
/// The contact axis is the one along which the circle center sits furthest
/// outside the box relative to its half extent (the face of least overlap).
/// Equal distances mean a corner hit.
pub fn contact_normal(circle: &Circle, aabb: &Aabb) -> ContactNormal {
    let d = circle.center - aabb.center;
    let sign = Vec2::new(sign_or_positive(d.x), sign_or_positive(d.y));
    let outside = d.abs() - aabb.half_extents;

    let axis = if outside.x > outside.y {
        ContactAxis::X
    } else if outside.y > outside.x {
        ContactAxis::Y
    } else {
        ContactAxis::Corner
    };

    ContactNormal { axis, sign }
}

#[inline]
fn sign_or_positive(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
