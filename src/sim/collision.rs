//! Collision detection and response for boxes and walls
//!
//! Detecting contacts between the circular ball and the rectangular paddle,
//! bricks, arena walls and lose zone, then computing reflection.

use glam::Vec2;

use super::geometry::{Aabb, Circle, ContactAxis, ContactNormal, contact_normal, intersects};
use super::state::Ball;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the box to the ball center
    pub point: Vec2,
    /// Face normal pointing from the box toward the ball
    pub normal: ContactNormal,
    /// How far the ball overlaps the box
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: ContactNormal {
                axis: ContactAxis::Y,
                sign: Vec2::ONE,
            },
            penetration: 0.0,
        }
    }

    /// A hit the ball is still moving into (a contact that just began)
    pub fn is_approaching(&self, velocity: Vec2) -> bool {
        self.hit && self.normal.is_approached_by(velocity)
    }
}

/// Check collision between a ball and a box
pub fn ball_box_collision(ball: &Circle, aabb: &Aabb) -> CollisionResult {
    if !intersects(ball, aabb) {
        return CollisionResult::miss();
    }

    let point = aabb.closest_point(ball.center);
    CollisionResult {
        hit: true,
        point,
        normal: contact_normal(ball, aabb),
        penetration: ball.radius - ball.center.distance(point),
    }
}

/// Keep the ball inside the arena.
///
/// Any axis the ball has crossed gets its velocity component reflected (if
/// still heading out) and its position clamped back inside. Returns true if
/// a wall was touched.
pub fn bounce_off_walls(ball: &mut Ball, arena: &Aabb) -> bool {
    let lo = arena.min() + Vec2::splat(ball.radius);
    let hi = arena.max() - Vec2::splat(ball.radius);
    let mut touched = false;

    if ball.pos.x < lo.x {
        ball.pos.x = lo.x;
        ball.vel = reflect_if_entering(ball.vel, Vec2::X);
        touched = true;
    } else if ball.pos.x > hi.x {
        ball.pos.x = hi.x;
        ball.vel = reflect_if_entering(ball.vel, Vec2::NEG_X);
        touched = true;
    }

    if ball.pos.y < lo.y {
        ball.pos.y = lo.y;
        ball.vel = reflect_if_entering(ball.vel, Vec2::Y);
        touched = true;
    } else if ball.pos.y > hi.y {
        ball.pos.y = hi.y;
        ball.vel = reflect_if_entering(ball.vel, Vec2::NEG_Y);
        touched = true;
    }

    touched
}

/// Check if the ball touched the lose zone
#[inline]
pub fn ball_lose_zone_collision(ball: &Circle, zone: &Aabb) -> bool {
    intersects(ball, zone)
}

#[inline]
fn reflect_if_entering(vel: Vec2, inward_normal: Vec2) -> Vec2 {
    if vel.dot(inward_normal) < 0.0 {
        super::geometry::reflect(vel, inward_normal)
    } else {
        vel
    }
}
