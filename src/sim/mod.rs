//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (brick creation order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_box_collision, ball_lose_zone_collision};
pub use geometry::{Aabb, Circle, ContactAxis, ContactNormal, contact_normal, intersects, reflect};
pub use grid::brick_grid;
pub use state::{
    Ball, Brick, BrickId, BrickSet, GameEvent, GameState, HealthStage, Outcome, Paddle,
    RoundPhase, Strike,
};
pub use tick::{Contact, TickInput, resolve_step, tick};
