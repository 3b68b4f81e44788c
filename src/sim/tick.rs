//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{ball_box_collision, ball_lose_zone_collision, bounce_off_walls};
use super::geometry::Aabb;
use super::state::{Ball, BrickId, BrickSet, GameEvent, GameState, Paddle};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target paddle x (from mouse/touch position); latest sample wins
    pub target_x: Option<f32>,
}

/// A contact found while resolving one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Wall,
    Paddle,
    Brick(BrickId),
    LoseZone,
}

/// Move the ball one step and resolve its contacts, in this order:
/// walls, paddle, bricks (first approaching brick in creation order only),
/// lose zone. Reflections update `ball.vel` in place; later tests see the
/// already-reflected velocity. Nothing but the ball is mutated.
///
/// Detection is discrete, so `dt` must be small enough that the ball cannot
/// cross a brick or the paddle in one step (see `consts::SIM_DT`).
pub fn resolve_step(
    ball: &mut Ball,
    paddle: &Paddle,
    bricks: &BrickSet,
    arena: &Aabb,
    lose_zone: &Aabb,
    dt: f32,
) -> Vec<Contact> {
    let mut contacts = Vec::new();

    ball.pos += ball.vel * dt;

    if bounce_off_walls(ball, arena) {
        contacts.push(Contact::Wall);
    }

    let hit = ball_box_collision(&ball.circle(), &paddle.rect);
    if hit.is_approaching(ball.vel) {
        ball.vel = hit.normal.reflect(ball.vel);
        contacts.push(Contact::Paddle);
    }

    for brick in bricks.iter() {
        let hit = ball_box_collision(&ball.circle(), &brick.rect);
        if hit.is_approaching(ball.vel) {
            ball.vel = hit.normal.reflect(ball.vel);
            contacts.push(Contact::Brick(brick.id));
            break;
        }
    }

    if ball_lose_zone_collision(&ball.circle(), lose_zone) {
        contacts.push(Contact::LoseZone);
    }

    contacts
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    state.time_ticks += 1;

    if let Some(x) = input.target_x {
        state.set_paddle_x(x);
    }

    let (Some(ball), Some(paddle)) = (state.ball.as_mut(), state.paddle.as_ref()) else {
        return events;
    };
    let contacts = resolve_step(
        ball,
        paddle,
        &state.bricks,
        &state.arena,
        &state.lose_zone,
        dt,
    );

    for contact in contacts {
        // A round that just ended ignores the rest of the step
        if !state.is_running() {
            break;
        }
        match contact {
            Contact::Wall => events.push(GameEvent::WallBounce),
            Contact::Paddle => events.push(GameEvent::PaddleBounce),
            Contact::Brick(id) => events.extend(state.strike_brick(id)),
            Contact::LoseZone => events.extend(state.hit_lose_zone()),
        }
    }

    events
}
