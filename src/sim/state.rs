//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; the session owns one and
//! keeps it for the life of the process.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Circle};
use super::grid::brick_grid;
use crate::consts::*;
use crate::settings::Settings;

/// Lifecycle of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has been started yet
    Idle,
    /// Ball in play
    Running,
    /// Round is over, waiting for restart or quit
    Ended(Outcome),
}

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    /// Text shown to the player when the round ends
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win => "You Win!",
            Outcome::Lose => "You Lose.",
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A ball at the arena center carrying the launch velocity
    pub fn launched(arena: &Aabb, launch_velocity: Vec2) -> Self {
        Self {
            pos: arena.center,
            vel: launch_velocity,
            radius: BALL_RADIUS,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The player's paddle. Immovable under contact; only input moves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Aabb,
}

impl Paddle {
    /// Canonical paddle: horizontally centered, near the bottom edge
    pub fn new(arena: &Aabb) -> Self {
        let center = Vec2::new(arena.center.x, arena.min().y + PADDLE_BOTTOM_OFFSET);
        let size = Vec2::new(arena.size().x / 4.0, PADDLE_HEIGHT);
        Self {
            rect: Aabb::from_size(center, size),
        }
    }

    /// Move the paddle center to `x`, keeping it fully inside the arena
    pub fn set_x(&mut self, x: f32, arena: &Aabb) {
        let lo = arena.min().x + self.rect.half_extents.x;
        let hi = arena.max().x - self.rect.half_extents.x;
        self.rect.center.x = if lo <= hi { x.clamp(lo, hi) } else { arena.center.x };
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.center.x
    }
}

/// Brick damage level, in the order hits apply it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStage {
    Red,
    Orange,
    Yellow,
    White,
}

impl HealthStage {
    pub const ALL: [HealthStage; 4] = [
        HealthStage::Red,
        HealthStage::Orange,
        HealthStage::Yellow,
        HealthStage::White,
    ];

    /// The stage after one more hit, or `None` if the next hit destroys
    pub fn next(self) -> Option<Self> {
        match self {
            HealthStage::Red => Some(HealthStage::Orange),
            HealthStage::Orange => Some(HealthStage::Yellow),
            HealthStage::Yellow => Some(HealthStage::White),
            HealthStage::White => None,
        }
    }

    /// Display color (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            HealthStage::Red => 0xFF0000,
            HealthStage::Orange => 0xFF7F00,
            HealthStage::Yellow => 0xFFFF00,
            HealthStage::White => 0xFFFFFF,
        }
    }
}

/// Stable handle to a brick slot. Equal to the brick's creation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BrickId(pub usize);

/// A destructible brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: BrickId,
    pub rect: Aabb,
    pub stage: HealthStage,
}

/// Result of striking a brick once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Brick survived and advanced to this stage
    Damaged(HealthStage),
    /// Brick was already white and is gone
    Destroyed,
}

impl Brick {
    pub fn new(id: BrickId, center: Vec2) -> Self {
        Self {
            id,
            rect: Aabb::from_size(center, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)),
            stage: HealthStage::Red,
        }
    }

    /// Advance exactly one stage
    pub fn strike(&mut self) -> Strike {
        match self.stage.next() {
            Some(stage) => {
                self.stage = stage;
                Strike::Damaged(stage)
            }
            None => Strike::Destroyed,
        }
    }
}

/// Slot arena of bricks.
///
/// Slots are indexed by [`BrickId`] and never reused within a round, so a
/// handle stays valid (or resolves to nothing) as bricks are destroyed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickSet {
    slots: Vec<Option<Brick>>,
    alive: usize,
}

impl BrickSet {
    /// Build a set from bricks whose ids match their positions
    pub fn from_centers(centers: impl IntoIterator<Item = Vec2>) -> Self {
        let slots: Vec<Option<Brick>> = centers
            .into_iter()
            .enumerate()
            .map(|(i, c)| Some(Brick::new(BrickId(i), c)))
            .collect();
        let alive = slots.len();
        Self { slots, alive }
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Number of bricks still standing
    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Total slots created this round (alive or not)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Alive bricks in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.slots.iter().flatten()
    }

    /// Apply one hit. Returns `None` if the slot is already empty.
    pub fn strike(&mut self, id: BrickId) -> Option<Strike> {
        let slot = self.slots.get_mut(id.0)?;
        let brick = slot.as_mut()?;
        let strike = brick.strike();
        if strike == Strike::Destroyed {
            *slot = None;
            self.alive -= 1;
        }
        Some(strike)
    }
}

/// Something that happened during a step, for presentation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce,
    BrickDamaged { id: BrickId, stage: HealthStage },
    BrickDestroyed { id: BrickId, remaining: usize },
    RoundEnded(Outcome),
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena bounds; the walls are its edges
    pub arena: Aabb,
    /// Strip along the bottom edge; touching it loses the round
    pub lose_zone: Aabb,
    pub phase: RoundPhase,
    /// Present only while a round is running
    pub ball: Option<Ball>,
    /// Present only while a round is running
    pub paddle: Option<Paddle>,
    pub bricks: BrickSet,
    /// Rounds started so far
    pub round: u32,
    /// Simulation steps in the current round
    pub time_ticks: u64,
    brick_rows: u32,
    launch_velocity: Vec2,
}

impl GameState {
    /// Build an idle state. Settings are sanitized first so every round
    /// starts with at least one brick and a finite launch velocity.
    pub fn new(settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let arena = Aabb::from_size(
            Vec2::ZERO,
            Vec2::new(settings.arena_width, settings.arena_height),
        );
        let lose_zone = Aabb::from_size(
            Vec2::new(arena.center.x, arena.min().y + LOSE_ZONE_HEIGHT / 2.0),
            Vec2::new(arena.size().x, LOSE_ZONE_HEIGHT),
        );
        Self {
            arena,
            lose_zone,
            phase: RoundPhase::Idle,
            ball: None,
            paddle: None,
            bricks: BrickSet::default(),
            round: 0,
            time_ticks: 0,
            brick_rows: settings.brick_rows,
            launch_velocity: settings.launch_velocity(),
        }
    }

    /// Velocity every fresh ball is launched with
    pub fn launch_velocity(&self) -> Vec2 {
        self.launch_velocity
    }

    /// Begin a round: fresh grid, canonical paddle, launched ball
    pub fn start(&mut self) {
        self.bricks = BrickSet::from_centers(brick_grid(&self.arena, self.brick_rows));
        self.paddle = Some(Paddle::new(&self.arena));
        self.ball = Some(Ball::launched(&self.arena, self.launch_velocity));
        self.phase = RoundPhase::Running;
        self.round += 1;
        self.time_ticks = 0;
        log::info!(
            "Round {} started with {} bricks",
            self.round,
            self.bricks.alive_count()
        );
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Feed one brick contact through the health state machine.
    ///
    /// Ends the round with a win when the last brick goes. Does nothing
    /// outside a running round or for a handle whose brick is gone.
    pub fn strike_brick(&mut self, id: BrickId) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }

        match self.bricks.strike(id) {
            Some(Strike::Damaged(stage)) => {
                events.push(GameEvent::BrickDamaged { id, stage });
            }
            Some(Strike::Destroyed) => {
                let remaining = self.bricks.alive_count();
                events.push(GameEvent::BrickDestroyed { id, remaining });
                if remaining == 0 {
                    self.end_round(Outcome::Win);
                    events.push(GameEvent::RoundEnded(Outcome::Win));
                }
            }
            None => log::debug!("Ignoring hit on destroyed brick {:?}", id),
        }

        events
    }

    /// The ball reached the lose zone
    pub fn hit_lose_zone(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }
        self.end_round(Outcome::Lose);
        vec![GameEvent::RoundEnded(Outcome::Lose)]
    }

    /// Move the paddle toward an input position (running rounds only)
    pub fn set_paddle_x(&mut self, x: f32) {
        if !self.is_running() {
            return;
        }
        if let Some(paddle) = self.paddle.as_mut() {
            paddle.set_x(x, &self.arena);
        }
    }

    fn end_round(&mut self, outcome: Outcome) {
        self.ball = None;
        self.paddle = None;
        self.phase = RoundPhase::Ended(outcome);
        log::info!(
            "Round {} ended: {:?} after {} ticks, {} bricks left",
            self.round,
            outcome,
            self.time_ticks,
            self.bricks.alive_count()
        );
    }
}
