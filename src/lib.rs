//! Breakout - a single-level brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, contacts, bricks, round state)
//! - `session`: Round lifecycle, scoring and the restart/quit flow
//! - `persistence`: Key-value storage for the score record
//! - `platform`: Presentation hooks and the fixed-step clock
//! - `settings`: Data-driven arena and launch tuning

pub mod persistence;
pub mod platform;
pub mod scores;
pub mod session;
pub mod settings;
pub mod sim;

pub use scores::ScoreRecord;
pub use session::{EndAction, Flow, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz).
    ///
    /// Contacts are tested discretely once per step. At launch speed the ball
    /// travels under 3 units per step, far less than the 20-unit depth of a
    /// brick or the paddle, so it cannot pass through one between tests.
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 750.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 1334.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Launch impulse direction; scaled by `Settings::launch_scale`
    pub const LAUNCH_IMPULSE: (f32, f32) = (3.0, 5.0);
    pub const DEFAULT_LAUNCH_SCALE: f32 = 60.0;

    /// Paddle height; width is a quarter of the arena
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Paddle center height above the arena's bottom edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 125.0;

    /// Brick grid layout
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ROW_SPACING: f32 = 30.0;
    pub const BRICK_COLUMN_SPACING: f32 = 70.0;
    /// Gap between the arena edge and the first row/column center
    pub const BRICK_EDGE_MARGIN: f32 = 30.0;
    pub const DEFAULT_BRICK_ROWS: u32 = 4;

    /// Lose zone strip along the bottom edge
    pub const LOSE_ZONE_HEIGHT: f32 = 50.0;

    /// Storage key for the score record
    pub const SCORES_KEY: &str = "scoreArr";
}
