//! Gust Dodger - a falling-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Per-tick simulation (player physics, wind, obstacles, progression)
//! - `audio`: Maps simulation events to sound playback
//! - `highscores`: Final-score history
//! - `settings`: Data-driven game balance and play-area configuration

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};
pub use sim::{GameState, Snapshot, TickInput, tick};

/// Game configuration constants
///
/// These are the baseline values; [`Settings`] starts from them and lets a
/// JSON document override any subset.
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 450.0;
    pub const PLAY_HEIGHT: f32 = 810.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 175.0;
    pub const PLAYER_START_Y: f32 = 625.0;
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_ACCEL: f32 = 0.4;
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    /// Velocity multiplier per tick with no input (0..1, lower = stronger)
    pub const FRICTION: f32 = 0.9;
    /// Below this speed an unpowered player snaps to rest
    pub const STOP_THRESHOLD: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_MIN_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MAX_WIDTH: f32 = 100.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 100.0;
    pub const OBSTACLE_SPAWN_X_MIN: f32 = 10.0;
    pub const OBSTACLE_SPAWN_X_MAX: f32 = 430.0;
    /// Obstacles enter above the visible area
    pub const OBSTACLE_SPAWN_Y: f32 = -100.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 2.5;
    /// Placement retries after the first overlapping candidate
    pub const SPAWN_RETRIES: u32 = 10;
    pub const SPAWN_INTERVAL_MIN: u32 = 30;
    pub const SPAWN_INTERVAL_MAX: u32 = 120;
    pub const NEAR_MISS_MARGIN: f32 = 20.0;

    /// Wind defaults (all durations in ticks)
    pub const WIND_FORCE: f32 = 0.2;
    pub const GUST_MIN_TICKS: u32 = 60;
    pub const GUST_MAX_TICKS: u32 = 180;
    pub const CALM_MIN_TICKS: u32 = 180;
    pub const CALM_MAX_TICKS: u32 = 480;
    pub const WIND_WARNING_TICKS: u32 = 60;

    /// Scoring
    pub const POINTS_PER_TICK: i64 = 1;
    pub const WALL_PENALTY: i64 = 150;
    pub const NEAR_MISS_BONUS: i64 = 10;
    pub const BRACKET_SIZE: i64 = 1000;

    /// Progression tuning applied per level-up
    pub const ACCEL_STEP: f32 = 0.05;
    pub const OBSTACLE_SPEED_STEP: f32 = 0.05;
    /// Every this many levels the spawn floor drops
    pub const SPAWN_FLOOR_EVERY: u32 = 5;
    pub const SPAWN_FLOOR_STEP: u32 = 20;
    pub const SPAWN_FLOOR_MIN: u32 = 10;
    /// Every this many levels max speed and wind force grow
    pub const SPEED_BOOST_EVERY: u32 = 10;
    pub const MAX_SPEED_STEP: f32 = 1.0;
    pub const WIND_FORCE_STEP: f32 = 0.1;
}
