//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of presentation:
//! - One tick per call, externally paced
//! - Seeded RNG owned by the session
//! - Mutation only through `tick` and the component step functions
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacles;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;
pub mod wind;

pub use collision::{Rect, near_miss, spans_overlap};
pub use obstacles::{ObstacleReport, is_clear, spawn_obstacle, step_obstacles};
pub use player::{PlayerStep, Steer, step_player};
pub use progression::step_progression;
pub use state::{
    Difficulty, GameEvent, GamePhase, GameState, Obstacle, ObstacleField, Player, Progression,
    Snapshot, WindDirection, WindPhase, WindState, WindWarning,
};
pub use tick::{TickInput, tick};
pub use wind::{WindStep, step_wind};
