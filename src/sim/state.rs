//! Game state and core simulation types
//!
//! The session owns every entity; collaborators only ever see a [`Snapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::highscores::HighScores;
use crate::settings::{PlayArea, Settings};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start input
    NotStarted,
    /// Active gameplay
    Running,
    /// Simulation frozen, rendering continues
    Paused,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// The player-controlled square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; `y` never changes during a session
    pub pos: Vec2,
    /// Horizontal velocity (units per tick)
    pub vel_x: f32,
    pub size: f32,
}

impl Player {
    pub fn new(area: &PlayArea) -> Self {
        Self {
            pos: Vec2::new(area.player_start_x, area.player_start_y),
            vel_x: 0.0,
            size: area.player_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A falling block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Descent per tick, fixed at spawn time
    pub speed: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}

/// Live obstacles plus the spawn timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Sorted by id (spawn order)
    pub obstacles: Vec<Obstacle>,
    /// Ticks until the next spawn attempt
    pub spawn_countdown: u32,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_countdown: 0,
            next_id: 1,
        }
    }
}

impl ObstacleField {
    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Lateral gust direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    Left,
    Right,
}

impl WindDirection {
    /// Sign of the force along +x
    pub fn sign(&self) -> f32 {
        match self {
            WindDirection::Left => -1.0,
            WindDirection::Right => 1.0,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            WindDirection::Left
        } else {
            WindDirection::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindDirection::Left => "LEFT",
            WindDirection::Right => "RIGHT",
        }
    }
}

/// Wind timer state; exactly one of calm countdown or active gust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindPhase {
    /// Counting down to the next gust
    Idle { countdown: u32 },
    /// Gust in progress
    Active {
        direction: WindDirection,
        elapsed: u32,
        duration: u32,
    },
}

/// Pending-gust cue for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindWarning {
    pub direction: WindDirection,
    /// Alternates every 10 ticks for a pulsing border
    pub pulse_on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindState {
    pub phase: WindPhase,
    /// Direction the next gust will blow, rolled ahead of time
    pub next_direction: WindDirection,
}

impl WindState {
    /// Calm with the first gust due immediately
    pub fn new(next_direction: WindDirection) -> Self {
        Self {
            phase: WindPhase::Idle { countdown: 0 },
            next_direction,
        }
    }

    /// Direction of the gust currently blowing, if any
    pub fn active_direction(&self) -> Option<WindDirection> {
        match self.phase {
            WindPhase::Active { direction, .. } => Some(direction),
            WindPhase::Idle { .. } => None,
        }
    }

    /// Warning cue while a gust is at most `warning_ticks` away
    pub fn warning(&self, warning_ticks: u32) -> Option<WindWarning> {
        match self.phase {
            WindPhase::Idle { countdown } if countdown > 0 && countdown <= warning_ticks => {
                Some(WindWarning {
                    direction: self.next_direction,
                    pulse_on: (countdown / 10) % 2 == 0,
                })
            }
            _ => None,
        }
    }
}

/// Tunables that ramp with level; the spawn floor only shrinks, the rest
/// only grow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub acceleration: f32,
    pub max_speed: f32,
    /// Speed handed to newly spawned obstacles
    pub obstacle_speed: f32,
    /// Shortest allowed gap between spawn attempts (ticks)
    pub spawn_floor: u32,
    pub wind_force: f32,
}

impl Difficulty {
    pub fn baseline(settings: &Settings) -> Self {
        Self {
            acceleration: settings.physics.acceleration,
            max_speed: settings.physics.max_speed,
            obstacle_speed: settings.obstacles.base_speed,
            spawn_floor: settings.obstacles.spawn_interval_min,
            wind_force: settings.wind.force,
        }
    }
}

/// Score and level bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// May dip below zero mid-tick; clamped before the level check
    pub score: i64,
    pub level: u32,
    /// Highest score bracket reached so far
    pub bracket: i64,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            bracket: 0,
        }
    }
}

/// Discrete per-tick notifications for audio/UI collaborators
///
/// Each kind appears at most once in a tick's event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    /// Player left the play area and reappeared on the other side
    WallWrap,
    /// Player rectangle touches or crosses a side boundary
    NearWall,
    NearMiss,
    LevelUp { level: u32 },
    WindWarning { direction: WindDirection },
    GustStarted { direction: WindDirection },
    GustEnded,
    GameOver { score: u64 },
    NewHighScore { score: u64 },
}

/// Read-only view handed to the render layer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Rect,
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub level: u32,
    pub high_score: Option<u64>,
    pub gust: Option<WindDirection>,
    pub wind_warning: Option<WindWarning>,
    pub near_miss: bool,
    pub near_wall: bool,
}

/// One play session (persists across resets)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    pub field: ObstacleField,
    pub wind: WindState,
    pub progression: Progression,
    pub difficulty: Difficulty,
    /// Final scores of every finished run
    pub high_scores: HighScores,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulated (unpaused) ticks since the last reset
    pub time_ticks: u64,
    /// Near-miss awarded during the most recent tick
    pub near_miss: bool,
    /// Player touched a boundary during the most recent tick
    pub near_wall: bool,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let wind = WindState::new(WindDirection::random(&mut rng));
        Self {
            seed,
            player: Player::new(&settings.play_area),
            field: ObstacleField::default(),
            wind,
            progression: Progression::default(),
            difficulty: Difficulty::baseline(&settings),
            high_scores: HighScores::new(),
            events: Vec::new(),
            time_ticks: 0,
            near_miss: false,
            near_wall: false,
            phase: GamePhase::NotStarted,
            settings,
            rng,
        }
    }

    /// Begin play from `NotStarted`
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            self.push_event(GameEvent::Started);
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Re-initialize every run entity and resume play; score history is kept
    pub fn reset(&mut self) {
        self.player = Player::new(&self.settings.play_area);
        self.field = ObstacleField::default();
        // Roll the first gust direction up front so it is never undefined
        self.wind = WindState::new(WindDirection::random(&mut self.rng));
        self.progression = Progression::default();
        self.difficulty = Difficulty::baseline(&self.settings);
        self.time_ticks = 0;
        self.near_miss = false;
        self.near_wall = false;
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Score as shown to the player
    pub fn score(&self) -> u64 {
        self.progression.score.max(0) as u64
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    /// Record an event unless one of the same kind was already raised this tick
    pub fn push_event(&mut self, event: GameEvent) {
        let kind = std::mem::discriminant(&event);
        if !self.events.iter().any(|e| std::mem::discriminant(e) == kind) {
            self.events.push(event);
        }
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: self.player.rect(),
            obstacles: self.field.obstacles.iter().map(Obstacle::rect).collect(),
            score: self.score(),
            level: self.progression.level,
            high_score: self.high_scores.best(),
            gust: self.wind.active_direction(),
            wind_warning: self.wind.warning(self.settings.wind.warning_ticks),
            near_miss: self.near_miss,
            near_wall: self.near_wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_at_baseline() {
        let state = GameState::new(7, Settings::default());
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.player.pos, Vec2::new(175.0, 625.0));
        assert_eq!(state.progression, Progression::default());
        assert_eq!(state.level(), 1);
        assert!(state.field.obstacles.is_empty());
        assert_eq!(state.wind.phase, WindPhase::Idle { countdown: 0 });
    }

    #[test]
    fn test_events_deduplicate_by_kind() {
        let mut state = GameState::new(7, Settings::default());
        state.push_event(GameEvent::NearMiss);
        state.push_event(GameEvent::NearMiss);
        state.push_event(GameEvent::LevelUp { level: 2 });
        state.push_event(GameEvent::LevelUp { level: 3 });
        assert_eq!(
            state.events,
            vec![GameEvent::NearMiss, GameEvent::LevelUp { level: 2 }]
        );
    }

    #[test]
    fn test_reset_restores_baseline_but_keeps_history() {
        let mut state = GameState::new(7, Settings::default());
        state.start();
        state.progression.score = 4321;
        state.progression.level = 5;
        state.difficulty.max_speed = 20.0;
        state.player.vel_x = 3.0;
        state.high_scores.record(4321, 5);
        state.phase = GamePhase::GameOver;

        state.reset();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.progression, Progression::default());
        assert_eq!(state.difficulty, Difficulty::baseline(&state.settings));
        assert_eq!(state.player.vel_x, 0.0);
        assert_eq!(state.high_scores.best(), Some(4321));
    }

    #[test]
    fn test_wind_warning_window() {
        let mut wind = WindState::new(WindDirection::Right);
        wind.phase = WindPhase::Idle { countdown: 61 };
        assert_eq!(wind.warning(60), None);
        wind.phase = WindPhase::Idle { countdown: 60 };
        let warning = wind.warning(60).unwrap();
        assert_eq!(warning.direction, WindDirection::Right);
        assert!(warning.pulse_on);
        wind.phase = WindPhase::Idle { countdown: 15 };
        assert!(!wind.warning(60).unwrap().pulse_on);
        wind.phase = WindPhase::Idle { countdown: 0 };
        assert_eq!(wind.warning(60), None);
    }

    #[test]
    fn test_snapshot_clamps_negative_score() {
        let mut state = GameState::new(7, Settings::default());
        state.progression.score = -40;
        assert_eq!(state.snapshot().score, 0);
    }
}
