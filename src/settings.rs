//! Game settings and balance tuning
//!
//! Every tunable the simulation reads lives here. Defaults mirror
//! [`crate::consts`]; a JSON document only needs the keys it overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play-area geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
    pub player_start_x: f32,
    pub player_start_y: f32,
    /// Edge length of the (square) player
    pub player_size: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_size: PLAYER_SIZE,
        }
    }
}

/// Baseline player movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub acceleration: f32,
    pub max_speed: f32,
    pub friction: f32,
    pub stop_threshold: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            acceleration: PLAYER_ACCEL,
            max_speed: PLAYER_MAX_SPEED,
            friction: FRICTION,
            stop_threshold: STOP_THRESHOLD,
        }
    }
}

/// Obstacle geometry and spawn cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub spawn_x_min: f32,
    pub spawn_x_max: f32,
    pub spawn_y: f32,
    pub base_speed: f32,
    pub spawn_retries: u32,
    pub spawn_interval_min: u32,
    pub spawn_interval_max: u32,
    pub near_miss_margin: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            min_width: OBSTACLE_MIN_WIDTH,
            max_width: OBSTACLE_MAX_WIDTH,
            min_height: OBSTACLE_MIN_HEIGHT,
            max_height: OBSTACLE_MAX_HEIGHT,
            spawn_x_min: OBSTACLE_SPAWN_X_MIN,
            spawn_x_max: OBSTACLE_SPAWN_X_MAX,
            spawn_y: OBSTACLE_SPAWN_Y,
            base_speed: OBSTACLE_BASE_SPEED,
            spawn_retries: SPAWN_RETRIES,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            near_miss_margin: NEAR_MISS_MARGIN,
        }
    }
}

/// Gust strength and timing (ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindTuning {
    pub force: f32,
    pub gust_min_ticks: u32,
    pub gust_max_ticks: u32,
    pub calm_min_ticks: u32,
    pub calm_max_ticks: u32,
    /// How long before a gust the warning cue starts
    pub warning_ticks: u32,
}

impl Default for WindTuning {
    fn default() -> Self {
        Self {
            force: WIND_FORCE,
            gust_min_ticks: GUST_MIN_TICKS,
            gust_max_ticks: GUST_MAX_TICKS,
            calm_min_ticks: CALM_MIN_TICKS,
            calm_max_ticks: CALM_MAX_TICKS,
            warning_ticks: WIND_WARNING_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub points_per_tick: i64,
    pub wall_penalty: i64,
    pub near_miss_bonus: i64,
    /// Score band width; entering a new band is a level-up
    pub bracket_size: i64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            points_per_tick: POINTS_PER_TICK,
            wall_penalty: WALL_PENALTY,
            near_miss_bonus: NEAR_MISS_BONUS,
            bracket_size: BRACKET_SIZE,
        }
    }
}

/// Difficulty increments applied on level-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub accel_step: f32,
    pub obstacle_speed_step: f32,
    pub spawn_floor_every: u32,
    pub spawn_floor_step: u32,
    pub spawn_floor_min: u32,
    pub speed_boost_every: u32,
    pub max_speed_step: f32,
    pub wind_force_step: f32,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            accel_step: ACCEL_STEP,
            obstacle_speed_step: OBSTACLE_SPEED_STEP,
            spawn_floor_every: SPAWN_FLOOR_EVERY,
            spawn_floor_step: SPAWN_FLOOR_STEP,
            spawn_floor_min: SPAWN_FLOOR_MIN,
            speed_boost_every: SPEED_BOOST_EVERY,
            max_speed_step: MAX_SPEED_STEP,
            wind_force_step: WIND_FORCE_STEP,
        }
    }
}

/// Audio preferences (read by the audio collaborator only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub play_area: PlayArea,
    pub physics: PhysicsTuning,
    pub obstacles: ObstacleTuning,
    pub wind: WindTuning,
    pub scoring: ScoringTuning,
    pub progression: ProgressionTuning,
    pub audio: AudioSettings,
}

/// Errors raised while loading or validating [`Settings`]
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The document is not valid settings JSON.
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can work with.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "failed to read settings from {}: {}", path.display(), source)
            }
            SettingsError::Parse(err) => write!(f, "malformed settings JSON: {}", err),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Parse(err) => Some(err),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_range<T: PartialOrd + fmt::Display>(
    field: &'static str,
    min: T,
    max: T,
) -> Result<(), SettingsError> {
    if min > max {
        return Err(invalid(field, format!("min {} exceeds max {}", min, max)));
    }
    Ok(())
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let area = &self.play_area;
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(invalid("play_area", "width and height must be positive"));
        }
        if area.player_size <= 0.0 || area.player_size >= area.width {
            return Err(invalid(
                "play_area.player_size",
                "must be positive and narrower than the play area",
            ));
        }

        let physics = &self.physics;
        if !(physics.friction > 0.0 && physics.friction < 1.0) {
            return Err(invalid("physics.friction", "must lie strictly between 0 and 1"));
        }
        if physics.acceleration < 0.0 || physics.max_speed <= 0.0 || physics.stop_threshold < 0.0
        {
            return Err(invalid(
                "physics",
                "acceleration and stop threshold must be non-negative, max speed positive",
            ));
        }

        let obstacles = &self.obstacles;
        if obstacles.min_width <= 0.0 || obstacles.min_height <= 0.0 {
            return Err(invalid("obstacles", "minimum width and height must be positive"));
        }
        check_range("obstacles.width", obstacles.min_width, obstacles.max_width)?;
        check_range("obstacles.height", obstacles.min_height, obstacles.max_height)?;
        check_range("obstacles.spawn_x", obstacles.spawn_x_min, obstacles.spawn_x_max)?;
        check_range(
            "obstacles.spawn_interval",
            obstacles.spawn_interval_min,
            obstacles.spawn_interval_max,
        )?;
        if obstacles.spawn_x_min < 0.0 || obstacles.spawn_x_max > area.width {
            return Err(invalid(
                "obstacles.spawn_x",
                format!("spawn range must lie within 0..={}", area.width),
            ));
        }
        if obstacles.base_speed <= 0.0 {
            return Err(invalid("obstacles.base_speed", "must be positive"));
        }

        let wind = &self.wind;
        check_range("wind.gust_ticks", wind.gust_min_ticks, wind.gust_max_ticks)?;
        check_range("wind.calm_ticks", wind.calm_min_ticks, wind.calm_max_ticks)?;
        if wind.gust_min_ticks == 0 {
            return Err(invalid("wind.gust_min_ticks", "gusts must last at least one tick"));
        }

        if self.scoring.bracket_size <= 0 {
            return Err(invalid("scoring.bracket_size", "must be positive"));
        }
        Ok(())
    }

    /// Effective sound-effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.audio.muted {
            0.0
        } else {
            self.audio.master_volume * self.audio.sfx_volume
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.audio.muted {
            0.0
        } else {
            self.audio.master_volume * self.audio.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.play_area.width, 450.0);
        assert_eq!(settings.obstacles.spawn_retries, 10);
        assert_eq!(settings.scoring.bracket_size, 1000);
    }

    #[test]
    fn test_partial_json_overrides_only_given_keys() {
        let json = r#"{ "physics": { "max_speed": 12.0 }, "wind": { "force": 0.5 } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.physics.max_speed, 12.0);
        assert_eq!(settings.physics.acceleration, PLAYER_ACCEL);
        assert_eq!(settings.wind.force, 0.5);
        assert_eq!(settings.wind.gust_min_ticks, GUST_MIN_TICKS);
        assert_eq!(settings.play_area, PlayArea::default());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.audio.muted = true;
        let json = settings.to_json_pretty().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let json = r#"{ "obstacles": { "min_width": 80.0, "max_width": 40.0 } }"#;
        match Settings::from_json(json) {
            Err(SettingsError::Invalid { field, .. }) => assert_eq!(field, "obstacles.width"),
            other => panic!("expected invalid width range, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_friction_out_of_range() {
        let mut settings = Settings::default();
        settings.physics.friction = 1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_range_outside_play_area() {
        let mut settings = Settings::default();
        settings.obstacles.spawn_x_max = 500.0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("obstacles.spawn_x"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut settings = Settings::default();
        assert!(settings.effective_sfx_volume() > 0.0);
        settings.audio.muted = true;
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }
}
