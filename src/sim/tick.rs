//! Per-tick simulation
//!
//! Core game loop: one call advances the session by one frame in a fixed
//! pipeline order.

use super::autopilot;
use super::obstacles::step_obstacles;
use super::player::{Steer, step_player};
use super::progression::step_progression;
use super::state::{GameEvent, GamePhase, GameState};
use super::wind::step_wind;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move-left key held
    pub move_left: bool,
    /// Move-right key held
    pub move_right: bool,
    /// Start button (only from `NotStarted`)
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Play again (only from `GameOver`)
    pub reset: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Right wins when both keys are held
    pub fn steer(&self) -> Steer {
        if self.move_right {
            Steer::Right
        } else if self.move_left {
            Steer::Left
        } else {
            Steer::None
        }
    }
}

/// Advance the session by one tick
///
/// Pipeline while running: wind, player, obstacles, score, progression.
/// The wind goes first so its force lands in the same tick's player step.
/// Phase changes (start, pause toggle, reset) consume the tick they happen in.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::drive(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::NotStarted => {
            if input.start {
                state.start();
            }
            return;
        }
        GamePhase::GameOver => {
            if input.reset {
                state.reset();
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Running;
                state.push_event(GameEvent::Resumed);
            }
            return;
        }
        GamePhase::Running => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
                return;
            }
        }
    }

    state.time_ticks += 1;
    state.near_miss = false;
    state.near_wall = false;

    // Wind
    let gust = step_wind(
        &mut state.wind,
        &state.difficulty,
        &state.settings.wind,
        &mut state.rng,
    );
    if let Some(direction) = gust.warning {
        state.push_event(GameEvent::WindWarning { direction });
    }
    if let Some(direction) = gust.started {
        state.push_event(GameEvent::GustStarted { direction });
    }
    if gust.ended {
        state.push_event(GameEvent::GustEnded);
    }

    // Player
    let moved = step_player(
        &mut state.player,
        input.steer(),
        gust.force,
        &state.difficulty,
        &state.settings.physics,
        &state.settings.play_area,
    );
    if moved.wrapped {
        state.progression.score -= state.settings.scoring.wall_penalty;
        state.push_event(GameEvent::WallWrap);
    }
    if moved.near_wall {
        state.near_wall = true;
        state.push_event(GameEvent::NearWall);
    }

    // Obstacles
    let report = step_obstacles(
        &mut state.field,
        &state.player.rect(),
        &state.difficulty,
        &state.settings.obstacles,
        state.settings.play_area.height,
        &mut state.rng,
    );
    if report.collided {
        end_run(state);
        return;
    }
    if report.near_misses > 0 {
        state.progression.score +=
            state.settings.scoring.near_miss_bonus * i64::from(report.near_misses);
        state.near_miss = true;
        state.push_event(GameEvent::NearMiss);
    }

    // Score and progression
    state.progression.score += state.settings.scoring.points_per_tick;
    state.progression.score = state.progression.score.max(0);
    if let Some(level) = step_progression(
        &mut state.progression,
        &mut state.difficulty,
        &state.settings.scoring,
        &state.settings.progression,
    ) {
        state.push_event(GameEvent::LevelUp { level });
    }
}

/// Terminal collision: record the run and stop
fn end_run(state: &mut GameState) {
    state.progression.score = state.progression.score.max(0);
    let score = state.score();
    let level = state.progression.level;
    state.phase = GamePhase::GameOver;

    let previous_best = state.high_scores.best();
    if state.high_scores.record(score, level) {
        state.push_event(GameEvent::NewHighScore { score });
        log::info!(
            "Game over: score {} at level {} (new high score, previous {:?})",
            score,
            level,
            previous_best
        );
    } else {
        state.push_event(GameEvent::GameOver { score });
        log::info!("Game over: score {} at level {}", score, level);
    }
}
