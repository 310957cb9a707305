//! Idle/demo mode
//!
//! Fills in a [`TickInput`] from the current state so the game can play
//! itself: starts and restarts runs, and steers toward the nearest free
//! column below the incoming obstacles.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Obstacles whose bottom edge is within this distance above the player count as threats
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept on each side of a threat
const CLEARANCE: f32 = 12.0;
/// Distance from the side walls the autopilot refuses to cross
const WALL_MARGIN: f32 = 4.0;
/// No steering when the predicted stop point is this close to the target
const DEADZONE: f32 = 3.0;

/// Overwrite the steering and lifecycle fields of `input`
pub fn drive(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::NotStarted => input.start = true,
        GamePhase::GameOver => input.reset = true,
        GamePhase::Running | GamePhase::Paused => {}
    }

    let target = target_x(state);
    let player = &state.player;

    // Where the player coasts to if it lets go now
    let friction = state.settings.physics.friction;
    let glide = player.vel_x * friction / (1.0 - friction);
    let predicted = player.pos.x + glide;

    input.move_left = predicted > target + DEADZONE;
    input.move_right = predicted < target - DEADZONE;
}

/// Left-edge x the player should head for
fn target_x(state: &GameState) -> f32 {
    let player = state.player.rect();
    let size = player.size.x;
    let lo = WALL_MARGIN;
    let hi = state.settings.play_area.width - size - WALL_MARGIN;
    let current = player.left().clamp(lo, hi);

    // Player left-edge intervals that would end in a collision
    let blocked: Vec<(f32, f32)> = state
        .field
        .obstacles
        .iter()
        .filter(|o| o.bottom() > player.top() - LOOKAHEAD && o.pos.y < player.bottom())
        .map(|o| (o.pos.x - size - CLEARANCE, o.pos.x + o.width + CLEARANCE))
        .collect();

    let is_free = |x: f32| !blocked.iter().any(|&(a, b)| x > a && x < b);
    if is_free(current) {
        return current;
    }

    let mut candidates = vec![lo, hi];
    for &(a, b) in &blocked {
        candidates.push(a);
        candidates.push(b);
    }

    candidates
        .into_iter()
        .filter(|x| (lo..=hi).contains(x) && is_free(*x))
        .min_by(|a, b| {
            (a - current)
                .abs()
                .partial_cmp(&(b - current).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or((lo + hi) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Obstacle;
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(5, Settings::default());
        state.start();
        state
    }

    #[test]
    fn test_starts_and_restarts() {
        let mut state = GameState::new(5, Settings::default());
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.start);

        state.phase = GamePhase::GameOver;
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.reset);
    }

    #[test]
    fn test_holds_still_with_clear_sky() {
        let state = running();
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(!input.move_left);
        assert!(!input.move_right);
    }

    #[test]
    fn test_dodges_obstacle_overhead() {
        let mut state = running();
        // Overhangs the player's left side, so the right side is the short way out
        state.field.obstacles.push(Obstacle {
            id: 1,
            pos: Vec2::new(160.0, 500.0),
            width: 50.0,
            height: 60.0,
            speed: 2.5,
        });
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(input.move_right);
        assert!(!input.move_left);
    }

    #[test]
    fn test_ignores_distant_obstacles() {
        let mut state = running();
        state.field.obstacles.push(Obstacle {
            id: 1,
            pos: Vec2::new(175.0, -100.0),
            width: 50.0,
            height: 60.0,
            speed: 2.5,
        });
        let mut input = TickInput::default();
        drive(&state, &mut input);
        assert!(!input.move_left && !input.move_right);
    }
}
