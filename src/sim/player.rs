//! Player movement integration
//!
//! Horizontal only: input acceleration, friction, wind, speed clamp, then
//! screen-wrap and edge proximity.

use super::state::{Difficulty, Player};
use crate::settings::{PhysicsTuning, PlayArea};

/// Horizontal steering intent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    None,
    Left,
    Right,
}

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStep {
    /// Crossed a side boundary and reappeared on the other side
    pub wrapped: bool,
    /// Some part of the player touches or exceeds a side boundary after wrapping
    pub near_wall: bool,
}

/// Advance the player by one tick
///
/// `wind_force` is the gust contribution computed earlier in the same tick
/// (zero while calm); it is added exactly once.
pub fn step_player(
    player: &mut Player,
    steer: Steer,
    wind_force: f32,
    difficulty: &Difficulty,
    physics: &PhysicsTuning,
    area: &PlayArea,
) -> PlayerStep {
    player.vel_x += wind_force;

    match steer {
        Steer::Right => player.vel_x += difficulty.acceleration,
        Steer::Left => player.vel_x -= difficulty.acceleration,
        Steer::None => {
            player.vel_x *= physics.friction;
            if player.vel_x.abs() < physics.stop_threshold {
                player.vel_x = 0.0;
            }
        }
    }

    player.vel_x = player
        .vel_x
        .clamp(-difficulty.max_speed, difficulty.max_speed);
    player.pos.x += player.vel_x;

    let wrapped = wrap(player, area.width);

    let near_wall = player.pos.x <= 0.0 || player.pos.x + player.size >= area.width;

    PlayerStep { wrapped, near_wall }
}

/// Relocate a player that left the play area
///
/// An edge crossing in the direction of travel wraps immediately; a player
/// that has drifted fully off-screen wraps regardless of velocity. Landing
/// spots sit just outside the opposite edge so the next tick cannot bounce
/// the player straight back.
fn wrap(player: &mut Player, width: f32) -> bool {
    let x = player.pos.x;
    let size = player.size;
    let vel = player.vel_x;

    if x > width || (vel > 0.0 && x + size > width) {
        log::debug!("Player wrapped right -> left at x={:.1}", x);
        player.pos.x = -size;
        true
    } else if x + size < 0.0 || (vel < 0.0 && x < 0.0) {
        log::debug!("Player wrapped left -> right at x={:.1}", x);
        player.pos.x = width;
        true
    } else {
        false
    }
}
