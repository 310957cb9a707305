//! Obstacle lifecycle: spawn, descend, collide, score near misses, prune

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, near_miss, spans_overlap};
use super::state::{Difficulty, Obstacle, ObstacleField};
use crate::settings::ObstacleTuning;

/// Result of one obstacle tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObstacleReport {
    /// Some obstacle overlaps the player (terminal)
    pub collided: bool,
    /// Obstacles inside the near-miss band this tick; each earns a bonus
    pub near_misses: u32,
    /// ID of the obstacle spawned this tick
    pub spawned: Option<u32>,
    /// Obstacles removed after passing the bottom edge
    pub pruned: usize,
}

/// Uniform sample from `[min, max)`, or `min` for a degenerate range
fn sample<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// True when `[x, x + width)` is free of every live obstacle's span
pub fn is_clear(obstacles: &[Obstacle], x: f32, width: f32) -> bool {
    !obstacles
        .iter()
        .any(|o| spans_overlap(x, width, o.pos.x, o.width))
}

/// Try to place a new obstacle above the play area
///
/// The width is drawn once; the x position gets one draw plus
/// `spawn_retries` redraws. Returns `None` when every candidate overlaps an
/// existing obstacle, in which case nothing is spawned.
pub fn spawn_obstacle<R: Rng>(
    field: &mut ObstacleField,
    difficulty: &Difficulty,
    tuning: &ObstacleTuning,
    rng: &mut R,
) -> Option<u32> {
    let width = sample(rng, tuning.min_width, tuning.max_width);

    for _ in 0..=tuning.spawn_retries {
        let x = sample(rng, tuning.spawn_x_min, tuning.spawn_x_max);
        if !is_clear(&field.obstacles, x, width) {
            continue;
        }

        let height = sample(rng, tuning.min_height, tuning.max_height);
        let id = field.next_obstacle_id();
        field.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, tuning.spawn_y),
            width,
            height,
            speed: difficulty.obstacle_speed,
        });
        log::debug!(
            "Spawned obstacle {} at x={:.1} ({:.1}x{:.1}, speed {:.2})",
            id,
            x,
            width,
            height,
            difficulty.obstacle_speed
        );
        return Some(id);
    }

    log::trace!("Spawn skipped: no free span for width {:.1}", width);
    None
}

/// Advance the obstacle field by one tick
pub fn step_obstacles<R: Rng>(
    field: &mut ObstacleField,
    player: &Rect,
    difficulty: &Difficulty,
    tuning: &ObstacleTuning,
    play_height: f32,
    rng: &mut R,
) -> ObstacleReport {
    let mut report = ObstacleReport::default();

    field.spawn_countdown = field.spawn_countdown.saturating_sub(1);
    if field.spawn_countdown == 0 {
        report.spawned = spawn_obstacle(field, difficulty, tuning, rng);
        // The floor only ever shrinks below the configured maximum
        let max = tuning.spawn_interval_max.max(difficulty.spawn_floor);
        field.spawn_countdown = rng.random_range(difficulty.spawn_floor..=max);
    }

    for obstacle in &mut field.obstacles {
        obstacle.pos.y += obstacle.speed;
    }

    for obstacle in &field.obstacles {
        let rect = obstacle.rect();
        if player.overlaps(&rect) {
            report.collided = true;
        }
        if near_miss(player, &rect, tuning.near_miss_margin) {
            report.near_misses += 1;
        }
    }

    // Compact after the scan so no obstacle is skipped or visited twice
    let before = field.obstacles.len();
    field.obstacles.retain(|o| o.bottom() <= play_height);
    report.pruned = before - field.obstacles.len();

    report
}
