//! Wind gust state machine
//!
//! Calm periods count down to a gust; a gust pushes the player sideways
//! with a constant force until its duration runs out, then the next gust's
//! direction is rolled and a new calm period begins.

use rand::Rng;

use super::state::{Difficulty, WindDirection, WindPhase, WindState};
use crate::settings::WindTuning;

/// Outcome of one wind tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindStep {
    /// Lateral force to feed into this tick's player step
    pub force: f32,
    /// Pending gust direction while inside the warning window
    pub warning: Option<WindDirection>,
    /// A gust began this tick
    pub started: Option<WindDirection>,
    /// The gust ended this tick
    pub ended: bool,
}

/// Advance the wind by one tick
///
/// Runs before the player step so the force it returns applies in the same
/// tick.
pub fn step_wind<R: Rng>(
    wind: &mut WindState,
    difficulty: &Difficulty,
    tuning: &WindTuning,
    rng: &mut R,
) -> WindStep {
    let mut result = WindStep::default();

    if let WindPhase::Idle { countdown } = wind.phase {
        if countdown == 0 {
            let direction = wind.next_direction;
            let duration = rng.random_range(tuning.gust_min_ticks..=tuning.gust_max_ticks);
            wind.phase = WindPhase::Active {
                direction,
                elapsed: 0,
                duration,
            };
            result.started = Some(direction);
            log::info!("Gust {} for {} ticks", direction.as_str(), duration);
        } else {
            if countdown <= tuning.warning_ticks {
                result.warning = Some(wind.next_direction);
            }
            wind.phase = WindPhase::Idle {
                countdown: countdown - 1,
            };
            return result;
        }
    }

    if let WindPhase::Active {
        direction,
        elapsed,
        duration,
    } = wind.phase
    {
        if elapsed + 1 < duration {
            wind.phase = WindPhase::Active {
                direction,
                elapsed: elapsed + 1,
                duration,
            };
            result.force = difficulty.wind_force * direction.sign();
        } else {
            let countdown = rng.random_range(tuning.calm_min_ticks..=tuning.calm_max_ticks);
            wind.next_direction = WindDirection::random(rng);
            wind.phase = WindPhase::Idle { countdown };
            result.ended = true;
            log::debug!(
                "Gust over; next {} in {} ticks",
                wind.next_direction.as_str(),
                countdown
            );
        }
    }

    result
}
