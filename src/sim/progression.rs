//! Score brackets, levels and difficulty ramp

use super::state::{Difficulty, Progression};
use crate::settings::{ProgressionTuning, ScoringTuning};

/// Check the (already clamped) score for a bracket crossing
///
/// At most one level is gained per call, however far the score jumped; the
/// bracket catches up to the score in the same step so a large jump is not
/// replayed as several level-ups on later ticks. Returns the new level.
pub fn step_progression(
    progression: &mut Progression,
    difficulty: &mut Difficulty,
    scoring: &ScoringTuning,
    tuning: &ProgressionTuning,
) -> Option<u32> {
    let bracket = progression.score.div_euclid(scoring.bracket_size);
    if bracket <= progression.bracket {
        return None;
    }

    progression.level += 1;
    progression.bracket = bracket;
    let level = progression.level;

    difficulty.acceleration += tuning.accel_step;
    difficulty.obstacle_speed += tuning.obstacle_speed_step;

    if tuning.spawn_floor_every > 0 && level.is_multiple_of(tuning.spawn_floor_every) {
        difficulty.spawn_floor = difficulty
            .spawn_floor
            .saturating_sub(tuning.spawn_floor_step)
            .max(tuning.spawn_floor_min)
            // Never loosen a floor that already sits below the minimum
            .min(difficulty.spawn_floor);
    }

    if tuning.speed_boost_every > 0 && level.is_multiple_of(tuning.speed_boost_every) {
        difficulty.max_speed += tuning.max_speed_step;
        difficulty.wind_force += tuning.wind_force_step;
    }

    log::info!(
        "Level {} (score {}): accel {:.2}, obstacle speed {:.2}, spawn floor {}, max speed {:.1}, wind {:.2}",
        level,
        progression.score,
        difficulty.acceleration,
        difficulty.obstacle_speed,
        difficulty.spawn_floor,
        difficulty.max_speed,
        difficulty.wind_force
    );
    Some(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn setup() -> (Progression, Difficulty, Settings) {
        let settings = Settings::default();
        (
            Progression::default(),
            Difficulty::baseline(&settings),
            settings,
        )
    }

    fn step(p: &mut Progression, d: &mut Difficulty, s: &Settings) -> Option<u32> {
        step_progression(p, d, &s.scoring, &s.progression)
    }

    #[test]
    fn test_crossing_999_to_1001_levels_once() {
        let (mut progression, mut difficulty, settings) = setup();
        progression.score = 999;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), None);

        progression.score += 2;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), Some(2));
        assert_eq!(progression.bracket, 1);
        assert!((difficulty.acceleration - 0.45).abs() < 1e-6);
        assert!((difficulty.obstacle_speed - 2.55).abs() < 1e-6);

        assert_eq!(step(&mut progression, &mut difficulty, &settings), None);
        assert_eq!(progression.level, 2);
    }

    #[test]
    fn test_large_jump_counts_as_single_level() {
        let (mut progression, mut difficulty, settings) = setup();
        progression.score = 3500;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), Some(2));
        assert_eq!(progression.bracket, 3);
        // Later ticks in the same bracket do not replay the skipped brackets
        progression.score = 3900;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), None);
        progression.score = 4000;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), Some(3));
    }

    #[test]
    fn test_every_fifth_level_lowers_spawn_floor() {
        let (mut progression, mut difficulty, settings) = setup();
        progression.level = 4;
        progression.score = 1000;
        step(&mut progression, &mut difficulty, &settings);
        assert_eq!(progression.level, 5);
        assert_eq!(difficulty.spawn_floor, 10);

        progression.level = 9;
        progression.score = 2000;
        step(&mut progression, &mut difficulty, &settings);
        assert_eq!(difficulty.spawn_floor, 10);
        assert_eq!(difficulty.max_speed, 9.0);
        assert!((difficulty.wind_force - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_below_bracket_after_penalty_does_not_regress() {
        let (mut progression, mut difficulty, settings) = setup();
        progression.score = 1200;
        step(&mut progression, &mut difficulty, &settings);
        progression.score = 900;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), None);
        assert_eq!(progression.level, 2);
        assert_eq!(progression.bracket, 1);
        // Climbing back into bracket 1 is not a new crossing
        progression.score = 1100;
        assert_eq!(step(&mut progression, &mut difficulty, &settings), None);
    }

    proptest! {
        #[test]
        fn level_and_difficulty_are_monotonic(
            deltas in proptest::collection::vec(-300i64..2500, 1..200)
        ) {
            let (mut progression, mut difficulty, settings) = setup();
            for delta in deltas {
                let before_level = progression.level;
                let before = difficulty.clone();
                progression.score = (progression.score + delta).max(0);
                step(&mut progression, &mut difficulty, &settings);

                prop_assert!(progression.level == before_level || progression.level == before_level + 1);
                prop_assert!(difficulty.acceleration >= before.acceleration);
                prop_assert!(difficulty.max_speed >= before.max_speed);
                prop_assert!(difficulty.obstacle_speed >= before.obstacle_speed);
                prop_assert!(difficulty.wind_force >= before.wind_force);
                prop_assert!(difficulty.spawn_floor <= before.spawn_floor);
                prop_assert!(difficulty.spawn_floor >= settings.progression.spawn_floor_min);
            }
        }
    }
}
