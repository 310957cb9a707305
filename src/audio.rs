//! Audio collaborator
//!
//! The simulation only raises [`GameEvent`]s; this module turns a tick's
//! events into sound effects and keeps background music going. Actual
//! playback is delegated to an [`AudioSink`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::AudioSettings;
use crate::sim::{GameEvent, GamePhase};

/// Number of interchangeable background tracks
pub const MUSIC_TRACKS: usize = 5;

/// Music volume multiplier while paused
const PAUSED_MUSIC_DUCK: f32 = 0.4;
/// Music volume multiplier on the game-over screen
const GAME_OVER_MUSIC_DUCK: f32 = 0.3;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Start button pressed
    Start,
    /// Play again after game over
    PlayAgain,
    /// Game paused
    Pause,
    /// Game resumed
    Unpause,
    /// Level gained (two variants, picked at random)
    LevelUpA,
    LevelUpB,
    /// Obstacle slipped past closely
    NearMiss,
    /// Gust begins
    Wind,
    /// Player wrapped or is scraping a wall
    WallHit,
    /// Run ended
    GameOver,
    /// Run ended with a new best score
    HighScore,
}

/// Playback backend
pub trait AudioSink {
    /// Fire a one-shot effect
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Start (or restart) a background track
    fn play_music(&mut self, track: usize, volume: f32);
    /// Adjust the volume of the current track
    fn set_music_volume(&mut self, volume: f32);
    /// Whether a background track is still playing
    fn music_playing(&self) -> bool;
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    rng: Pcg32,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current_track: Option<usize>,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &AudioSettings, seed: u64) -> Self {
        Self {
            sink,
            rng: Pcg32::seed_from_u64(seed),
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: settings.muted,
            current_track: None,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn current_track(&self) -> Option<usize> {
        self.current_track
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effect_for(&mut self, event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Reset => Some(SoundEffect::PlayAgain),
            GameEvent::Paused => Some(SoundEffect::Pause),
            GameEvent::Resumed => Some(SoundEffect::Unpause),
            GameEvent::WallWrap | GameEvent::NearWall => Some(SoundEffect::WallHit),
            GameEvent::NearMiss => Some(SoundEffect::NearMiss),
            GameEvent::LevelUp { .. } => Some(if self.rng.random_bool(0.5) {
                SoundEffect::LevelUpA
            } else {
                SoundEffect::LevelUpB
            }),
            GameEvent::GustStarted { .. } => Some(SoundEffect::Wind),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::WindWarning { .. } | GameEvent::GustEnded => None,
        }
    }

    /// Play the effects for one tick's events, each effect at most once
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        let vol = self.effective_volume();
        let mut played: Vec<SoundEffect> = Vec::with_capacity(events.len());
        for event in events {
            let Some(effect) = self.effect_for(event) else {
                continue;
            };
            if played.contains(&effect) {
                continue;
            }
            played.push(effect);
            if vol > 0.0 {
                self.sink.play(effect, vol);
            }
        }
    }

    /// Keep background music running and duck it outside active play
    pub fn update_music(&mut self, phase: GamePhase) {
        let duck = match phase {
            GamePhase::Paused => PAUSED_MUSIC_DUCK,
            GamePhase::GameOver => GAME_OVER_MUSIC_DUCK,
            GamePhase::NotStarted | GamePhase::Running => 1.0,
        };
        let volume = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * duck
        };

        if phase == GamePhase::NotStarted {
            return;
        }
        if self.current_track.is_none() || !self.sink.music_playing() {
            let track = self.rng.random_range(0..MUSIC_TRACKS);
            log::debug!("Background track {}", track);
            self.current_track = Some(track);
            self.sink.play_music(track, volume);
        } else {
            self.sink.set_music_volume(volume);
        }
    }
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink {
    track: Option<usize>,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: usize, volume: f32) {
        log::debug!("music track {} @ {:.2}", track, volume);
        self.track = Some(track);
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::trace!("music volume {:.2}", volume);
    }

    fn music_playing(&self) -> bool {
        self.track.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WindDirection;

    #[derive(Default)]
    struct RecordingSink {
        effects: Vec<(SoundEffect, f32)>,
        tracks: Vec<usize>,
        music_volume: f32,
        playing: bool,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.effects.push((effect, volume));
        }

        fn play_music(&mut self, track: usize, volume: f32) {
            self.tracks.push(track);
            self.music_volume = volume;
            self.playing = true;
        }

        fn set_music_volume(&mut self, volume: f32) {
            self.music_volume = volume;
        }

        fn music_playing(&self) -> bool {
            self.playing
        }
    }

    fn manager() -> AudioManager<RecordingSink> {
        AudioManager::new(RecordingSink::default(), &AudioSettings::default(), 1)
    }

    fn played(manager: &AudioManager<RecordingSink>) -> Vec<SoundEffect> {
        manager.sink().effects.iter().map(|(e, _)| *e).collect()
    }

    #[test]
    fn test_wall_events_share_one_playback() {
        let mut audio = manager();
        audio.handle_events(&[GameEvent::WallWrap, GameEvent::NearWall, GameEvent::NearMiss]);
        assert_eq!(played(&audio), vec![SoundEffect::WallHit, SoundEffect::NearMiss]);
    }

    #[test]
    fn test_visual_only_events_are_silent() {
        let mut audio = manager();
        audio.handle_events(&[
            GameEvent::WindWarning {
                direction: WindDirection::Left,
            },
            GameEvent::GustEnded,
        ]);
        assert!(played(&audio).is_empty());
    }

    #[test]
    fn test_level_up_picks_a_variant() {
        let mut audio = manager();
        for level in 2..40 {
            audio.handle_events(&[GameEvent::LevelUp { level }]);
        }
        let effects = played(&audio);
        assert!(effects.contains(&SoundEffect::LevelUpA));
        assert!(effects.contains(&SoundEffect::LevelUpB));
    }

    #[test]
    fn test_mute_suppresses_playback() {
        let mut audio = manager();
        audio.set_muted(true);
        audio.handle_events(&[GameEvent::Started]);
        assert!(played(&audio).is_empty());
    }

    #[test]
    fn test_volume_is_master_times_sfx() {
        let mut audio = manager();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.handle_events(&[GameEvent::GameOver { score: 10 }]);
        assert_eq!(audio.sink().effects, vec![(SoundEffect::GameOver, 0.25)]);
    }

    #[test]
    fn test_music_starts_once_and_ducks() {
        let mut audio = manager();
        audio.update_music(GamePhase::NotStarted);
        assert!(audio.sink().tracks.is_empty());

        audio.update_music(GamePhase::Running);
        assert_eq!(audio.sink().tracks.len(), 1);
        assert!(audio.current_track().unwrap() < MUSIC_TRACKS);
        let full = audio.sink().music_volume;

        audio.update_music(GamePhase::Paused);
        assert_eq!(audio.sink().tracks.len(), 1);
        assert!((audio.sink().music_volume - full * 0.4).abs() < 1e-6);

        audio.update_music(GamePhase::GameOver);
        assert!((audio.sink().music_volume - full * 0.3).abs() < 1e-6);
    }
}
