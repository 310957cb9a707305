//! Gust Dodger headless runner
//!
//! Drives autopilot sessions through the fixed-timestep loop and reports the
//! resulting score table. Rendering and input wiring live with the host.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use gust_dodger::audio::{AudioManager, LogSink};
use gust_dodger::consts::{MAX_SUBSTEPS, SIM_DT};
use gust_dodger::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use gust_dodger::Settings;

#[derive(Debug, Parser)]
#[command(name = "gust-dodger")]
#[command(about = "Run Gust Dodger sessions on autopilot and print the score table")]
struct Cli {
    /// Number of runs to play
    #[arg(long, default_value_t = 5)]
    sessions: u32,
    /// RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Give up on a run after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_ticks: u64,
    /// JSON settings file (partial documents allowed)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the effective settings as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_config: bool,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager<LogSink>,
    accumulator: f32,
    input: TickInput,
    runs_finished: u32,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        let audio = AudioManager::new(LogSink::default(), &settings.audio, seed ^ 0x5eed);
        Self {
            state: GameState::new(seed, settings),
            audio,
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            runs_finished: 0,
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.audio.handle_events(&self.state.events);
            self.audio.update_music(self.state.phase);
            if self.state.events.iter().any(|e| {
                matches!(e, GameEvent::GameOver { .. } | GameEvent::NewHighScore { .. })
            }) {
                self.runs_finished += 1;
            }
        }
    }

    /// Force the current run to end (tick cap reached)
    fn abandon_run(&mut self) {
        let score = self.state.score();
        let level = self.state.level();
        log::warn!("Run abandoned at tick {} with score {}", self.state.time_ticks, score);
        self.state.high_scores.record(score, level);
        self.state.reset();
        self.runs_finished += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if cli.dump_config {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    let mut game = Game::new(cli.seed, settings);
    // Uneven frame times exercise the accumulator the way a display callback would
    let frame_times = [1.0 / 60.0, 1.0 / 58.0, 1.0 / 62.0, 1.0 / 30.0];
    let mut frame = 0usize;

    while game.runs_finished < cli.sessions {
        game.update(frame_times[frame % frame_times.len()]);
        frame += 1;

        if game.state.phase == GamePhase::Running && game.state.time_ticks >= cli.max_ticks {
            game.abandon_run();
        }
    }

    log::info!("Finished {} runs over {} frames", game.runs_finished, frame);
    let table = game.state.high_scores.top(cli.sessions as usize);
    println!(
        "{}",
        serde_json::to_string_pretty(&table).context("serializing score table")?
    );
    Ok(())
}
