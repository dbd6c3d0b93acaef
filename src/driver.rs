//! Frame loop
//!
//! Polls input, reads the clock, ticks the simulation and hands the state to
//! the renderer, once per frame, until the run ends.

use crate::platform::Clock;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameOutcome, GamePhase, GameState, Spawner, TickInput, tick};

/// Supplies the input deltas for the next frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Autopilot input that quits after a frame budget
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub quit_after: Option<u64>,
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        TickInput {
            idle_mode: true,
            quit: self.quit_after.is_some_and(|limit| state.time_ticks >= limit),
            ..Default::default()
        }
    }
}

/// Replays a fixed list of inputs, then idles (or quits when `quit_when_done`)
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    inputs: std::collections::VecDeque<TickInput>,
    quit_when_done: bool,
}

impl Scripted {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>, quit_when_done: bool) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            quit_when_done,
        }
    }

    /// No input at all; quits after `frames` when given, otherwise never
    pub fn idle_for(frames: Option<u64>) -> Self {
        let count = frames.unwrap_or(0) as usize;
        Self::new(vec![TickInput::default(); count], frames.is_some())
    }
}

impl InputSource for Scripted {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.inputs.pop_front().unwrap_or_else(|| TickInput {
            quit: self.quit_when_done,
            ..Default::default()
        })
    }
}

/// Owns the game state and the clock for one run
pub struct Driver<C: Clock> {
    pub state: GameState,
    clock: C,
}

impl<C: Clock> Driver<C> {
    /// Start a run; the spawn interval counts from the clock's current reading
    pub fn new(settings: &Settings, clock: C) -> Self {
        let seed = settings.resolve_seed();
        let spawner = Spawner::new(seed, settings.spawn_interval_secs, clock.now());
        let mut state = GameState::with_spawner(spawner);
        state.set_fall_speed(settings.effective_fall_speed());
        log::info!("New game (seed {seed})");
        Self { state, clock }
    }

    /// Simulate one frame; returns the outcome once the run has ended
    pub fn step(&mut self, input: &TickInput) -> Option<GameOutcome> {
        tick(&mut self.state, input, self.clock.now());
        self.clock.end_frame();
        match self.state.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            GamePhase::Playing => None,
        }
    }

    /// Run until quit or the score threshold ends the game
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> GameOutcome
    where
        I: InputSource,
        R: Renderer,
    {
        loop {
            let frame_input = input.poll(&self.state);
            let outcome = self.step(&frame_input);
            renderer.draw(&self.state);
            if let Some(outcome) = outcome {
                return outcome;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FrameClock;
    use crate::renderer::LogRenderer;
    use crate::sim::BlockColor;

    fn settings() -> Settings {
        Settings {
            seed: Some(77),
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_reports_outcome() {
        let mut driver = Driver::new(&settings(), FrameClock::new(60.0));
        let mut input = Scripted::new(Vec::new(), true);
        let mut renderer = LogRenderer::new(1000);

        let outcome = driver.run(&mut input, &mut renderer);
        assert_eq!(outcome, GameOutcome::Lost);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut driver = Driver::new(&settings(), FrameClock::new(60.0));
        let idle = TickInput::default();

        // Clock reads 0.0 .. 2.983 over the first 180 frames
        for _ in 0..180 {
            driver.step(&idle);
        }
        assert!(driver.state.blocks.is_empty());

        driver.step(&idle);
        assert_eq!(driver.state.blocks.len(), 1);
    }

    #[test]
    fn test_score_threshold_ends_run() {
        let mut driver = Driver::new(&settings(), FrameClock::new(60.0));
        let green_x = driver.state.green_bucket.x;
        driver.state.push_block(green_x, -3.45, BlockColor::Black);

        let mut input = Scripted::new(Vec::new(), false);
        let mut renderer = LogRenderer::new(1000);
        let outcome = driver.run(&mut input, &mut renderer);

        assert_eq!(outcome, GameOutcome::Lost);
        assert_eq!(driver.state.score, -50);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_autopilot_respects_frame_budget() {
        let mut driver = Driver::new(&settings(), FrameClock::new(60.0));
        let mut input = Autopilot {
            quit_after: Some(600),
        };
        let mut renderer = LogRenderer::new(1000);
        driver.run(&mut input, &mut renderer);

        assert!(driver.state.time_ticks <= 600);
        assert!(driver.state.is_over());
    }

    #[test]
    fn test_idle_for_budget() {
        let state = GameState::new(1, 0.0);

        let mut bounded = Scripted::idle_for(Some(3));
        for _ in 0..3 {
            assert!(!bounded.poll(&state).quit);
        }
        assert!(bounded.poll(&state).quit);

        let mut unbounded = Scripted::idle_for(None);
        for _ in 0..1000 {
            assert!(!unbounded.poll(&state).quit);
        }
    }

    #[test]
    fn test_settings_fall_speed_applied() {
        let settings = Settings {
            fall_speed: 0.015,
            ..settings()
        };
        let driver = Driver::new(&settings, FrameClock::new(60.0));
        assert_eq!(driver.state.fall_speed, 0.015);
    }
}
