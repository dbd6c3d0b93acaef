//! Rendering interface
//!
//! Drawing is host-owned. The simulation hands the host a `&GameState` once
//! per frame; `LogRenderer` is the headless stand-in that reports a HUD line
//! through the log.

use crate::sim::{GamePhase, GameState};

/// Draws one frame of the current state
pub trait Renderer {
    fn draw(&mut self, state: &GameState);
}

/// Logs a HUD summary every `every` frames
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
    last_score: i32,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
            last_score: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, state: &GameState) {
        self.frames += 1;

        if state.score != self.last_score {
            log::debug!("Score {} -> {}", self.last_score, state.score);
            self.last_score = state.score;
        }

        if self.frames.is_multiple_of(self.every) || matches!(state.phase, GamePhase::GameOver(_)) {
            log::info!("{}", hud_line(state));
        }
    }
}

/// One-line HUD text
pub fn hud_line(state: &GameState) -> String {
    let laser = if state.laser.active {
        format!(
            "({:.2}, {:.2}) @ {:.0} deg",
            state.laser.pos.x, state.laser.pos.y, state.laser.rotation
        )
    } else {
        "idle".to_string()
    };
    format!(
        "frame {} | score {} | blocks {} | black caught {} | laser {} | speed {:.3}",
        state.time_ticks,
        state.score,
        state.blocks.len(),
        state.mismatches,
        laser,
        state.fall_speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_line() {
        let mut state = GameState::new(3, 0.0);
        state.score = 40;
        state.push_block(0.0, 1.0, crate::sim::BlockColor::Red);
        let line = hud_line(&state);
        assert!(line.contains("score 40"));
        assert!(line.contains("blocks 1"));
        assert!(line.contains("laser idle"));
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let state = GameState::new(3, 0.0);
        let mut renderer = LogRenderer::new(0);
        for _ in 0..5 {
            renderer.draw(&state);
        }
        assert_eq!(renderer.frames(), 5);
    }
}
