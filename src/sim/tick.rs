//! Per-frame simulation tick
//!
//! Order within a tick matters and is fixed: input, bounds check, mirror
//! motion, laser-vs-block, mirrors in order, gravity and catches, spawning,
//! lose check, laser advance.

use glam::Vec2;

use super::collision::{catch_outcome, laser_hits_block, reflect};
use super::geometry::aim_angle;
use super::state::{Block, BlockColor, GameEvent, GameState};
use crate::consts::*;

/// Input deltas for a single tick
///
/// Hosts translate raw device events into these; absolute values are applied
/// before relative ones.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire from the turret with its current aim
    pub fire: bool,
    /// Aim at a world point, then fire (mouse click)
    pub fire_at: Option<Vec2>,
    /// Aim the turret at a world point (cursor tracking)
    pub aim_at: Option<Vec2>,
    /// Turret rotation change in degrees
    pub turret_rotation_delta: f32,
    /// Turret height change
    pub turret_y_delta: f32,
    /// Absolute turret height (drag)
    pub turret_y: Option<f32>,
    pub red_bucket_delta: f32,
    pub green_bucket_delta: f32,
    /// Absolute bucket positions (drag)
    pub red_bucket_x: Option<f32>,
    pub green_bucket_x: Option<f32>,
    pub fall_speed_delta: f32,
    pub zoom_delta: f32,
    pub pan_delta: f32,
    /// End the run now
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame
///
/// `now` is the clock reading in seconds, used only by the spawner.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    if state.is_over() {
        return;
    }
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    apply_input(state, &input);

    if input.quit {
        state.finish();
        return;
    }

    state.time_ticks += 1;

    if state.laser.active && !state.laser.in_bounds() {
        state.laser.active = false;
    }

    for mirror in &mut state.mirrors {
        mirror.step();
    }

    laser_block_pass(state);
    mirror_pass(state);
    gravity_pass(state);
    spawn_pass(state, now);

    if state.score < LOSE_BELOW {
        state.finish();
        return;
    }

    state.laser.advance();
}

/// Apply input deltas to turret, buckets, fall speed and camera
fn apply_input(state: &mut GameState, input: &TickInput) {
    if let Some(target) = input.fire_at.or(input.aim_at) {
        let angle = aim_angle(state.turret.origin(), target);
        state.turret.set_rotation(angle);
    }

    if let Some(y) = input.turret_y {
        state.turret.set_y(y);
    }
    if input.turret_y_delta != 0.0 {
        state.turret.set_y(state.turret.y + input.turret_y_delta);
    }
    if input.turret_rotation_delta != 0.0 {
        state
            .turret
            .set_rotation(state.turret.rotation + input.turret_rotation_delta);
    }

    if let Some(x) = input.red_bucket_x {
        state.red_bucket.set_x(x);
    }
    if let Some(x) = input.green_bucket_x {
        state.green_bucket.set_x(x);
    }
    if input.red_bucket_delta != 0.0 {
        state.red_bucket.set_x(state.red_bucket.x + input.red_bucket_delta);
    }
    if input.green_bucket_delta != 0.0 {
        state
            .green_bucket
            .set_x(state.green_bucket.x + input.green_bucket_delta);
    }

    if input.fall_speed_delta != 0.0 {
        state.set_fall_speed(state.fall_speed + input.fall_speed_delta);
    }

    if input.zoom_delta != 0.0 {
        state.camera.zoom_by(input.zoom_delta);
    }
    if input.pan_delta != 0.0 {
        state.camera.pan_by(input.pan_delta);
    }

    if input.fire || input.fire_at.is_some() {
        state.laser.fire(&state.turret);
        state.events.push(GameEvent::LaserFired {
            rotation: state.laser.rotation,
        });
    }
}

/// Destroy the first block the beam touches, then stop the beam
///
/// At most one block per tick; the beam never passes through.
pub fn laser_block_pass(state: &mut GameState) {
    if !state.laser.active {
        return;
    }
    let laser = state.laser;
    let Some(index) = state
        .blocks
        .iter()
        .position(|b| laser_hits_block(laser.pos, laser.rotation, b))
    else {
        return;
    };

    let block = state.blocks.remove(index);
    state.score += SCORE_LASER_HIT;
    state.laser.active = false;
    state.events.push(GameEvent::BlockDestroyed {
        id: block.id,
        color: block.color,
    });
    log::debug!("Laser destroyed {:?} block {} (score {})", block.color, block.id, state.score);
}

/// Test every mirror in order against the beam
///
/// Later mirrors see the pose produced by earlier bounces in the same tick.
pub fn mirror_pass(state: &mut GameState) {
    for (index, mirror) in state.mirrors.iter().enumerate() {
        if !state.laser.active {
            break;
        }
        if let Some(bounce) = reflect(state.laser.pos, state.laser.rotation, mirror) {
            state.laser.pos = bounce.pos;
            state.laser.rotation = bounce.rotation;
            state.events.push(GameEvent::MirrorBounce {
                mirror: index,
                rotation: bounce.rotation,
            });
            log::debug!("Bounce off mirror {} -> {:.1} deg", index + 1, bounce.rotation);
        }
    }
}

/// Drop every block and resolve the ones that reached the catch band
pub fn gravity_pass(state: &mut GameState) {
    let speed = state.fall_speed;
    for block in &mut state.blocks {
        block.pos.y -= speed;
    }

    let red = state.red_bucket;
    let green = state.green_bucket;
    let mut resolved = Vec::new();
    state.blocks.retain(|block| match catch_outcome(block, &red, &green) {
        Some(outcome) => {
            resolved.push((block.id, outcome));
            false
        }
        None => true,
    });

    for (id, outcome) in resolved {
        state.score += outcome.score_delta();
        if outcome.is_mismatch() {
            state.mismatches += 1;
        }
        state.events.push(GameEvent::BlockResolved { id, outcome });
        log::debug!("Block {} resolved: {:?} (score {})", id, outcome, state.score);
    }
}

/// Spawn a block if the interval has elapsed
fn spawn_pass(state: &mut GameState, now: f64) {
    if let Some((x, color)) = state.spawner.poll(now) {
        let id = state.push_block(x, SPAWN_Y, color);
        state.events.push(GameEvent::BlockSpawned { id, color });
        log::debug!("Spawned {:?} block {} at x={:.2}", color, id, x);
    }
}

/// Demo AI: buckets chase their color, the turret shoots black blocks
fn autopilot(state: &GameState, input: &mut TickInput) {
    let lowest = |color: BlockColor| -> Option<&Block> {
        state
            .blocks
            .iter()
            .filter(|b| b.color == color)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    };

    if let Some(block) = lowest(BlockColor::Red) {
        input.red_bucket_x = Some(approach(state.red_bucket.x, block.pos.x, BUCKET_STEP));
    }
    if let Some(block) = lowest(BlockColor::Green) {
        input.green_bucket_x = Some(approach(state.green_bucket.x, block.pos.x, BUCKET_STEP));
    }

    if !state.laser.active {
        if let Some(block) = lowest(BlockColor::Black) {
            // Lead the target by how far it falls while the beam travels
            let distance = block.pos.distance(state.turret.origin());
            let drop = state.fall_speed * distance / LASER_STEP;
            input.fire_at = Some(block.pos - Vec2::new(0.0, drop));
        }
    }
}

/// Move `current` toward `target` by at most `max_step`
fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    current + (target - current).clamp(-max_step, max_step)
}
