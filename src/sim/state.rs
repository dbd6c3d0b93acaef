//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Segment, heading};
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (quit or score below the threshold)
    GameOver(GameOutcome),
}

/// How a finished run is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl GameOutcome {
    /// Outcome for a final score
    pub fn from_score(score: i32) -> Self {
        if score >= WIN_SCORE {
            GameOutcome::Won
        } else {
            GameOutcome::Lost
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Won => write!(f, "YOU WON"),
            GameOutcome::Lost => write!(f, "YOU LOST"),
        }
    }
}

/// Block colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    Red,
    Green,
    Black,
}

impl BlockColor {
    /// Map a roll in 0..3 to a color (anything else is Black)
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => BlockColor::Red,
            1 => BlockColor::Green,
            _ => BlockColor::Black,
        }
    }
}

/// A falling block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Block centre
    pub pos: Vec2,
    pub color: BlockColor,
}

/// The turret's laser beam
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Laser {
    /// Origin of the beam segment (the leading point is half a length ahead)
    pub pos: Vec2,
    /// Heading in degrees
    pub rotation: f32,
    pub active: bool,
}

impl Default for Laser {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            rotation: 0.0,
            active: false,
        }
    }
}

impl Laser {
    /// Forward tip of the beam
    pub fn leading_point(&self) -> Vec2 {
        self.pos + heading(self.rotation) * (LASER_LENGTH / 2.0)
    }

    /// Start a fresh beam from the turret muzzle
    pub fn fire(&mut self, turret: &Turret) {
        self.pos = Vec2::new(TURRET_X, turret.y);
        self.rotation = turret.rotation;
        self.active = true;
    }

    pub fn in_bounds(&self) -> bool {
        self.pos.x >= -WORLD_HALF_EXTENT
            && self.pos.x <= WORLD_HALF_EXTENT
            && self.pos.y >= -WORLD_HALF_EXTENT
            && self.pos.y <= WORLD_HALF_EXTENT
    }

    /// Move one step along the heading
    pub fn advance(&mut self) {
        if self.active {
            self.pos += heading(self.rotation) * LASER_STEP;
        }
    }
}

/// How a mirror moves over time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MirrorMotion {
    Fixed,
    /// Centre y bounces between -limit and +limit
    PingPong { step: f32, limit: f32 },
}

/// A reflecting mirror
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub center: Vec2,
    /// Tilt in degrees
    pub angle: f32,
    pub length: f32,
    pub motion: MirrorMotion,
}

impl Mirror {
    pub fn fixed(x: f32, y: f32, angle: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            angle,
            length: MIRROR_LENGTH,
            motion: MirrorMotion::Fixed,
        }
    }

    pub fn oscillating(x: f32, y: f32, angle: f32) -> Self {
        Self {
            motion: MirrorMotion::PingPong {
                step: MIRROR_OSCILLATION_STEP,
                limit: MIRROR_OSCILLATION_LIMIT,
            },
            ..Self::fixed(x, y, angle)
        }
    }

    pub fn segment(&self) -> Segment {
        Segment::from_center(self.center, self.angle, self.length)
    }

    /// Advance oscillation by one tick
    pub fn step(&mut self) {
        if let MirrorMotion::PingPong { step, limit } = self.motion {
            self.center.y += step;
            if self.center.y > limit {
                self.center.y = limit - (self.center.y - limit);
                self.motion = MirrorMotion::PingPong { step: -step, limit };
            } else if self.center.y < -limit {
                self.center.y = -limit + (-limit - self.center.y);
                self.motion = MirrorMotion::PingPong { step: -step, limit };
            }
        }
    }
}

/// The four mirrors in their fixed evaluation order
pub fn default_mirrors() -> [Mirror; 4] {
    [
        Mirror::fixed(-1.7, 2.0, 135.0),
        Mirror::fixed(-0.3, -1.0, 45.0),
        Mirror::fixed(1.7, 3.0, 0.0),
        Mirror::oscillating(2.7, 0.2, 90.0),
    ]
}

/// Bucket identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BucketKind {
    Red,
    Green,
}

/// A catching bucket (fixed y, moves horizontally)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bucket {
    pub kind: BucketKind,
    pub x: f32,
}

impl Bucket {
    pub fn new(kind: BucketKind, x: f32) -> Self {
        Self { kind, x }
    }

    /// Move to `x`, clamped to the playfield
    pub fn set_x(&mut self, x: f32) {
        self.x = x.clamp(-BUCKET_LIMIT, BUCKET_LIMIT);
    }

    /// Whether a block at `x` lands in this bucket
    pub fn covers(&self, x: f32) -> bool {
        (x - self.x).abs() <= BUCKET_HALF_WIDTH
    }

    /// Pointer hit box (the drawn bucket rectangle)
    pub fn hit(&self, p: Vec2) -> bool {
        self.covers(p.x) && p.y >= BUCKET_BOTTOM && p.y <= BUCKET_BOTTOM + BUCKET_HEIGHT
    }
}

/// The laser turret on the left edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Turret {
    pub y: f32,
    /// Aim in degrees
    pub rotation: f32,
}

impl Default for Turret {
    fn default() -> Self {
        Self {
            y: 0.0,
            rotation: 0.0,
        }
    }
}

impl Turret {
    pub fn set_y(&mut self, y: f32) {
        self.y = y.clamp(-TURRET_Y_LIMIT, TURRET_Y_LIMIT);
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.clamp(-TURRET_ROTATION_LIMIT, TURRET_ROTATION_LIMIT);
    }

    /// Muzzle position
    pub fn origin(&self) -> Vec2 {
        Vec2::new(TURRET_X, self.y)
    }

    /// Pointer hit box (the barrel)
    pub fn hit(&self, p: Vec2) -> bool {
        p.x >= TURRET_X && p.x <= 0.5 && p.y >= self.y - 0.3 && p.y <= self.y + 0.3
    }
}

/// View state for the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f32,
    pub pan_x: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: ZOOM_MIN,
            pan_x: 0.0,
        }
    }
}

impl Camera {
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn pan_by(&mut self, delta: f32) {
        self.pan_x = (self.pan_x + delta).clamp(PAN_MIN, PAN_MAX);
    }
}

/// Something the host may want to react to (sounds, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    LaserFired { rotation: f32 },
    MirrorBounce { mirror: usize, rotation: f32 },
    BlockDestroyed { id: u32, color: BlockColor },
    BlockResolved { id: u32, outcome: super::collision::CatchOutcome },
    BlockSpawned { id: u32, color: BlockColor },
    GameOver { outcome: GameOutcome, score: i32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub score: i32,
    /// Black blocks caught in a bucket
    pub mismatches: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// How far blocks fall per tick
    pub fall_speed: f32,
    pub turret: Turret,
    pub laser: Laser,
    /// Evaluated in order every tick
    pub mirrors: [Mirror; 4],
    pub red_bucket: Bucket,
    pub green_bucket: Bucket,
    /// Falling blocks in spawn order
    pub blocks: Vec<Block>,
    pub camera: Camera,
    pub spawner: Spawner,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// New game; `start_time` is the clock reading the spawn interval counts from
    pub fn new(seed: u64, start_time: f64) -> Self {
        Self::with_spawner(Spawner::new(seed, SPAWN_INTERVAL_SECS, start_time))
    }

    pub fn with_spawner(spawner: Spawner) -> Self {
        Self {
            score: 0,
            mismatches: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            fall_speed: FALL_SPEED,
            turret: Turret::default(),
            laser: Laser::default(),
            mirrors: default_mirrors(),
            red_bucket: Bucket::new(BucketKind::Red, RED_BUCKET_START),
            green_bucket: Bucket::new(BucketKind::Green, GREEN_BUCKET_START),
            blocks: Vec::new(),
            camera: Camera::default(),
            spawner,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a block and return its id
    pub fn push_block(&mut self, x: f32, y: f32, color: BlockColor) -> u32 {
        let id = self.next_entity_id();
        self.blocks.push(Block {
            id,
            pos: Vec2::new(x, y),
            color,
        });
        id
    }

    pub fn set_fall_speed(&mut self, speed: f32) {
        self.fall_speed = speed.clamp(FALL_SPEED_MIN, FALL_SPEED_MAX);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// End the run, reporting the outcome for the current score
    pub fn finish(&mut self) -> GameOutcome {
        if let GamePhase::GameOver(outcome) = self.phase {
            return outcome;
        }
        let outcome = GameOutcome::from_score(self.score);
        self.phase = GamePhase::GameOver(outcome);
        self.events.push(GameEvent::GameOver {
            outcome,
            score: self.score,
        });
        log::info!("Game over: {} (score {})", outcome, self.score);
        outcome
    }
}
