//! Mirror Turret - A laser-and-mirrors arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (reflection, collisions, scoring, spawning)
//! - `driver`: Frame loop tying input, clock, simulation and renderer together
//! - `platform`: Clock sources and keyboard/mouse translation
//! - `renderer`: Renderer interface (drawing is host-owned)
//! - `settings`: Tuning file loading

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{Driver, InputSource};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// World bounds: the laser dies once it leaves [-5, 5] on either axis
    pub const WORLD_HALF_EXTENT: f32 = 5.0;

    /// Laser defaults
    pub const LASER_LENGTH: f32 = 0.4;
    /// Distance travelled per tick along the heading
    pub const LASER_STEP: f32 = 0.1;
    /// Turret muzzle x (the laser always starts here)
    pub const TURRET_X: f32 = -4.0;
    pub const TURRET_Y_LIMIT: f32 = 3.5;
    pub const TURRET_ROTATION_LIMIT: f32 = 90.0;
    pub const TURRET_Y_STEP: f32 = 0.1;
    pub const TURRET_ROTATION_STEP: f32 = 3.0;

    /// Mirror defaults
    pub const MIRROR_LENGTH: f32 = 0.8;
    /// Allowed slack in the endpoint distance-sum test
    pub const REFLECT_TOLERANCE: f32 = 0.02;
    pub const MIRROR_OSCILLATION_STEP: f32 = 0.01;
    pub const MIRROR_OSCILLATION_LIMIT: f32 = 2.5;

    /// Block half-extents used by the laser hit test
    pub const BLOCK_HALF_WIDTH: f32 = 0.31;
    pub const BLOCK_HALF_HEIGHT: f32 = 0.21;
    /// Laser hit samples: tip offset, then walk back along x
    pub const HIT_TIP_X: f32 = 0.2;
    pub const HIT_TIP_Y: f32 = 0.01;
    pub const HIT_SAMPLE_STEP: f32 = 0.02;
    pub const HIT_SAMPLE_COUNT: usize = 11; // 0.0 down to -0.2

    /// Catch band (blocks are resolved against the buckets inside it)
    pub const CATCH_BAND_TOP: f32 = -3.1;
    pub const CATCH_BAND_BOTTOM: f32 = -3.9;

    /// Bucket defaults
    pub const BUCKET_HALF_WIDTH: f32 = 0.8;
    pub const BUCKET_BOTTOM: f32 = -4.0;
    pub const BUCKET_HEIGHT: f32 = 0.8;
    pub const BUCKET_LIMIT: f32 = 2.5;
    pub const BUCKET_STEP: f32 = 0.1;
    pub const RED_BUCKET_START: f32 = 1.5;
    pub const GREEN_BUCKET_START: f32 = -1.5;

    /// Falling blocks
    pub const SPAWN_Y: f32 = 4.5;
    pub const SPAWN_INTERVAL_SECS: f64 = 3.0;
    pub const FALL_SPEED: f32 = 0.010;
    pub const FALL_SPEED_MIN: f32 = 0.005;
    pub const FALL_SPEED_MAX: f32 = 0.020;
    pub const FALL_SPEED_STEP: f32 = 0.001;

    /// Scoring
    pub const SCORE_LASER_HIT: i32 = 30;
    pub const SCORE_CATCH: i32 = 20;
    pub const PENALTY_WRONG_BUCKET: i32 = 30;
    pub const PENALTY_BLACK_CAUGHT: i32 = 50;
    pub const PENALTY_BLACK_MISSED: i32 = 10;
    /// Game ends as soon as the score drops below this
    pub const LOSE_BELOW: i32 = -20;
    /// Score needed for a win when the game ends
    pub const WIN_SCORE: i32 = 100;

    /// Camera limits
    pub const ZOOM_MIN: f32 = 1.0;
    pub const ZOOM_MAX: f32 = 2.0;
    pub const ZOOM_KEY_STEP: f32 = 0.1;
    pub const ZOOM_SCROLL_STEP: f32 = 0.03;
    pub const PAN_MIN: f32 = -4.0;
    pub const PAN_MAX: f32 = 3.0;
    pub const PAN_STEP: f32 = 0.1;

    /// Default frame rate for the stepped clock
    pub const FRAME_RATE: f64 = 60.0;
}
