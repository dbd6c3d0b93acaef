//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, time only through the `now` argument
//! - Seeded RNG only
//! - Stable iteration order (spawn order for blocks, fixed order for mirrors)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Bounce, CatchOutcome, catch_outcome, laser_hits_block, reflect};
pub use geometry::{Segment, Viewport};
pub use spawner::Spawner;
pub use state::{
    Block, BlockColor, Bucket, BucketKind, Camera, GameEvent, GameOutcome, GamePhase, GameState,
    Laser, Mirror, MirrorMotion, Turret,
};
pub use tick::{TickInput, tick};
