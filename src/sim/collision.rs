//! Laser reflection, laser hits and bucket catches
//!
//! The mirror test is deliberately approximate: the beam's leading point
//! bounces when the sum of its distances to the mirror endpoints is within
//! `REFLECT_TOLERANCE` of the mirror length. The heading is then mirrored
//! about the mirror line (`2 * angle - rotation`).

use glam::Vec2;
use serde::Serialize;

use super::geometry::heading;
use super::state::{Block, BlockColor, Bucket, BucketKind, Mirror};
use crate::consts::*;

/// New beam pose after a bounce
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Heading in degrees
    pub rotation: f32,
    /// New beam origin
    pub pos: Vec2,
}

/// Reflect a beam at `laser_pos` heading `rotation` off `mirror`
///
/// Returns `None` when the leading point is not on the mirror. On a hit the
/// beam is re-seated half a length past the leading point along the new
/// heading, so one call applies exactly one bounce.
pub fn reflect(laser_pos: Vec2, rotation: f32, mirror: &Mirror) -> Option<Bounce> {
    let half = LASER_LENGTH / 2.0;
    let lead = laser_pos + heading(rotation) * half;

    if !mirror.segment().contains_approx(lead, REFLECT_TOLERANCE) {
        return None;
    }

    let rotation = 2.0 * mirror.angle - rotation;
    Some(Bounce {
        rotation,
        pos: lead + heading(rotation) * half,
    })
}

/// Sample points near the beam tip used for block hits
///
/// The first sample sits `HIT_TIP_X` ahead of the origin; the rest walk back
/// along x in `HIT_SAMPLE_STEP` increments.
pub fn hit_samples(laser_pos: Vec2, rotation: f32) -> impl Iterator<Item = Vec2> {
    let dir = heading(rotation);
    let tip = Vec2::new(
        laser_pos.x + HIT_TIP_X * dir.x,
        laser_pos.y + HIT_TIP_Y * dir.y,
    );
    (0..HIT_SAMPLE_COUNT).map(move |i| tip - Vec2::new(i as f32 * HIT_SAMPLE_STEP, 0.0))
}

/// Whether `p` lies inside the block's hit box
#[inline]
pub fn point_in_block(p: Vec2, block: &Block) -> bool {
    (p.x - block.pos.x).abs() <= BLOCK_HALF_WIDTH && (p.y - block.pos.y).abs() <= BLOCK_HALF_HEIGHT
}

/// Whether any hit sample of the beam lands on `block`
pub fn laser_hits_block(laser_pos: Vec2, rotation: f32, block: &Block) -> bool {
    hit_samples(laser_pos, rotation).any(|p| point_in_block(p, block))
}

/// Result of a block reaching the catch band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CatchOutcome {
    /// Colored block landed in its own bucket
    Caught { bucket: BucketKind },
    /// Colored block landed in the other bucket
    WrongBucket { bucket: BucketKind },
    /// Black block landed in a bucket
    BlackCaught { bucket: BucketKind },
    /// Black block missed both buckets
    BlackMissed,
    /// Colored block missed both buckets
    Missed,
}

impl CatchOutcome {
    pub fn score_delta(&self) -> i32 {
        match self {
            CatchOutcome::Caught { .. } => SCORE_CATCH,
            CatchOutcome::WrongBucket { .. } => -PENALTY_WRONG_BUCKET,
            CatchOutcome::BlackCaught { .. } => -PENALTY_BLACK_CAUGHT,
            CatchOutcome::BlackMissed => -PENALTY_BLACK_MISSED,
            CatchOutcome::Missed => 0,
        }
    }

    /// Counts toward the mismatch tally
    pub fn is_mismatch(&self) -> bool {
        matches!(self, CatchOutcome::BlackCaught { .. })
    }
}

/// Where a block's y sits relative to the catch band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    Above,
    Inside,
    Below,
}

pub fn band_position(y: f32) -> BandPosition {
    if y > CATCH_BAND_TOP {
        BandPosition::Above
    } else if y >= CATCH_BAND_BOTTOM {
        BandPosition::Inside
    } else {
        BandPosition::Below
    }
}

/// Resolve a block against the buckets
///
/// `None` while the block is still above the band. A block that skipped past
/// the band is a miss. The matching bucket always takes priority, so a
/// colored block overlapping both buckets counts as caught.
pub fn catch_outcome(block: &Block, red: &Bucket, green: &Bucket) -> Option<CatchOutcome> {
    match band_position(block.pos.y) {
        BandPosition::Above => return None,
        BandPosition::Below => {
            return Some(match block.color {
                BlockColor::Black => CatchOutcome::BlackMissed,
                _ => CatchOutcome::Missed,
            });
        }
        BandPosition::Inside => {}
    }

    let x = block.pos.x;
    let outcome = match block.color {
        BlockColor::Red | BlockColor::Green => {
            let (own, other) = if block.color == BlockColor::Red {
                (red, green)
            } else {
                (green, red)
            };
            if own.covers(x) {
                CatchOutcome::Caught { bucket: own.kind }
            } else if other.covers(x) {
                CatchOutcome::WrongBucket { bucket: other.kind }
            } else {
                CatchOutcome::Missed
            }
        }
        BlockColor::Black => {
            if green.covers(x) {
                CatchOutcome::BlackCaught { bucket: green.kind }
            } else if red.covers(x) {
                CatchOutcome::BlackCaught { bucket: red.kind }
            } else {
                CatchOutcome::BlackMissed
            }
        }
    };
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(x: f32, y: f32, color: BlockColor) -> Block {
        Block {
            id: 1,
            pos: Vec2::new(x, y),
            color,
        }
    }

    fn buckets() -> (Bucket, Bucket) {
        (
            Bucket::new(BucketKind::Red, RED_BUCKET_START),
            Bucket::new(BucketKind::Green, GREEN_BUCKET_START),
        )
    }

    #[test]
    fn test_reflect_on_mirror_center() {
        let mirror = Mirror::fixed(-1.7, 2.0, 135.0);
        let rotation = 30.0;
        // Place the beam so its leading point is exactly the mirror centre
        let laser_pos = mirror.center - heading(rotation) * (LASER_LENGTH / 2.0);

        let bounce = reflect(laser_pos, rotation, &mirror).expect("should bounce");
        assert_eq!(bounce.rotation, 2.0 * 135.0 - 30.0);

        let expected = mirror.center + heading(bounce.rotation) * (LASER_LENGTH / 2.0);
        assert!((bounce.pos - expected).length() < 1e-5);
    }

    #[test]
    fn test_reflect_horizontal_mirror_flips_vertical() {
        let mirror = Mirror::fixed(1.7, 3.0, 0.0);
        let laser_pos = Vec2::new(1.7, 3.0) - heading(60.0) * 0.2;
        let bounce = reflect(laser_pos, 60.0, &mirror).expect("should bounce");
        assert_eq!(bounce.rotation, -60.0);
        // Now heading down-right, away from the mirror
        assert!(bounce.pos.y < 3.0);
    }

    #[test]
    fn test_reflect_miss() {
        let mirror = Mirror::fixed(-0.3, -1.0, 45.0);
        assert!(reflect(Vec2::new(3.0, 3.0), 0.0, &mirror).is_none());
        // Just beyond a mirror endpoint on its own line
        let past_end = mirror.segment().a + heading(45.0) * 0.15;
        let laser_pos = past_end - heading(45.0) * 0.2;
        assert!(reflect(laser_pos, 45.0, &mirror).is_none());
    }

    #[test]
    fn test_hit_samples_span() {
        let samples: Vec<Vec2> = hit_samples(Vec2::ZERO, 0.0).collect();
        assert_eq!(samples.len(), HIT_SAMPLE_COUNT);
        assert!((samples[0].x - 0.2).abs() < 1e-6);
        assert!(samples[HIT_SAMPLE_COUNT - 1].x.abs() < 1e-6);
    }

    #[test]
    fn test_laser_hits_block() {
        let target = block(0.0, 2.0, BlockColor::Black);
        // Tip reaches x = -0.2, inside the 0.31 half-width
        assert!(laser_hits_block(Vec2::new(-0.4, 2.0), 0.0, &target));
        // Tip at x = -0.8, well short
        assert!(!laser_hits_block(Vec2::new(-1.0, 2.0), 0.0, &target));
        // Level with the block but too high
        assert!(!laser_hits_block(Vec2::new(-0.4, 2.3), 0.0, &target));
    }

    #[test]
    fn test_band_position() {
        assert_eq!(band_position(-3.0), BandPosition::Above);
        assert_eq!(band_position(-3.1), BandPosition::Inside);
        assert_eq!(band_position(-3.5), BandPosition::Inside);
        assert_eq!(band_position(-3.9), BandPosition::Inside);
        assert_eq!(band_position(-4.0), BandPosition::Below);
    }

    #[test]
    fn test_catch_matching_bucket() {
        let (red, green) = buckets();
        let outcome = catch_outcome(&block(1.5, -3.5, BlockColor::Red), &red, &green);
        assert_eq!(outcome, Some(CatchOutcome::Caught { bucket: BucketKind::Red }));
        assert_eq!(outcome.map(|o| o.score_delta()), Some(20));

        let outcome = catch_outcome(&block(-1.0, -3.5, BlockColor::Green), &red, &green);
        assert_eq!(outcome, Some(CatchOutcome::Caught { bucket: BucketKind::Green }));
    }

    #[test]
    fn test_red_block_in_green_bucket_subtracts_rather_than_resets_score() {
        // The red-in-green branch must subtract 30 like the green-in-red one,
        // not assign -30 to the score.
        let (red, green) = buckets();
        let outcome = catch_outcome(&block(-1.5, -3.5, BlockColor::Red), &red, &green)
            .expect("in band");
        assert_eq!(outcome, CatchOutcome::WrongBucket { bucket: BucketKind::Green });
        assert_eq!(outcome.score_delta(), -30);

        let outcome = catch_outcome(&block(1.5, -3.5, BlockColor::Green), &red, &green)
            .expect("in band");
        assert_eq!(outcome, CatchOutcome::WrongBucket { bucket: BucketKind::Red });
        assert_eq!(outcome.score_delta(), -30);
    }

    #[test]
    fn test_overlapping_buckets_prefer_matching() {
        let red = Bucket::new(BucketKind::Red, 0.2);
        let green = Bucket::new(BucketKind::Green, -0.2);
        let outcome = catch_outcome(&block(0.0, -3.5, BlockColor::Green), &red, &green);
        assert_eq!(outcome, Some(CatchOutcome::Caught { bucket: BucketKind::Green }));
    }

    #[test]
    fn test_black_blocks() {
        let (red, green) = buckets();
        let caught = catch_outcome(&block(1.5, -3.5, BlockColor::Black), &red, &green)
            .expect("in band");
        assert_eq!(caught, CatchOutcome::BlackCaught { bucket: BucketKind::Red });
        assert_eq!(caught.score_delta(), -50);
        assert!(caught.is_mismatch());

        let missed = catch_outcome(&block(0.0, -3.5, BlockColor::Black), &red, &green)
            .expect("in band");
        assert_eq!(missed, CatchOutcome::BlackMissed);
        assert_eq!(missed.score_delta(), -10);
        assert!(!missed.is_mismatch());
    }

    #[test]
    fn test_above_band_unresolved_and_below_band_missed() {
        let (red, green) = buckets();
        assert_eq!(catch_outcome(&block(1.5, 0.0, BlockColor::Red), &red, &green), None);
        assert_eq!(
            catch_outcome(&block(1.5, -4.2, BlockColor::Red), &red, &green),
            Some(CatchOutcome::Missed)
        );
        assert_eq!(
            catch_outcome(&block(0.0, -3.5, BlockColor::Green), &red, &green),
            Some(CatchOutcome::Missed)
        );
    }
}
