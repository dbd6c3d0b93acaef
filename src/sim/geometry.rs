//! Angle and segment helpers
//!
//! Angles are carried in degrees everywhere in the simulation; conversion
//! to radians happens only at the trig call sites below.

use glam::Vec2;

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Radians to degrees
#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * 180.0 / std::f32::consts::PI
}

/// Unit vector pointing along `degrees`
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = deg_to_rad(degrees);
    Vec2::new(rad.cos(), rad.sin())
}

/// Angle in degrees from `from` to `to`
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    rad_to_deg(d.y.atan2(d.x))
}

/// A straight segment between two endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Segment of `length` centred on `center`, tilted by `angle` degrees
    pub fn from_center(center: Vec2, angle: f32, length: f32) -> Self {
        let half = heading(angle) * (length / 2.0);
        Self {
            a: center + half,
            b: center - half,
        }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Sum of distances from `p` to both endpoints
    ///
    /// Equals `length()` exactly on the segment and grows away from it, so
    /// a small tolerance on the difference describes a thin ellipse around
    /// the segment with the endpoints as foci.
    pub fn distance_sum(&self, p: Vec2) -> f32 {
        p.distance(self.a) + p.distance(self.b)
    }

    /// Distance-sum "point is on the segment" test
    pub fn contains_approx(&self, p: Vec2, tolerance: f32) -> bool {
        (self.distance_sum(p) - self.length()).abs() <= tolerance
    }
}

/// Viewport size in pixels, used to map cursor positions into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen pixels (origin top-left, y down) to world units ([-4, 4] both axes)
    pub fn screen_to_world(&self, sx: f32, sy: f32) -> Vec2 {
        Vec2::new(
            (8.0 * sx / self.width) - 4.0,
            4.0 - (8.0 * sy / self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_cardinals() {
        let east = heading(0.0);
        assert!((east - Vec2::X).length() < 1e-6);

        let south = heading(270.0);
        assert!((south - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_deg_rad_roundtrip_value() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((rad_to_deg(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_aim_angle() {
        let from = Vec2::new(-4.0, 0.0);
        assert!((aim_angle(from, Vec2::new(0.0, 4.0)) - 45.0).abs() < 1e-4);
        assert!((aim_angle(from, Vec2::new(0.0, -4.0)) + 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_segment_from_center() {
        let seg = Segment::from_center(Vec2::new(1.0, 1.0), 90.0, 0.8);
        assert!((seg.a - Vec2::new(1.0, 1.4)).length() < 1e-5);
        assert!((seg.b - Vec2::new(1.0, 0.6)).length() < 1e-5);
        assert!((seg.length() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_contains_approx() {
        let seg = Segment::new(Vec2::new(-0.4, 0.0), Vec2::new(0.4, 0.0));

        // On the segment
        assert!(seg.contains_approx(Vec2::new(0.1, 0.0), 0.02));
        // Slightly off to the side, inside the band
        assert!(seg.contains_approx(Vec2::new(0.0, 0.05), 0.02));
        // Well off the segment
        assert!(!seg.contains_approx(Vec2::new(0.0, 0.3), 0.02));
        // Past the end on the same line
        assert!(!seg.contains_approx(Vec2::new(0.6, 0.0), 0.02));
    }

    #[test]
    fn test_screen_to_world() {
        let vp = Viewport::new(600.0, 600.0);
        assert_eq!(vp.screen_to_world(0.0, 0.0), Vec2::new(-4.0, 4.0));
        assert_eq!(vp.screen_to_world(300.0, 300.0), Vec2::new(0.0, 0.0));
        assert_eq!(vp.screen_to_world(600.0, 600.0), Vec2::new(4.0, -4.0));
    }
}
