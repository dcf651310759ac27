//! Collision and proximity tests for circular objects
//!
//! Objects are circles; walls are the axis-aligned canvas edges.

use glam::Vec2;

use super::state::SimObject;

/// How a pair of objects relate after a distance check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Proximity {
    /// Circles overlap (`distance < r1 + r2`)
    Overlap { distance: f32 },
    /// Surfaces apart but centers within the threshold
    CloseApproach { distance: f32 },
    Clear,
}

/// Center-to-center distance
#[inline]
pub fn pair_distance(a: &SimObject, b: &SimObject) -> f32 {
    a.pos.distance(b.pos)
}

/// Classify a pair against the close-approach threshold
pub fn classify_pair(a: &SimObject, b: &SimObject, threshold: f32) -> Proximity {
    let distance = pair_distance(a, b);
    let contact = a.radius + b.radius;
    if distance < contact {
        Proximity::Overlap { distance }
    } else if distance > contact && distance < threshold {
        Proximity::CloseApproach { distance }
    } else {
        Proximity::Clear
    }
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Keep an object inside `[0, bounds]`, reflecting velocity off any wall it
/// touched while moving outward. Returns true if a wall was hit.
pub fn bounce_off_walls(obj: &mut SimObject, bounds: Vec2) -> bool {
    let mut hit = false;

    // (coordinate at wall, inward normal)
    let walls = [
        (obj.pos.x <= 0.0, Vec2::X),
        (obj.pos.x >= bounds.x, Vec2::NEG_X),
        (obj.pos.y <= 0.0, Vec2::Y),
        (obj.pos.y >= bounds.y, Vec2::NEG_Y),
    ];
    for (touching, normal) in walls {
        if touching {
            hit = true;
            if obj.vel.dot(normal) < 0.0 {
                obj.vel = reflect_velocity(obj.vel, normal);
            }
        }
    }

    obj.pos = obj.pos.clamp(Vec2::ZERO, bounds);
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObjectKind;

    fn circle(x: f32, y: f32, radius: f32) -> SimObject {
        SimObject {
            id: 0,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            kind: ObjectKind::Satellite,
            active: true,
        }
    }

    #[test]
    fn test_overlap() {
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(8.0, 0.0, 5.0);
        assert_eq!(classify_pair(&a, &b, 20.0), Proximity::Overlap { distance: 8.0 });
    }

    #[test]
    fn test_close_approach() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(15.0, 0.0, 3.0);
        assert_eq!(
            classify_pair(&a, &b, 20.0),
            Proximity::CloseApproach { distance: 15.0 }
        );
    }

    #[test]
    fn test_touching_and_far_are_clear() {
        // Exactly touching: neither overlap nor close approach
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(10.0, 0.0, 5.0);
        assert_eq!(classify_pair(&a, &b, 20.0), Proximity::Clear);

        let c = circle(25.0, 0.0, 1.0);
        assert_eq!(classify_pair(&a, &c, 20.0), Proximity::Clear);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let a = circle(0.0, 0.0, 2.0);
        let b = circle(20.0, 0.0, 3.0);
        assert_eq!(classify_pair(&a, &b, 20.0), Proximity::Clear);

        let c = circle(19.9, 0.0, 3.0);
        assert!(matches!(
            classify_pair(&a, &c, 20.0),
            Proximity::CloseApproach { .. }
        ));
    }

    #[test]
    fn test_large_radii_beyond_threshold() {
        // Surfaces apart but centers past the threshold
        let a = circle(0.0, 0.0, 7.0);
        let b = circle(21.0, 0.0, 7.0);
        assert_eq!(classify_pair(&a, &b, 20.0), Proximity::Clear);
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 5.0), Vec2::NEG_X);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!((reflected.y - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_bounce_right_wall() {
        let mut obj = circle(801.0, 100.0, 3.0);
        obj.vel = Vec2::new(1.5, -0.5);
        assert!(bounce_off_walls(&mut obj, Vec2::new(800.0, 400.0)));
        assert_eq!(obj.pos, Vec2::new(800.0, 100.0));
        assert_eq!(obj.vel, Vec2::new(-1.5, -0.5));
    }

    #[test]
    fn test_bounce_corner() {
        let mut obj = circle(-0.5, -2.0, 3.0);
        obj.vel = Vec2::new(-1.0, -1.0);
        assert!(bounce_off_walls(&mut obj, Vec2::new(800.0, 400.0)));
        assert_eq!(obj.pos, Vec2::ZERO);
        assert_eq!(obj.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_moving_inward_at_wall_keeps_velocity() {
        let mut obj = circle(0.0, 50.0, 3.0);
        obj.vel = Vec2::new(0.7, 0.0);
        bounce_off_walls(&mut obj, Vec2::new(800.0, 400.0));
        assert_eq!(obj.vel, Vec2::new(0.7, 0.0));
    }

    #[test]
    fn test_interior_untouched() {
        let mut obj = circle(10.0, 10.0, 3.0);
        obj.vel = Vec2::new(-1.0, 1.0);
        assert!(!bounce_off_walls(&mut obj, Vec2::new(800.0, 400.0)));
        assert_eq!(obj.vel, Vec2::new(-1.0, 1.0));
    }
}
