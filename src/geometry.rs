// src/geometry.rs

use crate::types::Point2D;

/// Interior angle at vertex `b` formed by the rays b->a and b->c, in
/// degrees, folded into [0, 180].
///
/// Computed as the absolute difference of the two rays' four-quadrant
/// arctangents; a raw difference above 180 is replaced by 360 minus it,
/// so the result is orientation-independent (an elbow reads the same
/// whether the arm points left or right in the frame).
///
/// If `a` or `c` coincides with `b` the angle is undefined and NaN is
/// returned as a sentinel; callers treat that frame as degenerate and
/// skip it rather than feeding NaN into the statistics.
pub fn joint_angle(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    if (a.x == b.x && a.y == b.y) || (c.x == b.x && c.y == b.y) {
        return f64::NAN;
    }

    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }
    degrees
}

/// Vertical offset between a bilateral joint pair, in the frame's
/// coordinate units. Used for the shoulder/hip symmetry check.
pub fn vertical_symmetry(left: Point2D, right: Point2D) -> f64 {
    (left.y - right.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn right_angle_reads_ninety_degrees() {
        let a = Point2D::new(0.0, 1.0);
        let b = Point2D::new(0.0, 0.0);
        let c = Point2D::new(1.0, 0.0);
        assert!((joint_angle(a, b, c) - 90.0).abs() < TOLERANCE);
    }

    #[test]
    fn collinear_points_read_straight() {
        let a = Point2D::new(-1.0, 0.0);
        let b = Point2D::new(0.0, 0.0);
        let c = Point2D::new(1.0, 0.0);
        assert!((joint_angle(a, b, c) - 180.0).abs() < TOLERANCE);

        // Both rays pointing the same way is a fully folded joint.
        let folded = joint_angle(c, b, c);
        assert!(folded.abs() < TOLERANCE);
    }

    #[test]
    fn angle_is_symmetric_in_its_endpoints() {
        let a = Point2D::new(3.0, 7.0);
        let b = Point2D::new(-2.0, 1.0);
        let c = Point2D::new(5.0, -4.0);
        assert!((joint_angle(a, b, c) - joint_angle(c, b, a)).abs() < TOLERANCE);
    }

    #[test]
    fn angle_never_leaves_zero_to_one_eighty() {
        // Sweep one ray around the vertex; the folded result must stay
        // inside [0, 180] for every orientation.
        let b = Point2D::new(0.0, 0.0);
        let a = Point2D::new(1.0, 0.0);
        for i in 0..360 {
            let theta = (i as f64).to_radians();
            let c = Point2D::new(theta.cos(), theta.sin());
            let angle = joint_angle(a, b, c);
            assert!(angle >= 0.0 && angle <= 180.0, "angle {angle} at {i} deg");
        }
    }

    #[test]
    fn orientation_independent_fold() {
        // Same elbow flexion mirrored left-to-right reads identically.
        let angle_right = joint_angle(
            Point2D::new(100.0, 100.0),
            Point2D::new(150.0, 200.0),
            Point2D::new(100.0, 300.0),
        );
        let angle_left = joint_angle(
            Point2D::new(300.0, 100.0),
            Point2D::new(250.0, 200.0),
            Point2D::new(300.0, 300.0),
        );
        assert!((angle_right - angle_left).abs() < TOLERANCE);
    }

    #[test]
    fn coincident_vertex_is_nan() {
        let b = Point2D::new(4.0, 4.0);
        assert!(joint_angle(b, b, Point2D::new(5.0, 5.0)).is_nan());
        assert!(joint_angle(Point2D::new(5.0, 5.0), b, b).is_nan());
        assert!(joint_angle(b, b, b).is_nan());
    }

    #[test]
    fn symmetry_is_absolute_vertical_offset() {
        let left = Point2D::new(10.0, 120.0);
        let right = Point2D::new(400.0, 95.0);
        assert!((vertical_symmetry(left, right) - 25.0).abs() < TOLERANCE);
        assert!((vertical_symmetry(right, left) - 25.0).abs() < TOLERANCE);
    }
}
