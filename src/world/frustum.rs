//! View frustum on the ground plane

use super::Camera;
use crate::rasterizer::Vec2;

/// Trapezoid of ground visible to the camera, in world space.
/// Left/right are relative to the heading (left = heading - half_fov).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub near_left: Vec2,
    pub near_right: Vec2,
    pub far_left: Vec2,
    pub far_right: Vec2,
}

impl Frustum {
    pub fn from_camera(camera: &Camera) -> Self {
        let left = Vec2::from_angle(camera.heading - camera.half_fov);
        let right = Vec2::from_angle(camera.heading + camera.half_fov);

        Self {
            near_left: camera.position + left * camera.near,
            near_right: camera.position + right * camera.near,
            far_left: camera.position + left * camera.far,
            far_right: camera.position + right * camera.far,
        }
    }

    /// Corners in winding order: near left, near right, far right, far left
    #[cfg(test)]
    pub fn corners(&self) -> [Vec2; 4] {
        [self.near_left, self.near_right, self.far_right, self.far_left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::world::ControlSteps;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.distance(b) < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_frustum_heading_zero() {
        let cam = Camera::new(Vec2::new(0.5, 0.5), 0.0, 0.005, 0.03, FRAC_PI_4);
        let f = Frustum::from_camera(&cam);
        let d = FRAC_PI_4.cos();

        assert_close(f.near_left, Vec2::new(0.5 + d * 0.005, 0.5 - d * 0.005));
        assert_close(f.near_right, Vec2::new(0.5 + d * 0.005, 0.5 + d * 0.005));
        assert_close(f.far_left, Vec2::new(0.5 + d * 0.03, 0.5 - d * 0.03));
        assert_close(f.far_right, Vec2::new(0.5 + d * 0.03, 0.5 + d * 0.03));
    }

    #[test]
    fn test_frustum_follows_rotation() {
        let mut cam = Camera::new(Vec2::new(0.5, 0.5), 0.0, 0.005, 0.03, FRAC_PI_4);
        let before = Frustum::from_camera(&cam);

        let input = InputState { rotate_right: true, ..Default::default() };
        cam.apply_input(&input, &ControlSteps::default());
        let after = Frustum::from_camera(&cam);

        let expect = |angle: f32, dist: f32| cam.position + Vec2::from_angle(angle) * dist;
        assert_close(after.near_left, expect(0.02 - FRAC_PI_4, 0.005));
        assert_close(after.near_right, expect(0.02 + FRAC_PI_4, 0.005));
        assert_close(after.far_left, expect(0.02 - FRAC_PI_4, 0.03));
        assert_close(after.far_right, expect(0.02 + FRAC_PI_4, 0.03));

        for (a, b) in before.corners().iter().zip(after.corners().iter()) {
            assert!(a.distance(*b) > 1e-6);
        }
    }

    proptest! {
        #[test]
        fn frustum_is_a_forward_trapezoid(
            x in -2.0f32..2.0,
            y in -2.0f32..2.0,
            heading in -10.0f32..10.0,
            near in 0.001f32..0.5,
            gap in 0.001f32..0.5,
            half_fov in 0.05f32..1.5,
        ) {
            let cam = Camera::new(Vec2::new(x, y), heading, near, near + gap, half_fov);
            let f = Frustum::from_camera(&cam);
            let forward = cam.forward();

            // Near edge strictly closer along the heading
            let near_depth = (f.near_left - cam.position).dot(forward);
            let far_depth = (f.far_left - cam.position).dot(forward);
            prop_assert!(near_depth > 0.0);
            prop_assert!(far_depth > near_depth);
            prop_assert!((f.near_right - cam.position).dot(forward) > 0.0);

            // Near and far edges are parallel
            let near_edge = f.near_right - f.near_left;
            let far_edge = f.far_right - f.far_left;
            prop_assert!(near_edge.cross(far_edge).abs() <= 1e-2 * near_edge.len() * far_edge.len());

            // Convex, consistently wound: no self intersection
            let c = f.corners();
            let turns: Vec<f32> = (0..4)
                .map(|i| {
                    let a = c[(i + 1) % 4] - c[i];
                    let b = c[(i + 2) % 4] - c[(i + 1) % 4];
                    a.cross(b)
                })
                .collect();
            prop_assert!(turns.iter().all(|t| *t > 0.0) || turns.iter().all(|t| *t < 0.0));
        }
    }
}
