//! Screen-space pick testing
//!
//! Clicks arrive in 2D window coordinates while spheres live in 3D. Each
//! candidate sphere center is projected through the fixed camera to window
//! space and the click is matched against a screen-space hit radius. Ties
//! are broken by smallest pointer distance, regardless of primality.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::consts::PICK_SCALE_FACTOR;
use crate::sim::state::Sphere;

/// Fixed perspective camera looking down -Z at the play volume
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub model_view: Mat4,
    pub projection: Mat4,
    /// Window-space viewport as [x, y, width, height]
    pub viewport: [f32; 4],
    pub display_height: f32,
}

impl Camera {
    /// 45-degree perspective, near 0.1, far 50, eye at (0, 0, 21) facing
    /// the origin. The whole bounded volume is visible at any aspect ratio
    /// wider than ~3:2.
    pub fn new(display_width: f32, display_height: f32) -> Self {
        Camera {
            model_view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 21.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh_gl(
                45f32.to_radians(),
                display_width / display_height,
                0.1,
                50.0,
            ),
            viewport: [0.0, 0.0, display_width, display_height],
            display_height,
        }
    }

    /// Project a world-space point to window coordinates (origin bottom-left).
    ///
    /// Returns `None` for points at or behind the eye plane, where the
    /// perspective divide is meaningless.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.projection * self.model_view * world.extend(1.0);
        // w <= 0 means at or behind the eye; a negative divide would mirror
        // the point onto the screen
        if clip.w < f32::EPSILON {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        let [vx, vy, vw, vh] = self.viewport;
        Some(Vec2::new(
            vx + (ndc.x + 1.0) * 0.5 * vw,
            vy + (ndc.y + 1.0) * 0.5 * vh,
        ))
    }

    /// Screen-space hit radius for a sphere of world radius `radius`.
    pub fn hit_radius(&self, radius: f32) -> f32 {
        radius * self.viewport[3] / self.display_height * PICK_SCALE_FACTOR
    }
}

/// Resolve a click against the live sphere population.
///
/// `pointer` uses window conventions (origin top-left, y down); it is
/// flipped to match projected coordinates before testing. Returns the index
/// of the closest sphere whose hit disc contains the pointer.
pub fn pick_sphere(spheres: &[Sphere], camera: &Camera, pointer: Vec2) -> Option<usize> {
    let pointer = Vec2::new(pointer.x, camera.display_height - pointer.y);

    let mut candidates: Vec<(usize, f32, f32)> = spheres
        .iter()
        .enumerate()
        .filter(|(_, s)| s.alive)
        .filter_map(|(i, s)| {
            let center = camera.project(s.position)?;
            Some((i, pointer.distance(center), camera.hit_radius(s.radius)))
        })
        .collect();

    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    candidates
        .into_iter()
        .find(|&(_, dist, hit)| dist <= hit)
        .map(|(i, _, _)| i)
}
