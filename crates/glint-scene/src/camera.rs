use glam::{Mat4, Vec3};

use crate::mesh::Bounds;

/// Closest the camera may dolly toward its target.
pub const MIN_DISTANCE: f32 = 0.01;

/// Elevation clamp, in degrees. Stops the orbit from flipping over the poles.
const MAX_ELEVATION: f32 = 89.0;

/// A perspective camera orbiting a target point.
///
/// This is the camera model the interactor drives: azimuth/elevation describe
/// where the camera sits on a sphere around `target`, `distance` is the sphere
/// radius. All angles are degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around the world Y axis. 0 looks down -Z.
    pub azimuth: f32,
    /// Angle above the horizon, clamped to ±[`MAX_ELEVATION`].
    pub elevation: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 3.0,
            azimuth: 0.0,
            elevation: 0.0,
            fov_y: 30.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    /// World-space camera position.
    pub fn position(&self) -> Vec3 {
        let az = self.azimuth.to_radians();
        let el = self.elevation.to_radians();
        let offset = Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos());
        self.target + offset * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y.to_radians(), aspect.max(1e-6), self.near, self.far)
    }

    /// Rotates the camera around the target.
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth = (self.azimuth + d_azimuth).rem_euclid(360.0);
        self.elevation = (self.elevation + d_elevation).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Moves the camera along its view direction.
    ///
    /// `factor > 1` moves closer, `factor < 1` backs away. Distance never
    /// drops below [`MIN_DISTANCE`].
    pub fn dolly(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        self.distance = (self.distance / factor).max(MIN_DISTANCE);
    }

    /// Slides the target (and therefore the camera) in the view plane.
    ///
    /// `dx`/`dy` are world-space units along the camera's right and up axes.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.target += right * dx + up * dy;
    }

    /// Re-frames the camera so `bounds` fills the vertical field of view,
    /// then pulls the clipping planes around it.
    pub fn reset(&mut self, bounds: Bounds) {
        let radius = bounds.radius().max(MIN_DISTANCE);
        self.target = bounds.center();
        self.distance = radius / (self.fov_y.to_radians() * 0.5).sin();
        self.near = (self.distance - 2.0 * radius).max(self.distance * 0.01);
        self.far = self.distance + 2.0 * radius;
    }
}
