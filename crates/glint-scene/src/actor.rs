use glam::{Mat3, Mat4};

use crate::mesh::{Bounds, Mesh};

/// A renderable object: a mesh plus its world transform and surface color.
///
/// Rotations accumulate about the **world** axes in call order, so
/// `rotate_x(45.0)` followed by `rotate_y(45.0)` tips the cube onto a corner
/// rather than spinning it in object space.
#[derive(Debug, Clone)]
pub struct Actor {
    pub mesh: Mesh,
    /// Diffuse color, linear RGB.
    pub color: [f32; 3],
    rotation: Mat4,
}

impl Actor {
    pub fn new(mesh: Mesh, color: [f32; 3]) -> Self {
        Self {
            mesh,
            color,
            rotation: Mat4::IDENTITY,
        }
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.rotation = Mat4::from_rotation_x(degrees.to_radians()) * self.rotation;
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.rotation = Mat4::from_rotation_y(degrees.to_radians()) * self.rotation;
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.rotation = Mat4::from_rotation_z(degrees.to_radians()) * self.rotation;
    }

    /// Model-to-world matrix.
    pub fn model_matrix(&self) -> Mat4 {
        self.rotation
    }

    /// Inverse-transpose of the model matrix, for transforming normals.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.rotation).inverse().transpose()
    }

    /// Axis-aligned bounds of the transformed mesh, in world space.
    pub fn world_bounds(&self) -> Bounds {
        let local = self.mesh.bounds();
        let corners = [
            [local.min.x, local.min.y, local.min.z],
            [local.min.x, local.min.y, local.max.z],
            [local.min.x, local.max.y, local.min.z],
            [local.min.x, local.max.y, local.max.z],
            [local.max.x, local.min.y, local.min.z],
            [local.max.x, local.min.y, local.max.z],
            [local.max.x, local.max.y, local.min.z],
            [local.max.x, local.max.y, local.max.z],
        ];

        let mut min = glam::Vec3::splat(f32::INFINITY);
        let mut max = glam::Vec3::splat(f32::NEG_INFINITY);
        for c in corners {
            let p = self.rotation.transform_point3(glam::Vec3::from(c));
            min = min.min(p);
            max = max.max(p);
        }
        Bounds { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn fresh_actor_is_untransformed() {
        let actor = Actor::new(Mesh::cube(), [0.8, 0.2, 0.2]);
        assert_eq!(actor.model_matrix(), Mat4::IDENTITY);
        assert_eq!(actor.world_bounds(), actor.mesh.bounds());
    }

    #[test]
    fn rotations_accumulate_about_world_axes() {
        let mut actor = Actor::new(Mesh::cube(), [1.0, 1.0, 1.0]);
        actor.rotate_x(90.0);
        actor.rotate_y(90.0);

        // +Z in model space goes to +Y under X(90), then stays +Y under
        // a world-axis Y rotation.
        let p = actor.model_matrix().transform_point3(Vec3::Z);
        assert!(p.abs_diff_eq(Vec3::Y, 1e-6), "got {p}");
    }

    #[test]
    fn spun_cube_bounds_grow() {
        let mut actor = Actor::new(Mesh::cube(), [1.0, 1.0, 1.0]);
        actor.rotate_x(45.0);
        actor.rotate_y(45.0);

        let b = actor.world_bounds();
        // A tipped unit cube is wider than 1 on every axis it rotated through.
        assert!(b.max.y - b.min.y > 1.0);
        // The box radius can only grow past the cube's half diagonal, and is
        // capped by a fully diagonal box.
        let half_diag = (3.0f32).sqrt() * 0.5;
        assert!(b.radius() >= half_diag - 1e-4);
        assert!(b.radius() <= 1.5 + 1e-4);
    }

    #[test]
    fn normal_matrix_of_pure_rotation_matches_rotation() {
        let mut actor = Actor::new(Mesh::cube(), [1.0, 1.0, 1.0]);
        actor.rotate_y(30.0);
        let expected = Mat3::from_mat4(actor.model_matrix());
        let got = actor.normal_matrix();
        assert!(got.abs_diff_eq(expected, 1e-5));
    }
}
