use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved vertex layout shared with the GL backend.
///
/// Attribute 0 = position, attribute 1 = normal, tightly packed.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Axis-aligned bounding box in whatever space the caller computed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the bounding sphere enclosing the box.
    pub fn radius(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// A unit cube centered at the origin, with per-face normals.
    ///
    /// 24 vertices (4 per face, so normals stay flat) and 36 indices.
    pub fn cube() -> Self {
        const H: f32 = 0.5;

        // (normal, four corners counter-clockwise when viewed from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [1.0, 0.0, 0.0],
                [[H, -H, -H], [H, H, -H], [H, H, H], [H, -H, H]],
            ),
            (
                [-1.0, 0.0, 0.0],
                [[-H, -H, H], [-H, H, H], [-H, H, -H], [-H, -H, -H]],
            ),
            (
                [0.0, 1.0, 0.0],
                [[-H, H, -H], [-H, H, H], [H, H, H], [H, H, -H]],
            ),
            (
                [0.0, -1.0, 0.0],
                [[-H, -H, H], [-H, -H, -H], [H, -H, -H], [H, -H, H]],
            ),
            (
                [0.0, 0.0, 1.0],
                [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
            ),
            (
                [0.0, 0.0, -1.0],
                [[H, -H, -H], [-H, -H, -H], [-H, H, -H], [H, H, -H]],
            ),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            for position in corners {
                vertices.push(Vertex { position, normal });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Axis-aligned bounds in model space.
    pub fn bounds(&self) -> Bounds {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        Bounds { min, max }
    }
}
