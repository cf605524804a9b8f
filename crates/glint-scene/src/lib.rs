#![forbid(unsafe_code)]

//! glint scene vocabulary.
//!
//! This crate is **contract-only**: no windowing, no OS policy, no GL handles.
//! It defines the fixed demo scene the bridge renders — one mesh-bearing actor,
//! one headlight, one orbitable camera — and the camera model the interactor
//! drives. Backends (e.g. `glint-runtime-glow`) decide how pixels get made.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod actor;
pub mod camera;
pub mod mesh;

pub use actor::Actor;
pub use camera::OrbitCamera;
pub use mesh::{Bounds, Mesh, Vertex};

/// The scene's single light.
///
/// It rides the camera: backends compute lighting in view space, so the light
/// always shines from the viewer toward the scene, the way an automatically
/// created headlight does.
#[derive(Debug, Clone, Copy)]
pub struct Headlight {
    /// Light color, linear RGB.
    pub color: [f32; 3],
    /// Scalar multiplier applied to `color`.
    pub intensity: f32,
}

impl Default for Headlight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// The fixed demo scene: one actor, one light, one camera.
///
/// Created once at bridge initialization. After that, only the camera moves
/// (driven by the interactor); the actor and light stay put.
#[derive(Debug, Clone)]
pub struct Scene {
    pub actor: Actor,
    pub light: Headlight,
    pub camera: OrbitCamera,
    /// Clear color, linear RGB.
    pub background: [f32; 3],
}

impl Scene {
    /// Builds the demo scene: a unit cube spun about the world X and Y axes.
    pub fn demo(cube_color: [f32; 3], spin_degrees: [f32; 2]) -> Self {
        let mut actor = Actor::new(Mesh::cube(), cube_color);
        actor.rotate_x(spin_degrees[0]);
        actor.rotate_y(spin_degrees[1]);

        let mut scene = Self {
            actor,
            light: Headlight::default(),
            camera: OrbitCamera::default(),
            background: [0.0, 0.0, 0.0],
        };
        scene.reset_camera();
        scene
    }

    /// Re-frames the camera so the actor's world-space bounds fill the view.
    pub fn reset_camera(&mut self) {
        self.camera.reset(self.actor.world_bounds());
    }
}
