//! Compile-only compatibility crate.
//!
//! This crate exists to ensure the public SDK surface remains usable by third-party
//! consumers. It is not shipped or run; it must only build.

use glint_bridge::{Interactor, PointerButtons, RedrawFlag, RenderNotifier};
use glint_core::EmbedConfig;
use glint_scene::{Mesh, OrbitCamera, Scene};

#[allow(dead_code)]
pub fn _compile_witness() {
    // The demo scene builds using only public APIs.
    let mut scene = Scene::demo([0.8, 0.2, 0.2], [45.0, 45.0]);
    scene.reset_camera();

    // Camera operations remain callable without a bridge.
    let mut camera = OrbitCamera::default();
    camera.orbit(15.0, -5.0);
    camera.dolly(1.1);
    camera.pan(0.1, 0.1);
    let _ = camera.view_matrix();
    let _ = camera.projection_matrix(16.0 / 9.0);

    // Mesh data stays inspectable for hosts that upload it themselves.
    let cube = Mesh::cube();
    let _ = (cube.bounds(), cube.vertices.len(), cube.indices.len());

    // The interaction surface is constructible without GL.
    // Avoid `Default` here: the SDK surface may prefer explicit constructors.
    let flag = RedrawFlag::new();
    let mut interactor = Interactor::new(300, 300, Box::new(flag.clone()));
    interactor.buttons_changed(true, false, false);
    interactor.pointer_move(10.0, 10.0, &mut scene.camera);
    let _buttons: PointerButtons = interactor.buttons();
    flag.request_render();
    let _ = flag.is_set();

    // Config types remain constructible with explicit defaults.
    let _config = EmbedConfig::default();
}
