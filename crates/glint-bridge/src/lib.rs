//! The external-context render bridge.
//!
//! A host application that owns an OpenGL context (a GUI toolkit viewport, a
//! game-engine panel) embeds the glint renderer by constructing one
//! [`ExternalBridge`] from its GL loader. The bridge owns the render surface,
//! the fixed demo scene, and the interactor; the host forwards resize and
//! pointer events, asks [`ExternalBridge::is_dirty`] whether a repaint is
//! owed, and calls [`ExternalBridge::render_frame`] with its context current.
//!
//! The bridge is single-threaded and performs no context management of its
//! own: currency is the host's job, and every call returns before yielding.
#![allow(clippy::missing_safety_doc)]

use std::cell::Cell;
use std::ffi::c_void;
use std::rc::Rc;

use glint_core::EmbedConfig;
use glint_runtime_glow::{EngineError, ExternalSurface, SceneRenderer, SurfaceHooks};
use glint_scene::Scene;

pub mod capi;
pub mod interactor;

pub use interactor::{Interactor, PointerButtons};

/// Shared "a redraw is owed" flag.
///
/// Clones share one cell; the bridge keeps one end and hands the other to the
/// interactor as its render notifier at initialization.
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Rc<Cell<bool>>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.set(true);
    }

    pub fn clear(&self) {
        self.0.set(false);
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}

/// Render-request notifications out of the interactor.
///
/// Registered once at initialization; the interactor calls it whenever an
/// input event actually changed something worth repainting.
pub trait RenderNotifier {
    fn request_render(&self);
}

impl RenderNotifier for RedrawFlag {
    fn request_render(&self) {
        self.set();
    }
}

/// The bridge's answers to the surface's render-time queries.
struct EmbedHooks {
    frames: Rc<Cell<u64>>,
}

impl SurfaceHooks for EmbedHooks {
    // The host binds the context before every bridge call, so the answer is
    // unconditionally yes.
    fn context_is_current(&self) -> bool {
        true
    }

    fn frame_completed(&self) {
        self.frames.set(self.frames.get() + 1);
    }
}

/// Owns everything the embedding needs: the GL function table built from the
/// host loader, the render surface, the demo scene, and the interactor.
///
/// Construction *is* initialization; there is no uninitialized bridge value.
/// Hosts that need the C-style assert-on-misuse lifecycle use [`capi`].
pub struct ExternalBridge {
    gl: glow::Context,
    surface: ExternalSurface,
    renderer: SceneRenderer,
    scene: Scene,
    interactor: Interactor,
    redraw: RedrawFlag,
    frames: Rc<Cell<u64>>,
}

impl std::fmt::Debug for ExternalBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalBridge")
            .field("surface", &self.surface)
            .field("interactor", &self.interactor)
            .field("dirty", &self.redraw.is_set())
            .field("frames", &self.frames.get())
            .field("gl", &"<gl function table>")
            .finish()
    }
}

impl ExternalBridge {
    /// Binds the host's GL loader and builds the surface and demo scene at
    /// the given initial size. The context must be current during this call.
    ///
    /// The new bridge starts dirty: the first frame is owed.
    pub fn initialize(
        loader: impl FnMut(&str) -> *const c_void,
        width: i32,
        height: i32,
    ) -> Result<Self, EngineError> {
        let config = EmbedConfig {
            width,
            height,
            ..EmbedConfig::default()
        };
        Self::with_config(loader, config)
    }

    /// Like [`ExternalBridge::initialize`], with scene colors and spin taken
    /// from `config` instead of the defaults.
    pub fn with_config(
        mut loader: impl FnMut(&str) -> *const c_void,
        config: EmbedConfig,
    ) -> Result<Self, EngineError> {
        assert!(
            config.width >= 1 && config.height >= 1,
            "initialize requires a positive surface size, got {}x{}",
            config.width,
            config.height
        );

        let gl = unsafe { glow::Context::from_loader_function(|name| loader(name)) };

        let mut scene = Scene::demo(config.cube_color, config.spin_degrees);
        scene.background = config.background;

        let renderer = unsafe { SceneRenderer::new(&gl, &scene.actor.mesh)? };

        let frames = Rc::new(Cell::new(0));
        let mut surface = ExternalSurface::new(config.width, config.height);
        surface.set_hooks(Box::new(EmbedHooks {
            frames: Rc::clone(&frames),
        }));

        let redraw = RedrawFlag::new();
        redraw.set();
        let interactor = Interactor::new(config.width, config.height, Box::new(redraw.clone()));

        log::info!(
            "render bridge initialized, surface {}x{}",
            config.width,
            config.height
        );

        Ok(Self {
            gl,
            surface,
            renderer,
            scene,
            interactor,
            redraw,
            frames,
        })
    }

    /// Issues one render pass into the currently bound framebuffer and clears
    /// the dirty flag. The host guarantees the context is current.
    pub fn render_frame(&mut self) {
        unsafe {
            self.surface.render(&self.gl, &self.renderer, &self.scene);
        }
        self.redraw.clear();
        log::trace!("frame {} rendered", self.frames.get());
    }

    /// Whether a repaint is owed since the last [`ExternalBridge::render_frame`].
    pub fn is_dirty(&self) -> bool {
        self.redraw.is_set()
    }

    /// Updates surface and interactor dimensions. Marks the bridge dirty: the
    /// last rendered frame is stale at the new size.
    pub fn resize(&mut self, width: i32, height: i32) {
        assert!(
            width >= 1 && height >= 1,
            "resize requires a positive surface size, got {width}x{height}"
        );
        self.surface.set_size(width, height);
        self.interactor.set_size(width, height);
        self.redraw.set();
    }

    /// Current surface dimensions in pixels.
    pub fn size(&self) -> (i32, i32) {
        self.surface.size()
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.interactor.pointer_move(x, y, &mut self.scene.camera);
    }

    pub fn pointer_buttons_changed(&mut self, primary: bool, secondary: bool, middle: bool) {
        self.interactor.buttons_changed(primary, secondary, middle);
    }

    /// `delta` is in wheel notches; positive dollies toward the scene.
    pub fn pointer_wheel(&mut self, delta: f32) {
        self.interactor.wheel(delta, &mut self.scene.camera);
    }

    /// The scene being rendered (read-only; only the camera ever moves).
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frames rendered since initialization.
    pub fn frames_rendered(&self) -> u64 {
        self.frames.get()
    }

    /// Releases all GPU objects. The context must be current during this call.
    pub fn shutdown(self) {
        let ExternalBridge {
            gl, mut renderer, ..
        } = self;
        unsafe {
            renderer.destroy(&gl);
        }
        log::info!("render bridge shut down");
    }
}
