//! glint runtime (glow/OpenGL backend)
//
// This crate intentionally contains **only** the GL-facing machinery:
// - compile/link the lit-mesh program
// - upload mesh buffers
// - render the scene into whatever framebuffer the host has bound
// - manage optional offscreen targets (FBO + color texture + depth)
//
// It does NOT contain windowing, input policy, or lifecycle state; those live
// in the host and in `glint-bridge`.
#![allow(clippy::missing_safety_doc)]

use glam::Mat3;
use glow::HasContext;

use glint_scene::{Mesh, Scene};

pub use glint_core::EngineError;

/// Queries the surface asks its host-facing owner at render time.
///
/// The bridge implements this once and registers it at initialization.
pub trait SurfaceHooks {
    /// Whether the GPU context is current on the calling thread.
    ///
    /// The host contract is that it binds the context before every call into
    /// the surface, so implementations answer `true` unconditionally.
    fn context_is_current(&self) -> bool {
        true
    }

    /// Called after each completed render pass.
    fn frame_completed(&self) {}
}

struct NoHooks;
impl SurfaceHooks for NoHooks {}

/// The drawable target bound to an externally-owned GPU context.
///
/// The surface never creates or binds a framebuffer of its own: rendering goes
/// into whatever the host has bound (the default framebuffer, or an offscreen
/// [`RenderTarget`]). It tracks pixel dimensions because the host's viewport
/// state cannot be trusted to match the embedded drawable.
pub struct ExternalSurface {
    width: i32,
    height: i32,
    hooks: Box<dyn SurfaceHooks>,
}

impl std::fmt::Debug for ExternalSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("hooks", &"<surface hooks>")
            .finish()
    }
}

impl ExternalSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            hooks: Box::new(NoHooks),
        }
    }

    /// Registers the host-facing hook implementation. Call once, at init.
    pub fn set_hooks(&mut self, hooks: Box<dyn SurfaceHooks>) {
        self.hooks = hooks;
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
        log::debug!("surface resized to {}x{}", self.width, self.height);
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Renders one frame of `scene` into the currently bound framebuffer.
    ///
    /// The GPU context must be current on the calling thread; the surface
    /// verifies this through its registered hooks before touching GL state.
    pub unsafe fn render(&self, gl: &glow::Context, renderer: &SceneRenderer, scene: &Scene) {
        assert!(
            self.hooks.context_is_current(),
            "render called without a current GPU context"
        );

        renderer.draw(gl, scene, self.width, self.height);
        self.hooks.frame_completed();
    }
}

// -------------------------------------------------------------------------------------------------
// Program compilation
// -------------------------------------------------------------------------------------------------

pub unsafe fn compile_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::NativeProgram, EngineError> {
    let vs = gl
        .create_shader(glow::VERTEX_SHADER)
        .map_err(|e| EngineError::GlCreate(format!("create_shader(VS) failed: {e:?}")))?;
    gl.shader_source(vs, vert_src);
    gl.compile_shader(vs);
    if !gl.get_shader_compile_status(vs) {
        let log = gl.get_shader_info_log(vs);
        gl.delete_shader(vs);
        return Err(EngineError::VertexCompile(log));
    }

    let fs = gl
        .create_shader(glow::FRAGMENT_SHADER)
        .map_err(|e| EngineError::GlCreate(format!("create_shader(FS) failed: {e:?}")))?;
    gl.shader_source(fs, frag_src);
    gl.compile_shader(fs);
    if !gl.get_shader_compile_status(fs) {
        let log = gl.get_shader_info_log(fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        return Err(EngineError::FragmentCompile(log));
    }

    let program = gl
        .create_program()
        .map_err(|e| EngineError::GlCreate(format!("create_program failed: {e:?}")))?;
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    gl.link_program(program);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(EngineError::Link(log));
    }

    Ok(program)
}

// -------------------------------------------------------------------------------------------------
// Mesh upload + scene pipeline
// -------------------------------------------------------------------------------------------------

/// GPU-side copy of an indexed mesh (VAO + interleaved VBO + EBO).
#[derive(Debug)]
pub struct MeshBuffers {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ebo: glow::NativeBuffer,
    index_count: i32,
}

impl MeshBuffers {
    pub unsafe fn new(gl: &glow::Context, mesh: &Mesh) -> Result<Self, EngineError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| EngineError::GlCreate(format!("create_vertex_array: {e}")))?;
        let vbo = gl
            .create_buffer()
            .map_err(|e| EngineError::GlCreate(format!("create_buffer(VBO): {e}")))?;
        let ebo = gl
            .create_buffer()
            .map_err(|e| EngineError::GlCreate(format!("create_buffer(EBO): {e}")))?;

        gl.bind_vertex_array(Some(vao));

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.vertices),
            glow::STATIC_DRAW,
        );

        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.indices),
            glow::STATIC_DRAW,
        );

        // position (vec3) + normal (vec3), tightly interleaved
        let stride = 6 * 4;
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

        Ok(Self {
            vao,
            vbo,
            ebo,
            index_count: mesh.indices.len() as i32,
        })
    }

    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_elements(glow::TRIANGLES, self.index_count, glow::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ebo);
    }
}

/// The lit-mesh program.
#[derive(Debug)]
pub struct ScenePipeline {
    pub program: glow::NativeProgram,
}

impl ScenePipeline {
    pub unsafe fn new(gl: &glow::Context) -> Result<Self, EngineError> {
        let program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        Ok(Self { program })
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }
}

/// Pipeline + buffers for one scene's single actor.
#[derive(Debug)]
pub struct SceneRenderer {
    pipeline: ScenePipeline,
    buffers: MeshBuffers,
}

impl SceneRenderer {
    pub unsafe fn new(gl: &glow::Context, mesh: &Mesh) -> Result<Self, EngineError> {
        Ok(Self {
            pipeline: ScenePipeline::new(gl)?,
            buffers: MeshBuffers::new(gl, mesh)?,
        })
    }

    /// Draws the scene into the currently bound framebuffer.
    ///
    /// Sets the viewport itself: the host's GL viewport state is unrelated to
    /// the embedded drawable's dimensions.
    pub unsafe fn draw(&self, gl: &glow::Context, scene: &Scene, width: i32, height: i32) {
        gl.viewport(0, 0, width, height);
        gl.enable(glow::DEPTH_TEST);

        let [r, g, b] = scene.background;
        gl.clear_color(r, g, b, 1.0);
        gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

        let prog = self.pipeline.program;
        gl.use_program(Some(prog));

        let model = scene.actor.model_matrix();
        let view = scene.camera.view_matrix();
        let proj = scene
            .camera
            .projection_matrix(width as f32 / height.max(1) as f32);
        // Normals go straight to view space; the headlight lives there.
        let normal = Mat3::from_mat4(view * model).inverse().transpose();

        if let Some(loc) = gl.get_uniform_location(prog, "u_model") {
            gl.uniform_matrix_4_f32_slice(Some(&loc), false, &model.to_cols_array());
        }
        if let Some(loc) = gl.get_uniform_location(prog, "u_view") {
            gl.uniform_matrix_4_f32_slice(Some(&loc), false, &view.to_cols_array());
        }
        if let Some(loc) = gl.get_uniform_location(prog, "u_proj") {
            gl.uniform_matrix_4_f32_slice(Some(&loc), false, &proj.to_cols_array());
        }
        if let Some(loc) = gl.get_uniform_location(prog, "u_normal") {
            gl.uniform_matrix_3_f32_slice(Some(&loc), false, &normal.to_cols_array());
        }
        if let Some(loc) = gl.get_uniform_location(prog, "u_color") {
            let [cr, cg, cb] = scene.actor.color;
            gl.uniform_3_f32(Some(&loc), cr, cg, cb);
        }
        if let Some(loc) = gl.get_uniform_location(prog, "u_light") {
            let [lr, lg, lb] = scene.light.color;
            let i = scene.light.intensity;
            gl.uniform_3_f32(Some(&loc), lr * i, lg * i, lb * i);
        }

        self.buffers.draw(gl);

        gl.use_program(None);
        gl.disable(glow::DEPTH_TEST);
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        self.buffers.destroy(gl);
        self.pipeline.destroy(gl);
    }
}

// -------------------------------------------------------------------------------------------------
// Offscreen render target
// -------------------------------------------------------------------------------------------------

/// Offscreen render target (FBO + color texture + depth renderbuffer).
///
/// For hosts that composite the embedded scene as a texture instead of letting
/// it draw into the default framebuffer. Depth is mandatory here: the scene is
/// depth-tested geometry, not a fullscreen pass.
#[derive(Debug)]
pub struct RenderTarget {
    pub fbo: glow::NativeFramebuffer,
    pub tex: glow::NativeTexture,
    pub depth_rb: glow::NativeRenderbuffer,
    pub w: i32,
    pub h: i32,
}

impl RenderTarget {
    /// Resize the render target (realloc texture + depth storage). Keeps the
    /// same FBO/texture/renderbuffer ids.
    pub unsafe fn resize(&mut self, gl: &glow::Context, w: i32, h: i32) {
        self.w = w.max(1);
        self.h = h.max(1);

        gl.bind_texture(glow::TEXTURE_2D, Some(self.tex));
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            self.w,
            self.h,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            None,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);

        gl.bind_renderbuffer(glow::RENDERBUFFER, Some(self.depth_rb));
        gl.renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH_COMPONENT24, self.w, self.h);
        gl.bind_renderbuffer(glow::RENDERBUFFER, None);
    }

    pub unsafe fn destroy(self, gl: &glow::Context) {
        gl.delete_framebuffer(self.fbo);
        gl.delete_texture(self.tex);
        gl.delete_renderbuffer(self.depth_rb);
    }
}

pub unsafe fn create_render_target(
    gl: &glow::Context,
    w: i32,
    h: i32,
) -> Result<RenderTarget, EngineError> {
    let fbo = gl
        .create_framebuffer()
        .map_err(|e| EngineError::GlCreate(format!("create_framebuffer failed: {e:?}")))?;
    let tex = gl
        .create_texture()
        .map_err(|e| EngineError::GlCreate(format!("create_texture failed: {e:?}")))?;
    let depth_rb = gl
        .create_renderbuffer()
        .map_err(|e| EngineError::GlCreate(format!("create_renderbuffer failed: {e:?}")))?;

    let ww = w.max(1);
    let hh = h.max(1);

    gl.bind_texture(glow::TEXTURE_2D, Some(tex));
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MIN_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_MAG_FILTER,
        glow::LINEAR as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_S,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_parameter_i32(
        glow::TEXTURE_2D,
        glow::TEXTURE_WRAP_T,
        glow::CLAMP_TO_EDGE as i32,
    );
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGBA8 as i32,
        ww,
        hh,
        0,
        glow::RGBA,
        glow::UNSIGNED_BYTE,
        None,
    );

    gl.bind_renderbuffer(glow::RENDERBUFFER, Some(depth_rb));
    gl.renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH_COMPONENT24, ww, hh);

    gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
    gl.framebuffer_texture_2d(
        glow::FRAMEBUFFER,
        glow::COLOR_ATTACHMENT0,
        glow::TEXTURE_2D,
        Some(tex),
        0,
    );
    gl.framebuffer_renderbuffer(
        glow::FRAMEBUFFER,
        glow::DEPTH_ATTACHMENT,
        glow::RENDERBUFFER,
        Some(depth_rb),
    );

    let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
    if status != glow::FRAMEBUFFER_COMPLETE {
        // clean up
        gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        gl.bind_texture(glow::TEXTURE_2D, None);
        gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        gl.delete_framebuffer(fbo);
        gl.delete_texture(tex);
        gl.delete_renderbuffer(depth_rb);
        return Err(EngineError::GlCreate(format!(
            "framebuffer incomplete: 0x{status:x}"
        )));
    }

    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
    gl.bind_texture(glow::TEXTURE_2D, None);
    gl.bind_renderbuffer(glow::RENDERBUFFER, None);

    Ok(RenderTarget {
        fbo,
        tex,
        depth_rb,
        w: ww,
        h: hh,
    })
}

// -------------------------------------------------------------------------------------------------
// Shaders
// -------------------------------------------------------------------------------------------------

pub const MESH_VERT: &str = r#"#version 330 core
layout (location = 0) in vec3 a_pos;
layout (location = 1) in vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_proj;
uniform mat3 u_normal;
out vec3 v_normal;
void main() {
    v_normal = u_normal * a_normal;
    gl_Position = u_proj * u_view * u_model * vec4(a_pos, 1.0);
}
"#;

pub const MESH_FRAG: &str = r#"#version 330 core
in vec3 v_normal;
out vec4 frag_color;
uniform vec3 u_color;
uniform vec3 u_light;
void main() {
    vec3 n = normalize(v_normal);
    // Headlight: the light direction is +Z in view space.
    float diffuse = max(n.z, 0.0);
    vec3 shaded = u_color * u_light * (0.1 + 0.9 * diffuse);
    frag_color = vec4(shaded, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_size_roundtrips_exactly() {
        let mut surface = ExternalSurface::new(300, 300);
        surface.set_size(641, 479);
        assert_eq!(surface.size(), (641, 479));
    }

    #[test]
    fn surface_clamps_degenerate_sizes() {
        let mut surface = ExternalSurface::new(0, -3);
        assert_eq!(surface.size(), (1, 1));
        surface.set_size(-10, 0);
        assert_eq!(surface.size(), (1, 1));
    }

    #[test]
    fn hooks_answer_current_by_default() {
        struct Host;
        impl SurfaceHooks for Host {}
        assert!(Host.context_is_current());
    }
}
