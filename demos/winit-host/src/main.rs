//! A winit/glutin host embedding the glint bridge.
//!
//! The host owns the window and the GL context. The bridge renders into an
//! offscreen target the host allocates; the host blits it to the window and
//! only schedules repaints when the bridge reports a frame is owed.

use glint_bridge::ExternalBridge;
use glint_core::{load_embed_config_from, EmbedConfig};
use glint_runtime_glow::{create_render_target, EngineError};
use glow::HasContext;
use std::num::NonZeroU32;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use glutin::display::GetGlDisplay;
use glutin::prelude::*;

// raw-window-handle 0.5 traits (matches glutin 0.30)
use raw_window_handle::HasRawWindowHandle;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("[glint demo] error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let config = match std::env::var("GLINT_EMBED_CONFIG") {
        Ok(path) => load_embed_config_from(path)?,
        Err(_) => EmbedConfig::default(),
    };

    let event_loop = EventLoop::new();

    let window_builder = WindowBuilder::new()
        .with_title("glint: embedded render bridge")
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.width as f64,
            config.height as f64,
        ));

    let template = glutin::config::ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_depth_size(24)
        .with_stencil_size(0)
        .with_transparency(false);

    let display_builder =
        glutin_winit::DisplayBuilder::new().with_window_builder(Some(window_builder));

    let (window, gl_config) = display_builder
        .build(&event_loop, template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .unwrap()
        })
        .map_err(|e| EngineError::GlCreate(format!("DisplayBuilder.build: {e}")))?;

    let window = window
        .ok_or_else(|| EngineError::GlCreate("DisplayBuilder did not create a window".into()))?;
    let gl_display = gl_config.display();

    let raw_window_handle = window.raw_window_handle();

    let context_attributes = glutin::context::ContextAttributesBuilder::new()
        .with_profile(glutin::context::GlProfile::Core)
        .build(Some(raw_window_handle));

    let fallback_context_attributes = glutin::context::ContextAttributesBuilder::new()
        .with_profile(glutin::context::GlProfile::Core)
        .build(None);

    let not_current_gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .or_else(|_| gl_display.create_context(&gl_config, &fallback_context_attributes))
            .map_err(|e| EngineError::GlCreate(format!("create_context: {e}")))?
    };

    let (width, height) = {
        let s = window.inner_size();
        (s.width.max(1), s.height.max(1))
    };

    let attrs = glutin::surface::SurfaceAttributesBuilder::<glutin::surface::WindowSurface>::new()
        .build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &attrs)
            .map_err(|e| EngineError::GlCreate(format!("create_window_surface: {e}")))?
    };

    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .map_err(|e| EngineError::GlCreate(format!("make_current: {e}")))?;

    // The host keeps its own GL handle for the offscreen target and the blit;
    // the bridge builds its own from the same loader.
    let gl = unsafe {
        glow::Context::from_loader_function(|s| {
            gl_display.get_proc_address(std::ffi::CString::new(s).unwrap().as_c_str()) as *const _
        })
    };

    let mut bridge = ExternalBridge::with_config(
        |s| {
            gl_display.get_proc_address(std::ffi::CString::new(s).unwrap().as_c_str()) as *const _
        },
        EmbedConfig {
            width: width as i32,
            height: height as i32,
            ..config
        },
    )?;

    let mut rt = unsafe { create_render_target(&gl, width as i32, height as i32)? };

    // Full button state resent on every change; the bridge deduplicates.
    let (mut primary, mut secondary, mut middle) = (false, false, false);

    event_loop.run(move |event, _, control_flow| {
        // Dirty-driven: sleep until input, repaint only when the bridge owes one.
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,

                WindowEvent::Resized(physical_size) => {
                    let w = physical_size.width.max(1);
                    let h = physical_size.height.max(1);

                    gl_surface.resize(
                        &gl_context,
                        NonZeroU32::new(w).unwrap(),
                        NonZeroU32::new(h).unwrap(),
                    );

                    unsafe {
                        rt.resize(&gl, w as i32, h as i32);
                    }
                    bridge.resize(w as i32, h as i32);
                }

                WindowEvent::CursorMoved { position, .. } => {
                    bridge.pointer_move(position.x as f32, position.y as f32);
                }

                WindowEvent::MouseInput { state, button, .. } => {
                    let down = state == ElementState::Pressed;
                    match button {
                        MouseButton::Left => primary = down,
                        MouseButton::Right => secondary = down,
                        MouseButton::Middle => middle = down,
                        MouseButton::Other(_) => {}
                    }
                    bridge.pointer_buttons_changed(primary, secondary, middle);
                }

                WindowEvent::MouseWheel { delta, .. } => {
                    let notches = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                    };
                    bridge.pointer_wheel(notches);
                }

                _ => {}
            },

            Event::MainEventsCleared => {
                if bridge.is_dirty() {
                    window.request_redraw();
                }
            }

            Event::RedrawRequested(_) => {
                let (w, h) = bridge.size();

                unsafe {
                    // The bridge renders into whatever framebuffer is bound.
                    gl.bind_framebuffer(glow::FRAMEBUFFER, Some(rt.fbo));
                    bridge.render_frame();
                    gl.bind_framebuffer(glow::FRAMEBUFFER, None);

                    gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(rt.fbo));
                    gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
                    gl.blit_framebuffer(
                        0,
                        0,
                        w,
                        h,
                        0,
                        0,
                        w,
                        h,
                        glow::COLOR_BUFFER_BIT,
                        glow::NEAREST,
                    );
                    gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None);
                    gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
                }

                gl_surface.swap_buffers(&gl_context).unwrap();
                log::trace!("presented frame {}", bridge.frames_rendered());
            }

            _ => {}
        }
    });
}
