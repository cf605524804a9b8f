//! C-style embedding surface.
//!
//! Foreign hosts (C, C++, or Rust code behind a stable ABI) drive the bridge
//! through these free functions instead of owning an [`ExternalBridge`]
//! value. The bridge handle lives in a thread-local slot: the embedding
//! contract is single-threaded, so the slot needs no locking, and every call
//! must come from the thread that called [`glint_initialize`].
//!
//! Misuse is a programming bug, not a runtime condition: any call before
//! `glint_initialize`, a second `glint_initialize`, or a second
//! `glint_shutdown` aborts with a panic naming the violated precondition.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CString};

use crate::ExternalBridge;

/// The host's GL symbol resolver, e.g. `glXGetProcAddress` or
/// `wglGetProcAddress` wrapped by the host's windowing library.
pub type LoaderFn = unsafe extern "C" fn(name: *const c_char) -> *const c_void;

thread_local! {
    static BRIDGE: RefCell<Option<ExternalBridge>> = const { RefCell::new(None) };
}

fn with_bridge<R>(op: &str, f: impl FnOnce(&mut ExternalBridge) -> R) -> R {
    BRIDGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(bridge) => f(bridge),
            None => panic!("{op} called before glint_initialize"),
        }
    })
}

/// Binds the host GL loader and builds the render surface and demo scene.
///
/// Must be called exactly once before any other `glint_` function, with the
/// GPU context current on the calling thread.
#[no_mangle]
pub unsafe extern "C" fn glint_initialize(load: LoaderFn, width: i32, height: i32) {
    BRIDGE.with(|slot| {
        let mut slot = slot.borrow_mut();
        assert!(
            slot.is_none(),
            "glint_initialize called twice without glint_shutdown"
        );

        let bridge = ExternalBridge::initialize(
            |name| {
                let name = CString::new(name).expect("GL symbol names contain no NUL");
                load(name.as_ptr())
            },
            width,
            height,
        )
        .unwrap_or_else(|e| panic!("glint_initialize: {e}"));

        *slot = Some(bridge);
    });
}

/// Releases the render surface and interactor.
#[no_mangle]
pub unsafe extern "C" fn glint_shutdown() {
    BRIDGE.with(|slot| {
        let bridge = slot
            .borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("glint_shutdown called before glint_initialize"));
        bridge.shutdown();
    });
}

/// Renders one frame into the currently bound framebuffer and clears the
/// dirty flag.
#[no_mangle]
pub unsafe extern "C" fn glint_render_frame() {
    with_bridge("glint_render_frame", |b| b.render_frame());
}

/// Whether a repaint is owed since the last `glint_render_frame`.
#[no_mangle]
pub unsafe extern "C" fn glint_is_dirty() -> bool {
    with_bridge("glint_is_dirty", |b| b.is_dirty())
}

/// Updates render-surface and interactor dimensions.
#[no_mangle]
pub unsafe extern "C" fn glint_resize(width: i32, height: i32) {
    with_bridge("glint_resize", |b| b.resize(width, height));
}

#[no_mangle]
pub unsafe extern "C" fn glint_pointer_move(x: i32, y: i32) {
    with_bridge("glint_pointer_move", |b| b.pointer_move(x as f32, y as f32));
}

#[no_mangle]
pub unsafe extern "C" fn glint_pointer_buttons_changed(
    primary: bool,
    secondary: bool,
    middle: bool,
) {
    with_bridge("glint_pointer_buttons_changed", |b| {
        b.pointer_buttons_changed(primary, secondary, middle)
    });
}

/// `delta` is in wheel notches; positive dollies toward the scene.
#[no_mangle]
pub unsafe extern "C" fn glint_pointer_wheel(delta: i32) {
    with_bridge("glint_pointer_wheel", |b| b.pointer_wheel(delta as f32));
}
