//! Pointer-input to camera translation.
//!
//! The interactor owns no GL state: it tracks button flags, the pointer
//! position and the active drag gesture, and turns pointer deltas into
//! [`OrbitCamera`] operations. Anything that changed the camera (or the
//! gesture state) is reported through the registered [`RenderNotifier`].

use glint_scene::OrbitCamera;

use crate::RenderNotifier;

/// One full orbit per horizontal viewport traversal.
const ROTATE_DEGREES: f32 = 180.0;

/// Dolly factor per wheel notch.
const WHEEL_DOLLY_BASE: f32 = 1.1;

/// Dolly factor base for vertical drags, applied over `10 * dy / height`.
const DRAG_DOLLY_BASE: f32 = 1.1;

/// Pointer button flags as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

/// The camera gesture bound to the held button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    /// Primary button: orbit around the target.
    Rotate,
    /// Middle button: slide the target in the view plane.
    Pan,
    /// Secondary button: vertical drag dollies.
    Dolly,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    mode: DragMode,
    last: (f32, f32),
}

/// Translates host pointer events into camera motion.
pub struct Interactor {
    width: i32,
    height: i32,
    pointer: (f32, f32),
    buttons: PointerButtons,
    drag: Option<Drag>,
    notifier: Box<dyn RenderNotifier>,
}

impl std::fmt::Debug for Interactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interactor")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pointer", &self.pointer)
            .field("buttons", &self.buttons)
            .field("drag", &self.drag)
            .field("notifier", &"<render notifier>")
            .finish()
    }
}

impl Interactor {
    pub fn new(width: i32, height: i32, notifier: Box<dyn RenderNotifier>) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pointer: (0.0, 0.0),
            buttons: PointerButtons::default(),
            drag: None,
            notifier,
        }
    }

    /// Viewport dimensions; drag deltas are scaled by them.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn buttons(&self) -> PointerButtons {
        self.buttons
    }

    /// Moves the pointer; while a drag is active, applies its gesture.
    pub fn pointer_move(&mut self, x: f32, y: f32, camera: &mut OrbitCamera) {
        self.pointer = (x, y);

        let Some(drag) = self.drag.as_mut() else {
            return;
        };

        let dx = x - drag.last.0;
        let dy = y - drag.last.1;
        drag.last = (x, y);
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let w = self.width as f32;
        let h = self.height as f32;
        match drag.mode {
            DragMode::Rotate => {
                camera.orbit(-dx * ROTATE_DEGREES / w, dy * ROTATE_DEGREES / h);
            }
            DragMode::Pan => {
                // World units per pixel at the target's depth.
                let wpp = 2.0 * camera.distance * (camera.fov_y.to_radians() * 0.5).tan() / h;
                camera.pan(-dx * wpp, dy * wpp);
            }
            DragMode::Dolly => {
                camera.dolly(DRAG_DOLLY_BASE.powf(-dy * 10.0 / h));
            }
        }

        self.notifier.request_render();
    }

    /// Applies a host button-state report.
    ///
    /// Transitions are computed against the stored flags, so a repeated
    /// identical report fires no press/release and requests no render. A
    /// genuine press anchors its gesture at the current pointer position; a
    /// release hands the gesture to the next held button, if any.
    pub fn buttons_changed(&mut self, primary: bool, secondary: bool, middle: bool) {
        let next = PointerButtons {
            primary,
            secondary,
            middle,
        };
        if next == self.buttons {
            return;
        }

        if next.primary != self.buttons.primary {
            log::debug!(
                "primary button {} at {:?}",
                if next.primary { "pressed" } else { "released" },
                self.pointer
            );
        }
        if next.secondary != self.buttons.secondary {
            log::debug!(
                "secondary button {} at {:?}",
                if next.secondary { "pressed" } else { "released" },
                self.pointer
            );
        }
        if next.middle != self.buttons.middle {
            log::debug!(
                "middle button {} at {:?}",
                if next.middle { "pressed" } else { "released" },
                self.pointer
            );
        }

        self.buttons = next;

        let mode = if next.primary {
            Some(DragMode::Rotate)
        } else if next.middle {
            Some(DragMode::Pan)
        } else if next.secondary {
            Some(DragMode::Dolly)
        } else {
            None
        };

        match (self.drag.map(|d| d.mode), mode) {
            // The held gesture survives extra presses/releases of other buttons.
            (Some(current), Some(next_mode)) if current == next_mode => {}
            (_, Some(next_mode)) => {
                self.drag = Some(Drag {
                    mode: next_mode,
                    last: self.pointer,
                });
            }
            (_, None) => self.drag = None,
        }

        self.notifier.request_render();
    }

    /// Wheel dolly; `delta` is in notches, positive toward the scene.
    pub fn wheel(&mut self, delta: f32, camera: &mut OrbitCamera) {
        if delta == 0.0 {
            return;
        }
        camera.dolly(WHEEL_DOLLY_BASE.powf(delta));
        self.notifier.request_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingNotifier(Rc<Cell<u32>>);

    impl RenderNotifier for CountingNotifier {
        fn request_render(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn rig() -> (Interactor, OrbitCamera, CountingNotifier) {
        let notifier = CountingNotifier::default();
        let interactor = Interactor::new(300, 300, Box::new(notifier.clone()));
        (interactor, OrbitCamera::default(), notifier)
    }

    #[test]
    fn move_without_buttons_is_inert() {
        let (mut ia, mut cam, n) = rig();
        let before = cam;
        ia.pointer_move(10.0, 20.0, &mut cam);
        ia.pointer_move(150.0, 40.0, &mut cam);
        assert_eq!(cam, before);
        assert_eq!(n.0.get(), 0);
    }

    #[test]
    fn repeated_identical_button_state_fires_nothing() {
        let (mut ia, _cam, n) = rig();

        ia.buttons_changed(true, false, false);
        assert_eq!(n.0.get(), 1);

        // Hosts resend the full state every pointer event; only transitions count.
        ia.buttons_changed(true, false, false);
        ia.buttons_changed(true, false, false);
        assert_eq!(n.0.get(), 1);

        ia.buttons_changed(false, false, false);
        assert_eq!(n.0.get(), 2);
        ia.buttons_changed(false, false, false);
        assert_eq!(n.0.get(), 2);
    }

    #[test]
    fn primary_drag_orbits() {
        let (mut ia, mut cam, n) = rig();
        let before = cam;

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(true, false, false);
        ia.pointer_move(130.0, 100.0, &mut cam);

        assert_ne!(cam.azimuth, before.azimuth);
        assert_eq!(cam.distance, before.distance);
        assert!(n.0.get() >= 2);
    }

    #[test]
    fn redundant_press_does_not_reanchor_the_drag() {
        let (mut ia, mut cam, _n) = rig();

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(true, false, false);
        ia.pointer_move(130.0, 100.0, &mut cam);
        let after_first = cam;

        ia.buttons_changed(true, false, false);
        ia.pointer_move(160.0, 100.0, &mut cam);

        // Two 30px moves must rotate exactly twice as far as one. Azimuth is
        // stored mod 360, so compare the deltas on the circle.
        let per_step = after_first.azimuth - OrbitCamera::default().azimuth;
        let total = cam.azimuth - OrbitCamera::default().azimuth;
        let wrapped = (total - 2.0 * per_step).rem_euclid(360.0);
        assert!(wrapped < 1e-3 || wrapped > 360.0 - 1e-3, "got {wrapped}");
    }

    #[test]
    fn middle_drag_pans_the_target() {
        let (mut ia, mut cam, _n) = rig();
        let before = cam;

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(false, false, true);
        ia.pointer_move(100.0, 160.0, &mut cam);

        assert_ne!(cam.target, before.target);
        assert_eq!(cam.azimuth, before.azimuth);
        assert_eq!(cam.elevation, before.elevation);
    }

    #[test]
    fn secondary_drag_dollies() {
        let (mut ia, mut cam, _n) = rig();
        let before = cam.distance;

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(false, true, false);
        ia.pointer_move(100.0, 40.0, &mut cam);

        // Dragging up moves the camera closer.
        assert!(cam.distance < before);
    }

    #[test]
    fn wheel_dollies_in_steps() {
        let (mut ia, mut cam, n) = rig();
        let before = cam.distance;

        ia.wheel(1.0, &mut cam);
        assert!(cam.distance < before);
        assert_eq!(n.0.get(), 1);

        ia.wheel(-1.0, &mut cam);
        assert!((cam.distance - before).abs() < 1e-5);

        ia.wheel(0.0, &mut cam);
        assert_eq!(n.0.get(), 2);
    }

    #[test]
    fn gesture_survives_a_secondary_chord() {
        let (mut ia, mut cam, _n) = rig();

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(true, false, false);
        ia.pointer_move(120.0, 100.0, &mut cam);
        let mid = cam;

        // Pressing secondary while primary is held keeps the rotate gesture.
        ia.buttons_changed(true, true, false);
        ia.pointer_move(140.0, 100.0, &mut cam);

        assert_ne!(cam.azimuth, mid.azimuth);
        assert_eq!(cam.distance, mid.distance);
    }

    #[test]
    fn release_hands_the_gesture_to_the_next_held_button() {
        let (mut ia, mut cam, _n) = rig();

        ia.pointer_move(100.0, 100.0, &mut cam);
        ia.buttons_changed(true, true, false);
        ia.buttons_changed(false, true, false);
        let before = cam.distance;
        ia.pointer_move(100.0, 70.0, &mut cam);

        // Secondary took over: vertical motion now dollies.
        assert!(cam.distance < before);
    }

    #[test]
    fn identical_sequences_produce_identical_poses() {
        let run = || {
            let (mut ia, mut cam, _n) = rig();
            ia.pointer_move(50.0, 50.0, &mut cam);
            ia.buttons_changed(true, false, false);
            ia.pointer_move(80.0, 65.0, &mut cam);
            ia.buttons_changed(false, false, false);
            ia.wheel(2.0, &mut cam);
            cam
        };
        assert_eq!(run(), run());
    }
}
