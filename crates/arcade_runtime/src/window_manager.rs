//! Floating window geometry transitions used by the shell reducer.
//!
//! Position and the minimized flag are the only geometry the shell has. Dragging keeps the whole
//! window inside the viewport; when the window is larger than the viewport the top-left corner
//! is pinned to the origin.

use crate::model::{DragSession, FloatingWindowState, PointerPosition, Viewport};

/// Widest expanded window.
pub const EXPANDED_MAX_WIDTH: i32 = 384;
/// Tallest expanded window.
pub const EXPANDED_MAX_HEIGHT: i32 = 600;
/// Collapsed window width.
pub const MINIMIZED_WIDTH: i32 = 160;
/// Collapsed window height.
pub const MINIMIZED_HEIGHT: i32 = 36;

/// Window size for the current display state.
pub fn window_size(minimized: bool, viewport: Viewport) -> (i32, i32) {
    if minimized {
        return (MINIMIZED_WIDTH, MINIMIZED_HEIGHT);
    }
    let width = EXPANDED_MAX_WIDTH.min(viewport.w.saturating_mul(9) / 10);
    let height = EXPANDED_MAX_HEIGHT.min(viewport.h.saturating_mul(85) / 100);
    (width.max(0), height.max(0))
}

/// Clamps a top-left corner so a `size` window stays inside `viewport`.
pub fn clamp_position(
    position: PointerPosition,
    size: (i32, i32),
    viewport: Viewport,
) -> PointerPosition {
    PointerPosition {
        x: position.x.min(viewport.w - size.0).max(0),
        y: position.y.min(viewport.h - size.1).max(0),
    }
}

/// Starts a drag, capturing the pointer's offset from the window corner.
pub fn begin_drag(window: &mut FloatingWindowState, pointer: PointerPosition) {
    window.dragging = Some(DragSession {
        offset: PointerPosition {
            x: pointer.x - window.position.x,
            y: pointer.y - window.position.y,
        },
    });
}

/// Moves the window under the pointer. Returns whether the position changed.
pub fn drag_to(
    window: &mut FloatingWindowState,
    pointer: PointerPosition,
    viewport: Viewport,
) -> bool {
    let Some(session) = window.dragging else {
        return false;
    };
    let target = PointerPosition {
        x: pointer.x - session.offset.x,
        y: pointer.y - session.offset.y,
    };
    let next = clamp_position(target, window_size(window.minimized, viewport), viewport);
    if next == window.position {
        return false;
    }
    window.position = next;
    true
}

/// Ends any drag.
pub fn end_drag(window: &mut FloatingWindowState) {
    window.dragging = None;
}

/// Pulls the window back inside `viewport` after the viewport or the window size changed.
/// Returns whether the position moved.
pub fn fit_to_viewport(window: &mut FloatingWindowState, viewport: Viewport) -> bool {
    let next = clamp_position(
        window.position,
        window_size(window.minimized, viewport),
        viewport,
    );
    if next == window.position {
        return false;
    }
    window.position = next;
    true
}

/// Flips expanded/minimized. Position is kept unless the new size no longer fits.
pub fn toggle_minimized(window: &mut FloatingWindowState, viewport: Viewport) {
    window.minimized = !window.minimized;
    fit_to_viewport(window, viewport);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::Rng;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    use super::*;

    fn inside(window: &FloatingWindowState, viewport: Viewport) -> bool {
        let (w, h) = window_size(window.minimized, viewport);
        let fits_x = w > viewport.w || window.position.x + w <= viewport.w;
        let fits_y = h > viewport.h || window.position.y + h <= viewport.h;
        window.position.x >= 0 && window.position.y >= 0 && fits_x && fits_y
    }

    #[test]
    fn sizes_follow_viewport_caps() {
        assert_eq!(window_size(false, Viewport { w: 1920, h: 1080 }), (384, 600));
        assert_eq!(window_size(false, Viewport { w: 400, h: 500 }), (360, 425));
        assert_eq!(window_size(true, Viewport { w: 400, h: 500 }), (160, 36));
    }

    #[test]
    fn drag_keeps_the_pointer_offset() {
        let viewport = Viewport { w: 1200, h: 900 };
        let mut window = FloatingWindowState::default();
        begin_drag(&mut window, PointerPosition { x: 50, y: 30 });
        assert!(drag_to(&mut window, PointerPosition { x: 150, y: 80 }, viewport));
        assert_eq!(window.position, PointerPosition { x: 120, y: 70 });

        end_drag(&mut window);
        assert!(!drag_to(&mut window, PointerPosition { x: 600, y: 600 }, viewport));
        assert_eq!(window.position, PointerPosition { x: 120, y: 70 });
    }

    #[test]
    fn drag_clamps_to_each_edge() {
        let viewport = Viewport { w: 800, h: 700 };
        let mut window = FloatingWindowState::default();
        begin_drag(&mut window, PointerPosition { x: 20, y: 20 });

        drag_to(&mut window, PointerPosition { x: -500, y: -500 }, viewport);
        assert_eq!(window.position, PointerPosition { x: 0, y: 0 });

        drag_to(&mut window, PointerPosition { x: 5_000, y: 5_000 }, viewport);
        assert_eq!(window.position, PointerPosition { x: 800 - 384, y: 700 - 595 });
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let viewport = Viewport { w: 100, h: 20 };
        let mut window = FloatingWindowState {
            minimized: true,
            ..FloatingWindowState::default()
        };
        begin_drag(&mut window, PointerPosition { x: 25, y: 25 });
        drag_to(&mut window, PointerPosition { x: 90, y: 90 }, viewport);
        assert_eq!(window.position, PointerPosition { x: 0, y: 0 });
    }

    #[test]
    fn random_trajectories_never_leave_the_viewport() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xD7A6);
        for _ in 0..200 {
            let viewport = Viewport {
                w: rng.gen_range(200..2_000),
                h: rng.gen_range(200..1_400),
            };
            let mut window = FloatingWindowState {
                minimized: rng.gen_bool(0.3),
                ..FloatingWindowState::default()
            };
            window.position = clamp_position(
                window.position,
                window_size(window.minimized, viewport),
                viewport,
            );
            begin_drag(
                &mut window,
                PointerPosition {
                    x: rng.gen_range(-100..2_100),
                    y: rng.gen_range(-100..1_500),
                },
            );
            for _ in 0..50 {
                let pointer = PointerPosition {
                    x: rng.gen_range(-3_000..3_000),
                    y: rng.gen_range(-3_000..3_000),
                };
                drag_to(&mut window, pointer, viewport);
                assert!(inside(&window, viewport), "{window:?} escaped {viewport:?}");
            }
        }
    }

    #[test]
    fn minimizing_keeps_position() {
        let mut window = FloatingWindowState {
            position: PointerPosition { x: 300, y: 140 },
            ..FloatingWindowState::default()
        };
        let viewport = Viewport { w: 1200, h: 900 };
        toggle_minimized(&mut window, viewport);
        assert!(window.minimized);
        assert_eq!(window.position, PointerPosition { x: 300, y: 140 });
        toggle_minimized(&mut window, viewport);
        assert!(!window.minimized);
        assert_eq!(window.position, PointerPosition { x: 300, y: 140 });
    }

    #[test]
    fn expanding_near_the_edge_pulls_the_window_back_inside() {
        let viewport = Viewport { w: 800, h: 700 };
        let mut window = FloatingWindowState {
            position: PointerPosition { x: 620, y: 640 },
            minimized: true,
            ..FloatingWindowState::default()
        };
        toggle_minimized(&mut window, viewport);
        assert!(!window.minimized);
        assert_eq!(window.position, PointerPosition { x: 416, y: 105 });
        assert!(inside(&window, viewport));
    }

    #[test]
    fn shrinking_viewport_reclamps_the_window() {
        let mut window = FloatingWindowState {
            position: PointerPosition { x: 500, y: 200 },
            ..FloatingWindowState::default()
        };
        assert!(!fit_to_viewport(&mut window, Viewport { w: 1200, h: 900 }));

        let small = Viewport { w: 640, h: 480 };
        assert!(fit_to_viewport(&mut window, small));
        assert_eq!(window.position, PointerPosition { x: 256, y: 72 });
        assert!(inside(&window, small));
    }
}
