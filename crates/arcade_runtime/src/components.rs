//! Arcade shell UI composition: the floating window, menu, settings and game host.

mod game_host;
mod menu;
mod settings;
mod window;

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use self::window::FloatingWindow;
use crate::model::PointerPosition;

pub use crate::runtime_context::{use_arcade_runtime, ArcadeProvider, ArcadeRuntimeContext};

/// Selector for press targets that never start a window drag.
pub const DRAG_EXEMPT_SELECTOR: &str = "button, input, select, textarea, .no-drag";

#[component]
/// Root of the arcade: renders the floating window while the host has it toggled on.
pub fn ArcadeShell() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let visible = create_memo(move |_| runtime.state.with(|state| state.visible));

    view! {
        <Show when=move || visible.get() fallback=|| ()>
            <FloatingWindow />
        </Show>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Whether the press landed on a control (or inside an element marked `no-drag`).
#[cfg(target_arch = "wasm32")]
fn is_drag_exempt_target(ev: &web_sys::PointerEvent) -> bool {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(DRAG_EXEMPT_SELECTOR).ok().flatten())
        .is_some()
}

#[cfg(not(target_arch = "wasm32"))]
fn is_drag_exempt_target(_: &web_sys::PointerEvent) -> bool {
    false
}

/// Mouse presses must use the main button; touch and pen presses must be the primary pointer.
fn is_primary_press(pointer_type: &str, button: i16, is_primary: bool) -> bool {
    if pointer_type == "mouse" {
        button == 0
    } else {
        is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_presses_start_drags() {
        assert!(is_primary_press("mouse", 0, true));
        assert!(!is_primary_press("mouse", 2, true));
        assert!(is_primary_press("touch", 0, true));
        assert!(!is_primary_press("touch", 0, false));
        assert!(!is_primary_press("pen", 0, false));
    }
}
