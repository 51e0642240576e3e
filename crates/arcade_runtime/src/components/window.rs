use super::*;
use super::{game_host::GameHost, menu::GameMenu, settings::SettingsPanel};
use crate::{
    model::Screen,
    reducer::ShellAction,
    theme::{resolve_style, StyleContext},
    window_manager::window_size,
};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn FloatingWindow() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let viewport = create_rw_signal(runtime.host.get_value().viewport());
    let resize = window_event_listener(ev::resize, move |_| {
        let next = runtime.host.get_value().viewport();
        viewport.set(next);
        runtime.dispatch_action(ShellAction::ResizeViewport { viewport: next });
    });
    on_cleanup(move || resize.remove());

    let style = create_memo(move |_| {
        runtime.state.with(|state| {
            resolve_style(
                state.theme_mode,
                &state.custom_colors,
                &state.host_colors,
                &state.particle_config,
            )
        })
    });
    let screen = create_memo(move |_| runtime.state.with(|state| state.screen));
    let notice = create_memo(move |_| {
        runtime
            .state
            .with(|state| state.notice.as_ref().map(|notice| notice.text.clone()))
    });
    let minimized = create_memo(move |_| runtime.window.with(|window| window.minimized));

    let frame_style = move || {
        let geometry = runtime.window.get();
        let (w, h) = window_size(geometry.minimized, viewport.get());
        let resolved = style.get();
        format!(
            "position:fixed;left:{}px;top:{}px;width:{}px;height:{}px;{}box-shadow:var(--arcade-effect);",
            geometry.position.x,
            geometry.position.y,
            w,
            h,
            resolved.css_vars()
        )
    };

    let begin_drag = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev.pointer_type(), ev.button(), ev.is_primary()) {
            return;
        }
        if is_drag_exempt_target(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(ShellAction::BeginDrag {
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.window.with_untracked(|window| window.dragging.is_none()) {
            return;
        }
        if ev.pointer_type() != "mouse" && !ev.is_primary() {
            return;
        }
        runtime.dispatch_action(ShellAction::UpdateDrag {
            pointer: pointer_from_pointer_event(&ev),
            viewport: viewport.get_untracked(),
        });
    };
    let on_pointer_end = move |_: web_sys::PointerEvent| {
        if runtime.window.with_untracked(|window| window.dragging.is_some()) {
            runtime.dispatch_action(ShellAction::EndDrag);
        }
    };

    view! {
        <section
            class="arcade-window"
            class:minimized=move || minimized.get()
            data-theme=move || style.get().mode.id()
            style=frame_style
            role="dialog"
            aria-label="Tavern Arcade"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <ParticleLayer style=style />
            <header class="arcade-titlebar" on:pointerdown=begin_drag>
                <span class="arcade-title">
                    {move || match screen.get() {
                        Screen::Game(game) => format!("{} {}", game.glyph(), game.title()),
                        Screen::Settings => "Settings".to_string(),
                        Screen::Menu => "Tavern Arcade".to_string(),
                    }}
                </span>
                <div class="arcade-titlebar-controls">
                    <button
                        type="button"
                        aria-label=move || if minimized.get() { "Expand window" } else { "Minimize window" }
                        on:mousedown=move |ev| stop_mouse_event(&ev)
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(ShellAction::ToggleMinimized {
                                viewport: viewport.get_untracked(),
                            });
                        }
                    >
                        {move || if minimized.get() { "□" } else { "_" }}
                    </button>
                </div>
            </header>
            <Show when=move || !minimized.get() fallback=|| ()>
                <div class="arcade-body">
                    {move || match screen.get() {
                        Screen::Menu => view! { <GameMenu /> }.into_view(),
                        Screen::Settings => view! { <SettingsPanel /> }.into_view(),
                        Screen::Game(game) => view! { <GameHost game=game /> }.into_view(),
                    }}
                </div>
            </Show>
            <Show when=move || notice.get().is_some() fallback=|| ()>
                <div class="arcade-notice" role="status" aria-live="polite">
                    {move || notice.get().unwrap_or_default()}
                </div>
            </Show>
        </section>
    }
}

#[component]
fn ParticleLayer(style: Memo<StyleContext>) -> impl IntoView {
    let particles = move || style.get().particles;

    view! {
        <Show when=move || particles().enabled fallback=|| ()>
            <div
                class="arcade-particles"
                aria-hidden="true"
                data-density=move || particles().density.to_string()
                style=move || format!("--arcade-particle:{};", particles().color)
            />
        </Show>
    }
}
