//! Frame shared by every game surface.

use leptos::*;

#[component]
/// Toolbar with the game's status line and a new-round button, followed by the board.
pub fn GameFrame(
    game: &'static str,
    #[prop(into)] status: Signal<String>,
    #[prop(into)] on_new_game: Callback<()>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="game-surface" data-game=game>
            <div class="game-toolbar">
                <span class="game-status" role="status" aria-live="polite">{move || status.get()}</span>
                <button type="button" class="game-new-round no-drag" on:click=move |_| on_new_game.call(())>
                    "New game"
                </button>
            </div>
            <div class="game-board">{children()}</div>
        </div>
    }
}
