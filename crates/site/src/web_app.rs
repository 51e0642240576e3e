use arcade_runtime::{ArcadeProvider, ArcadeShell};
use leptos::*;
use leptos_meta::*;

const BASE_STYLES: &str = r#"
html, body { margin: 0; background: transparent; overflow: hidden; }
.arcade-window {
  display: flex; flex-direction: column; z-index: 9999; overflow: hidden;
  border: 1px solid var(--arcade-border); border-radius: 12px;
  background: var(--arcade-bg-base); color: var(--arcade-text-main);
  font-family: inherit; touch-action: none;
}
.arcade-titlebar {
  display: flex; align-items: center; justify-content: space-between; gap: 8px;
  padding: 6px 10px; cursor: move; user-select: none;
  background: var(--arcade-bg-header); border-bottom: 1px solid var(--arcade-border);
}
.arcade-body { flex: 1; overflow: auto; padding: 10px; position: relative; }
.arcade-window button {
  background: var(--arcade-panel); color: var(--arcade-text-main);
  border: 1px solid var(--arcade-border); border-radius: 6px; cursor: pointer;
}
.arcade-window button:hover { border-color: var(--arcade-accent); }
.arcade-game-grid { list-style: none; padding: 0; display: grid; grid-template-columns: repeat(2, 1fr); gap: 8px; }
.arcade-game-tile { width: 100%; display: flex; flex-direction: column; align-items: flex-start; padding: 8px; }
.arcade-game-progress, .arcade-greeting { color: var(--arcade-text-dim); font-size: 12px; }
.arcade-theme-choice.active { background: var(--arcade-primary); }
.arcade-notice {
  position: absolute; left: 50%; bottom: 12px; transform: translateX(-50%);
  padding: 6px 12px; border-radius: 999px; background: var(--arcade-primary); color: var(--arcade-text-main);
}
.arcade-particles { position: absolute; inset: 0; pointer-events: none; opacity: 0.25; }
"#;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Tavern Arcade" />
        <Meta name="description" content="Casual mini-games in a floating window for the tavern chat." />
        <Style>{BASE_STYLES}</Style>

        <main class="site-root">
            <ArcadeEntry />
        </main>
    }
}

#[component]
pub fn ArcadeEntry() -> impl IntoView {
    view! {
        <ArcadeProvider host_services=platform_host_web::build_host_services()>
            <ArcadeShell />
        </ArcadeProvider>
    }
}
