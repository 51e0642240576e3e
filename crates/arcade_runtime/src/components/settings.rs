use super::*;
use crate::{
    model::{
        ColorSlot, FontSettings, ParticleColor, ParticleConfig, Screen, ThemeMode,
        MAX_PARTICLE_DENSITY, MIN_PARTICLE_DENSITY,
    },
    reducer::ShellAction,
    theme::{theme_name, CUSTOM_DEFAULTS},
};

#[component]
pub(super) fn SettingsPanel() -> impl IntoView {
    let runtime = use_arcade_runtime();

    view! {
        <div class="arcade-settings no-drag">
            <button
                type="button"
                on:click=move |_| runtime.dispatch_action(ShellAction::Navigate { screen: Screen::Menu })
            >
                "← Menu"
            </button>
            <ThemeSection />
            <CustomColorSection />
            <PresetSection />
            <ParticleSection />
            <FontSection />
            <AccountSection />
        </div>
    }
}

#[component]
fn ThemeSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let active = create_memo(move |_| runtime.state.with(|state| state.theme_mode));

    view! {
        <fieldset class="arcade-settings-section">
            <legend>"Theme"</legend>
            <div class="arcade-theme-grid">
                {ThemeMode::ALL
                    .into_iter()
                    .map(|mode| {
                        view! {
                            <button
                                type="button"
                                class="arcade-theme-choice"
                                class:active=move || active.get() == mode
                                aria-pressed=move || (active.get() == mode).to_string()
                                on:click=move |_| runtime.dispatch_action(ShellAction::SetThemeMode { mode })
                            >
                                {theme_name(mode)}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </fieldset>
    }
}

#[component]
fn CustomColorSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let is_custom = create_memo(move |_| {
        runtime
            .state
            .with(|state| state.theme_mode == ThemeMode::Custom)
    });

    view! {
        <Show when=move || is_custom.get() fallback=|| ()>
            <fieldset class="arcade-settings-section">
                <legend>"Custom colors"</legend>
                {ColorSlot::ALL
                    .into_iter()
                    .enumerate()
                    .map(|(index, slot)| {
                        let value = move || {
                            runtime.state.with(|state| {
                                state
                                    .custom_colors
                                    .get(slot)
                                    .unwrap_or(CUSTOM_DEFAULTS[index])
                                    .to_string()
                            })
                        };
                        view! {
                            <label class="arcade-color-field">
                                <span>{slot.label()}</span>
                                <input
                                    type="color"
                                    prop:value=value
                                    on:input=move |ev| {
                                        runtime.dispatch_action(ShellAction::SetCustomColor {
                                            slot,
                                            value: Some(event_target_value(&ev)),
                                        })
                                    }
                                />
                                <button
                                    type="button"
                                    aria-label=format!("Reset {}", slot.label())
                                    on:click=move |_| {
                                        runtime.dispatch_action(ShellAction::SetCustomColor {
                                            slot,
                                            value: None,
                                        })
                                    }
                                >
                                    "↺"
                                </button>
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
        </Show>
    }
}

#[component]
fn PresetSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let draft_name = create_rw_signal(String::new());
    let names = create_memo(move |_| {
        runtime.state.with(|state| {
            state
                .presets
                .iter()
                .map(|preset| preset.name.clone())
                .collect::<Vec<_>>()
        })
    });

    let save = move |_| {
        let name = draft_name.get_untracked();
        if name.trim().is_empty() {
            return;
        }
        runtime.dispatch_action(ShellAction::SavePreset { name });
        draft_name.set(String::new());
    };

    view! {
        <fieldset class="arcade-settings-section">
            <legend>"Presets"</legend>
            <div class="arcade-preset-form">
                <input
                    type="text"
                    placeholder="Preset name"
                    prop:value=move || draft_name.get()
                    on:input=move |ev| draft_name.set(event_target_value(&ev))
                />
                <button type="button" on:click=save>"Save colors"</button>
            </div>
            <ul class="arcade-preset-list">
                <For each=move || names.get() key=|name| name.clone() let:name>
                    {
                        let apply_name = name.clone();
                        let delete_name = name.clone();
                        view! {
                            <li>
                                <span>{name}</span>
                                <button
                                    type="button"
                                    on:click=move |_| {
                                        runtime.dispatch_action(ShellAction::ApplyPreset {
                                            name: apply_name.clone(),
                                        })
                                    }
                                >
                                    "Apply"
                                </button>
                                <button
                                    type="button"
                                    on:click=move |_| {
                                        runtime.dispatch_action(ShellAction::DeletePreset {
                                            name: delete_name.clone(),
                                        })
                                    }
                                >
                                    "Delete"
                                </button>
                            </li>
                        }
                    }
                </For>
            </ul>
        </fieldset>
    }
}

#[component]
fn ParticleSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let config = create_memo(move |_| runtime.state.with(|state| state.particle_config.clone()));
    let sound = create_memo(move |_| runtime.state.with(|state| state.sound_enabled));

    let update = move |edit: &dyn Fn(&mut ParticleConfig)| {
        let mut next = config.get_untracked();
        edit(&mut next);
        runtime.dispatch_action(ShellAction::SetParticleConfig { config: next });
    };

    view! {
        <fieldset class="arcade-settings-section">
            <legend>"Effects"</legend>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || sound.get()
                    on:change=move |ev| {
                        runtime.dispatch_action(ShellAction::SetSoundEnabled {
                            enabled: event_target_checked(&ev),
                        })
                    }
                />
                "Sound"
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || config.get().enabled
                    on:change=move |ev| {
                        let enabled = event_target_checked(&ev);
                        update(&|config| config.enabled = enabled);
                    }
                />
                "Particles"
            </label>
            <label>
                <span>{move || format!("Density {}", config.get().density)}</span>
                <input
                    type="range"
                    min=MIN_PARTICLE_DENSITY.to_string()
                    max=MAX_PARTICLE_DENSITY.to_string()
                    prop:value=move || config.get().density.to_string()
                    on:input=move |ev| {
                        if let Ok(density) = event_target_value(&ev).parse::<u32>() {
                            update(&|config| config.density = density);
                        }
                    }
                />
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || config.get().color == ParticleColor::Auto
                    on:change=move |ev| {
                        let auto = event_target_checked(&ev);
                        update(&|config| {
                            config.color = if auto {
                                ParticleColor::Auto
                            } else {
                                ParticleColor::Fixed("#ffffff".to_string())
                            };
                        });
                    }
                />
                "Match theme color"
            </label>
            <Show
                when=move || matches!(config.get().color, ParticleColor::Fixed(_))
                fallback=|| ()
            >
                <input
                    type="color"
                    prop:value=move || String::from(config.get().color)
                    on:input=move |ev| {
                        let color = ParticleColor::from(event_target_value(&ev));
                        update(&|config| config.color = color.clone());
                    }
                />
            </Show>
        </fieldset>
    }
}

#[component]
fn FontSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let current = runtime.state.with_untracked(|state| state.font_settings.clone());
    let url = create_rw_signal(current.url);
    let family = create_rw_signal(current.family);

    view! {
        <fieldset class="arcade-settings-section">
            <legend>"Font"</legend>
            <input
                type="url"
                placeholder="Stylesheet URL"
                prop:value=move || url.get()
                on:input=move |ev| url.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Font family"
                prop:value=move || family.get()
                on:input=move |ev| family.set(event_target_value(&ev))
            />
            <button
                type="button"
                on:click=move |_| {
                    runtime.dispatch_action(ShellAction::SetFontSettings {
                        font: FontSettings {
                            url: url.get_untracked().trim().to_string(),
                            family: family.get_untracked().trim().to_string(),
                        },
                    })
                }
            >
                "Apply font"
            </button>
        </fieldset>
    }
}

#[component]
fn AccountSection() -> impl IntoView {
    let runtime = use_arcade_runtime();
    let api_key = create_memo(move |_| runtime.state.with(|state| state.api_key.clone()));

    view! {
        <fieldset class="arcade-settings-section">
            <legend>"AI adventure"</legend>
            <input
                type="password"
                placeholder="Gemini API key"
                autocomplete="off"
                prop:value=move || api_key.get()
                on:change=move |ev| {
                    runtime.dispatch_action(ShellAction::SetApiKey {
                        api_key: event_target_value(&ev).trim().to_string(),
                    })
                }
            />
        </fieldset>
    }
}
