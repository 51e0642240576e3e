//! Runtime-effect dispatch for the arcade host boundary.

use std::time::Duration;

use arcade_game_contract::ScopedTimeout;
use leptos::{logging, spawn_local, Callable, SignalGetUntracked};

use crate::{
    host::ArcadeHostContext,
    model::FontSettings,
    persistence,
    reducer::{LoadOrigin, RuntimeEffect, ShellAction},
    runtime_context::ArcadeRuntimeContext,
};

/// How long a shell notice stays up.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

pub(super) fn run_runtime_effect(
    host: ArcadeHostContext,
    runtime: ArcadeRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::PersistSnapshot => persist_snapshot(host, runtime),
        RuntimeEffect::LoadSnapshot => load_snapshot(host, runtime),
        RuntimeEffect::PostToHost(message) => host.post(&message),
        RuntimeEffect::PlaySound(cue) => host.sound().play(cue),
        RuntimeEffect::ScheduleNoticeDismiss { id } => schedule_notice_dismiss(runtime, id),
        RuntimeEffect::ApplyFont(font) => apply_font(&host, &font),
    }
}

fn persist_snapshot(host: ArcadeHostContext, runtime: ArcadeRuntimeContext) {
    let state = runtime.state.get_untracked();
    spawn_local(async move {
        if let Err(err) = persistence::save_snapshot(host.storage().as_ref(), &state).await {
            logging::warn!("persist autosave failed: {err}");
        }
    });
}

fn load_snapshot(host: ArcadeHostContext, runtime: ArcadeRuntimeContext) {
    spawn_local(async move {
        let snapshot = persistence::load_snapshot(host.storage().as_ref()).await;
        runtime.dispatch.call(ShellAction::HydrateSnapshot {
            snapshot,
            origin: LoadOrigin::Manual,
        });
    });
}

fn schedule_notice_dismiss(runtime: ArcadeRuntimeContext, id: u64) {
    let dispatch = runtime.dispatch;
    match ScopedTimeout::start(NOTICE_DURATION, move || {
        dispatch.call(ShellAction::ClearNotice { id });
    }) {
        Ok(guard) => runtime.notice_timer.replace(guard),
        Err(err) => logging::warn!("notice dismissal not scheduled: {err}"),
    }
}

fn apply_font(host: &ArcadeHostContext, font: &FontSettings) {
    if let Err(err) = host.fonts().apply(&font.url, &font.family) {
        logging::warn!("font install failed: {err}");
    }
}
