//! Host-side runtime helpers for executing reducer effects and querying the browser environment.
//!
//! The reducer stays pure; everything that touches storage, the parent frame, audio or the
//! document goes through [`ArcadeHostContext`], which wraps the injected [`HostServices`].

mod boot;
mod effects;

use std::rc::Rc;

use leptos::{logging, Callback};
use platform_host::{
    FontInstaller, HostChannel, HostServices, HostStrategy, HostSubscription, SaveStore,
    ShellMessage, SoundService, TextGenerationService,
};

use crate::{
    model::Viewport,
    reducer::{RuntimeEffect, ShellAction},
    runtime_context::ArcadeRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for arcade runtime side effects.
pub struct ArcadeHostContext {
    services: HostServices,
}

impl ArcadeHostContext {
    /// Wraps the services assembled by the entry layer.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Autosave storage.
    pub fn storage(&self) -> Rc<dyn SaveStore> {
        self.services.storage.clone()
    }

    /// Parent-frame channel.
    pub fn bridge(&self) -> Rc<dyn HostChannel> {
        self.services.bridge.clone()
    }

    /// Remote text generation handed to games.
    pub fn text_generation(&self) -> Rc<dyn TextGenerationService> {
        self.services.text_generation.clone()
    }

    /// Feedback tones.
    pub fn sound(&self) -> Rc<dyn SoundService> {
        self.services.sound.clone()
    }

    /// Font installation.
    pub fn fonts(&self) -> Rc<dyn FontInstaller> {
        self.services.fonts.clone()
    }

    /// Strategy the services were assembled for.
    pub fn host_strategy(&self) -> HostStrategy {
        self.services.host_strategy
    }

    /// Posts one message to the parent frame. Failures are logged.
    pub fn post(&self, message: &ShellMessage) {
        if let Err(err) = self.services.bridge.post(message) {
            logging::warn!("host bridge post failed: {err}");
        }
    }

    /// Subscribes to the parent frame, asks it for a sync and hydrates from storage.
    ///
    /// The returned subscription keeps the inbound listener attached until it is dropped.
    pub fn install_boot_hydration(
        &self,
        dispatch: Callback<ShellAction>,
    ) -> Option<HostSubscription> {
        boot::install_boot_hydration(self.clone(), dispatch)
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: ArcadeRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }

    /// Current browser viewport; 1024x768 outside the browser.
    pub fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let w = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32);
                let h = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32);
                if let (Some(w), Some(h)) = (w, h) {
                    return Viewport { w, h };
                }
            }
        }
        Viewport::default()
    }
}

impl std::fmt::Debug for ArcadeHostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcadeHostContext")
            .field("services", &self.services)
            .finish()
    }
}
