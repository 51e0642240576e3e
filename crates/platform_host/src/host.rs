//! Host service bundle injected into the arcade runtime by the entry layer.

use std::rc::Rc;

use crate::{
    FontInstaller, HostChannel, NoopFontInstaller, NoopHostChannel, NoopSaveStore,
    NoopSoundService, NoopTextGenerationService, SaveStore, SoundService, TextGenerationService,
};

/// How the shell is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Running inside a parent frame that speaks the bridge protocol.
    EmbeddedFrame,
    /// Running as a top-level page; outbound bridge messages go nowhere.
    Standalone,
    /// No browser services at all (native tests, tooling).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmbeddedFrame => "embedded-frame",
            Self::Standalone => "standalone",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host services.
///
/// Environment detection happens before this bundle reaches `arcade_runtime`, which keeps the
/// runtime free of browser adapter types.
#[derive(Clone)]
pub struct HostServices {
    /// Autosave record storage.
    pub storage: Rc<dyn SaveStore>,
    /// Outbound parent-frame channel.
    pub bridge: Rc<dyn HostChannel>,
    /// Remote text generation.
    pub text_generation: Rc<dyn TextGenerationService>,
    /// Feedback tones.
    pub sound: Rc<dyn SoundService>,
    /// Custom font installation.
    pub fonts: Rc<dyn FontInstaller>,
    /// Strategy the bundle was assembled for.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Bundle of inert services.
    pub fn headless() -> Self {
        Self {
            storage: Rc::new(NoopSaveStore),
            bridge: Rc::new(NoopHostChannel),
            text_generation: Rc::new(NoopTextGenerationService),
            sound: Rc::new(NoopSoundService),
            fonts: Rc::new(NoopFontInstaller),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
