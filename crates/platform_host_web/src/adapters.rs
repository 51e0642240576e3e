//! Host-strategy detection and the concrete service bundle for browser builds.

use std::rc::Rc;

use platform_host::{HostServices, HostStrategy, NoopHostChannel};

use crate::{
    is_embedded_frame, GeminiTextGenerationService, ParentFrameChannel, WebFontInstaller,
    WebSaveStore, WebSoundService,
};

/// Detects how the current page is hosted.
pub fn selected_host_strategy() -> HostStrategy {
    if !cfg!(target_arch = "wasm32") {
        HostStrategy::Headless
    } else if is_embedded_frame() {
        HostStrategy::EmbeddedFrame
    } else {
        HostStrategy::Standalone
    }
}

/// Builds the service bundle for `strategy`.
pub fn host_services_for(strategy: HostStrategy) -> HostServices {
    match strategy {
        HostStrategy::EmbeddedFrame => HostServices {
            storage: Rc::new(WebSaveStore),
            bridge: Rc::new(ParentFrameChannel),
            text_generation: Rc::new(GeminiTextGenerationService),
            sound: Rc::new(WebSoundService),
            fonts: Rc::new(WebFontInstaller),
            host_strategy: strategy,
        },
        HostStrategy::Standalone => HostServices {
            storage: Rc::new(WebSaveStore),
            bridge: Rc::new(NoopHostChannel),
            text_generation: Rc::new(GeminiTextGenerationService),
            sound: Rc::new(WebSoundService),
            fonts: Rc::new(WebFontInstaller),
            host_strategy: strategy,
        },
        HostStrategy::Headless => HostServices::headless(),
    }
}

/// Builds the service bundle for the detected host strategy.
pub fn build_host_services() -> HostServices {
    host_services_for(selected_host_strategy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_select_headless_services() {
        assert_eq!(selected_host_strategy(), HostStrategy::Headless);
        assert_eq!(
            build_host_services().host_strategy,
            HostStrategy::Headless
        );
    }

    #[test]
    fn standalone_bundle_keeps_its_strategy() {
        let services = host_services_for(HostStrategy::Standalone);
        assert_eq!(services.host_strategy.as_str(), "standalone");
    }
}
