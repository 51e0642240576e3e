//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Each adapter compiles on native targets too, where it degrades to an inert implementation so
//! the runtime and its tests build without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-strategy detection and concrete service-bundle factories for runtime wiring.
pub mod adapters;
pub mod audio;
pub mod document;
pub mod gemini;
pub mod local_storage;
pub mod parent_frame;

pub use adapters::{build_host_services, host_services_for, selected_host_strategy};
pub use audio::WebSoundService;
pub use document::{apply_font_settings, WebFontInstaller};
pub use gemini::GeminiTextGenerationService;
pub use local_storage::WebSaveStore;
pub use parent_frame::{decode_message_data, is_embedded_frame, ParentFrameChannel};
