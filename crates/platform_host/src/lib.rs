//! Typed host contracts shared by the arcade runtime and its browser adapters.
//!
//! This crate is the boundary between the shell and its environment: the parent-frame message
//! protocol, autosave storage, remote text generation, sound cues, font installation and time
//! helpers. Concrete browser implementations live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod appearance;
pub mod bridge;
pub mod host;
pub mod sound;
pub mod storage;
pub mod text_generation;
pub mod time;

pub use appearance::{FontInstaller, NoopFontInstaller, RecordingFontInstaller};
pub use bridge::{
    share_command, toast_command, HostChannel, HostMessage, HostMessageHandler, HostSubscription,
    HostSync, HostThemeColors, NoopHostChannel, RecordingHostChannel, ShellMessage, ToastSeverity,
    SYNC_DATA_TYPE, TOGGLE_WINDOW_TOKEN,
};
pub use host::{HostServices, HostStrategy};
pub use sound::{NoopSoundService, RecordingSoundService, SoundCue, SoundService};
pub use storage::{
    load_json_with, save_json_with, MemorySaveStore, NoopSaveStore, SaveStore, SaveStoreFuture,
};
pub use text_generation::{
    generate_reply_with, ChatRole, ChatTurn, GeneratedReply, GenerationRequest,
    NoopTextGenerationService, ScriptedTextGenerationService, TextGenerationFuture,
    TextGenerationService, CONNECTION_FAILED_REPLY, EMPTY_REPLY, MISSING_API_KEY_REPLY,
};
pub use time::{random_seed, unix_time_ms_now};
