//! Arcade shell runtime: state model, reducer, persistence, theme engine, floating window and
//! the Leptos components that host the games.
//!
//! All shell mutation goes through [`reduce_shell`]; side effects come back as
//! [`RuntimeEffect`] values and are executed by the host layer against the injected
//! [`platform_host::HostServices`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod components;
mod effect_executor;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
pub mod slots;
pub mod theme;
pub mod window_manager;

pub use components::{use_arcade_runtime, ArcadeProvider, ArcadeRuntimeContext, ArcadeShell};
pub use model::*;
pub use persistence::{load_snapshot, save_snapshot, PersistedSnapshot, AUTOSAVE_KEY};
pub use reducer::{reduce_shell, LoadOrigin, ReducerError, RuntimeEffect, ShellAction};
pub use slots::GameSlots;
pub use theme::{resolve_style, StyleContext};
