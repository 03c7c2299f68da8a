//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate wires the window-manager runtime to the page it lives in: `localStorage` for the
//! durable layout slot and `window.innerWidth`/`innerHeight` for the viewport oracle. On other
//! targets the adapters degrade to inert defaults so the runtime still links and tests run.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod viewport;

pub use storage::local_prefs::WebPrefsStore;
pub use viewport::{WebViewport, FALLBACK_VIEWPORT};
