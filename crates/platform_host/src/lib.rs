//! Typed host-domain contracts shared by the window-manager runtime and browser adapters.
//!
//! This crate is the API-first boundary for the services the desktop runtime consumes: a durable
//! key-value slot for layout persistence, a viewport-size oracle, and time helpers used to stamp
//! window records. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;
pub mod viewport;

pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use viewport::{FixedViewport, SharedViewport, Viewport, ViewportOracle};
