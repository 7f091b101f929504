//! Typed host-domain contracts shared across the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the preference storage
//! contract the desktop runtime persists its layout through, while concrete browser adapters live
//! in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
};
