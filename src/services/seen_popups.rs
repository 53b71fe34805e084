use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

pub const ATTENTION_POPUP_KEY: &str = "hasSeenAttentionPopup";

/// Persistence for "already shown" popup markers.
pub trait SeenPopups: Send + Sync {
    fn has_seen(&self, session: &str, key: &str) -> bool;
    fn mark_seen(&self, session: &str, key: &str);
}

#[derive(Default)]
pub struct MemorySeenPopups {
    seen: Mutex<HashSet<String>>,
}

impl MemorySeenPopups {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenPopups for MemorySeenPopups {
    fn has_seen(&self, session: &str, key: &str) -> bool {
        let seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        seen.contains(&format!("{session}:{key}"))
    }

    fn mark_seen(&self, session: &str, key: &str) {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        seen.insert(format!("{session}:{key}"));
    }
}

/// Per-session view of the seen markers, handed to the page that decides
/// whether to open a popup.
#[derive(Clone)]
pub struct PopupSession {
    key: String,
    port: Arc<dyn SeenPopups>,
}

impl PopupSession {
    pub fn new(key: impl Into<String>, port: Arc<dyn SeenPopups>) -> Self {
        Self { key: key.into(), port }
    }

    pub fn has_seen(&self, popup: &str) -> bool {
        self.port.has_seen(&self.key, popup)
    }

    pub fn mark_seen(&self, popup: &str) {
        self.port.mark_seen(&self.key, popup);
    }
}
