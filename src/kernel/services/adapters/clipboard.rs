//! Clipboard service.
//!
//! Holds the last copied text in process memory. Clones share the buffer, so
//! the shell can hand one to the gateway and read it back for display.

use std::sync::{Arc, Mutex, PoisonError};

use crate::kernel::services::ports::{ClipboardError, ClipboardPort};

const COPY_MAX_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Clone, Default)]
pub struct ClipboardService {
    text: Arc<Mutex<Option<String>>>,
}

impl ClipboardService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_text(&self) -> Option<String> {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClipboardPort for ClipboardService {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if text.len() > COPY_MAX_SIZE {
            return Err(ClipboardError::SetFailed(format!(
                "text too large ({} MB)",
                text.len() / 1024 / 1024
            )));
        }
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}
