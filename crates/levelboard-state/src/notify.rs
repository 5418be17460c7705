// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::sync::Mutex;

/// Newest-first queue never grows beyond this.
pub const MAX_NOTICES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One dismissible user message. Fetch failures surface here instead of
/// blocking interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Default)]
struct NotifierInner {
    next_id: u64,
    messages: VecDeque<Notice>,
}

/// Transient notification queue, newest first, capped at [`MAX_NOTICES`].
#[derive(Debug, Default)]
pub struct Notifier {
    inner: Mutex<NotifierInner>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, severity: Severity, text: impl Into<String>) -> u64 {
        let mut inner = self.inner.lock().expect("notifier lock");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.messages.push_front(Notice {
            id,
            severity,
            text: text.into(),
        });
        if inner.messages.len() > MAX_NOTICES {
            inner.messages.pop_back();
        }
        id
    }

    pub fn notify_error(&self, text: impl Into<String>) -> u64 {
        self.notify(Severity::Error, text)
    }

    pub fn dismiss(&self, id: u64) {
        let mut inner = self.inner.lock().expect("notifier lock");
        inner.messages.retain(|notice| notice.id != id);
    }

    pub fn clear(&self) {
        self.inner.lock().expect("notifier lock").messages.clear();
    }

    #[must_use]
    pub fn messages(&self) -> Vec<Notice> {
        self.inner
            .lock()
            .expect("notifier lock")
            .messages
            .iter()
            .cloned()
            .collect()
    }
}
