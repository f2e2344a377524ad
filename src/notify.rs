//! Ephemeral success/error toasts.

use std::collections::VecDeque;
use std::time::Duration;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

pub type ToastId = u64;

/// FIFO of visible toasts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: ToastId,
    items: VecDeque<(ToastId, Toast)>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back((id, toast));
        id
    }

    /// Unknown ids are ignored (the user may have closed it already).
    pub fn dismiss(&mut self, id: ToastId) {
        self.items.retain(|(item, _)| *item != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.items.iter().map(|(id, toast)| (*id, toast))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
