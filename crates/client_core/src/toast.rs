//! Transient notifications derived from state transitions.
//!
//! Toasts are never part of [`SubmissionState`]; a presentation layer
//! registers a [`TransitionObserver`] and renders whatever it is told.

use std::time::Duration;

use crate::types::{SubmissionState, SubmissionStatus};

pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// `None` means the toast stays until dismissed. Error toasts carry the
    /// retry affordance and therefore never auto-dismiss.
    pub auto_dismiss: Option<Duration>,
}

impl Toast {
    pub fn offers_retry(&self) -> bool {
        self.kind == ToastKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastUpdate {
    Show(Toast),
    Hide,
}

pub trait TransitionObserver: Send {
    fn on_transition(&mut self, previous: &SubmissionState, next: &SubmissionState);
}

pub fn toast_for_transition(
    previous: &SubmissionState,
    next: &SubmissionState,
) -> Option<ToastUpdate> {
    if previous.status == next.status {
        return None;
    }
    match next.status {
        SubmissionStatus::Success => Some(ToastUpdate::Show(Toast {
            kind: ToastKind::Success,
            message: next.message.clone(),
            auto_dismiss: Some(SUCCESS_TOAST_DURATION),
        })),
        SubmissionStatus::Error => Some(ToastUpdate::Show(Toast {
            kind: ToastKind::Error,
            message: next.message.clone(),
            auto_dismiss: None,
        })),
        SubmissionStatus::Idle | SubmissionStatus::Submitting => match previous.status {
            SubmissionStatus::Success | SubmissionStatus::Error => Some(ToastUpdate::Hide),
            _ => None,
        },
    }
}

/// Adapts a callback into a [`TransitionObserver`] that only fires on toast changes.
pub struct ToastObserver<F> {
    on_update: F,
}

impl<F> ToastObserver<F>
where
    F: FnMut(ToastUpdate) + Send,
{
    pub fn new(on_update: F) -> Self {
        Self { on_update }
    }
}

impl<F> TransitionObserver for ToastObserver<F>
where
    F: FnMut(ToastUpdate) + Send,
{
    fn on_transition(&mut self, previous: &SubmissionState, next: &SubmissionState) {
        if let Some(update) = toast_for_transition(previous, next) {
            (self.on_update)(update);
        }
    }
}

#[cfg(test)]
#[path = "tests/toast_tests.rs"]
mod tests;
