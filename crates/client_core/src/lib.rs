//! Client side of the launch signup form: validation, the submission state
//! machine, and the transport that reaches the notify endpoint.

use tracing::{debug, error, info};

pub mod error;
pub mod reducer;
pub mod toast;
pub mod transport;
pub mod types;

pub use error::TransportError;
pub use reducer::reduce;
pub use toast::{Toast, ToastKind, ToastObserver, ToastUpdate, TransitionObserver};
pub use transport::{HttpNotifyTransport, NotifyTransport};
pub use types::{
    Command, SubmissionEvent, SubmissionState, SubmissionStatus, Transition, ERROR_MESSAGE,
    SUCCESS_MESSAGE,
};

/// Owns the state of one signup form and drives it through [`reduce`].
///
/// `submit` takes `&mut self` and awaits the request before applying the
/// outcome, so a form instance never has two submissions in flight.
pub struct SubmissionController<T> {
    transport: T,
    state: SubmissionState,
    observers: Vec<Box<dyn TransitionObserver>>,
}

impl<T: NotifyTransport> SubmissionController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: SubmissionState::default(),
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn observe(&mut self, observer: impl TransitionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.dispatch(SubmissionEvent::EmailChanged(email.into()));
    }

    /// Validates the current email and, if it passes, sends exactly one
    /// notify request. Failed attempts are not retried.
    pub async fn submit(&mut self) -> &SubmissionState {
        let Some(Command::SendNotify { email }) = self.dispatch(SubmissionEvent::Submit) else {
            return &self.state;
        };

        let outcome = match self.transport.notify(&email).await {
            Ok(response) => {
                info!(message = %response.message, "signup accepted");
                SubmissionEvent::RequestSucceeded
            }
            Err(err) => {
                error!(error = %err, "notify form error");
                SubmissionEvent::RequestFailed
            }
        };
        self.dispatch(outcome);
        &self.state
    }

    pub fn dismiss(&mut self) {
        self.dispatch(SubmissionEvent::Dismiss);
    }

    pub fn retry(&mut self) {
        self.dispatch(SubmissionEvent::Retry);
    }

    fn dispatch(&mut self, event: SubmissionEvent) -> Option<Command> {
        let Transition { state, command } = reduce(&self.state, event);
        let previous = std::mem::replace(&mut self.state, state);
        if previous != self.state {
            debug!(from = ?previous.status, to = ?self.state.status, "submission transition");
            for observer in &mut self.observers {
                observer.on_transition(&previous, &self.state);
            }
        }
        command
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
