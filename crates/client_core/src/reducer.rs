//! Pure `(state, event) -> state` transition function for the signup form.

use shared::validation::validate_email;

use crate::types::{
    Command, SubmissionEvent, SubmissionState, SubmissionStatus, Transition, ERROR_MESSAGE,
    SUCCESS_MESSAGE,
};

/// Computes the next state for `event`. Pairs not listed in the state machine
/// leave the state untouched and emit no command.
pub fn reduce(state: &SubmissionState, event: SubmissionEvent) -> Transition {
    use SubmissionEvent as E;
    use SubmissionStatus as S;

    match (state.status, event) {
        (S::Submitting, E::EmailChanged(_)) => Transition::to(state.clone()),
        (_, E::EmailChanged(email)) => Transition::to(SubmissionState {
            email,
            validation_errors: Vec::new(),
            ..state.clone()
        }),

        (_, E::Submit) if state.can_submit() => {
            let validation = validate_email(&state.email);
            if !validation.is_valid {
                return Transition::to(SubmissionState {
                    validation_errors: validation.errors,
                    ..state.clone()
                });
            }
            Transition {
                state: SubmissionState {
                    status: S::Submitting,
                    validation_errors: Vec::new(),
                    ..state.clone()
                },
                command: Some(Command::SendNotify {
                    email: state.email.clone(),
                }),
            }
        }

        (S::Submitting, E::RequestSucceeded) => Transition::to(SubmissionState {
            email: String::new(),
            status: S::Success,
            message: SUCCESS_MESSAGE.to_string(),
            validation_errors: Vec::new(),
        }),
        (S::Submitting, E::RequestFailed) => Transition::to(SubmissionState {
            status: S::Error,
            message: ERROR_MESSAGE.to_string(),
            ..state.clone()
        }),

        (S::Success, E::Dismiss) | (S::Error, E::Dismiss | E::Retry) => {
            Transition::to(SubmissionState {
                status: S::Idle,
                message: String::new(),
                ..state.clone()
            })
        }

        _ => Transition::to(state.clone()),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
