pub const SUCCESS_MESSAGE: &str = "Thanks! We’ve added you to the list 🎉";
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Everything one signup form instance renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionState {
    pub email: String,
    pub status: SubmissionStatus,
    pub message: String,
    /// Errors from the last local validation; cleared on edit or on a passing submit.
    pub validation_errors: Vec<String>,
}

impl SubmissionState {
    /// The email field is editable in every state except while a request is in flight.
    pub fn input_enabled(&self) -> bool {
        self.status != SubmissionStatus::Submitting
    }

    /// Submit is only accepted from `Idle`; after a success or error the
    /// notification has to be dismissed (or retried) first.
    pub fn can_submit(&self) -> bool {
        self.status == SubmissionStatus::Idle
    }

    pub fn inline_error(&self) -> Option<&str> {
        self.validation_errors.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    EmailChanged(String),
    Submit,
    RequestSucceeded,
    RequestFailed,
    Dismiss,
    Retry,
}

/// Work the reducer asks its driver to perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SendNotify { email: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SubmissionState,
    pub command: Option<Command>,
}

impl Transition {
    pub(crate) fn to(state: SubmissionState) -> Self {
        Self {
            state,
            command: None,
        }
    }
}
