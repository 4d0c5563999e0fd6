use serde::{Deserialize, Serialize};

pub const NOTIFY_ROUTE: &str = "/api/notify";

/// Body posted by the signup form. `email` may be absent on the wire; the
/// endpoint rejects that during revalidation rather than at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl NotifyRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
    pub message: String,
}

impl NotifyResponse {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
