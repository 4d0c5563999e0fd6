use std::sync::Arc;

use mailer::{EmailMessage, EmailSender, MailerError};
use shared::{
    error::ApiException,
    protocol::{NotifyRequest, NotifyResponse},
};
use tracing::{error, info};

pub mod templates;

pub use templates::Branding;

pub const INVALID_EMAIL: &str = "Invalid email address";
pub const DELIVERY_FAILED: &str = "Failed to send emails.";
pub const EMAILS_SENT: &str = "Emails sent successfully.";

#[derive(Clone)]
pub struct NotifyContext {
    pub sender: Arc<dyn EmailSender>,
    pub branding: Branding,
}

/// Handles one signup: revalidates the address, then sends the operator
/// notification followed by the welcome message.
///
/// The two sends are not transactional. If the operator copy goes out and the
/// welcome fails, the caller still receives the generic delivery error.
pub async fn notify(ctx: &NotifyContext, req: NotifyRequest) -> Result<NotifyResponse, ApiException> {
    let email = req
        .email
        .filter(|email| !email.is_empty() && email.contains('@'))
        .ok_or_else(|| ApiException::validation(INVALID_EMAIL))?;

    let operator = templates::operator_notification(&ctx.branding, &email);
    let welcome = templates::welcome(&ctx.branding, &email);

    deliver(ctx, &operator, "operator_notification").await?;
    deliver(ctx, &welcome, "welcome").await?;

    info!("signup notification and welcome sent");
    Ok(NotifyResponse::sent(EMAILS_SENT))
}

async fn deliver(
    ctx: &NotifyContext,
    message: &EmailMessage,
    kind: &'static str,
) -> Result<(), ApiException> {
    ctx.sender
        .send(message)
        .await
        .map(|_| ())
        .map_err(|err| delivery_failed(kind, err))
}

fn delivery_failed(kind: &'static str, err: MailerError) -> ApiException {
    error!(email_kind = kind, error = %err, "email delivery failed");
    ApiException::internal(DELIVERY_FAILED)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
