//! HTML bodies for the two messages sent per signup.

use mailer::EmailMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub brand_name: String,
    /// Sender header, e.g. `Brand <notify@brand.example>`.
    pub from_address: String,
    /// Inbox that receives a copy of every signup.
    pub operator_address: String,
    pub pitch: String,
    pub welcome_subject: String,
}

pub fn operator_notification(branding: &Branding, subscriber_email: &str) -> EmailMessage {
    let brand = escape_html(&branding.brand_name);
    let email = escape_html(subscriber_email);
    let html = format!(
        r#"<div style="font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #222;">
  <h2 style="color: #f4a300; margin-bottom: 0.4em;">New Notify Me Signup</h2>
  <p style="margin: 0.6em 0;">A new visitor just subscribed via the <strong>“Notify Me”</strong> form.</p>
  <p style="margin: 1em 0; font-size: 1rem;"><strong>Email:</strong> {email}</p>
  <hr style="margin: 1.2em 0; border: none; border-top: 1px solid #eee;" />
  <p style="font-size: 0.9rem; color: #555;">Sent automatically from the {brand} landing page.</p>
</div>"#
    );

    EmailMessage {
        from: branding.from_address.clone(),
        to: branding.operator_address.clone(),
        subject: format!("New subscriber on {}! 🥭", branding.brand_name),
        html,
    }
}

pub fn welcome(branding: &Branding, subscriber_email: &str) -> EmailMessage {
    let brand = escape_html(&branding.brand_name);
    let pitch = escape_html(&branding.pitch);
    let html = format!(
        r#"<div style="font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #222; padding: 1.5em;">
  <h2 style="color: #f4a300; margin-bottom: 0.3em;">Hey there, welcome to {brand}!</h2>
  <p style="margin: 0.8em 0;">{pitch}</p>
  <p style="margin: 0.8em 0;">We'll get back to you soon.</p>
  <p style="margin-top: 1.5em;">Stay tuned (and stay juicy)🥭<br><strong>— Team {brand}</strong></p>
</div>"#
    );

    EmailMessage {
        from: branding.from_address.clone(),
        to: subscriber_email.to_string(),
        subject: branding.welcome_subject.clone(),
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
