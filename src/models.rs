//! Data models for Mailgun messages.

use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An outgoing email, sent with [`crate::MailgunMessagesApi::send_message`].
///
/// # Examples
/// ```
/// use mailgun_client::Message;
///
/// let message = Message::builder()
///     .from("Excited User <mailgun@example.com>")
///     .to(vec!["alice@example.com".to_string()])
///     .subject("Hello")
///     .text("Testing some Mailgun awesomeness!")
///     .tags(vec!["newsletter".to_string()])
///     .build();
/// assert_eq!(message.subject.as_deref(), Some("Hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Message {
    /// Sender address, optionally with a display name.
    #[builder(into)]
    pub from: String,
    pub to: Vec<String>,
    #[builder(default)]
    pub cc: Vec<String>,
    #[builder(default)]
    pub bcc: Vec<String>,
    #[builder(into)]
    pub subject: Option<String>,
    /// Plain-text body.
    #[builder(into)]
    pub text: Option<String>,
    /// HTML body.
    #[builder(into)]
    pub html: Option<String>,
    /// Name of a stored template to render instead of `text`/`html`.
    #[builder(into)]
    pub template: Option<String>,
    /// Variables made available to `template`.
    pub template_variables: Option<serde_json::Value>,
    #[builder(default)]
    pub tags: Vec<String>,
    pub tracking: Option<bool>,
    /// Accepted by Mailgun but not delivered.
    pub test_mode: Option<bool>,
    /// Scheduled delivery time in RFC 2822 format.
    #[builder(into)]
    pub delivery_time: Option<String>,
    pub require_tls: Option<bool>,
    #[builder(into)]
    pub reply_to: Option<String>,
    /// Custom data attached to the message, sent as `v:` parameters.
    #[builder(default)]
    pub variables: BTreeMap<String, String>,
    /// Extra MIME headers, sent as `h:` parameters.
    #[builder(default)]
    pub headers: BTreeMap<String, String>,
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

impl Message {
    /// Encode as the form fields Mailgun's messages endpoint expects.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("from".to_string(), self.from.clone())];

        let lists = [("to", &self.to), ("cc", &self.cc), ("bcc", &self.bcc)];
        for (name, values) in lists {
            pairs.extend(values.iter().map(|v| (name.to_string(), v.clone())));
        }

        let optional = [
            ("subject", &self.subject),
            ("text", &self.text),
            ("html", &self.html),
            ("template", &self.template),
            ("o:deliverytime", &self.delivery_time),
            ("h:Reply-To", &self.reply_to),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                pairs.push((name.to_string(), value.clone()));
            }
        }

        if let Some(variables) = &self.template_variables {
            pairs.push(("t:variables".to_string(), variables.to_string()));
        }
        pairs.extend(self.tags.iter().map(|t| ("o:tag".to_string(), t.clone())));

        let flags = [
            ("o:tracking", self.tracking),
            ("o:testmode", self.test_mode),
            ("o:require-tls", self.require_tls),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                pairs.push((name.to_string(), yes_no(value)));
            }
        }

        pairs.extend(
            self.variables
                .iter()
                .map(|(k, v)| (format!("v:{k}"), v.clone())),
        );
        pairs.extend(self.headers.iter().map(|(k, v)| (format!("h:{k}"), v.clone())));
        pairs
    }
}

/// Mailgun's acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message-Id assigned by Mailgun, e.g. `<20240101.1@example.com>`.
    #[serde(default)]
    pub id: String,
    /// Human readable status, e.g. `Queued. Thank you.`.
    pub message: String,
}

/// A message retained in Mailgun's storage, as returned by its storage URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StoredMessage {
    #[serde(rename = "Content-Type")]
    pub content_type: Option<String>,
    #[serde(rename = "Message-Id")]
    pub message_id: Option<String>,
    pub sender: Option<String>,
    pub recipients: Option<String>,
    pub from: Option<String>,
    pub subject: Option<String>,
    pub body_plain: Option<String>,
    pub body_html: Option<String>,
    pub stripped_text: Option<String>,
    pub stripped_html: Option<String>,
    pub stripped_signature: Option<String>,
    /// Raw MIME headers as name/value pairs, in message order.
    pub message_headers: Vec<(String, String)>,
    pub attachments: Vec<StoredAttachment>,
}

/// Attachment metadata of a [`StoredMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoredAttachment {
    pub url: String,
    pub content_type: String,
    pub name: String,
    pub size: u64,
}
