//! Sending messages.

use super::{MailgunApi, MailgunAsyncApi};
use crate::Result;
use crate::models::{Message, MessageResponse};
use crate::request::RequestTemplate;
use crate::target::{AsyncTarget, BlockingTarget};
use reqwest::Method;

fn send_message_request(domain: &str, message: &Message) -> RequestTemplate {
    let mut template = RequestTemplate::new(
        "MailgunMessagesApi#send_message",
        Method::POST,
        format!("v3/{domain}/messages"),
    );
    template.form(message.form_pairs());
    template
}

/// Blocking client for `v3/{domain}/messages`.
///
/// # Examples
/// ```no_run
/// use mailgun_client::{MailgunClient, MailgunMessagesApi, Message};
///
/// # fn main() -> mailgun_client::Result<()> {
/// let api: MailgunMessagesApi = MailgunClient::config("key-xxx").create_api();
/// let message = Message::builder()
///     .from("sender@example.com")
///     .to(vec!["alice@example.com".to_string()])
///     .subject("Hello")
///     .text("Hi Alice")
///     .build();
/// let response = api.send_message("example.com", &message)?;
/// println!("{}", response.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MailgunMessagesApi {
    target: BlockingTarget,
}

impl MailgunApi for MailgunMessagesApi {
    fn from_target(target: BlockingTarget) -> Self {
        Self { target }
    }
}

impl MailgunMessagesApi {
    /// Send `message` from `domain`.
    pub fn send_message(&self, domain: &str, message: &Message) -> Result<MessageResponse> {
        self.target.execute_json(&send_message_request(domain, message))
    }
}

/// Async client for `v3/{domain}/messages`.
#[derive(Debug, Clone)]
pub struct MailgunMessagesAsyncApi {
    target: AsyncTarget,
}

impl MailgunAsyncApi for MailgunMessagesAsyncApi {
    fn from_target(target: AsyncTarget) -> Self {
        Self { target }
    }
}

impl MailgunMessagesAsyncApi {
    /// Send `message` from `domain`.
    pub async fn send_message(&self, domain: &str, message: &Message) -> Result<MessageResponse> {
        self.target
            .execute_json(&send_message_request(domain, message))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_template() {
        let message = Message::builder()
            .from("sender@example.com")
            .to(vec!["alice@example.com".into()])
            .build();

        let template = send_message_request("example.com", &message);
        assert_eq!(template.method(), &Method::POST);
        assert_eq!(template.path(), "v3/example.com/messages");
        assert_eq!(
            template.body().unwrap(),
            b"from=sender%40example.com&to=alice%40example.com"
        );
    }
}
