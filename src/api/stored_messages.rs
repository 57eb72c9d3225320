//! Retrieving and resending stored messages.
//!
//! Mailgun exposes each stored message under its own absolute storage URL, so
//! these clients are meant to be created with
//! [`create_api_with_absolute_url`](crate::MailgunClientBuilder::create_api_with_absolute_url)
//! on a builder whose base URL is that storage URL.

use super::{MailgunApi, MailgunAsyncApi};
use crate::Result;
use crate::models::{MessageResponse, StoredMessage};
use crate::request::RequestTemplate;
use crate::target::{AsyncTarget, BlockingTarget};
use reqwest::Method;

fn get_stored_message_request() -> RequestTemplate {
    RequestTemplate::new(
        "MailgunStoredMessagesApi#get_stored_message",
        Method::GET,
        "",
    )
}

fn resend_message_request(to: &str) -> RequestTemplate {
    let mut template = RequestTemplate::new(
        "MailgunStoredMessagesApi#resend_message",
        Method::POST,
        "",
    );
    template.form([("to", to)]);
    template
}

/// Blocking client for a single stored message.
///
/// # Examples
/// ```no_run
/// use mailgun_client::{MailgunClient, MailgunStoredMessagesApi};
///
/// # fn main() -> mailgun_client::Result<()> {
/// let storage_url = "https://storage-us-east4.api.mailgun.net/v3/domains/example.com/messages/KEY";
/// let api: MailgunStoredMessagesApi = MailgunClient::config_with_base_url(storage_url, "key-xxx")
///     .create_api_with_absolute_url();
/// let stored = api.get_stored_message()?;
/// println!("{:?}", stored.subject);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MailgunStoredMessagesApi {
    target: BlockingTarget,
}

impl MailgunApi for MailgunStoredMessagesApi {
    fn from_target(target: BlockingTarget) -> Self {
        Self { target }
    }
}

impl MailgunStoredMessagesApi {
    /// Fetch the stored message.
    pub fn get_stored_message(&self) -> Result<StoredMessage> {
        self.target.execute_json(&get_stored_message_request())
    }

    /// Deliver the stored message again to `to` (comma-separated addresses).
    pub fn resend_message(&self, to: &str) -> Result<MessageResponse> {
        self.target.execute_json(&resend_message_request(to))
    }
}

/// Async client for a single stored message.
#[derive(Debug, Clone)]
pub struct MailgunStoredMessagesAsyncApi {
    target: AsyncTarget,
}

impl MailgunAsyncApi for MailgunStoredMessagesAsyncApi {
    fn from_target(target: AsyncTarget) -> Self {
        Self { target }
    }
}

impl MailgunStoredMessagesAsyncApi {
    /// Fetch the stored message.
    pub async fn get_stored_message(&self) -> Result<StoredMessage> {
        self.target.execute_json(&get_stored_message_request()).await
    }

    /// Deliver the stored message again to `to` (comma-separated addresses).
    pub async fn resend_message(&self, to: &str) -> Result<MessageResponse> {
        self.target.execute_json(&resend_message_request(to)).await
    }
}
