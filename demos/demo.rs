//! Sends one message through the Mailgun API.
//!
//! Requires `MAILGUN_API_KEY`, `MAILGUN_DOMAIN` and `MAILGUN_TO`; honors
//! `MAILGUN_REGION` / `MAILGUN_BASE_URL`. The message is sent in test mode.

use mailgun_client::{LogLevel, MailgunClient, MailgunMessagesAsyncApi, Message};

#[tokio::main]
async fn main() -> Result<(), mailgun_client::Error> {
    let domain = std::env::var("MAILGUN_DOMAIN")
        .map_err(|_| mailgun_client::Error::Config("MAILGUN_DOMAIN is not set".into()))?;
    let to = std::env::var("MAILGUN_TO")
        .map_err(|_| mailgun_client::Error::Config("MAILGUN_TO is not set".into()))?;

    let api: MailgunMessagesAsyncApi = MailgunClient::from_env()?
        .log_level(LogLevel::Basic)
        .create_async_api();

    let message = Message::builder()
        .from(format!("Mailgun demo <postmaster@{domain}>"))
        .to(vec![to])
        .subject("Hello from mailgun-client")
        .text("Sent with the Rust Mailgun client.")
        .test_mode(true)
        .build();

    let response = api.send_message(&domain, &message).await?;
    println!("{}: {}", response.id, response.message);
    Ok(())
}
