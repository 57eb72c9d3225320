//! Typed Mailgun API clients.
//!
//! Each client is a thin struct over a [`BlockingTarget`] or [`AsyncTarget`]
//! whose methods build a [`crate::RequestTemplate`] and run it. Implement
//! [`MailgunApi`] or [`MailgunAsyncApi`] for your own struct to cover endpoints
//! this crate does not ship.

mod messages;
mod stored_messages;

pub use messages::{MailgunMessagesApi, MailgunMessagesAsyncApi};
pub use stored_messages::{MailgunStoredMessagesApi, MailgunStoredMessagesAsyncApi};

use crate::target::{AsyncTarget, BlockingTarget};

/// A blocking API client that can be produced by
/// [`MailgunClientBuilder::create_api`](crate::MailgunClientBuilder::create_api).
pub trait MailgunApi: Sized {
    fn from_target(target: BlockingTarget) -> Self;
}

/// An async API client that can be produced by
/// [`MailgunClientBuilder::create_async_api`](crate::MailgunClientBuilder::create_async_api).
pub trait MailgunAsyncApi: Sized {
    fn from_target(target: AsyncTarget) -> Self;
}
