use std::fmt;

use async_trait::async_trait;

use crate::domain::EmailAddress;

mod http_relay;
mod smtp_relay;

pub use http_relay::{HttpRelay, RelayAuthorizationToken};
pub use smtp_relay::SmtpRelay;

/// The `From` of an outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub address: EmailAddress,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.address)
    }
}

/// A fully rendered message, ready to hand to a transport
#[derive(Debug, Clone)]
pub struct Email {
    pub from: Sender,
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
}

/// Outbound mail relay
#[async_trait]
pub trait MailTransport: fmt::Debug + Send + Sync {
    /// Refuse a message the relay could never deliver, before anything is sent
    fn check(&self, _email: &Email) -> anyhow::Result<()> {
        Ok(())
    }

    /// Submit a single message and wait for the relay to accept or refuse it
    async fn send(&self, email: &Email) -> anyhow::Result<()>;

    /// Check that the relay is reachable and accepts our credentials
    async fn verify(&self) -> anyhow::Result<()>;
}
