use std::fmt;

use thiserror::Error;

use crate::client::{Email, MailTransport, Sender};
use crate::domain::EmailAddress;

mod templates;

pub use templates::{BookingNotice, Templates};

/// Which of the two messages of a submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Business,
    Acknowledgment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Business => f.write_str("business notification"),
            Self::Acknowledgment => f.write_str("acknowledgment"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to send {stage}")]
pub struct DispatchError {
    pub stage: Stage,
    #[source]
    pub source: anyhow::Error,
}

/// Branding and addressing shared by every rendered message
#[derive(Debug, Clone)]
pub struct Letterhead {
    /// Display name used in sender names and message text
    pub brand: String,
    /// The sending account
    pub sender: EmailAddress,
    /// Where business notifications go
    pub operator: EmailAddress,
}

impl Letterhead {
    pub fn sender(&self, name: impl Into<String>) -> Sender {
        Sender {
            name: name.into(),
            address: self.sender.clone(),
        }
    }
}

/// Something that produces the pair of messages sent for an accepted submission
pub trait Notice {
    /// The copy sent to the operator
    fn business(&self, letterhead: &Letterhead, templates: &Templates) -> anyhow::Result<Email>;
    /// The receipt sent back to whoever submitted the form
    fn acknowledgment(
        &self,
        letterhead: &Letterhead,
        templates: &Templates,
    ) -> anyhow::Result<Email>;
}

/// Renders notices and hands them to the mail relay
#[derive(Debug)]
pub struct Dispatcher {
    transport: Box<dyn MailTransport>,
    letterhead: Letterhead,
    templates: Templates,
}

impl Dispatcher {
    pub fn new(transport: Box<dyn MailTransport>, letterhead: Letterhead) -> anyhow::Result<Self> {
        Ok(Self {
            transport,
            letterhead,
            templates: Templates::new()?,
        })
    }

    /// Send the business copy, then the acknowledgment.
    ///
    /// Both messages are rendered and checked against the relay before anything is sent. The
    /// acknowledgment is only attempted once the business copy was accepted. A failure of
    /// either send fails the whole dispatch; an already delivered business copy is not
    /// recalled.
    #[tracing::instrument(name = "Dispatch notifications", skip_all)]
    pub async fn dispatch(&self, notice: &impl Notice) -> Result<(), DispatchError> {
        let business = notice
            .business(&self.letterhead, &self.templates)
            .map_err(|source| DispatchError {
                stage: Stage::Business,
                source,
            })?;
        let acknowledgment = notice
            .acknowledgment(&self.letterhead, &self.templates)
            .map_err(|source| DispatchError {
                stage: Stage::Acknowledgment,
                source,
            })?;

        self.check(Stage::Business, &business)?;
        self.check(Stage::Acknowledgment, &acknowledgment)?;

        self.send(Stage::Business, &business).await?;
        self.send(Stage::Acknowledgment, &acknowledgment).await?;

        Ok(())
    }

    fn check(&self, stage: Stage, email: &Email) -> Result<(), DispatchError> {
        self.transport
            .check(email)
            .map_err(|source| DispatchError { stage, source })
    }

    async fn send(&self, stage: Stage, email: &Email) -> Result<(), DispatchError> {
        tracing::debug!(%stage, subject = %email.subject, "Sending message");

        self.transport
            .send(email)
            .await
            .map_err(|source| DispatchError { stage, source })
    }
}
