use std::fmt;
use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use secrecy::{ExposeSecret, Secret};

use super::{Email, MailTransport};

/// SMTP submission through an authenticated relay
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpRelay").finish_non_exhaustive()
    }
}

impl SmtpRelay {
    /// `implicit_tls` selects SMTPS (TLS from the first byte, usually port 465). Otherwise the
    /// connection starts in plaintext and is upgraded with STARTTLS when the relay offers it.
    pub fn new(
        host: &str,
        port: u16,
        implicit_tls: bool,
        user: &str,
        password: &Secret<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let builder = if implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .with_context(|| format!("Failed to configure SMTP relay {}", host))?
        } else {
            let tls = TlsParameters::new(host.to_string())
                .with_context(|| format!("Failed to configure TLS for {}", host))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .tls(Tls::Opportunistic(tls))
        };

        let credentials = Credentials::new(user.to_string(), password.expose_secret().clone());

        let transport = builder
            .port(port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport })
    }

    fn message(email: &Email) -> anyhow::Result<Message> {
        let from = Mailbox::new(
            Some(email.from.name.clone()),
            email
                .from
                .address
                .as_ref()
                .parse::<Address>()
                .context("Invalid sender address")?,
        );
        let to = Mailbox::new(
            None,
            email
                .to
                .as_ref()
                .parse::<Address>()
                .context("Invalid recipient address")?,
        );

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .context("Failed to build message")
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    fn check(&self, email: &Email) -> anyhow::Result<()> {
        Self::message(email).map(|_| ())
    }

    async fn send(&self, email: &Email) -> anyhow::Result<()> {
        let message = Self::message(email)?;

        self.transport
            .send(message)
            .await
            .context("SMTP relay rejected message")?;
        Ok(())
    }

    async fn verify(&self) -> anyhow::Result<()> {
        let connected = self
            .transport
            .test_connection()
            .await
            .context("Failed to connect to SMTP relay")?;

        anyhow::ensure!(connected, "SMTP relay did not accept the connection");
        Ok(())
    }
}
