use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use async_trait::async_trait;

use reqwest::Client;

use serde::Serialize;

use secrecy::Secret;

use url::Url;

use super::{Email, MailTransport};

const POSTMARK_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Mail relay reached over a Postmark-style JSON API
#[derive(Debug)]
pub struct HttpRelay {
    client: Client,

    api_base_url: Url,
    api_send_email_url: Url,
    api_auth_token: RelayAuthorizationToken,
}

impl HttpRelay {
    pub fn new(
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: RelayAuthorizationToken,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_send_email_url = api_base_url
            .join("email")
            .context("Failed to create send email endpoint URL")?;

        Ok(Self {
            client,
            api_base_url,
            api_send_email_url,
            api_auth_token,
        })
    }
}

#[async_trait]
impl MailTransport for HttpRelay {
    async fn send(&self, email: &Email) -> anyhow::Result<()> {
        use secrecy::ExposeSecret;

        let from = email.from.to_string();
        let body = SendEmailRequest {
            from: &from,
            to: email.to.as_ref(),
            subject: &email.subject,
            html_body: &email.html_body,
        };

        self.client
            .post(self.api_send_email_url.clone())
            .header(POSTMARK_TOKEN_HEADER, self.api_auth_token.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn verify(&self) -> anyhow::Result<()> {
        // Any answer at all means the relay is reachable
        self.client
            .head(self.api_base_url.clone())
            .send()
            .await
            .context("Failed to reach mail relay")?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct RelayAuthorizationToken(Secret<String>);

impl FromStr for RelayAuthorizationToken {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Infallible> {
        let value = value.to_string();
        let value = Secret::new(value);

        Ok(Self(value))
    }
}

impl From<Secret<String>> for RelayAuthorizationToken {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

impl secrecy::ExposeSecret<String> for RelayAuthorizationToken {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
}
