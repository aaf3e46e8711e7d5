use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use secrecy::Secret;

use serde::Deserialize;
use serde_aux::prelude::*;

use url::Url;

use crate::client::{HttpRelay, MailTransport, SmtpRelay};
use crate::domain::EmailAddress;
use crate::notify::Letterhead;

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    pub email: EmailSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // NOTE: Should be used for any prod secrets. Takes the form `APP_<settings category>__<setting name>`.
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_filter() -> String {
    "info".into()
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayKind {
    Smtp,
    Http,
}

#[derive(Debug, Deserialize)]
pub struct EmailSettings {
    brand: String,
    sender: String,
    operator_address: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    timeout_milliseconds: u64,

    relay: RelayKind,
    smtp: Option<SmtpSettings>,
    http: Option<HttpRelaySettings>,
}

#[derive(Debug, Deserialize)]
pub struct SmtpSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    implicit_tls: bool,
    user: String,
    password: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct HttpRelaySettings {
    base_url: String,
    auth_token: Secret<String>,
}

impl EmailSettings {
    /// Sender and operator addresses, with the operator falling back to the sender
    pub fn letterhead(&self) -> anyhow::Result<Letterhead> {
        let sender: EmailAddress = self
            .sender
            .parse()
            .with_context(|| format!("Invalid sender address {:?}", self.sender))?;

        let operator = match self.operator_address.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => address
                .parse()
                .with_context(|| format!("Invalid operator address {:?}", address))?,
            _ => sender.clone(),
        };

        Ok(Letterhead {
            brand: self.brand.clone(),
            sender,
            operator,
        })
    }

    /// Upper bound on a single relay exchange
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// Build the configured relay
    pub fn transport(&self) -> anyhow::Result<Box<dyn MailTransport>> {
        match self.relay {
            RelayKind::Smtp => {
                let smtp = self
                    .smtp
                    .as_ref()
                    .context("`email.smtp` settings are required for the smtp relay")?;

                let relay = SmtpRelay::new(
                    &smtp.host,
                    smtp.port,
                    smtp.implicit_tls,
                    &smtp.user,
                    &smtp.password,
                    self.timeout(),
                )?;
                Ok(Box::new(relay))
            }
            RelayKind::Http => {
                let http = self
                    .http
                    .as_ref()
                    .context("`email.http` settings are required for the http relay")?;

                let base_url = Url::parse(&http.base_url).context("Failed to parse relay base URL")?;
                let relay = HttpRelay::new(self.timeout(), base_url, http.auth_token.clone().into())?;
                Ok(Box::new(relay))
            }
        }
    }
}
