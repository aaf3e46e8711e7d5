use std::net::TcpListener;

use anyhow::Context;

use formrelay::app;
use formrelay::notify::Dispatcher;
use formrelay::settings::Settings;
use formrelay::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    let subscriber = telemetry::create_subscriber(
        &settings.app.log_filter,
        settings.app.log_format,
        std::io::stdout,
    );
    telemetry::set_subscriber(subscriber)?;

    let letterhead = settings.email.letterhead()?;
    let transport = settings.email.transport()?;

    if let Err(error) = transport.verify().await {
        tracing::warn!(error.cause_chain = ?error, "Mail relay is not reachable yet");
    }

    let dispatcher = Dispatcher::new(transport, letterhead)?;

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!(addr = ?listener.local_addr()?, "Listening");

    app::run(listener, dispatcher)?
        .await
        .context("Failed to run app")
}
