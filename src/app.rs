use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::controller::{booking, contact};
use crate::cors;
use crate::error::RestError;
use crate::notify::Dispatcher;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, dispatcher: Dispatcher) -> anyhow::Result<Server> {
    let dispatcher = web::Data::new(dispatcher);

    // Anything that is not a JSON object of strings is answered the same way
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        RestError::InvalidBody.into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors::headers())
            .wrap(TracingLogger::default())
            .app_data(json_config.clone())
            .app_data(dispatcher.clone())
            .service(health_check)
            .service(contact::scope())
            .service(booking::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
