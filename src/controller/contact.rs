use actix_web::dev::HttpServiceFactory;
use actix_web::{web, HttpResponse};

use crate::cors;
use crate::domain::{ContactForm, ContactSubmission};
use crate::error::{RestError, RestResult};
use crate::notify::Dispatcher;

use super::SubmissionAccepted;

const SUCCESS: &str = "Contact form submitted successfully.";
const SEND_FAILED: &str = "Failed to send message";

#[tracing::instrument(name = "Contact form submission", skip(form, dispatcher))]
async fn submit(
    form: web::Json<ContactForm>,
    dispatcher: web::Data<Dispatcher>,
) -> RestResult<HttpResponse> {
    let submission: ContactSubmission = form.into_inner().try_into()?;

    tracing::debug!(
        name = %submission.name,
        subject = ?submission.subject,
        "Accepted contact submission"
    );

    dispatcher
        .dispatch(&submission)
        .await
        .map_err(|e| RestError::Internal {
            error: SEND_FAILED,
            message: None,
            source: e.into(),
        })?;

    Ok(HttpResponse::Ok().json(SubmissionAccepted {
        success: true,
        message: SUCCESS,
        booking_reference: None,
    }))
}

/// Contact form endpoint
pub fn scope() -> impl HttpServiceFactory {
    cors::resource("/contact").route(web::post().to(submit))
}
