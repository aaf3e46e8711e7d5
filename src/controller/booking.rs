use actix_web::dev::HttpServiceFactory;
use actix_web::{web, HttpResponse};

use chrono::Local;

use crate::cors;
use crate::domain::{BookingForm, BookingReference};
use crate::error::{RestError, RestResult};
use crate::notify::{BookingNotice, Dispatcher};

use super::{SubmissionAccepted, INTERNAL_ERROR};

const SUCCESS: &str =
    "Appointment booking submitted successfully. Check your email for confirmation.";
const PROCESSING_FAILED: &str = "Failed to process booking submission.";

#[tracing::instrument(
    name = "Booking form submission",
    skip(form, dispatcher),
    fields(booking_reference = tracing::field::Empty)
)]
async fn submit(
    form: web::Json<BookingForm>,
    dispatcher: web::Data<Dispatcher>,
) -> RestResult<HttpResponse> {
    // Bookings for the current server-local day are still accepted
    let today = Local::now().date_naive();
    let booking = form.into_inner().validate(today)?;

    let reference = BookingReference::generate();
    tracing::Span::current().record("booking_reference", reference.as_ref());

    tracing::debug!(
        name = %booking.name,
        service = %booking.service,
        date = %booking.date,
        time = %booking.time,
        "Accepted booking submission"
    );

    let notice = BookingNotice {
        booking: &booking,
        reference: &reference,
    };
    dispatcher
        .dispatch(&notice)
        .await
        .map_err(|e| RestError::Internal {
            error: INTERNAL_ERROR,
            message: Some(PROCESSING_FAILED),
            source: e.into(),
        })?;

    Ok(HttpResponse::Ok().json(SubmissionAccepted {
        success: true,
        message: SUCCESS,
        booking_reference: Some(&reference),
    }))
}

/// Appointment booking endpoint
pub fn scope() -> impl HttpServiceFactory {
    cors::resource("/booking").route(web::post().to(submit))
}
