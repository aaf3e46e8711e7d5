use serde::Serialize;

use crate::domain::BookingReference;

pub mod booking;
pub mod contact;

const INTERNAL_ERROR: &str = "Internal server error";

/// Body of a successful submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionAccepted<'a> {
    success: bool,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    booking_reference: Option<&'a BookingReference>,
}
