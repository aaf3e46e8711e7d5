mod booking;
mod booking_reference;
mod contact;
mod email_address;
mod phone_number;

pub use booking::{BookingForm, BookingSubmission};
pub use booking_reference::BookingReference;
pub use contact::{ContactForm, ContactSubmission};
pub use email_address::EmailAddress;
pub use phone_number::PhoneNumber;

/// A rejected form submission. Only the first failing check is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Invalid date format")]
    InvalidDate,

    #[error("Selected date must be in the future")]
    PastDate,
}

/// Treat absent and empty fields alike
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
