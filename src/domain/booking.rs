use chrono::{DateTime, Local, NaiveDate};

use serde::Deserialize;

use super::{present, EmailAddress, PhoneNumber, ValidationError};

const REQUIRED_FIELDS: &str =
    "Missing required fields: name, email, phone, service, date, and time are required";

/// Raw booking form body, as sent by the browser
#[derive(Debug, Default, Deserialize)]
pub struct BookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub message: Option<String>,
}

/// An appointment request that passed validation
#[derive(Debug, Clone)]
pub struct BookingSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub company: Option<String>,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub message: Option<String>,
}

impl BookingForm {
    /// Validate the form against the server-local calendar day `today`.
    ///
    /// Checks run in a fixed order (required fields, email, date, phone) and stop at the
    /// first failure.
    pub fn validate(self, today: NaiveDate) -> Result<BookingSubmission, ValidationError> {
        let (Some(name), Some(email), Some(phone), Some(service), Some(date), Some(time)) = (
            present(self.name),
            present(self.email),
            present(self.phone),
            present(self.service),
            present(self.date),
            present(self.time),
        ) else {
            return Err(ValidationError::MissingFields(REQUIRED_FIELDS));
        };

        let email = email.parse()?;

        let date = parse_date(&date)?;
        if date < today {
            return Err(ValidationError::PastDate);
        }

        let phone = phone.parse()?;

        Ok(BookingSubmission {
            name,
            email,
            phone,
            company: present(self.company),
            service,
            date,
            time,
            message: present(self.message),
        })
    }
}

/// Accepts a plain calendar date (`2026-10-19`) or a full RFC 3339 timestamp, which is
/// converted to the server-local day
fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Local).date_naive())
        .map_err(|_| ValidationError::InvalidDate)
}
