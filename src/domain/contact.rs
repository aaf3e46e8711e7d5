use serde::Deserialize;

use super::{present, EmailAddress, ValidationError};

const REQUIRED_FIELDS: &str = "Name, email, and message are required";

/// Raw contact form body, as sent by the browser
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A contact form submission that passed validation
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    /// Free-form, the contact form does not check the phone format
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(message)) = (
            present(form.name),
            present(form.email),
            present(form.message),
        ) else {
            return Err(ValidationError::MissingFields(REQUIRED_FIELDS));
        };

        let email = email.parse()?;

        Ok(Self {
            name,
            email,
            phone: present(form.phone),
            subject: present(form.subject),
            message,
        })
    }
}
