use anyhow::Context as _;

use tera::{Context, Tera};

use crate::client::Email;
use crate::domain::{BookingReference, BookingSubmission, ContactSubmission};

use super::{Letterhead, Notice};

const NOT_PROVIDED: &str = "Not provided";
const GENERAL_INQUIRY: &str = "General Inquiry";

const CONTACT_BUSINESS: &str = "contact_business.html";
const CONTACT_ACKNOWLEDGMENT: &str = "contact_acknowledgment.html";
const BOOKING_BUSINESS: &str = "booking_business.html";
const BOOKING_ACKNOWLEDGMENT: &str = "booking_acknowledgment.html";

/// Message bodies, compiled into the binary. Every `.html` template is autoescaped.
#[derive(Debug)]
pub struct Templates(Tera);

impl Templates {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                CONTACT_BUSINESS,
                include_str!("../../templates/contact_business.html"),
            ),
            (
                CONTACT_ACKNOWLEDGMENT,
                include_str!("../../templates/contact_acknowledgment.html"),
            ),
            (
                BOOKING_BUSINESS,
                include_str!("../../templates/booking_business.html"),
            ),
            (
                BOOKING_ACKNOWLEDGMENT,
                include_str!("../../templates/booking_acknowledgment.html"),
            ),
        ])
        .context("Failed to compile message templates")?;

        Ok(Self(tera))
    }

    fn render(&self, name: &str, context: &Context) -> anyhow::Result<String> {
        self.0
            .render(name, context)
            .with_context(|| format!("Failed to render {}", name))
    }
}

impl Notice for ContactSubmission {
    fn business(&self, letterhead: &Letterhead, templates: &Templates) -> anyhow::Result<Email> {
        let subject_line = self.subject.as_deref().unwrap_or(GENERAL_INQUIRY);

        let mut context = Context::new();
        context.insert("name", &self.name);
        context.insert("email", self.email.as_ref());
        context.insert("phone", self.phone.as_deref().unwrap_or(NOT_PROVIDED));
        context.insert("subject", subject_line);
        context.insert("message", &self.message);

        Ok(Email {
            from: letterhead.sender(format!("{} Contact Form", letterhead.brand)),
            to: letterhead.operator.clone(),
            subject: format!("New Contact Submission: {}", subject_line),
            html_body: templates.render(CONTACT_BUSINESS, &context)?,
        })
    }

    fn acknowledgment(
        &self,
        letterhead: &Letterhead,
        templates: &Templates,
    ) -> anyhow::Result<Email> {
        let mut context = Context::new();
        context.insert("name", &self.name);
        context.insert("brand", &letterhead.brand);

        Ok(Email {
            from: letterhead.sender(letterhead.brand.clone()),
            to: self.email.clone(),
            subject: format!("Thank you for contacting {}", letterhead.brand),
            html_body: templates.render(CONTACT_ACKNOWLEDGMENT, &context)?,
        })
    }
}

/// An accepted booking together with the reference issued for it
#[derive(Debug, Clone, Copy)]
pub struct BookingNotice<'a> {
    pub booking: &'a BookingSubmission,
    pub reference: &'a BookingReference,
}

impl Notice for BookingNotice<'_> {
    fn business(&self, letterhead: &Letterhead, templates: &Templates) -> anyhow::Result<Email> {
        let booking = self.booking;

        let mut context = Context::new();
        context.insert("reference", self.reference.as_ref());
        context.insert("name", &booking.name);
        context.insert("email", booking.email.as_ref());
        context.insert("phone", booking.phone.as_ref());
        context.insert("company", booking.company.as_deref().unwrap_or(NOT_PROVIDED));
        context.insert("service", &booking.service);
        // Rendered by us, inserted unescaped
        context.insert("date", &booking.date.format("%Y/%m/%d").to_string());
        context.insert("time", &booking.time);
        context.insert("message", &booking.message);

        Ok(Email {
            from: letterhead.sender(format!("{} Booking System", letterhead.brand)),
            to: letterhead.operator.clone(),
            subject: format!(
                "New Appointment Booking: {} - {}",
                booking.service, self.reference
            ),
            html_body: templates.render(BOOKING_BUSINESS, &context)?,
        })
    }

    fn acknowledgment(
        &self,
        letterhead: &Letterhead,
        templates: &Templates,
    ) -> anyhow::Result<Email> {
        let mut context = Context::new();
        context.insert("name", &self.booking.name);
        context.insert("brand", &letterhead.brand);
        context.insert("reference", self.reference.as_ref());

        Ok(Email {
            from: letterhead.sender(letterhead.brand.clone()),
            to: self.booking.email.clone(),
            subject: format!("Appointment Request Received \u{2013} {}", self.reference),
            html_body: templates.render(BOOKING_ACKNOWLEDGMENT, &context)?,
        })
    }
}
