/// Basic application code
pub mod app;
/// REST clients for outbound mail relays
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Cross-origin headers and preflight handling
pub mod cors;
/// Domain objects and form validation
pub mod domain;
/// Error enums
pub mod error;
/// Rendering and dispatch of notification emails
pub mod notify;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
