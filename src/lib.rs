//! Localized error responses for the money-api REST service.
//!
//! Malformed JSON bodies and failed field validation are turned into HTTP 400
//! responses carrying a localized `userMessage` and a raw `devMessage`.

pub mod app;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod responder;
pub mod response;
pub mod validation;
