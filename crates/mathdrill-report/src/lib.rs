//! mathdrill-report — results rendering.
//!
//! Turns a [`mathdrill_core::traits::ResultsPayload`] into a shareable
//! self-contained HTML page and into email content (subject, plain-text
//! body, HTML body).

pub mod email;
pub mod html;
