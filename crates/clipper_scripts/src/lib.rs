//! Scrape scripts for the social bookmark clipper.
//!
//! One binary hosts every platform script; the positional script name picks
//! the platform. On success stdout carries exactly one JSON array, emitted
//! at the very end of the run; stderr carries `PROGRESS:<percent>:<label>`
//! markers plus free-form diagnostics.
pub mod args;
pub mod browser;
pub mod cookies;
pub mod extract;
pub mod platforms;
pub mod progress;
pub mod scrape;
