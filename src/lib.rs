//! Smoke tests for remote browsers driven over WebDriver.
//!
//! One [`SmokeRunner::run`] opens a session against an automation server,
//! loads a page, writes a screenshot, and checks the page title for an
//! expected substring. [`SmokeConfig`] carries the knobs and their defaults.

pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod session;

pub use config::{BrowserKind, SmokeBuilder, SmokeConfig};
pub use error::{Error, Result};
pub use runner::{SmokeReport, SmokeRunner};
pub use session::Session;
