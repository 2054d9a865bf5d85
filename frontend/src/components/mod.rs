//! UI Components for the archive to PDF page.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Header`] - Title bar with the cleanup button
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadArea`] - Archive drop zone and file picker
//! - [`ProgressPanel`] - Progress bar, step and status text
//! - [`ResultPanel`] - Download link and per-PDF list
//! - [`ErrorMessage`] - Error text
//!
//! [`WidgetSignals`] is the reactive [`crate::WidgetView`] they all read.

mod header;
mod hero;
mod upload;
mod progress;
mod result;
mod footer;
mod signals;

pub use header::*;
pub use hero::*;
pub use upload::*;
pub use progress::*;
pub use result::*;
pub use footer::*;
pub use signals::*;
