//! Backend communication.
//!
//! This module provides the converter's HTTP surface to the widget:
//!
//! # Services
//!
//! - [`api`] - [`ConversionApi`] trait and reply decoding
//! - [`http`] - `gloo-net` implementation used in the browser

pub mod api;
pub mod http;

pub use api::*;
pub use http::*;
