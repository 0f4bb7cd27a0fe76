//! HTTP client and authentication.
//!
//! This module provides the [`HttpClient`] used to download remote tables,
//! along with the [`Auth`] schemes it can attach to a request.

mod auth;
mod http;

pub use auth::Auth;
pub use http::{ClientOptions, DEFAULT_TIMEOUT, HttpClient, with_select_all};
