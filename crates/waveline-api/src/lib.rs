//! # waveline-api
//!
//! Typed HTTP client for the waveline backend.
//!
//! The backend speaks JSON over HTTPS with bearer-token authentication.
//! [`ApiClient`] owns the base URL and the process-wide token; the endpoint
//! wrappers in [`auth`] and [`whatsapp`] map one function to one backend
//! route each. A call either resolves or rejects exactly once — there is
//! no client-side retry, timeout, or in-flight deduplication.

pub mod auth;
pub mod client;
pub mod config;
pub mod whatsapp;

mod error;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
