//! # SP-API Client Library
//!
//! Client-side request orchestrator for the Amazon Selling Partner API.
//! Obtains and caches short-lived LWA bearer tokens, resolves the regional
//! endpoint, and issues requests with bounded retry and exponential backoff.
//!
//! Modules:
//! - `config` — explicit configuration and the regional endpoint registry
//! - `cache` — single-slot access token cache
//! - `auth` — LWA refresh-token credential exchange
//! - `resilience` — failure classification and the retrying request executor
//! - `api` — FBA request builders calling into the executor

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod resilience;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::token_cache::TokenCache;
pub use crate::config::settings::{RetryPolicy, SpApiConfig};
pub use crate::error::{AuthError, RequestError};
pub use crate::resilience::executor::RequestExecutor;
