//! # apisports
//!
//! A Rust client library for REST APIs that follow the API-Sports response
//! envelope: every endpoint answers with a JSON body carrying a `response`
//! payload plus optional `errors`, `paging`, `results`, `get` and
//! `parameters` fields.
//!
//! ## Overview
//!
//! The library provides:
//! - Type-safe configuration via [`ClientConfig`] and validated newtypes
//! - A blocking HTTP client ([`HttpClient`]) behind a small transport trait
//!   ([`ApiClient`])
//! - One-shot response classification into a sealed variant family
//!   ([`ApiResponse`]): HTTP error, API error, or success
//! - Payload classification into [`Data`] variants with a uniform
//!   length/iteration contract
//! - Transparent multi-page iteration: a paginated result lazily re-issues
//!   GET requests as iteration crosses page boundaries
//! - Case-insensitive access to rate-limit headers via [`Headers`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use apisports::{ApiKey, ClientConfig, HostUrl, HttpClient, QueryParams};
//!
//! let config = ClientConfig::builder()
//!     .host(HostUrl::new("https://v3.football.api-sports.io")?)
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .build()?;
//! let client = Arc::new(HttpClient::new(config));
//!
//! let mut params = QueryParams::new();
//! params.insert("country".to_string(), "England".to_string());
//!
//! let response = client.request("leagues", &params)?;
//! if response.ok() {
//!     // Iteration fetches follow-up pages on demand.
//!     for league in response.data() {
//!         println!("{}", league?);
//!     }
//! } else {
//!     eprintln!("request failed: {}", response.error_description());
//! }
//! ```
//!
//! ## Classification Without a Transport
//!
//! Classification is pure and works on any raw exchange, which keeps it easy
//! to test or to feed from a different transport:
//!
//! ```rust
//! use std::collections::HashMap;
//! use apisports::{ApiResponse, RawHttpResponse};
//!
//! let raw = RawHttpResponse::new(200, HashMap::new(), r#"{"response": [1, 2]}"#);
//! let response = ApiResponse::from_raw(None, raw);
//! assert!(response.ok());
//! assert_eq!(response.data().len(), 2);
//! ```
//!
//! ## Design Principles
//!
//! - **One classification per exchange**: response and data variants are
//!   chosen once, at construction, by a single factory each
//! - **No global state**: configuration is instance-based and passed
//!   explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Lazy pagination**: no page is fetched until iteration needs it, and
//!   every iterator restarts independently from the buffered first page

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod headers;
pub mod response;

// Re-export public types at crate root for convenience
pub use client::{ApiClient, HttpClient, HttpError, QueryParams, RawHttpResponse, SDK_VERSION};
pub use config::{ApiKey, ClientConfig, ClientConfigBuilder, HostUrl};
pub use data::{Data, DataIter, PagedData, PagedDataError, Paging, SimpleData, SingleData};
pub use error::ConfigError;
pub use headers::Headers;
pub use response::{ApiResponse, ErrorResponse, HttpErrorResponse, SuccessResponse};
