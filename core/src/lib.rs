//! Async client SDK for a document-search HTTP service.
//!
//! # Overview
//! Wraps a REST-like document API (index, update, delete, bulk) behind a
//! small set of async methods. The core of the crate is the request/response
//! pipeline: build an `HttpRequest` from a logical operation, serialize the
//! JSON body, dispatch through an `HttpTransport`, and classify the raw
//! response into a `Payload` or a typed `ApiError`.
//!
//! # Design
//! - `SearchClient` is a thin endpoint table; all logic sits in the
//!   transport layer.
//! - The transport is a trait, so the pipeline is testable with stubs while
//!   `ReqwestTransport` does the real I/O over a pooled connection.
//! - Every call resolves to exactly one `Result<Payload, ApiError>`; errors
//!   never escape as panics.
//! - One request per call: no retries, no caching, no built-in timeouts.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;

pub use client::SearchClient;
pub use error::{ApiError, ServerError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Api, HttpTransport, Payload, ReqwestTransport};
