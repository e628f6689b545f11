//! Plain-data HTTP request/response types.
//!
//! # Design
//! These types describe HTTP traffic as data, with no I/O attached. The
//! request pipeline builds `HttpRequest` values and classifies `HttpResponse`
//! values; the `HttpTransport` trait is the only place that touches the
//! network. Keeping the boundary as plain data makes the pipeline testable
//! with stub transports and keeps status interpretation in one place.
//!
//! All fields use owned types (`String`, `Vec`) so values can move freely
//! into the transport's future without lifetime concerns.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One outgoing request, fully resolved: absolute URL, headers, and an
/// already-serialized JSON body. Built per call and discarded after dispatch.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// The raw response a transport produced for an `HttpRequest`.
///
/// Only ever constructed when the server actually answered; a request that
/// got no response at all surfaces as a `TransportError` instead.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
