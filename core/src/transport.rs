//! Request pipeline: credential attachment, body serialization, async
//! dispatch, and status classification.
//!
//! # Design
//! `Api` owns the immutable per-client configuration (request root URL and
//! credential) and reduces every call to the same pipeline: serialize the
//! body, build an `HttpRequest`, hand it to an `HttpTransport`, classify the
//! `HttpResponse`. The transport is a trait object so unit tests can swap in
//! stubs and record what would have gone over the wire; `ReqwestTransport`
//! is the production implementation.
//!
//! Exactly one outbound request is issued per call. There are no retries and
//! no caching; timeouts belong to the transport's own configuration.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ServerError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Successful response payload.
///
/// The service is not obligated to answer with JSON; a 2xx body that does
/// not parse is handed back verbatim rather than treated as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

/// Executes one `HttpRequest` and yields the raw response.
///
/// Implementations own connection pooling, TLS, and socket-level concerns.
/// They must not interpret the status code — a 4xx/5xx answer is still an
/// `Ok(HttpResponse)`; `Err` is reserved for getting no response at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
///
/// The inner client reuses connections across calls, so one
/// `ReqwestTransport` should be shared for the lifetime of a
/// [`SearchClient`](crate::SearchClient).
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// The request pipeline for one configured client.
///
/// Holds the request root URL and the credential; both are immutable after
/// construction, so concurrent calls share `Api` without locking.
#[derive(Clone)]
pub struct Api {
    base_url: String,
    credentials: String,
    transport: Arc<dyn HttpTransport>,
}

impl Api {
    pub fn new(base_url: &str, credentials: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: credentials.to_string(),
            transport,
        }
    }

    /// Serialize `params` (if any), dispatch `method` against `endpoint`
    /// relative to the base URL, and classify the answer.
    ///
    /// A body that fails to serialize short-circuits before any network
    /// call. The credential rides along as the `Authorization` header value
    /// on every request.
    pub async fn request<T>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&T>,
    ) -> Result<Payload, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let body = match params {
            Some(value) => Some(
                serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        let request = HttpRequest {
            method,
            url: format!("{}/{}", self.base_url, endpoint),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), self.credentials.clone()),
            ],
            body,
        };

        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        let response = self.transport.execute(request).await?;
        classify(response)
    }
}

/// Reduce a raw response to the two-case outcome.
///
/// 2xx is the success path: the body is parsed as JSON when possible and
/// returned verbatim otherwise. Everything else, including 3xx, goes through
/// `ServerError::from_status`.
fn classify(response: HttpResponse) -> Result<Payload, ApiError> {
    if (200..=299).contains(&response.status) {
        debug!(status = response.status, "request succeeded");
        return Ok(match serde_json::from_str(&response.body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(response.body),
        });
    }

    let err = ServerError::from_status(response.status);
    warn!(status = response.status, "request failed: {}", err.message());
    Err(ApiError::Server(err))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde::Serializer;

    use super::*;

    /// Stub transport: records every request and answers with a canned
    /// status/body.
    struct StubTransport {
        status: u16,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            })
        }
    }

    /// Transport that always fails with a connectivity-style error.
    struct FailingTransport;

    #[async_trait]
    impl HttpTransport for FailingTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError("connection refused".to_string()))
        }
    }

    /// A body whose serialization always fails.
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable as JSON"))
        }
    }

    fn api(transport: Arc<dyn HttpTransport>) -> Api {
        Api::new("http://localhost:9200/myapp", "user:secret", transport)
    }

    #[tokio::test]
    async fn success_with_json_body_yields_json_payload() {
        let stub = Arc::new(StubTransport::new(200, r#"{"result":"created"}"#));
        let payload = api(stub)
            .request::<serde_json::Value>(HttpMethod::Get, "docs/1", None)
            .await
            .unwrap();
        assert_eq!(
            payload,
            Payload::Json(serde_json::json!({"result": "created"}))
        );
    }

    #[tokio::test]
    async fn success_with_non_json_body_yields_raw_text() {
        let stub = Arc::new(StubTransport::new(200, "pong"));
        let payload = api(stub)
            .request::<serde_json::Value>(HttpMethod::Get, "ping", None)
            .await
            .unwrap();
        assert_eq!(payload, Payload::Text("pong".to_string()));
    }

    #[tokio::test]
    async fn status_400_classifies_as_bad_request() {
        let stub = Arc::new(StubTransport::new(400, ""));
        let err = api(stub)
            .request::<serde_json::Value>(HttpMethod::Post, "docs", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server(ServerError::BadRequest)));
    }

    #[tokio::test]
    async fn status_500_classifies_as_server_unavailable() {
        let stub = Arc::new(StubTransport::new(500, ""));
        let err = api(stub)
            .request::<serde_json::Value>(HttpMethod::Post, "docs", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Server(ServerError::ServerUnavailable)
        ));
    }

    #[tokio::test]
    async fn other_error_statuses_carry_the_raw_code() {
        for status in [302u16, 404, 503] {
            let stub = Arc::new(StubTransport::new(status, ""));
            let err = api(stub)
                .request::<serde_json::Value>(HttpMethod::Get, "docs/1", None)
                .await
                .unwrap_err();
            assert!(
                matches!(err, ApiError::Server(ServerError::Other(code)) if code == status),
                "status {status} misclassified: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn status_201_is_still_success() {
        let stub = Arc::new(StubTransport::new(201, r#"{"result":"created"}"#));
        let payload = api(stub)
            .request::<serde_json::Value>(HttpMethod::Post, "docs", None)
            .await
            .unwrap();
        assert!(matches!(payload, Payload::Json(_)));
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let err = api(Arc::new(FailingTransport))
            .request::<serde_json::Value>(HttpMethod::Get, "docs/1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn serialization_failure_never_reaches_the_transport() {
        let stub = Arc::new(StubTransport::new(200, "{}"));
        let err = api(stub.clone())
            .request(HttpMethod::Post, "docs", Some(&Unserializable))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert!(stub.seen.lock().unwrap().is_empty(), "no request expected");
    }

    #[tokio::test]
    async fn request_carries_content_type_and_credential_headers() {
        let stub = Arc::new(StubTransport::new(200, "{}"));
        api(stub.clone())
            .request(HttpMethod::Put, "docs/1", Some(&serde_json::json!({"a": 1})))
            .await
            .unwrap();

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.url, "http://localhost:9200/myapp/docs/1");
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        assert!(req
            .headers
            .contains(&("authorization".to_string(), "user:secret".to_string())));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn trailing_slash_on_base_url_is_stripped() {
        let stub = Arc::new(StubTransport::new(200, "{}"));
        let api = Api::new("http://localhost:9200/myapp/", "creds", stub.clone());
        api.request::<serde_json::Value>(HttpMethod::Get, "docs/1", None)
            .await
            .unwrap();
        assert_eq!(
            stub.seen.lock().unwrap()[0].url,
            "http://localhost:9200/myapp/docs/1"
        );
    }
}
