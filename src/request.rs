use mytasks_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use thiserror::Error;

// =========================================================
// HTTP Interface Abstraction
// =========================================================

/// The request never produced an HTTP response (DNS, refused connection, CORS, ...).
#[derive(Debug, Clone, Error)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);

/// Generic HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
    /// Include cookies (`credentials: "include"` in the browser).
    pub with_credentials: bool,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
            with_credentials: false,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_credentials(mut self) -> Self {
        self.with_credentials = true;
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// Generic HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body; an empty body parses as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let body = self.body.trim();
        if body.is_empty() {
            serde_json::from_str("null")
        } else {
            serde_json::from_str(body)
        }
    }
}

/// HTTP client trait.
/// `?Send` because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// Native client (reqwest)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestHttpClient;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;

    /// Keeps a cookie jar so the refresh cookie survives between calls,
    /// the way a browser tab does.
    #[derive(Clone)]
    pub struct ReqwestHttpClient {
        client: reqwest::Client,
    }

    impl ReqwestHttpClient {
        pub fn new() -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .map_err(|e| TransportError(format!("Reqwest Build Error: {}", e)))?;
            Ok(Self { client })
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for ReqwestHttpClient {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
            let method = match req.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &req.url);

            for (k, v) in req.headers {
                builder = builder.header(k, v);
            }

            if let Some(body) = req.body {
                builder = builder.body(body);
            }

            let resp = builder
                .send()
                .await
                .map_err(|e| TransportError(format!("Reqwest Error: {}", e)))?;

            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportError(format!("Reqwest Body Error: {}", e)))?;

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_covers_2xx_only() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(201, "").ok());
        assert!(!HttpResponse::new(199, "").ok());
        assert!(!HttpResponse::new(401, "").ok());
        assert!(!HttpResponse::new(500, "").ok());
    }

    #[test]
    fn empty_body_parses_as_null() {
        let resp = HttpResponse::new(200, "  ");
        let value: Option<String> = resp.json().unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn builder_sets_headers_and_credentials() {
        let req = HttpRequest::new("http://api/login", HttpMethod::Post)
            .with_header("Content-Type", "application/json")
            .with_body("{}".to_string())
            .with_credentials();
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some("{}"));
        assert!(req.with_credentials);
    }
}
