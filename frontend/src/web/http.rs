//! Browser transport for the client core.
//!
//! Cookie-authenticated calls go out with `credentials: include` so the
//! refresh cookie travels cross-origin; everything else is a plain fetch.

use gloo_net::http::{Method, RequestBuilder};
use mytasks::shared::protocol::HttpMethod;
use mytasks::{HttpClient, HttpRequest, HttpResponse, TransportError};
use web_sys::RequestCredentials;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchHttpClient;

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if req.with_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(format!("request build failed: {e}")))?;

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError(format!("fetch failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError(format!("body read failed: {e}")))?;

        Ok(HttpResponse::new(status, body))
    }
}
