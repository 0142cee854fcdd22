use std::fmt;
use std::time::Duration;

/// HTTP method for an outgoing request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fully built outgoing request.
///
/// Headers are already merged (authorization, content type, user agent) by the
/// time a `Request` exists; the dispatch engine transmits it verbatim and
/// re-sends the identical bytes on every retry attempt. Callers must therefore
/// only dispatch requests that are safe to replay.
#[derive(Clone, Eq, PartialEq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    timeout: Duration,
}

impl Request {
    pub fn new(
        method: Method,
        url: impl Into<String>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body,
            timeout,
        }
    }

    /// Creates a body-less GET request.
    pub fn get(url: impl Into<String>, headers: Vec<(String, String)>, timeout: Duration) -> Self {
        Self::new(Method::Get, url, headers, Vec::new(), timeout)
    }

    /// Creates a POST request with a serialized body.
    pub fn post(
        url: impl Into<String>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Self {
        Self::new(Method::Post, url, headers, body, timeout)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Per-attempt timeout; each retry attempt gets the full timeout again.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.as_str(), "<redacted>")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}
