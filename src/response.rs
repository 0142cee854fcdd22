use std::borrow::Cow;

/// Raw HTTP response as seen by the dispatch engine.
///
/// The body is carried as opaque bytes; the engine never parses it beyond what
/// classification needs. Typed decoding happens in the model layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (diagnostic use only).
    pub headers: Vec<(String, String)>,
    /// Raw body bytes; may be empty.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Lossy text view of the body for messages and diagnostics.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
