use serde::Deserialize;

use crate::RawResponse;

/// Terminal classified result of a dispatch.
///
/// Classified failures are ordinary resolutions, not errors: a 4xx/5xx status
/// outside the success set resolves the dispatch with [`Outcome::Failure`].
/// Only exhausted transport-level failures reject the dispatch (see
/// [`crate::EnrichlyError::Transport`]).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Transport-level success per the vendor convention (see [`Classifier`]).
    Success {
        status: u16,
        /// Raw payload bytes; decoded by the model layer.
        body: Vec<u8>,
        message: String,
    },
    /// Well-formed HTTP response outside the success set.
    Failure { status: u16, message: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Success { status, .. } | Self::Failure { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }
}

/// Maps a terminal raw response to an [`Outcome`].
///
/// **The default success set is {200, 202, 404} — including 404.** This is the
/// Enrichly API convention, not general HTTP semantics: 404 means "no match
/// found", a valid empty-result lookup, and resolves as a `Success` with no
/// payload. 202 means the lookup was accepted and queued for asynchronous
/// search. Integrators who need conventional semantics for another endpoint
/// family can supply their own success set via [`Classifier::new`].
///
/// Classification is a pure function of the response: same input, same
/// `Outcome`, regardless of how many retries preceded it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Classifier {
    success: Vec<u16>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            success: vec![200, 202, 404],
        }
    }
}

impl Classifier {
    /// Creates a classifier with a custom success status set.
    pub fn new(success: impl Into<Vec<u16>>) -> Self {
        Self {
            success: success.into(),
        }
    }

    /// Classifies a terminal raw response.
    pub fn classify(&self, response: &RawResponse) -> Outcome {
        if self.success.contains(&response.status) {
            Outcome::Success {
                status: response.status,
                body: response.body.clone(),
                message: success_message(response.status),
            }
        } else {
            Outcome::Failure {
                status: response.status,
                message: failure_message(response),
            }
        }
    }
}

fn success_message(status: u16) -> String {
    let message = match status {
        200 => "OK",
        202 => "Accepted, queued for search",
        404 => "No match found",
        _ => "Success",
    };
    message.to_owned()
}

/// Error payload shape used by the API: `{"message": "...", "code": "..."}`.
#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
}

fn failure_message(response: &RawResponse) -> String {
    if response.status >= 500 && response.body.is_empty() {
        return "Server error".to_owned();
    }
    if let Ok(payload) = serde_json::from_slice::<ErrorPayload>(&response.body) {
        if let Some(message) = payload.message {
            if !message.is_empty() {
                return message;
            }
        }
    }
    let text = response.body_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Classifier, Outcome, RawResponse};

    fn response(status: u16, body: &[u8]) -> RawResponse {
        RawResponse {
            status,
            headers: vec![],
            body: body.to_vec(),
        }
    }

    #[test]
    fn status_200_with_body_is_success() {
        let outcome = Classifier::default().classify(&response(200, br#"{"full_name":"Kit"}"#));
        match outcome {
            Outcome::Success {
                status,
                body,
                message,
            } => {
                assert_eq!(status, 200);
                assert_eq!(message, "OK");
                assert!(!body.is_empty());
            }
            Outcome::Failure { .. } => panic!("expected success"),
        }
    }

    #[test]
    fn status_202_is_success_queued() {
        let outcome = Classifier::default().classify(&response(202, b""));
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "Accepted, queued for search");
    }

    #[test]
    fn status_404_is_success_no_match() {
        let outcome = Classifier::default().classify(&response(404, b""));
        assert!(outcome.is_success());
        assert_eq!(outcome.status(), 404);
        assert_eq!(outcome.message(), "No match found");
    }

    #[test]
    fn client_errors_are_classified_failures() {
        let classifier = Classifier::default();
        for status in [400, 401, 403, 422] {
            let outcome =
                classifier.classify(&response(status, br#"{"message":"bad credentials"}"#));
            assert!(!outcome.is_success(), "status {status} must fail");
            assert_eq!(outcome.status(), status);
            assert_eq!(outcome.message(), "bad credentials");
        }
    }

    #[test]
    fn server_error_with_empty_body_gets_generic_message() {
        let outcome = Classifier::default().classify(&response(503, b""));
        assert_eq!(
            outcome,
            Outcome::Failure {
                status: 503,
                message: "Server error".to_owned(),
            }
        );
    }

    #[test]
    fn unparseable_failure_body_falls_back_to_text() {
        let outcome = Classifier::default().classify(&response(400, b"plain text problem"));
        assert_eq!(outcome.message(), "plain text problem");
    }

    #[test]
    fn empty_4xx_body_falls_back_to_status() {
        let outcome = Classifier::default().classify(&response(400, b""));
        assert_eq!(outcome.message(), "HTTP 400");
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = Classifier::default();
        let raw = response(404, br#"{"message":"ignored"}"#);
        assert_eq!(classifier.classify(&raw), classifier.classify(&raw));
    }

    #[test]
    fn custom_success_set_restores_conventional_404() {
        let classifier = Classifier::new([200u16, 202]);
        assert!(!classifier.classify(&response(404, b"")).is_success());
    }
}
