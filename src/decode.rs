use serde::de::DeserializeOwned;

use crate::{EnrichResponse, EnrichlyError, Outcome, Result};

/// Decodes a classified outcome into a typed enrichment response.
///
/// This is the only place successful payload JSON is parsed; the dispatch
/// engine carries the body as opaque bytes. A 200 parses the profile; other
/// successful statuses (202 queued, 404 no match) carry no payload. Failure
/// outcomes map through unchanged with `success: false`.
pub(crate) fn decode_enrichment<T: DeserializeOwned>(outcome: Outcome) -> Result<EnrichResponse<T>> {
    match outcome {
        Outcome::Success {
            status,
            body,
            message,
        } => {
            let data = if status == 200 {
                let parsed = serde_json::from_slice::<T>(&body).map_err(|err| {
                    EnrichlyError::Decode(format!("invalid enrichment payload JSON: {err}"))
                })?;
                Some(parsed)
            } else {
                None
            };
            Ok(EnrichResponse {
                success: true,
                status,
                message,
                data,
            })
        }
        Outcome::Failure { status, message } => Ok(EnrichResponse {
            success: false,
            status,
            message,
            data: None,
        }),
    }
}
