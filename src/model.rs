use serde::{Deserialize, Serialize};

use crate::{EnrichlyError, Result};

/// Person lookup query.
///
/// At least one strong identifier (email or phone) is required; a name-only
/// lookup additionally needs a location to disambiguate. Validation runs once
/// before the request is built, never during dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl PersonQuery {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Self::default()
        }
    }

    pub fn by_name(full_name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Checks the query carries enough identifiers to be dispatched.
    pub fn validate(&self) -> Result<()> {
        let has = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty())
        };
        if has(&self.email) || has(&self.phone) {
            return Ok(());
        }
        if has(&self.full_name) {
            if has(&self.location) {
                return Ok(());
            }
            return Err(EnrichlyError::InvalidQuery(
                "full_name queries require a location".to_owned(),
            ));
        }
        Err(EnrichlyError::InvalidQuery(
            "at least one of email, phone or full_name is required".to_owned(),
        ))
    }
}

/// Company lookup query, keyed by registered domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompanyQuery {
    pub domain: String,
}

impl CompanyQuery {
    pub fn by_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(EnrichlyError::InvalidQuery(
                "domain must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Person profile returned by a successful match.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PersonMatch {
    pub full_name: Option<String>,
    pub age_range: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub organization: Option<String>,
    pub linkedin_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub avatar_url: Option<String>,
    /// Vendor confidence score in `[0, 1]`.
    pub likelihood: Option<f64>,
}

/// Company profile returned by a successful match.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompanyMatch {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub founded: Option<u16>,
    pub employees: Option<u64>,
}

/// Resolved enrichment result.
///
/// `success` mirrors the transport-level classification, so a "no match found"
/// 404 arrives here with `success: true` and `data: None`. Classified API
/// failures (invalid key, quota exceeded, ...) arrive with `success: false`
/// and the classified message — they are not `Err` values. Callers must check
/// `success`/`data` rather than relying on `?`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrichResponse<T> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> EnrichResponse<T> {
    /// Whether the lookup succeeded and produced a profile.
    pub fn has_match(&self) -> bool {
        self.success && self.data.is_some()
    }
}
