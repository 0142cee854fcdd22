//! `enrichly-http` is an async HTTP client for the Enrichly enrichment API.
//!
//! The crate wraps the person/company lookup endpoints with typed methods:
//! - [`EnrichlyClient::enrich_person`]
//! - [`EnrichlyClient::enrich_company`]
//!
//! Underneath sits the dispatch engine: [`EnrichlyClient::send`] takes a fully
//! built [`Request`], issues it without blocking the caller, retries throttled
//! and failed attempts with exponential backoff per [`RetryPolicy`], and
//! resolves exactly one [`Outcome`] per dispatch.
//!
//! Note the vendor status convention: **404 is a successful outcome** meaning
//! "no match found" — see [`Classifier`].

mod classify;
mod client;
mod decode;
mod dispatch;
mod error;
mod model;
mod options;
mod request;
mod response;
mod retry;
mod scheduler;
mod transport;

pub use classify::{Classifier, Outcome};
pub use client::{EnrichlyClient, DEFAULT_BASE_URL};
pub use dispatch::Dispatch;
pub use error::EnrichlyError;
pub use model::{CompanyMatch, CompanyQuery, EnrichResponse, PersonMatch, PersonQuery};
pub use options::ClientOptions;
pub use request::{Method, Request};
pub use response::RawResponse;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, Transport};

pub type Result<T> = std::result::Result<T, EnrichlyError>;
