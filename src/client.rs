use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::{
    decode::decode_enrichment, dispatch, scheduler::BackoffScheduler, Classifier, ClientOptions,
    CompanyMatch, CompanyQuery, Dispatch, EnrichResponse, EnrichlyError, HttpTransport,
    PersonMatch, PersonQuery, Request, Result, RetryPolicy, Transport,
};

/// Production API host used when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "https://api.enrichly.io";

const PERSON_ENRICH_PATH: &str = "/v3/person.enrich";
const COMPANY_ENRICH_PATH: &str = "/v3/company.enrich";

/// Async client for the Enrichly enrichment API.
///
/// Cloning is cheap and clones share one lifecycle: `close()` on any clone
/// shuts down the shared retry scheduler for all of them. The client must be
/// used from within a tokio runtime; `send` spawns dispatch work onto the
/// runtime's worker pool so the returned handle never does the retrying on the
/// caller's task.
#[derive(Clone)]
pub struct EnrichlyClient {
    transport: Arc<dyn Transport>,
    custom_transport: bool,
    base_url: String,
    authorization: String,
    options: ClientOptions,
    classifier: Classifier,
    scheduler: Arc<BackoffScheduler>,
}

impl fmt::Debug for EnrichlyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrichlyClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"<redacted>")
            .field("options", &self.options)
            .field("closed", &self.scheduler.is_shutdown())
            .finish()
    }
}

impl EnrichlyClient {
    /// Creates a client for the production host from an API key.
    ///
    /// The `Bearer ` prefix is added if missing.
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self::new_bearer(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a client from a base URL and a bearer token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added automatically.
    pub fn new_bearer(base_url: impl Into<String>, api_key: impl AsRef<str>) -> Self {
        let authorization = normalize_bearer_authorization(api_key.as_ref());
        Self::new_raw_auth(base_url, authorization)
    }

    /// Creates a client with a full raw authorization value.
    ///
    /// Example: `"Bearer <token>"` or any custom scheme.
    pub fn new_raw_auth(base_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        let options = ClientOptions::default();
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_connect_timeout(
            Duration::from_millis(options.connect_timeout_ms),
        ));
        Self {
            transport,
            custom_transport: false,
            base_url: base_url.into(),
            authorization: authorization.into(),
            options,
            classifier: Classifier::default(),
            scheduler: Arc::new(BackoffScheduler::new()),
        }
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `ENRICHLY_API_KEY` — access token (Bearer prefix optional)
    /// - `ENRICHLY_BASE_URL` — optional override of the production host
    ///
    /// Returns an error if the key is missing or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ENRICHLY_API_KEY").map_err(|_| {
            EnrichlyError::Config("missing ENRICHLY_API_KEY environment variable".to_owned())
        })?;
        if api_key.trim().is_empty() {
            return Err(EnrichlyError::Config(
                "ENRICHLY_API_KEY is set but empty".to_owned(),
            ));
        }
        let base_url = match std::env::var("ENRICHLY_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_BASE_URL.to_owned(),
        };
        Ok(Self::new_bearer(base_url, api_key))
    }

    /// Applies client options such as timeouts and the default retry policy.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        if !self.custom_transport {
            self.transport = Arc::new(HttpTransport::with_connect_timeout(Duration::from_millis(
                options.connect_timeout_ms,
            )));
        }
        self.options = options;
        self
    }

    /// Replaces the transport seam (instrumentation wrappers, test doubles).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self.custom_transport = true;
        self
    }

    /// Replaces the response classifier (custom success status sets).
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Dispatches a fully built request.
    ///
    /// Returns a pending [`Dispatch`] handle immediately; the retry loop runs
    /// on the shared scheduler. When `policy` is `None` the client-level
    /// default applies. After [`EnrichlyClient::close`] the handle resolves
    /// with [`EnrichlyError::ClientShutdown`] without any network activity.
    pub fn send(&self, request: Request, policy: Option<RetryPolicy>) -> Dispatch {
        if self.scheduler.is_shutdown() {
            return Dispatch::ready(Err(EnrichlyError::ClientShutdown));
        }

        let policy = policy.unwrap_or_else(|| self.options.retry.clone());
        let transport = Arc::clone(&self.transport);
        let classifier = self.classifier.clone();
        let shutdown = self.scheduler.shutdown_token();
        let (tx, rx) = oneshot::channel();

        self.scheduler.spawn(async move {
            let result = dispatch::drive(transport, request, policy, classifier, shutdown).await;
            // Receiver may have been dropped; resolution is best-effort then.
            let _ = tx.send(result);
        });

        Dispatch::pending(rx)
    }

    /// Looks up a person profile.
    ///
    /// A 404 from the API resolves as a successful response with `data: None`
    /// ("no match found"); check [`EnrichResponse::has_match`].
    pub async fn enrich_person(&self, query: &PersonQuery) -> Result<EnrichResponse<PersonMatch>> {
        query.validate()?;
        let request = self.post_json(PERSON_ENRICH_PATH, query)?;
        let outcome = self.send(request, None).await?;
        decode_enrichment(outcome)
    }

    /// Looks up a company profile by domain.
    pub async fn enrich_company(
        &self,
        query: &CompanyQuery,
    ) -> Result<EnrichResponse<CompanyMatch>> {
        query.validate()?;
        let request = self.post_json(COMPANY_ENRICH_PATH, query)?;
        let outcome = self.send(request, None).await?;
        decode_enrichment(outcome)
    }

    /// Shuts the client down.
    ///
    /// Idempotent. Pending backoff waits are cancelled and resolve with
    /// [`EnrichlyError::ClientShutdown`]; subsequent `send` calls fail fast.
    /// Dropping the last clone without calling `close` tears the scheduler
    /// down as well, but explicit close is the contract.
    pub fn close(&self) {
        if !self.scheduler.is_shutdown() {
            tracing::debug!(base_url = %self.base_url, "closing enrichly client");
        }
        self.scheduler.shutdown();
    }

    /// Whether `close()` has been called on this client or any clone.
    pub fn is_closed(&self) -> bool {
        self.scheduler.is_shutdown()
    }

    fn post_json<T: Serialize>(&self, path: &str, payload: &T) -> Result<Request> {
        let body = serde_json::to_vec(payload).map_err(|err| {
            EnrichlyError::Decode(format!("failed to encode request body: {err}"))
        })?;
        Ok(Request::post(
            self.endpoint_url(path),
            self.default_headers(),
            body,
            Duration::from_millis(self.options.timeout_ms),
        ))
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("authorization".to_owned(), self.authorization.clone()),
            ("content-type".to_owned(), "application/json".to_owned()),
            ("accept".to_owned(), "application/json".to_owned()),
            (
                "user-agent".to_owned(),
                concat!("enrichly-http/", env!("CARGO_PKG_VERSION")).to_owned(),
            ),
        ]
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
