//! Main DashboardClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::api::DEFAULT_API_PREFIX;
use crate::api::RetryConfig;
use crate::api::api_root;
use crate::auth::TokenSource;
use crate::error::ApiError;

/// Client for the streaming platform's admin API.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across tasks.
/// Tokens come from a [`TokenSource`], normally an
/// [`AuthContext`](crate::auth::AuthContext).
///
/// # Example
///
/// ```ignore
/// use reelboard_lib::DashboardClient;
/// use reelboard_lib::auth::AuthContext;
/// use reelboard_lib::model::Film;
///
/// let auth = AuthContext::in_memory("http://localhost:5000/api/v1");
/// auth.admin().login("root@example.com", "secret").await?;
///
/// let client = DashboardClient::builder()
///     .url("http://localhost:5000")
///     .auth(auth.clone())
///     .build()?;
///
/// let films = client.list::<Film>().await?;
/// ```
#[derive(Clone)]
pub struct DashboardClient {
    pub(crate) inner: Arc<DashboardClientInner>,
}

pub(crate) struct DashboardClientInner {
    pub(crate) api_root: String,
    pub(crate) tokens: Arc<dyn TokenSource>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) retry_config: RetryConfig,
}

impl DashboardClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> DashboardClientBuilder<Missing, Missing> {
        DashboardClientBuilder::new()
    }

    /// Server URL joined with the API prefix.
    pub fn api_root(&self) -> &str {
        &self.inner.api_root
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`DashboardClient`].
///
/// Uses the typestate pattern so `url` and `auth` must be set before
/// `build` is available.
pub struct DashboardClientBuilder<Url, Auth> {
    url: Url,
    auth: Auth,
    api_prefix: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    http_client: Option<Client>,
}

impl DashboardClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            auth: Missing,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            http_client: None,
        }
    }
}

impl Default for DashboardClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DashboardClientBuilder<Missing, A> {
    /// Sets the server URL, e.g. `http://localhost:5000`.
    pub fn url(self, url: impl Into<String>) -> DashboardClientBuilder<Set<String>, A> {
        DashboardClientBuilder {
            url: Set(url.into()),
            auth: self.auth,
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U> DashboardClientBuilder<U, Missing> {
    /// Sets where bearer tokens come from.
    pub fn auth<T: TokenSource + 'static>(self, tokens: T) -> DashboardClientBuilder<U, Set<Arc<dyn TokenSource>>> {
        DashboardClientBuilder {
            url: self.url,
            auth: Set(Arc::new(tokens) as Arc<dyn TokenSource>),
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            http_client: self.http_client,
        }
    }
}

impl<U, A> DashboardClientBuilder<U, A> {
    /// Sets the API prefix. Defaults to `/api/v1`.
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Ignored when a custom HTTP client is supplied.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl DashboardClientBuilder<Set<String>, Set<Arc<dyn TokenSource>>> {
    /// Builds the [`DashboardClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<DashboardClient, ApiError> {
        let url = self.url.0;
        let parsed = url::Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!("{}: unsupported scheme", url)));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(DashboardClient {
            inner: Arc::new(DashboardClientInner {
                api_root: api_root(&url, &self.api_prefix),
                tokens: self.auth.0,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}
