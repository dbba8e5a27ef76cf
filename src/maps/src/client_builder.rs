// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configure and create a [Client][crate::client::Client].
//!
//! # Example
//! ```
//! # use google_maps::client::Client;
//! use google_maps::retry_policy::{RetryPolicyExt, TransientServerError};
//! # fn sample() -> google_maps::client_builder::Result<()> {
//! let client = Client::builder()
//!     .with_geocoding_api_key("my-api-key")
//!     .with_retry_policy(TransientServerError.with_attempt_limit(3))
//!     .build()?;
//! assert!(client.geocoding().is_some());
//! # Ok(()) }
//! ```

use crate::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use crate::client::Client;
use crate::exponential_backoff::ExponentialBackoff;
use crate::geocoding::GeocodingClient;
use crate::http::HttpClient;
use crate::retry_policy::{LimitedAttemptCount, RetryPolicy, RetryPolicyArg};
use std::sync::Arc;

/// The default endpoint for all Google Maps Platform web services.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/";

/// The result of [ClientBuilder::build()] and similar functions.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
///
/// # Example
/// ```
/// # use google_maps::client::Client;
/// let result = Client::builder().with_geocoding_api_key("").build();
/// match result {
///     Err(e) if e.is_configuration() => { println!("check the client settings: {e}"); }
///     Err(e) => { println!("could not create the client: {e}"); }
///     Ok(_) => { println!("success"); }
/// }
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// A setting in the builder is invalid, for example, an empty API key.
    pub fn is_configuration(&self) -> bool {
        matches!(&self.0, ErrorKind::Configuration(_))
    }

    /// The HTTP transport could not be initialized.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    pub(crate) fn configuration<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Configuration(source.into()))
    }

    pub(crate) fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("invalid client configuration: {0}")]
    Configuration(#[source] BoxError),
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A builder for [Client].
///
/// Applications obtain a builder using [Client::builder()], change the default
/// settings, and then call [build()][ClientBuilder::build].
#[derive(Clone, Default)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    geocoding_api_key: Option<String>,
    http_client: Option<reqwest::Client>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    backoff_policy: Option<Arc<dyn BackoffPolicy>>,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("endpoint", &self.endpoint)
            .field(
                "geocoding_api_key",
                &self.geocoding_api_key.as_ref().map(|_| "[censored]"),
            )
            .field("http_client", &self.http_client)
            .field("retry_policy", &self.retry_policy)
            .field("backoff_policy", &self.backoff_policy)
            .finish()
    }
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates the client.
    ///
    /// Fails if the endpoint is not a valid URL, if the geocoding API key is
    /// present but empty, or if the default HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        reqwest::Url::parse(&endpoint).map_err(Error::configuration)?;
        let http_client = match self.http_client {
            Some(c) => c,
            None => default_http_client()?,
        };
        let inner = HttpClient::new(http_client, endpoint);
        let retry_policy = self
            .retry_policy
            .unwrap_or_else(|| Arc::new(LimitedAttemptCount::default()));
        let backoff_policy = self
            .backoff_policy
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()));
        let geocoding = self
            .geocoding_api_key
            .map(|key| GeocodingClient::from_parts(key, &inner, retry_policy, backoff_policy))
            .transpose()?;
        Ok(Client::from_parts(inner, geocoding))
    }

    /// Sets the base URL for all services.
    ///
    /// The default is `https://maps.googleapis.com/maps/api/`. Applications
    /// rarely need to change it, other than to use a proxy or a test server.
    /// A trailing `/` is added if missing.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Enables the geocoding client using the given API key.
    ///
    /// Without an API key [Client::geocoding()] returns `None`.
    pub fn with_geocoding_api_key<V: Into<String>>(mut self, v: V) -> Self {
        self.geocoding_api_key = Some(v.into());
        self
    }

    /// Uses an existing HTTP client.
    ///
    /// Use this to share a connection pool with the rest of the application,
    /// or to configure timeouts and proxies.
    pub fn with_http_client(mut self, v: reqwest::Client) -> Self {
        self.http_client = Some(v);
        self
    }

    /// Configure the retry policy.
    ///
    /// The default retries `500` and `503` responses, up to five times.
    ///
    /// # Example
    /// ```
    /// # use google_maps::client::Client;
    /// use google_maps::retry_policy::NeverRetry;
    /// let builder = Client::builder().with_retry_policy(NeverRetry);
    /// ```
    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.retry_policy = Some(v.into().0);
        self
    }

    /// Configure the retry backoff policy.
    ///
    /// The default waits `2^(n-1)` seconds, plus up to one second of jitter,
    /// before the n-th retry.
    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.backoff_policy = Some(v.into().0);
        self
    }
}

fn default_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("google-maps-rust/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(Error::transport)
}
