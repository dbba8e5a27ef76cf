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

//! A client for the [Geocoding API].
//!
//! Geocoding converts a free-text address into geographic coordinates and
//! structured address metadata. The client sends the request, retries
//! `500` and `503` responses, and decodes the results.
//!
//! [Geocoding API]: https://developers.google.com/maps/documentation/geocoding

use crate::Result;
use crate::backoff_policy::BackoffPolicy;
use crate::client_builder::{DEFAULT_ENDPOINT, Error as BuilderError};
use crate::error::Error;
use crate::exponential_backoff::ExponentialBackoff;
use crate::http::HttpClient;
use crate::model::{GeocodeResponse, GeocodeResult};
use crate::retry_policy::{LimitedAttemptCount, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;

const SERVICE_PATH: &str = "geocode/";
const OUTPUT_FORMAT: &str = "json";

/// Implements a client for the Geocoding API.
///
/// # Example
/// ```no_run
/// # use google_maps::geocoding::GeocodingClient;
/// # async fn sample() -> anyhow::Result<()> {
/// let client = GeocodingClient::new("my-api-key", reqwest::Client::new())?;
/// let results = client.geocode("Av. Paulista, 1578, São Paulo").await?;
/// for r in results {
///     println!("{} {:?}", r.formatted_address, r.geometry.location);
/// }
/// # Ok(()) }
/// ```
///
/// # Pooling and Cloning
///
/// `GeocodingClient` holds a [reqwest::Client], which holds a connection pool
/// internally. Clone the client to share the pool, creating new instances is
/// rarely necessary.
#[derive(Clone)]
pub struct GeocodingClient {
    api_key: String,
    inner: HttpClient,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for GeocodingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingClient")
            .field("api_key", &"[censored]")
            .field("inner", &self.inner)
            .field("retry_policy", &self.retry_policy)
            .field("backoff_policy", &self.backoff_policy)
            .finish()
    }
}

impl GeocodingClient {
    /// Creates a client using the default endpoint and policies.
    ///
    /// Returns a configuration error if `api_key` is empty.
    pub fn new<K: Into<String>>(
        api_key: K,
        http_client: reqwest::Client,
    ) -> crate::client_builder::Result<Self> {
        let inner = HttpClient::new(http_client, DEFAULT_ENDPOINT);
        Self::from_parts(
            api_key.into(),
            &inner,
            Arc::new(LimitedAttemptCount::default()),
            Arc::new(ExponentialBackoff::default()),
        )
    }

    pub(crate) fn from_parts(
        api_key: String,
        inner: &HttpClient,
        retry_policy: Arc<dyn RetryPolicy>,
        backoff_policy: Arc<dyn BackoffPolicy>,
    ) -> crate::client_builder::Result<Self> {
        if api_key.is_empty() {
            return Err(BuilderError::configuration(
                "the geocoding API key is empty",
            ));
        }
        Ok(Self {
            api_key,
            inner: inner.scoped(SERVICE_PATH),
            retry_policy,
            backoff_policy,
        })
    }

    /// Geocodes a free-text address.
    ///
    /// Returns the candidate matches, possibly empty. The address is not
    /// validated, any string is sent to the service as-is.
    pub async fn geocode<A: Into<String>>(&self, address: A) -> Result<Vec<GeocodeResult>> {
        self.geocode_request(GeocodeRequest::new(address)).await
    }

    /// Geocodes an address with additional request parameters.
    pub async fn geocode_request(&self, request: GeocodeRequest) -> Result<Vec<GeocodeResult>> {
        self.geocode_response(request).await.map(|r| r.results)
    }

    /// Geocodes an address and returns the full response.
    ///
    /// The response includes the top-level `status` and `error_message`, which
    /// the service may set even when there are no results.
    pub async fn geocode_response(&self, request: GeocodeRequest) -> Result<GeocodeResponse> {
        let address = request.address.clone();
        let query = Query {
            key: self.api_key.clone(),
            address: request.address,
            language: request.language,
            region: request.region,
        };
        let http = self.inner.clone();
        // Each attempt owns its request and client, so the future is `Send`.
        let inner = move || {
            let builder = http
                .builder(reqwest::Method::GET, OUTPUT_FORMAT)
                .query(&query);
            let http = http.clone();
            async move { http.execute(builder).await }
        };
        let sleep = async |d| tokio::time::sleep(d).await;
        crate::retry_loop_internal::retry_loop(
            inner,
            sleep,
            self.retry_policy.clone(),
            self.backoff_policy.clone(),
            move |attempt, _: &Error, delay: Duration| {
                tracing::warn!(
                    attempt,
                    address = %address,
                    ?delay,
                    "starting retry {attempt} for geocode `{address}`"
                );
            },
        )
        .await
    }
}

/// The parameters for a geocoding request.
///
/// # Example
/// ```
/// # use google_maps::geocoding::GeocodeRequest;
/// let request = GeocodeRequest::new("Rua Augusta, Lisboa")
///     .set_language("pt")
///     .set_region("pt");
/// assert_eq!(request.address, "Rua Augusta, Lisboa");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct GeocodeRequest {
    /// The free-text address to geocode.
    pub address: String,

    /// The language for the results, for example `en` or `pt-BR`.
    pub language: Option<String>,

    /// A region code used to bias the results, for example `us` or `br`.
    pub region: Option<String>,
}

impl GeocodeRequest {
    pub fn new<T: Into<String>>(address: T) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Sets the value of [language][GeocodeRequest::language].
    pub fn set_language<T: Into<String>>(mut self, v: T) -> Self {
        self.language = Some(v.into());
        self
    }

    /// Sets or clears the value of [language][GeocodeRequest::language].
    pub fn set_or_clear_language<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.language = v.map(Into::into);
        self
    }

    /// Sets the value of [region][GeocodeRequest::region].
    pub fn set_region<T: Into<String>>(mut self, v: T) -> Self {
        self.region = Some(v.into());
        self
    }

    /// Sets or clears the value of [region][GeocodeRequest::region].
    pub fn set_or_clear_region<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.region = v.map(Into::into);
        self
    }
}

impl From<&str> for GeocodeRequest {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for GeocodeRequest {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, serde::Serialize)]
struct Query {
    key: String,
    address: String,
    language: Option<String>,
    region: Option<String>,
}
