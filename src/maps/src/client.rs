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

use crate::client_builder::ClientBuilder;
use crate::geocoding::GeocodingClient;
use crate::http::HttpClient;

/// The entry point for the Google Maps Platform web services.
///
/// The client holds the shared HTTP configuration and one sub-client per
/// service. Sub-clients are only created when their configuration is present.
///
/// # Example
/// ```
/// # use google_maps::client::Client;
/// # fn sample() -> anyhow::Result<()> {
/// let client = Client::builder().build()?;
/// assert!(client.geocoding().is_none());
///
/// let client = Client::builder().with_geocoding_api_key("my-api-key").build()?;
/// assert!(client.geocoding().is_some());
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: HttpClient,
    geocoding: Option<GeocodingClient>,
}

impl Client {
    /// Returns a builder for [Client].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(inner: HttpClient, geocoding: Option<GeocodingClient>) -> Self {
        Self { inner, geocoding }
    }

    /// The base URL for all services.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    /// The geocoding client, if an API key was configured.
    pub fn geocoding(&self) -> Option<&GeocodingClient> {
        self.geocoding.as_ref()
    }
}
