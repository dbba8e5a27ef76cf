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

//! Google Maps Platform client for Rust.
//!
//! This crate contains a client for the [Geocoding API], which converts a
//! free-text address into geographic coordinates and structured address
//! metadata. All the geocoding work happens in the service, the client builds
//! the request, retries transient server failures, and decodes the response.
//!
//! # Example
//! ```no_run
//! use google_maps::client::Client;
//! # async fn sample() -> anyhow::Result<()> {
//! let client = Client::builder()
//!     .with_geocoding_api_key("my-api-key")
//!     .build()?;
//! let geocoding = client.geocoding().expect("the API key was provided");
//! for result in geocoding.geocode("1600 Amphitheatre Parkway, Mountain View, CA").await? {
//!     let location = &result.geometry.location;
//!     println!("{} is at ({}, {})", result.formatted_address, location.lat, location.lng);
//! }
//! # Ok(()) }
//! ```
//!
//! [Geocoding API]: https://developers.google.com/maps/documentation/geocoding

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions making requests.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The error types returned by the client.
pub mod error;

/// The types returned by the Geocoding API.
pub mod model;

pub mod backoff_policy;
pub mod client;
pub mod client_builder;
pub mod exponential_backoff;
pub mod geocoding;
pub mod retry_policy;
pub mod retry_result;

pub(crate) mod http;
pub(crate) mod retry_loop_internal;

#[cfg(test)]
pub(crate) mod mock_rng;
