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

//! The Geocoding API response schema.
//!
//! See the [response format] documentation for the meaning of each field.
//!
//! [response format]: https://developers.google.com/maps/documentation/geocoding/requests-geocoding#GeocodingResponses

use crate::error::ApiError;

/// A successful response from the Geocoding API.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GeocodeResponse {
    /// The candidate matches, possibly empty.
    pub results: Vec<GeocodeResult>,

    /// The top-level status, for example `OK` or `ZERO_RESULTS`.
    #[serde(default)]
    pub status: String,

    /// Additional information about the status, rarely present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One candidate match for an address query.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GeocodeResult {
    /// The components of the address, in the order returned by the service.
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,

    /// The human-readable address of this location.
    pub formatted_address: String,

    pub geometry: Geometry,

    /// A unique identifier, usable with other Google Maps Platform APIs.
    pub place_id: String,

    /// The [plus code] of the location, not present for all results.
    ///
    /// [plus code]: https://plus.codes/
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,

    /// The feature types of this result, for example `street_address`.
    #[serde(default)]
    pub types: Vec<String>,

    /// True when the service could not find an exact match.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial_match: bool,

    /// The localities contained in a postal code, only for postal code results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub postcode_localities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Geometry {
    pub location: Location,

    /// How precise the location is, for example `ROOFTOP` or `APPROXIMATE`.
    #[serde(default)]
    pub location_type: String,

    /// The recommended viewport to display the result.
    #[serde(default)]
    pub viewport: Viewport,

    /// The bounding box that fully contains the result, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Viewport>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Viewport {
    pub northeast: Location,
    pub southwest: Location,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlusCode {
    #[serde(default)]
    pub compound_code: String,
    pub global_code: String,
}

/// The two shapes of a `2xx` response body.
///
/// A list of geocoding results requires `formatted_address`, `geometry` and
/// `place_id` in each element, so a `results` list of `{message, code}` pairs
/// decodes as an error envelope.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum GeocodePayload {
    Results(GeocodeResponse),
    Error(ApiError),
}
