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

use crate::Result;
use crate::error::{ApiError, Error, relevant_error};
use crate::model::{GeocodePayload, GeocodeResponse};
use bytes::Bytes;
use http::HeaderMap;

/// A thin wrapper over a shared [reqwest::Client] bound to an endpoint.
///
/// The endpoint always ends with `/`, so request paths are simply appended.
#[derive(Clone, Debug)]
pub(crate) struct HttpClient {
    inner: reqwest::Client,
    endpoint: String,
}

impl HttpClient {
    pub fn new(inner: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        Self { inner, endpoint }
    }

    /// Returns a client for a sub-resource, sharing the connection pool.
    pub fn scoped(&self, path: &str) -> Self {
        Self::new(self.inner.clone(), format!("{}{path}", &self.endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn builder(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}{path}", &self.endpoint))
    }

    /// Sends a single geocoding request and decodes the response.
    pub async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<GeocodeResponse> {
        let response = builder.send().await.map_err(map_send_error)?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let payload = response
            .bytes()
            .await
            .map_err(|e| Error::io(e.without_url()))?;
        to_geocode_response(status_code, headers, payload)
    }
}

// The request URL carries the API key, strip it from any error we return.
fn map_send_error(err: reqwest::Error) -> Error {
    match err.without_url() {
        e if e.is_timeout() => Error::timeout(e),
        e if e.is_builder() => Error::ser(e),
        e => Error::io(e),
    }
}

/// Converts a complete HTTP response into the geocoding result.
///
/// A 4xx or 5xx status becomes an HTTP error, the body is kept as its payload
/// and is not decoded. A `2xx` body must decode as one of the
/// [GeocodePayload] shapes. A non-empty error envelope is reported as an API
/// error carrying the HTTP metadata.
pub(crate) fn to_geocode_response(
    status_code: u16,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<GeocodeResponse> {
    if (400..600).contains(&status_code) {
        return Err(Error::http(status_code, headers, payload));
    }
    let (http_error, decoded) = match serde_json::from_slice::<GeocodePayload>(&payload) {
        Ok(p) => (None, p),
        Err(e) => (
            Some(Error::deser(e)),
            GeocodePayload::Error(ApiError::default()),
        ),
    };

    let (response, api_error) = match decoded {
        GeocodePayload::Results(r) => (r, ApiError::default()),
        GeocodePayload::Error(e) => {
            let response = GeocodeResponse {
                results: Vec::new(),
                status: e.status.clone(),
                error_message: Some(e.error_message.clone()).filter(|m| !m.is_empty()),
            };
            (response, e)
        }
    };

    match relevant_error(http_error, api_error) {
        Some(e) => Err(e.with_http_metadata(status_code, headers)),
        None => Ok(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;
    use test_case::test_case;

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers
    }

    fn result_body() -> serde_json::Value {
        json!({
            "results": [{
                "formatted_address": "Mountain View, CA, USA",
                "geometry": {
                    "location": {"lat": 37.386, "lng": -122.0838},
                    "location_type": "APPROXIMATE",
                    "viewport": {
                        "northeast": {"lat": 37.4699, "lng": -122.0358},
                        "southwest": {"lat": 37.3564, "lng": -122.1178}
                    }
                },
                "place_id": "ChIJiQHsW0m3j4ARm69rRkrUF3w",
                "types": ["locality", "political"]
            }],
            "status": "OK"
        })
    }

    #[test]
    fn endpoint_normalization() {
        let client = HttpClient::new(reqwest::Client::new(), "http://127.0.0.1:1234");
        assert_eq!(client.endpoint(), "http://127.0.0.1:1234/");
        let client = HttpClient::new(reqwest::Client::new(), "http://127.0.0.1:1234/api/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:1234/api/");
    }

    #[test]
    fn scoped_builder() -> anyhow::Result<()> {
        let client = HttpClient::new(
            reqwest::Client::new(),
            "https://maps.googleapis.com/maps/api/",
        )
        .scoped("geocode/");
        assert_eq!(client.endpoint(), "https://maps.googleapis.com/maps/api/geocode/");
        let request = client
            .builder(reqwest::Method::GET, "json")
            .query(&[("address", "Mountain View")])
            .build()?;
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?address=Mountain+View"
        );
        Ok(())
    }

    #[test]
    fn success() -> anyhow::Result<()> {
        let payload = Bytes::from(result_body().to_string());
        let response = to_geocode_response(200, headers(), payload)?;
        assert_eq!(response.status, "OK");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].formatted_address, "Mountain View, CA, USA");
        Ok(())
    }

    #[test]
    fn empty_error_envelope_is_success() -> anyhow::Result<()> {
        let body = json!({
            "error_message": "The provided API key is invalid.",
            "results": [],
            "status": "REQUEST_DENIED"
        });
        let response = to_geocode_response(200, headers(), Bytes::from(body.to_string()))?;
        assert!(response.results.is_empty(), "{response:?}");
        assert_eq!(response.status, "REQUEST_DENIED");
        assert_eq!(
            response.error_message.as_deref(),
            Some("The provided API key is invalid.")
        );
        Ok(())
    }

    #[test]
    fn api_error() {
        let body = json!({
            "error_message": "request failed",
            "results": [
                {"message": "Invalid request", "code": 3},
                {"message": "Also bad", "code": 5}
            ],
            "status": "INVALID_REQUEST"
        });
        let err = to_geocode_response(200, headers(), Bytes::from(body.to_string()))
            .expect_err("a non-empty envelope is an error");
        assert_eq!(err.to_string(), "3 Invalid request");
        assert_eq!(err.http_status_code(), Some(200));
        assert_eq!(err.http_headers(), Some(&headers()));
        let api = err.api_error().expect("error is an API error");
        assert_eq!(api.results.len(), 2);
        assert_eq!(api.status, "INVALID_REQUEST");
    }

    #[test_case(400)]
    #[test_case(403)]
    #[test_case(404)]
    #[test_case(500)]
    #[test_case(503)]
    fn status_error(code: u16) {
        let body = json!({
            "error_message": "ignored",
            "results": [{"message": "ignored", "code": 1}],
            "status": "ignored"
        })
        .to_string();
        let err = to_geocode_response(code, headers(), Bytes::from(body.clone()))
            .expect_err("4xx and 5xx are errors");
        assert!(err.api_error().is_none(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(code));
        assert_eq!(err.http_payload(), Some(&Bytes::from(body)));
        assert_eq!(err.to_string(), format!("server returned status code {code}"));
    }

    #[test]
    fn status_error_with_non_json_body() {
        let err = to_geocode_response(502, HeaderMap::new(), Bytes::from_static(b"<html>"))
            .expect_err("5xx is an error");
        assert_eq!(err.http_status_code(), Some(502));
        assert!(err.is_transport(), "{err:?}");
    }

    #[test_case(b"")]
    #[test_case(b"not json")]
    #[test_case(b"{\"results\": 42}")]
    fn malformed(body: &'static [u8]) {
        let err = to_geocode_response(200, headers(), Bytes::from_static(body))
            .expect_err("malformed bodies fail to decode");
        assert!(err.is_deserialization(), "{err:?}");
    }
}
