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

use super::ApiError;
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by the client.
///
/// The client reports errors from multiple sources. For example, the service
/// may return an error in the response body, the service may respond with an
/// HTTP error status, the transport may be unable to create the necessary
/// connection, or the response may be impossible to decode.
///
/// Most applications will just return the error or log it, without any further
/// action. Applications that need to decide whether to retry at a higher level
/// can use the predicates and accessors in this type.
///
/// # Example
/// ```
/// use google_maps::error::Error;
/// match example_function() {
///     Err(e) if e.api_error().is_some() => {
///         println!("service error {e}, debug using {:?}", e.api_error().unwrap());
///     },
///     Err(e) if e.is_timeout() => { println!("not enough time {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::io("simulated"))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error with the information returned by the service.
    ///
    /// # Example
    /// ```
    /// use google_maps::error::{ApiError, Error, ErrorDetail};
    /// let api = ApiError {
    ///     results: vec![ErrorDetail { message: "denied".into(), code: 403 }],
    ///     ..ApiError::default()
    /// };
    /// let error = Error::api(api.clone());
    /// assert_eq!(error.api_error(), Some(&api));
    /// assert_eq!(error.to_string(), "403 denied");
    /// ```
    pub fn api(api_error: ApiError) -> Self {
        let details = ApiDetails {
            api_error,
            status_code: None,
            headers: None,
        };
        Self {
            kind: ErrorKind::Api(Box::new(details)),
            source: None,
        }
    }

    /// Annotates an error with the HTTP metadata of the response.
    ///
    /// Only errors reported by the service in the response body are modified,
    /// all other errors are returned unchanged.
    pub(crate) fn with_http_metadata(mut self, status_code: u16, headers: HeaderMap) -> Self {
        if let ErrorKind::Api(d) = &mut self.kind {
            d.status_code = Some(status_code);
            d.headers = Some(headers);
        }
        self
    }

    /// The error envelope returned by the service, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match &self.kind {
            ErrorKind::Api(d) => Some(&d.api_error),
            _ => None,
        }
    }

    /// Creates an error representing a timeout.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use google_maps::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            source: Some(source.into()),
        }
    }

    /// The request could not be completed before its deadline.
    ///
    /// This is always a client-side generated error. The deadline is
    /// configured in the `reqwest::Client` used by the library.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Creates an error representing a deserialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use google_maps::error::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be deserialized.
    ///
    /// # Troubleshooting
    ///
    /// The response body was neither a list of geocoding results nor an error
    /// envelope. This may indicate that the endpoint is misconfigured, and
    /// points to a proxy or some other service.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error representing a serialization problem.
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request could not be serialized.
    ///
    /// This is always a client-side generated error, generated before the
    /// request is sent. This error is never transient.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use google_maps::error::Error;
    /// let e = search_for_thing("the thing");
    /// if let Some(code) = e.http_status_code() {
    ///     if code == 404 {
    ///         println!("cannot find the thing, more details in {e}");
    ///     }
    /// }
    ///
    /// fn search_for_thing(name: &str) -> Error {
    ///     # Error::http(404, http::HeaderMap::new(), bytes::Bytes::from_static(b"NOT FOUND"))
    /// }
    /// ```
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport(d) => d.status_code,
            ErrorKind::Api(d) => d.status_code,
            _ => None,
        }
    }

    /// The headers, if any, associated with this error.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Transport(d) => d.headers.as_ref(),
            ErrorKind::Api(d) => d.headers.as_ref(),
            _ => None,
        }
    }

    /// The payload, if any, associated with this error.
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Transport(d) => d.payload.as_ref(),
            _ => None,
        }
    }

    /// Creates an error for a response with a 4xx or 5xx status code.
    ///
    /// # Example
    /// ```
    /// use google_maps::error::Error;
    /// let error = Error::http(503, http::HeaderMap::new(), bytes::Bytes::new());
    /// assert_eq!(error.http_status_code(), Some(503));
    /// assert_eq!(error.to_string(), "server returned status code 503");
    /// ```
    pub fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let details = TransportDetails {
            status_code: Some(status_code),
            headers: Some(headers),
            payload: Some(payload),
        };
        Self {
            kind: ErrorKind::Transport(Box::new(details)),
            source: None,
        }
    }

    /// Creates an error for a problem in the transport layer without a full
    /// HTTP response.
    ///
    /// Examples include: a connection that cannot be established, or a broken
    /// connection before the full response is received.
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        let details = TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        };
        Self {
            kind: ErrorKind::Transport(Box::new(details)),
            source: Some(source.into()),
        }
    }

    /// A problem in the transport layer without a full HTTP response.
    ///
    /// # Troubleshooting
    ///
    /// This indicates a problem completing the request, such as DNS failures,
    /// connection resets, or crashes in proxies. These errors are not retried
    /// by the client.
    pub fn is_io(&self) -> bool {
        matches!(
        &self.kind,
        ErrorKind::Transport(d) if matches!(**d, TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        }))
    }

    /// A problem in the transport layer, including 4xx and 5xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Transport { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the request exceeded the request deadline {e}")
            }
            (ErrorKind::Transport(details), _) => details.display(self.source(), f),
            (ErrorKind::Api(d), _) => write!(f, "{}", d.api_error),
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

/// The type of error held by an [Error] instance.
#[derive(Debug)]
enum ErrorKind {
    Serialization,
    Deserialization,
    Timeout,
    Transport(Box<TransportDetails>),
    Api(Box<ApiDetails>),
}

#[derive(Debug)]
struct TransportDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
}

impl TransportDetails {
    fn display(
        &self,
        source: Option<&(dyn StdError + 'static)>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match (self.status_code, source) {
            (Some(code), _) => write!(f, "server returned status code {code}"),
            (None, Some(source)) => write!(f, "the transport reports an error: {source}"),
            (None, None) => unreachable!("no constructor allows this"),
        }
    }
}

#[derive(Debug)]
struct ApiDetails {
    api_error: ApiError,
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorDetail;
    use http::HeaderValue;
    use std::error::Error as _;

    fn api_error() -> ApiError {
        ApiError {
            error_message: "uh-oh".into(),
            results: vec![ErrorDetail {
                message: "denied".into(),
                code: 403,
            }],
            status: "REQUEST_DENIED".into(),
        }
    }

    #[test]
    fn api() {
        let error = Error::api(api_error());
        assert_eq!(error.api_error(), Some(&api_error()));
        assert!(error.source().is_none(), "{error:?}");
        assert!(error.http_status_code().is_none(), "{error:?}");
        assert!(error.http_headers().is_none(), "{error:?}");
        assert!(error.http_payload().is_none(), "{error:?}");
        assert!(!error.is_transport(), "{error:?}");
        assert_eq!(error.to_string(), "403 denied");
    }

    #[test]
    fn api_with_http_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let error = Error::api(api_error()).with_http_metadata(200, headers.clone());
        assert_eq!(error.api_error(), Some(&api_error()));
        assert_eq!(error.http_status_code(), Some(200));
        assert_eq!(error.http_headers(), Some(&headers));
        assert_eq!(error.to_string(), "403 denied");
    }

    #[test]
    fn http_metadata_ignored_for_other_kinds() {
        let error = Error::io("simulated").with_http_metadata(200, HeaderMap::new());
        assert!(error.is_io(), "{error:?}");
        assert!(error.http_status_code().is_none(), "{error:?}");
    }

    #[test]
    fn http() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let payload = bytes::Bytes::from_static(b"{}");
        let error = Error::http(503, headers.clone(), payload.clone());
        assert!(error.is_transport(), "{error:?}");
        assert!(!error.is_io(), "{error:?}");
        assert!(error.source().is_none(), "{error:?}");
        assert_eq!(error.http_status_code(), Some(503));
        assert_eq!(error.http_headers(), Some(&headers));
        assert_eq!(error.http_payload(), Some(&payload));
        assert!(error.api_error().is_none(), "{error:?}");
        assert_eq!(error.to_string(), "server returned status code 503");
    }

    #[test]
    fn io() {
        let error = Error::io("connection refused");
        assert!(error.is_io(), "{error:?}");
        assert!(error.is_transport(), "{error:?}");
        assert!(error.source().is_some(), "{error:?}");
        assert!(error.http_status_code().is_none(), "{error:?}");
        assert!(
            error.to_string().contains("connection refused"),
            "{error}"
        );
    }

    #[test]
    fn timeout() {
        let error = Error::timeout("simulated");
        assert!(error.is_timeout(), "{error:?}");
        assert!(!error.is_transport(), "{error:?}");
        assert!(error.to_string().contains("simulated"), "{error}");
    }

    #[test]
    fn serialization() {
        let error = Error::ser("simulated");
        assert!(error.is_serialization(), "{error:?}");
        assert!(!error.is_deserialization(), "{error:?}");
        assert!(error.to_string().contains("simulated"), "{error}");

        let error = Error::deser("simulated");
        assert!(error.is_deserialization(), "{error:?}");
        assert!(!error.is_serialization(), "{error:?}");
        assert!(error.to_string().contains("simulated"), "{error}");
    }
}
