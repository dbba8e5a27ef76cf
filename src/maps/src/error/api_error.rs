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

use super::Error;

/// The error envelope returned by the Google Maps Platform APIs.
///
/// Some versions of the API report errors in the `results` field, as a list of
/// `{message, code}` pairs. The envelope is considered empty when that list
/// is empty, regardless of the values in `error_message` and `status`.
///
/// # Example
/// ```
/// use google_maps::error::{ApiError, ErrorDetail};
/// let error = ApiError {
///     error_message: String::new(),
///     results: vec![ErrorDetail { message: "quota exceeded".into(), code: 429 }],
///     status: "OVER_QUERY_LIMIT".into(),
/// };
/// assert!(!error.is_empty());
/// assert_eq!(error.to_string(), "429 quota exceeded");
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiError {
    /// A human readable description of the problem.
    pub error_message: String,

    /// The individual errors, the first one is used in the error message.
    pub results: Vec<ErrorDetail>,

    /// The API status, for example `INVALID_REQUEST` or `REQUEST_DENIED`.
    pub status: String,
}

/// An individual item in an [ApiError].
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: i32,
}

impl ApiError {
    /// Returns true if the envelope contains no error details.
    ///
    /// Only the `results` field is consulted. An envelope with a non-empty
    /// `error_message` or `status` but no details is still empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The first error detail, if any.
    pub fn first(&self) -> Option<&ErrorDetail> {
        self.results.first()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first() {
            Some(detail) => write!(f, "{} {}", detail.code, detail.message),
            None => write!(f, "{}", self.error_message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Picks the error to report for a request.
///
/// Any error in the HTTP exchange (creating the request, getting the response,
/// decoding) takes precedence and is returned unchanged. Otherwise a non-empty
/// `api_error` is returned as an [Error]. If neither is present the request
/// succeeded and the function returns `None`.
pub(crate) fn relevant_error(http_error: Option<Error>, api_error: ApiError) -> Option<Error> {
    if let Some(e) = http_error {
        return Some(e);
    }
    if api_error.is_empty() {
        return None;
    }
    Some(Error::api(api_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error as _;

    fn detail(code: i32, message: &str) -> ErrorDetail {
        ErrorDetail {
            message: message.to_string(),
            code,
        }
    }

    fn non_empty() -> ApiError {
        ApiError {
            error_message: "The provided API key is invalid.".into(),
            results: vec![detail(403, "forbidden"), detail(400, "bad request")],
            status: "REQUEST_DENIED".into(),
        }
    }

    #[test]
    fn empty() {
        assert!(ApiError::default().is_empty());
        assert!(!non_empty().is_empty());
    }

    #[test]
    fn empty_ignores_message_and_status() {
        let error = ApiError {
            error_message: "The provided API key is invalid.".into(),
            results: Vec::new(),
            status: "REQUEST_DENIED".into(),
        };
        assert!(error.is_empty(), "{error:?}");
        assert!(relevant_error(None, error).is_none());
    }

    #[test]
    fn display_uses_first_detail() {
        let error = non_empty();
        assert_eq!(error.to_string(), "403 forbidden");
        assert_eq!(error.first(), Some(&detail(403, "forbidden")));
    }

    #[test]
    fn deserialize() -> anyhow::Result<()> {
        let input = json!({
            "error_message": "uh-oh",
            "results": [{"message": "forbidden", "code": 403}],
            "status": "REQUEST_DENIED",
        });
        let got = serde_json::from_value::<ApiError>(input)?;
        let want = ApiError {
            error_message: "uh-oh".into(),
            results: vec![detail(403, "forbidden")],
            status: "REQUEST_DENIED".into(),
        };
        assert_eq!(got, want);

        let got = serde_json::from_value::<ApiError>(json!({}))?;
        assert_eq!(got, ApiError::default());
        Ok(())
    }

    #[test]
    fn relevant_error_prefers_http_error() {
        let got = relevant_error(Some(Error::io("connection reset")), non_empty());
        let got = got.expect("the HTTP error is always reported");
        assert!(got.is_io(), "{got:?}");
        assert!(got.api_error().is_none(), "{got:?}");
        assert!(got.source().is_some(), "{got:?}");

        let got = relevant_error(Some(Error::io("connection reset")), ApiError::default());
        let got = got.expect("the HTTP error is always reported");
        assert!(got.is_io(), "{got:?}");
    }

    #[test]
    fn relevant_error_none() {
        assert!(relevant_error(None, ApiError::default()).is_none());
    }

    #[test]
    fn relevant_error_api() {
        let got = relevant_error(None, non_empty()).expect("non-empty errors are reported");
        assert_eq!(got.to_string(), "403 forbidden");
        assert_eq!(got.api_error(), Some(&non_empty()));
        assert!(got.http_status_code().is_none(), "{got:?}");
    }
}
