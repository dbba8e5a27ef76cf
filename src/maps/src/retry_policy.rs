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

//! Defines traits for retry policies and some common implementations.
//!
//! The client automatically retries requests when the service responds with
//! `500 Internal Server Error` or `503 Service Unavailable`, up to five times.
//! All other errors, including transport errors and errors reported in the
//! response body, stop the retry loop on the first occurrence.
//!
//! Applications may override this behavior. For example, an application that
//! prefers to handle retries at a higher level may disable them:
//!
//! ```
//! # use google_maps::client_builder::ClientBuilder;
//! use google_maps::retry_policy::NeverRetry;
//! fn configure(builder: ClientBuilder) -> ClientBuilder {
//!     builder.with_retry_policy(NeverRetry)
//! }
//! ```

use crate::error::Error;
use crate::retry_result::RetryResult;
use std::sync::Arc;

/// The maximum number of retries in the default retry policy.
pub const DEFAULT_MAXIMUM_RETRIES: u32 = 5;

/// Determines how errors are handled in the retry loop.
///
/// Implementations of this trait determine if errors are retryable, and for how
/// long the retry loop may continue.
pub trait RetryPolicy: Send + Sync + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `attempt_count` - the number of attempts, including the one that
    ///   just failed. This method is always called after the first attempt.
    /// * `error` - the last error received from a request. Not all are server
    ///   errors. The client may have been unable to send or complete the
    ///   request.
    fn on_error(&self, attempt_count: u32, error: Error) -> RetryResult;
}

/// A helper type to use [RetryPolicy] in client options.
#[derive(Clone, Debug)]
pub struct RetryPolicyArg(pub(crate) Arc<dyn RetryPolicy>);

impl<T: RetryPolicy + 'static> std::convert::From<T> for RetryPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn RetryPolicy>> for RetryPolicyArg {
    fn from(value: Arc<dyn RetryPolicy>) -> Self {
        Self(value)
    }
}

/// Extension trait for [RetryPolicy]
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// Decorate a [RetryPolicy] to limit the number of attempts.
    ///
    /// # Example
    /// ```
    /// # use google_maps::retry_policy::*;
    /// # use google_maps::error::Error;
    /// let policy = TransientServerError.with_attempt_limit(3);
    /// assert!(policy.on_error(1, unavailable()).is_continue());
    /// assert!(policy.on_error(3, unavailable()).is_exhausted());
    ///
    /// fn unavailable() -> Error {
    ///     Error::http(503, http::HeaderMap::new(), bytes::Bytes::new())
    /// }
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: RetryPolicy> RetryPolicyExt for T {}

/// Retries `500 Internal Server Error` and `503 Service Unavailable`.
///
/// This policy must be decorated to limit the number of retry attempts.
///
/// All other errors are permanent, including 4xx responses, other 5xx
/// responses, transport errors, and errors reported in the response body.
#[derive(Clone, Debug)]
pub struct TransientServerError;

impl TransientServerError {
    /// The status codes treated as transient.
    pub const STATUS_CODES: [u16; 2] = [500, 503];
}

impl RetryPolicy for TransientServerError {
    fn on_error(&self, _attempt_count: u32, error: Error) -> RetryResult {
        if error.api_error().is_some() {
            return RetryResult::Permanent(error);
        }
        match error.http_status_code() {
            Some(code) if Self::STATUS_CODES.contains(&code) => RetryResult::Continue(error),
            _ => RetryResult::Permanent(error),
        }
    }
}

/// A retry policy that treats all errors as permanent.
#[derive(Clone, Debug)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn on_error(&self, _attempt_count: u32, error: Error) -> RetryResult {
        RetryResult::Permanent(error)
    }
}

/// A retry policy decorator that limits the number of attempts.
///
/// This policy decorates an inner policy and limits the total number of
/// attempts. Once the maximum number of attempts is reached this policy
/// returns [RetryResult::Exhausted] for any error the inner policy would
/// retry. Before the limit is reached, the policy returns the result of
/// `P::on_error()`.
///
/// # Parameters
/// * `P` - the inner retry policy, defaults to [TransientServerError].
#[derive(Debug)]
pub struct LimitedAttemptCount<P = TransientServerError>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use google_maps::retry_policy::*;
    /// let policy = LimitedAttemptCount::new(6);
    /// ```
    pub fn new(maximum_attempts: u32) -> Self {
        Self {
            inner: TransientServerError,
            maximum_attempts,
        }
    }
}

impl Default for LimitedAttemptCount {
    fn default() -> Self {
        Self::new(DEFAULT_MAXIMUM_RETRIES + 1)
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }
}

impl<P> RetryPolicy for LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    fn on_error(&self, attempt_count: u32, error: Error) -> RetryResult {
        match self.inner.on_error(attempt_count, error) {
            RetryResult::Continue(e) if attempt_count >= self.maximum_attempts => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorDetail};
    use http::HeaderMap;
    use test_case::test_case;

    fn http_error(code: u16) -> Error {
        Error::http(code, HeaderMap::new(), bytes::Bytes::new())
    }

    fn api_error() -> Error {
        Error::api(ApiError {
            results: vec![ErrorDetail {
                message: "unavailable".into(),
                code: 503,
            }],
            ..ApiError::default()
        })
        .with_http_metadata(503, HeaderMap::new())
    }

    // Verify `RetryPolicyArg` can be converted from the desired types.
    #[test]
    fn retry_policy_arg() {
        let policy = LimitedAttemptCount::new(3);
        let _ = RetryPolicyArg::from(policy);

        let policy: Arc<dyn RetryPolicy> = Arc::new(NeverRetry);
        let _ = RetryPolicyArg::from(policy);
    }

    #[test_case(500, true)]
    #[test_case(503, true)]
    #[test_case(400, false)]
    #[test_case(403, false)]
    #[test_case(404, false)]
    #[test_case(429, false)]
    #[test_case(501, false)]
    #[test_case(502, false)]
    #[test_case(504, false)]
    fn transient_server_error(code: u16, retryable: bool) {
        let p = TransientServerError;
        let got = p.on_error(1, http_error(code));
        assert_eq!(got.is_continue(), retryable, "{got:?}");
        assert_eq!(got.is_permanent(), !retryable, "{got:?}");
    }

    #[test]
    fn transient_server_error_other_kinds() {
        let p = TransientServerError;
        assert!(p.on_error(1, Error::io("simulated")).is_permanent());
        assert!(p.on_error(1, Error::timeout("simulated")).is_permanent());
        assert!(p.on_error(1, Error::deser("simulated")).is_permanent());
        assert!(p.on_error(1, Error::ser("simulated")).is_permanent());
        assert!(p.on_error(1, api_error()).is_permanent());
    }

    #[test]
    fn never_retry() {
        let p = NeverRetry;
        assert!(p.on_error(1, http_error(503)).is_permanent());
        assert!(p.on_error(1, http_error(500)).is_permanent());
        assert!(p.on_error(1, Error::io("simulated")).is_permanent());
    }

    #[test]
    fn limited_attempt_count() {
        let p = LimitedAttemptCount::new(3);
        assert!(p.on_error(1, http_error(503)).is_continue());
        assert!(p.on_error(2, http_error(503)).is_continue());
        assert!(p.on_error(3, http_error(503)).is_exhausted());
        assert!(p.on_error(4, http_error(503)).is_exhausted());

        // Permanent errors are never reported as exhausted.
        assert!(p.on_error(1, http_error(400)).is_permanent());
        assert!(p.on_error(3, http_error(400)).is_permanent());
    }

    #[test]
    fn limited_attempt_count_default() {
        let p = LimitedAttemptCount::default();
        for attempt in 1..=DEFAULT_MAXIMUM_RETRIES {
            let got = p.on_error(attempt, http_error(500));
            assert!(got.is_continue(), "attempt={attempt} {got:?}");
        }
        let got = p.on_error(DEFAULT_MAXIMUM_RETRIES + 1, http_error(500));
        assert!(got.is_exhausted(), "{got:?}");
    }

    #[test]
    fn limited_attempt_count_custom() {
        let p = NeverRetry.with_attempt_limit(10);
        assert!(p.on_error(1, http_error(503)).is_permanent());

        let p = TransientServerError.with_attempt_limit(2);
        let got = p.on_error(2, http_error(503));
        let error = Error::from(got);
        assert_eq!(error.http_status_code(), Some(503));
    }
}
