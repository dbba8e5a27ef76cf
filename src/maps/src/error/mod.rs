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

//! The client distinguishes between errors detected while trying to send a
//! request (e.g. cannot open a connection), errors in the HTTP exchange (e.g.
//! the service responds with a 4xx or 5xx status code), and errors reported by
//! the service in the body of the response.
//!
//! # Examples
//!
//! ```
//! use google_maps::error::Error;
//! fn handle_error(e: Error) {
//!     if let Some(api) = e.api_error() {
//!         println!("the service reported {api:?}");
//!     } else if let Some(code) = e.http_status_code() {
//!         println!("the request failed with HTTP status {code}");
//!     }
//! }
//! ```

mod api_error;
mod core_error;
pub use api_error::*;
pub use core_error::*;
