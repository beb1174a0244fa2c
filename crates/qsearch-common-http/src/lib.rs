// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Creates a new HTTP client builder with the standard qsearch User-Agent.
///
/// Use this when the caller needs to customize the client, e.g. to set a
/// request timeout:
///
/// ```ignore
/// let client = qsearch_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client with the standard User-Agent and a request
/// timeout covering connect, send and body read.
pub fn client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Returns the standard User-Agent string.
///
/// Format: `qsearch/{version}/{os}-{arch}`
pub fn user_agent() -> String {
	format!(
		"qsearch/{}/{}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
