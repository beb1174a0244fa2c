// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The search operation exposed to plugin hosts.

use std::time::Duration;

use qsearch_common_secret::SecretString;

use crate::client::QianfanClient;
use crate::error::QianfanError;
use crate::logger::PluginLogger;
use crate::normalize::to_result_item;
use crate::types::{QianfanRequest, SearchRequest, SearchResponse, MAX_PAGE_SIZE};

/// Validates input, queries Qianfan once, and normalizes the result.
///
/// The credential is supplied at construction so a missing key surfaces
/// before any call is attempted.
#[derive(Debug, Clone)]
pub struct SearchAdapter {
	client: QianfanClient,
}

impl SearchAdapter {
	pub fn new(api_key: SecretString) -> Result<Self, QianfanError> {
		Ok(Self::from_client(QianfanClient::new(api_key)?))
	}

	pub fn with_timeout(api_key: SecretString, timeout: Duration) -> Result<Self, QianfanError> {
		let client = QianfanClient::with_timeout(api_key, timeout)?;
		Ok(Self::from_client(client))
	}

	pub fn from_client(client: QianfanClient) -> Self {
		Self { client }
	}

	pub fn client(&self) -> &QianfanClient {
		&self.client
	}

	/// Runs the search and returns a well-formed response whatever happens.
	///
	/// Failures are reported through `logger` at error level and folded into
	/// the response message with an empty result list.
	pub async fn execute(&self, request: &SearchRequest, logger: &dyn PluginLogger) -> SearchResponse {
		match self.search(request, logger).await {
			Ok(response) => response,
			Err(QianfanError::MissingQuery) => {
				logger.error("search query is required");
				SearchResponse::failure(format!("error: {}", QianfanError::MissingQuery))
			}
			Err(e) => {
				logger.error(&format!("search failed: {e}"));
				SearchResponse::failure(format!("error: search failed. {e}"))
			}
		}
	}

	/// Like [`execute`](Self::execute) but returns the failure instead of
	/// degrading it, so callers can branch on [`QianfanError::kind`].
	pub async fn search(
		&self,
		request: &SearchRequest,
		logger: &dyn PluginLogger,
	) -> Result<SearchResponse, QianfanError> {
		let query = request.query().ok_or(QianfanError::MissingQuery)?;

		let page_size = request.page_size();
		if let Some(requested) = page_size.clamped_from {
			logger.warn(&format!(
				"pageSize {requested} exceeds the maximum of {MAX_PAGE_SIZE}, using {MAX_PAGE_SIZE}"
			));
		}

		if request.page() != 1.0 {
			logger.debug(&format!(
				"page {} ignored: the upstream returns a single page",
				request.page()
			));
		}
		if !request.site_filter().is_empty() {
			logger.debug(&format!(
				"siteFilter {:?} ignored: site restriction is not applied upstream",
				request.site_filter()
			));
		}

		let upstream_request = QianfanRequest::new(query, page_size.value, request.time_filter);
		logger.debug(&format!(
			"searching Qianfan: top_k={}, recency={}",
			upstream_request.top_k,
			upstream_request
				.recency
				.map(|r| r.as_str())
				.unwrap_or("none")
		));

		let result = self.client.search(&upstream_request).await?;

		let results = result
			.references
			.into_iter()
			.map(to_result_item)
			.collect::<Vec<_>>();

		let response = SearchResponse::success(results, query, result.request_id);
		logger.info(&response.message);

		Ok(response)
	}
}
