// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Qianfan AI Search `web_search` API client.

use std::time::Duration;

use qsearch_common_secret::SecretString;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, trace};

use crate::error::QianfanError;
use crate::types::{QianfanReference, QianfanRequest, QianfanSearchResult, TimeFilter};

pub const DEFAULT_BASE_URL: &str = "https://qianfan.baidubce.com/v2/ai_search/web_search";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend selector sent as `search_source`.
const SEARCH_SOURCE: &str = "baidu_search_v2";

/// Client for the Qianfan AI Search API.
#[derive(Debug, Clone)]
pub struct QianfanClient {
	http_client: Client,
	api_key: SecretString,
	base_url: String,
}

#[derive(Debug, Serialize)]
struct QianfanApiRequest<'a> {
	messages: Vec<QianfanApiMessage<'a>>,
	search_source: &'static str,
	resource_type_filter: Vec<ResourceTypeFilter>,
	#[serde(skip_serializing_if = "Option::is_none")]
	search_recency_filter: Option<TimeFilter>,
}

#[derive(Debug, Serialize)]
struct QianfanApiMessage<'a> {
	role: &'static str,
	content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResourceTypeFilter {
	#[serde(rename = "type")]
	kind: &'static str,
	top_k: u32,
}

#[derive(Debug, Deserialize)]
struct QianfanApiResponse {
	#[serde(rename = "requestId", default)]
	request_id: Option<String>,
	#[serde(default)]
	references: Option<Vec<QianfanReference>>,
}

impl<'a> QianfanApiRequest<'a> {
	fn from_request(request: &'a QianfanRequest) -> Self {
		Self {
			messages: vec![QianfanApiMessage {
				role: "user",
				content: &request.query,
			}],
			search_source: SEARCH_SOURCE,
			resource_type_filter: vec![ResourceTypeFilter {
				kind: "web",
				top_k: request.top_k,
			}],
			search_recency_filter: request.recency,
		}
	}
}

impl QianfanClient {
	/// Creates a client with the default endpoint and timeout.
	pub fn new(api_key: SecretString) -> Result<Self, QianfanError> {
		Self::with_timeout(api_key, DEFAULT_TIMEOUT)
	}

	pub fn with_timeout(api_key: SecretString, timeout: Duration) -> Result<Self, QianfanError> {
		let http_client =
			qsearch_common_http::client_with_timeout(timeout).map_err(QianfanError::Client)?;

		Ok(Self {
			http_client,
			api_key,
			base_url: DEFAULT_BASE_URL.to_string(),
		})
	}

	/// Sets a custom endpoint URL (proxies, tests).
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Performs one search request. No retries.
	#[instrument(skip(self, request), fields(query = %request.query, top_k = request.top_k))]
	pub async fn search(&self, request: &QianfanRequest) -> Result<QianfanSearchResult, QianfanError> {
		let api_request = QianfanApiRequest::from_request(request);

		debug!(url = %self.base_url, "Sending search request to Qianfan");
		trace!(recency = ?request.recency, "Search parameters");

		let response = self
			.http_client
			.post(&self.base_url)
			.bearer_auth(self.api_key.expose())
			.json(&api_request)
			.send()
			.await
			.map_err(map_transport_error)?;

		let status = response.status();
		debug!(status = %status, "Received response from Qianfan");

		if !status.is_success() {
			let status_code = status.as_u16();
			let body = response.text().await.unwrap_or_default();
			error!(status = status_code, body = %body, "Qianfan API error");
			return Err(QianfanError::ApiError {
				status: status_code,
				message: body,
			});
		}

		let body = response.text().await.map_err(map_transport_error)?;
		trace!(body = %body, "Response body");

		parse_response(&body)
	}
}

fn map_transport_error(e: reqwest::Error) -> QianfanError {
	if e.is_timeout() {
		error!("Request timed out");
		return QianfanError::Timeout;
	}
	error!(error = %e, "Network error during Qianfan request");
	QianfanError::Network(e)
}

fn parse_response(body: &str) -> Result<QianfanSearchResult, QianfanError> {
	let parsed: QianfanApiResponse = serde_json::from_str(body).map_err(|e| {
		error!(error = %e, "Failed to parse Qianfan response");
		QianfanError::InvalidResponse(format!("JSON parse error: {e}"))
	})?;

	let references = parsed.references.unwrap_or_default();
	debug!(reference_count = references.len(), "Parsed Qianfan response");

	Ok(QianfanSearchResult {
		request_id: parsed.request_id.filter(|id| !id.is_empty()),
		references,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_client_creation() {
		let client = QianfanClient::new(SecretString::from("test-api-key")).unwrap();
		assert_eq!(client.api_key.expose(), "test-api-key");
		assert_eq!(client.base_url(), DEFAULT_BASE_URL);
	}

	#[test]
	fn test_with_base_url() {
		let client = QianfanClient::new(SecretString::from("key"))
			.unwrap()
			.with_base_url("http://127.0.0.1:9/search");
		assert_eq!(client.base_url(), "http://127.0.0.1:9/search");
	}

	#[test]
	fn debug_output_hides_api_key() {
		let client = QianfanClient::new(SecretString::from("very-secret")).unwrap();
		assert!(!format!("{client:?}").contains("very-secret"));
	}

	#[test]
	fn payload_without_recency_omits_the_field() {
		let request = QianfanRequest::new("weather today", 20, None);
		let payload = serde_json::to_value(QianfanApiRequest::from_request(&request)).unwrap();

		assert_eq!(
			payload,
			json!({
				"messages": [{"role": "user", "content": "weather today"}],
				"search_source": "baidu_search_v2",
				"resource_type_filter": [{"type": "web", "top_k": 20}]
			})
		);
	}

	#[test]
	fn payload_with_recency_forwards_it() {
		let request = QianfanRequest::new("rust", 5, Some(TimeFilter::Month));
		let payload = serde_json::to_value(QianfanApiRequest::from_request(&request)).unwrap();
		assert_eq!(payload["search_recency_filter"], json!("month"));
		assert_eq!(payload["resource_type_filter"][0]["top_k"], json!(5));
	}

	#[test]
	fn parse_missing_references_is_empty() {
		let result = parse_response(r#"{"requestId": "abc"}"#).unwrap();
		assert!(result.references.is_empty());
		assert_eq!(result.request_id.as_deref(), Some("abc"));
	}

	#[test]
	fn parse_null_references_and_empty_request_id() {
		let result = parse_response(r#"{"requestId": "", "references": null}"#).unwrap();
		assert!(result.references.is_empty());
		assert!(result.request_id.is_none());
	}

	#[test]
	fn parse_keeps_reference_order_and_ignores_unknown_fields() {
		let body = json!({
			"references": [
				{"id": 1, "title": "first", "url": "https://a.example/1", "type": "web"},
				{"id": 2, "title": "second", "web_anchor": "B site"}
			]
		})
		.to_string();

		let result = parse_response(&body).unwrap();
		assert_eq!(result.references.len(), 2);
		assert_eq!(result.references[0].title.as_deref(), Some("first"));
		assert_eq!(result.references[1].web_anchor.as_deref(), Some("B site"));
	}

	#[test]
	fn parse_malformed_json_is_invalid_response() {
		let err = parse_response("<html>bad gateway</html>").unwrap_err();
		assert!(matches!(err, QianfanError::InvalidResponse(_)));
	}

	#[test]
	fn parse_wrongly_typed_reference_is_invalid_response() {
		let err = parse_response(r#"{"references": [{"title": 42}]}"#).unwrap_err();
		assert!(matches!(err, QianfanError::InvalidResponse(_)));
	}
}
