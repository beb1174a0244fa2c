// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::adapter::SearchAdapter;
use crate::logger::PluginLogger;
use crate::types::{SearchRequest, SearchResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Host-facing entry point: untyped JSON arguments in, typed response out.
#[async_trait]
pub trait SearchPlugin: Send + Sync {
	fn name(&self) -> &str;

	fn description(&self) -> &str;

	fn input_schema(&self) -> serde_json::Value;

	async fn invoke(&self, args: serde_json::Value, logger: &dyn PluginLogger) -> SearchResponse;
}

/// JSON Schema of the arguments accepted by [`SearchPlugin::invoke`].
pub fn input_schema() -> serde_json::Value {
	serde_json::json!({
			"type": "object",
			"properties": {
					"query": {
							"type": "string",
							"description": "Search query text"
					},
					"page": {
							"type": "integer",
							"minimum": 1,
							"default": 1,
							"description": "Accepted for compatibility; results are always the first page"
					},
					"pageSize": {
							"type": "number",
							"minimum": 1,
							"maximum": MAX_PAGE_SIZE,
							"default": DEFAULT_PAGE_SIZE,
							"description": "Number of results; fractional values are truncated, values above the maximum are clamped"
					},
					"siteFilter": {
							"type": "array",
							"items": { "type": "string" },
							"description": "Accepted for compatibility; not applied to the upstream search"
					},
					"timeFilter": {
							"type": "string",
							"enum": ["week", "month", "semiyear", "year"],
							"description": "Restrict results to a recent time window"
					}
			},
			"required": ["query"]
	})
}

#[async_trait]
impl SearchPlugin for SearchAdapter {
	fn name(&self) -> &str {
		"qianfan_web_search"
	}

	fn description(&self) -> &str {
		"Search the web through Baidu Qianfan AI Search and return normalized results"
	}

	fn input_schema(&self) -> serde_json::Value {
		input_schema()
	}

	async fn invoke(&self, args: serde_json::Value, logger: &dyn PluginLogger) -> SearchResponse {
		let request: SearchRequest = match serde_json::from_value(args) {
			Ok(request) => request,
			Err(e) => {
				logger.error(&format!("invalid search input: {e}"));
				return SearchResponse::failure(format!("error: invalid search input. {e}"));
			}
		};

		self.execute(&request, logger).await
	}
}
