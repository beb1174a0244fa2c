// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Input and output types of the search operation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Results requested from the upstream when the caller gives no page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on results per query.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Recency window forwarded as `search_recency_filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
	Week,
	Month,
	Semiyear,
	Year,
}

impl TimeFilter {
	pub const ALL: [TimeFilter; 4] = [
		TimeFilter::Week,
		TimeFilter::Month,
		TimeFilter::Semiyear,
		TimeFilter::Year,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			TimeFilter::Week => "week",
			TimeFilter::Month => "month",
			TimeFilter::Semiyear => "semiyear",
			TimeFilter::Year => "year",
		}
	}
}

impl fmt::Display for TimeFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Caller-supplied search input.
///
/// `page` and `site_filter` are part of the accepted input but are not sent
/// upstream: the web search endpoint is queried for a single page with no
/// site restriction. Both are loosely typed so that any numeric `page` or a
/// `null` in either field never fails the search.
///
/// A query that is absent, empty or only whitespace is rejected before any
/// network call. Any other query is forwarded exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	#[serde(default)]
	pub query: Option<String>,
	#[serde(default)]
	pub page: Option<f64>,
	#[serde(default)]
	pub page_size: Option<f64>,
	#[serde(default)]
	pub site_filter: Option<Vec<String>>,
	#[serde(default)]
	pub time_filter: Option<TimeFilter>,
}

impl SearchRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: Some(query.into()),
			..Default::default()
		}
	}

	pub fn with_page(mut self, page: u32) -> Self {
		self.page = Some(f64::from(page));
		self
	}

	pub fn with_page_size(mut self, page_size: f64) -> Self {
		self.page_size = Some(page_size);
		self
	}

	pub fn with_site_filter(mut self, sites: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.site_filter = Some(sites.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_time_filter(mut self, filter: TimeFilter) -> Self {
		self.time_filter = Some(filter);
		self
	}

	/// The query text as supplied, or `None` when absent, empty or
	/// whitespace-only.
	pub fn query(&self) -> Option<&str> {
		self.query.as_deref().filter(|q| !q.trim().is_empty())
	}

	/// Requested page, `1` when absent. Not applied upstream.
	pub fn page(&self) -> f64 {
		self.page.unwrap_or(1.0)
	}

	/// Requested site restriction, empty when absent. Not applied upstream.
	pub fn site_filter(&self) -> &[String] {
		self.site_filter.as_deref().unwrap_or_default()
	}

	pub fn page_size(&self) -> PageSize {
		PageSize::normalize(self.page_size)
	}
}

/// Page size after defaulting, truncation and clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
	pub value: u32,
	/// The caller's value when it was above [`MAX_PAGE_SIZE`].
	pub clamped_from: Option<f64>,
}

impl PageSize {
	pub fn normalize(requested: Option<f64>) -> Self {
		let value = match requested {
			Some(v) if !v.is_nan() => v.trunc().clamp(1.0, MAX_PAGE_SIZE as f64) as u32,
			_ => DEFAULT_PAGE_SIZE,
		};
		let clamped_from = requested.filter(|v| *v > MAX_PAGE_SIZE as f64);

		Self {
			value,
			clamped_from,
		}
	}
}

/// One normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
	pub title: String,
	pub url: String,
	pub snippet: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub date: Option<String>,
	pub source: String,
}

/// Output of the search operation; always well-formed.
///
/// `request_id` serializes as `null` when the upstream gave none, never as an
/// empty string. `total` is only present on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub results: Vec<SearchResultItem>,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total: Option<usize>,
	#[serde(default)]
	pub request_id: Option<String>,
}

impl SearchResponse {
	pub fn success(results: Vec<SearchResultItem>, query: &str, request_id: Option<String>) -> Self {
		let total = results.len();
		Self {
			message: format!("successfully retrieved {total} results, query: {query}"),
			results,
			total: Some(total),
			request_id,
		}
	}

	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			results: Vec::new(),
			message: message.into(),
			total: None,
			request_id: None,
		}
	}
}

/// One entry of the upstream `references` list. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QianfanReference {
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub content: Option<String>,
	#[serde(default)]
	pub date: Option<String>,
	#[serde(default)]
	pub web_anchor: Option<String>,
}

/// Parameters sent to the upstream web search endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct QianfanRequest {
	pub query: String,
	pub top_k: u32,
	pub recency: Option<TimeFilter>,
}

impl QianfanRequest {
	/// `top_k` is clamped to 1..=[`MAX_PAGE_SIZE`].
	pub fn new(query: impl Into<String>, top_k: u32, recency: Option<TimeFilter>) -> Self {
		Self {
			query: query.into(),
			top_k: top_k.clamp(1, MAX_PAGE_SIZE),
			recency,
		}
	}
}

/// Parsed upstream payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QianfanSearchResult {
	pub request_id: Option<String>,
	pub references: Vec<QianfanReference>,
}
