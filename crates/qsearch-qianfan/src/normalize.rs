// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Mapping upstream references onto [`SearchResultItem`].

use url::Url;

use crate::types::{QianfanReference, SearchResultItem};

pub const UNTITLED: &str = "untitled";
pub const NO_SNIPPET: &str = "no snippet";
pub const UNKNOWN_SOURCE: &str = "unknown source";
pub const MISSING_URL: &str = "#";

/// Host component of an absolute URL. `None` for relative references such
/// as `"#"` and for URLs without a host.
pub fn host_of(raw: &str) -> Option<String> {
	let parsed = Url::parse(raw).ok()?;
	parsed
		.host_str()
		.filter(|host| !host.is_empty())
		.map(str::to_string)
}

/// URL host, else the anchor text, else [`UNKNOWN_SOURCE`].
pub fn derive_source(url: &str, web_anchor: Option<&str>) -> String {
	host_of(url)
		.or_else(|| web_anchor.map(str::to_string))
		.unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
}

fn present(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

pub fn to_result_item(reference: QianfanReference) -> SearchResultItem {
	let url = present(reference.url).unwrap_or_else(|| MISSING_URL.to_string());
	let web_anchor = present(reference.web_anchor);
	let source = derive_source(&url, web_anchor.as_deref());

	SearchResultItem {
		title: present(reference.title).unwrap_or_else(|| UNTITLED.to_string()),
		snippet: present(reference.content).unwrap_or_else(|| NO_SNIPPET.to_string()),
		date: reference.date,
		url,
		source,
	}
}
