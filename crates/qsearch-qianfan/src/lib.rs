// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Baidu Qianfan AI Search adapter.
//!
//! Forwards one query to the Qianfan `web_search` endpoint and normalizes the
//! returned references into [`SearchResultItem`]s. [`SearchAdapter::execute`]
//! never fails: validation and upstream errors are reported through the
//! host's [`PluginLogger`] and folded into the [`SearchResponse`] message.

pub mod adapter;
pub mod client;
pub mod error;
pub mod logger;
pub mod normalize;
pub mod plugin;
pub mod types;

pub use adapter::SearchAdapter;
pub use client::{QianfanClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ErrorKind, QianfanError};
pub use logger::{NoopLogger, PluginLogger, TracingLogger};
pub use plugin::{input_schema, SearchPlugin};
pub use qsearch_common_secret::SecretString;
pub use types::{
	PageSize, QianfanReference, QianfanRequest, QianfanSearchResult, SearchRequest,
	SearchResponse, SearchResultItem, TimeFilter, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
