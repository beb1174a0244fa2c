// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the Qianfan search adapter.

use thiserror::Error;

/// Errors that can occur while performing a search.
#[derive(Debug, Error)]
pub enum QianfanError {
	/// The request carried no usable query. Detected before any I/O.
	#[error("search query is required")]
	MissingQuery,

	/// The HTTP client could not be constructed.
	#[error("Failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	/// Network-level error during HTTP communication.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Request timed out.
	#[error("Request timed out")]
	Timeout,

	/// Qianfan returned a non-success status.
	#[error("Qianfan API error: {status} - {message}")]
	ApiError { status: u16, message: String },

	/// Invalid or unparseable response from Qianfan.
	#[error("Invalid response from Qianfan: {0}")]
	InvalidResponse(String),
}

/// Coarse classification of [`QianfanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	Validation,
	Transport,
	UpstreamStatus,
	Parse,
}

impl QianfanError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			QianfanError::MissingQuery => ErrorKind::Validation,
			QianfanError::Client(_) | QianfanError::Network(_) | QianfanError::Timeout => {
				ErrorKind::Transport
			}
			QianfanError::ApiError { .. } => ErrorKind::UpstreamStatus,
			QianfanError::InvalidResponse(_) => ErrorKind::Parse,
		}
	}
}
