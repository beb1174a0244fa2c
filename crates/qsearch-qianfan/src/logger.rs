// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger collaborator supplied by the plugin host.

/// Diagnostics sink handed to the adapter on every call.
///
/// Every method defaults to a no-op so hosts only implement the levels they
/// care about.
pub trait PluginLogger: Send + Sync {
	fn error(&self, _message: &str) {}

	fn warn(&self, _message: &str) {}

	fn info(&self, _message: &str) {}

	fn debug(&self, _message: &str) {}
}

/// Forwards plugin diagnostics to `tracing` under the `qsearch::plugin` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl PluginLogger for TracingLogger {
	fn error(&self, message: &str) {
		tracing::error!(target: "qsearch::plugin", "{message}");
	}

	fn warn(&self, message: &str) {
		tracing::warn!(target: "qsearch::plugin", "{message}");
	}

	fn info(&self, message: &str) {
		tracing::info!(target: "qsearch::plugin", "{message}");
	}

	fn debug(&self, message: &str) {
		tracing::debug!(target: "qsearch::plugin", "{message}");
	}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl PluginLogger for NoopLogger {}
