// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Loading secrets from the environment.
//!
//! Supports the `VAR` / `VAR_FILE` convention used by Docker and Kubernetes
//! secret mounts: when `VAR_FILE` is set, the secret is read from that path
//! and takes precedence over `VAR`.

use std::path::PathBuf;
use std::{env, fs};

use qsearch_common_secret::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load a secret from `{var}_FILE` or `{var}`.
///
/// A single trailing newline is stripped from file contents. Empty values of
/// `{var}` are treated as unset. Returns `Ok(None)` when neither is present.
pub fn load_secret_env(var: &str) -> Result<Option<SecretString>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content);
		let secret = secret.strip_suffix('\r').unwrap_or(secret);
		return Ok(Some(SecretString::new(secret.to_string())));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(SecretString::new(value))),
		_ => Ok(None),
	}
}
