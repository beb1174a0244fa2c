// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Qianfan AI Search provider configuration section.

use std::time::Duration;

use qsearch_common_secret::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QianfanConfigLayer {
	pub api_key: Option<SecretString>,
	pub base_url: Option<String>,
	pub timeout_secs: Option<u64>,
}

impl QianfanConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> QianfanConfig {
		QianfanConfig {
			api_key: self.api_key.filter(|key| !key.is_blank()),
			base_url: self.base_url,
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QianfanConfig {
	pub api_key: Option<SecretString>,
	/// Overrides the public endpoint; `None` uses the client's default.
	pub base_url: Option<String>,
	pub timeout_secs: u64,
}

impl Default for QianfanConfig {
	fn default() -> Self {
		QianfanConfigLayer::default().finalize()
	}
}

impl QianfanConfig {
	pub fn is_configured(&self) -> bool {
		self.api_key.is_some()
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	/// A zero timeout would fail every request, so it is rejected.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "qianfan.timeout_secs".to_string(),
				message: "must be at least 1 second".to_string(),
			});
		}
		Ok(())
	}

	/// The credential, or an error naming every way to provide it.
	pub fn require_api_key(&self) -> Result<SecretString, ConfigError> {
		self.api_key.clone().ok_or(ConfigError::MissingSecret {
			key: "qianfan.api_key",
			env_var: "QSEARCH_QIANFAN_API_KEY",
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_not_configured() {
		let config = QianfanConfig::default();
		assert!(!config.is_configured());
		assert!(config.base_url.is_none());
		assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
	}

	#[test]
	fn require_api_key_reports_missing() {
		let err = QianfanConfig::default().require_api_key().unwrap_err();
		let message = err.to_string();
		assert!(message.contains("QSEARCH_QIANFAN_API_KEY"));
		assert!(message.contains("qianfan.api_key"));
	}

	#[test]
	fn blank_api_key_is_treated_as_missing() {
		let layer = QianfanConfigLayer {
			api_key: Some(SecretString::from("   ")),
			..Default::default()
		};
		assert!(!layer.finalize().is_configured());
	}

	#[test]
	fn zero_timeout_is_invalid() {
		let config = QianfanConfigLayer {
			timeout_secs: Some(0),
			..Default::default()
		}
		.finalize();
		let err = config.validate().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "qianfan.timeout_secs"));

		assert!(QianfanConfig::default().validate().is_ok());
	}

	#[test]
	fn merge_overlays_only_set_fields() {
		let mut base = QianfanConfigLayer {
			api_key: Some(SecretString::from("file-key")),
			base_url: Some("https://proxy.internal/search".to_string()),
			timeout_secs: Some(10),
		};
		base.merge(QianfanConfigLayer {
			api_key: Some(SecretString::from("env-key")),
			base_url: None,
			timeout_secs: None,
		});

		let config = base.finalize();
		assert_eq!(config.require_api_key().unwrap().expose(), "env-key");
		assert_eq!(
			config.base_url.as_deref(),
			Some("https://proxy.internal/search")
		);
		assert_eq!(config.timeout_secs, 10);
	}

	#[test]
	fn deserialize_from_toml() {
		let layer: QianfanConfigLayer = toml::from_str(
			r#"
api_key = "toml-key"
timeout_secs = 5
"#,
		)
		.unwrap();
		let config = layer.finalize();
		assert_eq!(config.require_api_key().unwrap().expose(), "toml-key");
		assert_eq!(config.timeout_secs, 5);
	}

	#[test]
	fn serialize_redacts_api_key() {
		let config = QianfanConfigLayer {
			api_key: Some(SecretString::from("toml-key")),
			..Default::default()
		}
		.finalize();
		let rendered = toml::to_string(&config).unwrap();
		assert!(!rendered.contains("toml-key"));
	}
}
