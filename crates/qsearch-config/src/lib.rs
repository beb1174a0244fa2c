// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for qsearch.
//!
//! Layered from multiple sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. TOML file (`$XDG_CONFIG_HOME/qsearch/config.toml` or an explicit path)
//! 3. Environment variables (`QSEARCH_*`)
//!
//! The Qianfan credential may also come from `QSEARCH_QIANFAN_API_KEY_FILE`.

pub mod env;
pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use env::{load_secret_env, SecretEnvError};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use qsearch_common_secret::{Secret, SecretString, REDACTED};
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
	pub qianfan: QianfanConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// `config_path` replaces the default user config file when given.
pub fn load_config(config_path: Option<PathBuf>) -> Result<Config, ConfigError> {
	let toml_source = match config_path {
		Some(path) => TomlSource::new(path),
		None => TomlSource::user(),
	};

	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(toml_source),
		Box::new(EnvSource),
	];

	load_from_sources(sources)
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<Config, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

fn finalize(layer: ConfigLayer) -> Result<Config, ConfigError> {
	let qianfan = layer.qianfan.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	qianfan.validate()?;

	info!(
		qianfan_configured = qianfan.is_configured(),
		qianfan_base_url = qianfan.base_url.as_deref().unwrap_or("default"),
		timeout_secs = qianfan.timeout_secs,
		log_format = %logging.format,
		"configuration loaded"
	);

	Ok(Config { qianfan, logging })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	struct FixedSource(Precedence, ConfigLayer);

	impl ConfigSource for FixedSource {
		fn name(&self) -> &'static str {
			"fixed"
		}

		fn precedence(&self) -> Precedence {
			self.0
		}

		fn load(&self) -> Result<ConfigLayer, ConfigError> {
			Ok(self.1.clone())
		}
	}

	fn qianfan_layer(key: &str, timeout_secs: Option<u64>) -> ConfigLayer {
		ConfigLayer {
			qianfan: Some(QianfanConfigLayer {
				api_key: Some(SecretString::from(key)),
				base_url: None,
				timeout_secs,
			}),
			logging: None,
		}
	}

	#[test]
	fn higher_precedence_wins_regardless_of_order() {
		let config = load_from_sources(vec![
			Box::new(FixedSource(Precedence::Environment, qianfan_layer("env", None))),
			Box::new(FixedSource(
				Precedence::ConfigFile,
				qianfan_layer("file", Some(7)),
			)),
		])
		.unwrap();

		assert_eq!(config.qianfan.require_api_key().unwrap().expose(), "env");
		assert_eq!(config.qianfan.timeout_secs, 7);
	}

	#[test]
	fn zero_timeout_from_any_layer_is_rejected() {
		let result = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(FixedSource(Precedence::Environment, qianfan_layer("env", Some(0)))),
		]);
		assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
	}

	#[test]
	fn defaults_only_leaves_credential_unset() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert!(!config.qianfan.is_configured());
		assert_eq!(config.logging, LoggingConfig::default());
	}

	#[test]
	fn env_source_reads_qsearch_variables() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "env-file-key").unwrap();

		std::env::set_var("QSEARCH_QIANFAN_API_KEY_FILE", file.path());
		std::env::set_var("QSEARCH_QIANFAN_TIMEOUT_SECS", "3");
		std::env::set_var("QSEARCH_LOG_FORMAT", "json");

		let layer = EnvSource.load();

		std::env::remove_var("QSEARCH_QIANFAN_API_KEY_FILE");
		std::env::remove_var("QSEARCH_QIANFAN_TIMEOUT_SECS");
		std::env::remove_var("QSEARCH_LOG_FORMAT");

		let config = finalize(layer.unwrap()).unwrap();
		assert_eq!(
			config.qianfan.require_api_key().unwrap().expose(),
			"env-file-key"
		);
		assert_eq!(config.qianfan.timeout_secs, 3);
		assert_eq!(config.logging.format, LogFormat::Json);
	}
}
