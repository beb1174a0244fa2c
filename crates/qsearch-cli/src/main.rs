// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! qsearch - run a Qianfan web search from the command line.
//!
//! Acts as a minimal plugin host: resolves configuration and the credential,
//! hands the request to the adapter with a tracing-backed logger, and prints
//! the response as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qsearch_config::{LogFormat, LoggingConfig, QianfanConfig};
use qsearch_qianfan::{QianfanClient, SearchAdapter, SearchRequest, TimeFilter, TracingLogger};

#[derive(Debug, Parser)]
#[command(name = "qsearch", version, about = "Web search through Baidu Qianfan AI Search")]
struct Args {
	/// Config file to use instead of the default user config.
	#[arg(long, global = true, env = "QSEARCH_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Run one search and print the response.
	Search(SearchArgs),
	/// Print the JSON Schema of the plugin input.
	Schema,
}

#[derive(Debug, clap::Args)]
struct SearchArgs {
	query: String,

	/// Accepted for compatibility; not sent upstream.
	#[arg(long, default_value_t = 1)]
	page: u32,

	/// Results to request (max 50).
	#[arg(long)]
	page_size: Option<f64>,

	/// Accepted for compatibility; not sent upstream.
	#[arg(long = "site")]
	sites: Vec<String>,

	#[arg(long, value_enum)]
	time_filter: Option<TimeFilterArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TimeFilterArg {
	Week,
	Month,
	Semiyear,
	Year,
}

impl From<TimeFilterArg> for TimeFilter {
	fn from(v: TimeFilterArg) -> Self {
		match v {
			TimeFilterArg::Week => TimeFilter::Week,
			TimeFilterArg::Month => TimeFilter::Month,
			TimeFilterArg::Semiyear => TimeFilter::Semiyear,
			TimeFilterArg::Year => TimeFilter::Year,
		}
	}
}

impl SearchArgs {
	fn into_request(self) -> SearchRequest {
		SearchRequest {
			query: Some(self.query),
			page: Some(f64::from(self.page)),
			page_size: self.page_size,
			site_filter: Some(self.sites),
			time_filter: self.time_filter.map(Into::into),
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	match args.command {
		Command::Schema => {
			let schema = serde_json::to_string_pretty(&qsearch_qianfan::input_schema())?;
			println!("{schema}");
			Ok(())
		}
		Command::Search(search) => run_search(args.config, search).await,
	}
}

async fn run_search(config_path: Option<PathBuf>, search: SearchArgs) -> Result<()> {
	let config = qsearch_config::load_config(config_path).context("failed to load configuration")?;
	init_tracing(&config.logging);

	let adapter = build_adapter(&config.qianfan)?;
	info!(base_url = %adapter.client().base_url(), "qsearch starting");

	let request = search.into_request();
	let response = adapter.execute(&request, &TracingLogger).await;

	println!("{}", serde_json::to_string_pretty(&response)?);
	Ok(())
}

fn build_adapter(config: &QianfanConfig) -> Result<SearchAdapter> {
	let api_key = config.require_api_key()?;
	let mut client = QianfanClient::with_timeout(api_key, config.timeout())
		.context("failed to create Qianfan client")?;
	if let Some(base_url) = &config.base_url {
		client = client.with_base_url(base_url.clone());
	}
	Ok(SearchAdapter::from_client(client))
}

fn init_tracing(logging: &LoggingConfig) {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qsearch_config::SecretString;

	fn parse(argv: &[&str]) -> Args {
		Args::try_parse_from(argv).unwrap()
	}

	#[test]
	fn search_args_map_onto_request() {
		let args = parse(&[
			"qsearch",
			"search",
			"weather today",
			"--page-size",
			"12.5",
			"--site",
			"a.example",
			"--site",
			"b.example",
			"--time-filter",
			"semiyear",
		]);

		let Command::Search(search) = args.command else {
			panic!("expected search command");
		};
		let request = search.into_request();

		assert_eq!(request.query(), Some("weather today"));
		assert_eq!(request.page(), 1.0);
		assert_eq!(request.page_size().value, 12);
		assert_eq!(request.site_filter(), ["a.example", "b.example"]);
		assert_eq!(request.time_filter, Some(TimeFilter::Semiyear));
	}

	#[test]
	fn unknown_time_filter_is_rejected() {
		let result = Args::try_parse_from(["qsearch", "search", "q", "--time-filter", "decade"]);
		assert!(result.is_err());
	}

	#[test]
	fn global_config_flag_after_subcommand() {
		let args = parse(&["qsearch", "schema", "--config", "/tmp/qsearch.toml"]);
		assert_eq!(args.config, Some(PathBuf::from("/tmp/qsearch.toml")));
		assert!(matches!(args.command, Command::Schema));
	}

	#[test]
	fn build_adapter_requires_credential() {
		let err = build_adapter(&QianfanConfig::default()).unwrap_err();
		assert!(err.to_string().contains("QSEARCH_QIANFAN_API_KEY"));
	}

	#[test]
	fn build_adapter_applies_base_url_override() {
		let config = QianfanConfig {
			api_key: Some(SecretString::from("key")),
			base_url: Some("http://127.0.0.1:8080/search".to_string()),
			timeout_secs: 5,
		};
		let adapter = build_adapter(&config).unwrap();
		assert_eq!(adapter.client().base_url(), "http://127.0.0.1:8080/search");
	}
}
