use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use marquee_config::CatalogProviderConfig;
use marquee_domain::Movie;

use crate::{Error, Result};

pub const DEFAULT_API_ERROR_MESSAGE: &str = "Failed to fetch movies";

/// HTTP client for the movie catalog.
///
/// Each call is one round trip with no retry. The per-request timeout comes from
/// `catalog.timeout_ms`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
	client: Client,
	cfg: CatalogProviderConfig,
}
impl CatalogClient {
	pub fn new(cfg: CatalogProviderConfig) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.build()?;

		Ok(Self { client, cfg })
	}

	pub async fn search(&self, term: &str) -> Result<Vec<Movie>> {
		self.fetch(&self.cfg.search_path, &[("query", term)]).await
	}

	/// Popularity-ordered listing used when there is no search term.
	pub async fn discover(&self) -> Result<Vec<Movie>> {
		self.fetch(&self.cfg.discover_path, &[("sort_by", "popularity.desc")]).await
	}

	async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<Movie>> {
		let url = format!("{}{}", self.cfg.api_base, path);
		let res = self.client.get(&url).query(query).send().await?;
		let status = res.status();

		if !status.is_success() {
			tracing::debug!(path, status = status.as_u16(), "Catalog request was rejected.");

			return Err(Error::Status { status: status.as_u16() });
		}

		let json: Value = res.json().await?;
		let movies = parse_catalog_response(json)?;

		tracing::debug!(path, count = movies.len(), "Catalog request completed.");

		Ok(movies)
	}
}

fn parse_catalog_response(mut json: Value) -> Result<Vec<Movie>> {
	if let Some(message) = api_failure(&json) {
		return Err(Error::Api { message });
	}

	let results = json
		.get_mut("results")
		.filter(|value| value.is_array())
		.map(Value::take)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Catalog response is missing results array.".to_string(),
		})?;

	Ok(serde_json::from_value(results)?)
}

// Two failure shapes are recognized: `Response: false` with `Error`, and `success: false` with
// `status_message`.
fn api_failure(json: &Value) -> Option<String> {
	let flagged = |key: &str| match json.get(key) {
		Some(Value::Bool(flag)) => !flag,
		Some(Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
		_ => false,
	};
	let message = |key: &str| {
		json.get(key)
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|message| !message.is_empty())
			.unwrap_or(DEFAULT_API_ERROR_MESSAGE)
			.to_string()
	};

	if flagged("Response") {
		return Some(message("Error"));
	}
	if flagged("success") {
		return Some(message("status_message"));
	}

	None
}
