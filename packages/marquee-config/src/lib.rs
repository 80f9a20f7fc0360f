mod error;
mod types;

pub use error::{Error, Result};
pub use types::{CatalogProviderConfig, Config, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

pub const MAX_TRENDING_LIMIT: u32 = 100;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	validate_catalog(&cfg.catalog)?;

	if cfg.search.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "search.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if !(1..=MAX_TRENDING_LIMIT).contains(&cfg.search.trending_limit) {
		return Err(Error::Validation {
			message: format!("search.trending_limit must be in the range 1-{MAX_TRENDING_LIMIT}."),
		});
	}

	Ok(())
}

pub fn validate_catalog(catalog: &CatalogProviderConfig) -> Result<()> {
	let api_base = catalog.api_base.trim();

	if api_base.is_empty() {
		return Err(Error::Validation { message: "catalog.api_base must be non-empty.".to_string() });
	}
	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "catalog.api_base must start with http:// or https://.".to_string(),
		});
	}
	if catalog.api_key.trim().is_empty() {
		return Err(Error::Validation { message: "catalog.api_key must be non-empty.".to_string() });
	}

	for (label, path) in
		[("catalog.search_path", &catalog.search_path), ("catalog.discover_path", &catalog.discover_path)]
	{
		if !path.starts_with('/') {
			return Err(Error::Validation { message: format!("{label} must start with '/'.") });
		}
	}

	if catalog.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "catalog.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if catalog.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::Validation {
			message: "catalog.default_headers values must be strings.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let catalog = &mut cfg.catalog;

	catalog.api_base = catalog.api_base.trim().trim_end_matches('/').to_string();
	catalog.image_base = catalog.image_base.trim().trim_end_matches('/').to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
