use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub catalog: CatalogProviderConfig,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProviderConfig {
	pub api_base: String,
	pub api_key: String,
	#[serde(default = "default_search_path")]
	pub search_path: String,
	#[serde(default = "default_discover_path")]
	pub discover_path: String,
	/// Prefix joined with a movie's `poster_path` to build a displayable poster URL.
	#[serde(default = "default_image_base")]
	pub image_base: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Quiescence window a raw query must hold before it is submitted.
	pub debounce_ms: u64,
	/// Number of trending entries a session keeps for display.
	pub trending_limit: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { debounce_ms: 1_000, trending_limit: 5 }
	}
}

fn default_search_path() -> String {
	"/search/movie".to_string()
}

fn default_discover_path() -> String {
	"/discover/movie".to_string()
}

fn default_image_base() -> String {
	"https://image.tmdb.org/t/p/w500".to_string()
}
