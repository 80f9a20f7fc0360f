use serde::{Deserialize, Serialize};

/// A catalog record as returned by the search and discover endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
	pub id: i64,
	pub title: String,
	#[serde(default)]
	pub poster_path: Option<String>,
	#[serde(default)]
	pub popularity: f64,
	#[serde(default)]
	pub vote_average: Option<f64>,
	#[serde(default)]
	pub release_date: Option<String>,
	#[serde(default)]
	pub original_language: Option<String>,
}

/// Joins `image_base` with the movie's poster path. Blank paths yield `None`.
pub fn poster_url(image_base: &str, movie: &Movie) -> Option<String> {
	let path = movie.poster_path.as_deref().map(str::trim).filter(|path| !path.is_empty())?;
	let base = image_base.trim_end_matches('/');

	if path.starts_with('/') { Some(format!("{base}{path}")) } else { Some(format!("{base}/{path}")) }
}
