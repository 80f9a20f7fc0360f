use std::sync::Arc;

use time::OffsetDateTime;

use marquee_config::MAX_TRENDING_LIMIT;
use marquee_domain::{Movie, TrendingEntry, normalize_term, poster_url};
use marquee_storage::models::SearchRecord;

use crate::{Error, Result, TrendingStore};

pub struct TrendingAggregator {
	store: Arc<dyn TrendingStore>,
	image_base: String,
}
impl TrendingAggregator {
	pub fn new(store: Arc<dyn TrendingStore>, image_base: impl Into<String>) -> Self {
		Self { store, image_base: image_base.into() }
	}

	/// Folds one successful search into the entry for its normalized term and returns the entry.
	pub async fn record_search(&self, term: &str, movie: &Movie) -> Result<TrendingEntry> {
		let Some(search_term_key) = normalize_term(term) else {
			return Err(Error::InvalidRequest {
				message: "Search term must be non-empty after normalization.".to_string(),
			});
		};
		let record = SearchRecord {
			search_term_key,
			representative_movie_id: movie.id,
			representative_title: movie.title.clone(),
			representative_poster_url: poster_url(&self.image_base, movie),
			observed_at: OffsetDateTime::now_utc(),
		};
		let entry = self.store.record_search(&record).await?;

		tracing::debug!(
			key = %entry.search_term_key,
			count = entry.count,
			movie_id = entry.representative_movie_id,
			"Trending search recorded."
		);

		Ok(entry)
	}

	pub async fn load_trending(&self, limit: u32) -> Result<Vec<TrendingEntry>> {
		self.store.load_trending(clamp_limit(limit)).await
	}
}

pub fn clamp_limit(limit: u32) -> u32 {
	limit.clamp(1, MAX_TRENDING_LIMIT)
}
