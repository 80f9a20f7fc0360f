use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
	pub search_term_key: String,
	pub count: i64,
	pub representative_movie_id: i64,
	pub representative_title: String,
	pub representative_poster_url: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub last_updated_at: OffsetDateTime,
}

/// Count descending, then most recently reinforced first, then key ascending.
pub fn rank_order(a: &TrendingEntry, b: &TrendingEntry) -> Ordering {
	b.count
		.cmp(&a.count)
		.then_with(|| b.last_updated_at.cmp(&a.last_updated_at))
		.then_with(|| a.search_term_key.cmp(&b.search_term_key))
}

pub fn rank_trending(mut entries: Vec<TrendingEntry>, limit: usize) -> Vec<TrendingEntry> {
	entries.sort_by(rank_order);
	entries.truncate(limit);

	entries
}
