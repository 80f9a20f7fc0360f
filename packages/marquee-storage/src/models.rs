use time::OffsetDateTime;

use marquee_domain::TrendingEntry;

#[derive(Debug, sqlx::FromRow)]
pub struct TrendingSearch {
	pub search_term_key: String,
	pub count: i64,
	pub representative_movie_id: i64,
	pub representative_title: String,
	pub representative_poster_url: Option<String>,
	pub last_updated_at: OffsetDateTime,
}
impl From<TrendingSearch> for TrendingEntry {
	fn from(row: TrendingSearch) -> Self {
		Self {
			search_term_key: row.search_term_key,
			count: row.count,
			representative_movie_id: row.representative_movie_id,
			representative_title: row.representative_title,
			representative_poster_url: row.representative_poster_url,
			last_updated_at: row.last_updated_at,
		}
	}
}

/// One observed search, already normalized, ready to be folded into `trending_searches`.
#[derive(Debug, Clone)]
pub struct SearchRecord {
	pub search_term_key: String,
	pub representative_movie_id: i64,
	pub representative_title: String,
	pub representative_poster_url: Option<String>,
	pub observed_at: OffsetDateTime,
}
