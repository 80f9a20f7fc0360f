use crate::{
	Error, Result,
	db::Db,
	models::{SearchRecord, TrendingSearch},
};

/// Creates the entry with `count = 1` or bumps it by one in a single statement.
///
/// The conflict arm runs under the row lock taken by the insert, so concurrent writers for the
/// same key serialize and no increment is lost. `last_updated_at` never moves backwards when an
/// earlier observation commits late.
pub async fn record_search(db: &Db, record: &SearchRecord) -> Result<TrendingSearch> {
	if record.search_term_key.trim().is_empty() {
		return Err(Error::InvalidArgument("search_term_key must be non-empty.".to_string()));
	}

	let row = sqlx::query_as::<_, TrendingSearch>(
		"\
INSERT INTO trending_searches (
	search_term_key,
	count,
	representative_movie_id,
	representative_title,
	representative_poster_url,
	last_updated_at
)
VALUES ($1, 1, $2, $3, $4, $5)
ON CONFLICT (search_term_key) DO UPDATE
SET
	count = trending_searches.count + 1,
	representative_movie_id = EXCLUDED.representative_movie_id,
	representative_title = EXCLUDED.representative_title,
	representative_poster_url = EXCLUDED.representative_poster_url,
	last_updated_at = GREATEST(trending_searches.last_updated_at, EXCLUDED.last_updated_at)
RETURNING
	search_term_key,
	count,
	representative_movie_id,
	representative_title,
	representative_poster_url,
	last_updated_at",
	)
	.bind(record.search_term_key.as_str())
	.bind(record.representative_movie_id)
	.bind(record.representative_title.as_str())
	.bind(record.representative_poster_url.as_deref())
	.bind(record.observed_at)
	.fetch_one(&db.pool)
	.await?;

	Ok(row)
}

pub async fn load_trending(db: &Db, limit: i64) -> Result<Vec<TrendingSearch>> {
	if limit <= 0 {
		return Err(Error::InvalidArgument("limit must be greater than zero.".to_string()));
	}

	let rows = sqlx::query_as::<_, TrendingSearch>(
		"\
SELECT
	search_term_key,
	count,
	representative_movie_id,
	representative_title,
	representative_poster_url,
	last_updated_at
FROM trending_searches
ORDER BY count DESC, last_updated_at DESC, search_term_key ASC
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

pub async fn get_trending(db: &Db, search_term_key: &str) -> Result<Option<TrendingSearch>> {
	let row = sqlx::query_as::<_, TrendingSearch>(
		"\
SELECT
	search_term_key,
	count,
	representative_movie_id,
	representative_title,
	representative_poster_url,
	last_updated_at
FROM trending_searches
WHERE search_term_key = $1",
	)
	.bind(search_term_key)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}
