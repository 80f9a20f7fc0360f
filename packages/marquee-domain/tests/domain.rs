use time::{Duration, OffsetDateTime, macros::datetime};

use marquee_domain::{Movie, TrendingEntry, normalize_term, rank_trending};

fn entry(key: &str, count: i64, updated_at: OffsetDateTime) -> TrendingEntry {
	TrendingEntry {
		search_term_key: key.to_string(),
		count,
		representative_movie_id: 1,
		representative_title: key.to_string(),
		representative_poster_url: None,
		last_updated_at: updated_at,
	}
}

#[test]
fn normalizes_case_and_whitespace() {
	assert_eq!(normalize_term("  Batman  ").as_deref(), Some("batman"));
	assert_eq!(normalize_term("The\tDark   KNIGHT").as_deref(), Some("the dark knight"));
}

#[test]
fn normalizes_compatibility_forms() {
	assert_eq!(normalize_term("ＢＡＴＭＡＮ").as_deref(), Some("batman"));
}

#[test]
fn blank_terms_have_no_key() {
	assert_eq!(normalize_term(""), None);
	assert_eq!(normalize_term(" \t\n "), None);
}

#[test]
fn ranks_by_count_then_recency() {
	let base = datetime!(2026-01-01 00:00 UTC);
	let entries = vec![
		entry("alien", 2, base),
		entry("batman", 5, base),
		entry("heat", 2, base + Duration::minutes(5)),
		entry("up", 1, base + Duration::hours(1)),
	];
	let ranked = rank_trending(entries, 10);
	let keys = ranked.iter().map(|entry| entry.search_term_key.as_str()).collect::<Vec<_>>();

	assert_eq!(keys, vec!["batman", "heat", "alien", "up"]);
}

#[test]
fn full_ties_fall_back_to_key_order() {
	let base = datetime!(2026-01-01 00:00 UTC);
	let ranked = rank_trending(vec![entry("zodiac", 3, base), entry("alien", 3, base)], 10);

	assert_eq!(ranked[0].search_term_key, "alien");
	assert_eq!(ranked[1].search_term_key, "zodiac");
}

#[test]
fn truncates_to_limit_and_tolerates_empty() {
	let base = datetime!(2026-01-01 00:00 UTC);
	let ranked = rank_trending(
		vec![entry("a", 1, base), entry("b", 2, base), entry("c", 3, base)],
		2,
	);

	assert_eq!(ranked.len(), 2);
	assert_eq!(ranked[0].search_term_key, "c");
	assert!(rank_trending(Vec::new(), 5).is_empty());
}

#[test]
fn movie_tolerates_missing_optional_fields() {
	let movie: Movie = serde_json::from_value(serde_json::json!({
		"id": 268,
		"title": "Batman",
		"poster_path": null,
		"adult": false
	}))
	.expect("Failed to decode movie.");

	assert_eq!(movie.id, 268);
	assert_eq!(movie.poster_path, None);
	assert_eq!(movie.popularity, 0.0);
}

#[test]
fn trending_entry_serializes_rfc3339_timestamp() {
	let value = serde_json::to_value(entry("batman", 1, datetime!(2026-01-01 00:00 UTC)))
		.expect("Failed to encode entry.");

	assert_eq!(value["last_updated_at"], "2026-01-01T00:00:00Z");
}
