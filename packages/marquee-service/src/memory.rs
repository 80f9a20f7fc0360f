use std::{
	collections::HashMap,
	sync::{Mutex, PoisonError},
};

use marquee_domain::{TrendingEntry, rank_trending};
use marquee_storage::models::SearchRecord;

use crate::{BoxFuture, Error, Result, TrendingStore};

/// Process-local trending store. Each upsert runs inside one critical section.
#[derive(Debug, Default)]
pub struct MemoryTrendingStore {
	entries: Mutex<HashMap<String, TrendingEntry>>,
}
impl MemoryTrendingStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, search_term_key: &str) -> Option<TrendingEntry> {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(search_term_key).cloned()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn upsert(&self, record: &SearchRecord) -> Result<TrendingEntry> {
		if record.search_term_key.trim().is_empty() {
			return Err(Error::InvalidRequest {
				message: "search_term_key must be non-empty.".to_string(),
			});
		}

		let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
		let entry = entries
			.entry(record.search_term_key.clone())
			.and_modify(|entry| entry.count += 1)
			.or_insert_with(|| TrendingEntry {
				search_term_key: record.search_term_key.clone(),
				count: 1,
				representative_movie_id: record.representative_movie_id,
				representative_title: record.representative_title.clone(),
				representative_poster_url: record.representative_poster_url.clone(),
				last_updated_at: record.observed_at,
			});

		entry.representative_movie_id = record.representative_movie_id;
		entry.representative_title = record.representative_title.clone();
		entry.representative_poster_url = record.representative_poster_url.clone();
		if record.observed_at > entry.last_updated_at {
			entry.last_updated_at = record.observed_at;
		}

		Ok(entry.clone())
	}
}
impl TrendingStore for MemoryTrendingStore {
	fn record_search<'a>(
		&'a self,
		record: &'a SearchRecord,
	) -> BoxFuture<'a, Result<TrendingEntry>> {
		let result = self.upsert(record);

		Box::pin(async move { result })
	}

	fn load_trending<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<TrendingEntry>>> {
		let entries = self
			.entries
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.values()
			.cloned()
			.collect::<Vec<_>>();

		Box::pin(async move { Ok(rank_trending(entries, limit as usize)) })
	}
}
