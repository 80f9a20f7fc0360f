pub mod debounce;
pub mod memory;
pub mod orchestrator;
pub mod recorder;
pub mod session;
pub mod state;
pub mod trending;

mod error;

pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use memory::MemoryTrendingStore;
pub use orchestrator::{SearchOrchestrator, SearchTicket};
pub use recorder::TrendingRecorder;
pub use session::{SearchSession, SessionOptions};
pub use state::{RequestState, SearchEvent, SearchView, UNABLE_TO_FETCH, transition};
pub use trending::TrendingAggregator;

use std::{future::Future, pin::Pin};

use marquee_domain::{Movie, TrendingEntry};
use marquee_providers::CatalogClient;
use marquee_storage::{db::Db, models::SearchRecord};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of movie listings. `Error::Api` marks a well-formed failure payload; every other error is
/// treated as a transport failure.
pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, term: &'a str) -> BoxFuture<'a, Result<Vec<Movie>>>;

	fn discover<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Movie>>>;
}

/// Persistence for trending counts.
///
/// `record_search` must be an atomic increment-or-create: two concurrent calls for the same key
/// always end with the count raised by two.
pub trait TrendingStore
where
	Self: Send + Sync,
{
	fn record_search<'a>(
		&'a self,
		record: &'a SearchRecord,
	) -> BoxFuture<'a, Result<TrendingEntry>>;

	fn load_trending<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<TrendingEntry>>>;
}

impl CatalogProvider for CatalogClient {
	fn search<'a>(&'a self, term: &'a str) -> BoxFuture<'a, Result<Vec<Movie>>> {
		Box::pin(async move { Ok(CatalogClient::search(self, term).await?) })
	}

	fn discover<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Movie>>> {
		Box::pin(async move { Ok(CatalogClient::discover(self).await?) })
	}
}

impl TrendingStore for Db {
	fn record_search<'a>(
		&'a self,
		record: &'a SearchRecord,
	) -> BoxFuture<'a, Result<TrendingEntry>> {
		Box::pin(async move {
			let row = marquee_storage::trending::record_search(self, record).await?;

			Ok(row.into())
		})
	}

	fn load_trending<'a>(&'a self, limit: u32) -> BoxFuture<'a, Result<Vec<TrendingEntry>>> {
		Box::pin(async move {
			let rows = marquee_storage::trending::load_trending(self, i64::from(limit)).await?;

			Ok(rows.into_iter().map(TrendingEntry::from).collect())
		})
	}
}
