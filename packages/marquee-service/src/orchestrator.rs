use std::sync::Arc;

use tokio::sync::watch;

use crate::{CatalogProvider, Error, RequestState, SearchEvent, SearchView, TrendingRecorder};

/// A request that has been stamped and moved the view into `Loading` but has not run yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
	pub generation: u64,
	/// Trimmed query. Empty means the discover listing.
	pub term: String,
}

/// Owns the request lifecycle for one search box.
///
/// Every issued request gets the next generation number. Only the completion whose generation is
/// still current may change the published [`SearchView`].
pub struct SearchOrchestrator {
	catalog: Arc<dyn CatalogProvider>,
	recorder: Option<TrendingRecorder>,
	view: watch::Sender<SearchView>,
}
impl SearchOrchestrator {
	pub fn new(catalog: Arc<dyn CatalogProvider>, recorder: Option<TrendingRecorder>) -> Self {
		let (view, _) = watch::channel(SearchView::default());

		Self { catalog, recorder, view }
	}

	pub fn view(&self) -> SearchView {
		self.view.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchView> {
		self.view.subscribe()
	}

	/// Issues a request for `query` and enters `Loading`. Any request still in flight becomes stale.
	pub fn begin(&self, query: &str) -> SearchTicket {
		let term = query.trim().to_string();
		let mut generation = 0;

		self.view.send_modify(|view| {
			generation = view.generation + 1;

			view.begin(generation, term.clone());
		});

		tracing::debug!(generation, term = %term, "Search request issued.");

		SearchTicket { generation, term }
	}

	/// Performs the catalog call for `ticket` and applies its outcome.
	///
	/// Returns the resulting state, or `None` when a newer request superseded this one and the
	/// outcome was discarded.
	pub async fn run(&self, ticket: SearchTicket) -> Option<RequestState> {
		let SearchTicket { generation, term } = ticket;
		let outcome = if term.is_empty() {
			self.catalog.discover().await
		} else {
			self.catalog.search(&term).await
		};
		let representative = match &outcome {
			Ok(movies) if !term.is_empty() => movies.first().cloned(),
			_ => None,
		};
		let event = match outcome {
			Ok(movies) => SearchEvent::Loaded(movies),
			Err(Error::Api { message }) => {
				tracing::info!(generation, term = %term, %message, "Catalog rejected search.");

				SearchEvent::Rejected(Some(message))
			},
			Err(err) => {
				tracing::warn!(generation, term = %term, error = %err, "Catalog request failed.");

				SearchEvent::Failed
			},
		};
		let mut settled = None;

		self.view.send_if_modified(|view| {
			if !view.complete(generation, event) {
				return false;
			}

			settled = Some(view.request.clone());

			true
		});

		let Some(state) = settled else {
			tracing::debug!(generation, term = %term, "Discarded superseded search response.");

			return None;
		};

		if let (Some(movie), Some(recorder)) = (representative, self.recorder.as_ref()) {
			recorder.record(&term, &movie);
		}

		Some(state)
	}

	/// `begin` followed by `run`.
	pub async fn submit(&self, query: &str) -> Option<RequestState> {
		let ticket = self.begin(query);

		self.run(ticket).await
	}
}
