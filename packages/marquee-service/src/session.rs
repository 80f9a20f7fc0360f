use std::{sync::Arc, time::Duration};

use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
};

use marquee_domain::TrendingEntry;

use crate::{
	CatalogProvider, Debouncer, Result, SearchOrchestrator, SearchView, TrendingAggregator,
	TrendingRecorder, TrendingStore,
};

#[derive(Debug, Clone)]
pub struct SessionOptions {
	pub debounce: Duration,
	pub trending_limit: u32,
	pub image_base: String,
}
impl SessionOptions {
	pub fn from_config(cfg: &marquee_config::Config) -> Self {
		Self {
			debounce: Duration::from_millis(cfg.search.debounce_ms),
			trending_limit: cfg.search.trending_limit,
			image_base: cfg.catalog.image_base.clone(),
		}
	}
}

/// One search box: debounced input, the request it drives, and the trending list shown next to it.
///
/// Clones share the same session. Background tasks stop after the last clone is dropped.
#[derive(Clone)]
pub struct SearchSession {
	inner: Arc<SessionInner>,
}

struct SessionInner {
	input: Debouncer,
	orchestrator: Arc<SearchOrchestrator>,
	aggregator: Arc<TrendingAggregator>,
	recorder: TrendingRecorder,
	trending: watch::Sender<Vec<TrendingEntry>>,
	trending_limit: u32,
}

impl SearchSession {
	/// Wires the pipeline and loads the trending list once. The initial empty query settles into a
	/// discover request after the first debounce window.
	pub async fn start(
		catalog: Arc<dyn CatalogProvider>,
		store: Arc<dyn TrendingStore>,
		options: SessionOptions,
	) -> Self {
		let aggregator = Arc::new(TrendingAggregator::new(store, options.image_base));
		let (recorder, _worker) = TrendingRecorder::spawn(aggregator.clone());
		let orchestrator = Arc::new(SearchOrchestrator::new(catalog, Some(recorder.clone())));
		let (input, settled) = Debouncer::spawn(options.debounce);
		let (trending, _) = watch::channel(Vec::new());
		let session = Self {
			inner: Arc::new(SessionInner {
				input,
				orchestrator: orchestrator.clone(),
				aggregator,
				recorder,
				trending,
				trending_limit: options.trending_limit,
			}),
		};

		tokio::spawn(drive(orchestrator, settled));

		if let Err(err) = session.refresh_trending().await {
			tracing::warn!(error = %err, "Failed to load trending searches.");
		}

		session
	}

	pub fn set_query(&self, raw: impl Into<String>) {
		self.inner.input.set(raw);
	}

	pub fn raw_query(&self) -> String {
		self.inner.input.raw()
	}

	pub fn view(&self) -> SearchView {
		self.inner.orchestrator.view()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchView> {
		self.inner.orchestrator.subscribe()
	}

	pub fn trending(&self) -> Vec<TrendingEntry> {
		self.inner.trending.borrow().clone()
	}

	/// Reloads the session's trending list from the store.
	pub async fn refresh_trending(&self) -> Result<Vec<TrendingEntry>> {
		let entries = self.inner.aggregator.load_trending(self.inner.trending_limit).await?;

		self.inner.trending.send_replace(entries.clone());

		Ok(entries)
	}

	/// Ranked entries straight from the store, independent of the session's cached list.
	pub async fn load_trending(&self, limit: u32) -> Result<Vec<TrendingEntry>> {
		self.inner.aggregator.load_trending(limit).await
	}

	/// Waits until every trending write queued so far has reached the store.
	pub async fn flush(&self) {
		self.inner.recorder.flush().await;
	}
}

async fn drive(
	orchestrator: Arc<SearchOrchestrator>,
	mut settled: mpsc::UnboundedReceiver<String>,
) {
	let mut in_flight: Option<JoinHandle<()>> = None;

	while let Some(query) = settled.recv().await {
		let ticket = orchestrator.begin(&query);

		if let Some(previous) = in_flight.take() {
			previous.abort();
		}

		let orchestrator = orchestrator.clone();

		in_flight = Some(tokio::spawn(async move {
			orchestrator.run(ticket).await;
		}));
	}
}
