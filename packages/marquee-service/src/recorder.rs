use std::sync::Arc;

use tokio::{
	sync::{mpsc, oneshot},
	task::JoinHandle,
};

use marquee_domain::Movie;

use crate::TrendingAggregator;

enum Job {
	Record { term: String, movie: Movie },
	Flush(oneshot::Sender<()>),
}

/// Queue of trending writes drained by a single worker task.
///
/// Recording never blocks the caller and never reports failure back to it. The worker stops once
/// every handle has been dropped and the queue is empty.
#[derive(Debug, Clone)]
pub struct TrendingRecorder {
	tx: mpsc::UnboundedSender<Job>,
}
impl TrendingRecorder {
	pub fn spawn(aggregator: Arc<TrendingAggregator>) -> (Self, JoinHandle<()>) {
		let (tx, rx) = mpsc::unbounded_channel();
		let worker = tokio::spawn(run_worker(aggregator, rx));

		(Self { tx }, worker)
	}

	pub fn record(&self, term: &str, movie: &Movie) {
		let job = Job::Record { term: term.to_string(), movie: movie.clone() };

		if self.tx.send(job).is_err() {
			tracing::warn!(term, "Trending recorder is stopped; dropping search event.");
		}
	}

	/// Resolves once every record queued before this call has been processed.
	pub async fn flush(&self) {
		let (ack_tx, ack_rx) = oneshot::channel();

		if self.tx.send(Job::Flush(ack_tx)).is_err() {
			return;
		}

		let _ = ack_rx.await;
	}
}

impl std::fmt::Debug for Job {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Record { term, movie } => {
				f.debug_struct("Record").field("term", term).field("movie_id", &movie.id).finish()
			},
			Self::Flush(_) => f.write_str("Flush"),
		}
	}
}

async fn run_worker(aggregator: Arc<TrendingAggregator>, mut rx: mpsc::UnboundedReceiver<Job>) {
	while let Some(job) = rx.recv().await {
		match job {
			Job::Record { term, movie } => {
				if let Err(err) = aggregator.record_search(&term, &movie).await {
					tracing::warn!(term = %term, error = %err, "Failed to record trending search.");
				}
			},
			Job::Flush(ack) => {
				let _ = ack.send(());
			},
		}
	}

	tracing::debug!("Trending recorder stopped.");
}
