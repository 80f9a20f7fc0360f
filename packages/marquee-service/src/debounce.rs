use std::{sync::Arc, time::Duration};

use tokio::sync::{mpsc, watch};

/// Handle to a debounced input.
///
/// The raw value is updated with [`Debouncer::set`]. A background task emits it on the paired
/// receiver once it has held still for the configured delay. Dropping every handle discards a
/// pending value and closes the receiver.
#[derive(Debug, Clone)]
pub struct Debouncer {
	raw: Arc<watch::Sender<String>>,
}
impl Debouncer {
	/// Starts the debounce task. The initial raw value is the empty string and is emitted after the
	/// first quiet period like any other value.
	pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
		let (raw_tx, raw_rx) = watch::channel(String::new());
		let (settled_tx, settled_rx) = mpsc::unbounded_channel();

		tokio::spawn(run(raw_rx, delay, settled_tx));

		(Self { raw: Arc::new(raw_tx) }, settled_rx)
	}

	/// Replaces the raw value. Setting the current value again does not restart the timer.
	pub fn set(&self, value: impl Into<String>) {
		let value = value.into();

		self.raw.send_if_modified(|current| {
			if *current == value {
				return false;
			}

			*current = value;

			true
		});
	}

	pub fn raw(&self) -> String {
		self.raw.borrow().clone()
	}
}

async fn run(
	mut raw: watch::Receiver<String>,
	delay: Duration,
	settled: mpsc::UnboundedSender<String>,
) {
	let mut last_emitted: Option<String> = None;

	raw.mark_changed();

	loop {
		if raw.changed().await.is_err() {
			return;
		}

		// Restart the window on every change until a full quiet period passes.
		loop {
			tokio::select! {
				changed = raw.changed() => {
					if changed.is_err() {
						tracing::trace!("Debounce input closed with a pending value.");

						return;
					}
				},
				_ = tokio::time::sleep(delay) => break,
			}
		}

		let value = raw.borrow_and_update().clone();

		if last_emitted.as_deref() == Some(value.as_str()) {
			continue;
		}
		if settled.send(value.clone()).is_err() {
			return;
		}

		tracing::debug!(query = %value, "Query settled.");

		last_emitted = Some(value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const DELAY: Duration = Duration::from_millis(1_000);

	#[tokio::test(start_paused = true)]
	async fn initial_empty_value_settles() {
		let (_input, mut settled) = Debouncer::spawn(DELAY);

		assert_eq!(settled.recv().await.as_deref(), Some(""));
	}

	#[tokio::test(start_paused = true)]
	async fn quiet_period_restarts_on_change() {
		let (input, mut settled) = Debouncer::spawn(DELAY);

		assert_eq!(settled.recv().await.as_deref(), Some(""));

		input.set("b");
		tokio::time::sleep(Duration::from_millis(600)).await;
		input.set("ba");
		tokio::time::sleep(Duration::from_millis(600)).await;

		assert!(settled.try_recv().is_err());

		tokio::time::sleep(Duration::from_millis(500)).await;

		assert_eq!(settled.try_recv().ok().as_deref(), Some("ba"));
	}

	#[tokio::test(start_paused = true)]
	async fn dropping_the_handle_discards_pending_value() {
		let (input, mut settled) = Debouncer::spawn(DELAY);

		assert_eq!(settled.recv().await.as_deref(), Some(""));

		input.set("heat");
		drop(input);

		assert_eq!(settled.recv().await, None);
	}
}
