use serde::Serialize;

use marquee_domain::Movie;
use marquee_providers::catalog::DEFAULT_API_ERROR_MESSAGE;

/// Message shown for transport, status, and decoding failures.
pub const UNABLE_TO_FETCH: &str = "Unable to fetch movies";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RequestState {
	#[default]
	Idle,
	Loading,
	Success(Vec<Movie>),
	Failure(String),
}
impl RequestState {
	pub fn is_settled(&self) -> bool {
		matches!(self, Self::Success(_) | Self::Failure(_))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
	Started,
	Loaded(Vec<Movie>),
	/// The catalog answered with an API-level failure payload.
	Rejected(Option<String>),
	Failed,
}

/// Applies one event. Terminal events only move a `Loading` state; anywhere else they are ignored.
pub fn transition(state: RequestState, event: SearchEvent) -> RequestState {
	match (state, event) {
		(_, SearchEvent::Started) => RequestState::Loading,
		(RequestState::Loading, SearchEvent::Loaded(movies)) => RequestState::Success(movies),
		(RequestState::Loading, SearchEvent::Rejected(message)) => RequestState::Failure(
			message
				.filter(|message| !message.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_API_ERROR_MESSAGE.to_string()),
		),
		(RequestState::Loading, SearchEvent::Failed) => {
			RequestState::Failure(UNABLE_TO_FETCH.to_string())
		},
		(state, _) => state,
	}
}

/// What the UI renders: the settled query, the request it triggered, and that request's sequence
/// number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchView {
	pub generation: u64,
	pub debounced_query: Option<String>,
	pub request: RequestState,
}
impl SearchView {
	/// Stamps a newly issued request and enters `Loading`, superseding whatever was in flight.
	pub fn begin(&mut self, generation: u64, query: impl Into<String>) {
		self.generation = generation;
		self.debounced_query = Some(query.into());
		self.request = transition(std::mem::take(&mut self.request), SearchEvent::Started);
	}

	/// Applies a completion. Returns `false` and leaves the view untouched when `generation` is
	/// no longer current.
	pub fn complete(&mut self, generation: u64, event: SearchEvent) -> bool {
		if generation != self.generation {
			return false;
		}

		self.request = transition(std::mem::take(&mut self.request), event);

		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn movie(id: i64) -> Movie {
		Movie {
			id,
			title: format!("Movie {id}"),
			poster_path: None,
			popularity: 0.0,
			vote_average: None,
			release_date: None,
			original_language: None,
		}
	}

	#[test]
	fn started_always_enters_loading() {
		for state in [
			RequestState::Idle,
			RequestState::Loading,
			RequestState::Success(vec![movie(1)]),
			RequestState::Failure("boom".to_string()),
		] {
			assert_eq!(transition(state, SearchEvent::Started), RequestState::Loading);
		}
	}

	#[test]
	fn terminal_events_only_leave_loading() {
		assert_eq!(
			transition(RequestState::Loading, SearchEvent::Loaded(vec![movie(1)])),
			RequestState::Success(vec![movie(1)])
		);
		assert_eq!(
			transition(RequestState::Idle, SearchEvent::Loaded(vec![movie(1)])),
			RequestState::Idle
		);
		assert_eq!(
			transition(RequestState::Failure("x".to_string()), SearchEvent::Failed),
			RequestState::Failure("x".to_string())
		);
	}

	#[test]
	fn rejection_uses_payload_message_or_default() {
		assert_eq!(
			transition(
				RequestState::Loading,
				SearchEvent::Rejected(Some("Invalid API key".to_string()))
			),
			RequestState::Failure("Invalid API key".to_string())
		);
		assert_eq!(
			transition(RequestState::Loading, SearchEvent::Rejected(None)),
			RequestState::Failure("Failed to fetch movies".to_string())
		);
		assert_eq!(
			transition(RequestState::Loading, SearchEvent::Failed),
			RequestState::Failure("Unable to fetch movies".to_string())
		);
	}

	#[test]
	fn stale_completion_is_ignored() {
		let mut view = SearchView::default();

		view.begin(1, "bat");
		view.begin(2, "batman");

		assert!(!view.complete(1, SearchEvent::Loaded(vec![movie(1)])));
		assert_eq!(view.request, RequestState::Loading);
		assert!(view.complete(2, SearchEvent::Loaded(vec![movie(2)])));
		assert_eq!(view.request, RequestState::Success(vec![movie(2)]));
		assert_eq!(view.debounced_query.as_deref(), Some("batman"));
	}

	#[test]
	fn serializes_with_status_tag() {
		let json = serde_json::to_value(RequestState::Failure("Unable to fetch movies".to_string()))
			.expect("Failed to serialize state.");

		assert_eq!(json, serde_json::json!({ "status": "failure", "value": "Unable to fetch movies" }));
		assert_eq!(
			serde_json::to_value(RequestState::Idle).expect("Failed to serialize state."),
			serde_json::json!({ "status": "idle" })
		);
	}
}
