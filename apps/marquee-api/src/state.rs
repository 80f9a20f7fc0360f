use std::sync::Arc;

use marquee_providers::CatalogClient;
use marquee_service::{SearchSession, SessionOptions};
use marquee_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub session: SearchSession,
	/// Limit used by `GET /v1/trending` when the caller does not pass one.
	pub trending_limit: u32,
}
impl AppState {
	pub async fn new(config: &marquee_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let catalog = CatalogClient::new(config.catalog.clone())?;
		let session = SearchSession::start(
			Arc::new(catalog),
			Arc::new(db),
			SessionOptions::from_config(config),
		)
		.await;

		Ok(Self::from_session(session, config.search.trending_limit))
	}

	pub fn from_session(session: SearchSession, trending_limit: u32) -> Self {
		Self { session, trending_limit }
	}
}
