pub mod movie;
pub mod term;
pub mod trending;

pub use movie::{Movie, poster_url};
pub use term::normalize_term;
pub use trending::{TrendingEntry, rank_order, rank_trending};
