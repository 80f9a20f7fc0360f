pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Transport error: {message}")]
	Transport { message: String },
	#[error("{message}")]
	Api { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}

impl From<marquee_providers::Error> for Error {
	fn from(err: marquee_providers::Error) -> Self {
		match err {
			marquee_providers::Error::Api { message } => Self::Api { message },
			other => Self::Transport { message: other.to_string() },
		}
	}
}

impl From<marquee_storage::Error> for Error {
	fn from(err: marquee_storage::Error) -> Self {
		match err {
			marquee_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			other => Self::Store { message: other.to_string() },
		}
	}
}
