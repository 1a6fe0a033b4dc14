use axum::http::StatusCode;
use thiserror::Error;

use crate::types::BookId;
use crate::validate::Violation;

/// Why a shelf operation was refused.
///
/// The display text is the tail of the reply message; handlers prefix it with
/// the operation (`failed to add book: ...`).
#[derive(Debug, Error)]
pub enum ShelfError {
	// every violation reads the same to the client
	#[error("please fill in the book name")]
	Invalid(Vec<Violation>),

	#[error("readPage must not be greater than pageCount")]
	ReadPageOverflow,

	#[error("id not found")]
	NotFound,

	#[error("book {0} missing right after insert")]
	Lost(BookId),
}

impl ShelfError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ShelfError::Invalid(_) | ShelfError::ReadPageOverflow => StatusCode::BAD_REQUEST,
			ShelfError::NotFound => StatusCode::NOT_FOUND,
			ShelfError::Lost(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

pub type Result<T> = std::result::Result<T, ShelfError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes() {
		assert_eq!(ShelfError::Invalid(vec![]).status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(ShelfError::ReadPageOverflow.status_code(), StatusCode::BAD_REQUEST);
		assert_eq!(ShelfError::NotFound.status_code(), StatusCode::NOT_FOUND);
		assert_eq!(
			ShelfError::Lost("x".into()).status_code(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}

	#[test]
	fn invalid_hides_violations() {
		let err = ShelfError::Invalid(vec![Violation::Missing("year")]);
		assert_eq!(err.to_string(), "please fill in the book name");
	}
}
