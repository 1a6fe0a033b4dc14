//! The five shelf operations.
//!
//! Each one works on a borrowed [`CatalogStore`] and returns a finished
//! [`Reply`]; locking and HTTP extraction live in `routes`. The clock is passed
//! in so the year bound and timestamps can be pinned in tests.

use axum::http::StatusCode;
use serde_json::json;
use tracing::{debug, error, info};

use crate::error::{Result, ShelfError};
use crate::reply::Reply;
use crate::store::CatalogStore;
use crate::time::{current_year, Timestamp};
use crate::types::{Book, BookId, BookPayload, BookSummary, ListQuery};
use crate::validate::validate;

fn checked_payload(raw: &[u8], now: &Timestamp) -> Result<BookPayload> {
	validate(raw, current_year(now)).map_err(|violations| {
		debug!(?violations, "rejected book payload");
		ShelfError::Invalid(violations)
	})
}

pub fn add_book(store: &mut CatalogStore, raw: &[u8], now: Timestamp) -> Reply {
	match try_add_book(store, raw, now) {
		Ok(id) => {
			info!(book_id = %id, "book added");
			Reply::success(StatusCode::CREATED)
				.message("book added successfully")
				.data(json!({ "bookId": id }))
		}
		Err(err @ ShelfError::Lost(_)) => {
			error!(%err, "insert could not be verified");
			Reply::fail(err.status_code(), "failed to add book")
		}
		Err(err) => Reply::fail(err.status_code(), format!("failed to add book: {err}")),
	}
}

fn try_add_book(store: &mut CatalogStore, raw: &[u8], now: Timestamp) -> Result<BookId> {
	let payload = checked_payload(raw, &now)?;
	if payload.read_page_exceeds_page_count() {
		return Err(ShelfError::ReadPageOverflow);
	}

	let id = store.fresh_id();
	store.append(Book::new(id.clone(), payload, now));

	if !store.contains_id(&id) {
		return Err(ShelfError::Lost(id));
	}
	Ok(id)
}

pub fn list_books(store: &CatalogStore, query: &ListQuery) -> Reply {
	let filter = query.filter();
	let books: Vec<BookSummary> = store
		.filter(|book| filter.matches(book))
		.map(BookSummary::from)
		.collect();
	debug!(?filter, count = books.len(), "listed books");
	Reply::success(StatusCode::OK).data(json!({ "books": books }))
}

pub fn get_book(store: &CatalogStore, id: &str) -> Reply {
	match store.find_index_by_id(id).and_then(|index| store.get(index)) {
		Some(book) => Reply::success(StatusCode::OK).data(json!({ "book": book })),
		None => Reply::fail(StatusCode::NOT_FOUND, "book not found"),
	}
}

pub fn update_book(store: &mut CatalogStore, id: &str, raw: &[u8], now: Timestamp) -> Reply {
	match try_update_book(store, id, raw, now) {
		Ok(()) => {
			info!(book_id = %id, "book updated");
			Reply::success(StatusCode::OK).message("book updated successfully")
		}
		Err(err) => Reply::fail(err.status_code(), format!("failed to update book: {err}")),
	}
}

fn try_update_book(store: &mut CatalogStore, id: &str, raw: &[u8], now: Timestamp) -> Result<()> {
	let payload = checked_payload(raw, &now)?;
	let index = store.find_index_by_id(id);

	// the page check wins over an unknown id
	if payload.read_page_exceeds_page_count() {
		return Err(ShelfError::ReadPageOverflow);
	}

	let book = index
		.and_then(|index| store.get_mut(index))
		.ok_or(ShelfError::NotFound)?;
	book.apply(payload, now);
	Ok(())
}

pub fn delete_book(store: &mut CatalogStore, id: &str) -> Reply {
	let removed = store
		.find_index_by_id(id)
		.and_then(|index| store.remove_at(index));

	match removed {
		Some(book) => {
			info!(book_id = %book.id(), "book deleted");
			Reply::success(StatusCode::OK).message("book deleted successfully")
		}
		None => {
			let err = ShelfError::NotFound;
			Reply::fail(err.status_code(), format!("failed to delete book: {err}"))
		}
	}
}
