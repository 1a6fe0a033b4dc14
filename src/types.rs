use serde::Serialize;

use crate::time::{self, Timestamp};

pub type BookId = String;

/// A catalog entry as stored on the shelf.
///
/// Fields are read-only from the outside: `id` and `inserted_at` never change
/// after creation and `finished` is recomputed whenever the pages change, so
/// the only way to alter a book is [`Book::apply`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
	id: BookId,
	name: String,
	year: i64,
	author: String,
	summary: String,
	publisher: String,
	page_count: i64,
	read_page: i64,
	finished: bool,
	reading: bool,
	#[serde(with = "time::iso_millis")]
	inserted_at: Timestamp,
	#[serde(with = "time::iso_millis")]
	updated_at: Timestamp,
}

/// Validated create/update body. Server managed fields are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPayload {
	pub name: String,
	pub year: i64,
	pub author: String,
	pub summary: String,
	pub publisher: String,
	pub page_count: i64,
	pub read_page: i64,
	pub reading: bool,
}

impl BookPayload {
	pub fn read_page_exceeds_page_count(&self) -> bool {
		self.read_page > self.page_count
	}

	pub fn is_finished(&self) -> bool {
		self.read_page == self.page_count
	}
}

impl Book {
	pub fn new(id: BookId, payload: BookPayload, now: Timestamp) -> Self {
		let finished = payload.is_finished();
		Book {
			id,
			name: payload.name,
			year: payload.year,
			author: payload.author,
			summary: payload.summary,
			publisher: payload.publisher,
			page_count: payload.page_count,
			read_page: payload.read_page,
			finished,
			reading: payload.reading,
			inserted_at: now,
			updated_at: now,
		}
	}

	// everything but id and inserted_at is replaced
	pub fn apply(&mut self, payload: BookPayload, now: Timestamp) {
		self.finished = payload.is_finished();
		self.name = payload.name;
		self.year = payload.year;
		self.author = payload.author;
		self.summary = payload.summary;
		self.publisher = payload.publisher;
		self.page_count = payload.page_count;
		self.read_page = payload.read_page;
		self.reading = payload.reading;
		self.updated_at = now;
	}

	pub fn id(&self) -> &str {
		&self.id
	}
	pub fn name(&self) -> &str {
		&self.name
	}
	pub fn page_count(&self) -> i64 {
		self.page_count
	}
	pub fn is_finished(&self) -> bool {
		self.finished
	}
	pub fn is_reading(&self) -> bool {
		self.reading
	}
	pub fn inserted_at(&self) -> Timestamp {
		self.inserted_at
	}
	pub fn updated_at(&self) -> Timestamp {
		self.updated_at
	}
}

/// What `GET /books` returns per book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
	pub id: BookId,
	pub name: String,
	pub publisher: String,
}

impl From<&Book> for BookSummary {
	fn from(book: &Book) -> Self {
		BookSummary {
			id: book.id.clone(),
			name: book.name.clone(),
			publisher: book.publisher.clone(),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
	pub finished: Option<String>,
	pub reading: Option<String>,
	pub name: Option<String>,
}

// a key given more than once never selects a filter
fn single(values: Vec<String>) -> Option<String> {
	match <[String; 1]>::try_from(values) {
		Ok([value]) => Some(value),
		Err(_) => None,
	}
}

/// The single filter a list request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShelfFilter {
	All,
	Finished(bool),
	Reading(bool),
	// stored lowercased
	Name(String),
}

fn flag(raw: Option<&str>) -> Option<bool> {
	match raw {
		Some("1") => Some(true),
		Some("0") => Some(false),
		_ => None,
	}
}

impl ListQuery {
	/// Build from raw query pairs, keeping every occurrence of a key.
	pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
		let (mut finished, mut reading, mut name) = (Vec::new(), Vec::new(), Vec::new());
		for (key, value) in pairs {
			match key.as_str() {
				"finished" => finished.push(value),
				"reading" => reading.push(value),
				"name" => name.push(value),
				_ => {}
			}
		}
		ListQuery {
			finished: single(finished),
			reading: single(reading),
			name: single(name),
		}
	}

	// first match wins, filters never combine
	pub fn filter(&self) -> ShelfFilter {
		if let Some(finished) = flag(self.finished.as_deref()) {
			ShelfFilter::Finished(finished)
		} else if let Some(reading) = flag(self.reading.as_deref()) {
			ShelfFilter::Reading(reading)
		} else {
			match self.name.as_deref() {
				Some(name) if !name.is_empty() => ShelfFilter::Name(name.to_lowercase()),
				_ => ShelfFilter::All,
			}
		}
	}
}

impl ShelfFilter {
	pub fn matches(&self, book: &Book) -> bool {
		match self {
			ShelfFilter::All => true,
			ShelfFilter::Finished(finished) => book.finished == *finished,
			ShelfFilter::Reading(reading) => book.reading == *reading,
			ShelfFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
		}
	}
}
