use rand::Rng;

use crate::types::{Book, BookId};

pub const ID_LEN: usize = 16;

// url-safe, 64 symbols
const ID_ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

pub fn generate_id() -> BookId {
	let mut rng = rand::thread_rng();
	(0..ID_LEN)
		.map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
		.collect()
}

/// Every book on the shelf, in insertion order.
///
/// Carries no lock of its own; the server keeps it behind a single mutex.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
	books: Vec<Book>,
}

impl CatalogStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn append(&mut self, book: Book) {
		self.books.push(book);
	}

	pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
		self.books.iter().position(|book| book.id() == id)
	}

	pub fn contains_id(&self, id: &str) -> bool {
		self.find_index_by_id(id).is_some()
	}

	pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Book> + 'a
	where
		P: Fn(&Book) -> bool + 'a,
	{
		self.books.iter().filter(move |book| predicate(*book))
	}

	// None when the index is past the end
	pub fn remove_at(&mut self, index: usize) -> Option<Book> {
		(index < self.books.len()).then(|| self.books.remove(index))
	}

	pub fn get(&self, index: usize) -> Option<&Book> {
		self.books.get(index)
	}

	pub fn get_mut(&mut self, index: usize) -> Option<&mut Book> {
		self.books.get_mut(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Book> {
		self.books.iter()
	}

	pub fn len(&self) -> usize {
		self.books.len()
	}

	pub fn is_empty(&self) -> bool {
		self.books.is_empty()
	}

	/// A random id no book on the shelf already has.
	pub fn fresh_id(&self) -> BookId {
		loop {
			let id = generate_id();
			if !self.contains_id(&id) {
				return id;
			}
		}
	}
}
