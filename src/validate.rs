//! Book payload checks.
//!
//! Bodies arrive as raw bytes and are checked as loose JSON, the way the
//! catalog has always accepted them: numbers may come as numeric strings and
//! `reading` may come as `"true"`/`"false"`. All violations are collected so
//! they can be logged, even though the client only sees one generic message.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::BookPayload;

pub const MIN_YEAR: i64 = 1000;

// largest integer a JSON number holds exactly
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

const FIELDS: [&str; 8] = [
	"name",
	"year",
	"author",
	"summary",
	"publisher",
	"pageCount",
	"readPage",
	"reading",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
	#[error("payload is not valid JSON")]
	Malformed,
	#[error("payload must be an object")]
	NotObject,
	#[error("\"{0}\" is not allowed")]
	Unknown(String),
	#[error("\"{0}\" is required")]
	Missing(&'static str),
	#[error("\"{0}\" must be a string")]
	NotString(&'static str),
	#[error("\"{0}\" is not allowed to be empty")]
	Empty(&'static str),
	#[error("\"{0}\" must be an integer")]
	NotInteger(&'static str),
	#[error("\"{field}\" must be greater than or equal to {min}")]
	TooSmall { field: &'static str, min: i64 },
	#[error("\"{field}\" must be less than or equal to {max}")]
	TooLarge { field: &'static str, max: i64 },
	#[error("\"{0}\" must be a boolean")]
	NotBoolean(&'static str),
}

/// Parse and check a request body. `max_year` is the current calendar year.
pub fn validate(raw: &[u8], max_year: i64) -> Result<BookPayload, Vec<Violation>> {
	let value: Value = serde_json::from_slice(raw).map_err(|_| vec![Violation::Malformed])?;
	validate_value(&value, max_year)
}

pub fn validate_value(value: &Value, max_year: i64) -> Result<BookPayload, Vec<Violation>> {
	let Some(fields) = value.as_object() else {
		return Err(vec![Violation::NotObject]);
	};

	let mut violations: Vec<Violation> = fields
		.keys()
		.filter(|key| !FIELDS.contains(&key.as_str()))
		.map(|key| Violation::Unknown(key.clone()))
		.collect();

	let name = string_field(fields, "name", &mut violations);
	let year = integer_field(fields, "year", MIN_YEAR, Some(max_year), &mut violations);
	let author = string_field(fields, "author", &mut violations);
	let summary = string_field(fields, "summary", &mut violations);
	let publisher = string_field(fields, "publisher", &mut violations);
	let page_count = integer_field(fields, "pageCount", 1, None, &mut violations);
	let read_page = integer_field(fields, "readPage", 0, None, &mut violations);
	let reading = boolean_field(fields, "reading", &mut violations);

	match (name, year, author, summary, publisher, page_count, read_page, reading) {
		(
			Some(name),
			Some(year),
			Some(author),
			Some(summary),
			Some(publisher),
			Some(page_count),
			Some(read_page),
			Some(reading),
		) if violations.is_empty() => Ok(BookPayload {
			name,
			year,
			author,
			summary,
			publisher,
			page_count,
			read_page,
			reading,
		}),
		_ => Err(violations),
	}
}

fn string_field(
	fields: &Map<String, Value>,
	field: &'static str,
	violations: &mut Vec<Violation>,
) -> Option<String> {
	match fields.get(field) {
		None => {
			violations.push(Violation::Missing(field));
			None
		}
		Some(Value::String(s)) if s.is_empty() => {
			violations.push(Violation::Empty(field));
			None
		}
		Some(Value::String(s)) => Some(s.clone()),
		Some(_) => {
			violations.push(Violation::NotString(field));
			None
		}
	}
}

fn integer_field(
	fields: &Map<String, Value>,
	field: &'static str,
	min: i64,
	max: Option<i64>,
	violations: &mut Vec<Violation>,
) -> Option<i64> {
	let Some(raw) = fields.get(field) else {
		violations.push(Violation::Missing(field));
		return None;
	};
	let Some(n) = as_integer(raw) else {
		violations.push(Violation::NotInteger(field));
		return None;
	};
	if n < min {
		violations.push(Violation::TooSmall { field, min });
		return None;
	}
	if let Some(max) = max.filter(|max| n > *max) {
		violations.push(Violation::TooLarge { field, max });
		return None;
	}
	Some(n)
}

fn as_integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(n) => match n.as_i64() {
			Some(i) => (i.unsigned_abs() <= MAX_SAFE_INTEGER.unsigned_abs()).then_some(i),
			None => n.as_f64().and_then(whole),
		},
		Value::String(s) => s.trim().parse::<f64>().ok().and_then(whole),
		_ => None,
	}
}

fn whole(f: f64) -> Option<i64> {
	(f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64).then_some(f as i64)
}

fn boolean_field(
	fields: &Map<String, Value>,
	field: &'static str,
	violations: &mut Vec<Violation>,
) -> Option<bool> {
	let parsed = match fields.get(field) {
		None => {
			violations.push(Violation::Missing(field));
			return None;
		}
		Some(Value::Bool(b)) => Some(*b),
		Some(Value::String(s)) if s.eq_ignore_ascii_case("true") => Some(true),
		Some(Value::String(s)) if s.eq_ignore_ascii_case("false") => Some(false),
		Some(_) => None,
	};
	if parsed.is_none() {
		violations.push(Violation::NotBoolean(field));
	}
	parsed
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	const YEAR: i64 = 2024;

	fn body() -> Value {
		json!({
			"name": "A",
			"year": 2020,
			"author": "X",
			"summary": "S",
			"publisher": "P",
			"pageCount": 100,
			"readPage": 100,
			"reading": false,
		})
	}

	fn with(key: &str, value: Value) -> Value {
		let mut body = body();
		body[key] = value;
		body
	}

	fn without(key: &str) -> Value {
		let mut body = body();
		body.as_object_mut().unwrap().remove(key);
		body
	}

	#[test]
	fn accepts_complete_body() {
		let payload = validate_value(&body(), YEAR).unwrap();
		assert_eq!(
			payload,
			BookPayload {
				name: "A".into(),
				year: 2020,
				author: "X".into(),
				summary: "S".into(),
				publisher: "P".into(),
				page_count: 100,
				read_page: 100,
				reading: false,
			}
		);
	}

	#[test]
	fn every_field_is_required() {
		for field in FIELDS {
			let err = validate_value(&without(field), YEAR).unwrap_err();
			assert_eq!(err.len(), 1, "{field}");
			assert!(matches!(err[0], Violation::Missing(f) if f == field), "{field}");
		}
	}

	#[test]
	fn collects_every_violation() {
		let body = json!({ "name": "", "year": 999, "pageCount": 0, "reading": "maybe" });
		let err = validate_value(&body, YEAR).unwrap_err();
		assert_eq!(
			err,
			vec![
				Violation::Empty("name"),
				Violation::TooSmall { field: "year", min: 1000 },
				Violation::Missing("author"),
				Violation::Missing("summary"),
				Violation::Missing("publisher"),
				Violation::TooSmall { field: "pageCount", min: 1 },
				Violation::Missing("readPage"),
				Violation::NotBoolean("reading"),
			]
		);
	}

	#[test]
	fn year_is_bounded_by_calendar() {
		assert!(validate_value(&with("year", json!(1000)), YEAR).is_ok());
		assert!(validate_value(&with("year", json!(YEAR)), YEAR).is_ok());
		assert_eq!(
			validate_value(&with("year", json!(YEAR + 1)), YEAR).unwrap_err(),
			vec![Violation::TooLarge { field: "year", max: YEAR }]
		);
	}

	#[test]
	fn read_page_may_be_zero_but_not_negative() {
		assert!(validate_value(&with("readPage", json!(0)), YEAR).is_ok());
		assert_eq!(
			validate_value(&with("readPage", json!(-1)), YEAR).unwrap_err(),
			vec![Violation::TooSmall { field: "readPage", min: 0 }]
		);
	}

	#[test]
	fn integers_convert_like_before() {
		assert_eq!(validate_value(&with("year", json!("2001")), YEAR).unwrap().year, 2001);
		assert_eq!(validate_value(&with("pageCount", json!(120.0)), YEAR).unwrap().page_count, 120);
		assert_eq!(
			validate_value(&with("pageCount", json!(12.5)), YEAR).unwrap_err(),
			vec![Violation::NotInteger("pageCount")]
		);
		assert_eq!(
			validate_value(&with("year", json!("twenty")), YEAR).unwrap_err(),
			vec![Violation::NotInteger("year")]
		);
		assert_eq!(
			validate_value(&with("readPage", json!(null)), YEAR).unwrap_err(),
			vec![Violation::NotInteger("readPage")]
		);
	}

	#[test]
	fn unsafe_integers_are_rejected() {
		assert_eq!(
			validate_value(&with("pageCount", json!(9_007_199_254_740_993_i64)), YEAR).unwrap_err(),
			vec![Violation::NotInteger("pageCount")]
		);
		assert_eq!(
			validate_value(&with("pageCount", json!(u64::MAX)), YEAR).unwrap_err(),
			vec![Violation::NotInteger("pageCount")]
		);
		assert_eq!(
			validate_value(&with("readPage", json!(i64::MIN)), YEAR).unwrap_err(),
			vec![Violation::NotInteger("readPage")]
		);
		let raw = br#"{"name":"A","year":2020,"author":"X","summary":"S","publisher":"P","pageCount":9007199254740993,"readPage":1,"reading":true}"#;
		assert_eq!(validate(raw, YEAR).unwrap_err(), vec![Violation::NotInteger("pageCount")]);

		let largest = validate_value(&with("pageCount", json!(9_007_199_254_740_991_i64)), YEAR).unwrap();
		assert_eq!(largest.page_count, 9_007_199_254_740_991);
	}

	#[test]
	fn booleans_accept_words() {
		assert!(validate_value(&with("reading", json!("TRUE")), YEAR).unwrap().reading);
		assert!(!validate_value(&with("reading", json!("false")), YEAR).unwrap().reading);
		assert_eq!(
			validate_value(&with("reading", json!(1)), YEAR).unwrap_err(),
			vec![Violation::NotBoolean("reading")]
		);
	}

	#[test]
	fn strings_must_be_strings() {
		assert_eq!(
			validate_value(&with("author", json!(42)), YEAR).unwrap_err(),
			vec![Violation::NotString("author")]
		);
	}

	#[test]
	fn server_fields_are_rejected() {
		let err = validate_value(&with("finished", json!(true)), YEAR).unwrap_err();
		assert_eq!(err, vec![Violation::Unknown("finished".into())]);
		let err = validate_value(&with("id", json!("abc")), YEAR).unwrap_err();
		assert_eq!(err, vec![Violation::Unknown("id".into())]);
	}

	#[test]
	fn raw_bodies() {
		assert_eq!(validate(b"{not json", YEAR).unwrap_err(), vec![Violation::Malformed]);
		assert_eq!(validate(b"", YEAR).unwrap_err(), vec![Violation::Malformed]);
		assert_eq!(validate(b"[1, 2]", YEAR).unwrap_err(), vec![Violation::NotObject]);
		let raw = serde_json::to_vec(&body()).unwrap();
		assert!(validate(&raw, YEAR).is_ok());
	}
}
