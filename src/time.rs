use chrono::{DateTime, Datelike, Utc};

pub type Timestamp = DateTime<Utc>;

// same shape as a javascript Date.toISOString()
pub const ISO_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn now() -> Timestamp {
	Utc::now()
}

// upper bound for a book's publication year
pub fn current_year(now: &Timestamp) -> i64 {
	i64::from(now.year())
}

/// Serde adapter writing timestamps as `2024-05-01T10:20:30.123Z`.
pub mod iso_millis {
	use serde::Serializer;

	use super::{Timestamp, ISO_MILLIS};

	pub fn serialize<S: Serializer>(ts: &Timestamp, ser: S) -> Result<S::Ok, S::Error> {
		ser.collect_str(&ts.format(ISO_MILLIS))
	}
}
