use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
	Success,
	Fail,
}

/// Body of every reply: `{status, message?, data?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
	pub status: Status,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
	pub code: StatusCode,
	pub body: Envelope,
}

impl Reply {
	pub fn success(code: StatusCode) -> Self {
		Reply {
			code,
			body: Envelope {
				status: Status::Success,
				message: None,
				data: None,
			},
		}
	}

	pub fn fail(code: StatusCode, message: impl Into<String>) -> Self {
		Reply {
			code,
			body: Envelope {
				status: Status::Fail,
				message: Some(message.into()),
				data: None,
			},
		}
	}

	pub fn message(mut self, message: impl Into<String>) -> Self {
		self.body.message = Some(message.into());
		self
	}

	pub fn data(mut self, data: Value) -> Self {
		self.body.data = Some(data);
		self
	}
}

impl IntoResponse for Reply {
	fn into_response(self) -> Response {
		(self.code, Json(self.body)).into_response()
	}
}
