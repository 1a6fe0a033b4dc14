use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
	body::Bytes,
	extract::{Path, Query, State},
	http::StatusCode,
	routing::get,
	Router,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::handlers;
use crate::reply::Reply;
use crate::store::CatalogStore;
use crate::time;
use crate::types::ListQuery;

pub type SharedState = Arc<Mutex<ServerState>>;

#[derive(Debug, Default)]
pub struct ServerState {
	pub books: CatalogStore,
}

pub fn new_shared_state() -> SharedState {
	Arc::new(Mutex::new(ServerState::default()))
}

pub fn router(state: SharedState) -> Router {
	Router::new()
		.route("/books", get(list_books).post(add_book).fallback(route_not_found))
		.route(
			"/books/:id",
			get(get_book)
				.put(update_book)
				.delete(delete_book)
				.fallback(route_not_found),
		)
		.fallback(route_not_found)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

pub async fn serve(config: ServerConfig) -> Result<()> {
	let app = router(new_shared_state());

	let listener = tokio::net::TcpListener::bind(config.bind)
		.await
		.with_context(|| format!("can't bind {}", config.bind))?;
	info!(addr = %listener.local_addr()?, "bookshelf listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("server error")
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!(%err, "can't listen for ctrl-c, running until killed");
		std::future::pending::<()>().await;
	}
	info!("shutting down");
}

async fn add_book(State(stt): State<SharedState>, body: Bytes) -> Reply {
	let mut state = stt.lock().await;
	handlers::add_book(&mut state.books, &body, time::now())
}

// every pair, repeated keys included
async fn list_books(State(stt): State<SharedState>, Query(pairs): Query<Vec<(String, String)>>) -> Reply {
	let query = ListQuery::from_pairs(pairs);
	let state = stt.lock().await;
	handlers::list_books(&state.books, &query)
}

async fn get_book(State(stt): State<SharedState>, Path(id): Path<String>) -> Reply {
	let state = stt.lock().await;
	handlers::get_book(&state.books, &id)
}

async fn update_book(State(stt): State<SharedState>, Path(id): Path<String>, body: Bytes) -> Reply {
	let mut state = stt.lock().await;
	handlers::update_book(&mut state.books, &id, &body, time::now())
}

async fn delete_book(State(stt): State<SharedState>, Path(id): Path<String>) -> Reply {
	let mut state = stt.lock().await;
	handlers::delete_book(&mut state.books, &id)
}

async fn route_not_found() -> Reply {
	Reply::fail(StatusCode::NOT_FOUND, "route not found")
}
