// bookshelf catalog

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod reply;
pub mod routes;
pub mod store;
pub mod time;
pub mod types;
pub mod validate;

pub use config::{CliArgs, LogFormat, ServerConfig};
pub use error::ShelfError;
pub use logging::init_logging;
pub use reply::{Envelope, Reply, Status};
pub use routes::{new_shared_state, router, serve, ServerState, SharedState};
pub use store::CatalogStore;
pub use types::{Book, BookId, BookPayload, BookSummary, ListQuery, ShelfFilter};
pub use validate::Violation;
