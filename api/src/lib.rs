//! # Inkpad API client
//!
//! The SDK half of the Inkpad notes client:
//! - [`ApiClient`] — reqwest wrapper that injects the bearer token and
//!   transparently recovers from access-token expiry with a single-flight
//!   refresh
//! - [`SessionController`] — session lifecycle (verify on load, login,
//!   register, logout)
//! - [`NotesController`] — note list, search/sort/pagination query state,
//!   and CRUD
//! - [`FileTokenStore`] — token persistence backing the injected
//!   `TokenStore` capability

pub mod error;
pub mod http;
pub mod notes;
pub mod session;
pub mod token_file;
mod wire;

pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
pub use notes::{NotesController, NotesSnapshot};
pub use session::SessionController;
pub use token_file::FileTokenStore;
