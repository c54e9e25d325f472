//! # Inkpad Core
//!
//! Shared types and traits for the Inkpad notes client:
//! - Domain types (`Note`, `User`, `NoteQuery`, `SessionState`, ...)
//! - The `TokenStore` capability trait with an in-memory implementation
//! - Client-side form validation with field-level messages

pub mod traits;
pub mod types;
pub mod validate;

pub use traits::{MemoryTokenStore, TokenStore, TokenStoreError};
pub use types::{
    Credentials, LoginId, Note, NoteDraft, NoteQuery, Registration, SessionState, SortField,
    SortOrder, Tag, TokenPair, User,
};
pub use validate::FieldErrors;
