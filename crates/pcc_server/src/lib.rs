//! HTTP facade over [`pcc_core`].
//!
//! Every route is a thin translation: decode the request, call one
//! `ControlCenter` operation, and encode the result as JSON. Errors map to
//! status codes by their [`pcc_core::ErrorKind`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::router;
pub use state::AppState;
