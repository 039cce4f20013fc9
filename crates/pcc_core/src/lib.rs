//! PCC Core - Backend logic for the Production Control Center
//!
//! This crate tracks the state of the content-production pipeline and the
//! durable topic queue it works from. It has no HTTP dependencies; the
//! server crate calls into [`ControlCenter`] and serializes what it returns.

pub mod center;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod topics;

pub use center::ControlCenter;
pub use error::{CoreError, ErrorKind};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
