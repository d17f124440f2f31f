//! Top-level facade crate for livecast.
//!
//! Re-exports core types and the client library so users can depend on a single crate.

pub mod core {
    pub use livecast_core::*;
}

pub mod client {
    pub use livecast_client::*;
}
