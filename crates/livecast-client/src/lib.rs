//! livecast client library.
//!
//! This crate wires the transport, session state machine, dispatcher, and
//! callback chain into a working broadcast client. It is intended to be
//! consumed by the capture binary (`main.rs`) and by integration tests.

pub mod callbacks;
pub mod config;
pub mod dispatch;
pub mod gifts;
pub mod room;
pub mod session;
pub mod transport;
pub mod users;
