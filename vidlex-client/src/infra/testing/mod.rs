//! In-process substitutes for the remote services, used by the test suites
//! and by hosts running without a server.

pub mod stubs;

pub use stubs::{StubCall, StubFeedApi};
