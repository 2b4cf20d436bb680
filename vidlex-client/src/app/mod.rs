//! Application glue: composition root and message loop.

pub mod bootstrap;
pub mod runtime;

pub use bootstrap::{AppConfig, AppContext};
pub use runtime::Runtime;
