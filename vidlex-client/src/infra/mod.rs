//! Infrastructure: HTTP transport, configuration, media backends and
//! service seams.

pub mod api_client;
pub mod config;
pub mod errors;
pub mod media;
pub mod services;
pub mod testing;
