//! Vidlex client core
//!
//! Headless core of the vertical video feed: paged loading, activation of
//! the visible page, single-session playback control and subtitle lookup.
//! A host shell drives it with messages and renders from the `CoreEvent`
//! bus; the `vidlex` binary in `src/main.rs` runs it without a surface.
//!
//! Notes
//! - Public items are subject to change while the host integrations settle.
//! - Domains never perform I/O; effects are executed by [`app::Runtime`].

pub mod app;
pub mod common;
pub mod domains;
pub mod infra;
