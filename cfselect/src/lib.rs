//! Declarative selector resolution and conditional render decisions.
//!
//! Given an opaque state value and a selector of unknown shape (absent,
//! function, mapping, list, or literal), the crate derives a projected value
//! and decides whether dependent content renders. The architecture enforces
//! a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (classification, resolution,
//!   gates, render decision). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting adapters (config, documents, state files,
//!   renderers).
//!
//! [`select`] composes the core into one invocation; [`host`] wires it to a
//! state source and a render sink.

pub mod core;
pub mod exit_codes;
pub mod host;
pub mod io;
pub mod logging;
pub mod select;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
