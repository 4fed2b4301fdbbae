//! Deterministic, pure logic for selector resolution and render decisions.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests. The only
//! code they run that they do not own is caller-supplied projectors and
//! render callbacks.

pub mod decider;
pub mod descriptor;
pub mod gate;
pub mod projector;
pub mod resolver;
pub mod types;
pub mod value;
