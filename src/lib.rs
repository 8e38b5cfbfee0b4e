//! Shooting gallery: shooters that lob weighted-random projectiles at an
//! oscillating target while a population manager churns them in and out.
//!
//! Integration tests in `tests/` are compiled as separate crates.
//! A `lib.rs` gives them a stable public API surface to import.

pub mod game;
pub mod common;
pub mod plugins;
