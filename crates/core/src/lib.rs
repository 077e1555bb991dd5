//! Core library for `coverletter`.
//!
//! Holds everything that does not talk to the terminal: the `${var}`
//! placeholder parser and fill engine, template sources (files and the
//! SQLite-backed store), PDF/clipboard export and configuration loading.

pub mod config;
pub mod export;
pub mod store;
pub mod templates;
