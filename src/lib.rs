//! Scope-aware symbol scanner for free-format ILE RPG source.
//!
//! [`scan`] turns source text into a [`Document`]: every declaration with
//! its range and reach, plus control-block and to-do counts. The remaining
//! modules build on that table for listings, lookups, reports, and watching.

pub mod block;
pub mod builder;
pub mod cache;
pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hasher;
pub mod lookup;
pub mod matchers;
pub mod metrics;
pub mod navigator;
pub mod report;
pub mod scanner;
pub mod scope;
pub mod splitter;
pub mod types;
pub mod watch;

pub use error::Error;
pub use scanner::scan;
pub use types::{Document, Symbol};
