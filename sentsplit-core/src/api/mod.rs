//! Public API for sentsplit-core
//!
//! This module provides the [`Splitter`] facade, the free [`split`] and
//! [`split_ast`] functions using default options, and the error type shared by
//! every fallible operation.

mod config;
mod error;
mod splitter;

pub use config::{defaults, ConfigBuilder};
pub use error::{Result, SplitError};
pub use splitter::{split, split_ast, Splitter};
