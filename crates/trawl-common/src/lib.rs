//! Common utilities for trawl.
//!
//! This crate provides shared infrastructure used by the parser and the
//! selector engine:
//! - **Warning System** - deduplicated parse warnings routed through `log`
//! - **Source Positions** - byte offset to line/column mapping for diagnostics

pub mod position;
pub mod warning;

pub use position::{LineIndex, SourcePosition};
