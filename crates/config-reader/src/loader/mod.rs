//! Config file loading.
//!
//! Responsibilities:
//! - Load one file: structured interpretation first, raw-text fallback, then
//!   optional deletion (`load`, `load_sync`).
//! - Load an ordered list of files concurrently (`read_config_from_array`).
//! - Load a keyed map of files concurrently (`read_config_from_map`).
//! - Route a request to the right loader by its shape (`read_config`).
//!
//! Does NOT handle:
//! - Building the reader or validating options (see options/).
//! - Deciding whether failures raise or substitute (see policy.rs).
//!
//! Invariants / Assumptions:
//! - Every failure except a raw-text I/O failure at the single-file level goes
//!   through the error policy.
//! - Batches wait for every entry to settle; one failure never cancels others.
//! - Batch output is aligned with input order (lists) or keys (maps).
//! - Two loads targeting the same path at the same time (one deleting while
//!   the other reads) are a caller hazard; nothing here serializes them.

mod batch;
mod dispatch;
mod reader;
mod single;

pub use dispatch::{ConfigRequest, FileSet, Loaded, PathEntry};
pub use reader::ConfigReader;
pub(crate) use reader::ReaderConfig;

#[cfg(test)]
mod tests;
