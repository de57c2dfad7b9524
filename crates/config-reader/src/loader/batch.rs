//! Concurrent batch loading.
//!
//! Responsibilities:
//! - Load an ordered list of paths concurrently, keeping input order.
//! - Load a keyed map of paths concurrently, keeping every key.
//! - Convert each per-entry failure into a policy report.
//!
//! Does NOT handle:
//! - Per-file interpretation (see single.rs).
//! - Classifying dynamic requests (see dispatch.rs).
//!
//! Invariants:
//! - All entries are awaited with `join_all`; none is cancelled early.
//! - Output length equals input length; keyed output has one entry per key.
//! - A failure already reported by the single-file loader is not reported
//!   again.
//! - Every failed entry is reported, even in `throw` mode; the first failure
//!   in input order is returned after every entry has settled.

use std::collections::BTreeMap;
use std::path::Path;

use futures::future::join_all;
use serde_json::Value;

use super::dispatch::PathEntry;
use super::reader::ConfigReader;
use crate::error::{FailureKind, LoadFailure, LoaderError, Result};

const FROM_ARRAY: &str = "ConfigReader::read_config_from_array";
const FROM_MAP: &str = "ConfigReader::read_config_from_map";

/// Outcome of one entry before the policy has seen it.
enum Settled {
    Loaded(Value),
    Failed(FailureKind),
    Raised(LoaderError),
}

impl From<Result<Value>> for Settled {
    fn from(outcome: Result<Value>) -> Self {
        match outcome {
            Ok(value) => Settled::Loaded(value),
            Err(LoaderError::Read { path, source }) => {
                Settled::Failed(FailureKind::Read { path, source })
            }
            Err(err) => Settled::Raised(err),
        }
    }
}

impl ConfigReader {
    /// Load every path concurrently.
    ///
    /// `result[i]` holds the content of `paths[i]`, or the default value if
    /// it failed in `warn`/`silent` mode.
    pub async fn read_config_from_array<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Value>> {
        let entries = paths
            .iter()
            .map(|path| PathEntry::Path(path.as_ref().to_path_buf()))
            .collect();
        self.load_entries(entries).await
    }

    /// Load every path of a key → path mapping concurrently.
    ///
    /// The result has exactly one entry per input key.
    pub async fn read_config_from_map<K, P, I>(&self, paths: I) -> Result<BTreeMap<String, Value>>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: AsRef<Path>,
    {
        let entries = paths
            .into_iter()
            .map(|(key, path)| (key.into(), PathEntry::Path(path.as_ref().to_path_buf())))
            .collect();
        self.load_keyed(entries).await
    }

    pub(super) async fn load_entries(&self, entries: Vec<PathEntry>) -> Result<Vec<Value>> {
        let loads = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.settle_entry(entry, format!("index {index}")));

        let outcomes: Vec<Result<Value>> = join_all(loads)
            .await
            .into_iter()
            .map(|settled| self.settle(settled, FROM_ARRAY))
            .collect();
        outcomes.into_iter().collect()
    }

    pub(super) async fn load_keyed(
        &self,
        entries: Vec<(String, PathEntry)>,
    ) -> Result<BTreeMap<String, Value>> {
        let loads = entries.into_iter().map(|(key, entry)| async move {
            let settled = self.settle_entry(entry, format!("key '{key}'")).await;
            (key, settled)
        });

        let outcomes: Vec<(String, Result<Value>)> = join_all(loads)
            .await
            .into_iter()
            .map(|(key, settled)| (key, self.settle(settled, FROM_MAP)))
            .collect();

        let mut configs = BTreeMap::new();
        for (key, outcome) in outcomes {
            configs.insert(key, outcome?);
        }
        Ok(configs)
    }

    async fn settle_entry(&self, entry: PathEntry, label: String) -> Settled {
        match entry {
            PathEntry::Path(path) => self.load(&path).await.into(),
            PathEntry::Invalid { found } => {
                Settled::Failed(FailureKind::InvalidPath {
                    entry: label,
                    found,
                })
            }
        }
    }

    fn settle(&self, settled: Settled, operation: &'static str) -> Result<Value> {
        match settled {
            Settled::Loaded(value) => Ok(value),
            Settled::Failed(kind) => self.config.policy.report(LoadFailure::new(operation, kind)),
            Settled::Raised(err) => Err(err),
        }
    }
}
