//! Destinations for the parameter and result documents written by the
//! algorithms.  A document is a JSON value recorded under a short name such
//! as `bfs_parameters` or `dijkstra_results`.
use std::{
    collections::BTreeMap,
    env, fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Environment variable consulted by [`JsonFileSink::from_env`].
pub const LOG_DIR_ENV: &str = "GRAPH_LOG_DIR";

/// Directory used by [`JsonFileSink::default`].
pub const DEFAULT_LOG_DIR: &str = "files";

/// A place to durably record named JSON documents.
pub trait LogSink {
    /// Records a document, replacing any earlier document with the same
    /// name.
    fn record(&mut self, name: &str, document: &Value) -> GraphResult<()>;
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn record(&mut self, name: &str, document: &Value) -> GraphResult<()> {
        (**self).record(name, document)
    }
}

/// Writes each document to `<dir>/<name>.json`, creating the directory on
/// first use.
#[derive(Clone, Debug)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the directory named by `GRAPH_LOG_DIR`, falling back to
    /// [`DEFAULT_LOG_DIR`].
    pub fn from_env() -> Self {
        match env::var_os(LOG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a document with the given name is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl Default for JsonFileSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIR)
    }
}

impl LogSink for JsonFileSink {
    fn record(&mut self, name: &str, document: &Value) -> GraphResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| GraphError::io(&self.dir, e))?;
        let path = self.path_for(name);
        let text = serde_json::to_string_pretty(document)?;
        fs::write(&path, text).map_err(|e| GraphError::io(&path, e))?;
        debug!(path = %path.display(), "recorded document");
        Ok(())
    }
}

/// Keeps the most recent document recorded under each name.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    documents: BTreeMap<String, Value>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.documents.get(name)
    }

    /// Gets the names of all recorded documents, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl LogSink for MemorySink {
    fn record(&mut self, name: &str, document: &Value) -> GraphResult<()> {
        self.documents.insert(name.to_owned(), document.clone());
        Ok(())
    }
}

/// Discards every document.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn record(&mut self, _name: &str, _document: &Value) -> GraphResult<()> {
        Ok(())
    }
}
