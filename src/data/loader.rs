use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::{LoadError, Result};
use super::filter::TraceFilters;
use super::model::{Trace, TraceKey};
use super::schema::PathSchema;
use super::store::TraceStore;
use crate::plot::TracePlotter;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Scans one root directory for trace files.
///
/// A scan is a one-shot batch: [`discover`](Self::discover) →
/// [`filter`](Self::filter) → [`classify`](Self::classify) +
/// [`parse`](Self::parse) for every remaining path, collected into a fresh
/// [`TraceStore`]. The first bad path or file aborts the scan.
#[derive(Debug, Clone)]
pub struct TraceLoader {
    root: PathBuf,
    schema: PathSchema,
}

impl TraceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_schema(root, PathSchema::default())
    }

    pub fn with_schema(root: impl Into<PathBuf>, schema: PathSchema) -> Self {
        TraceLoader {
            root: root.into(),
            schema,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schema(&self) -> &PathSchema {
        &self.schema
    }

    /// Load every trace under the root that passes `filters`.
    pub fn load(&self, filters: &TraceFilters) -> Result<TraceStore> {
        self.load_inner(filters, None)
    }

    /// Like [`load`](Self::load), additionally handing each loaded trace to
    /// `plotter`.
    pub fn load_with(
        &self,
        filters: &TraceFilters,
        plotter: &mut dyn TracePlotter,
    ) -> Result<TraceStore> {
        self.load_inner(filters, Some(plotter))
    }

    fn load_inner(
        &self,
        filters: &TraceFilters,
        mut plotter: Option<&mut dyn TracePlotter>,
    ) -> Result<TraceStore> {
        let candidates = self.discover()?;
        let n_found = candidates.len();
        let paths = self.filter(candidates, filters)?;
        log::info!(
            "{} of {n_found} trace files under {} pass the filters",
            paths.len(),
            self.root.display()
        );

        let mut store = TraceStore::new();
        for path in &paths {
            let key = self.classify(path)?;
            let trace = self.parse(path)?;
            log::debug!("{} → {key} ({} samples)", path.display(), trace.len());

            if let Some(plotter) = plotter.as_deref_mut() {
                plotter.plot(&key, &trace);
            }
            if store.insert(key.clone(), trace).is_some() {
                log::warn!("{key} loaded twice, keeping {}", path.display());
            }
        }
        Ok(store)
    }

    // -----------------------------------------------------------------------
    // Pipeline stages
    // -----------------------------------------------------------------------

    /// All regular files below the root carrying the schema's extension,
    /// sorted by path.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let extension = OsStr::new(&self.schema.extension);
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                LoadError::io(path, source)
            })?;

            if entry.file_type().is_file() && entry.path().extension() == Some(extension) {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        log::debug!("discovered {} trace files", paths.len());
        Ok(paths)
    }

    /// Keep the paths that pass every active allow-list.
    pub fn filter(&self, paths: Vec<PathBuf>, filters: &TraceFilters) -> Result<Vec<PathBuf>> {
        if filters.is_empty() {
            return Ok(paths);
        }
        let mut kept = Vec::with_capacity(paths.len());
        for path in paths {
            if filters.matches(&self.schema, self.relative(&path))? {
                kept.push(path);
            }
        }
        Ok(kept)
    }

    /// Decode the key tuple of a trace path. Paths under the root are
    /// interpreted relative to it, any other path as given.
    pub fn classify(&self, path: &Path) -> Result<TraceKey> {
        self.schema.classify(self.relative(path))
    }

    /// Read one trace file.
    pub fn parse(&self, path: &Path) -> Result<Trace> {
        parse_file(path)
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

// ---------------------------------------------------------------------------
// Trace parsing
// ---------------------------------------------------------------------------

/// Read a trace file: UTF-8 text holding comma-separated numbers.
pub fn parse_file(path: &Path) -> Result<Trace> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    parse_text(&text, path)
}

/// Parse trace content that is already in memory.
pub fn parse_str(text: &str) -> Result<Trace> {
    parse_text(text, Path::new("<inline>"))
}

/// Tokens are separated by commas; line breaks start a new record whose
/// tokens are appended. Surrounding whitespace is ignored.
fn parse_text(text: &str, origin: &Path) -> Result<Trace> {
    if text.trim().is_empty() {
        return Err(LoadError::EmptyTrace {
            path: origin.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| LoadError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        for token in record.iter() {
            let value = token
                .parse::<f64>()
                .map_err(|_| LoadError::MalformedTrace {
                    path: origin.to_path_buf(),
                    index: samples.len(),
                    token: token.to_string(),
                })?;
            samples.push(value);
        }
    }

    if samples.is_empty() {
        return Err(LoadError::EmptyTrace {
            path: origin.to_path_buf(),
        });
    }
    Ok(Trace::new(samples))
}
