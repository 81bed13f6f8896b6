use std::path::Path;

use super::error::Result;
use super::schema::PathSchema;

// ---------------------------------------------------------------------------
// Filter predicate: allow-lists per path dimension
// ---------------------------------------------------------------------------

/// Allow-lists for the four filterable path dimensions.
///
/// An empty list means "no filter" for that dimension. A non-empty list keeps
/// a path when its key *contains* at least one of the entries, so `track1`
/// also matches `track10` and `rsrp` matches every RSRP metric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceFilters {
    pub modems: Vec<String>,
    pub metrics: Vec<String>,
    pub modes: Vec<String>,
    pub tracks: Vec<String>,
}

impl TraceFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modems<I, S>(mut self, modems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modems = collect_list(modems);
        self
    }

    pub fn metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = collect_list(metrics);
        self
    }

    pub fn modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = collect_list(modes);
        self
    }

    pub fn tracks<I, S>(mut self, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tracks = collect_list(tracks);
        self
    }

    /// True when no dimension is filtered.
    pub fn is_empty(&self) -> bool {
        self.modems.is_empty()
            && self.metrics.is_empty()
            && self.modes.is_empty()
            && self.tracks.is_empty()
    }

    /// Check a path (relative to the scan root) against every active list.
    ///
    /// Inactive dimensions never touch the path, but an active one that
    /// cannot decode its segment fails instead of dropping the path.
    pub fn matches(&self, schema: &PathSchema, relative: &Path) -> Result<bool> {
        if self.is_empty() {
            return Ok(true);
        }

        if !self.modems.is_empty() || !self.metrics.is_empty() {
            let key = schema.classify(relative)?;
            if !contains_any(&key.modem, &self.modems) {
                return Ok(false);
            }
            if !contains_any(&key.metric, &self.metrics) {
                return Ok(false);
            }
        }

        if !self.modes.is_empty() && !contains_any(schema.mode_of(relative)?, &self.modes) {
            return Ok(false);
        }

        if !self.tracks.is_empty() && !contains_any(schema.track_of(relative)?, &self.tracks) {
            return Ok(false);
        }

        Ok(true)
    }
}

fn collect_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .filter(|s: &String| !s.is_empty())
        .collect()
}

/// Empty `needles` always match.
fn contains_any(value: &str, needles: &[String]) -> bool {
    needles.is_empty() || needles.iter().any(|n| value.contains(n.as_str()))
}
