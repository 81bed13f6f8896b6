use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::error::{LoadError, Result};
use super::model::TraceKey;

// ---------------------------------------------------------------------------
// SegmentIndex – where a key lives inside a path
// ---------------------------------------------------------------------------

/// Position of one path segment, counted from either end of a path that is
/// relative to the scan root.
///
/// `FromRoot(0)` is the first directory below the root, `FromLeaf(0)` is the
/// file name itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentIndex {
    FromRoot(usize),
    FromLeaf(usize),
}

impl SegmentIndex {
    /// Absolute position inside a path of `len` segments.
    fn position(self, len: usize) -> Option<usize> {
        match self {
            SegmentIndex::FromRoot(i) if i < len => Some(i),
            SegmentIndex::FromLeaf(i) if i < len => Some(len - 1 - i),
            _ => None,
        }
    }

    fn resolve<'a>(self, segments: &[&'a str]) -> Option<&'a str> {
        self.position(segments.len()).map(|i| segments[i])
    }
}

// ---------------------------------------------------------------------------
// PathSchema – the positional contract with the data producer
// ---------------------------------------------------------------------------

/// Maps every classification field to the path segment that carries it.
///
/// The default layout is
/// `<root>/<group>/<mode>/.../<modem>/<trial_id>/<metric>.csv`:
///
/// | field  | segment          | example            |
/// |--------|------------------|--------------------|
/// | mode   | `FromRoot(1)`    | `agv_track1`       |
/// | modem  | `FromLeaf(2)`    | `UE_A`             |
/// | trial  | `FromLeaf(1)`    | `3` (integer)      |
/// | metric | `FromLeaf(0)`    | `5G_drx_rsrp`.csv  |
///
/// The track is the last `track_separator`-delimited token of the mode
/// segment, so `agv_track1` belongs to track `track1`. A path must be deep
/// enough that root-side and leaf-side fields never share a segment; for the
/// default layout that is five segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSchema {
    pub mode: SegmentIndex,
    pub modem: SegmentIndex,
    pub trial: SegmentIndex,
    pub metric: SegmentIndex,
    pub track_separator: char,
    /// File extension of trace files, without the dot.
    pub extension: String,
}

impl Default for PathSchema {
    fn default() -> Self {
        PathSchema {
            mode: SegmentIndex::FromRoot(1),
            modem: SegmentIndex::FromLeaf(2),
            trial: SegmentIndex::FromLeaf(1),
            metric: SegmentIndex::FromLeaf(0),
            track_separator: '_',
            extension: "csv".to_string(),
        }
    }
}

impl PathSchema {
    /// Parse a schema from JSON. Missing fields fall back to the default
    /// layout.
    pub fn from_json(text: &str) -> Result<Self> {
        let schema: PathSchema =
            serde_json::from_str(text).map_err(|e| LoadError::Schema(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Load and validate a JSON schema file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Reject schemas where two fields read the same segment.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mode", self.mode),
            ("modem", self.modem),
            ("trial", self.trial),
            ("metric", self.metric),
        ];
        for (i, (name_a, a)) in fields.iter().enumerate() {
            for (name_b, b) in &fields[i + 1..] {
                if a == b {
                    return Err(LoadError::Schema(format!(
                        "'{name_a}' and '{name_b}' both use segment {a:?}"
                    )));
                }
            }
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(LoadError::Schema(format!(
                "extension must be non-empty and without a leading dot, got '{}'",
                self.extension
            )));
        }
        Ok(())
    }

    /// Number of segments a path must have to classify.
    ///
    /// Root-side and leaf-side fields may not share a segment, so the
    /// deepest root index and the deepest leaf index add up.
    pub fn min_segments(&self) -> usize {
        let (mut root_depth, mut leaf_depth) = (0, 0);
        for idx in self.indices() {
            match idx {
                SegmentIndex::FromRoot(n) => root_depth = root_depth.max(n + 1),
                SegmentIndex::FromLeaf(n) => leaf_depth = leaf_depth.max(n + 1),
            }
        }
        (root_depth + leaf_depth).max(1)
    }

    fn indices(&self) -> [SegmentIndex; 4] {
        [self.mode, self.modem, self.trial, self.metric]
    }

    /// Decode the full key tuple from a path relative to the scan root.
    pub fn classify(&self, relative: &Path) -> Result<TraceKey> {
        let segments = self.segments(relative)?;

        let mode = self.field(relative, &segments, self.mode, "mode")?;
        let modem = self.field(relative, &segments, self.modem, "modem")?;
        let metric_segment = self.field(relative, &segments, self.metric, "metric")?;
        let trial_segment = self.field(relative, &segments, self.trial, "trial id")?;

        let metric = Path::new(metric_segment)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(metric_segment);

        let trial_id = trial_segment.parse::<i64>().map_err(|_| {
            LoadError::malformed_path(
                relative,
                format!("trial id segment '{trial_segment}' is not an integer"),
            )
        })?;

        Ok(TraceKey::new(modem, mode, metric, trial_id))
    }

    /// The raw mode segment of a path.
    pub fn mode_of<'a>(&self, relative: &'a Path) -> Result<&'a str> {
        let segments = self.segments(relative)?;
        self.field(relative, &segments, self.mode, "mode")
    }

    /// The track token embedded in the mode segment.
    pub fn track_of<'a>(&self, relative: &'a Path) -> Result<&'a str> {
        let mode = self.mode_of(relative)?;
        Ok(self.track_of_mode(mode))
    }

    /// Last separator-delimited token of a mode label.
    pub fn track_of_mode<'a>(&self, mode: &'a str) -> &'a str {
        mode.rsplit(self.track_separator).next().unwrap_or(mode)
    }

    /// Build the relative path under which `key` is expected, placing the
    /// mode below `group`. Only meaningful for the default layout, where
    /// the segments do not overlap.
    pub fn path_for(&self, group: &str, key: &TraceKey) -> std::path::PathBuf {
        let mut path = std::path::PathBuf::from(group);
        path.push(&key.mode);
        path.push(&key.modem);
        path.push(key.trial_id.to_string());
        path.push(format!("{}.{}", key.metric, self.extension));
        path
    }

    fn segments<'a>(&self, relative: &'a Path) -> Result<Vec<&'a str>> {
        let mut segments = Vec::new();
        for component in relative.components() {
            if let Component::Normal(os) = component {
                let seg = os.to_str().ok_or_else(|| {
                    LoadError::malformed_path(relative, "path segment is not valid UTF-8")
                })?;
                segments.push(seg);
            }
        }
        let needed = self.min_segments();
        if segments.len() < needed {
            return Err(LoadError::malformed_path(
                relative,
                format!(
                    "expected at least {needed} segments below the root, found {}",
                    segments.len()
                ),
            ));
        }

        let mut taken: Vec<usize> = Vec::with_capacity(4);
        for idx in self.indices() {
            if let Some(pos) = idx.position(segments.len()) {
                if taken.contains(&pos) {
                    return Err(LoadError::malformed_path(
                        relative,
                        format!("two fields resolve to segment {pos} ('{}')", segments[pos]),
                    ));
                }
                taken.push(pos);
            }
        }
        Ok(segments)
    }

    fn field<'a>(
        &self,
        relative: &Path,
        segments: &[&'a str],
        index: SegmentIndex,
        name: &str,
    ) -> Result<&'a str> {
        index.resolve(segments).ok_or_else(|| {
            LoadError::malformed_path(relative, format!("no {name} segment at {index:?}"))
        })
    }
}
