//! Load RSRP/RSSI measurement traces from a directory tree of CSV files.
//!
//! The directory layout carries the metadata: every trace file lives at
//! `<root>/<group>/<mode>/.../<modem>/<trial_id>/<metric>.csv`. The
//! [`data::loader::TraceLoader`] walks such a tree, filters it by those path
//! keys and returns a [`data::store::TraceStore`]. Plotting is optional and
//! goes through the [`plot::TracePlotter`] trait.

pub mod data;
pub mod plot;

pub use data::error::{LoadError, Result};
pub use data::filter::TraceFilters;
pub use data::loader::{parse_file, parse_str, TraceLoader};
pub use data::model::{Dimension, Trace, TraceKey};
pub use data::schema::{PathSchema, SegmentIndex};
pub use data::store::TraceStore;
