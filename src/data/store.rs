use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::model::{Dimension, Trace, TraceKey};

type TrialMap = BTreeMap<i64, Trace>;
type MetricMap = BTreeMap<String, TrialMap>;
type ModeMap = BTreeMap<String, MetricMap>;

// ---------------------------------------------------------------------------
// TraceStore – modem → mode → metric → trial_id → Trace
// ---------------------------------------------------------------------------

/// All traces of one scan, nested by modem, mode, metric and trial id.
///
/// Every leaf is reachable through exactly one [`TraceKey`]. Inserting an
/// existing key replaces the stored trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TraceStore {
    modems: BTreeMap<String, ModeMap>,
}

impl TraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `trace` under `key`, returning the trace it replaced.
    pub fn insert(&mut self, key: TraceKey, trace: Trace) -> Option<Trace> {
        self.modems
            .entry(key.modem)
            .or_default()
            .entry(key.mode)
            .or_default()
            .entry(key.metric)
            .or_default()
            .insert(key.trial_id, trace)
    }

    pub fn get(&self, modem: &str, mode: &str, metric: &str, trial_id: i64) -> Option<&Trace> {
        self.modems
            .get(modem)?
            .get(mode)?
            .get(metric)?
            .get(&trial_id)
    }

    pub fn get_key(&self, key: &TraceKey) -> Option<&Trace> {
        self.get(&key.modem, &key.mode, &key.metric, key.trial_id)
    }

    /// Number of stored traces.
    pub fn len(&self) -> usize {
        self.modems
            .values()
            .flat_map(|modes| modes.values())
            .flat_map(|metrics| metrics.values())
            .map(|trials| trials.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modems.is_empty()
    }

    /// All `(key, trace)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (TraceKey, &Trace)> {
        self.modems.iter().flat_map(|(modem, modes)| {
            modes.iter().flat_map(move |(mode, metrics)| {
                metrics.iter().flat_map(move |(metric, trials)| {
                    trials.iter().map(move |(trial_id, trace)| {
                        (TraceKey::new(modem, mode, metric, *trial_id), trace)
                    })
                })
            })
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = TraceKey> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Sorted set of values seen for one dimension.
    pub fn unique_values(&self, dimension: Dimension) -> BTreeSet<String> {
        self.keys().map(|key| key.field(dimension)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(modem: &str, trial: i64) -> TraceKey {
        TraceKey::new(modem, "agv_track1", "5G_drx_rsrp", trial)
    }

    #[test]
    fn insert_and_get() {
        let mut store = TraceStore::new();
        assert!(store.is_empty());
        assert!(store.insert(key("UE_A", 1), Trace::new(vec![-80.0])).is_none());

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("UE_A", "agv_track1", "5G_drx_rsrp", 1),
            Some(&Trace::new(vec![-80.0]))
        );
        assert!(store.get("UE_A", "agv_track1", "5G_drx_rsrp", 2).is_none());
        assert!(store.get("UE_B", "agv_track1", "5G_drx_rsrp", 1).is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut store = TraceStore::new();
        store.insert(key("UE_A", 1), Trace::new(vec![-80.0]));
        let previous = store.insert(key("UE_A", 1), Trace::new(vec![-70.0, -71.0]));

        assert_eq!(previous, Some(Trace::new(vec![-80.0])));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_key(&key("UE_A", 1)).unwrap(), &vec![-70.0, -71.0]);
    }

    #[test]
    fn iter_is_ordered_by_key() {
        let mut store = TraceStore::new();
        store.insert(key("UE_B", 1), Trace::new(vec![1.0]));
        store.insert(key("UE_A", 2), Trace::new(vec![2.0]));
        store.insert(key("UE_A", 1), Trace::new(vec![3.0]));

        let keys: Vec<TraceKey> = store.keys().collect();
        assert_eq!(keys, vec![key("UE_A", 1), key("UE_A", 2), key("UE_B", 1)]);
        let trials: BTreeSet<String> = ["1", "2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(store.unique_values(Dimension::Trial), trials);
    }

    #[test]
    fn serializes_as_nested_maps() {
        let mut store = TraceStore::new();
        store.insert(key("UE_A", 1), Trace::new(vec![-80.0]));
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"UE_A":{"agv_track1":{"5G_drx_rsrp":{"1":[-80.0]}}}}"#);
    }
}
