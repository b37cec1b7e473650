//! Entity key to series index resolution
//!
//! Flow records carry the sender's address as a hex string (`0b000001` is
//! `11.0.0.1`, the first host in the simulator's addressing scheme). Only flows
//! listed in the active [`FlowTable`] get a series; everything else is dropped.
//! Port records already carry a small port number that is used directly.

use crate::error::IngestError;
use crate::record::TraceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Number of port series (ports `0..=8`)
pub const PORT_COUNT: usize = 9;

/// Port whose series are cleared before rendering
pub const MASKED_PORT: usize = 2;

/// Sender nodes tracked by the full flow table
const FULL_TABLE_NODES: [u32; 19] = [
    0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512, 544, 576,
];

/// Subset of [`FULL_TABLE_NODES`] plotted by the focused variant, in series order
const FOCUS_TABLE_NODES: [u32; 5] = [128, 0, 256, 512, 384];

/// Hex flow key of the host with the given node id
///
/// Hosts are addressed `11.(id / 256).(id % 256).1`.
pub fn flow_key_for_node(node: u32) -> String {
    let addr = 0x0b00_0001_u32 + ((node / 256) << 16) + ((node % 256) << 8);
    format!("{addr:08x}")
}

/// Built-in flow table layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowTableVariant {
    /// All 19 tracked senders, indices `0..=18`
    #[default]
    Full,
    /// Five senders of interest, indices `0..=4`
    Focus5,
    /// The first nine senders, indices `0..=8`
    Dense9,
}

impl FromStr for FlowTableVariant {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(FlowTableVariant::Full),
            "focus5" => Ok(FlowTableVariant::Focus5),
            "dense9" => Ok(FlowTableVariant::Dense9),
            other => Err(IngestError::InvalidConfiguration(format!(
                "unknown flow table variant {other:?} (expected full, focus5 or dense9)"
            ))),
        }
    }
}

impl fmt::Display for FlowTableVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowTableVariant::Full => "full",
            FlowTableVariant::Focus5 => "focus5",
            FlowTableVariant::Dense9 => "dense9",
        };
        f.write_str(name)
    }
}

/// Injective mapping from flow keys to series indices `0..len`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTable {
    index: HashMap<String, usize>,
}

impl FlowTable {
    pub fn from_variant(variant: FlowTableVariant) -> Self {
        let nodes: &[u32] = match variant {
            FlowTableVariant::Full => &FULL_TABLE_NODES,
            FlowTableVariant::Focus5 => &FOCUS_TABLE_NODES,
            FlowTableVariant::Dense9 => &FULL_TABLE_NODES[..9],
        };
        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, &node)| (flow_key_for_node(node), idx))
            .collect();
        Self { index }
    }

    pub fn full() -> Self {
        Self::from_variant(FlowTableVariant::Full)
    }

    pub fn focus5() -> Self {
        Self::from_variant(FlowTableVariant::Focus5)
    }

    pub fn dense9() -> Self {
        Self::from_variant(FlowTableVariant::Dense9)
    }

    /// Build a table from explicit `(key, index)` pairs
    ///
    /// Keys and indices must both be unique, and indices must cover `0..n`
    /// for a table of `n` keys.
    pub fn custom<I, K>(entries: I) -> Result<Self, IngestError>
    where
        I: IntoIterator<Item = (K, usize)>,
        K: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, idx)| (key.into(), idx))
            .collect::<Vec<_>>();
        let len = entries.len();

        let mut index = HashMap::with_capacity(len);
        let mut taken = vec![false; len];
        for (key, idx) in entries {
            if idx >= len {
                return Err(IngestError::FlowIndexOutOfRange { index: idx, len });
            }
            if taken[idx] {
                return Err(IngestError::DuplicateFlowIndex(idx));
            }
            if index.contains_key(&key) {
                return Err(IngestError::DuplicateFlowKey(key));
            }
            taken[idx] = true;
            index.insert(key, idx);
        }

        Ok(Self { index })
    }

    /// Series index for a flow key, if the flow is tracked
    pub fn resolve(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Number of flow series
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Keys ordered by their series index
    pub fn keys_by_index(&self) -> Vec<&str> {
        let mut keys = self
            .index
            .iter()
            .map(|(key, &idx)| (idx, key.as_str()))
            .collect::<Vec<_>>();
        keys.sort_unstable();
        keys.into_iter().map(|(_, key)| key).collect()
    }
}

impl Default for FlowTable {
    fn default() -> Self {
        Self::full()
    }
}

/// Resolves trace records to series indices
#[derive(Debug, Clone, Default)]
pub struct KeyMapper {
    flows: FlowTable,
}

impl KeyMapper {
    pub fn new(flows: FlowTable) -> Self {
        Self { flows }
    }

    /// Series index for a record, or `None` when the entity is not tracked
    ///
    /// Flow records are looked up in the flow table. Port records use the
    /// port number itself and are dropped outside `0..PORT_COUNT`.
    pub fn resolve(&self, record: &TraceRecord) -> Option<usize> {
        match record {
            TraceRecord::Rate { flow, .. } | TraceRecord::SmoothedFlowDeviation { flow, .. } => {
                self.flows.resolve(flow)
            }
            TraceRecord::Port { port, .. } | TraceRecord::SmoothedPort { port, .. } => {
                let port = *port as usize;
                (port < PORT_COUNT).then_some(port)
            }
        }
    }

    pub fn flow_table(&self) -> &FlowTable {
        &self.flows
    }

    /// Number of flow series slots
    pub fn flow_slots(&self) -> usize {
        self.flows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscope_core::SimTime;
    use std::collections::HashSet;

    fn rate(flow: &str) -> TraceRecord {
        TraceRecord::Rate {
            timestamp: SimTime::zero(),
            flow: flow.to_string(),
            gbps: 1.0,
        }
    }

    fn port(port: u32) -> TraceRecord {
        TraceRecord::Port {
            timestamp: SimTime::zero(),
            port,
            utilization: 1.0,
        }
    }

    #[test]
    fn flow_keys_follow_host_addressing() {
        assert_eq!(flow_key_for_node(0), "0b000001");
        assert_eq!(flow_key_for_node(32), "0b002001");
        assert_eq!(flow_key_for_node(256), "0b010001");
        assert_eq!(flow_key_for_node(576), "0b024001");
    }

    #[test]
    fn builtin_tables_are_injective_and_dense() {
        for (table, expected_len) in [
            (FlowTable::full(), 19),
            (FlowTable::focus5(), 5),
            (FlowTable::dense9(), 9),
        ] {
            assert_eq!(table.len(), expected_len);
            let keys = table.keys_by_index();
            let indices = keys
                .iter()
                .map(|key| table.resolve(key).unwrap())
                .collect::<Vec<_>>();
            assert_eq!(indices, (0..expected_len).collect::<Vec<_>>());
            assert_eq!(keys.iter().collect::<HashSet<_>>().len(), expected_len);
        }
    }

    #[test]
    fn full_table_starts_with_known_keys() {
        let table = FlowTable::full();
        assert_eq!(table.resolve("0b000001"), Some(0));
        assert_eq!(table.resolve("0b002001"), Some(1));
        assert_eq!(table.resolve("0b024001"), Some(18));
    }

    #[test]
    fn focus_table_reorders_subset() {
        let table = FlowTable::focus5();
        assert_eq!(table.resolve(&flow_key_for_node(128)), Some(0));
        assert_eq!(table.resolve("0b000001"), Some(1));
        assert_eq!(table.resolve("0b002001"), None);
    }

    #[test]
    fn unknown_keys_never_resolve() {
        let mapper = KeyMapper::default();
        assert_eq!(mapper.resolve(&rate("0b000001")), Some(0));
        assert_eq!(mapper.resolve(&rate("0b000002")), None);
        assert_eq!(mapper.resolve(&rate("")), None);
    }

    #[test]
    fn ports_are_used_directly() {
        let mapper = KeyMapper::default();
        assert_eq!(mapper.resolve(&port(0)), Some(0));
        assert_eq!(mapper.resolve(&port(8)), Some(8));
        assert_eq!(mapper.resolve(&port(9)), None);
    }

    #[test]
    fn custom_table_validation() {
        let table = FlowTable::custom([("a", 1), ("b", 0)]).unwrap();
        assert_eq!(table.keys_by_index(), vec!["b", "a"]);

        assert!(matches!(
            FlowTable::custom([("a", 0), ("b", 0)]),
            Err(IngestError::DuplicateFlowIndex(0))
        ));
        assert!(matches!(
            FlowTable::custom([("a", 0), ("a", 1)]),
            Err(IngestError::DuplicateFlowKey(_))
        ));
        assert!(matches!(
            FlowTable::custom([("a", 0), ("b", 5)]),
            Err(IngestError::FlowIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn variant_parsing() {
        assert_eq!("Focus5".parse::<FlowTableVariant>().unwrap(), FlowTableVariant::Focus5);
        assert_eq!(FlowTableVariant::Dense9.to_string(), "dense9");
        assert!("all".parse::<FlowTableVariant>().is_err());
    }
}
