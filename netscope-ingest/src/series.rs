//! Per-entity time series reconstructed from one trace file

use crate::keymap::{MASKED_PORT, PORT_COUNT};
use crate::record::RecordKind;
use crate::window::{RollingWindow, RollingWindowAggregator, DEFAULT_WINDOW_CAPACITY};
use netscope_core::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Warm-up period subtracted from flow timestamps, in milliseconds
pub const DEFAULT_WARMUP_OFFSET_MS: f64 = 2000.0;

/// `(normalized time, value)` samples in arrival order
pub type Series = Vec<(f64, f64)>;

/// How raw timestamps map onto the plotted time axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Flow series: milliseconds, shifted so the warm-up ends at zero
    pub warmup_offset_ms: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            warmup_offset_ms: DEFAULT_WARMUP_OFFSET_MS,
        }
    }
}

impl Normalization {
    /// Flow kinds: `ns / 1e6 - warmup`; port kinds: `ns / 1e9`
    pub fn normalize(&self, kind: RecordKind, timestamp: SimTime) -> f64 {
        if kind.is_flow() {
            timestamp.as_millis_f64() - self.warmup_offset_ms
        } else {
            timestamp.as_secs_f64()
        }
    }
}

/// The chart categories a store can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesCategory {
    FlowRate,
    FlowDeviation,
    FlowDeviationAverage,
    Port,
    PortSmoothed,
}

impl SeriesCategory {
    /// Categories rendered when nothing else is configured
    pub const DEFAULTS: [SeriesCategory; 4] = [
        SeriesCategory::FlowRate,
        SeriesCategory::FlowDeviation,
        SeriesCategory::Port,
        SeriesCategory::PortSmoothed,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            SeriesCategory::FlowRate => "flow-rate",
            SeriesCategory::FlowDeviation => "flow-deviation",
            SeriesCategory::FlowDeviationAverage => "flow-deviation-average",
            SeriesCategory::Port => "port",
            SeriesCategory::PortSmoothed => "port-smoothed",
        }
    }
}

impl fmt::Display for SeriesCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SeriesCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        [
            SeriesCategory::FlowRate,
            SeriesCategory::FlowDeviation,
            SeriesCategory::FlowDeviationAverage,
            SeriesCategory::Port,
            SeriesCategory::PortSmoothed,
        ]
        .into_iter()
        .find(|category| category.slug() == normalized)
        .ok_or_else(|| format!("unknown series category {s:?}"))
    }
}

/// Time series for every tracked flow and port of one trace file
#[derive(Debug, Clone)]
pub struct SeriesStore {
    normalization: Normalization,
    rate: Vec<Series>,
    deviation: Vec<Series>,
    deviation_average: Vec<Series>,
    port: Vec<Series>,
    smoothed_port: Vec<Series>,
    windows: RollingWindowAggregator,
    finished: bool,
}

impl SeriesStore {
    /// Create an empty store with `flows` flow slots and the default window
    pub fn new(flows: usize) -> Self {
        Self::with_options(flows, DEFAULT_WINDOW_CAPACITY, Normalization::default())
    }

    pub fn with_options(flows: usize, window_capacity: usize, normalization: Normalization) -> Self {
        Self {
            normalization,
            rate: vec![Series::new(); flows],
            deviation: vec![Series::new(); flows],
            deviation_average: vec![Series::new(); flows],
            port: vec![Series::new(); PORT_COUNT],
            smoothed_port: vec![Series::new(); PORT_COUNT],
            windows: RollingWindowAggregator::new(flows, window_capacity),
            finished: false,
        }
    }

    /// Append one resolved sample
    ///
    /// Smoothed flow deviation samples also feed the flow's rolling window.
    /// Returns `false` when `index` has no slot for this kind.
    pub fn append(&mut self, kind: RecordKind, index: usize, timestamp: SimTime, value: f64) -> bool {
        let t = self.normalization.normalize(kind, timestamp);
        let target = match kind {
            RecordKind::Rate => &mut self.rate,
            RecordKind::SmoothedFlowDeviation => &mut self.deviation,
            RecordKind::Port => &mut self.port,
            RecordKind::SmoothedPort => &mut self.smoothed_port,
        };
        let Some(series) = target.get_mut(index) else {
            return false;
        };
        series.push((t, value));

        if kind == RecordKind::SmoothedFlowDeviation {
            if let Some(average) = self.windows.push(index, value) {
                self.deviation_average[index].push((t, average));
            }
        }
        true
    }

    /// Close the store: clears both series of the masked port
    ///
    /// Idempotent; the mask is applied once per file regardless of content.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.port[MASKED_PORT].clear();
        self.smoothed_port[MASKED_PORT].clear();
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// All series of one record kind, indexed by series index
    pub fn series(&self, kind: RecordKind) -> &[Series] {
        match kind {
            RecordKind::Rate => &self.rate,
            RecordKind::SmoothedFlowDeviation => &self.deviation,
            RecordKind::Port => &self.port,
            RecordKind::SmoothedPort => &self.smoothed_port,
        }
    }

    /// All series feeding one chart category
    pub fn category(&self, category: SeriesCategory) -> &[Series] {
        match category {
            SeriesCategory::FlowRate => &self.rate,
            SeriesCategory::FlowDeviation => &self.deviation,
            SeriesCategory::FlowDeviationAverage => &self.deviation_average,
            SeriesCategory::Port => &self.port,
            SeriesCategory::PortSmoothed => &self.smoothed_port,
        }
    }

    pub fn rolling_window(&self, flow: usize) -> Option<&RollingWindow> {
        self.windows.window(flow)
    }

    /// Total number of samples across all kinds
    pub fn total_points(&self) -> usize {
        RecordKind::ALL
            .iter()
            .map(|&kind| self.series(kind).iter().map(Vec::len).sum::<usize>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_time_normalization() {
        let norm = Normalization::default();
        assert_eq!(norm.normalize(RecordKind::Rate, SimTime::from_nanos(2_000_000)), -1998.0);
        assert_eq!(norm.normalize(RecordKind::Rate, SimTime::from_secs(2)), 0.0);
        assert_eq!(
            norm.normalize(RecordKind::SmoothedFlowDeviation, SimTime::from_millis(2050)),
            50.0
        );
    }

    #[test]
    fn test_port_time_normalization() {
        let norm = Normalization::default();
        assert_eq!(norm.normalize(RecordKind::Port, SimTime::from_secs(1)), 1.0);
        assert_eq!(norm.normalize(RecordKind::SmoothedPort, SimTime::from_millis(2500)), 2.5);
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut store = SeriesStore::new(2);
        store.append(RecordKind::Rate, 1, SimTime::from_secs(3), 3.0);
        store.append(RecordKind::Rate, 1, SimTime::from_secs(2), 2.0);
        store.append(RecordKind::Rate, 1, SimTime::from_secs(2), 2.0);

        let values = store.series(RecordKind::Rate)[1]
            .iter()
            .map(|&(_, v)| v)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![3.0, 2.0, 2.0]);
        assert!(store.series(RecordKind::Rate)[0].is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut store = SeriesStore::new(1);
        assert!(!store.append(RecordKind::Rate, 1, SimTime::zero(), 1.0));
        assert!(!store.append(RecordKind::Port, PORT_COUNT, SimTime::zero(), 1.0));
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn test_deviation_feeds_rolling_window() {
        let mut store = SeriesStore::with_options(1, 2, Normalization::default());
        for v in [2.0, 4.0, 6.0] {
            store.append(RecordKind::SmoothedFlowDeviation, 0, SimTime::from_secs(2), v);
        }
        let window = store.rolling_window(0).unwrap();
        assert_eq!(window.sum(), 10.0);

        let averages = store
            .category(SeriesCategory::FlowDeviationAverage)[0]
            .iter()
            .map(|&(_, v)| v)
            .collect::<Vec<_>>();
        assert_eq!(averages, vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_finish_masks_port_two_only() {
        let mut store = SeriesStore::new(0);
        for port in 0..PORT_COUNT {
            store.append(RecordKind::Port, port, SimTime::from_secs(1), 1.0);
            store.append(RecordKind::SmoothedPort, port, SimTime::from_secs(1), 1.0);
        }
        store.finish();
        store.finish();

        assert!(store.is_finished());
        for port in 0..PORT_COUNT {
            let expected = if port == MASKED_PORT { 0 } else { 1 };
            assert_eq!(store.series(RecordKind::Port)[port].len(), expected);
            assert_eq!(store.series(RecordKind::SmoothedPort)[port].len(), expected);
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("flow_rate".parse::<SeriesCategory>().unwrap(), SeriesCategory::FlowRate);
        assert_eq!(
            "Port-Smoothed".parse::<SeriesCategory>().unwrap(),
            SeriesCategory::PortSmoothed
        );
        assert!("ports".parse::<SeriesCategory>().is_err());
        assert_eq!(SeriesCategory::FlowDeviationAverage.to_string(), "flow-deviation-average");
    }
}
