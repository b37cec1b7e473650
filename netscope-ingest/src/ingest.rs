//! Line-by-line ingestion of one trace file

use crate::error::IngestError;
use crate::keymap::{FlowTable, KeyMapper};
use crate::record::{parse_record, RecordKind, TraceRecord};
use crate::series::{Normalization, SeriesStore};
use crate::window::DEFAULT_WINDOW_CAPACITY;
use netscope_core::SimTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// What to do with a recognized record whose numbers do not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParsePolicy {
    /// Log the line, count it, and keep going
    #[default]
    SkipLine,
    /// Stop ingesting the file and report the line
    AbortFile,
}

/// Per-file ingestion settings
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub flow_table: FlowTable,
    pub window_capacity: usize,
    pub normalization: Normalization,
    pub parse_policy: ParsePolicy,
    /// `Rate:` records stamped after this bound are dropped
    pub rate_cutoff: Option<SimTime>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            flow_table: FlowTable::default(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            normalization: Normalization::default(),
            parse_policy: ParsePolicy::default(),
            rate_cutoff: None,
        }
    }
}

/// Counters describing what happened to every line of a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub lines: usize,
    pub rate: usize,
    pub port: usize,
    pub smoothed_port: usize,
    pub deviation: usize,
    /// Lines that are not records (too short or unknown tag)
    pub discarded: usize,
    /// Records whose flow key or port index is not tracked
    pub unresolved: usize,
    /// Records with non-numeric fields, skipped under [`ParsePolicy::SkipLine`]
    pub malformed: usize,
    /// `Rate:` records past the configured cutoff
    pub beyond_cutoff: usize,
}

impl IngestStats {
    pub fn accepted(&self) -> usize {
        self.rate + self.port + self.smoothed_port + self.deviation
    }

    fn count_accepted(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Rate => self.rate += 1,
            RecordKind::Port => self.port += 1,
            RecordKind::SmoothedPort => self.smoothed_port += 1,
            RecordKind::SmoothedFlowDeviation => self.deviation += 1,
        }
    }
}

/// Finished series plus the counters that produced them
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub store: SeriesStore,
    pub stats: IngestStats,
}

/// Streaming ingestion state for one file
#[derive(Debug)]
pub struct Ingestor {
    mapper: KeyMapper,
    store: SeriesStore,
    stats: IngestStats,
    parse_policy: ParsePolicy,
    rate_cutoff: Option<SimTime>,
}

impl Ingestor {
    pub fn new(config: &IngestConfig) -> Self {
        let mapper = KeyMapper::new(config.flow_table.clone());
        let store = SeriesStore::with_options(
            mapper.flow_slots(),
            config.window_capacity,
            config.normalization,
        );
        Self {
            mapper,
            store,
            stats: IngestStats::default(),
            parse_policy: config.parse_policy,
            rate_cutoff: config.rate_cutoff,
        }
    }

    /// Feed one line of trace text
    pub fn push_line(&mut self, line: &str) -> Result<(), IngestError> {
        self.stats.lines += 1;
        let line_no = self.stats.lines;

        let record = match parse_record(line) {
            Ok(Some(record)) => record,
            Ok(None) => {
                trace!(line = line_no, "Discarded non-record line");
                self.stats.discarded += 1;
                return Ok(());
            }
            Err(source) => match self.parse_policy {
                ParsePolicy::SkipLine => {
                    warn!(line = line_no, error = %source, "Skipping malformed record");
                    self.stats.malformed += 1;
                    return Ok(());
                }
                ParsePolicy::AbortFile => {
                    return Err(IngestError::MalformedRecord {
                        line: line_no,
                        source,
                    });
                }
            },
        };

        self.push_record(&record);
        Ok(())
    }

    /// Feed one already-classified record
    pub fn push_record(&mut self, record: &TraceRecord) {
        let kind = record.kind();
        if kind == RecordKind::Rate {
            if let Some(cutoff) = self.rate_cutoff {
                if record.timestamp() > cutoff {
                    trace!(timestamp = %record.timestamp(), cutoff = %cutoff, "Dropped rate record past cutoff");
                    self.stats.beyond_cutoff += 1;
                    return;
                }
            }
        }

        let Some(index) = self.mapper.resolve(record) else {
            trace!(kind = %kind, "Dropped record with untracked entity");
            self.stats.unresolved += 1;
            return;
        };

        if self.store.append(kind, index, record.timestamp(), record.value()) {
            self.stats.count_accepted(kind);
        } else {
            self.stats.unresolved += 1;
        }
    }

    /// Apply end-of-file masking and hand back the series
    pub fn finish(mut self) -> IngestOutcome {
        self.store.finish();
        debug!(
            lines = self.stats.lines,
            accepted = self.stats.accepted(),
            discarded = self.stats.discarded,
            unresolved = self.stats.unresolved,
            malformed = self.stats.malformed,
            "Ingestion finished"
        );
        IngestOutcome {
            store: self.store,
            stats: self.stats,
        }
    }
}

/// Ingest trace text held in memory
pub fn ingest_str(text: &str, config: &IngestConfig) -> Result<IngestOutcome, IngestError> {
    let mut ingestor = Ingestor::new(config);
    for line in text.lines() {
        ingestor.push_line(line)?;
    }
    Ok(ingestor.finish())
}

/// Ingest trace text from any buffered reader
pub fn ingest_reader<R: BufRead>(reader: R, config: &IngestConfig) -> Result<IngestOutcome, IngestError> {
    let mut ingestor = Ingestor::new(config);
    for line in reader.lines() {
        ingestor.push_line(&line?)?;
    }
    Ok(ingestor.finish())
}

/// Ingest a trace file from disk
pub fn ingest_file(path: impl AsRef<Path>, config: &IngestConfig) -> Result<IngestOutcome, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let outcome = ingest_reader(BufReader::new(file), config)?;
    info!(
        path = %path.display(),
        records = outcome.stats.accepted(),
        lines = outcome.stats.lines,
        "Trace ingested"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_line_becomes_one_point() {
        let outcome = ingest_str("Rate: 2000000000 0b000001 10.5\n", &IngestConfig::default()).unwrap();
        assert_eq!(outcome.store.series(RecordKind::Rate)[0], vec![(0.0, 10.5)]);
        assert_eq!(outcome.stats.rate, 1);
    }

    #[test]
    fn test_port_line_becomes_one_point() {
        let outcome = ingest_str("Port: 1000000000 3 55.2\n", &IngestConfig::default()).unwrap();
        assert_eq!(outcome.store.series(RecordKind::Port)[3], vec![(1.0, 55.2)]);
    }

    #[test]
    fn test_stats_classify_every_line() {
        let text = "\
Rate: 2000000000 0b000001 1.0
Rate: 2000000000 ffffffff 1.0
garbage
SMPD: 2000000000 0b000001 nope
Port: 1000000000 12 1.0
SPort: 1000000000 4 1.0
SMPD: 2000000000 0b002001 5.0
";
        let outcome = ingest_str(text, &IngestConfig::default()).unwrap();
        let stats = outcome.stats;
        assert_eq!(stats.lines, 7);
        assert_eq!(stats.rate, 1);
        assert_eq!(stats.smoothed_port, 1);
        assert_eq!(stats.deviation, 1);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.unresolved, 2);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.accepted(), 3);
    }

    #[test]
    fn test_abort_policy_reports_line_number() {
        let config = IngestConfig {
            parse_policy: ParsePolicy::AbortFile,
            ..Default::default()
        };
        let err = ingest_str("Rate: 1 0b000001 1.0\nPort: x 1 1.0\n", &config).unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_rate_cutoff_only_affects_rate() {
        let config = IngestConfig {
            rate_cutoff: Some(SimTime::from_nanos(2_050_000_000)),
            ..Default::default()
        };
        let text = "\
Rate: 2050000000 0b000001 1.0
Rate: 2050000001 0b000001 2.0
SMPD: 2060000000 0b000001 3.0
";
        let outcome = ingest_str(text, &config).unwrap();
        assert_eq!(outcome.store.series(RecordKind::Rate)[0].len(), 1);
        assert_eq!(outcome.store.series(RecordKind::SmoothedFlowDeviation)[0].len(), 1);
        assert_eq!(outcome.stats.beyond_cutoff, 1);
    }

    #[test]
    fn test_reader_matches_str() {
        let text = "Rate: 2000000000 0b000001 1.0\nPort: 1000000000 1 2.0\n";
        let a = ingest_str(text, &IngestConfig::default()).unwrap();
        let b = ingest_reader(text.as_bytes(), &IngestConfig::default()).unwrap();
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.store.total_points(), b.store.total_points());
    }
}
