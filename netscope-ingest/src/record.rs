//! Trace line classification
//!
//! Each simulator trace line has the shape `<tag> <timestamp> <entity> <value>`:
//!
//! ```text
//! Rate:  <ns> <flow key>   <rate Gbps>
//! Port:  <ns> <port 0-8>   <utilization>
//! SPort: <ns> <port 0-8>   <smoothed utilization>
//! SMPD:  <ns> <flow key>   <deviation %>
//! ```
//!
//! Lines with fewer than four tokens and lines with an unknown tag are not
//! errors; [`parse_record`] reports them as `Ok(None)`.

use netscope_core::SimTime;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

const NR_RECORD_FIELDS: usize = 4;

/// The measurement a trace record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Rate,
    Port,
    SmoothedPort,
    SmoothedFlowDeviation,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Rate,
        RecordKind::Port,
        RecordKind::SmoothedPort,
        RecordKind::SmoothedFlowDeviation,
    ];

    /// Map a leading trace token to its kind
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Rate:" => Some(RecordKind::Rate),
            "Port:" => Some(RecordKind::Port),
            "SPort:" => Some(RecordKind::SmoothedPort),
            "SMPD:" => Some(RecordKind::SmoothedFlowDeviation),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Rate => "Rate:",
            RecordKind::Port => "Port:",
            RecordKind::SmoothedPort => "SPort:",
            RecordKind::SmoothedFlowDeviation => "SMPD:",
        }
    }

    /// Whether records of this kind are keyed by flow (as opposed to port)
    pub fn is_flow(&self) -> bool {
        matches!(self, RecordKind::Rate | RecordKind::SmoothedFlowDeviation)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().trim_end_matches(':'))
    }
}

/// One classified trace line
#[derive(Debug, Clone, PartialEq)]
pub enum TraceRecord {
    Rate {
        timestamp: SimTime,
        flow: String,
        gbps: f64,
    },
    Port {
        timestamp: SimTime,
        port: u32,
        utilization: f64,
    },
    SmoothedPort {
        timestamp: SimTime,
        port: u32,
        utilization: f64,
    },
    SmoothedFlowDeviation {
        timestamp: SimTime,
        flow: String,
        percent: f64,
    },
}

impl TraceRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            TraceRecord::Rate { .. } => RecordKind::Rate,
            TraceRecord::Port { .. } => RecordKind::Port,
            TraceRecord::SmoothedPort { .. } => RecordKind::SmoothedPort,
            TraceRecord::SmoothedFlowDeviation { .. } => RecordKind::SmoothedFlowDeviation,
        }
    }

    pub fn timestamp(&self) -> SimTime {
        match self {
            TraceRecord::Rate { timestamp, .. }
            | TraceRecord::Port { timestamp, .. }
            | TraceRecord::SmoothedPort { timestamp, .. }
            | TraceRecord::SmoothedFlowDeviation { timestamp, .. } => *timestamp,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            TraceRecord::Rate { gbps, .. } => *gbps,
            TraceRecord::Port { utilization, .. }
            | TraceRecord::SmoothedPort { utilization, .. } => *utilization,
            TraceRecord::SmoothedFlowDeviation { percent, .. } => *percent,
        }
    }
}

/// A recognized record whose numeric fields did not parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRecordError {
    #[error("invalid timestamp {value:?} in {kind} record: {source}")]
    Timestamp {
        kind: RecordKind,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid port index {value:?} in {kind} record: {source}")]
    PortIndex {
        kind: RecordKind,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value {value:?} in {kind} record: {source}")]
    Value {
        kind: RecordKind,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Classify one trace line
///
/// Returns `Ok(None)` for lines that are not records (too few tokens or an
/// unrecognized tag). Tokens past the fourth are ignored.
pub fn parse_record(line: &str) -> Result<Option<TraceRecord>, ParseRecordError> {
    let fields = line.split_whitespace().collect::<Vec<_>>();
    if fields.len() < NR_RECORD_FIELDS {
        return Ok(None);
    }
    let Some(kind) = RecordKind::from_tag(fields[0]) else {
        return Ok(None);
    };

    let timestamp = fields[1]
        .parse::<SimTime>()
        .map_err(|source| ParseRecordError::Timestamp {
            kind,
            value: fields[1].to_string(),
            source,
        })?;
    let value = fields[3]
        .parse::<f64>()
        .map_err(|source| ParseRecordError::Value {
            kind,
            value: fields[3].to_string(),
            source,
        })?;

    let record = match kind {
        RecordKind::Rate => TraceRecord::Rate {
            timestamp,
            flow: fields[2].to_string(),
            gbps: value,
        },
        RecordKind::SmoothedFlowDeviation => TraceRecord::SmoothedFlowDeviation {
            timestamp,
            flow: fields[2].to_string(),
            percent: value,
        },
        RecordKind::Port | RecordKind::SmoothedPort => {
            let port = fields[2]
                .parse::<u32>()
                .map_err(|source| ParseRecordError::PortIndex {
                    kind,
                    value: fields[2].to_string(),
                    source,
                })?;
            if kind == RecordKind::Port {
                TraceRecord::Port {
                    timestamp,
                    port,
                    utilization: value,
                }
            } else {
                TraceRecord::SmoothedPort {
                    timestamp,
                    port,
                    utilization: value,
                }
            }
        }
    };

    Ok(Some(record))
}
