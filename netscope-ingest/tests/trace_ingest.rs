use netscope_ingest::{
    flow_key_for_node, ingest_file, ingest_str, FlowTable, IngestConfig, RecordKind,
    SeriesCategory, MASKED_PORT,
};
use std::fmt::Write;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("netscope_ingest_{}_{n}_{name}", std::process::id()))
}

/// N synthetic rate lines for one flow come back as N points in the same order.
#[test]
fn rate_lines_roundtrip_in_order() {
    let mut text = String::new();
    let values = (0..200).map(|i| (i as f64 * 0.37).sin() * 100.0).collect::<Vec<_>>();
    for (i, v) in values.iter().enumerate() {
        writeln!(text, "Rate: {} 0b002001 {v}", 2_000_000_000u64 + i as u64 * 1_000).unwrap();
    }

    let outcome = ingest_str(&text, &IngestConfig::default()).unwrap();
    let series = &outcome.store.series(RecordKind::Rate)[1];
    assert_eq!(series.len(), values.len());
    assert_eq!(series.iter().map(|&(_, v)| v).collect::<Vec<_>>(), values);
    for (i, &(t, _)) in series.iter().enumerate() {
        let raw = 2_000_000_000u64 + i as u64 * 1_000;
        assert_eq!(t, raw as f64 / 1e6 - 2000.0);
    }
}

/// Fifty-one deviation samples leave the first one outside the window.
#[test]
fn deviation_window_evicts_oldest() {
    let key = flow_key_for_node(64);
    let mut text = String::new();
    for i in 0..=50 {
        writeln!(text, "SMPD: {} {key} {}", 2_000_000_000u64 + i, i + 1).unwrap();
    }

    let outcome = ingest_str(&text, &IngestConfig::default()).unwrap();
    let window = outcome.store.rolling_window(2).unwrap();
    assert_eq!(window.len(), 50);
    assert_eq!(window.sum(), (2..=51).sum::<u64>() as f64);
    assert_eq!(outcome.store.category(SeriesCategory::FlowDeviation)[2].len(), 51);
}

#[test]
fn masked_port_is_empty_after_ingest() {
    let mut text = String::new();
    for port in 0..9 {
        writeln!(text, "Port: 1000000000 {port} 0.5").unwrap();
        writeln!(text, "SPort: 2000000000 {port} 0.25").unwrap();
    }

    let outcome = ingest_str(&text, &IngestConfig::default()).unwrap();
    for (port, series) in outcome.store.series(RecordKind::Port).iter().enumerate() {
        if port == MASKED_PORT {
            assert!(series.is_empty());
        } else {
            assert_eq!(series, &vec![(1.0, 0.5)]);
        }
    }
    assert!(outcome.store.series(RecordKind::SmoothedPort)[MASKED_PORT].is_empty());
}

#[test]
fn focused_table_drops_other_flows() {
    let config = IngestConfig {
        flow_table: FlowTable::focus5(),
        ..Default::default()
    };
    let text = format!(
        "Rate: 2000000000 {} 1.0\nRate: 2000000000 {} 2.0\n",
        flow_key_for_node(32),
        flow_key_for_node(512),
    );

    let outcome = ingest_str(&text, &config).unwrap();
    assert_eq!(outcome.store.series(RecordKind::Rate).len(), 5);
    assert_eq!(outcome.store.series(RecordKind::Rate)[3], vec![(0.0, 2.0)]);
    assert_eq!(outcome.stats.unresolved, 1);
}

#[test]
fn ingest_file_reads_from_disk() {
    let path = temp_path("trace.txt");
    std::fs::write(&path, "Port: 1000000000 3 55.2\nshort line\n").unwrap();

    let outcome = ingest_file(&path, &IngestConfig::default()).unwrap();
    assert_eq!(outcome.store.series(RecordKind::Port)[3], vec![(1.0, 55.2)]);
    assert_eq!(outcome.stats.discarded, 1);

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ingest_file(temp_path("missing.txt"), &IngestConfig::default()).unwrap_err();
    assert!(matches!(err, netscope_ingest::IngestError::IoError(_)));
}
