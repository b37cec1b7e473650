//! Batch driver: ingest every input file and render its charts
//!
//! Failures are isolated. A file that cannot be read or parsed is reported
//! and skipped; a chart that cannot be built or rendered is reported and the
//! remaining charts of the file are still attempted.

use crate::config::{ChartConfig, PipelineConfig};
use crate::error::PipelineError;
use netscope_core::{file_span, render_span};
use netscope_ingest::{ingest_file, IngestStats, SeriesStore};
use netscope_viz::{render_to_path, ChartKind, ChartSpec, VizError};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of one chart render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartReport {
    pub category: String,
    pub kind: String,
    pub output: PathBuf,
    /// Display form of the failure, if the render was aborted
    pub error: Option<String>,
}

/// Outcome of one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: Option<IngestStats>,
    pub charts: Vec<ChartReport>,
    /// Display form of the ingestion failure, if the file was skipped
    pub error: Option<String>,
}

impl FileReport {
    pub fn charts_written(&self) -> usize {
        self.charts.iter().filter(|c| c.error.is_none()).count()
    }

    pub fn charts_failed(&self) -> usize {
        self.charts.iter().filter(|c| c.error.is_some()).count()
    }
}

/// Totals over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub files_failed: usize,
    pub records: usize,
    pub charts_written: usize,
    pub charts_failed: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut summary = RunSummary {
            files: reports.len(),
            ..Default::default()
        };
        for report in reports {
            if report.error.is_some() {
                summary.files_failed += 1;
            }
            summary.records += report.stats.as_ref().map_or(0, IngestStats::accepted);
            summary.charts_written += report.charts_written();
            summary.charts_failed += report.charts_failed();
        }
        summary
    }
}

/// A validated pipeline ready to run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Expand the configured inputs into a sorted, de-duplicated file list
    ///
    /// Entries without glob metacharacters are taken as literal paths.
    pub fn discover_inputs(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let mut paths = Vec::new();
        for pattern in &self.config.inputs {
            if !pattern.contains(['*', '?', '[']) {
                let path = PathBuf::from(pattern);
                if path.is_file() {
                    paths.push(path);
                }
                continue;
            }
            let matches = glob::glob(pattern).map_err(|source| PipelineError::Glob {
                pattern: pattern.clone(),
                source,
            })?;
            paths.extend(matches.filter_map(Result::ok).filter(|p| p.is_file()));
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }

    /// Process every input; fails only when nothing matched
    pub fn run(&self) -> Result<(Vec<FileReport>, RunSummary), PipelineError> {
        let inputs = self.discover_inputs()?;
        if inputs.is_empty() {
            return Err(PipelineError::NoInputs(self.config.inputs.clone()));
        }
        info!(files = inputs.len(), parallel = self.config.parallel, "Starting run");

        let reports: Vec<FileReport> = if self.config.parallel {
            inputs.par_iter().map(|path| self.process_file(path)).collect()
        } else {
            inputs.iter().map(|path| self.process_file(path)).collect()
        };

        let summary = RunSummary::from_reports(&reports);
        info!(
            files = summary.files,
            files_failed = summary.files_failed,
            records = summary.records,
            charts_written = summary.charts_written,
            charts_failed = summary.charts_failed,
            "Run complete"
        );
        Ok((reports, summary))
    }

    /// Ingest one file and render all configured charts for it
    pub fn process_file(&self, path: &Path) -> FileReport {
        let span = file_span(path);
        let _guard = span.enter();

        let ingested = self
            .config
            .ingest_config_for(path)
            .and_then(|ingest| ingest_file(path, &ingest).map_err(PipelineError::from));
        let outcome = match ingested {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Skipping input file");
                return FileReport {
                    path: path.to_path_buf(),
                    stats: None,
                    charts: Vec::new(),
                    error: Some(e.to_string()),
                };
            }
        };

        let charts = self
            .config
            .charts
            .iter()
            .map(|chart| self.render_chart(path, &outcome.store, chart))
            .collect();

        FileReport {
            path: path.to_path_buf(),
            stats: Some(outcome.stats),
            charts,
            error: None,
        }
    }

    /// `<output_dir>/<category>/<file stem>.<ext>`
    pub fn output_path(&self, input: &Path, chart: &ChartConfig) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "trace".to_string());
        self.config
            .output_dir
            .join(chart.category.slug())
            .join(format!("{stem}.{}", self.config.image_format.extension()))
    }

    fn render_chart(&self, input: &Path, store: &SeriesStore, chart: &ChartConfig) -> ChartReport {
        let span = render_span(chart.category.slug(), &chart.kind);
        let _guard = span.enter();

        let output = self.output_path(input, chart);
        let result = self.build_spec(store, chart).and_then(|spec| render_to_path(&spec, &output));
        let error = match result {
            Ok(()) => {
                info!(output = %output.display(), "Chart written");
                None
            }
            Err(e) => {
                error!(error = %e, "Render aborted");
                Some(e.to_string())
            }
        };

        ChartReport {
            category: chart.category.to_string(),
            kind: chart.kind.clone(),
            output,
            error,
        }
    }

    fn build_spec(&self, store: &SeriesStore, chart: &ChartConfig) -> Result<ChartSpec, VizError> {
        let kind: ChartKind = chart.kind.parse()?;
        let mut options = chart.options.clone();
        options.palette = self.config.palette;
        ChartSpec::from_points(kind, store.category(chart.category), options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscope_ingest::SeriesCategory;

    #[test]
    fn output_paths_group_by_category() {
        let pipeline = Pipeline::new(PipelineConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        })
        .unwrap();
        let chart = ChartConfig::standard(SeriesCategory::PortSmoothed);
        assert_eq!(
            pipeline.output_path(Path::new("traces/run1.txt"), &chart),
            PathBuf::from("out/port-smoothed/run1.png")
        );
    }

    #[test]
    fn unknown_kind_is_reported_per_chart() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let chart = ChartConfig {
            kind: "pie".to_string(),
            ..ChartConfig::standard(SeriesCategory::FlowRate)
        };
        let err = pipeline.build_spec(&SeriesStore::new(2), &chart).unwrap_err();
        assert!(matches!(err, VizError::UnknownChartType(_)));
    }

    #[test]
    fn summary_totals_reports() {
        let ok_chart = ChartReport {
            category: "port".into(),
            kind: "line".into(),
            output: PathBuf::from("a.png"),
            error: None,
        };
        let bad_chart = ChartReport {
            error: Some("boom".into()),
            ..ok_chart.clone()
        };
        let stats = IngestStats {
            rate: 3,
            port: 2,
            ..Default::default()
        };
        let reports = vec![
            FileReport {
                path: PathBuf::from("a.txt"),
                stats: Some(stats),
                charts: vec![ok_chart, bad_chart],
                error: None,
            },
            FileReport {
                path: PathBuf::from("b.txt"),
                stats: None,
                charts: Vec::new(),
                error: Some("missing".into()),
            },
        ];
        let summary = RunSummary::from_reports(&reports);
        assert_eq!(
            summary,
            RunSummary {
                files: 2,
                files_failed: 1,
                records: 5,
                charts_written: 1,
                charts_failed: 1,
            }
        );
    }

    #[test]
    fn no_matching_inputs_is_an_error() {
        let pipeline = Pipeline::new(PipelineConfig {
            inputs: vec!["/nonexistent-netscope-dir/*.txt".to_string()],
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(pipeline.run(), Err(PipelineError::NoInputs(_))));
    }
}
