//! Pipeline configuration
//!
//! Loaded from TOML; every field has a default so an empty file is a valid
//! configuration that renders the four standard chart categories.

use crate::error::PipelineError;
use netscope_core::SimTime;
use netscope_ingest::{
    FlowTable, FlowTableVariant, IngestConfig, IngestError, Normalization, ParsePolicy, SeriesCategory,
    DEFAULT_WINDOW_CAPACITY,
};
use netscope_viz::{ChartOptions, ImageFormat, PaletteName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flow table selection: a built-in variant or an explicit key map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlowTableConfig {
    Variant(FlowTableVariant),
    Custom { custom: BTreeMap<String, usize> },
}

impl Default for FlowTableConfig {
    fn default() -> Self {
        FlowTableConfig::Variant(FlowTableVariant::Full)
    }
}

impl FlowTableConfig {
    pub fn build(&self) -> Result<FlowTable, IngestError> {
        match self {
            FlowTableConfig::Variant(variant) => Ok(FlowTable::from_variant(*variant)),
            FlowTableConfig::Custom { custom } => {
                FlowTable::custom(custom.iter().map(|(key, &idx)| (key.clone(), idx)))
            }
        }
    }
}

/// Drop late `Rate:` records for a subset of inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCutoff {
    /// Raw simulator timestamp; records stamped later are dropped
    pub timestamp: SimTime,
    /// Glob patterns matched against the input file name
    #[serde(default)]
    pub inputs: Vec<String>,
}

impl RateCutoff {
    pub fn applies_to(&self, path: &Path) -> Result<bool, PipelineError> {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(false);
        };
        for pattern in &self.inputs {
            if compile_pattern(pattern)?.matches(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn compile_pattern(pattern: &str) -> Result<glob::Pattern, PipelineError> {
    glob::Pattern::new(pattern).map_err(|source| PipelineError::Glob {
        pattern: pattern.to_string(),
        source,
    })
}

fn default_chart_kind() -> String {
    "line".to_string()
}

/// One chart rendered for every input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub category: SeriesCategory,
    /// Chart kind name, resolved when the chart is rendered
    #[serde(default = "default_chart_kind")]
    pub kind: String,
    #[serde(flatten)]
    pub options: ChartOptions,
    /// Keys no chart option claimed; rejected by [`PipelineConfig::validate`]
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl ChartConfig {
    pub fn new(category: SeriesCategory, options: ChartOptions) -> Self {
        Self {
            category,
            kind: default_chart_kind(),
            options,
            unknown: BTreeMap::new(),
        }
    }

    /// Line chart with the conventional title and axis labels for `category`
    pub fn standard(category: SeriesCategory) -> Self {
        let (title, x_label, y_label) = match category {
            SeriesCategory::FlowRate => ("Flow rate", "Time (ms)", "Rate (Gbps)"),
            SeriesCategory::FlowDeviation => ("Smoothed flow deviation", "Time (ms)", "Deviation (%)"),
            SeriesCategory::FlowDeviationAverage => {
                ("Rolling average flow deviation", "Time (ms)", "Deviation (%)")
            }
            SeriesCategory::Port => ("Port utilization", "Time (s)", "Utilization"),
            SeriesCategory::PortSmoothed => ("Smoothed port utilization", "Time (s)", "Utilization"),
        };
        Self::new(
            category,
            ChartOptions::new(title).x_label(x_label).y_label(y_label),
        )
    }
}

/// Everything the driver needs to turn trace files into charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Input files or glob patterns
    pub inputs: Vec<String>,
    pub output_dir: PathBuf,
    pub flow_table: FlowTableConfig,
    pub window_capacity: usize,
    pub warmup_offset_ms: f64,
    pub parse_policy: ParsePolicy,
    /// Process files concurrently; a single file is always sequential
    pub parallel: bool,
    /// Palette applied to every chart
    pub palette: PaletteName,
    pub image_format: ImageFormat,
    pub rate_cutoff: Option<RateCutoff>,
    pub charts: Vec<ChartConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("plots"),
            flow_table: FlowTableConfig::default(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            warmup_offset_ms: Normalization::default().warmup_offset_ms,
            parse_policy: ParsePolicy::default(),
            parallel: false,
            palette: PaletteName::default(),
            image_format: ImageFormat::default(),
            rate_cutoff: None,
            charts: SeriesCategory::DEFAULTS
                .into_iter()
                .map(ChartConfig::standard)
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|source| PipelineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check settings that cannot be expressed in the types
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.window_capacity == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "window_capacity must be at least 1".to_string(),
            ));
        }
        if !self.warmup_offset_ms.is_finite() {
            return Err(PipelineError::InvalidConfiguration(format!(
                "warmup_offset_ms must be finite, got {}",
                self.warmup_offset_ms
            )));
        }
        if self.charts.is_empty() {
            return Err(PipelineError::InvalidConfiguration(
                "at least one chart must be configured".to_string(),
            ));
        }
        for chart in &self.charts {
            if !chart.unknown.is_empty() {
                let keys: Vec<&str> = chart.unknown.keys().map(String::as_str).collect();
                return Err(PipelineError::InvalidConfiguration(format!(
                    "unknown option(s) {} in {} chart",
                    keys.join(", "),
                    chart.category
                )));
            }
        }
        self.flow_table.build()?;
        for pattern in &self.inputs {
            compile_pattern(pattern)?;
        }
        if let Some(cutoff) = &self.rate_cutoff {
            for pattern in &cutoff.inputs {
                compile_pattern(pattern)?;
            }
        }
        Ok(())
    }

    /// Ingest settings for one input file
    pub fn ingest_config_for(&self, path: &Path) -> Result<IngestConfig, PipelineError> {
        let rate_cutoff = match &self.rate_cutoff {
            Some(cutoff) if cutoff.applies_to(path)? => Some(cutoff.timestamp),
            _ => None,
        };
        Ok(IngestConfig {
            flow_table: self.flow_table.build()?,
            window_capacity: self.window_capacity,
            normalization: Normalization {
                warmup_offset_ms: self.warmup_offset_ms,
            },
            parse_policy: self.parse_policy,
            rate_cutoff,
        })
    }
}
